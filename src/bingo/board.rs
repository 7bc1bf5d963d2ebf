use bit_vec::BitVec;
use std::fmt;
use thiserror::Error;

/// Side length of a bingo board. The subsystem only ever deals in 5x5 grids.
pub const SIDE: usize = 5;

/// Number of cells on a board.
pub const CELLS: usize = SIDE * SIDE;

/// Errors raised while building a board from its cell values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The flat cell list was not exactly 25 values long.
    #[error("expected {CELLS} cells, found {0}")]
    WrongCellCount(usize),

    /// The same value appears in two cells.
    #[error("value {0} appears more than once on the board")]
    DuplicateCell(u32),

    /// The cell values are so large a score could exceed `u64`.
    #[error("board values are too large to score in 64 bits")]
    ScoreOverflow,
}

/// A 5x5 bingo board with a parallel mark grid.
///
/// Marks only ever accumulate. The draw that completed the first full row or
/// column is recorded on the board, so a finished board keeps its score and
/// later draws cannot change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [u32; CELLS],
    marks: BitVec,
    winning_draw: Option<u32>,
}

impl Board {
    /// Builds a board from its cells in row-major order.
    ///
    /// # Errors
    ///
    /// Rejects inputs that are not exactly 25 values, that repeat a value
    /// (a duplicate would let one draw fill two cells of a row or column),
    /// or whose values are large enough for a score to overflow `u64`.
    pub fn new(cells: &[u32]) -> Result<Self, BoardError> {
        let cells: [u32; CELLS] = cells
            .try_into()
            .map_err(|_| BoardError::WrongCellCount(cells.len()))?;

        for (i, &value) in cells.iter().enumerate() {
            if cells[..i].contains(&value) {
                return Err(BoardError::DuplicateCell(value));
            }
        }

        // Any score is bounded by the full cell sum times the largest cell,
        // since the winning draw is always a value on the board.
        let total: u64 = cells.iter().map(|&value| u64::from(value)).sum();
        let largest = cells.iter().copied().max().unwrap_or(0);
        if total.checked_mul(u64::from(largest)).is_none() {
            return Err(BoardError::ScoreOverflow);
        }

        Ok(Self {
            cells,
            marks: BitVec::from_elem(CELLS, false),
            winning_draw: None,
        })
    }

    /// Marks `draw` wherever it appears and reports whether the board now
    /// has a complete row or column. A board that has already won ignores
    /// further draws and keeps reporting `true`.
    pub fn play_num(&mut self, draw: u32) -> bool {
        if self.winning_draw.is_some() {
            return true;
        }

        for index in 0..CELLS {
            if self.cells[index] == draw {
                self.marks.set(index, true);
            }
        }

        if self.has_bingo() {
            self.winning_draw = Some(draw);
        }
        self.winning_draw.is_some()
    }

    /// Whether any full row or column is marked. Diagonals never count.
    #[must_use]
    pub fn has_bingo(&self) -> bool {
        let row_done = |row: usize| (0..SIDE).all(|col| self.marks[row * SIDE + col]);
        let col_done = |col: usize| (0..SIDE).all(|row| self.marks[row * SIDE + col]);

        (0..SIDE).any(row_done) || (0..SIDE).any(col_done)
    }

    /// Whether an earlier draw completed this board.
    #[must_use]
    pub const fn has_won(&self) -> bool {
        self.winning_draw.is_some()
    }

    /// Score of a finished board: the sum of its unmarked cells times the
    /// draw that completed it. `None` while the board is still in play.
    #[must_use]
    pub fn score(&self) -> Option<u64> {
        let winning_draw = self.winning_draw?;
        let unmarked: u64 = (0..CELLS)
            .filter(|&index| !self.marks[index])
            .map(|index| u64::from(self.cells[index]))
            .sum();

        Some(unmarked * u64::from(winning_draw))
    }

    /// Cell value at `(row, col)`.
    #[must_use]
    pub const fn cell(&self, row: usize, col: usize) -> u32 {
        self.cells[row * SIDE + col]
    }

    /// Whether the cell at `(row, col)` has been marked.
    #[must_use]
    pub fn is_marked(&self, row: usize, col: usize) -> bool {
        self.marks[row * SIDE + col]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..SIDE {
                if col > 0 {
                    write!(f, " ")?;
                }
                let flag = if self.is_marked(row, col) { '*' } else { ' ' };
                write!(f, "{:>2}{flag}", self.cell(row, col))?;
            }
        }
        Ok(())
    }
}
