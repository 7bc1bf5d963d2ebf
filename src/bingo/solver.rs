use crate::bingo::board::{Board, BoardError, CELLS, SIDE};
use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised while parsing a bingo input or playing it out.
#[derive(Debug, Error)]
pub enum BingoError {
    /// The input held no draw line at all.
    #[error("input is empty; expected a leading line of drawn numbers")]
    MissingDraws,

    /// The draw line was not followed by any board block.
    #[error("no boards follow the draw line")]
    MissingBoards,

    /// A draw or cell token did not parse as an unsigned number.
    #[error("invalid number {token:?}: {source}")]
    InvalidNumber {
        /// The offending token, trimmed.
        token: String,
        /// The underlying parse failure.
        source: ParseIntError,
    },

    /// A board block did not hold exactly five rows.
    #[error("board {board} has {found} rows, expected {SIDE}")]
    WrongRowCount {
        /// Index of the board in input order.
        board: usize,
        /// How many rows the block held.
        found: usize,
    },

    /// A board row did not hold exactly five values.
    #[error("board {board}, row {row} has {found} values, expected {SIDE}")]
    WrongColumnCount {
        /// Index of the board in input order.
        board: usize,
        /// Index of the offending row within its board.
        row: usize,
        /// How many values the row held.
        found: usize,
    },

    /// A board's 25 cells failed validation.
    #[error("board {board}: {source}")]
    InvalidBoard {
        /// Index of the board in input order.
        board: usize,
        /// What was wrong with the cells.
        source: BoardError,
    },

    /// The draws ran out with no completed board.
    #[error("the draws ran out before any board won")]
    NoWinner,
}

/// Splits an input into the draw sequence and the boards, in input order.
///
/// The first non-empty block is a comma-separated line of draws; every
/// later blank-line-separated block is one 5x5 board.
///
/// # Errors
///
/// Fails on missing sections, malformed numbers, misshapen boards and
/// boards that repeat a value.
pub fn parse(input: &str) -> Result<(Vec<u32>, Vec<Board>), BingoError> {
    let mut blocks = input.split("\n\n").filter(|block| !block.trim().is_empty());

    let draws = blocks
        .next()
        .ok_or(BingoError::MissingDraws)?
        .trim()
        .split(',')
        .map(parse_number)
        .collect::<Result<Vec<_>, _>>()?;

    let boards = blocks
        .enumerate()
        .map(|(index, block)| parse_board(index, block))
        .collect::<Result<Vec<_>, _>>()?;

    if boards.is_empty() {
        return Err(BingoError::MissingBoards);
    }
    Ok((draws, boards))
}

fn parse_number(token: &str) -> Result<u32, BingoError> {
    token
        .trim()
        .parse()
        .map_err(|source| BingoError::InvalidNumber {
            token: token.trim().to_string(),
            source,
        })
}

fn parse_board(index: usize, block: &str) -> Result<Board, BingoError> {
    let rows: Vec<&str> = block.lines().filter(|line| !line.trim().is_empty()).collect();
    if rows.len() != SIDE {
        return Err(BingoError::WrongRowCount {
            board: index,
            found: rows.len(),
        });
    }

    let mut cells = Vec::with_capacity(CELLS);
    for (row, line) in rows.iter().enumerate() {
        let values = line
            .split_whitespace()
            .map(parse_number)
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() != SIDE {
            return Err(BingoError::WrongColumnCount {
                board: index,
                row,
                found: values.len(),
            });
        }
        cells.extend(values);
    }

    Board::new(&cells).map_err(|source| BingoError::InvalidBoard {
        board: index,
        source,
    })
}

/// Plays the draws until the first board wins and returns its score.
///
/// When one draw completes several boards at once, the board earliest in
/// input order takes the win.
///
/// # Errors
///
/// [`BingoError::NoWinner`] if the draws run out with no complete board.
pub fn first_winning_score(draws: &[u32], boards: &[Board]) -> Result<u64, BingoError> {
    let mut boards = boards.to_vec();

    for &draw in draws {
        for board in &mut boards {
            if board.play_num(draw) {
                if let Some(score) = board.score() {
                    return Ok(score);
                }
            }
        }
    }
    Err(BingoError::NoWinner)
}

/// Plays every board to completion and returns the score of the last one
/// to win. Boards that never win are ignored as long as at least one wins.
///
/// # Errors
///
/// [`BingoError::NoWinner`] if the draws run out with no complete board.
pub fn last_winning_score(draws: &[u32], boards: &[Board]) -> Result<u64, BingoError> {
    let mut boards = boards.to_vec();
    let mut last_score = None;

    for &draw in draws {
        for board in boards.iter_mut().filter(|board| !board.has_won()) {
            if board.play_num(draw) {
                last_score = board.score();
            }
        }
        if boards.iter().all(Board::has_won) {
            break;
        }
    }
    last_score.ok_or(BingoError::NoWinner)
}

/// Worked example: the third board wins first on draw 24, the second wins
/// last on draw 13.
pub const EXAMPLE: &str = "\
7,4,9,5,11,17,23,2,0,14,21,24,10,16,13,6,15,25,12,22,18,20,8,19,3,26,1

22 13 17 11  0
 8  2 23  4 24
21  9 14 16  7
 6 10  3 18  5
 1 12 20 15 19

 3 15  0  2 22
 9 18 13 17  5
19  8  7 25 23
20 11 10 24  4
14 21 16 12  6

14 21 17 24  4
10 16 15  9 19
18  8 23 26 20
22 11 13  6  5
 2  0 12  3  7
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_example() {
        let (draws, boards) = parse(EXAMPLE).unwrap();
        assert_eq!(draws.len(), 27);
        assert_eq!(draws[0], 7);
        assert_eq!(boards.len(), 3);
        assert_eq!(boards[2].cell(0, 0), 14);
        assert_eq!(boards[2].cell(4, 4), 7);
    }

    #[test]
    fn test_first_winner_example() {
        let (draws, boards) = parse(EXAMPLE).unwrap();
        assert_eq!(first_winning_score(&draws, &boards).unwrap(), 4512);
    }

    #[test]
    fn test_last_winner_example() {
        let (draws, boards) = parse(EXAMPLE).unwrap();
        assert_eq!(last_winning_score(&draws, &boards).unwrap(), 1924);
    }

    #[test]
    fn test_callers_boards_stay_untouched() {
        let (draws, boards) = parse(EXAMPLE).unwrap();
        first_winning_score(&draws, &boards).unwrap();
        assert!(boards.iter().all(|board| !board.has_won()));
        last_winning_score(&draws, &boards).unwrap();
        assert_eq!(last_winning_score(&draws, &boards).unwrap(), 1924);
    }

    #[test]
    fn test_no_winner_when_draws_run_out() {
        let (_, boards) = parse(EXAMPLE).unwrap();
        let short_draws = [7, 4, 9];
        assert!(matches!(
            first_winning_score(&short_draws, &boards),
            Err(BingoError::NoWinner)
        ));
        assert!(matches!(
            last_winning_score(&short_draws, &boards),
            Err(BingoError::NoWinner)
        ));
    }

    #[test]
    fn test_tie_goes_to_earliest_board() {
        // Both boards share a first row completed by the same five draws.
        let shared_row = "1 2 3 4 5";
        let input = format!(
            "1,2,3,4,5\n\n\
             {shared_row}\n6 7 8 9 10\n11 12 13 14 15\n16 17 18 19 20\n21 22 23 24 25\n\n\
             {shared_row}\n26 27 28 29 30\n31 32 33 34 35\n36 37 38 39 40\n41 42 43 44 45\n"
        );
        let (draws, boards) = parse(&input).unwrap();

        // Board 0 unmarked sum: 6..=25 -> 310. Board 1: 26..=45 -> 710.
        assert_eq!(first_winning_score(&draws, &boards).unwrap(), 310 * 5);
        assert_eq!(last_winning_score(&draws, &boards).unwrap(), 710 * 5);
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(matches!(parse("  \n \n"), Err(BingoError::MissingDraws)));
    }

    #[test]
    fn test_parse_rejects_missing_boards() {
        assert!(matches!(parse("1,2,3\n"), Err(BingoError::MissingBoards)));
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        let err = parse("1,x,3\n\n1 2 3 4 5\n").unwrap_err();
        assert!(matches!(err, BingoError::InvalidNumber { token, .. } if token == "x"));
    }

    #[test]
    fn test_parse_rejects_short_board() {
        let input = "1,2\n\n1 2 3 4 5\n6 7 8 9 10\n";
        assert!(matches!(
            parse(input),
            Err(BingoError::WrongRowCount { board: 0, found: 2 })
        ));
    }

    #[test]
    fn test_parse_rejects_ragged_row() {
        let input = "1,2\n\n\
            1 2 3 4 5\n6 7 8 9\n11 12 13 14 15\n16 17 18 19 20\n21 22 23 24 25\n";
        assert!(matches!(
            parse(input),
            Err(BingoError::WrongColumnCount {
                board: 0,
                row: 1,
                found: 4
            })
        ));
    }

    #[test]
    fn test_parse_rejects_duplicate_cell() {
        let input = "1,2\n\n\
            1 2 3 4 5\n6 7 8 9 10\n11 12 13 14 15\n16 17 18 19 20\n21 22 23 24 1\n";
        assert!(matches!(
            parse(input),
            Err(BingoError::InvalidBoard {
                board: 0,
                source: BoardError::DuplicateCell(1)
            })
        ));
    }
}
