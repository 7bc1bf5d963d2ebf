#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading a signal pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// The character is not a letter in `a..=g`.
    #[error("{0:?} is not a signal wire; expected a letter in a..g")]
    InvalidWire(char),

    /// The same wire was listed twice in one pattern.
    #[error("wire {0} appears twice in one pattern")]
    RepeatedWire(char),

    /// The pattern held no wires at all.
    #[error("a signal pattern cannot be empty")]
    Empty,
}

/// One of the seven signal wires, `a` through `g`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wire(u8);

impl Wire {
    /// Wire `a`.
    pub const A: Self = Self(0);
    /// Wire `b`.
    pub const B: Self = Self(1);
    /// Wire `c`.
    pub const C: Self = Self(2);
    /// Wire `d`.
    pub const D: Self = Self(3);
    /// Wire `e`.
    pub const E: Self = Self(4);
    /// Wire `f`.
    pub const F: Self = Self(5);
    /// Wire `g`.
    pub const G: Self = Self(6);

    /// All wires in letter order.
    pub const ALL: [Self; 7] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    /// # Errors
    ///
    /// [`WireError::InvalidWire`] for anything outside `a..=g`.
    pub const fn from_letter(letter: char) -> Result<Self, WireError> {
        match letter {
            'a'..='g' => Ok(Self(letter as u8 - b'a')),
            _ => Err(WireError::InvalidWire(letter)),
        }
    }

    /// The wire's lowercase letter.
    #[must_use]
    pub const fn letter(self) -> char {
        (b'a' + self.0) as char
    }

    /// The wire's offset from `a`, for table indexing.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A set of signal wires packed into the low seven bits of a byte.
///
/// Patterns are sets: the order letters arrive in carries no information,
/// so two scrambles of the same wires compare, hash and render identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct WireSet(u8);

impl WireSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// All seven wires.
    pub const ALL: Self = Self(0x7f);

    /// Builds a set from ASCII letters, for spelling out fixed sets.
    ///
    /// # Panics
    ///
    /// On anything outside `a..=g`. In a `const` table that turns a typo
    /// into a compile error, which is the point.
    #[must_use]
    pub const fn from_letters(letters: &[u8]) -> Self {
        let mut mask = 0u8;
        let mut i = 0;
        while i < letters.len() {
            assert!(
                letters[i] >= b'a' && letters[i] <= b'g',
                "letter outside a..=g"
            );
            mask |= 1 << (letters[i] - b'a');
            i += 1;
        }
        Self(mask)
    }

    /// The one-wire set holding `wire`.
    #[must_use]
    pub const fn singleton(wire: Wire) -> Self {
        Self(1 << wire.0)
    }

    /// Number of wires in the set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether no wire is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `wire` is in the set.
    #[must_use]
    pub const fn contains(self, wire: Wire) -> bool {
        self.0 & (1 << wire.0) != 0
    }

    /// A copy of the set with `wire` added.
    #[must_use]
    pub const fn with(self, wire: Wire) -> Self {
        Self(self.0 | 1 << wire.0)
    }

    /// A copy of the set with `wire` removed.
    #[must_use]
    pub const fn without(self, wire: Wire) -> Self {
        Self(self.0 & !(1 << wire.0))
    }

    /// Wires in either set.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Wires in both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Wires in `self` but not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Whether every wire of `other` is also in `self`.
    #[must_use]
    pub const fn is_superset(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// The sole member of a singleton set. `None` for any other size, which
    /// is what the deduction steps lean on to refuse ambiguous candidates.
    #[must_use]
    pub const fn only(self) -> Option<Wire> {
        if self.0.count_ones() == 1 {
            Some(Wire(self.0.trailing_zeros() as u8))
        } else {
            None
        }
    }

    /// Member wires in letter order.
    pub fn iter(self) -> impl Iterator<Item = Wire> {
        Wire::ALL.into_iter().filter(move |&wire| self.contains(wire))
    }
}

impl FromStr for WireSet {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = Self::EMPTY;
        for letter in s.trim().chars() {
            let wire = Wire::from_letter(letter)?;
            if set.contains(wire) {
                return Err(WireError::RepeatedWire(letter));
            }
            set = set.with(wire);
        }

        if set.is_empty() {
            return Err(WireError::Empty);
        }
        Ok(set)
    }
}

impl fmt::Display for WireSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for wire in self.iter() {
            write!(f, "{wire}")?;
        }
        Ok(())
    }
}
