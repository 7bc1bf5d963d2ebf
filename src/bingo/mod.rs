#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

//! Giant-squid bingo.
//!
//! Marks drawn numbers on a set of 5x5 boards and reports the score of the
//! first and the last board to complete a full row or column.

/// Board state, win detection and scoring.
pub mod board;

/// Input parsing and the draw loop for both parts.
pub mod solver;
