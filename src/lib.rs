#![deny(missing_docs)]
//! This crate solves four independent deep-sea puzzles, each a small
//! parse-solve-print pipeline with no state shared between them.

/// The `bingo` module plays 5x5 bingo boards against a draw sequence and scores
/// the first and the last board to win.
pub mod bingo;

/// The `crabs` module aligns a fleet of crab submarines at the horizontal
/// position with the cheapest total fuel bill.
pub mod crabs;

/// The `segments` module recovers scrambled seven-segment wirings by set
/// deduction and decodes the displayed values.
pub mod segments;

/// The `vents` module rasterizes hydrothermal vent lines and counts the
/// lattice points where they overlap.
pub mod vents;
