#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

//! Scrambled seven-segment displays.
//!
//! Each entry shows ten signal patterns wired through an unknown permutation
//! of the seven segment wires. The solver recovers the permutation from
//! set-membership counts alone, then decodes the entry's four outputs.

/// Wires and bit-packed wire sets.
pub mod wires;

/// Entry parsing, the deduction and output decoding.
pub mod solver;
