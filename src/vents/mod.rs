#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

//! Hydrothermal vent lines.
//!
//! Rasterizes horizontal, vertical and 45-degree segments onto a sparse
//! point map and counts the lattice points covered more than once.

/// Points, segments and the rasterizing iterator.
pub mod segment;

/// Input parsing and overlap counting.
pub mod solver;
