#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

//! Crab submarine alignment.
//!
//! Finds the horizontal position the fleet can reach with the least total
//! fuel, under a linear and a triangular per-step cost.

/// Cost models, the bounded scan and input parsing.
pub mod solver;
