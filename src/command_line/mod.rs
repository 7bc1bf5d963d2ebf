#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

//! Command-line front end for the puzzle solvers.

/// Argument definitions and the per-puzzle command handlers.
pub mod cli;
