//! # deepsea
//!
//! `deepsea` is a command-line runner for four independent deep-sea puzzles:
//! squid bingo, hydrothermal vent lines, crab-submarine alignment and
//! scrambled seven-segment displays. Each puzzle reads one small text file
//! and prints its two answers.
//!
//! ## Features
//!
//! -   **One solver per input format**:
//!     -   Bingo boards (`.bingo`)
//!     -   Vent-line segments (`.vents`)
//!     -   Crab positions (`.crabs`)
//!     -   Seven-segment entries (`.segments`)
//! -   **Extension dispatch**: a bare path argument picks the solver from the
//!     file extension.
//! -   **Directory mode**: `all` walks a directory and solves every
//!     recognized input it finds.
//! -   **Self check**: `check` replays the worked examples from the problem
//!     statements and fails loudly on any mismatch.
//! -   **Debugging**: option to print a summary of the parsed input.
//! -   **Statistics**: parse and solve timings plus memory usage via
//!     `tikv-jemallocator`.
//!
//! ## Usage
//!
//! ```sh
//! # Pick the solver from the extension
//! deepsea input.bingo
//!
//! # Name the solver explicitly
//! deepsea vents --path input.vents --debug
//!
//! # Solve a whole directory of inputs
//! deepsea all --path puzzles/
//!
//! # Replay the worked examples
//! deepsea check
//!
//! # Shell completions
//! deepsea completions zsh
//! ```
//!
//! This file contains the entry point and the dispatch to the handlers in
//! the `command_line` module; the solvers themselves live in the library
//! crate.

use clap::{CommandFactory, Parser};

mod command_line;

use crate::command_line::cli::{self, Cli, Commands};

/// Global allocator using `tikv-jemallocator` for potentially better performance
/// and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    if let Err(message) = run(cli) {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

/// Dispatches the parsed arguments to the matching handler.
fn run(cli: Cli) -> Result<(), String> {
    // A bare path without a subcommand: the extension says which puzzle.
    if cli.command.is_none() {
        if let Some(path) = &cli.path {
            return cli::solve_path(path, &cli.common);
        }
    }

    match cli.command {
        Some(Commands::Bingo { path, common }) => cli::solve_bingo(&path, &common),
        Some(Commands::Vents { path, common }) => cli::solve_vents(&path, &common),
        Some(Commands::Crabs { path, common }) => cli::solve_crabs(&path, &common),
        Some(Commands::Segments { path, common }) => cli::solve_segments(&path, &common),
        Some(Commands::All { path, common }) => cli::solve_all(&path, &common),
        Some(Commands::Check) => cli::run_check(),
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            Ok(())
        }
        None => Cli::command().print_help().map_err(|e| e.to_string()),
    }
}
