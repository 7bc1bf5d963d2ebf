#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use deepsea_puzzles::bingo;
use deepsea_puzzles::crabs::{self, solver::CostModel};
use deepsea_puzzles::segments;
use deepsea_puzzles::vents::{self, segment::Orientation};
use itertools::Itertools;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the puzzle runner.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "deepsea", version, about = "Solvers for the deep-sea puzzle pack")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// the puzzle is picked from the file extension (`.bingo`, `.vents`,
    /// `.crabs` or `.segments`).
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `bingo`, `vents`, `all`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the puzzle runner.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Play bingo boards against a draw sequence and score the first and
    /// last winners.
    Bingo {
        /// Path to the bingo input: a draw line, then 5x5 boards separated
        /// by blank lines.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Count overlapping points among hydrothermal vent lines.
    Vents {
        /// Path to the vent input, one `x1,y1 -> x2,y2` segment per line.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Align the crab fleet at the position with the cheapest total fuel.
    Crabs {
        /// Path to the crab input, one comma-separated line of positions.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Decode scrambled seven-segment display entries.
    Segments {
        /// Path to the display input, one `patterns | outputs` entry per line.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every recognized puzzle input under a directory.
    All {
        /// Directory to walk for `.bingo`, `.vents`, `.crabs` and
        /// `.segments` files.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Run every solver against the worked examples from the problem
    /// statements and report pass or fail.
    Check,

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug output, printing a summary of the parsed input before
    /// solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Disable the timing and memory statistics printed after each solve.
    #[arg(long, default_value_t = false)]
    pub(crate) no_stats: bool,
}

/// Dispatches a bare input path to the solver its extension names.
///
/// # Errors
///
/// If the extension is not one of `.bingo`, `.vents`, `.crabs`, `.segments`,
/// or the chosen solver fails.
pub(crate) fn solve_path(path: &Path, common: &CommonOptions) -> Result<(), String> {
    match path.extension().and_then(OsStr::to_str) {
        Some("bingo") => solve_bingo(path, common),
        Some("vents") => solve_vents(path, common),
        Some("crabs") => solve_crabs(path, common),
        Some("segments") => solve_segments(path, common),
        _ => Err(format!(
            "cannot tell which puzzle {} is; expected a .bingo, .vents, .crabs or .segments file",
            path.display()
        )),
    }
}

/// Solve a bingo input file.
///
/// # Errors
///
/// If the file cannot be read or parsed, or no board ever wins.
pub(crate) fn solve_bingo(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let input = read_input(path)?;
    println!("Solving: {}", path.display());

    let time = Instant::now();
    let (draws, boards) = bingo::solver::parse(&input).map_err(|e| error_at(path, &e))?;
    let parse_time = time.elapsed();

    if common.debug {
        println!("Draws: {}", draws.len());
        println!("Boards: {}", boards.len());
        for board in &boards {
            println!("{board}\n");
        }
    }

    let time = Instant::now();
    let first =
        bingo::solver::first_winning_score(&draws, &boards).map_err(|e| error_at(path, &e))?;
    let last =
        bingo::solver::last_winning_score(&draws, &boards).map_err(|e| error_at(path, &e))?;
    let solve_time = time.elapsed();

    println!("Part 1: first winning board score: {first}");
    println!("Part 2: last winning board score: {last}");

    if !common.no_stats {
        print_stats(parse_time, solve_time, boards.len(), "Boards");
    }
    Ok(())
}

/// Solve a vent-line input file.
///
/// # Errors
///
/// If the file cannot be read or a segment is malformed or skew.
pub(crate) fn solve_vents(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let input = read_input(path)?;
    println!("Solving: {}", path.display());

    let time = Instant::now();
    let segments = vents::solver::parse(&input).map_err(|e| error_at(path, &e))?;
    let parse_time = time.elapsed();

    if common.debug {
        let diagonals = segments
            .iter()
            .filter(|segment| segment.orientation() == Orientation::Diagonal)
            .count();
        println!("Segments: {} ({diagonals} diagonal)", segments.len());
    }

    let time = Instant::now();
    let axis_aligned = vents::solver::overlap_count(&segments, false);
    let with_diagonals = vents::solver::overlap_count(&segments, true);
    let solve_time = time.elapsed();

    println!("Part 1: points covered twice (axis-aligned only): {axis_aligned}");
    println!("Part 2: points covered twice (diagonals included): {with_diagonals}");

    if !common.no_stats {
        print_stats(parse_time, solve_time, segments.len(), "Segments");
    }
    Ok(())
}

/// Solve a crab-alignment input file.
///
/// # Errors
///
/// If the file cannot be read or parsed, or holds no positions.
pub(crate) fn solve_crabs(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let input = read_input(path)?;
    println!("Solving: {}", path.display());

    let time = Instant::now();
    let positions = crabs::solver::parse(&input).map_err(|e| error_at(path, &e))?;
    let parse_time = time.elapsed();

    if common.debug {
        if let Some((min, max)) = positions.iter().minmax().into_option() {
            println!("Crabs: {} in {min}..={max}", positions.len());
        }
    }

    let time = Instant::now();
    let linear = crabs::solver::cheapest_alignment(&positions, CostModel::Linear)
        .map_err(|e| error_at(path, &e))?;
    let triangular = crabs::solver::cheapest_alignment(&positions, CostModel::Triangular)
        .map_err(|e| error_at(path, &e))?;
    let solve_time = time.elapsed();

    println!(
        "Part 1: align at {} for {} fuel (linear cost)",
        linear.position, linear.fuel
    );
    println!(
        "Part 2: align at {} for {} fuel (triangular cost)",
        triangular.position, triangular.fuel
    );

    if !common.no_stats {
        print_stats(parse_time, solve_time, positions.len(), "Crabs");
    }
    Ok(())
}

/// Solve a seven-segment display input file.
///
/// # Errors
///
/// If the file cannot be read or an entry cannot be parsed or deduced.
pub(crate) fn solve_segments(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let input = read_input(path)?;
    println!("Solving: {}", path.display());

    let time = Instant::now();
    let entries = segments::solver::parse(&input).map_err(|e| error_at(path, &e))?;
    let parse_time = time.elapsed();

    if common.debug {
        println!("Entries: {}", entries.len());
    }

    let time = Instant::now();
    let easy = segments::solver::count_easy_digits(&entries);
    let sum = segments::solver::sum_decoded(&entries).map_err(|e| error_at(path, &e))?;
    let solve_time = time.elapsed();

    println!("Part 1: outputs showing 1, 4, 7 or 8: {easy}");
    println!("Part 2: sum of decoded outputs: {sum}");

    if !common.no_stats {
        print_stats(parse_time, solve_time, entries.len(), "Entries");
    }
    Ok(())
}

/// Solves every recognized puzzle input under a directory, in file-name
/// order. Files with other extensions are reported and skipped.
///
/// # Errors
///
/// If the path is not a directory, a solver fails, or nothing under the
/// directory is recognized.
pub(crate) fn solve_all(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!(
            "provided path is not a directory: {}",
            path.display()
        ));
    }

    let mut solved = 0usize;
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }

        match file_path.extension().and_then(OsStr::to_str) {
            Some("bingo" | "vents" | "crabs" | "segments") => {
                solve_path(file_path, common)?;
                println!();
                solved += 1;
            }
            _ => eprintln!("Skipping unrecognized file: {}", file_path.display()),
        }
    }

    if solved == 0 {
        return Err(format!("no puzzle inputs found under {}", path.display()));
    }
    println!("Solved {solved} input(s)");
    Ok(())
}

/// Runs every solver against the worked examples from the problem
/// statements. The same fixtures back the unit tests; this entry point
/// makes the gate explicit and opt-in instead of a side effect of every
/// solve.
///
/// # Errors
///
/// If any solver disagrees with its worked example.
pub(crate) fn run_check() -> Result<(), String> {
    let mut all_ok = true;

    all_ok &= check_case("bingo: first winning score", 4512, || {
        let (draws, boards) =
            bingo::solver::parse(bingo::solver::EXAMPLE).map_err(|e| e.to_string())?;
        bingo::solver::first_winning_score(&draws, &boards).map_err(|e| e.to_string())
    });
    all_ok &= check_case("bingo: last winning score", 1924, || {
        let (draws, boards) =
            bingo::solver::parse(bingo::solver::EXAMPLE).map_err(|e| e.to_string())?;
        bingo::solver::last_winning_score(&draws, &boards).map_err(|e| e.to_string())
    });

    all_ok &= check_case("vents: overlaps, axis-aligned", 5, || {
        let segments = vents::solver::parse(vents::solver::EXAMPLE).map_err(|e| e.to_string())?;
        Ok(vents::solver::overlap_count(&segments, false))
    });
    all_ok &= check_case("vents: overlaps, with diagonals", 12, || {
        let segments = vents::solver::parse(vents::solver::EXAMPLE).map_err(|e| e.to_string())?;
        Ok(vents::solver::overlap_count(&segments, true))
    });

    all_ok &= check_case("crabs: linear fuel", 37, || {
        let positions = crabs::solver::parse(crabs::solver::EXAMPLE).map_err(|e| e.to_string())?;
        let best = crabs::solver::cheapest_alignment(&positions, CostModel::Linear)
            .map_err(|e| e.to_string())?;
        Ok(best.fuel)
    });
    all_ok &= check_case("crabs: triangular fuel", 168, || {
        let positions = crabs::solver::parse(crabs::solver::EXAMPLE).map_err(|e| e.to_string())?;
        let best = crabs::solver::cheapest_alignment(&positions, CostModel::Triangular)
            .map_err(|e| e.to_string())?;
        Ok(best.fuel)
    });

    all_ok &= check_case("segments: easy digits", 26, || {
        let entries =
            segments::solver::parse(segments::solver::EXAMPLE).map_err(|e| e.to_string())?;
        Ok(segments::solver::count_easy_digits(&entries))
    });
    all_ok &= check_case("segments: decoded sum", 61229, || {
        let entries =
            segments::solver::parse(segments::solver::EXAMPLE).map_err(|e| e.to_string())?;
        segments::solver::sum_decoded(&entries).map_err(|e| e.to_string())
    });

    if all_ok {
        println!("All solvers match their worked examples");
        Ok(())
    } else {
        Err(String::from(
            "at least one solver disagrees with its worked example",
        ))
    }
}

fn check_case<T>(name: &str, expected: T, run: impl FnOnce() -> Result<T, String>) -> bool
where
    T: PartialEq + std::fmt::Display,
{
    match run() {
        Ok(answer) if answer == expected => {
            println!("ok    {name}: {answer}");
            true
        }
        Ok(answer) => {
            println!("FAIL  {name}: got {answer}, expected {expected}");
            false
        }
        Err(error) => {
            println!("FAIL  {name}: {error}");
            false
        }
    }
}

fn read_input(path: &Path) -> Result<String, String> {
    if !path.exists() {
        return Err(format!("input file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("provided path is not a file: {}", path.display()));
    }

    std::fs::read_to_string(path).map_err(|e| format!("unable to read {}: {e}", path.display()))
}

fn error_at(path: &Path, error: &impl std::fmt::Display) -> String {
    format!("{}: {error}", path.display())
}

/// Current jemalloc allocation numbers in MiB.
fn memory_mib() -> (f64, f64) {
    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    (
        allocated_bytes as f64 / (1024.0 * 1024.0),
        resident_bytes as f64 / (1024.0 * 1024.0),
    )
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints the timing and memory table for one solved input.
fn print_stats(parse_time: Duration, solve_time: Duration, records: usize, label: &str) {
    let solve_secs = solve_time.as_secs_f64();
    let (allocated_mib, resident_mib) = memory_mib();

    println!("\n=======================[ Puzzle Statistics ]=======================");
    stat_line("Parse time (s)", format!("{:.6}", parse_time.as_secs_f64()));
    stat_line("Solve time (s)", format!("{solve_secs:.6}"));
    stat_line_with_rate(label, records, solve_secs);
    stat_line("Memory usage (MiB)", format!("{allocated_mib:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident_mib:.2}"));
    println!("===================================================================");
}
