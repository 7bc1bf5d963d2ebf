use itertools::Itertools;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised while parsing crab positions or aligning an empty fleet.
#[derive(Debug, Error)]
pub enum CrabError {
    /// The input held no positions.
    #[error("the position list is empty")]
    Empty,

    /// A token did not parse as an unsigned number.
    #[error("invalid position {token:?}: {source}")]
    InvalidPosition {
        /// The offending token, trimmed.
        token: String,
        /// The underlying parse failure.
        source: ParseIntError,
    },
}

/// How much fuel a crab burns to cover a distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostModel {
    /// One unit of fuel per step.
    Linear,
    /// Each step costs one more than the one before, `d * (d + 1) / 2` in
    /// total for a move of `d` steps.
    Triangular,
}

impl CostModel {
    /// Total fuel burned moving `distance` steps.
    #[must_use]
    pub const fn fuel(self, distance: u64) -> u64 {
        match self {
            Self::Linear => distance,
            Self::Triangular => distance * (distance + 1) / 2,
        }
    }
}

/// A target position and the total fuel for every crab to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    /// The position the fleet gathers on.
    pub position: u32,
    /// Total fuel for every crab to reach it.
    pub fuel: u64,
}

/// Parses a comma-separated list of horizontal positions.
///
/// # Errors
///
/// [`CrabError::Empty`] for blank input, [`CrabError::InvalidPosition`] for
/// anything that is not an unsigned number.
pub fn parse(input: &str) -> Result<Vec<u32>, CrabError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CrabError::Empty);
    }

    input
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse()
                .map_err(|source| CrabError::InvalidPosition {
                    token: token.trim().to_string(),
                    source,
                })
        })
        .collect()
}

/// Total fuel for the whole fleet to move to `target` under `model`.
#[must_use]
pub fn total_fuel(positions: &[u32], target: u32, model: CostModel) -> u64 {
    positions
        .iter()
        .map(|&position| model.fuel(u64::from(position.abs_diff(target))))
        .sum()
}

/// Tries every target between the leftmost and rightmost crab and returns
/// the cheapest alignment. Both cost models are convex in the target, so
/// the bounded scan always contains the optimum. Ties resolve to the
/// lowest position.
///
/// # Errors
///
/// [`CrabError::Empty`] when there are no positions to align.
pub fn cheapest_alignment(positions: &[u32], model: CostModel) -> Result<Alignment, CrabError> {
    let (min, max) = positions
        .iter()
        .copied()
        .minmax()
        .into_option()
        .ok_or(CrabError::Empty)?;

    let mut best = Alignment {
        position: min,
        fuel: total_fuel(positions, min, model),
    };
    for target in (min..=max).skip(1) {
        let fuel = total_fuel(positions, target, model);
        if fuel < best.fuel {
            best = Alignment {
                position: target,
                fuel,
            };
        }
    }
    Ok(best)
}

/// Worked example: aligning at 2 costs 37 linear fuel, at 5 costs 168
/// triangular fuel.
pub const EXAMPLE: &str = "16,1,2,0,4,2,7,1,2,14";
