#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use itertools::Itertools;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing or validating a vent line.
#[derive(Debug, Error)]
pub enum VentError {
    /// The line did not split into exactly two endpoints on `->`.
    #[error("expected exactly one \"->\" in segment {0:?}")]
    MissingArrow(String),

    /// An endpoint did not split into exactly two coordinates on a comma.
    #[error("point {0:?} is not a comma-separated coordinate pair")]
    MalformedPoint(String),

    /// A coordinate token did not parse as a number.
    #[error("invalid coordinate {token:?}: {source}")]
    InvalidCoordinate {
        /// The offending token, trimmed.
        token: String,
        /// The underlying parse failure.
        source: ParseIntError,
    },

    /// A coordinate was negative.
    #[error("coordinate {0} is negative; the vent field starts at 0,0")]
    NegativeCoordinate(i32),

    /// The endpoints differ along both axes by unequal amounts.
    #[error("segment {from} -> {to} is neither axis-aligned nor at 45 degrees")]
    SkewSegment {
        /// The segment's first endpoint.
        from: Point,
        /// The segment's second endpoint.
        to: Point,
    },
}

/// A lattice point on the vent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The point `(x, y)`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = VentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .trim()
            .split(',')
            .collect_tuple()
            .ok_or_else(|| VentError::MalformedPoint(s.trim().to_string()))?;

        Ok(Self::new(parse_coordinate(x)?, parse_coordinate(y)?))
    }
}

fn parse_coordinate(token: &str) -> Result<i32, VentError> {
    let value: i32 = token
        .trim()
        .parse()
        .map_err(|source| VentError::InvalidCoordinate {
            token: token.trim().to_string(),
            source,
        })?;

    if value < 0 {
        return Err(VentError::NegativeCoordinate(value));
    }
    Ok(value)
}

/// Which axes a segment varies along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `y` fixed, `x` varies.
    Horizontal,
    /// `x` fixed, `y` varies.
    Vertical,
    /// Both axes vary by one per step.
    Diagonal,
}

/// A vent line between two lattice points, inclusive of both endpoints.
///
/// Only horizontal, vertical and exactly-45-degree segments exist; the
/// constructor rejects anything skew, so every instance can be rasterized
/// with unit steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    /// # Errors
    ///
    /// [`VentError::SkewSegment`] when the endpoints differ along both axes
    /// by unequal amounts.
    pub const fn new(start: Point, end: Point) -> Result<Self, VentError> {
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();

        if dx != 0 && dy != 0 && dx != dy {
            return Err(VentError::SkewSegment {
                from: start,
                to: end,
            });
        }
        Ok(Self { start, end })
    }

    /// The endpoint rasterization starts from.
    #[must_use]
    pub const fn start(&self) -> Point {
        self.start
    }

    /// The endpoint rasterization ends on, inclusive.
    #[must_use]
    pub const fn end(&self) -> Point {
        self.end
    }

    /// Vertical when x is fixed, horizontal when y is fixed, diagonal
    /// otherwise. A single-point segment counts as vertical.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        if self.start.x == self.end.x {
            Orientation::Vertical
        } else if self.start.y == self.end.y {
            Orientation::Horizontal
        } else {
            Orientation::Diagonal
        }
    }

    /// Iterates the covered lattice points in order from start to end,
    /// moving one cell at a time along each varying axis.
    #[must_use]
    pub fn rasterize(&self) -> Rasterize {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;

        Rasterize {
            next: self.start,
            step: (dx.signum(), dy.signum()),
            remaining: dx.unsigned_abs().max(dy.unsigned_abs()) + 1,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

impl FromStr for Segment {
    type Err = VentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split("->")
            .collect_tuple()
            .ok_or_else(|| VentError::MissingArrow(s.trim().to_string()))?;

        Self::new(from.parse()?, to.parse()?)
    }
}

/// Iterator over the lattice points of a segment. See [`Segment::rasterize`].
#[derive(Debug, Clone)]
pub struct Rasterize {
    next: Point,
    step: (i32, i32),
    remaining: u32,
}

impl Iterator for Rasterize {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }

        let point = self.next;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next = Point::new(point.x + self.step.0, point.y + self.step.1);
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rasterize {}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(input: &str) -> Vec<Point> {
        input.parse::<Segment>().unwrap().rasterize().collect()
    }

    #[test]
    fn test_parse_round_trips_display() {
        let segment: Segment = "0,9 -> 5,9".parse().unwrap();
        assert_eq!(segment.to_string(), "0,9 -> 5,9");
        assert_eq!(segment.start(), Point::new(0, 9));
        assert_eq!(segment.end(), Point::new(5, 9));
    }

    #[test]
    fn test_parse_accepts_unpadded_arrow() {
        let segment: Segment = "1,1->1,3".parse().unwrap();
        assert_eq!(segment.orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_rasterize_horizontal() {
        assert_eq!(
            points("9,7 -> 7,7"),
            vec![Point::new(9, 7), Point::new(8, 7), Point::new(7, 7)]
        );
    }

    #[test]
    fn test_rasterize_vertical() {
        assert_eq!(
            points("1,1 -> 1,3"),
            vec![Point::new(1, 1), Point::new(1, 2), Point::new(1, 3)]
        );
    }

    #[test]
    fn test_rasterize_all_four_diagonals() {
        assert_eq!(
            points("1,1 -> 3,3"),
            vec![Point::new(1, 1), Point::new(2, 2), Point::new(3, 3)]
        );
        assert_eq!(
            points("9,7 -> 7,9"),
            vec![Point::new(9, 7), Point::new(8, 8), Point::new(7, 9)]
        );
        assert_eq!(
            points("3,3 -> 1,1"),
            vec![Point::new(3, 3), Point::new(2, 2), Point::new(1, 1)]
        );
        assert_eq!(
            points("7,9 -> 9,7"),
            vec![Point::new(7, 9), Point::new(8, 8), Point::new(9, 7)]
        );
    }

    #[test]
    fn test_rasterize_single_point() {
        let segment: Segment = "4,4 -> 4,4".parse().unwrap();
        assert_eq!(segment.orientation(), Orientation::Vertical);
        assert_eq!(segment.rasterize().len(), 1);
        assert_eq!(points("4,4 -> 4,4"), vec![Point::new(4, 4)]);
    }

    #[test]
    fn test_orientation_split() {
        let horizontal: Segment = "0,9 -> 5,9".parse().unwrap();
        let diagonal: Segment = "8,0 -> 0,8".parse().unwrap();
        assert_eq!(horizontal.orientation(), Orientation::Horizontal);
        assert_eq!(diagonal.orientation(), Orientation::Diagonal);
    }

    #[test]
    fn test_rejects_skew_segment() {
        let err = "0,0 -> 2,5".parse::<Segment>().unwrap_err();
        assert!(matches!(err, VentError::SkewSegment { .. }));
        assert_eq!(
            err.to_string(),
            "segment 0,0 -> 2,5 is neither axis-aligned nor at 45 degrees"
        );
    }

    #[test]
    fn test_rejects_negative_coordinate() {
        assert!(matches!(
            "-1,0 -> 3,0".parse::<Segment>(),
            Err(VentError::NegativeCoordinate(-1))
        ));
    }

    #[test]
    fn test_rejects_chained_segments() {
        // More than one arrow is refused too, and the message says so.
        let err = "1,1 -> 2,2 -> 3,3".parse::<Segment>().unwrap_err();
        assert!(matches!(err, VentError::MissingArrow(_)));
        assert_eq!(
            err.to_string(),
            "expected exactly one \"->\" in segment \"1,1 -> 2,2 -> 3,3\""
        );
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(
            "1,2 - 3,4".parse::<Segment>(),
            Err(VentError::MissingArrow(_))
        ));
        assert!(matches!(
            "1 -> 3,4".parse::<Segment>(),
            Err(VentError::MalformedPoint(_))
        ));
        assert!(matches!(
            "a,2 -> 3,4".parse::<Segment>(),
            Err(VentError::InvalidCoordinate { .. })
        ));
    }
}
