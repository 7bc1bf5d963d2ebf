use crate::vents::segment::{Orientation, Point, Segment, VentError};
use rustc_hash::FxHashMap;

/// Parses one segment per line, skipping blank lines.
///
/// # Errors
///
/// Fails on the first malformed or skew segment.
pub fn parse(input: &str) -> Result<Vec<Segment>, VentError> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Builds the coverage map: how many segments pass through each point.
#[must_use]
pub fn coverage(segments: &[Segment], include_diagonals: bool) -> FxHashMap<Point, u32> {
    let mut counts = FxHashMap::default();

    for segment in segments {
        if !include_diagonals && segment.orientation() == Orientation::Diagonal {
            continue;
        }
        for point in segment.rasterize() {
            *counts.entry(point).or_insert(0) += 1;
        }
    }
    counts
}

/// Counts lattice points covered by at least two segments. With
/// `include_diagonals` unset, diagonal segments are left out of the map
/// entirely rather than merely ignored at the counting step.
#[must_use]
pub fn overlap_count(segments: &[Segment], include_diagonals: bool) -> usize {
    coverage(segments, include_diagonals)
        .values()
        .filter(|&&count| count >= 2)
        .count()
}

/// Worked example: 5 overlapping points on the axis-aligned map, 12 once
/// the diagonals are drawn in.
pub const EXAMPLE: &str = "\
0,9 -> 5,9
8,0 -> 0,8
9,4 -> 3,4
2,2 -> 2,1
7,0 -> 7,4
6,4 -> 2,0
0,9 -> 2,9
3,4 -> 1,4
0,0 -> 8,8
5,5 -> 8,2
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_example() {
        let segments = parse(EXAMPLE).unwrap();
        assert_eq!(segments.len(), 10);
        assert_eq!(
            segments
                .iter()
                .filter(|s| s.orientation() == Orientation::Diagonal)
                .count(),
            4
        );
    }

    #[test]
    fn test_overlaps_without_diagonals() {
        let segments = parse(EXAMPLE).unwrap();
        assert_eq!(overlap_count(&segments, false), 5);
    }

    #[test]
    fn test_overlaps_with_diagonals() {
        let segments = parse(EXAMPLE).unwrap();
        assert_eq!(overlap_count(&segments, true), 12);
    }

    #[test]
    fn test_coverage_counts_multiplicity() {
        let segments = parse("0,9 -> 5,9\n0,9 -> 2,9\n1,9 -> 1,9\n").unwrap();
        let counts = coverage(&segments, false);
        assert_eq!(counts.get(&Point::new(1, 9)), Some(&3));
        assert_eq!(counts.get(&Point::new(5, 9)), Some(&1));
        assert_eq!(counts.get(&Point::new(6, 9)), None);
    }

    #[test]
    fn test_diagonals_absent_from_axis_aligned_map() {
        let segments = parse("1,1 -> 3,3\n").unwrap();
        assert!(coverage(&segments, false).is_empty());
        assert_eq!(coverage(&segments, true).len(), 3);
    }

    #[test]
    fn test_crossing_diagonals_overlap_once() {
        let segments = parse("0,0 -> 2,2\n2,0 -> 0,2\n").unwrap();
        assert_eq!(overlap_count(&segments, true), 1);
        assert_eq!(coverage(&segments, true).get(&Point::new(1, 1)), Some(&2));
    }

    #[test]
    fn test_adding_segments_never_lowers_the_count() {
        let segments = parse(EXAMPLE).unwrap();
        let mut previous = 0;
        for upto in 0..=segments.len() {
            let count = overlap_count(&segments[..upto], true);
            assert!(count >= previous);
            previous = count;
        }
    }

    #[test]
    fn test_empty_input_has_no_overlaps() {
        assert_eq!(overlap_count(&[], true), 0);
        assert!(parse("\n \n").unwrap().is_empty());
    }
}
