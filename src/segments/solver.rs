use crate::segments::wires::{Wire, WireError, WireSet};
use itertools::Itertools;
use smallvec::SmallVec;
use std::str::FromStr;
use thiserror::Error;

/// Canonical segment set for each digit, indexed by the digit itself.
const DIGIT_SEGMENTS: [WireSet; 10] = [
    WireSet::from_letters(b"abcefg"),
    WireSet::from_letters(b"cf"),
    WireSet::from_letters(b"acdeg"),
    WireSet::from_letters(b"acdfg"),
    WireSet::from_letters(b"bcdf"),
    WireSet::from_letters(b"abdfg"),
    WireSet::from_letters(b"abdefg"),
    WireSet::from_letters(b"acf"),
    WireSet::from_letters(b"abcdefg"),
    WireSet::from_letters(b"abcdfg"),
];

/// The digit whose canonical segment set is `segments`, if any.
fn digit_for(segments: WireSet) -> Option<u8> {
    (0u8..10).find(|&digit| DIGIT_SEGMENTS[usize::from(digit)] == segments)
}

/// Errors raised while parsing an entry or deducing its wiring.
#[derive(Debug, Error)]
pub enum SegmentsError {
    /// The line did not split into exactly two halves on `|`.
    #[error("expected exactly one \"|\" between patterns and outputs in {0:?}")]
    MissingDelimiter(String),

    /// Not exactly ten patterns before the delimiter.
    #[error("expected 10 signal patterns before the delimiter, found {0}")]
    WrongPatternCount(usize),

    /// Not exactly four patterns after the delimiter.
    #[error("expected 4 output patterns after the delimiter, found {0}")]
    WrongOutputCount(usize),

    /// A pattern token was not a valid wire set.
    #[error("bad signal pattern {pattern:?}: {source}")]
    BadPattern {
        /// The offending token.
        pattern: String,
        /// The underlying wire-set failure.
        source: WireError,
    },

    /// The ten patterns did not bucket by size as the digits demand.
    #[error("expected exactly {expected} pattern(s) of length {len}, found {found}")]
    WrongLengthGroup {
        /// The pattern length whose bucket is malformed.
        len: u32,
        /// How many patterns of that length a real entry has.
        expected: usize,
        /// How many this entry has.
        found: usize,
    },

    /// A deduction step did not narrow to exactly one wire.
    #[error("deducing segment {segment} left {found} candidate wires instead of one")]
    AmbiguousSegment {
        /// The canonical segment being resolved.
        segment: char,
        /// How many candidate wires the filter left.
        found: u32,
    },

    /// A translated output matched no canonical digit.
    #[error("output {output} maps to {mapped}, which is no digit's segment set")]
    UnknownDigit {
        /// The output pattern as observed.
        output: WireSet,
        /// The same pattern after translation.
        mapped: WireSet,
    },
}

/// One display entry: the ten observed signal patterns and the four output
/// patterns to decode. Within an entry every pattern went through the same
/// unknown wire permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The ten unique signal patterns, one per digit.
    pub patterns: [WireSet; 10],
    /// The four output patterns, most significant first.
    pub outputs: [WireSet; 4],
}

impl Entry {
    /// Deduces this entry's wiring and reads its four outputs as one
    /// base-10 number.
    ///
    /// # Errors
    ///
    /// Anything [`deduce_mapping`] raises, plus [`SegmentsError::UnknownDigit`]
    /// when a translated output matches no canonical digit.
    pub fn decode(&self) -> Result<u32, SegmentsError> {
        let mapping = deduce_mapping(&self.patterns)?;

        let mut value = 0;
        for &output in &self.outputs {
            let mapped = mapping.translate(output);
            let digit = digit_for(mapped)
                .ok_or(SegmentsError::UnknownDigit { output, mapped })?;
            value = value * 10 + u32::from(digit);
        }
        Ok(value)
    }
}

impl FromStr for Entry {
    type Err = SegmentsError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (patterns, outputs) = line
            .split('|')
            .collect_tuple()
            .ok_or_else(|| SegmentsError::MissingDelimiter(line.trim().to_string()))?;

        let patterns = parse_sets(patterns)?;
        let outputs = parse_sets(outputs)?;

        Ok(Self {
            patterns: to_array(patterns, SegmentsError::WrongPatternCount)?,
            outputs: to_array(outputs, SegmentsError::WrongOutputCount)?,
        })
    }
}

fn parse_sets(tokens: &str) -> Result<Vec<WireSet>, SegmentsError> {
    tokens
        .split_whitespace()
        .map(|token| {
            token.parse().map_err(|source| SegmentsError::BadPattern {
                pattern: token.to_string(),
                source,
            })
        })
        .collect()
}

fn to_array<const N: usize>(
    sets: Vec<WireSet>,
    error: fn(usize) -> SegmentsError,
) -> Result<[WireSet; N], SegmentsError> {
    let found = sets.len();
    sets.try_into().map_err(|_| error(found))
}

/// The ten patterns of one entry bucketed by set size.
///
/// Building the groups enforces the digit-frequency invariant: one pattern
/// each for digits 1, 7, 4 and 8, and three each for the five- and
/// six-segment digits.
#[derive(Debug)]
struct LengthGroups {
    one: WireSet,
    seven: WireSet,
    five_segment: [WireSet; 3],
    six_segment: [WireSet; 3],
}

impl LengthGroups {
    fn build(patterns: &[WireSet; 10]) -> Result<Self, SegmentsError> {
        let mut buckets: [SmallVec<[WireSet; 3]>; 8] = std::array::from_fn(|_| SmallVec::new());
        for &pattern in patterns {
            buckets[pattern.len() as usize].push(pattern);
        }

        let groups = Self {
            one: take_unique(&buckets, 2)?,
            seven: take_unique(&buckets, 3)?,
            five_segment: take_triple(&buckets, 5)?,
            six_segment: take_triple(&buckets, 6)?,
        };
        // Digits 4 and 8 play no part in the deduction but their patterns
        // must still be present, exactly once each.
        take_unique(&buckets, 4)?;
        take_unique(&buckets, 7)?;

        Ok(groups)
    }
}

fn take_unique(buckets: &[SmallVec<[WireSet; 3]>; 8], len: u32) -> Result<WireSet, SegmentsError> {
    match buckets[len as usize].as_slice() {
        [only] => Ok(*only),
        group => Err(SegmentsError::WrongLengthGroup {
            len,
            expected: 1,
            found: group.len(),
        }),
    }
}

fn take_triple(
    buckets: &[SmallVec<[WireSet; 3]>; 8],
    len: u32,
) -> Result<[WireSet; 3], SegmentsError> {
    let group = buckets[len as usize].as_slice();
    group.try_into().map_err(|_| SegmentsError::WrongLengthGroup {
        len,
        expected: 3,
        found: group.len(),
    })
}

/// A resolved wire permutation for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireMapping {
    to_segment: [Wire; 7],
}

impl WireMapping {
    /// The canonical segment an observed wire drives.
    #[must_use]
    pub const fn segment_for(&self, wire: Wire) -> Wire {
        self.to_segment[wire.index()]
    }

    /// Translates an observed pattern into canonical segment space.
    #[must_use]
    pub fn translate(&self, observed: WireSet) -> WireSet {
        observed
            .iter()
            .fold(WireSet::EMPTY, |set, wire| set.with(self.segment_for(wire)))
    }
}

/// Wires still unassigned and the partial permutation built so far.
struct Deduction {
    remaining: WireSet,
    to_segment: [Wire; 7],
}

impl Deduction {
    fn new() -> Self {
        Self {
            remaining: WireSet::ALL,
            to_segment: [Wire::A; 7],
        }
    }

    /// Commits `segment` to the sole candidate wire, refusing the entry
    /// when the filter left zero or several.
    fn resolve(&mut self, segment: Wire, candidates: WireSet) -> Result<(), SegmentsError> {
        let wire = candidates
            .only()
            .ok_or_else(|| SegmentsError::AmbiguousSegment {
                segment: segment.letter(),
                found: candidates.len(),
            })?;

        self.remaining = self.remaining.without(wire);
        self.to_segment[wire.index()] = segment;
        Ok(())
    }

    /// Unassigned wires appearing in exactly `count` of the group's three
    /// patterns.
    fn candidates(&self, group: &[WireSet; 3], count: usize) -> WireSet {
        self.remaining
            .iter()
            .filter(|&wire| membership(group, wire) == count)
            .fold(WireSet::EMPTY, WireSet::with)
    }
}

fn membership(group: &[WireSet; 3], wire: Wire) -> usize {
    group.iter().filter(|pattern| pattern.contains(wire)).count()
}

/// Derives the wire-to-segment bijection for one entry's ten patterns.
///
/// Segments resolve in the order `a`, `d`, `c`, `f`, `g`, `b`, `e`; every
/// step narrows the still-unassigned wires with a membership filter over
/// the length groups. Each filter must leave exactly one candidate. A wire
/// permutation of a real display always does, so anything else means the
/// patterns are inconsistent and the entry is refused instead of being
/// decoded into a plausible-looking wrong answer.
///
/// # Errors
///
/// [`SegmentsError::WrongLengthGroup`] when the patterns do not bucket
/// one/one/one/one/three/three by size, [`SegmentsError::AmbiguousSegment`]
/// when a deduction step finds zero or several candidates.
pub fn deduce_mapping(patterns: &[WireSet; 10]) -> Result<WireMapping, SegmentsError> {
    let groups = LengthGroups::build(patterns)?;
    let five = &groups.five_segment;
    let six = &groups.six_segment;

    let mut deduction = Deduction::new();

    // Segment a is in the digit-7 pattern but not the digit-1 pattern.
    deduction.resolve(
        Wire::A,
        deduction
            .remaining
            .intersection(groups.seven.difference(groups.one)),
    )?;
    // d is in every five-segment digit and two of the six-segment digits.
    deduction.resolve(
        Wire::D,
        deduction.candidates(five, 3).intersection(deduction.candidates(six, 2)),
    )?;
    // c is in two of each.
    deduction.resolve(
        Wire::C,
        deduction.candidates(five, 2).intersection(deduction.candidates(six, 2)),
    )?;
    // f is the digit-1 wire that is not c.
    deduction.resolve(Wire::F, deduction.remaining.intersection(groups.one))?;
    // g is in every five- and every six-segment digit.
    deduction.resolve(
        Wire::G,
        deduction.candidates(five, 3).intersection(deduction.candidates(six, 3)),
    )?;
    // b is in one five-segment digit and every six-segment digit.
    deduction.resolve(
        Wire::B,
        deduction.candidates(five, 1).intersection(deduction.candidates(six, 3)),
    )?;
    // e is whatever is left.
    deduction.resolve(Wire::E, deduction.remaining)?;

    Ok(WireMapping {
        to_segment: deduction.to_segment,
    })
}

/// Parses one entry per line, skipping blank lines.
///
/// # Errors
///
/// Fails on the first malformed entry.
pub fn parse(input: &str) -> Result<Vec<Entry>, SegmentsError> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Counts outputs whose size alone pins them to digit 1, 4, 7 or 8. No
/// deduction involved, which is what makes those digits "easy".
#[must_use]
pub fn count_easy_digits(entries: &[Entry]) -> usize {
    entries
        .iter()
        .flat_map(|entry| entry.outputs.iter())
        .filter(|output| matches!(output.len(), 2 | 3 | 4 | 7))
        .count()
}

/// Decodes every entry and sums the four-digit values.
///
/// # Errors
///
/// Fails on the first entry that cannot be deduced or decoded.
pub fn sum_decoded(entries: &[Entry]) -> Result<u64, SegmentsError> {
    entries
        .iter()
        .map(|entry| entry.decode().map(u64::from))
        .sum()
}

/// Worked example: 26 easy digits in the outputs, decoded sum 61229.
pub const EXAMPLE: &str = "\
be cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | fdgacbe cefdb cefbgd gcbe
edbfga begcd cbg gc gcadebf fbgde acbgfd abcde gfcbed gfec | fcgedb cgb dgebacf gc
fgaebd cg bdaec gdafb agbcfd gdcbef bgcad gfac gcb cdgabef | cg cg fdcagb cbg
fbegcd cbd adcefb dageb afcb bc aefdc ecdab fgdeca fcdbega | efabcd cedba gadfec cb
aecbfdg fbg gf bafeg dbefa fcge gcbea fcaegb dgceab fcbdga | gecf egdcabf bgf bfgea
fgeab ca afcebg bdacfeg cfaedg gcfdb baec bfadeg bafgc acf | gebdcfa ecba ca fadegcb
dbcfg fgd bdegcaf fgec aegbdf ecdfab fbedc dacgb gdcebf gf | cefg dcbef fcge gbcadfe
bdfegc cbegaf gecbf dfcage bdacg ed bedf ced adcbefg gebcd | ed bcgafe cdgba cbgef
egadfb cdbfeg cegd fecab cgb gbdefca cg fgcdab egfdb bfceg | gbdfcae bgc cg cgb
gcafb gcf dcaebfg ecagb gf abcdeg gaef cafbge fdbac fegbdc | fgae cfgab fg bagce
";

#[cfg(test)]
mod tests {
    use super::*;

    // The worked single entry from the problem statement; its outputs read
    // 5353 under the deduced wiring.
    const WORKED_ENTRY: &str =
        "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf";

    fn identity_patterns() -> [WireSet; 10] {
        DIGIT_SEGMENTS
    }

    #[test]
    fn test_parse_example() {
        let entries = parse(EXAMPLE).unwrap();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].outputs[3], "gcbe".parse().unwrap());
    }

    #[test]
    fn test_easy_digit_count_example() {
        let entries = parse(EXAMPLE).unwrap();
        assert_eq!(count_easy_digits(&entries), 26);
    }

    #[test]
    fn test_decoded_sum_example() {
        let entries = parse(EXAMPLE).unwrap();
        assert_eq!(sum_decoded(&entries).unwrap(), 61229);
    }

    #[test]
    fn test_worked_entry_decodes() {
        let entry: Entry = WORKED_ENTRY.parse().unwrap();
        assert_eq!(entry.decode().unwrap(), 5353);
    }

    #[test]
    fn test_worked_entry_mapping() {
        let entry: Entry = WORKED_ENTRY.parse().unwrap();
        let mapping = deduce_mapping(&entry.patterns).unwrap();

        let expected = [
            (Wire::D, Wire::A),
            (Wire::E, Wire::B),
            (Wire::A, Wire::C),
            (Wire::F, Wire::D),
            (Wire::G, Wire::E),
            (Wire::B, Wire::F),
            (Wire::C, Wire::G),
        ];
        for (observed, segment) in expected {
            assert_eq!(mapping.segment_for(observed), segment);
        }
    }

    #[test]
    fn test_identity_wiring_deduces_to_identity() {
        let mapping = deduce_mapping(&identity_patterns()).unwrap();
        for wire in Wire::ALL {
            assert_eq!(mapping.segment_for(wire), wire);
        }
    }

    #[test]
    fn test_mapping_is_a_bijection() {
        for entry in parse(EXAMPLE).unwrap() {
            let mapping = deduce_mapping(&entry.patterns).unwrap();
            let image = Wire::ALL
                .into_iter()
                .fold(WireSet::EMPTY, |set, wire| set.with(mapping.segment_for(wire)));
            assert_eq!(image, WireSet::ALL);
        }
    }

    #[test]
    fn test_patterns_translate_to_all_ten_digits() {
        for entry in parse(EXAMPLE).unwrap() {
            let mapping = deduce_mapping(&entry.patterns).unwrap();
            let digits: Vec<u8> = entry
                .patterns
                .iter()
                .map(|&pattern| digit_for(mapping.translate(pattern)).unwrap())
                .sorted()
                .collect();
            assert_eq!(digits, (0..10).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn test_rejects_wrong_length_groups() {
        // Digit 7's pattern replaced with a second two-wire pattern.
        let mut patterns = identity_patterns();
        patterns[7] = "ab".parse().unwrap();

        let err = deduce_mapping(&patterns).unwrap_err();
        assert!(matches!(
            err,
            SegmentsError::WrongLengthGroup {
                len: 2,
                expected: 1,
                found: 2
            }
        ));
        assert_eq!(
            err.to_string(),
            "expected exactly 1 pattern(s) of length 2, found 2"
        );
    }

    #[test]
    fn test_rejects_ambiguous_deduction() {
        // A three-wire pattern disjoint from digit 1's wires leaves three
        // candidates for segment a.
        let mut patterns = identity_patterns();
        patterns[7] = "abd".parse().unwrap();

        let err = deduce_mapping(&patterns).unwrap_err();
        assert!(matches!(
            err,
            SegmentsError::AmbiguousSegment {
                segment: 'a',
                found: 3
            }
        ));
    }

    #[test]
    fn test_rejects_unknown_output_digit() {
        let entry = Entry {
            patterns: identity_patterns(),
            outputs: [
                "ab".parse().unwrap(),
                "cf".parse().unwrap(),
                "cf".parse().unwrap(),
                "cf".parse().unwrap(),
            ],
        };
        assert!(matches!(
            entry.decode(),
            Err(SegmentsError::UnknownDigit { .. })
        ));
    }

    #[test]
    fn test_rejects_second_delimiter() {
        // Two delimiters are refused too, and the message says so.
        let err = "ab cd | ef ga | bc de".parse::<Entry>().unwrap_err();
        assert!(matches!(err, SegmentsError::MissingDelimiter(_)));
        assert_eq!(
            err.to_string(),
            "expected exactly one \"|\" between patterns and outputs in \"ab cd | ef ga | bc de\""
        );
    }

    #[test]
    fn test_parse_rejects_malformed_entries() {
        assert!(matches!(
            "ab cd ef".parse::<Entry>(),
            Err(SegmentsError::MissingDelimiter(_))
        ));
        assert!(matches!(
            "ab cd | ef ga bc de".parse::<Entry>(),
            Err(SegmentsError::WrongPatternCount(2))
        ));
        assert!(matches!(
            "be cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | cefdb cefbgd gcbe"
                .parse::<Entry>(),
            Err(SegmentsError::WrongOutputCount(3))
        ));
        assert!(matches!(
            "zz cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | a b c d"
                .parse::<Entry>(),
            Err(SegmentsError::BadPattern { .. })
        ));
    }
}
