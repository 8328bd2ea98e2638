//! Rotation analysis
//!
//! Compares every rotation staff's row with rotation 0: how many pitch
//! classes they share, how alike their cyclic interval sets are and how many
//! adjacent intervals line up position by position.

use crate::score::rotation_rows;
use crate::types::pitch::interval_between;
use crate::types::Row;
use std::collections::BTreeSet;
use std::fmt;

/// Intervals between neighbours of `row`, wrapping from the last pitch
/// back to the first
pub fn interval_set(row: &Row) -> BTreeSet<u8> {
    let pitches = row.pitches();
    let n = pitches.len();
    (0..n)
        .map(|i| interval_between(pitches[i], pitches[(i + 1) % n]))
        .collect()
}

/// Jaccard index of two interval sets (0 when both are empty)
pub fn jaccard(a: &BTreeSet<u8>, b: &BTreeSet<u8>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Fraction of positions where two interval sequences agree, over the
/// longer of the two
pub fn interval_vector_similarity(a: &[u8], b: &[u8]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 0.0;
    }
    let matches = a.iter().zip(b).filter(|(x, y)| x == y).count();
    matches as f64 / longest as f64
}

/// One rotation measured against rotation 0
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationComparison {
    pub rotation: usize,
    pub pitch_class_overlap: usize,
    pub interval_similarity: f64,
    pub interval_vector_match: f64,
}

impl fmt::Display for RotationComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rotation 0 vs Rotation {} - Pitch Overlap: {}, Interval Set Similarity: {:.2}, Interval Vector Match: {:.2}",
            self.rotation,
            self.pitch_class_overlap,
            self.interval_similarity,
            self.interval_vector_match
        )
    }
}

/// Compare each rotation staff row (rotation 1 onwards) with rotation 0
pub fn analyze_rotations(row: &Row) -> Vec<RotationComparison> {
    let rows = rotation_rows(row);
    let Some((prime, rest)) = rows.split_first() else {
        return Vec::new();
    };
    let prime_pcs = prime.pitch_class_set();
    let prime_intervals = interval_set(prime);
    let prime_vector = prime.intervals();

    rest.iter()
        .enumerate()
        .map(|(i, rotated)| RotationComparison {
            rotation: i + 1,
            pitch_class_overlap: prime_pcs.intersection(&rotated.pitch_class_set()).count(),
            interval_similarity: jaccard(&prime_intervals, &interval_set(rotated)),
            interval_vector_match: interval_vector_similarity(&prime_vector, &rotated.intervals()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_set_wraps() {
        let row = Row::new([0u8, 4, 7]).unwrap();
        let expected: BTreeSet<u8> = [3, 4, 5].into_iter().collect();
        assert_eq!(interval_set(&row), expected);
    }

    #[test]
    fn test_jaccard() {
        let a: BTreeSet<u8> = [1, 2, 3].into_iter().collect();
        let b: BTreeSet<u8> = [2, 3, 4].into_iter().collect();
        assert!((jaccard(&a, &b) - 0.5).abs() < 1e-9);
        assert_eq!(jaccard(&BTreeSet::new(), &BTreeSet::new()), 0.0);
    }

    #[test]
    fn test_rotations_of_a_transposed_row_keep_their_intervals() {
        // Every rotation has the same cyclic intervals, only transposed
        let row = Row::new([4u8, 3, 7, 5, 11, 0, 9, 6, 10, 8, 1, 2]).unwrap();
        let report = analyze_rotations(&row);
        assert_eq!(report.len(), 11);
        assert_eq!(report[0].rotation, 1);
        for cmp in &report {
            assert!((cmp.interval_similarity - 1.0).abs() < 1e-9);
            // A twelve-tone row stays twelve-tone under transposition
            assert_eq!(cmp.pitch_class_overlap, 12);
        }
    }

    #[test]
    fn test_interval_vector_match_is_positional() {
        // Compared position by position, not as sets
        let row = Row::new([0u8, 1, 3, 6]).unwrap();
        let report = analyze_rotations(&row);
        assert_eq!(report.len(), 3);
        for cmp in &report {
            assert!(cmp.interval_vector_match >= 0.0 && cmp.interval_vector_match <= 1.0);
        }
        let rows = rotation_rows(&row);
        let expected = interval_vector_similarity(&rows[0].intervals(), &rows[1].intervals());
        assert!((report[0].interval_vector_match - expected).abs() < 1e-9);
    }

    #[test]
    fn test_single_note_row_has_nothing_to_compare() {
        let row = Row::new([5u8]).unwrap();
        assert!(analyze_rotations(&row).is_empty());
    }

    #[test]
    fn test_interval_vector_similarity() {
        assert!((interval_vector_similarity(&[1, 2, 3], &[1, 5, 3, 4]) - 0.5).abs() < 1e-9);
        assert_eq!(interval_vector_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_display() {
        let cmp = RotationComparison {
            rotation: 3,
            pitch_class_overlap: 7,
            interval_similarity: 0.5,
            interval_vector_match: 0.25,
        };
        assert_eq!(
            cmp.to_string(),
            "Rotation 0 vs Rotation 3 - Pitch Overlap: 7, Interval Set Similarity: 0.50, \
             Interval Vector Match: 0.25"
        );
    }
}
