//! Pitch-class rows and the classical serial transformations
//!
//! A `Row` is never mutated: every transformation returns a new row, so the
//! prime form can be shared by all the staves derived from it.

use super::pitch::{interval_between, PitchClass, PITCH_CLASSES};
use crate::error::RowError;
use std::collections::BTreeSet;
use std::fmt;

/// An ordered sequence of pitch classes (0-11)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<i64>", into = "Vec<i64>"))]
pub struct Row {
    pitches: Vec<PitchClass>,
}

impl Row {
    /// Build a row from explicit pitch classes, validating the range
    pub fn new<I>(pitches: I) -> Result<Self, RowError>
    where
        I: IntoIterator,
        I::Item: Into<i64>,
    {
        let mut checked = Vec::new();
        for p in pitches {
            let p = p.into();
            if !(0..PITCH_CLASSES as i64).contains(&p) {
                return Err(RowError::PitchOutOfRange(p));
            }
            checked.push(p as PitchClass);
        }
        if checked.is_empty() {
            return Err(RowError::Empty);
        }
        Ok(Row { pitches: checked })
    }

    /// Wrap pitch classes already known to be in range and non-empty
    pub(crate) fn from_checked(pitches: Vec<PitchClass>) -> Self {
        debug_assert!(!pitches.is_empty());
        debug_assert!(pitches.iter().all(|&p| p < PITCH_CLASSES));
        Row { pitches }
    }

    pub fn pitches(&self) -> &[PitchClass] {
        &self.pitches
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    /// Rows are never empty; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// The opening pitch class
    pub fn first(&self) -> PitchClass {
        self.pitches[0]
    }

    /// Position of the first occurrence of a pitch class
    pub fn position(&self, pc: PitchClass) -> Option<usize> {
        self.pitches.iter().position(|&p| p == pc)
    }

    /// Mirror every pitch class around the first one
    pub fn invert(&self) -> Row {
        let first = self.first() as i16;
        let pitches = self
            .pitches
            .iter()
            .map(|&p| (first - (p as i16 - first)).rem_euclid(PITCH_CLASSES as i16) as PitchClass)
            .collect();
        Row { pitches }
    }

    /// The row backwards
    pub fn retrograde(&self) -> Row {
        Row {
            pitches: self.pitches.iter().rev().copied().collect(),
        }
    }

    /// `reverse(invert(row))`
    pub fn retrograde_inversion(&self) -> Row {
        self.invert().retrograde()
    }

    /// Cyclic left rotation by `n` positions; negative `n` rotates right
    pub fn rotate(&self, n: i64) -> Row {
        let shift = n.rem_euclid(self.len() as i64) as usize;
        let mut pitches = self.pitches.clone();
        pitches.rotate_left(shift);
        Row { pitches }
    }

    /// Shift every pitch class by `semitones`, mod 12
    pub fn transpose(&self, semitones: i64) -> Row {
        let pitches = self
            .pitches
            .iter()
            .map(|&p| (p as i64 + semitones).rem_euclid(PITCH_CLASSES as i64) as PitchClass)
            .collect();
        Row { pitches }
    }

    /// Transpose so the row begins on `target`
    pub fn transpose_to_start(&self, target: PitchClass) -> Row {
        self.transpose(interval_between(self.first(), target) as i64)
    }

    /// Keep only the first `len` pitch classes (at least one)
    pub fn truncate(&self, len: usize) -> Row {
        let len = len.clamp(1, self.len());
        Row {
            pitches: self.pitches[..len].to_vec(),
        }
    }

    /// Adjacent intervals, mod 12
    pub fn intervals(&self) -> Vec<u8> {
        self.pitches
            .windows(2)
            .map(|w| interval_between(w[0], w[1]))
            .collect()
    }

    /// Overlapping four-note segments starting every third note
    pub fn tetrachords(&self) -> Vec<Vec<PitchClass>> {
        (0..self.len())
            .step_by(3)
            .map(|i| self.pitches[i..(i + 4).min(self.len())].to_vec())
            .collect()
    }

    /// The set of distinct pitch classes in the row
    pub fn pitch_class_set(&self) -> BTreeSet<PitchClass> {
        self.pitches.iter().copied().collect()
    }
}

impl TryFrom<Vec<i64>> for Row {
    type Error = RowError;

    fn try_from(pitches: Vec<i64>) -> Result<Self, Self::Error> {
        Row::new(pitches)
    }
}

impl From<Row> for Vec<i64> {
    fn from(row: Row) -> Self {
        row.pitches.into_iter().map(i64::from).collect()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.pitches.iter().map(|p| p.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pcs: &[u8]) -> Row {
        Row::new(pcs.iter().copied()).unwrap()
    }

    fn reference_row() -> Row {
        row(&[4, 3, 7, 5, 11, 0, 9, 6, 10, 8, 1, 2])
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Row::new([0i64, 12]), Err(RowError::PitchOutOfRange(12)));
        assert_eq!(Row::new([-1i64]), Err(RowError::PitchOutOfRange(-1)));
        assert_eq!(Row::new(Vec::<i64>::new()), Err(RowError::Empty));
    }

    #[test]
    fn test_invert() {
        let r = row(&[0, 2, 4]);
        assert_eq!(r.invert(), row(&[0, 10, 8]));
        assert_eq!(r.invert().invert(), r);
    }

    #[test]
    fn test_invert_is_self_inverse_on_reference_row() {
        let r = reference_row();
        assert_eq!(r.invert().invert(), r);
        assert_eq!(r.invert().first(), r.first());
    }

    #[test]
    fn test_retrograde_inversion_is_reversed_inversion() {
        let r = reference_row();
        let mut expected = r.invert().pitches().to_vec();
        expected.reverse();
        assert_eq!(r.retrograde_inversion().pitches(), expected.as_slice());
    }

    #[test]
    fn test_rotate() {
        let r = row(&[0, 1, 2, 3]);
        assert_eq!(r.rotate(1), row(&[1, 2, 3, 0]));
        assert_eq!(r.rotate(5), row(&[1, 2, 3, 0]));
        assert_eq!(r.rotate(-1), row(&[3, 0, 1, 2]));
        assert_eq!(r.rotate(0), r);
    }

    #[test]
    fn test_rotation_composes() {
        let r = reference_row();
        let len = r.len() as i64;
        for a in -13..=13 {
            for b in -13..=13 {
                assert_eq!(r.rotate(a).rotate(b), r.rotate((a + b).rem_euclid(len)));
            }
        }
    }

    #[test]
    fn test_transpose_to_start() {
        let r = reference_row();
        for n in 0..24 {
            assert_eq!(r.rotate(n).transpose_to_start(r.first()).first(), r.first());
        }
        assert_eq!(r.rotate(3).transpose_to_start(r.first()).first(), 4);
    }

    #[test]
    fn test_transpose_preserves_intervals() {
        let r = reference_row();
        assert_eq!(r.transpose(5).intervals(), r.intervals());
    }

    #[test]
    fn test_tetrachords() {
        let r = row(&[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(
            r.tetrachords(),
            vec![vec![0, 1, 2, 3], vec![3, 4, 5, 6], vec![6, 7]]
        );
    }

    #[test]
    fn test_truncate() {
        let r = reference_row();
        assert_eq!(r.truncate(3), row(&[4, 3, 7]));
        assert_eq!(r.truncate(0).len(), 1);
        assert_eq!(r.truncate(40), r);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", row(&[0, 11, 3])), "[0, 11, 3]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates_pitches() {
        let r: Row = serde_json::from_str("[4, 3, 7]").unwrap();
        assert_eq!(r, row(&[4, 3, 7]));
        assert_eq!(serde_json::to_string(&r).unwrap(), "[4,3,7]");

        assert!(serde_json::from_str::<Row>("[]").is_err());
        assert!(serde_json::from_str::<Row>("[40]").is_err());
        assert!(serde_json::from_str::<Row>("[-1, 2]").is_err());
    }
}
