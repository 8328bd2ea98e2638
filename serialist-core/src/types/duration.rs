//! Rational note lengths
//!
//! Durations are exact fractions of a whole note, so `(3, 16)` stays a dotted
//! eighth instead of drifting into floating point.

use num_rational::Ratio;
use num_traits::One;

/// Length of a note or rest as a fraction of a whole note
pub type Duration = Ratio<i64>;

/// Helper to create a Duration from a ratio n/d
///
/// Panics on a zero denominator, like `Ratio::new`. Use [`try_duration`] for
/// values coming from user input.
#[inline]
pub fn duration(n: i64, d: i64) -> Duration {
    Ratio::new(n, d)
}

/// Create a Duration only if both parts are positive
pub fn try_duration(n: i64, d: i64) -> Option<Duration> {
    if n <= 0 || d <= 0 {
        return None;
    }
    Some(Ratio::new(n, d))
}

/// `(1, d)`: the note value written as a bare number in the pattern language
#[inline]
pub fn note_value(d: i64) -> Option<Duration> {
    try_duration(1, d)
}

/// The fallback length used when nothing better is known
#[inline]
pub fn quarter() -> Duration {
    Ratio::new(1, 4)
}

/// Render as the `(n, d)` tuple form the pattern language accepts
pub fn to_pair_string(d: &Duration) -> String {
    format!("({}, {})", d.numer(), d.denom())
}

/// Compact form: `8` for `(1, 8)`, `(3, 16)` otherwise
pub fn to_pattern_string(d: &Duration) -> String {
    if d.numer().is_one() {
        d.denom().to_string()
    } else {
        to_pair_string(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_creation() {
        let d = duration(3, 16);
        assert_eq!(*d.numer(), 3);
        assert_eq!(*d.denom(), 16);
    }

    #[test]
    fn test_try_duration_rejects_degenerate_parts() {
        assert_eq!(try_duration(1, 0), None);
        assert_eq!(try_duration(0, 4), None);
        assert_eq!(try_duration(-1, 4), None);
        assert_eq!(try_duration(1, 8), Some(duration(1, 8)));
    }

    #[test]
    fn test_pattern_strings() {
        assert_eq!(to_pattern_string(&duration(1, 8)), "8");
        assert_eq!(to_pattern_string(&duration(3, 16)), "(3, 16)");
        // (2, 8) reduces to a quarter
        assert_eq!(to_pattern_string(&duration(2, 8)), "4");
    }
}
