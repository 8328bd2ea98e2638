//! Per-run generation settings
//!
//! Everything a generation run depends on lives here instead of in module
//! globals, so two runs with different settings never interfere.

use crate::types::duration::{duration, quarter, Duration};
use crate::types::Notehead;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::collections::BTreeSet;

/// Noteheads accepted when no other set is configured
pub const DEFAULT_NOTEHEAD_SHAPES: [Notehead; 8] = [
    Notehead::Default,
    Notehead::Cross,
    Notehead::Triangle,
    Notehead::Diamond,
    Notehead::Slash,
    Notehead::XCircle,
    Notehead::Harmonic,
    Notehead::HarmonicBlack,
];

/// Intervals (and their complements) a row may move by
pub const DEFAULT_ALLOWED_INTERVALS: [u8; 7] = [1, 2, 3, 6, 9, 10, 11];

/// Intervals the lenient policy always refuses
pub const DEFAULT_FORBIDDEN_INTERVALS: [u8; 4] = [4, 5, 7, 8];

/// How the row generator treats a candidate interval
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AcceptancePolicy {
    /// Accept only allowed intervals; pitch classes recur under a budget
    #[default]
    Strict,
    /// Never repeat a pitch class; intervals in neither the allowed nor the
    /// forbidden set pass on a coin flip
    Lenient,
}

/// Settings for one generation run
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationConfig {
    pub allowed_intervals: BTreeSet<u8>,
    pub forbidden_intervals: BTreeSet<u8>,
    pub acceptance: AcceptancePolicy,
    /// Independent restarts before giving up
    pub max_retries: usize,
    /// Pitch selections per restart
    pub max_attempts: usize,
    /// Shapes the notehead axis and the serial/random notehead modes use
    pub notehead_shapes: Vec<Notehead>,
    /// Palette for randomly chosen durations
    pub allowed_durations: Vec<Duration>,
    /// Length used when no duration sequence is given
    pub default_duration: Duration,
    pub min_beam_groups: usize,
    pub max_beam_groups: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            allowed_intervals: DEFAULT_ALLOWED_INTERVALS.into_iter().collect(),
            forbidden_intervals: DEFAULT_FORBIDDEN_INTERVALS.into_iter().collect(),
            acceptance: AcceptancePolicy::Strict,
            max_retries: 5,
            max_attempts: 10_000,
            notehead_shapes: DEFAULT_NOTEHEAD_SHAPES.to_vec(),
            allowed_durations: vec![
                duration(1, 16),
                duration(1, 8),
                duration(3, 16),
                duration(1, 4),
                duration(3, 8),
                duration(1, 2),
                duration(3, 4),
                duration(1, 1),
                duration(3, 2),
            ],
            default_duration: quarter(),
            min_beam_groups: 3,
            max_beam_groups: 5,
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_acceptance(mut self, acceptance: AcceptancePolicy) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn with_allowed_intervals(mut self, intervals: impl IntoIterator<Item = u8>) -> Self {
        self.allowed_intervals = intervals.into_iter().map(|i| i % 12).collect();
        self
    }

    pub fn with_forbidden_intervals(mut self, intervals: impl IntoIterator<Item = u8>) -> Self {
        self.forbidden_intervals = intervals.into_iter().map(|i| i % 12).collect();
        self
    }

    /// Set the restart and per-restart attempt budgets
    pub fn with_budget(mut self, max_retries: usize, max_attempts: usize) -> Self {
        self.max_retries = max_retries;
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_notehead_shapes(mut self, shapes: Vec<Notehead>) -> Self {
        self.notehead_shapes = shapes;
        self
    }

    pub fn with_default_duration(mut self, d: Duration) -> Self {
        self.default_duration = d;
        self
    }

    /// Set the range of beam-group counts (min is clamped to at least 1)
    pub fn with_beam_groups(mut self, min: usize, max: usize) -> Self {
        self.min_beam_groups = min.max(1);
        self.max_beam_groups = max.max(self.min_beam_groups);
        self
    }
}

/// The generator behind every seeded run
pub type SeededRng = Pcg64;

/// A deterministic random source for replayable runs
pub fn seeded_rng(seed: u64) -> SeededRng {
    Pcg64::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.max_attempts, 10_000);
        assert!(config.allowed_intervals.contains(&6));
        assert!(!config.allowed_intervals.contains(&7));
        assert_eq!(config.default_duration, quarter());
        assert_eq!((config.min_beam_groups, config.max_beam_groups), (3, 5));
    }

    #[test]
    fn test_beam_group_bounds_are_clamped() {
        let config = GenerationConfig::new().with_beam_groups(0, 0);
        assert_eq!((config.min_beam_groups, config.max_beam_groups), (1, 1));
        let config = GenerationConfig::new().with_beam_groups(4, 2);
        assert_eq!((config.min_beam_groups, config.max_beam_groups), (4, 4));
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = seeded_rng(7);
        let mut b = seeded_rng(7);
        let xs: Vec<u32> = (0..8).map(|_| a.gen()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen()).collect();
        assert_eq!(xs, ys);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serde_roundtrip() {
        let config = GenerationConfig::new().with_acceptance(AcceptancePolicy::Lenient);
        let json = serde_json::to_string(&config).unwrap();
        let back: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
