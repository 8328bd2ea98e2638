//! Constrained random row generation
//!
//! A row grows one pitch class at a time. Each candidate is drawn uniformly
//! from the classes still under their repetition budget and must move by an
//! allowed interval that differs from the previous step's interval. An attempt
//! that stalls is abandoned and the row restarts from scratch; only when every
//! restart fails does the caller see an error. A partial row is never returned.

use crate::config::{AcceptancePolicy, GenerationConfig};
use crate::error::GenerationError;
use crate::types::pitch::{complement, interval_between, PitchClass, PITCH_CLASSES};
use crate::types::Row;
use log::{debug, error, info, warn};
use rand::Rng;
use std::collections::BTreeSet;

/// Where the prime row of a run comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowSource {
    Random,
    Fixed(Row),
}

/// Row generator for one configuration
#[derive(Clone, Debug)]
pub struct RowGenerator {
    allowed: BTreeSet<u8>,
    forbidden: BTreeSet<u8>,
    acceptance: AcceptancePolicy,
    max_retries: usize,
    max_attempts: usize,
}

impl RowGenerator {
    pub fn new(config: &GenerationConfig) -> Self {
        RowGenerator {
            allowed: config.allowed_intervals.clone(),
            forbidden: config.forbidden_intervals.clone(),
            acceptance: config.acceptance,
            max_retries: config.max_retries,
            max_attempts: config.max_attempts,
        }
    }

    /// Produce the prime row for `source`, generating when it is random
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        source: &RowSource,
        row_length: usize,
        rng: &mut R,
    ) -> Result<Row, GenerationError> {
        match source {
            RowSource::Random => self.generate(row_length, rng),
            RowSource::Fixed(row) => Ok(row.clone()),
        }
    }

    /// Generate a row of exactly `row_length` pitch classes
    pub fn generate<R: Rng + ?Sized>(
        &self,
        row_length: usize,
        rng: &mut R,
    ) -> Result<Row, GenerationError> {
        if row_length == 0 {
            return Err(GenerationError::InvalidLength);
        }

        for retry in 0..self.max_retries {
            info!("Attempt {}: starting row generation", retry + 1);

            let attempt = match self.acceptance {
                AcceptancePolicy::Strict => self.attempt_strict(row_length, rng),
                AcceptancePolicy::Lenient => self.attempt_lenient(row_length, rng),
            };

            if let Some(pitches) = attempt {
                let row = Row::from_checked(pitches);
                info!("Generated row: {}", row);
                return Ok(row);
            }
        }

        error!("Failed to generate a valid row after maximum retries.");
        Err(GenerationError::Exhausted {
            length: row_length,
            retries: self.max_retries,
            attempts: self.max_attempts,
        })
    }

    /// True when moving `last -> candidate` passes the interval rules
    fn interval_ok(&self, interval: u8, previous: Option<u8>) -> bool {
        let inverse = complement(interval);
        if previous.is_some_and(|p| p == interval || p == inverse) {
            return false;
        }
        self.allowed.contains(&interval) || self.allowed.contains(&inverse)
    }

    fn attempt_strict<R: Rng + ?Sized>(
        &self,
        row_length: usize,
        rng: &mut R,
    ) -> Option<Vec<PitchClass>> {
        let mut row: Vec<PitchClass> = Vec::with_capacity(row_length);
        let mut counts = [0usize; PITCH_CLASSES as usize];
        let mut previous_interval: Option<u8> = None;
        let mut attempts = 0;

        while row.len() < row_length {
            attempts += 1;
            if attempts > self.max_attempts {
                warn!("Max attempts reached. Restarting row generation...");
                return None;
            }

            // Every completed cycle of twelve raises the ceiling for all classes
            let ceiling = 1 + row.len() / PITCH_CLASSES as usize;
            // The class that completed the first full set stays unique
            let capped = (row.len() >= PITCH_CLASSES as usize).then(|| row[11]);

            let eligible: Vec<PitchClass> = (0..PITCH_CLASSES)
                .filter(|&pc| counts[pc as usize] < ceiling && Some(pc) != capped)
                .collect();
            if eligible.is_empty() {
                warn!("No eligible pitches found under constraints. Restarting...");
                return None;
            }

            let candidate = eligible[rng.gen_range(0..eligible.len())];

            if let Some(&last) = row.last() {
                let interval = interval_between(last, candidate);
                if !self.interval_ok(interval, previous_interval) {
                    continue;
                }
                previous_interval = Some(interval);
            }

            row.push(candidate);
            counts[candidate as usize] += 1;
            debug!(
                "Added pitch {} (count: {})",
                candidate, counts[candidate as usize]
            );
        }

        Some(row)
    }

    fn attempt_lenient<R: Rng + ?Sized>(
        &self,
        row_length: usize,
        rng: &mut R,
    ) -> Option<Vec<PitchClass>> {
        let mut row: Vec<PitchClass> = vec![rng.gen_range(0..PITCH_CLASSES)];
        let mut previous_interval: Option<u8> = None;
        let mut attempts = 0;

        while row.len() < row_length {
            attempts += 1;
            if attempts > self.max_attempts {
                warn!("Max attempts reached. Restarting row generation...");
                return None;
            }

            let candidate = rng.gen_range(0..PITCH_CLASSES);
            if row.contains(&candidate) {
                continue;
            }

            let last = row[row.len() - 1];
            let interval = interval_between(last, candidate);
            let inverse = complement(interval);
            if previous_interval.is_some_and(|p| p == interval || p == inverse) {
                continue;
            }

            let accepted = if self.allowed.contains(&interval) || self.allowed.contains(&inverse) {
                true
            } else if !self.forbidden.contains(&interval) && !self.forbidden.contains(&inverse) {
                rng.gen_bool(0.5)
            } else {
                false
            };

            if accepted {
                row.push(candidate);
                previous_interval = Some(interval);
                debug!("Added pitch {} (interval: {})", candidate, interval);
            }
        }

        Some(row)
    }
}

/// Check that every adjacent pair of `row` obeys the interval rules for
/// `allowed`: the step (or its complement) is allowed and differs from the
/// step before it.
pub fn satisfies_interval_rules(row: &Row, allowed: &BTreeSet<u8>) -> bool {
    let mut previous: Option<u8> = None;
    for interval in row.intervals() {
        let inverse = complement(interval);
        if previous.is_some_and(|p| p == interval || p == inverse) {
            return false;
        }
        if !allowed.contains(&interval) && !allowed.contains(&inverse) {
            return false;
        }
        previous = Some(interval);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::seeded_rng;

    fn generator() -> RowGenerator {
        RowGenerator::new(&GenerationConfig::default())
    }

    #[test]
    fn test_zero_length_is_invalid() {
        let mut rng = seeded_rng(1);
        assert_eq!(
            generator().generate(0, &mut rng),
            Err(GenerationError::InvalidLength)
        );
    }

    #[test]
    fn test_rows_have_exact_length_and_obey_rules() {
        let config = GenerationConfig::default();
        let gen = RowGenerator::new(&config);
        for seed in 0..20 {
            let mut rng = seeded_rng(seed);
            for length in 1..=12 {
                match gen.generate(length, &mut rng) {
                    Ok(row) => {
                        assert_eq!(row.len(), length);
                        assert!(satisfies_interval_rules(&row, &config.allowed_intervals));
                    }
                    Err(e) => assert!(matches!(e, GenerationError::Exhausted { .. })),
                }
            }
        }
    }

    #[test]
    fn test_first_twelve_are_unique() {
        let mut rng = seeded_rng(42);
        if let Ok(row) = generator().generate(12, &mut rng) {
            assert_eq!(row.pitch_class_set().len(), 12);
        }
    }

    #[test]
    fn test_long_rows_respect_budget_and_cap() {
        let gen = generator();
        for seed in 0..10 {
            let mut rng = seeded_rng(seed);
            let Ok(row) = gen.generate(20, &mut rng) else {
                continue;
            };
            let pitches = row.pitches();
            let completing = pitches[11];
            assert_eq!(pitches.iter().filter(|&&p| p == completing).count(), 1);
            for pc in 0..12u8 {
                assert!(pitches.iter().filter(|&&p| p == pc).count() <= 2);
            }
        }
    }

    #[test]
    fn test_same_seed_same_row() {
        let gen = generator();
        let a = gen.generate(9, &mut seeded_rng(99));
        let b = gen.generate(9, &mut seeded_rng(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_exhaustion_is_reported() {
        // No interval is allowed, so no second note can ever be placed
        let config = GenerationConfig::new()
            .with_allowed_intervals(Vec::<u8>::new())
            .with_budget(2, 50);
        let mut rng = seeded_rng(3);
        assert_eq!(
            RowGenerator::new(&config).generate(4, &mut rng),
            Err(GenerationError::Exhausted {
                length: 4,
                retries: 2,
                attempts: 50
            })
        );
    }

    #[test]
    fn test_lenient_rows_never_repeat() {
        let config = GenerationConfig::new().with_acceptance(AcceptancePolicy::Lenient);
        let gen = RowGenerator::new(&config);
        let mut rng = seeded_rng(5);
        if let Ok(row) = gen.generate(12, &mut rng) {
            assert_eq!(row.pitch_class_set().len(), 12);
        }
        // More than twelve distinct classes is impossible
        let strict_budget = GenerationConfig::new()
            .with_acceptance(AcceptancePolicy::Lenient)
            .with_budget(1, 200);
        assert!(RowGenerator::new(&strict_budget)
            .generate(13, &mut rng)
            .is_err());
    }

    #[test]
    fn test_fixed_source_is_returned_unchanged() {
        let row = Row::new([4u8, 5, 6, 1, 0, 8, 9, 6]).unwrap();
        let mut rng = seeded_rng(0);
        let resolved = generator()
            .resolve(&RowSource::Fixed(row.clone()), 3, &mut rng)
            .unwrap();
        assert_eq!(resolved, row);
    }
}
