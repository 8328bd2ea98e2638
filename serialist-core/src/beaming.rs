//! Beam groupings
//!
//! A grouping splits a staff's notes into consecutive beamed runs of at least
//! two notes. The selector hands out groupings without repetition within a
//! run, so neighbouring staves of the same length are beamed differently.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::ops::Range;

/// Sizes of consecutive beamed groups, summing to the staff length
pub type BeamGrouping = Vec<usize>;

/// Smallest group a beam may span
const MIN_GROUP_SIZE: usize = 2;

/// Every ordered split of `length` into `min_groups..=max_groups` groups of
/// at least two notes, sorted and without duplicates.
pub fn valid_groupings(length: usize, min_groups: usize, max_groups: usize) -> Vec<BeamGrouping> {
    let mut groupings = Vec::new();
    for group_count in min_groups.max(1)..=max_groups {
        let mut current = Vec::with_capacity(group_count);
        compositions(length, group_count, &mut current, &mut groupings);
    }
    groupings.sort();
    groupings.dedup();
    groupings
}

/// Push every way to write `remaining` as `parts` sizes of at least two
fn compositions(
    remaining: usize,
    parts: usize,
    current: &mut Vec<usize>,
    out: &mut Vec<BeamGrouping>,
) {
    if parts == 1 {
        if remaining >= MIN_GROUP_SIZE {
            current.push(remaining);
            out.push(current.clone());
            current.pop();
        }
        return;
    }
    // Leave at least two notes for each group still to come
    let reserve = MIN_GROUP_SIZE * (parts - 1);
    if remaining < reserve + MIN_GROUP_SIZE {
        return;
    }
    for size in MIN_GROUP_SIZE..=(remaining - reserve) {
        current.push(size);
        compositions(remaining - size, parts - 1, current, out);
        current.pop();
    }
}

/// Note index ranges covered by each group
pub fn spans(grouping: &[usize]) -> Vec<Range<usize>> {
    let mut start = 0;
    grouping
        .iter()
        .map(|&size| {
            let span = start..start + size;
            start += size;
            span
        })
        .collect()
}

/// Hands out non-repeating groupings for the staves of one run
#[derive(Clone, Debug)]
pub struct BeamGroupingSelector {
    min_groups: usize,
    max_groups: usize,
    /// Unused groupings per staff length, already shuffled
    pools: HashMap<usize, Vec<BeamGrouping>>,
}

impl BeamGroupingSelector {
    pub fn new(min_groups: usize, max_groups: usize) -> Self {
        BeamGroupingSelector {
            min_groups,
            max_groups,
            pools: HashMap::new(),
        }
    }

    /// Take the next grouping for a staff of `length` notes.
    ///
    /// The pool for a length is shuffled once when first needed and refilled
    /// only after every grouping in it has been used. When no valid grouping
    /// exists the whole staff is one group.
    pub fn select<R: Rng + ?Sized>(&mut self, length: usize, rng: &mut R) -> BeamGrouping {
        if length == 0 {
            return Vec::new();
        }

        let pool = self.pools.entry(length).or_default();
        if pool.is_empty() {
            let mut fresh = valid_groupings(length, self.min_groups, self.max_groups);
            if fresh.is_empty() {
                debug!("No valid beam grouping for {} notes, beaming all together", length);
                return vec![length];
            }
            fresh.shuffle(rng);
            *pool = fresh;
        }

        pool.pop().unwrap_or_else(|| vec![length])
    }

    /// Number of groupings still unused for `length`
    pub fn remaining(&self, length: usize) -> usize {
        self.pools.get(&length).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::seeded_rng;
    use std::collections::HashSet;

    #[test]
    fn test_valid_groupings_small() {
        assert_eq!(
            valid_groupings(6, 2, 3),
            vec![vec![2, 2, 2], vec![2, 4], vec![3, 3], vec![4, 2]]
        );
    }

    #[test]
    fn test_every_group_at_least_two_and_sums() {
        for grouping in valid_groupings(12, 3, 5) {
            assert!(grouping.iter().all(|&g| g >= 2));
            assert_eq!(grouping.iter().sum::<usize>(), 12);
            assert!((3..=5).contains(&grouping.len()));
        }
    }

    #[test]
    fn test_no_grouping_possible() {
        assert!(valid_groupings(5, 3, 5).is_empty());
        let mut selector = BeamGroupingSelector::new(3, 5);
        let mut rng = seeded_rng(1);
        assert_eq!(selector.select(5, &mut rng), vec![5]);
    }

    #[test]
    fn test_distinct_groupings_for_length_eight() {
        let total = valid_groupings(8, 3, 5).len();
        assert!(total > 1);

        let mut selector = BeamGroupingSelector::new(3, 5);
        let mut rng = seeded_rng(11);
        let mut seen = HashSet::new();
        for _ in 0..total {
            assert!(seen.insert(selector.select(8, &mut rng)));
        }
        assert_eq!(selector.remaining(8), 0);

        // Pool refills once exhausted
        let again = selector.select(8, &mut rng);
        assert!(seen.contains(&again));
    }

    #[test]
    fn test_spans() {
        assert_eq!(spans(&[3, 2, 3]), vec![0..3, 3..5, 5..8]);
    }
}
