use std::collections::HashMap;
use std::hash::Hash;

use crate::domain::Shot;

use super::types::ShotBreakdown;

/// Integer ratio rounded half-up; a zero denominator yields 0
pub fn rounded_ratio(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let numerator = numerator as u64;
    let denominator = denominator as u64;
    ((2 * numerator + denominator) / (2 * denominator)) as u32
}

/// `part` as a whole-number percentage of `whole`
pub fn percentage(part: usize, whole: usize) -> u32 {
    rounded_ratio(part * 100, whole)
}

/// Groups items by key, keeping groups in the order their key was first seen.
/// Items whose key is `None` are skipped.
pub fn group_in_order<T, K, V>(
    items: &[T],
    key: impl Fn(&T) -> Option<K>,
    fold: impl Fn(&mut V, &T),
) -> Vec<(K, V)>
where
    K: Eq + Hash + Clone,
    V: Default,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, V)> = Vec::new();

    for item in items {
        let Some(k) = key(item) else {
            continue;
        };
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, V::default()));
            groups.len() - 1
        });
        fold(&mut groups[slot].1, item);
    }

    groups
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuccessTally {
    pub total: usize,
    pub successful: usize,
}

impl SuccessTally {
    pub fn record(&mut self, success: bool) {
        self.total += 1;
        if success {
            self.successful += 1;
        }
    }

    pub fn success_rate(&self) -> u32 {
        percentage(self.successful, self.total)
    }
}

/// Success rate of pocketing per value of one shot attribute
pub fn success_breakdown<K>(
    shots: &[Shot],
    category: &str,
    key: impl Fn(&Shot) -> Option<K>,
    label: impl Fn(&K) -> String,
) -> Vec<ShotBreakdown>
where
    K: Eq + Hash + Clone,
{
    group_in_order(shots, key, |tally: &mut SuccessTally, shot| {
        tally.record(shot.is_pocketed())
    })
    .into_iter()
    .map(|(value, tally)| ShotBreakdown {
        category: category.to_string(),
        label: label(&value),
        total: tally.total,
        successful: tally.successful,
        success_rate: tally.success_rate(),
    })
    .collect()
}
