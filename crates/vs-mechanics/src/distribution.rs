//! Discrete probability distributions over integer outcomes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A probability mass function over integer outcomes, kept in ascending order.
///
/// Masses are accumulated with plain floating-point addition, so merging the
/// same branches in a different order gives the same result up to rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution<K: Ord> {
    masses: BTreeMap<K, f64>,
}

/// Distribution over a non-negative count of successes (hits, saves, wounds).
pub type SuccessDistribution = Distribution<u32>;

/// Distribution over a signed net delta. Positive favours the attacker.
pub type OutcomeDistribution = Distribution<i32>;

impl<K: Ord> Default for Distribution<K> {
    fn default() -> Self {
        Self {
            masses: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> Distribution<K> {
    /// An empty distribution (total mass zero). Used as an accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// The distribution that puts all its mass on one value.
    pub fn point(value: K) -> Self {
        Self {
            masses: BTreeMap::from([(value, 1.0)]),
        }
    }

    /// Add `mass` to `value`.
    pub fn add(&mut self, value: K, mass: f64) {
        *self.masses.entry(value).or_insert(0.0) += mass;
    }

    /// Probability of exactly `value`.
    pub fn get(&self, value: K) -> f64 {
        self.masses.get(&value).copied().unwrap_or(0.0)
    }

    /// Sum of all masses.
    pub fn total_mass(&self) -> f64 {
        self.masses.values().sum()
    }

    /// Returns true if the total mass is within `tolerance` of 1.0.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total_mass() - 1.0).abs() <= tolerance
    }

    /// Entries in ascending order of value.
    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.masses.iter().map(|(&k, &p)| (k, p))
    }

    /// Values with an entry, in ascending order. Entries may carry zero mass.
    pub fn support(&self) -> impl Iterator<Item = K> + '_ {
        self.masses.keys().copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Rescale so the masses sum to 1.0. No-op on an empty or massless distribution.
    pub(crate) fn normalize(&mut self) {
        let total = self.total_mass();
        if total > 0.0 {
            for mass in self.masses.values_mut() {
                *mass /= total;
            }
        }
    }
}

impl<K: Ord + Copy + Into<f64>> Distribution<K> {
    /// Expected value.
    pub fn mean(&self) -> f64 {
        self.iter().map(|(k, p)| k.into() * p).sum()
    }
}

impl Distribution<i32> {
    /// Probability that the attacker comes out ahead.
    pub fn win_probability(&self) -> f64 {
        self.iter().filter(|&(k, _)| k > 0).map(|(_, p)| p).sum()
    }

    /// Probability that the defender comes out ahead.
    pub fn loss_probability(&self) -> f64 {
        self.iter().filter(|&(k, _)| k < 0).map(|(_, p)| p).sum()
    }

    /// Probability of an exact draw.
    pub fn draw_probability(&self) -> f64 {
        self.get(0)
    }
}

impl<K: Ord + Copy> FromIterator<(K, f64)> for Distribution<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut dist = Self::new();
        for (value, mass) in iter {
            dist.add(value, mass);
        }
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_mass() {
        let d = SuccessDistribution::point(0);
        assert_eq!(d.get(0), 1.0);
        assert_eq!(d.get(1), 0.0);
        assert_eq!(d.len(), 1);
        assert!(d.is_normalized(0.0));
    }

    #[test]
    fn add_accumulates() {
        let mut d = OutcomeDistribution::new();
        d.add(2, 0.25);
        d.add(-1, 0.5);
        d.add(2, 0.25);
        assert_eq!(d.get(2), 0.5);
        assert_eq!(d.support().collect::<Vec<_>>(), [-1, 2]);
        assert!(d.is_normalized(1e-12));
    }

    #[test]
    fn outcome_probabilities() {
        let d: OutcomeDistribution = [(-2, 0.1), (-1, 0.2), (0, 0.3), (3, 0.4)]
            .into_iter()
            .collect();
        assert!((d.win_probability() - 0.4).abs() < 1e-12);
        assert!((d.loss_probability() - 0.3).abs() < 1e-12);
        assert!((d.draw_probability() - 0.3).abs() < 1e-12);
        assert!((d.mean() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn normalize_rescales() {
        let mut d: SuccessDistribution = [(0, 1.0), (1, 3.0)].into_iter().collect();
        d.normalize();
        assert!((d.get(1) - 0.75).abs() < 1e-12);
        let mut empty = SuccessDistribution::new();
        empty.normalize();
        assert!(empty.is_empty());
    }

    #[test]
    fn serializes_as_map() {
        let d: OutcomeDistribution = [(-1, 0.5), (1, 0.5)].into_iter().collect();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"-1":0.5,"1":0.5}"#);
        let back: OutcomeDistribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
