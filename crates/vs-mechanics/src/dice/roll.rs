//! Dice roll results.

use serde::{Deserialize, Serialize};

use super::Die;

/// The faces rolled by a [`DicePool`](super::DicePool).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// The die type that was rolled.
    pub die: Die,
    /// One value per die, each in `1..=faces`.
    pub values: Vec<u32>,
}

impl RollResult {
    /// Count dice showing at least `threshold`. A threshold of 1 or less
    /// counts every die.
    pub fn count_at_or_above(&self, threshold: i32) -> u32 {
        self.values
            .iter()
            .filter(|&&v| i64::from(v) >= i64::from(threshold))
            .count() as u32
    }

    /// Count dice showing the die's highest face.
    pub fn count_max_faces(&self) -> u32 {
        let max = self.die.faces();
        self.values.iter().filter(|&&v| v == max).count() as u32
    }

    /// Number of dice in the result.
    pub fn count(&self) -> usize {
        self.values.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", values.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d6(values: &[u32]) -> RollResult {
        RollResult {
            die: Die::D6,
            values: values.to_vec(),
        }
    }

    #[test]
    fn count_at_or_above() {
        let r = d6(&[2, 4, 6]);
        assert_eq!(r.count_at_or_above(4), 2);
        assert_eq!(r.count_at_or_above(6), 1);
        assert_eq!(r.count_at_or_above(7), 0);
        assert_eq!(r.count_at_or_above(1), 3);
        assert_eq!(r.count_at_or_above(-3), 3);
    }

    #[test]
    fn count_max_faces() {
        assert_eq!(d6(&[6, 1, 6, 5]).count_max_faces(), 2);
        assert_eq!(d6(&[]).count_max_faces(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(d6(&[3, 5]).to_string(), "[3, 5]");
    }
}
