//! Dice pool rolling.

use rand::Rng;

use super::Die;
use super::roll::RollResult;

/// A number of identical dice rolled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DicePool {
    /// The die type.
    pub die: Die,
    /// How many dice are rolled.
    pub count: u32,
}

impl DicePool {
    /// Create a pool of `count` dice.
    pub fn new(die: Die, count: u32) -> Self {
        Self { die, count }
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Roll every die in the pool.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> RollResult {
        let faces = self.die.faces().max(1);
        let values = (0..self.count)
            .map(|_| rng.random_range(1..=faces))
            .collect();
        RollResult {
            die: self.die,
            values,
        }
    }
}
