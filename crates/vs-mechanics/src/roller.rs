//! Exact success distributions for pools of dice.
//!
//! Each die succeeds independently when it shows at least the threshold, so
//! the number of successes is binomial. A threshold above the die's highest
//! face cannot be rolled directly. Instead every die showing the highest face
//! is rolled again, and only those that then meet the confirmation threshold
//! count. On a d6 with the default confirmation of 4+ that is a 1 in 12
//! chance per die.

use rand::Rng;

use crate::config::{DEFAULT_CONFIRM_THRESHOLD, SimConfig};
use crate::dice::{DicePool, Die};
use crate::distribution::SuccessDistribution;
use crate::error::MechResult;

/// Computes and samples success counts for a pool of identical dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roller {
    die: Die,
    confirm_threshold: i32,
}

impl Roller {
    /// Create a roller for the given die. A die with no faces is rejected.
    pub fn new(die: Die) -> MechResult<Self> {
        Ok(Self {
            die: die.validate()?,
            confirm_threshold: DEFAULT_CONFIRM_THRESHOLD,
        })
    }

    /// Create a roller from a resolver configuration.
    pub fn from_config(config: &SimConfig) -> MechResult<Self> {
        Ok(Self::new(config.die)?.with_confirm_threshold(config.confirm_threshold))
    }

    /// Set the threshold for the confirmation roll.
    pub fn with_confirm_threshold(mut self, threshold: i32) -> Self {
        self.confirm_threshold = threshold;
        self
    }

    /// The die this roller uses.
    pub fn die(&self) -> Die {
        self.die
    }

    /// Returns true if `threshold` needs the two-stage roll.
    pub fn is_two_stage(&self, threshold: i32) -> bool {
        i64::from(threshold) > i64::from(self.die.faces())
    }

    /// Chance that a single die succeeds against `threshold`.
    pub fn success_chance(&self, threshold: i32) -> f64 {
        if self.is_two_stage(threshold) {
            self.max_face_chance() * self.face_chance(self.confirm_threshold)
        } else {
            self.face_chance(threshold)
        }
    }

    /// Distribution of the number of successes among `dice` dice.
    pub fn distribution(&self, dice: u32, threshold: i32) -> SuccessDistribution {
        if dice == 0 {
            return SuccessDistribution::point(0);
        }
        if !self.is_two_stage(threshold) {
            return binomial(dice, self.face_chance(threshold));
        }

        let confirm = self.face_chance(self.confirm_threshold);
        if confirm == 0.0 {
            return binomial(dice, 0.0);
        }
        let mut dist = SuccessDistribution::new();
        for (max_faces, p_max) in binomial(dice, self.max_face_chance()).iter() {
            for (confirmed, p_confirmed) in binomial(max_faces, confirm).iter() {
                dist.add(confirmed, p_max * p_confirmed);
            }
        }
        // Enumeration through two binomials drifts; pull it back to 1.
        if (dist.total_mass() - 1.0).abs() > f64::EPSILON {
            dist.normalize();
        }
        dist
    }

    /// Roll `dice` dice once and count successes. Illustrative only.
    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R, dice: u32, threshold: i32) -> u32 {
        let first = DicePool::new(self.die, dice).roll(rng);
        if !self.is_two_stage(threshold) {
            return first.count_at_or_above(threshold);
        }
        DicePool::new(self.die, first.count_max_faces())
            .roll(rng)
            .count_at_or_above(self.confirm_threshold)
    }

    fn face_chance(&self, threshold: i32) -> f64 {
        let faces = f64::from(self.die.faces());
        ((faces - f64::from(threshold) + 1.0) / faces).clamp(0.0, 1.0)
    }

    fn max_face_chance(&self) -> f64 {
        1.0 / f64::from(self.die.faces())
    }
}

/// Binomial(n, p) over every count in `0..=n`.
///
/// Computed in log space so large pools neither overflow the coefficient
/// nor underflow the powers. Certain and impossible dice are exact.
pub fn binomial(n: u32, p: f64) -> SuccessDistribution {
    let p = p.clamp(0.0, 1.0);
    let mut dist: SuccessDistribution = (0..=n).map(|k| (k, 0.0)).collect();
    if p <= 0.0 {
        dist.add(0, 1.0);
        return dist;
    }
    if p >= 1.0 {
        dist.add(n, 1.0);
        return dist;
    }

    let ln_p = p.ln();
    let ln_q = (-p).ln_1p();
    let mut ln_choose = 0.0;
    for k in 0..=n {
        let ln_mass = ln_choose + f64::from(k) * ln_p + f64::from(n - k) * ln_q;
        dist.add(k, ln_mass.exp());
        if k < n {
            ln_choose += f64::from(n - k).ln() - f64::from(k + 1).ln();
        }
    }
    dist
}
