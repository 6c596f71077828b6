//! Configuration for exact combat resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dice::Die;
use crate::error::{MechError, MechResult};

/// How many times a tied bout is fought again before the tie-break applies.
pub const DEFAULT_MAX_DEPTH: u32 = 6;

/// Branches carrying less probability than this are dropped.
pub const DEFAULT_PRUNE_BELOW: f64 = 1e-12;

/// How far a finished distribution's total mass may drift from 1.0.
pub const DEFAULT_MASS_TOLERANCE: f64 = 1e-6;

/// The second-stage threshold for rolls that need more than a die's faces.
pub const DEFAULT_CONFIRM_THRESHOLD: i32 = 4;

/// Largest accepted tie depth. Each level is one pass over the bout's branches.
pub const MAX_TIE_DEPTH: u32 = 1_000;

/// What happens to a bout that is still tied at the depth cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Half the mass to a one-wound win, half to a one-wound loss.
    #[default]
    Split,
    /// All the mass to an exact draw.
    Draw,
}

impl FromStr for TieBreak {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "split" | "50/50" => Ok(Self::Split),
            "draw" => Ok(Self::Draw),
            other => Err(MechError::InvalidConfig(format!(
                "unknown tie-break policy: {other}"
            ))),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Split => write!(f, "split"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// Configuration for a combat resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// The die every roll uses.
    pub die: Die,
    /// Threshold for the confirmation roll when a target exceeds the die's faces.
    pub confirm_threshold: i32,
    /// Maximum number of re-fought tied bouts.
    pub max_depth: u32,
    /// Branch mass below which a bout branch is skipped.
    pub prune_below: f64,
    /// Policy for bouts still tied at `max_depth`.
    pub tie_break: TieBreak,
    /// Allowed drift of a finished distribution's total mass from 1.0.
    pub mass_tolerance: f64,
    /// Apply each weapon's melee to-hit modifier in melee bouts. Off by
    /// default, so melee rolls against the unit's raw `I`.
    #[serde(default)]
    pub weapon_melee_modifiers: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            die: Die::D6,
            confirm_threshold: DEFAULT_CONFIRM_THRESHOLD,
            max_depth: DEFAULT_MAX_DEPTH,
            prune_below: DEFAULT_PRUNE_BELOW,
            tie_break: TieBreak::Split,
            mass_tolerance: DEFAULT_MASS_TOLERANCE,
            weapon_melee_modifiers: false,
        }
    }
}

impl SimConfig {
    /// Set the die.
    pub fn with_die(mut self, die: Die) -> Self {
        self.die = die;
        self
    }

    /// Set the confirmation threshold for two-stage rolls.
    pub fn with_confirm_threshold(mut self, threshold: i32) -> Self {
        self.confirm_threshold = threshold;
        self
    }

    /// Set the maximum tie depth.
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the pruning threshold.
    pub fn with_prune_below(mut self, mass: f64) -> Self {
        self.prune_below = mass;
        self
    }

    /// Set the tie-break policy.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Apply or ignore weapon melee modifiers.
    pub fn with_weapon_melee_modifiers(mut self, enabled: bool) -> Self {
        self.weapon_melee_modifiers = enabled;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> MechResult<()> {
        self.die.validate()?;
        if self.max_depth > MAX_TIE_DEPTH {
            return Err(MechError::InvalidConfig(format!(
                "max_depth must be at most {MAX_TIE_DEPTH}, got {}",
                self.max_depth
            )));
        }
        if !(self.prune_below.is_finite() && self.prune_below >= 0.0) {
            return Err(MechError::InvalidConfig(format!(
                "prune_below must be a non-negative number, got {}",
                self.prune_below
            )));
        }
        if !(self.mass_tolerance.is_finite() && self.mass_tolerance > 0.0) {
            return Err(MechError::InvalidConfig(format!(
                "mass_tolerance must be positive, got {}",
                self.mass_tolerance
            )));
        }
        Ok(())
    }
}
