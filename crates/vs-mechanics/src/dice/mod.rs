//! Dice types, pools, and single-sample rolling.
//!
//! Sampling here is illustrative only. The engine never rolls dice to
//! compute a result; see [`crate::roller`] for the exact distributions.

pub mod pool;
pub mod roll;

pub use pool::DicePool;
pub use roll::RollResult;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die. Every standard roll uses this one.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// A die with a custom number of faces.
    Custom(u32),
}

impl Die {
    /// Returns the number of faces on this die.
    pub fn faces(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::Custom(n) => n,
        }
    }

    /// Returns the die unchanged if it has at least one face.
    pub fn validate(self) -> MechResult<Self> {
        match self.faces() {
            0 => Err(MechError::InvalidDie(0)),
            _ => Ok(self),
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.faces())
    }
}
