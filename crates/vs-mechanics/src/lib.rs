//! Exact combat resolution engine for VonSneg.
//!
//! Computes the full probability distribution of a melee or shooting
//! exchange between two units. Nothing is sampled: every dice pool is
//! enumerated exactly, from single-die success chances up through
//! repeated melee bouts and stand-and-shoot reactions.
//!
//! The layers, leaf first:
//! - [`Roller`]: successes from a pool of dice against a threshold
//! - [`CombatResolver`]: hits then saves, bout recursion, reactions
//! - [`MeleeSimulator`] / [`ShootingSimulator`]: the entry points

pub mod combat;
pub mod config;
pub mod dice;
pub mod distribution;
pub mod error;
pub mod resolution;
pub mod roller;

pub use combat::{
    CombatProfile, MeleeSimulator, ReactionCapability, ShootingSimulator, Simulator,
};
pub use config::{SimConfig, TieBreak};
pub use dice::{DicePool, Die, RollResult};
pub use distribution::{Distribution, OutcomeDistribution, SuccessDistribution};
pub use error::{MechError, MechResult};
pub use resolution::CombatResolver;
pub use roller::Roller;
