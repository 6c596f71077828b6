//! Combat profiles, reaction capabilities, and the simulator entry points.
//!
//! A [`Simulator`] turns two unit snapshots into an exact outcome
//! distribution:
//! - [`MeleeSimulator`]: a charge, with the defender's stand and shoot
//! - [`ShootingSimulator`]: an exchange of fire

pub mod melee;
pub mod report;
pub mod shooting;

pub use melee::MeleeSimulator;
pub use shooting::ShootingSimulator;

use vs_core::{Trait, Unit};

use crate::distribution::OutcomeDistribution;
use crate::error::{MechError, MechResult};

/// Accuracy penalty for shooting at a unit in loose formation.
pub const SKIRMISH_PENALTY: i32 = 2;

/// The numbers one side brings to a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CombatProfile {
    models: u32,
    attacks_per_model: u32,
    accuracy_threshold: i32,
    save_threshold: i32,
    wounds_per_model: u32,
}

impl CombatProfile {
    /// Create a profile. Fails if `wounds_per_model` is zero.
    pub fn new(
        models: u32,
        attacks_per_model: u32,
        accuracy_threshold: i32,
        save_threshold: i32,
        wounds_per_model: u32,
    ) -> MechResult<Self> {
        if wounds_per_model == 0 {
            return Err(MechError::InvalidProfile(
                "wounds per model must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            models,
            attacks_per_model,
            accuracy_threshold,
            save_threshold,
            wounds_per_model,
        })
    }

    /// Build a profile from a unit's current models and stats.
    pub fn from_unit(unit: &Unit) -> MechResult<Self> {
        let stats = &unit.stats;
        Self::new(
            unit.models,
            stats.attacks,
            stats.inaccuracy,
            stats.save,
            stats.wounds,
        )
        .map_err(|_| {
            MechError::InvalidProfile(format!("unit \"{}\" has no wounds per model", unit.name))
        })
    }

    /// Living models.
    pub fn models(&self) -> u32 {
        self.models
    }

    /// Attacks each model makes.
    pub fn attacks_per_model(&self) -> u32 {
        self.attacks_per_model
    }

    /// To-hit threshold.
    pub fn accuracy_threshold(&self) -> i32 {
        self.accuracy_threshold
    }

    /// Save threshold.
    pub fn save_threshold(&self) -> i32 {
        self.save_threshold
    }

    /// Wounds a model takes before it is removed.
    pub fn wounds_per_model(&self) -> u32 {
        self.wounds_per_model
    }

    /// Attacks made by the whole side.
    pub fn total_attacks(&self) -> u32 {
        self.models.saturating_mul(self.attacks_per_model)
    }

    /// Returns true if at least one model is left.
    pub fn is_alive(&self) -> bool {
        self.models > 0
    }

    /// The same profile with a different model count.
    pub fn with_models(mut self, models: u32) -> Self {
        self.models = models;
        self
    }

    /// The same profile with `modifier` added to the to-hit threshold.
    pub fn with_accuracy_modifier(mut self, modifier: i32) -> Self {
        self.accuracy_threshold = self.accuracy_threshold.saturating_add(modifier);
        self
    }
}

/// Whether a side fires outside the melee bout, and the modifiers on that fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactionCapability {
    /// Whether the side fires at all.
    pub fires: bool,
    /// Added to the firing side's to-hit threshold.
    pub accuracy_modifier: i32,
    /// Added to the target's save threshold.
    pub save_modifier: i32,
}

impl ReactionCapability {
    /// A side that does not fire.
    pub fn none() -> Self {
        Self::default()
    }

    /// A side that fires with the given modifiers.
    pub fn new(accuracy_modifier: i32, save_modifier: i32) -> Self {
        Self {
            fires: true,
            accuracy_modifier,
            save_modifier,
        }
    }

    /// How `shooter` fires at `target`: only if its weapon can fire, at +2
    /// to hit against skirmishers, with the weapon's save modifier.
    pub fn from_units(shooter: &Unit, target: &Unit) -> Self {
        let accuracy_modifier = if target.has_trait(&Trait::Skirmish) {
            SKIRMISH_PENALTY
        } else {
            0
        };
        Self {
            fires: shooter.can_fire(),
            accuracy_modifier,
            save_modifier: shooter.weapon.shooting_save_mod(),
        }
    }
}

/// An exact combat simulation between two units.
pub trait Simulator {
    /// Returns true if the combat can take place at all.
    fn can_engage(&self) -> bool;

    /// Compute the outcome distribution. Positive deltas favour the attacker.
    fn simulate(&mut self) -> OutcomeDistribution;

    /// The outcome distribution, computed on first use and then reused.
    fn get_result(&mut self) -> &OutcomeDistribution;

    /// A human-readable summary of the outcome.
    fn describe(&mut self) -> String;
}
