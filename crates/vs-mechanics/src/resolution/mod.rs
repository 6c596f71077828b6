//! Exact resolution of attacks into wounds, bouts, and reactions.
//!
//! Everything here hangs off a [`CombatResolver`], which owns the roller
//! and the memoized distributions for one simulation:
//! - **Wounds**: hits, then saves against those hits
//! - **Bouts** ([`bout`]): attack and counter-attack, re-fought while tied
//! - **Reactions** ([`reaction`]): ranged fire before or alongside the melee

pub mod bout;
pub mod reaction;

use std::collections::HashMap;

use crate::config::SimConfig;
use crate::distribution::SuccessDistribution;
use crate::error::MechResult;
use crate::roller::Roller;

/// Computes exact combat distributions, caching intermediate results.
///
/// Caches are keyed only by numeric arguments and live exactly as long as
/// the resolver. Nothing is shared between resolvers.
#[derive(Debug, Clone)]
pub struct CombatResolver {
    roller: Roller,
    config: SimConfig,
    rolls: HashMap<(u32, i32), SuccessDistribution>,
    wounds: HashMap<(u32, i32, i32), SuccessDistribution>,
}

impl CombatResolver {
    /// Create a resolver. Fails if the configuration is unusable.
    pub fn new(config: SimConfig) -> MechResult<Self> {
        config.validate()?;
        Ok(Self {
            roller: Roller::from_config(&config)?,
            config,
            rolls: HashMap::new(),
            wounds: HashMap::new(),
        })
    }

    /// The configuration this resolver was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Successes among `dice` dice against `threshold`, memoized.
    pub fn roll_distribution(&mut self, dice: u32, threshold: i32) -> SuccessDistribution {
        let roller = self.roller;
        self.rolls
            .entry((dice, threshold))
            .or_insert_with(|| roller.distribution(dice, threshold))
            .clone()
    }

    /// Unsaved wounds from `attacks` attacks hitting on `to_hit` against
    /// saves on `to_save`. Every count in `0..=attacks` has an entry.
    pub fn wound_distribution(
        &mut self,
        attacks: u32,
        to_hit: i32,
        to_save: i32,
    ) -> SuccessDistribution {
        let key = (attacks, to_hit, to_save);
        if let Some(cached) = self.wounds.get(&key) {
            return cached.clone();
        }

        let hits = self.roll_distribution(attacks, to_hit);
        let mut wounds: SuccessDistribution = (0..=attacks).map(|w| (w, 0.0)).collect();
        for (hit_count, p_hit) in hits.iter() {
            if hit_count == 0 {
                wounds.add(0, p_hit);
                continue;
            }
            let saves = self.roll_distribution(hit_count, to_save);
            for (save_count, p_save) in saves.iter() {
                wounds.add(hit_count - save_count, p_hit * p_save);
            }
        }

        self.wounds.insert(key, wounds.clone());
        wounds
    }

    /// Number of memoized roll and wound distributions.
    pub fn cached_entries(&self) -> usize {
        self.rolls.len() + self.wounds.len()
    }
}

/// Converts a count into a signed delta, saturating at `i32::MAX`.
pub(crate) fn signed(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}
