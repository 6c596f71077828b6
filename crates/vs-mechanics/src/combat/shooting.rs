//! Shooting between two units.

use tracing::debug;
use vs_core::Unit;

use super::report::{LISTING_CUTOFF, fill_bar, outcome_bar, percent};
use super::{CombatProfile, ReactionCapability, Simulator};
use crate::config::SimConfig;
use crate::distribution::OutcomeDistribution;
use crate::error::MechResult;
use crate::resolution::CombatResolver;

/// Simulates one round of shooting. A defender that can fire shoots back
/// at the same time.
#[derive(Debug, Clone)]
pub struct ShootingSimulator {
    attacker_name: String,
    defender_name: String,
    attacker: CombatProfile,
    defender: CombatProfile,
    attacker_fire: ReactionCapability,
    defender_fire: ReactionCapability,
    resolver: CombatResolver,
    result: Option<OutcomeDistribution>,
}

impl ShootingSimulator {
    /// Shooting between two profiles with explicit fire capabilities.
    pub fn from_profiles(
        attacker: CombatProfile,
        defender: CombatProfile,
        attacker_fire: ReactionCapability,
        defender_fire: ReactionCapability,
        config: SimConfig,
    ) -> MechResult<Self> {
        Ok(Self {
            attacker_name: "Attacker".to_string(),
            defender_name: "Defender".to_string(),
            attacker,
            defender,
            attacker_fire,
            defender_fire,
            resolver: CombatResolver::new(config)?,
            result: None,
        })
    }

    /// `attacker` shooting at `defender`, each with its own weapon.
    pub fn from_units(attacker: &Unit, defender: &Unit, config: SimConfig) -> MechResult<Self> {
        Ok(Self::from_profiles(
            CombatProfile::from_unit(attacker)?,
            CombatProfile::from_unit(defender)?,
            ReactionCapability::from_units(attacker, defender),
            ReactionCapability::from_units(defender, attacker),
            config,
        )?
        .with_names(attacker.name.clone(), defender.name.clone()))
    }

    /// Set the names used in the summary.
    pub fn with_names(mut self, attacker: impl Into<String>, defender: impl Into<String>) -> Self {
        self.attacker_name = attacker.into();
        self.defender_name = defender.into();
        self
    }

    /// Returns true if the defender fires back.
    pub fn is_exchange(&self) -> bool {
        self.defender_fire.fires
    }

    fn attacker_inaccuracy(&self) -> i32 {
        self.attacker
            .accuracy_threshold()
            .saturating_add(self.attacker_fire.accuracy_modifier)
    }

    fn defender_inaccuracy(&self) -> i32 {
        self.defender
            .accuracy_threshold()
            .saturating_add(self.defender_fire.accuracy_modifier)
    }

    fn describe_exchange(&self, result: &OutcomeDistribution) -> Vec<String> {
        let win = result.win_probability();
        let lose = result.loss_probability();
        let mut lines = vec![
            format!(
                "Shooting: {} ↔ {} (Stand and Shoot)",
                self.attacker_name, self.defender_name
            ),
            format!("Attacker inaccuracy: {}", self.attacker_inaccuracy()),
            format!("Defender inaccuracy: {}", self.defender_inaccuracy()),
            "Combat Outcome:".to_string(),
            outcome_bar(win, lose),
            format!("Expected net wounds: {:.2}", result.mean()),
            format!("Attacker wins: {}", percent(win, 1)),
            format!("Defender wins: {}", percent(lose, 1)),
            format!("Draw: {}", percent(result.draw_probability(), 1)),
            String::new(),
            "Net Wound Distribution:".to_string(),
        ];
        for (delta, p) in result.iter().filter(|&(_, p)| p > LISTING_CUTOFF) {
            let line = match delta {
                d if d > 0 => format!("  Attacker wins by {d} wounds: {}", percent(p, 1)),
                d if d < 0 => format!(
                    "  Defender wins by {} wounds: {}",
                    d.unsigned_abs(),
                    percent(p, 1)
                ),
                _ => format!("  Draw: {}", percent(p, 1)),
            };
            lines.push(line);
        }
        lines
    }

    fn describe_volley(&self, result: &OutcomeDistribution) -> Vec<String> {
        let wounds_per_model = f64::from(self.defender.wounds_per_model());
        let expected = result.mean();
        let casualties = (expected / wounds_per_model).floor();
        let share = expected / f64::from(self.defender.models().max(1));

        let mut lines = vec![
            format!("Shooting: {} → {}", self.attacker_name, self.defender_name),
            format!("Attacker inaccuracy: {}", self.attacker_inaccuracy()),
            "Expected Outcome:".to_string(),
            fill_bar(share),
            format!("Expected wounds: {expected:.2}"),
            format!("Expected casualties: {casualties:.1}"),
            String::new(),
            "Wound Distribution:".to_string(),
        ];
        for (wounds, p) in result.iter().filter(|&(_, p)| p > LISTING_CUTOFF) {
            let killed = wounds.unsigned_abs() / self.defender.wounds_per_model();
            lines.push(format!(
                "  {wounds} wounds ({killed} casualties): {}",
                percent(p, 1)
            ));
        }
        lines
    }
}

impl Simulator for ShootingSimulator {
    fn can_engage(&self) -> bool {
        self.attacker.is_alive() && self.defender.is_alive() && self.attacker_fire.fires
    }

    fn simulate(&mut self) -> OutcomeDistribution {
        if !self.can_engage() {
            return OutcomeDistribution::point(0);
        }
        debug!(
            attacker = %self.attacker_name,
            defender = %self.defender_name,
            return_fire = self.defender_fire.fires,
            "simulating shooting"
        );
        self.resolver.resolve_exchange(
            &self.attacker,
            &self.defender,
            &self.attacker_fire,
            &self.defender_fire,
        )
    }

    fn get_result(&mut self) -> &OutcomeDistribution {
        let result = match self.result.take() {
            Some(result) => result,
            None => self.simulate(),
        };
        self.result.insert(result)
    }

    fn describe(&mut self) -> String {
        let result = self.get_result().clone();
        let lines = if self.is_exchange() {
            self.describe_exchange(&result)
        } else {
            self.describe_volley(&result)
        };
        lines.join("\n")
    }
}
