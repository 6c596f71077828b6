//! Melee charges between two units.

use tracing::debug;
use vs_core::Unit;

use super::report::{outcome_bar, outcome_label, percent};
use super::{CombatProfile, ReactionCapability, Simulator};
use crate::config::SimConfig;
use crate::distribution::{OutcomeDistribution, SuccessDistribution};
use crate::error::MechResult;
use crate::resolution::CombatResolver;

/// Simulates a melee charge, including the defender's stand and shoot.
///
/// # Examples
///
/// ```
/// use vs_core::{Stats, Unit};
/// use vs_mechanics::{MeleeSimulator, SimConfig, Simulator};
///
/// let brutes = Unit::new("Brutes", 3, Stats::new(3, 4, 6));
/// let fodder = Unit::new("Fodder", 10, Stats::new(1, 5, 6));
/// let mut sim = MeleeSimulator::from_units(&brutes, &fodder, SimConfig::default()).unwrap();
/// assert!(sim.can_engage());
/// assert!(sim.get_result().is_normalized(1e-6));
/// ```
#[derive(Debug, Clone)]
pub struct MeleeSimulator {
    attacker_name: String,
    defender_name: String,
    attacker: CombatProfile,
    defender: CombatProfile,
    defender_shooting: CombatProfile,
    reaction: ReactionCapability,
    resolver: CombatResolver,
    result: Option<OutcomeDistribution>,
}

impl MeleeSimulator {
    /// A plain melee between two profiles, with no stand and shoot.
    pub fn from_profiles(
        attacker: CombatProfile,
        defender: CombatProfile,
        config: SimConfig,
    ) -> MechResult<Self> {
        Ok(Self {
            attacker_name: "Attacker".to_string(),
            defender_name: "Defender".to_string(),
            attacker,
            defender,
            defender_shooting: defender,
            reaction: ReactionCapability::none(),
            resolver: CombatResolver::new(config)?,
            result: None,
        })
    }

    /// A charge by `attacker` into `defender`.
    ///
    /// Both sides fight on their raw `I` unless the config turns on weapon
    /// melee modifiers. The defender stands and shoots if its weapon can
    /// fire, always on its raw `I`.
    pub fn from_units(attacker: &Unit, defender: &Unit, config: SimConfig) -> MechResult<Self> {
        let melee_mod = |unit: &Unit| {
            if config.weapon_melee_modifiers {
                unit.weapon.melee_accuracy_mod()
            } else {
                0
            }
        };
        let attacker_profile =
            CombatProfile::from_unit(attacker)?.with_accuracy_modifier(melee_mod(attacker));
        let defender_shooting = CombatProfile::from_unit(defender)?;
        let defender_profile = defender_shooting.with_accuracy_modifier(melee_mod(defender));

        Ok(Self {
            attacker_name: attacker.name.clone(),
            defender_name: defender.name.clone(),
            attacker: attacker_profile,
            defender: defender_profile,
            defender_shooting,
            reaction: ReactionCapability::from_units(defender, attacker),
            resolver: CombatResolver::new(config)?,
            result: None,
        })
    }

    /// Set the names used in the summary.
    pub fn with_names(mut self, attacker: impl Into<String>, defender: impl Into<String>) -> Self {
        self.attacker_name = attacker.into();
        self.defender_name = defender.into();
        self
    }

    /// The attacker's melee profile.
    pub fn attacker(&self) -> &CombatProfile {
        &self.attacker
    }

    /// The defender's melee profile.
    pub fn defender(&self) -> &CombatProfile {
        &self.defender
    }

    /// The defender's stand and shoot.
    pub fn reaction(&self) -> &ReactionCapability {
        &self.reaction
    }

    /// Wounds the defender's stand and shoot inflicts on the attacker.
    pub fn stand_and_shoot_wounds(&mut self) -> SuccessDistribution {
        self.resolver
            .reaction_wound_distribution(&self.defender_shooting, &self.attacker, &self.reaction)
    }
}

impl Simulator for MeleeSimulator {
    fn can_engage(&self) -> bool {
        self.attacker.is_alive() && self.defender.is_alive()
    }

    fn simulate(&mut self) -> OutcomeDistribution {
        if !self.can_engage() {
            return OutcomeDistribution::point(0);
        }
        debug!(
            attacker = %self.attacker_name,
            defender = %self.defender_name,
            stand_and_shoot = self.reaction.fires,
            "simulating melee"
        );
        self.resolver.resolve_charge(
            &self.attacker,
            &self.defender,
            &self.defender_shooting,
            &self.reaction,
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
        let win = result.win_probability();
        let lose = result.loss_probability();

        let mut lines = vec![format!(
            "Melee: {} → {}",
            self.attacker_name, self.defender_name
        )];

        if self.reaction.fires {
            let expected = self.stand_and_shoot_wounds().mean();
            let inaccuracy = self
                .defender_shooting
                .accuracy_threshold()
                .saturating_add(self.reaction.accuracy_modifier);
            lines.push(format!(
                "Stand and Shoot: {} → {}",
                self.defender_name, self.attacker_name
            ));
            lines.push(format!("Defender inaccuracy: {inaccuracy}"));
            lines.push(format!("Expected stand and shoot wounds: {expected:.2}"));
            lines.push(String::new());
        }

        lines.push("Combat Outcome:".to_string());
        lines.push(outcome_bar(win, lose));
        lines.push(format!("Win by ≥1: {}", percent(win, 1)));
        lines.push(format!("Lose by ≥1: {}", percent(lose, 1)));
        lines.push(format!("Draw: {}", percent(result.draw_probability(), 1)));
        lines.push(format!("Expected net wounds: {:.2}", result.mean()));
        lines.push(String::new());
        lines.push("Wound Delta Distribution:".to_string());

        for (delta, p) in result.iter() {
            if delta == 0 {
                continue;
            }
            lines.push(format!("{:<12}: {}", outcome_label(delta), percent(p, 2)));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vs_core::{Stats, Trait, WeaponKind};

    fn brutes() -> Unit {
        Unit::new("Brutes", 3, Stats::new(3, 4, 6).with_wounds(2).unwrap())
    }

    fn musketeers() -> Unit {
        Unit::new("Musketeers", 8, Stats::new(1, 4, 6)).with_weapon(WeaponKind::BlackPowder)
    }

    #[test]
    fn melee_rolls_raw_inaccuracy_by_default() {
        let sim = MeleeSimulator::from_units(&brutes(), &musketeers(), SimConfig::default()).unwrap();
        assert_eq!(sim.attacker().accuracy_threshold(), 4);
        assert_eq!(sim.defender().accuracy_threshold(), 4);
        assert!(sim.reaction().fires);
    }

    #[test]
    fn weapon_choice_does_not_change_default_melee() {
        let sabres = brutes().with_weapon(WeaponKind::PistolAndSabre);
        let quiet = musketeers().with_powder_smoke(true);
        let mut clubs =
            MeleeSimulator::from_units(&brutes(), &quiet, SimConfig::default()).unwrap();
        let mut pistols =
            MeleeSimulator::from_units(&sabres, &quiet, SimConfig::default()).unwrap();
        assert_eq!(clubs.get_result(), pistols.get_result());
    }

    #[test]
    fn weapon_melee_modifiers_are_opt_in() {
        let cfg = SimConfig::default().with_weapon_melee_modifiers(true);
        let sim = MeleeSimulator::from_units(&brutes(), &musketeers(), cfg).unwrap();
        // Close combat weapons hit a point easier in melee.
        assert_eq!(sim.attacker().accuracy_threshold(), 3);
        assert_eq!(sim.defender().accuracy_threshold(), 4);
        assert_eq!(sim.defender_shooting.accuracy_threshold(), 4);
    }

    #[test]
    fn cannot_engage_without_models() {
        let empty = Unit::new("Empty", 0, Stats::new(1, 4, 6));
        let mut sim = MeleeSimulator::from_units(&empty, &brutes(), SimConfig::default()).unwrap();
        assert!(!sim.can_engage());
        assert_eq!(sim.simulate(), OutcomeDistribution::point(0));
    }

    #[test]
    fn result_is_cached() {
        let mut sim =
            MeleeSimulator::from_units(&brutes(), &musketeers(), SimConfig::default()).unwrap();
        let first = sim.get_result().clone();
        assert!(first.is_normalized(1e-6));
        assert_eq!(sim.get_result(), &first);
    }

    #[test]
    fn stand_and_shoot_lowers_the_attackers_margin() {
        let quiet = musketeers().with_powder_smoke(true);
        let mut with_reaction =
            MeleeSimulator::from_units(&brutes(), &musketeers(), SimConfig::default()).unwrap();
        let mut without =
            MeleeSimulator::from_units(&brutes(), &quiet, SimConfig::default()).unwrap();
        assert!(!without.reaction().fires);
        assert!(with_reaction.get_result().mean() < without.get_result().mean());
    }

    #[test]
    fn skirmishers_are_harder_to_shoot() {
        let skirmishers = brutes().with_trait(Trait::Skirmish);
        let mut sim =
            MeleeSimulator::from_units(&skirmishers, &musketeers(), SimConfig::default()).unwrap();
        assert_eq!(sim.reaction().accuracy_modifier, 2);
        let text = sim.describe();
        assert!(text.contains("Defender inaccuracy: 6"));
    }

    #[test]
    fn describe_layout() {
        let attacker = CombatProfile::new(6, 2, 4, 6, 1).unwrap();
        let defender = CombatProfile::new(6, 2, 4, 5, 1).unwrap();
        let mut sim = MeleeSimulator::from_profiles(attacker, defender, SimConfig::default())
            .unwrap()
            .with_names("Left", "Right");
        let text = sim.describe();
        assert!(text.starts_with("Melee: Left → Right"));
        assert!(!text.contains("Stand and Shoot"));
        assert!(text.contains("Combat Outcome:"));
        assert!(text.contains("Win by ≥1: "));
        assert!(text.contains("Wound Delta Distribution:"));
        assert!(text.contains("Win by 1    : "));
        assert!(!text.contains("Win by 0"));
    }
}
