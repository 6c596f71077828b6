//! Ranged fire outside the melee bout.
//!
//! Two compositions are supported. A charge folds the defender's stand and
//! shoot into the melee: its casualties come off the attacker before the
//! bout, and the wounds it inflicted count against the attacker's margin.
//! An exchange of fire is simultaneous: both sides shoot at full strength
//! and the net delta is wounds inflicted minus wounds taken.

use std::collections::HashMap;

use tracing::debug;

use super::{CombatResolver, signed};
use crate::combat::{CombatProfile, ReactionCapability};
use crate::distribution::{OutcomeDistribution, SuccessDistribution};

impl CombatResolver {
    /// Wounds `reacting` inflicts on `opposing` with one die per model.
    ///
    /// Exactly `{0: 1.0}` when the capability does not fire.
    pub fn reaction_wound_distribution(
        &mut self,
        reacting: &CombatProfile,
        opposing: &CombatProfile,
        capability: &ReactionCapability,
    ) -> SuccessDistribution {
        if !capability.fires {
            return SuccessDistribution::point(0);
        }
        self.wound_distribution(
            reacting.models(),
            reacting
                .accuracy_threshold()
                .saturating_add(capability.accuracy_modifier),
            opposing
                .save_threshold()
                .saturating_add(capability.save_modifier),
        )
    }

    /// A melee charge preceded by the defender's stand and shoot.
    ///
    /// `defender_shooting` is the profile the defender fires with, which may
    /// differ from its melee profile. If the reaction alone wipes out the
    /// attacker the outcome is minus the wounds it inflicted.
    pub fn resolve_charge(
        &mut self,
        attacker: &CombatProfile,
        defender: &CombatProfile,
        defender_shooting: &CombatProfile,
        capability: &ReactionCapability,
    ) -> OutcomeDistribution {
        if !capability.fires {
            return self.resolve_bout(attacker, defender);
        }

        let reaction = self.reaction_wound_distribution(defender_shooting, attacker, capability);
        debug!(
            expected_wounds = reaction.mean(),
            "stand and shoot before the charge"
        );

        let mut bouts: HashMap<u32, OutcomeDistribution> = HashMap::new();
        let mut result = OutcomeDistribution::new();
        for (wounds, p_wounds) in reaction.iter() {
            if p_wounds == 0.0 {
                continue;
            }
            let penalty = signed(wounds);
            let left = attacker
                .models()
                .saturating_sub(wounds / attacker.wounds_per_model());
            if left == 0 {
                result.add(-penalty, p_wounds);
                continue;
            }

            let bout = bouts
                .entry(left)
                .or_insert_with(|| self.resolve_bout(&attacker.with_models(left), defender));
            for (delta, p_delta) in bout.iter() {
                result.add(delta.saturating_sub(penalty), p_wounds * p_delta);
            }
        }
        result
    }

    /// Simultaneous fire between two sides, each at full strength.
    ///
    /// If the defender does not fire the result is the attacker's wound
    /// distribution and every delta is non-negative.
    pub fn resolve_exchange(
        &mut self,
        attacker: &CombatProfile,
        defender: &CombatProfile,
        attacker_fire: &ReactionCapability,
        defender_fire: &ReactionCapability,
    ) -> OutcomeDistribution {
        let inflicted = self.reaction_wound_distribution(attacker, defender, attacker_fire);
        let taken = self.reaction_wound_distribution(defender, attacker, defender_fire);

        let mut result = OutcomeDistribution::new();
        for (dealt, p_dealt) in inflicted.iter() {
            for (suffered, p_suffered) in taken.iter() {
                result.add(signed(dealt) - signed(suffered), p_dealt * p_suffered);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn resolver() -> CombatResolver {
        CombatResolver::new(SimConfig::default()).unwrap()
    }

    fn profile(models: u32, attacks: u32, to_hit: i32, save: i32) -> CombatProfile {
        CombatProfile::new(models, attacks, to_hit, save, 1).unwrap()
    }

    #[test]
    fn disabled_reaction_is_a_point() {
        let mut r = resolver();
        let dist = r.reaction_wound_distribution(
            &profile(8, 1, 4, 6),
            &profile(8, 1, 4, 6),
            &ReactionCapability::none(),
        );
        assert_eq!(dist, SuccessDistribution::point(0));
    }

    #[test]
    fn disabled_reaction_leaves_the_bout_alone() {
        let attacker = profile(6, 2, 4, 6);
        let defender = profile(6, 2, 4, 5);
        let mut r = resolver();
        let charged = r.resolve_charge(&attacker, &defender, &defender, &ReactionCapability::none());
        let bout = resolver().resolve_bout(&attacker, &defender);
        assert_eq!(charged, bout);
    }

    #[test]
    fn accuracy_penalty_reduces_reaction_wounds() {
        let mut r = resolver();
        let shooter = profile(10, 1, 4, 6);
        let target = profile(10, 1, 4, 6);
        let plain = r.reaction_wound_distribution(&shooter, &target, &ReactionCapability::new(0, 0));
        let penalised =
            r.reaction_wound_distribution(&shooter, &target, &ReactionCapability::new(2, 0));
        assert!(penalised.mean() < plain.mean());
        assert_eq!(plain.support().max(), Some(10));
    }

    #[test]
    fn stand_and_shoot_hurts_the_charge() {
        let attacker = profile(6, 2, 4, 6);
        let defender = profile(6, 2, 4, 5);
        let mut r = resolver();
        let bout = r.resolve_bout(&attacker, &defender);
        let charged = r.resolve_charge(&attacker, &defender, &defender, &ReactionCapability::new(0, 0));
        assert!(charged.is_normalized(1e-6));
        assert!(charged.mean() < bout.mean());
    }

    #[test]
    fn reaction_that_wipes_the_attacker_skips_the_bout() {
        // Two attackers, certain hits, no saves possible.
        let cfg = SimConfig::default().with_confirm_threshold(7);
        let attacker = profile(2, 3, 4, 8);
        let defender = profile(5, 1, 1, 4);
        let dist = CombatResolver::new(cfg).unwrap().resolve_charge(
            &attacker,
            &defender,
            &defender,
            &ReactionCapability::new(0, 0),
        );
        assert!((dist.get(-5) - 1.0).abs() < 1e-12);
        assert!(dist.is_normalized(1e-12));
    }

    #[test]
    fn surviving_charge_is_the_bout_minus_reaction_wounds() {
        // Four shots that always wound, two wounds per attacking model.
        let cfg = SimConfig::default().with_confirm_threshold(7);
        let attacker = CombatProfile::new(5, 1, 4, 8, 2).unwrap();
        let defender = profile(4, 1, 4, 5);
        let shooting = profile(4, 1, 1, 6);
        let fire = ReactionCapability::new(0, 0);
        let mut r = CombatResolver::new(cfg).unwrap();

        let reaction = r.reaction_wound_distribution(&shooting, &attacker, &fire);
        assert!((reaction.get(4) - 1.0).abs() < 1e-12);

        let charged = r.resolve_charge(&attacker, &defender, &shooting, &fire);
        let bout = r.resolve_bout(&attacker.with_models(3), &defender);
        assert_eq!(charged.len(), bout.len());
        for (delta, p) in bout.iter() {
            assert!((charged.get(delta - 4) - p).abs() < 1e-12);
        }
        assert!(charged.is_normalized(1e-6));
    }

    #[test]
    fn one_sided_exchange_is_never_negative() {
        let mut r = resolver();
        let dist = r.resolve_exchange(
            &profile(8, 1, 4, 6),
            &profile(8, 1, 4, 6),
            &ReactionCapability::new(0, 0),
            &ReactionCapability::none(),
        );
        assert!(dist.iter().all(|(delta, _)| delta >= 0));
        assert!(dist.is_normalized(1e-9));
    }

    #[test]
    fn mirrored_exchange_is_symmetric() {
        let side = profile(6, 1, 4, 5);
        let fire = ReactionCapability::new(0, 0);
        let dist = resolver().resolve_exchange(&side, &side, &fire, &fire);
        for (delta, p) in dist.iter() {
            assert!((p - dist.get(-delta)).abs() < 1e-12);
        }
        assert!(dist.mean().abs() < 1e-12);
    }
}
