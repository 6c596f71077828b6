//! Melee bouts: attack, counter-attack, and re-fighting ties.
//!
//! A bout is decided as soon as one side has inflicted more wounds than the
//! other or has been wiped out. A tie leaves both sides' model counts
//! untouched, so the re-fought bout is the same bout again. That lets every
//! branch be computed once and the ties carried forward as a single weight
//! per depth rather than a call stack of identical frames.

use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use super::{CombatResolver, signed};
use crate::combat::CombatProfile;
use crate::config::TieBreak;
use crate::distribution::OutcomeDistribution;

/// One joint outcome of a single bout.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Branch {
    /// Probability of this branch within one bout.
    mass: f64,
    /// Net delta if decided, `None` on a tie.
    outcome: Option<i32>,
    /// Whether the branch may be dropped once its weighted mass is tiny.
    prunable: bool,
}

impl CombatResolver {
    /// Distribution of the net delta when `attacker` fights `defender` in
    /// melee, re-fighting ties up to the configured depth.
    ///
    /// A side with no models loses outright by one.
    pub fn resolve_bout(
        &mut self,
        attacker: &CombatProfile,
        defender: &CombatProfile,
    ) -> OutcomeDistribution {
        if !attacker.is_alive() {
            return OutcomeDistribution::point(-1);
        }
        if !defender.is_alive() {
            return OutcomeDistribution::point(1);
        }

        debug!(
            attacker_models = attacker.models(),
            defender_models = defender.models(),
            "resolving bout"
        );

        let branches = self.bout_branches(attacker, defender);
        let max_depth = self.config.max_depth;
        let prune_below = self.config.prune_below;

        let mut result = OutcomeDistribution::new();
        let mut weight = 1.0;
        for depth in 0..=max_depth {
            let mut tied = 0.0;
            for branch in &branches {
                let mass = weight * branch.mass;
                if mass == 0.0 || (branch.prunable && mass < prune_below) {
                    continue;
                }
                match branch.outcome {
                    Some(delta) => result.add(delta, mass),
                    None => tied += mass,
                }
            }

            if tied == 0.0 {
                break;
            }
            if depth == max_depth {
                trace!(depth, mass = tied, policy = %self.config.tie_break, "tie at depth cap");
                apply_tie_break(&mut result, self.config.tie_break, tied);
            }
            weight = tied;
        }

        let total = result.total_mass();
        if !result.is_normalized(self.config.mass_tolerance) {
            warn!(total_mass = total, "bout distribution drifted from 1.0");
        }
        debug!(total_mass = total, outcomes = result.len(), "bout resolved");
        result
    }

    /// Every joint outcome of one bout between the two profiles.
    fn bout_branches(&mut self, attacker: &CombatProfile, defender: &CombatProfile) -> Vec<Branch> {
        let strikes = self.wound_distribution(
            attacker.total_attacks(),
            attacker.accuracy_threshold(),
            defender.save_threshold(),
        );

        let mut branches = Vec::new();
        for (dealt, p_dealt) in strikes.iter() {
            if p_dealt == 0.0 {
                continue;
            }
            let defender_left = defender
                .models()
                .saturating_sub(dealt / defender.wounds_per_model());
            let survivors = defender.with_models(defender_left);
            if survivors.total_attacks() == 0 {
                branches.push(Branch {
                    mass: p_dealt,
                    outcome: Some(signed(dealt)),
                    prunable: false,
                });
                continue;
            }

            let counters = self.wound_distribution(
                survivors.total_attacks(),
                survivors.accuracy_threshold(),
                attacker.save_threshold(),
            );
            for (taken, p_taken) in counters.iter() {
                let attacker_left = attacker
                    .models()
                    .saturating_sub(taken / attacker.wounds_per_model());
                branches.push(Branch {
                    mass: p_dealt * p_taken,
                    outcome: classify(dealt, taken, defender_left, attacker_left),
                    prunable: true,
                });
            }
        }
        branches
    }
}

/// Net delta of a bout branch, or `None` if it is tied.
///
/// The order of the checks matters: a wiped defender scores the wounds
/// dealt even if the attacker was also hurt.
fn classify(dealt: u32, taken: u32, defender_left: u32, attacker_left: u32) -> Option<i32> {
    if defender_left == 0 {
        return Some(signed(dealt));
    }
    if attacker_left == 0 {
        return Some(-signed(taken));
    }
    match dealt.cmp(&taken) {
        Ordering::Greater => Some(signed(dealt - taken)),
        Ordering::Less => Some(-signed(taken - dealt)),
        Ordering::Equal => None,
    }
}

fn apply_tie_break(result: &mut OutcomeDistribution, policy: TieBreak, mass: f64) {
    match policy {
        TieBreak::Split => {
            result.add(1, mass * 0.5);
            result.add(-1, mass * 0.5);
        }
        TieBreak::Draw => result.add(0, mass),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn resolver() -> CombatResolver {
        CombatResolver::new(SimConfig::default()).unwrap()
    }

    fn profile(models: u32, attacks: u32, to_hit: i32, save: i32, wounds: u32) -> CombatProfile {
        CombatProfile::new(models, attacks, to_hit, save, wounds).unwrap()
    }

    #[test]
    fn dead_attacker_loses_by_one() {
        let dist = resolver().resolve_bout(&profile(0, 2, 4, 5, 1), &profile(3, 2, 4, 5, 1));
        assert_eq!(dist, OutcomeDistribution::point(-1));
    }

    #[test]
    fn dead_defender_loses_by_one() {
        let dist = resolver().resolve_bout(&profile(3, 2, 4, 5, 1), &profile(0, 2, 4, 5, 1));
        assert_eq!(dist, OutcomeDistribution::point(1));
    }

    #[test]
    fn attacker_with_save_edge_comes_out_ahead() {
        let attacker = profile(6, 2, 4, 6, 1);
        let defender = profile(6, 2, 4, 5, 1);
        let dist = resolver().resolve_bout(&attacker, &defender);
        assert!(dist.is_normalized(1e-6));
        assert!(dist.mean() > 0.0);
    }

    #[test]
    fn mirrored_sides_without_casualties_are_symmetric() {
        // Three wounds per model and at most two wounds per bout: nobody dies.
        let side = profile(2, 1, 4, 5, 3);
        let dist = resolver().resolve_bout(&side, &side);
        assert!(dist.is_normalized(1e-9));
        for (delta, p) in dist.iter() {
            assert!((p - dist.get(-delta)).abs() < 1e-9, "asymmetric at {delta}");
        }
    }

    #[test]
    fn permanent_tie_splits_evenly() {
        let cfg = SimConfig::default().with_confirm_threshold(7);
        let side = profile(3, 1, 7, 4, 1);
        let dist = CombatResolver::new(cfg).unwrap().resolve_bout(&side, &side);
        assert!((dist.get(1) - 0.5).abs() < 1e-12);
        assert!((dist.get(-1) - 0.5).abs() < 1e-12);
        assert_eq!(dist.get(0), 0.0);
    }

    #[test]
    fn permanent_tie_can_be_a_draw() {
        let cfg = SimConfig::default()
            .with_confirm_threshold(7)
            .with_tie_break(TieBreak::Draw);
        let side = profile(3, 1, 7, 4, 1);
        let dist = CombatResolver::new(cfg).unwrap().resolve_bout(&side, &side);
        assert!((dist.get(0) - 1.0).abs() < 1e-12);
        assert_eq!(dist.win_probability() + dist.loss_probability(), 0.0);
    }

    #[test]
    fn unarmed_defender_scores_nothing_back() {
        let attacker = profile(4, 1, 4, 6, 1);
        let defender = profile(4, 0, 4, 6, 1);
        let dist = resolver().resolve_bout(&attacker, &defender);
        assert!(dist.iter().all(|(delta, _)| delta >= 0));
        assert!(dist.is_normalized(1e-9));
    }

    #[test]
    fn wiping_the_defender_scores_wounds_dealt() {
        // One wound per model, hits always land, saves never made.
        let cfg = SimConfig::default().with_confirm_threshold(7);
        let attacker = profile(2, 1, 1, 8, 1);
        let defender = profile(2, 5, 1, 8, 1);
        let dist = CombatResolver::new(cfg).unwrap().resolve_bout(&attacker, &defender);
        assert!((dist.get(2) - 1.0).abs() < 1e-12);
        assert!(dist.is_normalized(1e-12));
    }

    #[test]
    fn depth_zero_breaks_ties_immediately() {
        let side = profile(2, 1, 4, 5, 3);
        let shallow = CombatResolver::new(SimConfig::default().with_max_depth(0))
            .unwrap()
            .resolve_bout(&side, &side);
        let deep = resolver().resolve_bout(&side, &side);
        assert!(shallow.is_normalized(1e-9));
        assert!(shallow.get(1) > deep.get(1));
    }

    #[test]
    fn classify_precedence() {
        assert_eq!(classify(3, 5, 0, 0), Some(3));
        assert_eq!(classify(1, 4, 2, 0), Some(-4));
        assert_eq!(classify(3, 1, 2, 2), Some(2));
        assert_eq!(classify(1, 3, 2, 2), Some(-2));
        assert_eq!(classify(2, 2, 2, 2), None);
    }
}
