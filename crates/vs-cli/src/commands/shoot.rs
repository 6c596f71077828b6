use colored::Colorize;
use vs_mechanics::{ShootingSimulator, Simulator};

use super::{Matchup, print_json};

pub fn run(matchup: &Matchup) -> Result<(), String> {
    let (attacker, defender) = matchup.units()?;
    let mut sim = ShootingSimulator::from_units(&attacker, &defender, matchup.config()?)
        .map_err(|e| e.to_string())?;

    if !sim.can_engage() {
        let reason = if attacker.can_fire() {
            "both units need living models"
        } else {
            "its weapon cannot fire"
        };
        return Err(format!(
            "{} cannot shoot at {}: {reason}",
            attacker.name, defender.name
        ));
    }

    if matchup.json {
        return print_json(sim.get_result());
    }

    println!("{}", sim.describe());
    if !sim.is_exchange() {
        println!();
        println!(
            "  {}",
            format!("{} cannot return fire.", defender.name).dimmed()
        );
    }

    Ok(())
}
