use colored::Colorize;
use vs_mechanics::{MeleeSimulator, Simulator};

use super::{Matchup, print_json};

pub fn run(matchup: &Matchup) -> Result<(), String> {
    let (attacker, defender) = matchup.units()?;
    let mut sim = MeleeSimulator::from_units(&attacker, &defender, matchup.config()?)
        .map_err(|e| e.to_string())?;

    if !sim.can_engage() {
        return Err(format!(
            "{} cannot charge {}: both units need living models",
            attacker.name, defender.name
        ));
    }

    if matchup.json {
        return print_json(sim.get_result());
    }

    println!("{}", sim.describe());
    println!();

    let result = sim.get_result();
    let (win, lose) = (result.win_probability(), result.loss_probability());
    let verdict = if win > lose {
        format!("{} favoured ({:.1}%)", attacker.name, win * 100.0).green()
    } else if lose > win {
        format!("{} favoured ({:.1}%)", defender.name, lose * 100.0).red()
    } else {
        "Even odds".yellow()
    };
    println!("  {}", verdict.bold());

    Ok(())
}
