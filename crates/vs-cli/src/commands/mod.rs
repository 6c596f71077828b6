pub mod melee;
pub mod roll;
pub mod shoot;
pub mod units;

use std::path::{Path, PathBuf};

use clap::Args;
use vs_core::{Roster, Unit, WeaponKind};
use vs_mechanics::{OutcomeDistribution, SimConfig, TieBreak};

/// Flags shared by the melee and shooting commands.
#[derive(Args)]
pub struct Matchup {
    /// Roster file (JSON array of units)
    #[arg(short, long)]
    pub roster: PathBuf,

    /// Name of the attacking unit (case-insensitive)
    #[arg(short, long)]
    pub attacker: String,

    /// Name of the defending unit (case-insensitive)
    #[arg(short, long)]
    pub defender: String,

    /// Override the attacker's weapon
    #[arg(long)]
    pub attacker_weapon: Option<String>,

    /// Override the defender's weapon
    #[arg(long)]
    pub defender_weapon: Option<String>,

    /// The attacker carries a powder smoke token
    #[arg(long)]
    pub attacker_smoke: bool,

    /// The defender carries a powder smoke token
    #[arg(long)]
    pub defender_smoke: bool,

    /// How many times a tied bout is re-fought
    #[arg(long, default_value = "6")]
    pub max_depth: u32,

    /// What a bout still tied at the depth cap becomes: split or draw
    #[arg(long, default_value = "split")]
    pub tie_break: String,

    /// Apply weapon to-hit modifiers in melee (close combat hits on one less)
    #[arg(long)]
    pub melee_modifiers: bool,

    /// Print the raw distribution as JSON
    #[arg(long)]
    pub json: bool,
}

impl Matchup {
    /// Load both units from the roster and apply the command-line overrides.
    fn units(&self) -> Result<(Unit, Unit), String> {
        let roster = load_roster(&self.roster)?;
        let attacker = prepare(
            roster.require(&self.attacker).map_err(|e| e.to_string())?,
            self.attacker_weapon.as_deref(),
            self.attacker_smoke,
        )?;
        let defender = prepare(
            roster.require(&self.defender).map_err(|e| e.to_string())?,
            self.defender_weapon.as_deref(),
            self.defender_smoke,
        )?;
        Ok((attacker, defender))
    }

    fn config(&self) -> Result<SimConfig, String> {
        let tie_break = self
            .tie_break
            .parse::<TieBreak>()
            .map_err(|e| e.to_string())?;
        Ok(SimConfig::default()
            .with_max_depth(self.max_depth)
            .with_tie_break(tie_break)
            .with_weapon_melee_modifiers(self.melee_modifiers))
    }
}

fn load_roster(path: &Path) -> Result<Roster, String> {
    Roster::load(path).map_err(|e| format!("{}: {e}", path.display()))
}

fn prepare(unit: &Unit, weapon: Option<&str>, smoke: bool) -> Result<Unit, String> {
    let mut unit = unit.clone();
    if let Some(name) = weapon {
        unit.weapon = name.parse::<WeaponKind>().map_err(|e| e.to_string())?;
    }
    if smoke {
        unit.powder_smoke = true;
    }
    Ok(unit)
}

/// Print the distribution as a JSON object keyed by delta.
fn print_json(result: &OutcomeDistribution) -> Result<(), String> {
    let json = serde_json::to_string_pretty(result).map_err(|e| format!("JSON error: {e}"))?;
    println!("{json}");
    Ok(())
}
