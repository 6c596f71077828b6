use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(roster: &Path) -> Result<(), String> {
    let roster = super::load_roster(roster)?;

    if roster.is_empty() {
        println!("  No units found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Name", "Type", "Models", "A", "I", "V", "W", "Weapon", "Traits",
    ]);

    for unit in roster.units() {
        let unit_type = if unit.unit_type.is_empty() {
            "—".to_string()
        } else {
            unit.unit_type.clone()
        };
        let traits = if unit.traits.is_empty() {
            "—".to_string()
        } else {
            unit.traits
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let weapon = if unit.powder_smoke {
            format!("{} (smoke)", unit.weapon)
        } else {
            unit.weapon.to_string()
        };

        table.add_row(vec![
            unit.name.clone(),
            unit_type,
            unit.models.to_string(),
            unit.stats.attacks.to_string(),
            unit.stats.inaccuracy.to_string(),
            unit.stats.save.to_string(),
            unit.stats.wounds.to_string(),
            weapon,
            traits,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} units", roster.len());

    Ok(())
}
