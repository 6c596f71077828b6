use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;
use vs_mechanics::{Die, Roller};

pub fn run(dice: u32, target: i32, modifier: i32, seed: u64, samples: u32) -> Result<(), String> {
    let roller = Roller::new(Die::D6).map_err(|e| e.to_string())?;
    let threshold = target.saturating_add(modifier);
    let dist = roller.distribution(dice, threshold);

    let rule = if roller.is_two_stage(threshold) {
        format!("a 6, then {}+", vs_mechanics::config::DEFAULT_CONFIRM_THRESHOLD)
    } else {
        format!("{threshold}+")
    };
    println!(
        "  {} {dice}{} needing {rule} {}",
        "Roll".bold(),
        roller.die(),
        format!(
            "(chance per die {:.1}%)",
            roller.success_chance(threshold) * 100.0
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Successes", "Exactly", "At least"]);

    let mut at_least = 1.0_f64;
    for (successes, p) in dist.iter() {
        table.add_row(vec![
            successes.to_string(),
            format!("{:.2}%", p * 100.0),
            format!("{:.2}%", at_least.max(0.0) * 100.0),
        ]);
        at_least -= p;
    }

    println!("{table}");
    println!();
    println!("  Expected successes: {:.2}", dist.mean());

    if samples > 0 {
        let mut rng = StdRng::seed_from_u64(seed);
        let rolled: Vec<String> = (0..samples)
            .map(|_| roller.simulate(&mut rng, dice, threshold).to_string())
            .collect();
        println!(
            "  Sampled (seed {seed}): {}",
            rolled.join(", ").cyan()
        );
    }

    Ok(())
}
