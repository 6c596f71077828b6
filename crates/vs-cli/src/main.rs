//! CLI frontend for the VonSneg combat odds engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "vs",
    about = "VonSneg: exact combat odds for tabletop skirmishes",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Odds of a melee charge, including the defender's stand and shoot
    Melee(commands::Matchup),

    /// Odds of one round of shooting
    Shoot(commands::Matchup),

    /// Exact success distribution for a pool of d6
    Roll {
        /// Number of dice
        #[arg(short, long)]
        dice: u32,

        /// Success threshold before modifiers
        #[arg(short, long)]
        target: i32,

        /// Added to the threshold (positive is harder)
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        modifier: i32,

        /// RNG seed for the sampled rolls
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Number of sampled rolls to show alongside the exact odds
        #[arg(long, default_value = "0")]
        samples: u32,
    },

    /// List the units in a roster
    Units {
        /// Roster file (JSON array of units)
        #[arg(short, long)]
        roster: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Melee(matchup) => commands::melee::run(&matchup),
        Commands::Shoot(matchup) => commands::shoot::run(&matchup),
        Commands::Roll {
            dice,
            target,
            modifier,
            seed,
            samples,
        } => commands::roll::run(dice, target, modifier, seed, samples),
        Commands::Units { roster } => commands::units::run(&roster),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
