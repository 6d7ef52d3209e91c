//! Chicken Simulation Engine
//!
//! Runs a population of adaptive agents through repeated rounds of chicken
//! and writes the terminal results ledger as JSON.

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use chicken_core::config::{ConfigError, SimConfig, DEFAULT_CONFIG_PATH};
use chicken_core::output::{write_results, OutputError, DEFAULT_RESULTS_PATH};
use chicken_core::{
    IdAllocator, LedgerError, ResultsLedger, SeededUuids, SequentialIds, Simulation,
};

/// How agent identifiers are allocated
#[derive(Debug, Clone, Copy, ValueEnum)]
enum IdScheme {
    Sequential,
    Uuid,
}

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "chicken_sim")]
#[command(about = "Adaptive agents playing repeated games of chicken")]
struct Args {
    /// TOML configuration file (chicken.toml if present, else built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds to play (overrides the config file)
    #[arg(long)]
    rounds: Option<u64>,

    /// Where to write the results ledger
    #[arg(long, default_value = DEFAULT_RESULTS_PATH)]
    output: PathBuf,

    /// Agent identifier scheme
    #[arg(long, value_enum, default_value_t = IdScheme::Sequential)]
    ids: IdScheme,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("simulation aborted: {0}")]
    Ledger(#[from] LedgerError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), RunError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => SimConfig::load(DEFAULT_CONFIG_PATH)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(rounds) = args.rounds {
        config.simulation.rounds = rounds;
    }

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let mut ids: Box<dyn IdAllocator> = match args.ids {
        IdScheme::Sequential => Box::new(SequentialIds::new()),
        IdScheme::Uuid => Box::new(SeededUuids::new(config.simulation.seed)),
    };

    println!("Chicken Simulation");
    println!("==================");
    println!("Seed: {}", config.simulation.seed);
    println!("Rounds: {}", config.simulation.rounds);
    println!();

    let mut sim = Simulation::new(&config, ids.as_mut())?;
    println!("Spawned {} agents", sim.population().total_agents);
    for (memory, count) in &sim.population().by_memory {
        println!("  memory {:>3}: {}", memory, count);
    }

    sim.run(config.simulation.rounds)?;

    let mut ledger = ResultsLedger::new();
    sim.collect_results(&mut ledger);
    let results = ledger.summarize(config.simulation.seed, sim.current_round());

    println!();
    println!("{:>8} {:>8} {:>12} {:>10}", "memory", "agents", "mean payoff", "swerve %");
    for cohort in &results.cohorts {
        println!(
            "{:>8} {:>8} {:>12.2} {:>10.1}",
            cohort.memory,
            cohort.agent_count,
            cohort.mean_payoff,
            cohort.swerve_share * 100.0
        );
    }

    write_results(&results, &args.output)?;
    println!();
    println!("Wrote {}", args.output.display());
    Ok(())
}
