//! pursuit - CLI entry point

use clap::{Parser, Subcommand};
use pursuit::checkpoint::{Checkpoint, CheckpointManager};
use pursuit::export::{export_alive_csv, export_positions_json};
use pursuit::{Config, RoundRecord, Simulation};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "pursuit")]
#[command(version)]
#[command(about = "Predator/prey pursuit simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by commands that run rounds
#[derive(clap::Args)]
struct RunOptions {
    /// Output directory for results and checkpoints
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pause after each round until Enter is pressed
    #[arg(short, long)]
    wait: bool,

    /// Quiet mode (no per-round status)
    #[arg(short, long)]
    quiet: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, value_name = "LEVEL")]
    log: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a new simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Maximum number of rounds
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Number of prey
        #[arg(short, long)]
        prey: Option<usize>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Resume a simulation from a checkpoint
    Resume {
        /// Checkpoint file, or an output directory to take its newest checkpoint
        #[arg(short, long)]
        checkpoint: PathBuf,

        /// Additional rounds allowed beyond those already played
        #[arg(short, long)]
        rounds: Option<u32>,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },

    /// Analyze a checkpoint file
    Analyze {
        /// Checkpoint file, or an output directory holding checkpoints
        checkpoint: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            rounds,
            prey,
            seed,
            options,
        } => run_simulation(config, rounds, prey, seed, options),

        Commands::Resume {
            checkpoint,
            rounds,
            options,
        } => resume_simulation(checkpoint, rounds, options),

        Commands::Init { output } => {
            init_logging(None, "info");
            generate_config(output)
        }

        Commands::Analyze { checkpoint } => {
            init_logging(None, "info");
            analyze_checkpoint(checkpoint)
        }
    }
}

fn init_logging(cli_level: Option<&str>, config_level: &str) {
    let level = cli_level.unwrap_or(config_level);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_simulation(
    config_path: PathBuf,
    rounds: Option<u32>,
    prey: Option<usize>,
    seed: Option<u64>,
    options: RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let mut config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    init_logging(options.log.as_deref(), &config.logging.log_level);

    if let Some(rounds) = rounds {
        config.simulation.max_rounds = rounds;
    }
    if let Some(count) = prey {
        config.prey.count = count;
    }
    if seed.is_some() {
        config.simulation.seed = seed;
    }
    if let Some(dir) = &options.output {
        config.output.directory = dir.clone();
    }

    let mut sim = Simulation::new(config)?;

    println!("Starting simulation");
    println!("  Prey: {}", sim.population.len());
    println!("  Max rounds: {}", sim.config.simulation.max_rounds);
    println!("  Seed: {}", sim.seed());
    println!();

    drive(&mut sim, &options)
}

fn resume_simulation(
    checkpoint_path: PathBuf,
    rounds: Option<u32>,
    options: RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let checkpoint_path = CheckpointManager::locate(&checkpoint_path)?;
    let checkpoint = Checkpoint::load(&checkpoint_path)?;
    init_logging(options.log.as_deref(), &checkpoint.config.logging.log_level);
    println!("Loaded checkpoint: {:?}", checkpoint_path);

    let mut sim = Simulation::from_checkpoint(checkpoint);
    if let Some(extra) = rounds {
        sim.extend_round_limit(extra);
    }
    if let Some(dir) = &options.output {
        sim.config.output.directory = dir.clone();
    }

    println!("Resumed at round {}", sim.round);
    println!("Alive prey: {}", sim.alive_count());
    println!("Round limit: {}", sim.config.simulation.max_rounds);
    println!();

    drive(&mut sim, &options)
}

/// Play rounds until termination, then export results and a final checkpoint
fn drive(sim: &mut Simulation, options: &RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let output = sim.config.output.directory.clone();
    std::fs::create_dir_all(&output)?;

    let mut checkpoint_mgr = CheckpointManager::new(
        &output,
        sim.config.output.checkpoint_interval,
        sim.config.output.keep_checkpoints,
    );

    let start = Instant::now();
    while let Some(record) = sim.step()? {
        if !options.quiet {
            print_round(&record);
        }

        if checkpoint_mgr.should_save(sim.round) {
            match checkpoint_mgr.save(&sim.create_checkpoint()) {
                Ok(path) => log::debug!("Checkpoint saved: {:?}", path),
                Err(e) => log::warn!("Checkpoint failed: {}", e),
            }
        }

        if options.wait && !sim.is_terminated() {
            wait_for_enter()?;
        }
    }

    let elapsed = start.elapsed();
    let reason = sim
        .termination_reason()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "running".to_string());

    println!("=== Simulation Complete ===");
    println!("Time: {:.3}s", elapsed.as_secs_f64());
    println!("Rounds: {}", sim.round);
    println!("Outcome: {}", reason);
    println!("Alive prey: {}", sim.alive_count());

    let positions_path = sim.config.positions_path();
    export_positions_json(&sim.history, &positions_path)?;
    println!("Positions: {:?}", positions_path);

    let alive_path = sim.config.alive_path();
    export_alive_csv(&sim.history, &alive_path)?;
    println!("Alive counts: {:?}", alive_path);

    let final_path = checkpoint_mgr.final_path();
    sim.create_checkpoint().save(&final_path)?;
    println!("Final checkpoint: {:?}", final_path);

    Ok(())
}

fn print_round(record: &RoundRecord) {
    println!("{}", record.summary());
    println!();
}

fn wait_for_enter() -> std::io::Result<()> {
    println!("Press Enter to continue...");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}

fn analyze_checkpoint<P: AsRef<Path>>(checkpoint_path: P) -> Result<(), Box<dyn std::error::Error>> {
    let checkpoint_path = CheckpointManager::locate(checkpoint_path)?;
    println!("=== Checkpoint Analysis ===");
    println!("File: {:?}", checkpoint_path);
    println!();

    let checkpoint = Checkpoint::load(&checkpoint_path)?;

    println!("Round: {}", checkpoint.round);
    println!("Status: {:?}", checkpoint.status);
    println!("Seed: {}", checkpoint.random_seed);
    println!();

    let population = &checkpoint.population;
    println!("Prey: {}", population.len());
    println!("Alive: {}", population.alive_count());
    println!("Captured: {:?}", population.captured_ids());

    let predator = checkpoint.predator.position();
    println!("Predator position: [{:.3}, {:.3}]", predator.x, predator.y);

    for (round, id) in checkpoint.history.captures() {
        println!("  round {:4}: captured prey {}", round, id);
    }

    println!();
    println!(
        "Checkpoint size: {:.2} KB",
        checkpoint.size_bytes() as f64 / 1_000.0
    );

    Ok(())
}
