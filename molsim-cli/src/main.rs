use clap::{Parser, Subcommand};
use molsim_core::{Bounds, Preset, Scenario, Simulation, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

mod runner;

use runner::{run_simulation, RunOptions};

#[derive(Parser)]
#[command(name = "molsim")]
#[command(about = "Molecular dynamics sandbox - headless runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file
    Run {
        /// Path to the scenario (TOML)
        file: PathBuf,
        /// Override the number of ticks to run
        #[arg(long)]
        ticks: Option<u64>,
        /// Print statistics every N ticks
        #[arg(long)]
        every: Option<u64>,
        /// Pace ticks against the wall clock
        #[arg(long)]
        realtime: bool,
        /// Seed for presets and random spawns
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Fill a default world with a preset and run it
    Preset {
        /// solid, liquid or gas
        preset: Preset,
        #[arg(long, default_value_t = 600)]
        ticks: u64,
        #[arg(long, default_value_t = 60)]
        every: u64,
        #[arg(long, default_value_t = 500.0)]
        width: f32,
        #[arg(long, default_value_t = 400.0)]
        height: f32,
        #[arg(long, default_value_t = 2.0)]
        gravity: f32,
        #[arg(long)]
        realtime: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run {
            file,
            ticks,
            every,
            realtime,
            seed,
        } => run_file(&file, ticks, every, realtime, seed),
        Commands::Preset {
            preset,
            ticks,
            every,
            width,
            height,
            gravity,
            realtime,
            seed,
        } => {
            let options = RunOptions {
                ticks,
                report_every: every,
                realtime,
            };
            run_preset(preset, width, height, gravity, seed, &options)
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_file(
    file: &PathBuf,
    ticks: Option<u64>,
    every: Option<u64>,
    realtime: bool,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::load_from_file(file)?;
    let mut rng = rng_from(seed.or(scenario.run.seed));
    let world = scenario.build_world(&mut rng)?;

    let options = RunOptions {
        ticks: ticks.unwrap_or(scenario.run.ticks),
        report_every: every.unwrap_or(scenario.run.report_every),
        realtime,
    };
    run_simulation(Simulation::new(world), &options);
    Ok(())
}

fn run_preset(
    preset: Preset,
    width: f32,
    height: f32,
    gravity: f32,
    seed: Option<u64>,
    options: &RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if !(width > 0.0 && height > 0.0) {
        return Err(format!("world size must be positive, got {} x {}", width, height).into());
    }
    let mut world = World::new(Bounds::from_size(width, height));
    world.set_gravity(gravity);
    let mut rng = rng_from(seed);
    preset.populate(&mut world, &mut rng);

    run_simulation(Simulation::new(world), options);
    Ok(())
}
