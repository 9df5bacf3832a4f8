use clap::{Args, Parser, Subcommand};
use std::ops::ControlFlow;
use std::time::Duration;
use watersim_core::{EntityView, SimConfig, Simulation, StopCondition, TickDriver};

#[derive(Parser)]
#[command(name = "watersim")]
#[command(about = "watersim - hydrogen and oxygen atoms bouncing in a box until they form water", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation headlessly and report what formed
    Run {
        #[command(flatten)]
        sim: SimArgs,

        /// Number of ticks to run
        #[arg(long, default_value_t = 5000)]
        ticks: u64,

        /// Delay between ticks in milliseconds (0 runs unpaced)
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,

        /// Stop early once no further water can form
        #[arg(long)]
        until_exhausted: bool,

        /// Print every entity after each tick
        #[arg(long)]
        trace: bool,
    },
}

#[derive(Args)]
struct SimArgs {
    /// Initial hydrogen atoms
    #[arg(long = "hydrogen", default_value_t = 6, allow_negative_numbers = true)]
    hydrogen_count: i64,

    /// Initial oxygen atoms
    #[arg(long = "oxygen", default_value_t = 3, allow_negative_numbers = true)]
    oxygen_count: i64,

    /// Domain half-width
    #[arg(long = "width", default_value_t = 380.0)]
    half_width: f64,

    /// Domain half-height
    #[arg(long = "height", default_value_t = 280.0)]
    half_height: f64,

    #[arg(long, default_value_t = 10.0)]
    atom_radius: f64,

    #[arg(long, default_value_t = 20.0)]
    molecule_radius: f64,

    /// Hydrogen-oxygen distance below which water forms
    #[arg(long, default_value_t = 50.0)]
    threshold: f64,

    /// Velocity components are drawn from [-range, range]
    #[arg(long, default_value_t = 2.0)]
    velocity_range: f64,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl SimArgs {
    fn to_config(&self) -> SimConfig {
        SimConfig {
            hydrogen_count: self.hydrogen_count,
            oxygen_count: self.oxygen_count,
            domain_half_width: self.half_width,
            domain_half_height: self.half_height,
            atom_radius: self.atom_radius,
            molecule_radius: self.molecule_radius,
            combination_threshold: self.threshold,
            velocity_range: self.velocity_range,
            seed: self.seed,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            sim,
            ticks,
            delay_ms,
            until_exhausted,
            trace,
        } => {
            let mut driver = TickDriver::new(ticks);
            if delay_ms > 0 {
                driver = driver.with_interval(Duration::from_millis(delay_ms));
            }
            if until_exhausted {
                driver = driver.with_stop(StopCondition::Exhausted);
            }

            match run(sim.to_config(), &driver, trace) {
                Ok(()) => {}
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn run(
    config: SimConfig,
    driver: &TickDriver,
    trace: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = Simulation::from_config(config)?;

    let executed = driver.run(&mut sim, |sim, snapshot| {
        if let Some(record) = sim.last_combination() {
            if record.tick == sim.tick() {
                println!(
                    "tick {}: water {} formed at ({:.1}, {:.1})",
                    record.tick, record.molecule, record.position.x, record.position.y
                );
            }
        }
        if trace {
            print_snapshot(sim.tick(), snapshot);
        }
        ControlFlow::Continue(())
    });

    log::info!("stopped after {} ticks", executed);
    println!("ticks = {}", executed);
    println!("atoms = {}", sim.atom_count());
    println!("water = {}", sim.molecule_count());

    Ok(())
}

fn print_snapshot(tick: u64, snapshot: &[EntityView]) {
    for e in snapshot {
        println!(
            "{} {} {} {:.3} {:.3} {:.3} {:.3} {}",
            tick,
            e.id,
            e.kind.category(),
            e.position.x,
            e.position.y,
            e.velocity.x,
            e.velocity.y,
            e.kind.color_hint()
        );
    }
}
