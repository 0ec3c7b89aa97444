use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use toxicity_sim::config::SimulationConfig;
use toxicity_sim::invariants;
use toxicity_sim::logic;
use toxicity_sim::simulator;
use toxicity_sim::types::{ReadingPolicy, ToxicityReading};

#[derive(Parser, Debug)]
#[command(name = "toxicity-sim", version, about = "Water toxicity severity classifier and simulator")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs randomized reading traces and checks every consistency invariant.
    Simulate {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        max_steps: Option<usize>,
        #[arg(long)]
        max_samples: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Clamp readings into 0-100 before classifying.
        #[arg(long)]
        clamp: bool,
    },
    /// Classifies readings and prints the gauge view and presentation as JSON.
    Classify {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
        #[arg(long)]
        clamp: bool,
    },
    /// Prints the dashboard summary tiles for a set of readings.
    Summary {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn policy_for(clamp: bool) -> ReadingPolicy {
    if clamp {
        ReadingPolicy::Clamp
    } else {
        ReadingPolicy::Passthrough
    }
}

fn checked(values: &[f64]) -> Result<Vec<f64>> {
    values
        .iter()
        .map(|&v| {
            ToxicityReading::new(v)
                .map(ToxicityReading::value)
                .with_context(|| format!("invalid reading {v}"))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Simulate {
            config,
            max_steps,
            max_samples,
            seed,
            clamp,
        } => {
            let mut settings = match config {
                Some(path) => SimulationConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => SimulationConfig::default(),
            };
            if let Some(n) = max_steps {
                settings.max_steps = n;
            }
            if let Some(n) = max_samples {
                settings.max_samples = n;
            }
            if seed.is_some() {
                settings.seed = seed;
            }
            if clamp {
                settings.policy = ReadingPolicy::Clamp;
            }
            settings.validate()?;

            println!("Water Toxicity Severity Simulator");
            println!("=================================");
            println!(
                "Running {} traces of {} steps each ({:?} policy)",
                settings.max_samples, settings.max_steps, settings.policy
            );
            if cli.verbose {
                println!("Verbose mode: showing first trace\n");
            }

            println!("Checking invariants:");
            for (name, _) in invariants::ALL_INVARIANTS {
                println!("  - {}", name);
            }

            let result = simulator::run_simulation(&settings, cli.verbose)?;
            println!("{}", result);
            if result.violation.is_some() {
                std::process::exit(1);
            }
        }
        Commands::Classify { values, clamp } => {
            let policy = policy_for(clamp);
            for value in checked(&values)? {
                let normalized = logic::normalize(value, policy);
                let gauge = logic::gauge_view(normalized);
                let presentation = logic::presentation_of(gauge.tier);
                let out = json!({
                    "input": value,
                    "gauge": gauge,
                    "presentation": presentation,
                    "alert": logic::alert_for("cli", normalized),
                });
                println!("{}", serde_json::to_string(&out)?);
            }
        }
        Commands::Summary { values } => {
            let summary = logic::summarize(&checked(&values)?);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
