//! liftsim: elevator dispatch simulator.
//!
//! Builds a building from a JSON config, a seed CSV, the interactive menu or
//! the defaults, runs it for one simulated day and prints the report.
//!
//! ```text
//! liftsim                               # interactive menu
//! liftsim --defaults --out ./output     # generators on every floor, CSV output
//! liftsim --config building.json --seeds groups.csv
//! liftsim --defaults --replications 8   # summary over 8 independent runs
//! ```
//!
//! Verbosity follows `RUST_LOG` (default `warn`).

mod prompt;


use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lift_core::{BuildingConfig, SimRng};
use lift_dispatch::load_seeds_csv;
use lift_output::{CsvWriter, SimOutputObserver};
use lift_sim::{run_replications, NoopObserver, SimBuilder, SimReport};

use prompt::Prompter;

#[derive(Parser)]
#[command(name = "liftsim")]
#[command(about = "Discrete-event simulation of elevator dispatch in an office building")]
#[command(version)]
struct Cli {
    /// Building configuration as JSON (missing fields take their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Passenger groups released at time zero, CSV with `floor,group_size`
    #[arg(long)]
    seeds: Option<PathBuf>,

    /// Write trip_events.csv, elevators.csv and floor_queues.csv here
    #[arg(long)]
    out: Option<PathBuf>,

    /// Master RNG seed (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of independent runs with derived seeds
    #[arg(long, default_value_t = 1, conflicts_with = "out")]
    replications: u64,

    /// Skip the interactive menu
    #[arg(long)]
    defaults: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    info!(?config, "configuration resolved");

    if cli.replications > 1 {
        let seeds: Vec<u64> =
            (0..cli.replications).map(|k| SimRng::replication_seed(config.rng_seed, k)).collect();
        let reports = run_replications(&config, &seeds)?;
        print!("{}", replication_summary(&seeds, &reports));
        return Ok(());
    }

    let mut sim = SimBuilder::new(config).build()?;
    let report = match &cli.out {
        Some(dir) => {
            let writer = CsvWriter::new(dir).with_context(|| format!("opening output in {}", dir.display()))?;
            let mut observer = SimOutputObserver::new(writer);
            let report = sim.run(&mut observer)?;
            if let Some(e) = observer.take_error() {
                bail!("writing output to {}: {e}", dir.display());
            }
            report
        }
        None => sim.run(&mut NoopObserver)?,
    };

    print!("{report}");
    if report.passengers.in_flight > 0 {
        warn!(in_flight = report.passengers.in_flight, "passengers still travelling at the horizon");
    }
    Ok(())
}

/// Layer the configuration sources: JSON file (or defaults), then the seed
/// CSV, then the interactive menu when nothing else pinned the scenario,
/// then `--seed`.
fn resolve_config(cli: &Cli) -> Result<BuildingConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => BuildingConfig::default(),
    };

    if let Some(path) = &cli.seeds {
        config.arrival_seeds =
            load_seeds_csv(path).with_context(|| format!("loading seeds from {}", path.display()))?;
    } else if cli.config.is_none() && !cli.defaults {
        let stdin = std::io::stdin();
        Prompter::new(stdin.lock(), std::io::stdout()).collect(&mut config)?;
    }

    if let Some(seed) = cli.seed {
        config.rng_seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<BuildingConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))
}

fn replication_summary(seeds: &[u64], reports: &[SimReport]) -> String {
    let mut out = format!(
        "{:<22} {:>9} {:>9} {:>10} {:>10} {:>9}\n",
        "seed", "generated", "delivered", "mean wait", "mean ride", "mean occ"
    );
    for (seed, r) in seeds.iter().zip(reports) {
        out += &format!(
            "{:<22} {:>9} {:>9} {:>10.3} {:>10.3} {:>9.3}\n",
            seed,
            r.passengers.generated,
            r.passengers.delivered,
            r.passengers.mean_wait,
            r.passengers.mean_ride,
            r.mean_over_elevators(|e| e.mean_occupancy),
        );
    }
    if !reports.is_empty() {
        let n = reports.len() as f64;
        let mean = |f: &dyn Fn(&SimReport) -> f64| reports.iter().map(f).sum::<f64>() / n;
        out += &format!(
            "{:<22} {:>9.1} {:>9.1} {:>10.3} {:>10.3} {:>9.3}\n",
            "mean",
            mean(&|r| r.passengers.generated as f64),
            mean(&|r| r.passengers.delivered as f64),
            mean(&|r| r.passengers.mean_wait),
            mean(&|r| r.passengers.mean_ride),
            mean(&|r| r.mean_over_elevators(|e| e.mean_occupancy)),
        );
    }
    out
}
