use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use u_timetable::models::TimetableEntry;
use u_timetable::slots::{PracticalPairBuilder, SplitReport, TimeSlotSplitter};
use u_timetable::store::{MemoryStore, TimetableStore};
use u_timetable::{GenerationOutcome, TimetableConfig, TimetableGenerator};

#[derive(Debug, Parser)]
#[command(name = "u-timetable", version, about = "Genetic-search timetable generation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split pending time windows into atomic slots and build practical pairs.
    Split {
        /// JSON store snapshot.
        #[arg(long)]
        data: PathBuf,
        /// TOML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Where to write the updated snapshot.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a timetable.
    Generate {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Fixes the random seed.
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct SplitOutput {
    split: SplitReport,
}

#[derive(Serialize)]
struct GenerateOutput {
    outcome: GenerationOutcome,
    timetable: Vec<TimetableEntry>,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load(data: &Path, config: Option<&Path>) -> Result<(MemoryStore, TimetableConfig), String> {
    let config = match config {
        Some(path) => TimetableConfig::load(path).map_err(|e| e.to_string())?,
        None => TimetableConfig::default(),
    };
    let store = MemoryStore::load(data)
        .map_err(|e| e.to_string())?
        .with_max_hours_per_week(config.max_hours_per_week);
    store.validate().map_err(|e| e.to_string())?;
    Ok((store, config))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn run(cli: Cli) -> Result<bool, String> {
    match cli.command {
        Command::Split { data, config, out } => {
            let (mut store, config) = load(&data, config.as_deref())?;
            let splitter = TimeSlotSplitter::new(PracticalPairBuilder::new(config.pairing));
            let split = splitter.split_pending(&mut store).map_err(|e| e.to_string())?;
            if let Some(out) = out {
                store.save(out).map_err(|e| e.to_string())?;
            }
            print_json(&SplitOutput { split })?;
            Ok(true)
        }
        Command::Generate {
            data,
            config,
            seed,
            out,
        } => {
            let (mut store, mut config) = load(&data, config.as_deref())?;
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            let outcome = TimetableGenerator::new(config).generate(&mut store);
            let timetable = store.timetable().map_err(|e| e.to_string())?;
            if let Some(out) = out {
                store.save(out).map_err(|e| e.to_string())?;
            }
            let ok = outcome.is_success();
            print_json(&GenerateOutput { outcome, timetable })?;
            Ok(ok)
        }
    }
}

fn main() -> ExitCode {
    enable_tracing();
    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "u-timetable failed");
            ExitCode::FAILURE
        }
    }
}
