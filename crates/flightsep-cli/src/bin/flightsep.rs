//! flightsep - detect separation conflicts and hotspots in a batch of flight plans.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flightsep_cli::{init_tracing, load_config, load_flights, summary_lines};
use flightsep_core::{waypoint_index, AnalysisConfig, AnalysisEngine, AnalysisResult, ExecutionMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan flights for conflicts and hotspots
    Analyze(AnalyzeArgs),
    /// List which flights file each route token
    Waypoints {
        /// Flights JSON file, or - for stdin
        #[arg(long, short)]
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Flights JSON file, or - for stdin
    #[arg(long, short)]
    input: PathBuf,

    /// Write the JSON result here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Analysis settings JSON; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spread samples across all cores
    #[arg(long)]
    parallel: bool,

    /// Minimum horizontal separation (NM)
    #[arg(long)]
    horizontal_nm: Option<f64>,

    /// Minimum vertical separation (ft)
    #[arg(long)]
    vertical_ft: Option<f64>,

    /// Sample spacing (seconds)
    #[arg(long)]
    interval: Option<f64>,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,

    /// Print a summary of the first N conflicts and hotspots to stderr
    #[arg(long, value_name = "N")]
    summary: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Waypoints { input } => {
            let flights = load_flights(&input)?;
            let index = waypoint_index(&flights);
            println!("{}", serde_json::to_string_pretty(&index)?);
            Ok(())
        }
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };
    if args.parallel {
        config.execution = ExecutionMode::Parallel;
    }
    if let Some(nm) = args.horizontal_nm {
        config.horizontal_threshold_nm = nm;
    }
    if let Some(ft) = args.vertical_ft {
        config.vertical_threshold_ft = ft;
    }
    if let Some(secs) = args.interval {
        config.sample_interval_seconds = secs;
    }

    let engine = AnalysisEngine::new(config).context("invalid analysis settings")?;
    let flights = load_flights(&args.input)?;
    let result = engine.analyze(&flights);

    if let Some(top) = args.summary {
        for line in summary_lines(&result, top) {
            eprintln!("{line}");
        }
    }

    write_result(&result, args.output.as_ref(), args.pretty)
}

fn write_result(result: &AnalysisResult, output: Option<&PathBuf>, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote analysis");
        }
        None => println!("{json}"),
    }
    Ok(())
}
