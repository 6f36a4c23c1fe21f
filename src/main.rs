//! Tennis match simulator CLI.
//!
//! Usage:
//!   tennis-sim [simulate] [OPTIONS]
//!   tennis-sim score <POINTS>
//!
//! Examples:
//!   tennis-sim                              # 1000 matches, A wins 65% of points
//!   tennis-sim simulate -n 500 -p 0.55      # 500 matches at 55%
//!   tennis-sim simulate --seed 42 --json    # Reproducible run, save JSON report
//!   tennis-sim score AAAABBBBAAAA           # Score a scripted point sequence

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tennis_sim::build_info;
use tennis_sim::config::{AppConfig, ConfigManager, MergeStrategy, DEFAULT_CONFIG_FOLDER};
use tennis_sim::{ScoreState, SimConfig, Side, Simulator};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tennis-sim", version)]
#[command(about = "Tennis scoring engine and Monte Carlo match simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config folder containing simulation.yml / tennis.yml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Merge config files key by key (deep) or per top-level section
    #[arg(long, global = true)]
    shallow_merge: bool,

    /// More output (-v: info logs, -vv: per-match lines and debug logs)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run a batch of simulated matches (default)
    Simulate(SimulateArgs),
    /// Score a scripted sequence of point winners
    Score(ScoreArgs),
}

#[derive(Args, Default)]
struct SimulateArgs {
    /// Number of matches to simulate
    #[arg(short = 'n', long)]
    runs: Option<u32>,

    /// Probability that side A wins a point (0.0 - 1.0)
    #[arg(short = 'p', long)]
    probability: Option<f64>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Sets in the match format (odd)
    #[arg(long)]
    best_of: Option<u32>,

    /// Save the report as sim_report_<timestamp>.json
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ScoreArgs {
    /// Point winners, e.g. "AABBA" or "A,B,player_1"
    points: String,

    /// Sets in the match format (odd)
    #[arg(long, default_value_t = 3)]
    best_of: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let strategy = if cli.shallow_merge {
        MergeStrategy::Shallow
    } else {
        MergeStrategy::Deep
    };
    let app_config = load_config(cli.config.as_deref(), strategy)?;

    match &cli.command {
        Some(Command::Score(args)) => score(args, &app_config),
        Some(Command::Simulate(args)) => simulate(args, &app_config, &cli),
        None => simulate(&SimulateArgs::default(), &app_config, &cli),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// An explicit `--config` folder must load; the default folder is optional.
fn load_config(folder: Option<&Path>, strategy: MergeStrategy) -> Result<AppConfig> {
    let (folder, explicit) = match folder {
        Some(folder) => (folder, true),
        None => (Path::new(DEFAULT_CONFIG_FOLDER), false),
    };

    if !explicit && !folder.is_dir() {
        tracing::debug!("no config folder at {}, using defaults", folder.display());
        return Ok(AppConfig::default());
    }

    let mut manager = ConfigManager::new(folder);
    let config = manager
        .load(strategy)
        .with_context(|| format!("loading configuration from {}", folder.display()))?;
    Ok(config.clone())
}

fn simulate(args: &SimulateArgs, app_config: &AppConfig, cli: &Cli) -> Result<()> {
    let mut config: SimConfig = app_config.simulation.to_sim_config();
    if let Some(runs) = args.runs {
        config.num_runs = runs;
    }
    if let Some(p) = args.probability {
        config.point_win_probability = p;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(best_of) = args.best_of {
        config.best_of_sets = best_of;
    }
    config.verbosity = match (cli.quiet, cli.verbose) {
        (true, _) => 0,
        (false, v) if v >= 2 => 2,
        _ => 1,
    };

    if config.verbosity > 0 {
        print_banner(&config);
    }

    let mut simulator = Simulator::from_config(config).context("invalid simulation settings")?;
    let report = simulator.run().context("simulation aborted")?;

    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("writing JSON report to {filename}"))?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

fn print_banner(config: &SimConfig) {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                 TENNIS MATCH SIMULATOR                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("{}", build_info::version_line());
    println!();
    println!("Configuration:");
    println!("  Matches:        {}", config.num_runs);
    println!("  P(A wins pt):   {}", config.point_win_probability);
    println!("  Best of:        {} sets", config.best_of_sets);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();
}

fn score(args: &ScoreArgs, app_config: &AppConfig) -> Result<()> {
    let sides = parse_points(&args.points)?;
    let mut state = ScoreState::best_of(args.best_of)?;
    state
        .replay(sides)
        .context("point sequence does not fit a single match")?;

    println!("{}", state.scoreboard(&app_config.tennis_score));
    let result = state.match_result()?;
    if !result.is_empty() {
        println!("Completed sets: {}", result);
    }
    match state.winner() {
        Some(side) => println!("Match won by side {}", side),
        None => println!("Match in progress"),
    }
    Ok(())
}

/// Comma/space separated identifiers, or one character per point.
fn parse_points(input: &str) -> Result<Vec<Side>> {
    let tokens: Vec<String> = if input.contains(|c: char| c == ',' || c.is_whitespace()) {
        input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        input.chars().map(String::from).collect()
    };

    tokens
        .iter()
        .map(|t| t.parse::<Side>().map_err(anyhow::Error::from))
        .collect()
}
