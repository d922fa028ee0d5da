//! Main entry point for the league-skill ratings run
//!
//! Loads configuration, ingests the roster and results datasets in order,
//! replays the whole history, writes the ratings CSV and prints the audits.

use anyhow::{anyhow, Result};
use clap::Parser;
use league_skill::config::{validate_config, AppConfig, DatasetPaths};
use league_skill::ingest::ingest_all;
use league_skill::report::{
    incomplete_players, player_summary, tournaments_by_year, write_ratings_file,
};
use league_skill::LeagueHistory;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// League Skill - historical TrueSkill ratings for team leagues
#[derive(Parser)]
#[command(
    name = "league-skill",
    version,
    about = "Replay a league's match history and rate every player with TrueSkill",
    long_about = "league-skill ingests per-tournament roster files and match result files, \
                 replays every game in chronological order through a two-team TrueSkill \
                 model, and writes a per-player ratings CSV with a snapshot per tournament."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Datasets to ingest, in order
    #[arg(
        long = "dataset",
        value_name = "PLAYERS,MATCHES",
        help = "Roster CSV and results CSV, comma separated; repeat for more datasets"
    )]
    datasets: Vec<String>,

    /// Output file override
    #[arg(short, long, value_name = "FILE", help = "Where to write the ratings CSV")]
    output: Option<PathBuf>,

    /// Players to summarize
    #[arg(
        long = "summary",
        value_name = "NAME",
        help = "Print teammate and opponent totals for a player; may be repeated"
    )]
    summaries: Vec<String>,

    /// Minimum games against an opponent in a summary
    #[arg(long, value_name = "N", help = "Hide opponents met in fewer games")]
    min_games: Option<u64>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and data, write nothing)
    #[arg(
        long,
        help = "Validate configuration and ingest datasets without replaying or writing output"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Display run banner with configuration summary
fn display_startup_banner(config: &AppConfig) {
    info!("League Skill {}", league_skill::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!(
        "   TrueSkill: mu {:.3}, sigma {:.3}, beta {:.3}, tau {:.4}",
        config.skill.mu, config.skill.sigma, config.skill.beta, config.skill.tau
    );
    info!(
        "   Team size: {} (bots {:.1}/{:.1})",
        config.replay.team_size, config.replay.bot_mu, config.replay.bot_sigma
    );
    info!("   Win order: {}", config.replay.win_order);
    info!("   Datasets: {}", config.datasets.len());
    info!("   Output: {}", config.report.output_path.display());
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    // Start with environment-based config
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if !args.datasets.is_empty() {
        config.datasets = args
            .datasets
            .iter()
            .map(|value| DatasetPaths::parse(value))
            .collect::<Result<Vec<_>>>()?;
    }

    if let Some(output) = &args.output {
        config.report.output_path = output.clone();
    }

    if let Some(min_games) = args.min_games {
        config.report.summary_min_games = min_games;
    }

    validate_config(&config)?;
    Ok(config)
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    if config.datasets.is_empty() {
        return Err(anyhow!(
            "No datasets configured; pass --dataset PLAYERS,MATCHES or list them in the config file"
        ));
    }

    let mut history = LeagueHistory::from_config(config)?;
    debug!("Skill model parameters: {}", history.model().config());
    ingest_all(&config.datasets, &mut history)?;

    if args.dry_run {
        info!(
            "Dry run completed - {} players, {} matches ingested",
            history.rosters().player_count(),
            history.ledger().len()
        );
        return Ok(());
    }

    history.recalculate()?;

    for (year, tournaments) in tournaments_by_year(&history) {
        println!("{}: {:?}", year, tournaments);
    }
    println!("\n*************************\n");
    for advisory in incomplete_players(&history) {
        println!("{}", advisory);
    }

    write_ratings_file(&config.report.output_path, &history)?;

    for name in &args.summaries {
        let summary = player_summary(&history, name, config.report.summary_min_games)?;
        println!("\n{}", summary);
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if let Err(e) = run(&args, &config) {
        error!("Ratings run failed: {:#}", e);
        std::process::exit(1);
    }

    info!("Ratings run completed");
    Ok(())
}
