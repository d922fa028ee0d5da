//! Main application configuration
//!
//! This module defines the top-level configuration for a ratings run, including
//! environment variable loading, TOML file loading, and validation.

use crate::config::rating::SkillSettings;
use crate::config::replay::ReplaySettings;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub skill: SkillSettings,
    pub replay: ReplaySettings,
    pub report: ReportSettings,
    /// Datasets ingested in order before the replay
    pub datasets: Vec<DatasetPaths>,
}

/// Process-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Output settings for the ratings report and audits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Where the ratings CSV is written
    pub output_path: PathBuf,
    /// k in the conservative estimate mu - k * sigma
    pub conservative_k: f64,
    /// Minimum games against an opponent before it shows in a player summary
    pub summary_min_games: u64,
}

/// One roster file and its matching results file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub players: PathBuf,
    pub matches: PathBuf,
}

impl DatasetPaths {
    /// Parse "players.csv,matches.csv"
    pub fn parse(value: &str) -> Result<Self> {
        let (players, matches) = value
            .split_once(',')
            .ok_or_else(|| anyhow!("Dataset must be PLAYERS,MATCHES: {}", value))?;
        let (players, matches) = (players.trim(), matches.trim());
        if players.is_empty() || matches.is_empty() {
            return Err(anyhow!("Dataset must be PLAYERS,MATCHES: {}", value));
        }

        Ok(Self {
            players: PathBuf::from(players),
            matches: PathBuf::from(matches),
        })
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "league-skill".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("PlayerSkill.csv"),
            conservative_k: 3.0,
            summary_min_games: 6,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Skill settings
        if let Ok(mu) = env::var("SKILL_MU") {
            self.skill.mu = mu
                .parse()
                .map_err(|_| anyhow!("Invalid SKILL_MU value: {}", mu))?;
        }
        if let Ok(sigma) = env::var("SKILL_SIGMA") {
            self.skill.sigma = sigma
                .parse()
                .map_err(|_| anyhow!("Invalid SKILL_SIGMA value: {}", sigma))?;
        }
        if let Ok(beta) = env::var("SKILL_BETA") {
            self.skill.beta = beta
                .parse()
                .map_err(|_| anyhow!("Invalid SKILL_BETA value: {}", beta))?;
        }
        if let Ok(tau) = env::var("SKILL_TAU") {
            self.skill.tau = tau
                .parse()
                .map_err(|_| anyhow!("Invalid SKILL_TAU value: {}", tau))?;
        }

        // Replay settings
        if let Ok(size) = env::var("TEAM_SIZE") {
            self.replay.team_size = size
                .parse()
                .map_err(|_| anyhow!("Invalid TEAM_SIZE value: {}", size))?;
        }
        if let Ok(mu) = env::var("BOT_MU") {
            self.replay.bot_mu = mu
                .parse()
                .map_err(|_| anyhow!("Invalid BOT_MU value: {}", mu))?;
        }
        if let Ok(sigma) = env::var("BOT_SIGMA") {
            self.replay.bot_sigma = sigma
                .parse()
                .map_err(|_| anyhow!("Invalid BOT_SIGMA value: {}", sigma))?;
        }
        if let Ok(order) = env::var("WIN_ORDER") {
            self.replay.win_order = order
                .parse()
                .map_err(|_| anyhow!("Invalid WIN_ORDER value: {}", order))?;
        }

        // Report settings
        if let Ok(path) = env::var("OUTPUT_PATH") {
            self.report.output_path = PathBuf::from(path);
        }
        if let Ok(min_games) = env::var("SUMMARY_MIN_GAMES") {
            self.report.summary_min_games = min_games
                .parse()
                .map_err(|_| anyhow!("Invalid SUMMARY_MIN_GAMES value: {}", min_games))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    config.skill.validate()?;
    config.replay.validate()?;

    if config.report.conservative_k <= 0.0 {
        return Err(anyhow!("Conservative k must be positive"));
    }
    if config.report.output_path.as_os_str().is_empty() {
        return Err(anyhow!("Output path cannot be empty"));
    }

    Ok(())
}
