//! Skill model configuration

use crate::error::{LeagueError, Result};
use serde::{Deserialize, Serialize};

/// League-wide TrueSkill parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSettings {
    /// Initial mean skill for every player
    pub mu: f64,
    /// Initial uncertainty for every player
    pub sigma: f64,
    /// Performance spread of a single game
    pub beta: f64,
    /// Dynamics factor added to sigma before each update
    pub tau: f64,
    /// Probability of a drawn game; every game has a winner so this stays 0
    pub draw_probability: f64,
}

impl Default for SkillSettings {
    fn default() -> Self {
        Self {
            mu: 25.0,
            sigma: 25.0 / 3.0,
            beta: 25.0 / 6.0,
            tau: 25.0 / 300.0,
            draw_probability: 0.0,
        }
    }
}

impl SkillSettings {
    /// Validate skill parameters
    pub fn validate(&self) -> Result<()> {
        if !self.mu.is_finite() {
            return Err(LeagueError::ConfigurationError {
                message: "mu must be finite".to_string(),
            });
        }

        if self.sigma <= 0.0 {
            return Err(LeagueError::ConfigurationError {
                message: "sigma must be positive".to_string(),
            });
        }

        if self.beta <= 0.0 {
            return Err(LeagueError::ConfigurationError {
                message: "beta must be positive".to_string(),
            });
        }

        if self.tau < 0.0 {
            return Err(LeagueError::ConfigurationError {
                message: "tau must be non-negative".to_string(),
            });
        }

        if self.draw_probability != 0.0 {
            return Err(LeagueError::ConfigurationError {
                message: format!(
                    "draw_probability must be 0 (got {}); every game is ranked",
                    self.draw_probability
                ),
            });
        }

        Ok(())
    }
}
