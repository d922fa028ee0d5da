//! Replay configuration

use crate::error::{LeagueError, Result};
use crate::replay::policy::WinOrder;
use crate::types::SkillRating;
use serde::{Deserialize, Serialize};

/// Team size and bot padding used while replaying matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    /// Nominal number of participants per side
    pub team_size: usize,
    /// Mean skill of a synthetic bot filling an empty seat
    pub bot_mu: f64,
    /// Uncertainty of a synthetic bot
    pub bot_sigma: f64,
    /// Order in which the individual game wins of a match are applied
    pub win_order: WinOrder,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            team_size: 5,
            bot_mu: 5.0,
            bot_sigma: 2.0,
            win_order: WinOrder::TeamOneFirst,
        }
    }
}

impl ReplaySettings {
    pub fn bot_rating(&self) -> SkillRating {
        SkillRating::new(self.bot_mu, self.bot_sigma)
    }

    pub fn validate(&self) -> Result<()> {
        if self.team_size == 0 {
            return Err(LeagueError::ConfigurationError {
                message: "team_size must be at least 1".to_string(),
            });
        }

        if self.bot_sigma <= 0.0 {
            return Err(LeagueError::ConfigurationError {
                message: "bot_sigma must be positive".to_string(),
            });
        }

        Ok(())
    }
}
