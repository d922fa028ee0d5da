//! TrueSkill skill model
//!
//! This module provides the production [`SkillModel`] backed by the two-team
//! TrueSkill implementation from the skillratings crate.

use crate::config::rating::SkillSettings;
use crate::error::{LeagueError, Result};
use crate::rating::model::{standard_normal_cdf, SkillModel};
use crate::types::{Side, SkillRating};
use skillratings::trueskill::{trueskill_two_teams, TrueSkillConfig, TrueSkillRating};
use skillratings::Outcomes;

/// TrueSkill skill model implementation
#[derive(Debug)]
pub struct TrueSkillModel {
    settings: SkillSettings,
    config: TrueSkillConfig,
}

impl TrueSkillModel {
    /// Create a new TrueSkill model
    pub fn new(settings: SkillSettings) -> Result<Self> {
        settings.validate()?;

        let config = TrueSkillConfig {
            draw_probability: settings.draw_probability,
            beta: settings.beta,
            default_dynamics: settings.tau,
        };

        Ok(Self { settings, config })
    }

    pub fn settings(&self) -> &SkillSettings {
        &self.settings
    }
}

impl SkillModel for TrueSkillModel {
    fn initial_rating(&self) -> SkillRating {
        SkillRating::new(self.settings.mu, self.settings.sigma)
    }

    fn rate(
        &self,
        team_one: &[SkillRating],
        team_two: &[SkillRating],
        winner: Side,
    ) -> Result<(Vec<SkillRating>, Vec<SkillRating>)> {
        if team_one.is_empty() || team_two.is_empty() {
            return Err(LeagueError::SkillModelFailed {
                reason: format!(
                    "cannot rate {} vs {} players",
                    team_one.len(),
                    team_two.len()
                ),
            });
        }

        let one: Vec<TrueSkillRating> = team_one.iter().map(|r| (*r).into()).collect();
        let two: Vec<TrueSkillRating> = team_two.iter().map(|r| (*r).into()).collect();

        let outcome = match winner {
            Side::TeamOne => Outcomes::WIN,
            Side::TeamTwo => Outcomes::LOSS,
        };

        let (new_one, new_two) = trueskill_two_teams(&one, &two, &outcome, &self.config);

        Ok((
            new_one.into_iter().map(SkillRating::from).collect(),
            new_two.into_iter().map(SkillRating::from).collect(),
        ))
    }

    fn cdf(&self, z: f64) -> f64 {
        standard_normal_cdf(z)
    }

    fn beta(&self) -> f64 {
        self.settings.beta
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.settings).unwrap_or(serde_json::Value::Null)
    }
}
