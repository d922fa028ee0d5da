//! League history
//!
//! This module provides [`LeagueHistory`], the object that owns the rosters,
//! the match ledger, the skill model and the result of the most recent replay.
//! Everything that reads or writes league data goes through it.

use crate::config::app::AppConfig;
use crate::config::rating::SkillSettings;
use crate::config::replay::ReplaySettings;
use crate::error::{LeagueError, Result};
use crate::league::ledger::{integrity_errors, MatchLedger};
use crate::league::roster::RosterRegistry;
use crate::rating::model::SkillModel;
use crate::rating::probability::{win_probability, win_probability_single};
use crate::rating::trueskill::TrueSkillModel;
use crate::replay::engine::{ReplayEngine, ReplayOutcome};
use crate::stats::aggregate::{ByOpponent, ByTeammate};
use crate::types::{MatchRecord, SkillRating};
use std::sync::Arc;
use tracing::{info, warn};

/// One row of a roster file, before registration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterRow {
    pub tournament: String,
    pub team: Option<String>,
    pub player: Option<String>,
    pub scene: Option<String>,
}

impl RosterRow {
    pub fn new(tournament: &str, team: &str, player: &str, scene: &str) -> Self {
        let cell = |value: &str| Some(value.to_string()).filter(|v| !v.trim().is_empty());
        Self {
            tournament: tournament.to_string(),
            team: cell(team),
            player: cell(player),
            scene: cell(scene),
        }
    }
}

/// Rosters, results and ratings of a whole league
pub struct LeagueHistory {
    /// Who played for which team in each tournament
    rosters: RosterRegistry,
    /// Every accepted match result
    ledger: MatchLedger,
    /// Rating update and probability primitives
    model: Arc<dyn SkillModel>,
    /// Team size, bot padding and win order
    replay_settings: ReplaySettings,
    /// Multiplier of sigma in the conservative skill estimate
    conservative_k: f64,
    /// Result of the last successful replay
    outcome: Option<ReplayOutcome>,
    by_opponent: ByOpponent,
    by_teammate: ByTeammate,
}

impl LeagueHistory {
    /// Create an empty history rated with TrueSkill
    pub fn new(skill: SkillSettings, replay: ReplaySettings) -> Result<Self> {
        let model = TrueSkillModel::new(skill)?;
        Self::with_model(Arc::new(model), replay)
    }

    /// Create an empty history rated with a custom skill model
    pub fn with_model(model: Arc<dyn SkillModel>, replay: ReplaySettings) -> Result<Self> {
        replay.validate()?;

        Ok(Self {
            rosters: RosterRegistry::new(),
            ledger: MatchLedger::new(),
            model,
            replay_settings: replay,
            conservative_k: 3.0,
            outcome: None,
            by_opponent: ByOpponent::new(),
            by_teammate: ByTeammate::new(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let history = Self::new(config.skill.clone(), config.replay.clone())?;
        history.with_conservative_k(config.report.conservative_k)
    }

    pub fn with_conservative_k(mut self, k: f64) -> Result<Self> {
        if !(k.is_finite() && k > 0.0) {
            return Err(LeagueError::ConfigurationError {
                message: format!("conservative_k must be positive, got {}", k),
            });
        }
        self.conservative_k = k;
        Ok(self)
    }

    /// Register a batch of roster rows.
    ///
    /// Rows are applied to a copy of the registry which only replaces the
    /// current one if every row registers, so a failing batch leaves no trace.
    /// Returns the number of rows registered.
    pub fn register_players<'a, I>(&mut self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a RosterRow>,
    {
        let mut staged = self.rosters.clone();
        let advisories_before = staged.incomplete_players().len();
        let mut count = 0;

        for row in rows {
            staged.register(
                &row.tournament,
                row.team.as_deref(),
                row.player.as_deref(),
                row.scene.as_deref(),
            )?;
            count += 1;
        }

        for advisory in &staged.incomplete_players()[advisories_before..] {
            warn!("incomplete player {}", advisory);
        }

        self.rosters = staged;
        self.invalidate();
        Ok(count)
    }

    /// Append a batch of match results and validate the whole ledger.
    ///
    /// `parse_errors` describes rows of the same batch that could not be read;
    /// they are reported together with any unknown tournament or team. On any
    /// error nothing from the batch is kept. Returns the number of matches
    /// added.
    pub fn add_matches(
        &mut self,
        records: Vec<MatchRecord>,
        parse_errors: Vec<String>,
    ) -> Result<usize> {
        let mut staged = self.ledger.clone();
        let count = records.len();
        for record in records {
            staged.append(record);
        }

        let mut errors = parse_errors;
        errors.extend(integrity_errors(staged.records(), &self.rosters));
        if !errors.is_empty() {
            return Err(LeagueError::LedgerIntegrity { errors });
        }

        self.ledger = staged;
        self.invalidate();
        Ok(count)
    }

    /// Drop the last replay and its aggregates once the data changes
    fn invalidate(&mut self) {
        self.outcome = None;
        self.by_opponent = ByOpponent::new();
        self.by_teammate = ByTeammate::new();
    }

    /// Replay every match from scratch and keep the result.
    ///
    /// On failure the previous outcome and aggregates are left untouched.
    pub fn recalculate(&mut self) -> Result<&ReplayOutcome> {
        let mut by_opponent = ByOpponent::new();
        let mut by_teammate = ByTeammate::new();

        let engine = ReplayEngine::new(self.model.as_ref(), &self.replay_settings);
        let outcome = engine.replay(
            &self.rosters,
            self.ledger.chronological(),
            &mut [&mut by_opponent, &mut by_teammate],
        )?;

        info!(
            "ratings calculated for {} players over {} matches",
            outcome.ratings.len(),
            self.ledger.len()
        );

        self.by_opponent = by_opponent;
        self.by_teammate = by_teammate;
        Ok(&*self.outcome.insert(outcome))
    }

    /// Current rating of a player: the replayed one, or the initial rating
    /// for a registered player when nothing has been replayed yet
    pub fn current_rating(&self, player: &str) -> Result<SkillRating> {
        match &self.outcome {
            Some(outcome) => outcome.ratings.get(player),
            None => {
                self.rosters.player(player)?;
                Ok(self.model.initial_rating())
            }
        }
    }

    /// Probability that a team of copies of `player_one` beats a team of
    /// copies of `player_two`
    pub fn win_probability_players(&self, player_one: &str, player_two: &str) -> Result<f64> {
        let one = self.current_rating(player_one)?;
        let two = self.current_rating(player_two)?;
        win_probability_single(
            one,
            two,
            self.replay_settings.team_size,
            self.model.as_ref(),
        )
    }

    /// Probability that the first list of players beats the second
    pub fn win_probability_teams(&self, team_one: &[&str], team_two: &[&str]) -> Result<f64> {
        let one = team_one
            .iter()
            .map(|player| self.current_rating(player))
            .collect::<Result<Vec<_>>>()?;
        let two = team_two
            .iter()
            .map(|player| self.current_rating(player))
            .collect::<Result<Vec<_>>>()?;

        win_probability(&one, &two, self.model.as_ref())
    }

    pub fn rosters(&self) -> &RosterRegistry {
        &self.rosters
    }

    pub fn ledger(&self) -> &MatchLedger {
        &self.ledger
    }

    pub fn model(&self) -> &dyn SkillModel {
        self.model.as_ref()
    }

    pub fn replay_settings(&self) -> &ReplaySettings {
        &self.replay_settings
    }

    pub fn conservative_k(&self) -> f64 {
        self.conservative_k
    }

    /// Result of the last replay, if the data has not changed since
    pub fn outcome(&self) -> Option<&ReplayOutcome> {
        self.outcome.as_ref()
    }

    pub fn by_opponent(&self) -> &ByOpponent {
        &self.by_opponent
    }

    pub fn by_teammate(&self) -> &ByTeammate {
        &self.by_teammate
    }
}

impl std::fmt::Debug for LeagueHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeagueHistory")
            .field("tournaments", &self.rosters.tournaments().len())
            .field("players", &self.rosters.player_count())
            .field("matches", &self.ledger.len())
            .field("replayed", &self.outcome.is_some())
            .finish()
    }
}
