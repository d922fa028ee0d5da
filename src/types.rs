//! Common types used throughout the rating engine

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use skillratings::trueskill::TrueSkillRating;

/// Unique player identity within the league
pub type PlayerName = String;

/// Team name, unique only within its tournament
pub type TeamName = String;

/// Tournament identifier (e.g. "BB4", "KQ30")
pub type TournamentId = String;

/// Which side of a match a team played on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    TeamOne,
    TeamTwo,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::TeamOne => Side::TeamTwo,
            Side::TeamTwo => Side::TeamOne,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::TeamOne => write!(f, "team1"),
            Side::TeamTwo => write!(f, "team2"),
        }
    }
}

/// Skill estimate for a player: believed mean and its uncertainty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillRating {
    pub mu: f64,
    pub sigma: f64,
}

impl SkillRating {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    /// Single ranking number: mu - k * sigma
    pub fn conservative(&self, k: f64) -> f64 {
        self.mu - k * self.sigma
    }
}

impl Default for SkillRating {
    fn default() -> Self {
        TrueSkillRating::new().into()
    }
}

impl From<TrueSkillRating> for SkillRating {
    fn from(rating: TrueSkillRating) -> Self {
        Self {
            mu: rating.rating,
            sigma: rating.uncertainty,
        }
    }
}

impl From<SkillRating> for TrueSkillRating {
    fn from(rating: SkillRating) -> Self {
        Self {
            rating: rating.mu,
            uncertainty: rating.sigma,
        }
    }
}

/// One row of the match ledger, stored exactly as ingested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub tournament: TournamentId,
    pub bracket: String,
    pub team1: TeamName,
    pub team2: TeamName,
    pub team1_wins: u32,
    pub team2_wins: u32,
    pub timestamp: DateTime<FixedOffset>,
}

impl MatchRecord {
    /// Number of individual games played in this match
    pub fn games(&self) -> u64 {
        u64::from(self.team1_wins) + u64::from(self.team2_wins)
    }

    pub fn team(&self, side: Side) -> &TeamName {
        match side {
            Side::TeamOne => &self.team1,
            Side::TeamTwo => &self.team2,
        }
    }

    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::TeamOne => self.team1_wins,
            Side::TeamTwo => self.team2_wins,
        }
    }
}

/// Net effect of one whole match on one human player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdateEvent {
    pub tournament: TournamentId,
    pub team: TeamName,
    pub opponent_team: TeamName,
    pub player: PlayerName,
    pub rating_before: SkillRating,
    pub rating_after: SkillRating,
    pub wins: u32,
    pub losses: u32,
}

impl RatingUpdateEvent {
    /// Change in mean skill across the match
    pub fn mu_delta(&self) -> f64 {
        self.rating_after.mu - self.rating_before.mu
    }
}

/// Lifetime game counters for a player, rebuilt on every replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCounters {
    pub games: u64,
    pub wins: u64,
    pub losses: u64,
}

impl GameCounters {
    pub fn record(&mut self, wins: u32, losses: u32) {
        self.games += u64::from(wins) + u64::from(losses);
        self.wins += u64::from(wins);
        self.losses += u64::from(losses);
    }
}
