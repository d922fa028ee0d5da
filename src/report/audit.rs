//! Data audits printed alongside the ratings
//!
//! Tournaments grouped by year, roster advisories, per-player summaries
//! drawn from the pairwise aggregates, and rating comparisons between runs.

use crate::error::{LeagueError, Result};
use crate::league::history::LeagueHistory;
use crate::rating::store::{RatingComparison, RatingStore};
use crate::stats::aggregate::{AggregatedStat, PairStats};
use crate::types::{PlayerName, TournamentId};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Dated tournaments grouped by year, each year's list in date order
pub fn tournaments_by_year(history: &LeagueHistory) -> BTreeMap<i32, Vec<TournamentId>> {
    let mut years: BTreeMap<i32, Vec<TournamentId>> = BTreeMap::new();
    for (tournament, date) in history.ledger().tournaments_by_date(history.rosters()) {
        years.entry(date.year()).or_default().push(tournament);
    }
    years
}

/// Roster advisories, one line each
pub fn incomplete_players(history: &LeagueHistory) -> Vec<String> {
    history.rosters().advisories()
}

/// "name / scene" for every player, in name order
pub fn player_scene_list(history: &LeagueHistory) -> Vec<String> {
    history
        .rosters()
        .players()
        .map(|player| format!("{} / {}", player.name, player.scene.as_deref().unwrap_or("")))
        .collect()
}

/// Differences between an earlier rating store and a later one
pub fn compare_ratings(old: &RatingStore, new: &RatingStore) -> RatingComparison {
    old.compare(new)
}

/// How a player fared with each teammate and against each opponent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub player: PlayerName,
    pub teammates: Vec<(PlayerName, AggregatedStat)>,
    /// Opponents met in at least the requested number of games
    pub opponents: Vec<(PlayerName, AggregatedStat)>,
}

fn collect(pairs: &PairStats, player: &str, min_games: u64) -> Vec<(PlayerName, AggregatedStat)> {
    pairs
        .stats_for(player)
        .into_iter()
        .filter(|(_, stat)| stat.games() >= min_games)
        .map(|(other, stat)| (other.clone(), *stat))
        .collect()
}

/// Summary of a registered player from the last replay's aggregates.
///
/// Fails with [`LeagueError::NotRecalculated`] when the data changed since
/// the last replay.
pub fn player_summary(history: &LeagueHistory, player: &str, min_games: u64) -> Result<PlayerSummary> {
    let player = history.rosters().player(player)?;
    if history.outcome().is_none() {
        return Err(LeagueError::NotRecalculated);
    }

    Ok(PlayerSummary {
        player: player.name.clone(),
        teammates: collect(history.by_teammate().pairs(), &player.name, 0),
        opponents: collect(history.by_opponent().pairs(), &player.name, min_games),
    })
}

impl fmt::Display for PlayerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} teammates", self.player)?;
        for (teammate, stat) in &self.teammates {
            writeln!(f, "{} + {} {}", self.player, teammate, stat)?;
        }
        writeln!(f)?;
        writeln!(f, "{} opponents", self.player)?;
        for (opponent, stat) in &self.opponents {
            writeln!(f, "{} - {} {}", self.player, opponent, stat)?;
        }
        Ok(())
    }
}

impl fmt::Display for RatingComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "New players: {:?}", self.added)?;
        writeln!(f, "Removed players: {:?}", self.removed)?;
        write!(f, "Changed players:")?;
        for (player, delta) in &self.changed {
            if delta.mu != 0.0 || delta.sigma != 0.0 {
                write!(f, "\n  {}: mu {:+.3}, sigma {:+.3}", player, delta.mu, delta.sigma)?;
            }
        }
        Ok(())
    }
}
