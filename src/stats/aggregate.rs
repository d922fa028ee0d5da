//! Pairwise rating statistics
//!
//! Accumulates, for every pair of players who met as opponents or played
//! together, how many games the subject won and lost and how much the
//! subject's mean skill moved over those matches.

use crate::error::Result;
use crate::league::roster::RosterRegistry;
use crate::stats::observer::RatingObserver;
use crate::types::{PlayerName, RatingUpdateEvent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running totals for one (subject, other) pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedStat {
    pub wins: u64,
    pub losses: u64,
    /// Sum of the subject's mu change over every counted match
    pub net_rating_change: f64,
}

impl AggregatedStat {
    /// Fold one match into the totals
    pub fn aggregate(&mut self, event: &RatingUpdateEvent) {
        self.wins += u64::from(event.wins);
        self.losses += u64::from(event.losses);
        self.net_rating_change += event.mu_delta();
    }

    pub fn games(&self) -> u64 {
        self.wins + self.losses
    }
}

impl std::fmt::Display for AggregatedStat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "wins {}, losses {}, net_rating_change {:.3}",
            self.wins, self.losses, self.net_rating_change
        )
    }
}

/// Totals keyed by subject, then by the other player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairStats {
    stats: BTreeMap<PlayerName, BTreeMap<PlayerName, AggregatedStat>>,
}

impl PairStats {
    fn record(&mut self, event: &RatingUpdateEvent, other: &str) {
        self.stats
            .entry(event.player.clone())
            .or_default()
            .entry(other.to_string())
            .or_default()
            .aggregate(event);
    }

    pub fn get(&self, subject: &str, other: &str) -> Option<&AggregatedStat> {
        self.stats.get(subject).and_then(|others| others.get(other))
    }

    /// Every pair involving `subject`, in name order of the other player
    pub fn stats_for(&self, subject: &str) -> Vec<(&PlayerName, &AggregatedStat)> {
        self.stats
            .get(subject)
            .map(|others| others.iter().collect())
            .unwrap_or_default()
    }

    /// Number of subjects with at least one pair
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// Totals against every member of the opposing team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ByOpponent {
    pairs: PairStats,
}

impl ByOpponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pairs(&self) -> &PairStats {
        &self.pairs
    }
}

impl RatingObserver for ByOpponent {
    fn observe(&mut self, event: &RatingUpdateEvent, rosters: &RosterRegistry) -> Result<()> {
        for opponent in rosters.team_roster(&event.tournament, &event.opponent_team)? {
            self.pairs.record(event, opponent);
        }
        Ok(())
    }
}

/// Totals with every other member of the subject's own team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ByTeammate {
    pairs: PairStats,
}

impl ByTeammate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pairs(&self) -> &PairStats {
        &self.pairs
    }
}

impl RatingObserver for ByTeammate {
    fn observe(&mut self, event: &RatingUpdateEvent, rosters: &RosterRegistry) -> Result<()> {
        for teammate in rosters.team_roster(&event.tournament, &event.team)? {
            if *teammate != event.player {
                self.pairs.record(event, teammate);
            }
        }
        Ok(())
    }
}
