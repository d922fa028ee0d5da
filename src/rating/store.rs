//! Rating store and snapshot archive
//!
//! The store is the only mutable rating state in the system. It is rebuilt from
//! scratch at the start of every replay, and the archive keeps independent deep
//! copies of it taken at tournament boundaries.

use crate::error::{LeagueError, Result};
use crate::types::{PlayerName, SkillRating, TournamentId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current rating of every known player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingStore {
    ratings: BTreeMap<PlayerName, SkillRating>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all ratings and give every listed player the same fresh rating
    pub fn reset<'a, I>(&mut self, players: I, initial: SkillRating)
    where
        I: IntoIterator<Item = &'a PlayerName>,
    {
        self.ratings.clear();
        for player in players {
            self.ratings.insert(player.clone(), initial);
        }
    }

    pub fn get(&self, player: &str) -> Result<SkillRating> {
        self.ratings
            .get(player)
            .copied()
            .ok_or_else(|| LeagueError::UnknownPlayer {
                player: player.to_string(),
            })
    }

    /// Overwrite a known player's rating. Players only enter the store via `reset`.
    pub fn set(&mut self, player: &str, rating: SkillRating) -> Result<()> {
        match self.ratings.get_mut(player) {
            Some(slot) => {
                *slot = rating;
                Ok(())
            }
            None => Err(LeagueError::UnknownPlayer {
                player: player.to_string(),
            }),
        }
    }

    /// Deep copy of the store as it is right now
    pub fn as_of(&self) -> RatingStore {
        self.clone()
    }

    pub fn contains(&self, player: &str) -> bool {
        self.ratings.contains_key(player)
    }

    /// Ratings in player-name order
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerName, &SkillRating)> {
        self.ratings.iter()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Compare this (older) store against a newer one
    pub fn compare(&self, newer: &RatingStore) -> RatingComparison {
        let mut comparison = RatingComparison::default();

        for (player, old) in &self.ratings {
            match newer.ratings.get(player) {
                Some(new) => {
                    comparison.changed.insert(
                        player.clone(),
                        RatingDelta {
                            mu: new.mu - old.mu,
                            sigma: new.sigma - old.sigma,
                        },
                    );
                }
                None => comparison.removed.push(player.clone()),
            }
        }

        comparison.added = newer
            .ratings
            .keys()
            .filter(|player| !self.ratings.contains_key(*player))
            .cloned()
            .collect();

        comparison
    }
}

/// Change in one player's rating between two stores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingDelta {
    pub mu: f64,
    pub sigma: f64,
}

/// Differences between two rating stores, e.g. before and after a re-run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingComparison {
    pub added: Vec<PlayerName>,
    pub removed: Vec<PlayerName>,
    pub changed: BTreeMap<PlayerName, RatingDelta>,
}

impl RatingComparison {
    /// True when both stores hold the same players with the same ratings
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self
                .changed
                .values()
                .all(|delta| delta.mu == 0.0 && delta.sigma == 0.0)
    }
}

/// Rating store copies keyed by the tournament they close
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotArchive {
    snapshots: BTreeMap<TournamentId, RatingStore>,
}

impl SnapshotArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// File an independent copy of `store` under `tournament`
    pub fn record(&mut self, tournament: &str, store: &RatingStore) {
        self.snapshots.insert(tournament.to_string(), store.as_of());
    }

    pub fn get(&self, tournament: &str) -> Option<&RatingStore> {
        self.snapshots.get(tournament)
    }

    /// A player's rating as it stood at the end of `tournament`
    pub fn rating(&self, tournament: &str, player: &str) -> Option<SkillRating> {
        self.snapshots
            .get(tournament)
            .and_then(|store| store.get(player).ok())
    }

    pub fn tournaments(&self) -> impl Iterator<Item = &TournamentId> {
        self.snapshots.keys()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
