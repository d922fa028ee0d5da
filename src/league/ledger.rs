//! Match ledger
//!
//! Holds every match record exactly as ingested, checks them against the
//! rosters in one batch, and hands out a stable chronological ordering.

use crate::error::{LeagueError, Result};
use crate::league::roster::RosterRegistry;
use crate::types::{MatchRecord, TournamentId};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchLedger {
    matches: Vec<MatchRecord>,
    /// Earliest timestamp seen for each tournament
    first_seen: BTreeMap<TournamentId, DateTime<FixedOffset>>,
}

impl MatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record verbatim. No validation happens here.
    pub fn append(&mut self, record: MatchRecord) {
        let timestamp = record.timestamp;
        self.first_seen
            .entry(record.tournament.clone())
            .and_modify(|first| {
                if timestamp < *first {
                    *first = timestamp;
                }
            })
            .or_insert_with(|| {
                debug!(
                    "set {} date to {}",
                    record.tournament,
                    timestamp.format("%Y-%m-%dT%H:%M:%S%z")
                );
                timestamp
            });
        self.matches.push(record);
    }

    /// Check every record against the rosters.
    ///
    /// All problems are collected first; if there are any, a single
    /// [`LeagueError::LedgerIntegrity`] lists every one of them.
    pub fn validate_against_roster(&self, registry: &RosterRegistry) -> Result<()> {
        let errors = integrity_errors(&self.matches, registry);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(LeagueError::LedgerIntegrity { errors })
        }
    }

    /// Matches sorted by timestamp; equal timestamps keep insertion order
    pub fn chronological(&self) -> Vec<&MatchRecord> {
        let mut ordered: Vec<&MatchRecord> = self.matches.iter().collect();
        ordered.sort_by_key(|record| record.timestamp);
        ordered
    }

    /// Records in insertion order
    pub fn records(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// Date of the earliest match seen for a tournament
    pub fn tournament_date(&self, tournament: &str) -> Option<NaiveDate> {
        self.first_seen
            .get(tournament)
            .map(|timestamp| timestamp.date_naive())
    }

    /// Tournaments with at least one match, ordered by their first match.
    ///
    /// Tournaments starting at the same instant keep the order in which
    /// `registry` registered them.
    pub fn tournaments_by_date(
        &self,
        registry: &RosterRegistry,
    ) -> Vec<(TournamentId, NaiveDate)> {
        let registered = |id: &str| {
            registry
                .tournaments()
                .iter()
                .position(|tournament| tournament == id)
                .unwrap_or(usize::MAX)
        };

        let mut dated: Vec<(&TournamentId, DateTime<FixedOffset>)> = self
            .first_seen
            .iter()
            .map(|(id, timestamp)| (id, *timestamp))
            .collect();
        dated.sort_by_key(|(id, timestamp)| (*timestamp, registered(id)));
        dated
            .into_iter()
            .map(|(id, timestamp)| (id.clone(), timestamp.date_naive()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Describe every roster reference in `records` that does not resolve
pub fn integrity_errors(records: &[MatchRecord], registry: &RosterRegistry) -> Vec<String> {
    let mut errors = Vec::new();

    for record in records {
        if !registry.has_tournament(&record.tournament) {
            errors.push(format!(
                "{} not found in tournaments. tournaments found = {:?}",
                record.tournament,
                registry.tournaments()
            ));
            continue;
        }

        let teams_found = registry.team_names(&record.tournament).unwrap_or_default();
        if !registry.has_team(&record.tournament, &record.team1) {
            errors.push(format!(
                "{} not found in teams[{}]. team 2 was {}. teams found = {:?}",
                record.team1, record.tournament, record.team2, teams_found
            ));
        }
        if !registry.has_team(&record.tournament, &record.team2) {
            errors.push(format!(
                "{} not found in teams[{}]. team 1 was {}. teams found = {:?}",
                record.team2, record.tournament, record.team1, teams_found
            ));
        }
    }

    errors
}
