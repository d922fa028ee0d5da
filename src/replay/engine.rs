//! Historical replay engine
//!
//! Replays every match in chronological order against a freshly reset rating
//! store, applying the skill model once per individual game win, snapshotting
//! the store at every tournament boundary, and streaming one update event per
//! human player per match to the registered observers.

use crate::config::replay::ReplaySettings;
use crate::error::{LeagueError, Result};
use crate::league::roster::RosterRegistry;
use crate::rating::model::SkillModel;
use crate::rating::store::{RatingStore, SnapshotArchive};
use crate::replay::padding::BotPadding;
use crate::replay::policy::WinOrder;
use crate::stats::observer::RatingObserver;
use crate::types::{
    GameCounters, MatchRecord, PlayerName, RatingUpdateEvent, Side, SkillRating, TournamentId,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Everything a replay pass produces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayOutcome {
    /// Ratings after the last match
    pub ratings: RatingStore,
    /// Store copies taken after each tournament's last match
    pub snapshots: SnapshotArchive,
    /// Games, wins and losses per player
    pub counters: BTreeMap<PlayerName, GameCounters>,
    /// Every update event, in emission order
    pub events: Vec<RatingUpdateEvent>,
}

impl ReplayOutcome {
    pub fn counters_for(&self, player: &str) -> Result<GameCounters> {
        self.counters
            .get(player)
            .copied()
            .ok_or_else(|| LeagueError::UnknownPlayer {
                player: player.to_string(),
            })
    }
}

/// Ratings for one side of a match, as fed to the skill model
struct SideState<'r> {
    team: &'r str,
    roster: &'r [PlayerName],
    ratings: Vec<SkillRating>,
}

pub struct ReplayEngine<'m> {
    model: &'m dyn SkillModel,
    padding: BotPadding,
    win_order: WinOrder,
}

impl<'m> ReplayEngine<'m> {
    pub fn new(model: &'m dyn SkillModel, settings: &ReplaySettings) -> Self {
        Self {
            model,
            padding: BotPadding::from_settings(settings),
            win_order: settings.win_order,
        }
    }

    pub fn with_win_order(mut self, win_order: WinOrder) -> Self {
        self.win_order = win_order;
        self
    }

    /// Replay `matches` (already in chronological order) from scratch.
    ///
    /// Any roster or player lookup that fails aborts the whole pass.
    pub fn replay<'a, I>(
        &self,
        registry: &RosterRegistry,
        matches: I,
        observers: &mut [&mut dyn RatingObserver],
    ) -> Result<ReplayOutcome>
    where
        I: IntoIterator<Item = &'a MatchRecord>,
    {
        let mut ratings = RatingStore::new();
        ratings.reset(registry.player_names(), self.model.initial_rating());

        let mut counters: BTreeMap<PlayerName, GameCounters> = registry
            .player_names()
            .map(|name| (name.clone(), GameCounters::default()))
            .collect();

        let mut snapshots = SnapshotArchive::new();
        let mut events = Vec::new();
        let mut current: Option<TournamentId> = None;

        for record in matches {
            if current.as_deref() != Some(record.tournament.as_str()) {
                if let Some(finished) = &current {
                    snapshots.record(finished, &ratings);
                }
                info!("processing {}", record.tournament);
                current = Some(record.tournament.clone());
            }

            let match_events = self.apply_match(registry, record, &mut ratings, &mut counters)?;

            for event in &match_events {
                for observer in observers.iter_mut() {
                    observer.observe(event, registry)?;
                }
            }
            events.extend(match_events);
        }

        if let Some(finished) = &current {
            snapshots.record(finished, &ratings);
        }

        info!(
            "replayed {} events across {} tournaments",
            events.len(),
            snapshots.len()
        );

        Ok(ReplayOutcome {
            ratings,
            snapshots,
            counters,
            events,
        })
    }

    fn apply_match(
        &self,
        registry: &RosterRegistry,
        record: &MatchRecord,
        ratings: &mut RatingStore,
        counters: &mut BTreeMap<PlayerName, GameCounters>,
    ) -> Result<Vec<RatingUpdateEvent>> {
        let mut one = self.collect_side(registry, record, Side::TeamOne, ratings, counters)?;
        let mut two = self.collect_side(registry, record, Side::TeamTwo, ratings, counters)?;

        self.padding.pad(one.team, &mut one.ratings);
        self.padding.pad(two.team, &mut two.ratings);

        for winner in self.win_order.sequence(record.team1_wins, record.team2_wins) {
            let (next_one, next_two) = self.model.rate(&one.ratings, &two.ratings, winner)?;
            if next_one.len() != one.ratings.len() || next_two.len() != two.ratings.len() {
                return Err(LeagueError::SkillModelFailed {
                    reason: format!(
                        "expected {}+{} ratings back, got {}+{}",
                        one.ratings.len(),
                        two.ratings.len(),
                        next_one.len(),
                        next_two.len()
                    ),
                });
            }
            one.ratings = next_one;
            two.ratings = next_two;
        }

        let mut events = Vec::with_capacity(one.roster.len() + two.roster.len());
        for (side, state, opponent) in [
            (Side::TeamOne, &one, &two),
            (Side::TeamTwo, &two, &one),
        ] {
            for (player, after) in state.roster.iter().zip(&state.ratings) {
                events.push(RatingUpdateEvent {
                    tournament: record.tournament.clone(),
                    team: state.team.to_string(),
                    opponent_team: opponent.team.to_string(),
                    player: player.clone(),
                    rating_before: ratings.get(player)?,
                    rating_after: *after,
                    wins: record.wins(side),
                    losses: record.wins(side.opponent()),
                });
            }
        }

        for event in &events {
            ratings.set(&event.player, event.rating_after)?;
        }

        debug!(
            "{}: {} {} - {} {}",
            record.tournament, record.team1, record.team1_wins, record.team2_wins, record.team2
        );

        Ok(events)
    }

    /// Current ratings of a side's humans; also bumps their game counters
    fn collect_side<'r>(
        &self,
        registry: &'r RosterRegistry,
        record: &'r MatchRecord,
        side: Side,
        ratings: &RatingStore,
        counters: &mut BTreeMap<PlayerName, GameCounters>,
    ) -> Result<SideState<'r>> {
        let team = record.team(side);
        let roster = registry.team_roster(&record.tournament, team)?;
        let wins = record.wins(side);
        let losses = record.wins(side.opponent());

        let mut side_ratings = Vec::with_capacity(self.padding.team_size().max(roster.len()));
        for player in roster {
            side_ratings.push(ratings.get(player)?);
            counters
                .get_mut(player)
                .ok_or_else(|| LeagueError::UnknownPlayer {
                    player: player.clone(),
                })?
                .record(wins, losses);
        }

        Ok(SideState {
            team,
            roster,
            ratings: side_ratings,
        })
    }
}
