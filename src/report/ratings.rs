//! Player ratings CSV
//!
//! One row per player in name order: name, scene, conservative skill,
//! tournament count, games, wins, losses and win rate, then a "tournament /
//! team" label per tournament, then the conservative skill recorded in each
//! tournament's snapshot. Tournaments are ordered by date.

use crate::error::LeagueError;
use crate::league::history::LeagueHistory;
use crate::replay::engine::ReplayOutcome;
use crate::types::{PlayerName, TournamentId};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tracing::info;

const FIXED_HEADERS: [&str; 8] = [
    "Player Name",
    "scene",
    "trueskill",
    "tourneys",
    "games",
    "wins",
    "losses",
    "win%",
];

/// One output row, before formatting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRow {
    pub name: PlayerName,
    pub scene: Option<String>,
    /// mu - k * sigma of the final rating
    pub skill: f64,
    pub tournaments: usize,
    pub games: u64,
    pub wins: u64,
    pub losses: u64,
    pub win_rate: f64,
    /// "tournament / team" for every column tournament the player entered
    pub teams: Vec<Option<String>>,
    /// Snapshot skill per column tournament; `None` while still at the initial rating
    pub snapshots: Vec<Option<f64>>,
}

impl PlayerRow {
    fn to_record(&self) -> Vec<String> {
        let mut record = vec![
            self.name.clone(),
            self.scene.clone().unwrap_or_default(),
            self.skill.to_string(),
            self.tournaments.to_string(),
            self.games.to_string(),
            self.wins.to_string(),
            self.losses.to_string(),
            format!("{:.2}", self.win_rate),
        ];
        record.extend(self.teams.iter().map(|team| team.clone().unwrap_or_default()));
        record.extend(
            self.snapshots
                .iter()
                .map(|skill| skill.map(|s| s.to_string()).unwrap_or_default()),
        );
        record
    }
}

fn replayed(history: &LeagueHistory) -> Result<&ReplayOutcome> {
    history
        .outcome()
        .ok_or_else(|| LeagueError::NotRecalculated.into())
}

/// Tournament columns: dated tournaments by first match, then any tournament
/// without matches in registration order
pub fn tournament_columns(history: &LeagueHistory) -> Vec<TournamentId> {
    let mut columns: Vec<TournamentId> = history
        .ledger()
        .tournaments_by_date(history.rosters())
        .into_iter()
        .map(|(tournament, _)| tournament)
        .collect();

    let dated: BTreeSet<TournamentId> = columns.iter().cloned().collect();
    columns.extend(
        history
            .rosters()
            .tournaments()
            .iter()
            .filter(|tournament| !dated.contains(*tournament))
            .cloned(),
    );
    columns
}

/// Build every player's row from the last replay.
///
/// Fails with [`LeagueError::ZeroGamesPlayed`] for a player who never played.
pub fn player_rows(history: &LeagueHistory) -> Result<Vec<PlayerRow>> {
    let outcome = replayed(history)?;
    let columns = tournament_columns(history);
    let k = history.conservative_k();
    let model = history.model();

    let mut rows = Vec::with_capacity(history.rosters().player_count());
    for player in history.rosters().players() {
        let counters = outcome.counters_for(&player.name)?;
        if counters.games == 0 {
            return Err(LeagueError::ZeroGamesPlayed {
                player: player.name.clone(),
            }
            .into());
        }
        let rating = outcome.ratings.get(&player.name)?;

        let teams = columns
            .iter()
            .map(|tournament| {
                player
                    .team_in(tournament)
                    .map(|team| format!("{} / {}", tournament, team))
            })
            .collect();
        let snapshots = columns
            .iter()
            .map(|tournament| {
                outcome
                    .snapshots
                    .rating(tournament, &player.name)
                    .filter(|snapshot| !model.is_initial(snapshot))
                    .map(|snapshot| snapshot.conservative(k))
            })
            .collect();

        rows.push(PlayerRow {
            name: player.name.clone(),
            scene: player.scene.clone(),
            skill: rating.conservative(k),
            tournaments: player.tournaments.len(),
            games: counters.games,
            wins: counters.wins,
            losses: counters.losses,
            win_rate: counters.wins as f64 / counters.games as f64,
            teams,
            snapshots,
        });
    }

    Ok(rows)
}

/// Write the ratings CSV. Returns the number of player rows written.
pub fn write_ratings<W: Write>(writer: W, history: &LeagueHistory) -> Result<usize> {
    let rows = player_rows(history)?;
    let columns = tournament_columns(history);

    let mut wtr = csv::Writer::from_writer(writer);
    let mut header: Vec<&str> = FIXED_HEADERS.to_vec();
    header.extend(columns.iter().map(String::as_str));
    header.extend(columns.iter().map(String::as_str));
    wtr.write_record(&header)?;

    for row in &rows {
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;

    Ok(rows.len())
}

/// Write the ratings CSV to a file
pub fn write_ratings_file(path: &Path, history: &LeagueHistory) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let count = write_ratings(file, history)
        .with_context(|| format!("Failed to write ratings to {}", path.display()))?;

    info!("Wrote {} player ratings to {}", count, path.display());
    Ok(count)
}
