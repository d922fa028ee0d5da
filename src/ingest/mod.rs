//! CSV dataset ingestion
//!
//! A dataset is a roster file plus a results file. Rosters are registered
//! first so the results can be checked against them.

pub mod matches;
pub mod players;

pub use matches::{ingest_matches, read_match_rows, TIMESTAMP_FORMAT};
pub use players::{ingest_players, read_roster_rows};

use crate::config::app::DatasetPaths;
use crate::league::history::LeagueHistory;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Ingest one roster file and its results file
pub fn ingest_dataset(
    players_path: &Path,
    matches_path: &Path,
    history: &mut LeagueHistory,
) -> Result<()> {
    let players = File::open(players_path)
        .with_context(|| format!("Failed to open roster file {}", players_path.display()))?;
    ingest_players(players, history)
        .with_context(|| format!("Failed to ingest players from {}", players_path.display()))?;

    let matches = File::open(matches_path)
        .with_context(|| format!("Failed to open results file {}", matches_path.display()))?;
    ingest_matches(matches, history)
        .with_context(|| format!("Failed to ingest matches from {}", matches_path.display()))?;

    info!(
        "Ingested {} and {}",
        players_path.display(),
        matches_path.display()
    );
    Ok(())
}

/// Ingest datasets in order, stopping at the first failure
pub fn ingest_all(datasets: &[DatasetPaths], history: &mut LeagueHistory) -> Result<()> {
    for dataset in datasets {
        ingest_dataset(&dataset.players, &dataset.matches, history)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::rating::SkillSettings;
    use crate::config::replay::ReplaySettings;

    #[test]
    fn test_missing_file_names_the_path() {
        let mut history =
            LeagueHistory::new(SkillSettings::default(), ReplaySettings::default()).unwrap();

        let err = ingest_dataset(
            Path::new("/nonexistent/players.csv"),
            Path::new("/nonexistent/matches.csv"),
            &mut history,
        )
        .unwrap_err();

        assert!(err
            .to_string()
            .contains("Failed to open roster file /nonexistent/players.csv"));
    }
}
