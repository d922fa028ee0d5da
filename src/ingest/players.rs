//! Roster file ingestion
//!
//! Columns: tournament, team, player, scene. The first row is a header. A
//! blank team cell means "same team as the row above", which is how the
//! roster spreadsheets group players visually.

use crate::league::history::{LeagueHistory, RosterRow};
use anyhow::{anyhow, Context, Result};
use std::io::Read;
use tracing::info;

fn cell(record: &csv::StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Parse roster rows without registering them
pub fn read_roster_rows<R: Read>(reader: R) -> Result<Vec<RosterRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut last_team: Option<String> = None;

    for (index, record) in csv_reader.records().enumerate() {
        let line = index + 2;
        let record = record.with_context(|| format!("Failed to read roster row {}", line))?;

        let tournament =
            cell(&record, 0).ok_or_else(|| anyhow!("Roster row {} has no tournament", line))?;
        let team = match cell(&record, 1) {
            Some(team) => {
                last_team = Some(team.clone());
                Some(team)
            }
            None => last_team.clone(),
        };

        rows.push(RosterRow {
            tournament,
            team,
            player: cell(&record, 2),
            scene: cell(&record, 3),
        });
    }

    Ok(rows)
}

/// Register every row of a roster file. Either the whole file registers or
/// none of it does. Returns the number of rows processed.
pub fn ingest_players<R: Read>(reader: R, history: &mut LeagueHistory) -> Result<usize> {
    let rows = read_roster_rows(reader)?;
    let count = history.register_players(&rows)?;

    info!(
        "Processed {} players, now tracking {} players",
        count,
        history.rosters().player_count()
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::rating::SkillSettings;
    use crate::config::replay::ReplaySettings;
    use crate::error::LeagueError;

    fn history() -> LeagueHistory {
        LeagueHistory::new(SkillSettings::default(), ReplaySettings::default()).unwrap()
    }

    #[test]
    fn test_blank_team_inherits_previous_row() {
        let roster = "Tournament,Team,Player,Scene\nBB4,Ni Howdy,Woody,SF\nBB4,,Helen,SF\n";
        let rows = read_roster_rows(roster.as_bytes()).unwrap();
        assert_eq!(rows[1].team.as_deref(), Some("Ni Howdy"));
        assert_eq!(rows[1].player.as_deref(), Some("Helen"));
    }

    #[test]
    fn test_missing_tournament_names_the_row() {
        let roster = "Tournament,Team,Player,Scene\nBB4,Ni Howdy,Woody,SF\n,,Helen,SF\n";
        let err = read_roster_rows(roster.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Roster row 3 has no tournament");
    }

    #[test]
    fn test_cells_are_trimmed_and_blank_becomes_none() {
        let roster = "Tournament,Team,Player,Scene\nBB4,Clean,Sam, PDX\nBB4,Clean,,\n";
        let rows = read_roster_rows(roster.as_bytes()).unwrap();

        assert_eq!(rows[0], RosterRow::new("BB4", "Clean", "Sam", "PDX"));
        assert_eq!(rows[1].player, None);
        assert_eq!(rows[1].scene, None);
    }

    #[test]
    fn test_short_rows_are_accepted() {
        let roster = "Tournament,Team,Player,Scene\nBB4,Clean,Sam\n";
        let rows = read_roster_rows(roster.as_bytes()).unwrap();
        assert_eq!(rows[0].scene, None);
    }

    #[test]
    fn test_ingest_registers_placeholders() {
        let roster = "Tournament,Team,Player,Scene\nBB4,Clean,Sam,PDX\nBB4,,,\n";
        let mut history = history();

        assert_eq!(ingest_players(roster.as_bytes(), &mut history).unwrap(), 2);
        assert_eq!(
            history.rosters().team_roster("BB4", "Clean").unwrap(),
            &["Sam", "Clean 2"]
        );
        assert_eq!(history.rosters().advisories(), vec!["BB4: Clean 2"]);
    }

    #[test]
    fn test_leading_blank_team_rejects_file() {
        let roster = "Tournament,Team,Player,Scene\nBB4,,Sam,PDX\nBB4,Clean,Di,PDX\n";
        let mut history = history();

        let err = ingest_players(roster.as_bytes(), &mut history).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LeagueError>(),
            Some(LeagueError::MissingTeam { .. })
        ));
        assert_eq!(history.rosters().player_count(), 0);
    }
}
