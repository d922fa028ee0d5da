//! Match result file ingestion
//!
//! Columns: tournament, bracket, team1, team2, team1 wins, team2 wins,
//! timestamp. The first row is a header.

use crate::league::history::LeagueHistory;
use crate::types::MatchRecord;
use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use std::io::Read;
use tracing::info;

/// Timestamp layout of the results files, e.g. `2019-03-02T14:05:00-0800`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

const COLUMNS: usize = 7;

/// Most games one side can be credited with in a single match
pub const MAX_WINS: u32 = 999;

fn parse_wins(value: &str, column: &str) -> std::result::Result<u32, String> {
    let wins = value
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid {} '{}'", column, value))?;
    if wins > MAX_WINS {
        return Err(format!(
            "invalid {} '{}': more than {} games",
            column, value, MAX_WINS
        ));
    }
    Ok(wins)
}

/// Results files use [`TIMESTAMP_FORMAT`]; RFC 3339 (`Z` or `+08:00`) is
/// accepted as well
fn parse_timestamp(value: &str) -> chrono::ParseResult<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|e| DateTime::parse_from_rfc3339(value).map_err(|_| e))
}

fn parse_record(record: &csv::StringRecord) -> std::result::Result<MatchRecord, String> {
    if record.len() < COLUMNS {
        return Err(format!(
            "expected {} columns, found {}",
            COLUMNS,
            record.len()
        ));
    }

    let text = |index: usize| record[index].trim().to_string();
    let timestamp = parse_timestamp(record[6].trim())
        .map_err(|e| format!("invalid timestamp '{}': {}", &record[6], e))?;

    Ok(MatchRecord {
        tournament: text(0),
        bracket: text(1),
        team1: text(2),
        team2: text(3),
        team1_wins: parse_wins(&record[4], "team1 wins")?,
        team2_wins: parse_wins(&record[5], "team2 wins")?,
        timestamp,
    })
}

/// Parse match rows. Rows that cannot be read are returned as descriptions
/// alongside the rows that could.
pub fn read_match_rows<R: Read>(reader: R) -> (Vec<MatchRecord>, Vec<String>) {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (index, row) in csv_reader.records().enumerate() {
        let line = index + 2;
        let parsed = row
            .map_err(|e| e.to_string())
            .and_then(|row| parse_record(&row));
        match parsed {
            Ok(record) => records.push(record),
            Err(reason) => errors.push(format!("row {}: {}", line, reason)),
        }
    }

    (records, errors)
}

/// Add every match of a results file and validate the whole ledger against
/// the rosters. Unreadable rows and unknown tournaments or teams are reported
/// together, and the file is then rejected as a whole. Returns the number of
/// matches added.
pub fn ingest_matches<R: Read>(reader: R, history: &mut LeagueHistory) -> Result<usize> {
    let (records, errors) = read_match_rows(reader);
    let count = history.add_matches(records, errors)?;

    info!(
        "Processed {} matches, now tracking {} matches",
        count,
        history.ledger().len()
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::rating::SkillSettings;
    use crate::config::replay::ReplaySettings;
    use crate::error::LeagueError;
    use crate::league::history::RosterRow;

    const HEADER: &str = "Tournament,Bracket,Team1,Team2,Team1Wins,Team2Wins,Time\n";

    fn history() -> LeagueHistory {
        let mut history =
            LeagueHistory::new(SkillSettings::default(), ReplaySettings::default()).unwrap();
        history
            .register_players(&[
                RosterRow::new("BB4", "Bees", "Ada", "SF"),
                RosterRow::new("BB4", "Wasps", "Cy", "SF"),
            ])
            .unwrap();
        history
    }

    #[test]
    fn test_parses_offset_timestamps() {
        let csv = format!("{HEADER}BB4,Swiss,Bees,Wasps,2,1,2019-03-02T14:05:00-0800\n");
        let (records, errors) = read_match_rows(csv.as_bytes());

        assert!(errors.is_empty());
        let record = &records[0];
        assert_eq!(record.team1_wins, 2);
        assert_eq!(record.team2_wins, 1);
        assert_eq!(
            record.timestamp.to_rfc3339(),
            "2019-03-02T14:05:00-08:00"
        );
    }

    #[test]
    fn test_parses_utc_suffix() {
        let csv = format!(
            "{HEADER}BB4,Swiss,Bees,Wasps,2,1,2019-03-02T22:05:00Z\n\
             BB4,Swiss,Bees,Wasps,2,1,2019-03-02T14:05:00-08:00\n"
        );
        let (records, errors) = read_match_rows(csv.as_bytes());

        assert!(errors.is_empty());
        assert_eq!(records[0].timestamp, records[1].timestamp);
        assert_eq!(records[0].timestamp.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_oversized_win_counts_are_rejected() {
        let csv = format!(
            "{HEADER}BB4,Swiss,Bees,Wasps,4294967295,1,2019-03-02T14:05:00-0800\n\
             BB4,Swiss,Bees,Wasps,3,1000,2019-03-02T14:05:00-0800\n"
        );
        let (records, errors) = read_match_rows(csv.as_bytes());

        assert!(records.is_empty());
        assert_eq!(
            errors,
            vec![
                "row 2: invalid team1 wins '4294967295': more than 999 games",
                "row 3: invalid team2 wins '1000': more than 999 games",
            ]
        );
    }

    #[test]
    fn test_bad_rows_are_described() {
        let csv = format!(
            "{HEADER}BB4,Swiss,Bees,Wasps,-1,1,2019-03-02T14:05:00-0800\n\
             BB4,Swiss,Bees,Wasps,2,1,March 2nd\n\
             BB4,Swiss,Bees\n"
        );
        let (records, errors) = read_match_rows(csv.as_bytes());

        assert!(records.is_empty());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], "row 2: invalid team1 wins '-1'");
        assert!(errors[1].starts_with("row 3: invalid timestamp 'March 2nd'"));
        assert_eq!(errors[2], "row 4: expected 7 columns, found 3");
    }

    #[test]
    fn test_ingest_accepts_valid_file() {
        let mut history = history();
        let csv = format!(
            "{HEADER}BB4,Swiss,Bees,Wasps,2,1,2019-03-02T14:05:00-0800\n\
             BB4,Final,Wasps,Bees,3,0,2019-03-02T18:00:00-0800\n"
        );

        assert_eq!(ingest_matches(csv.as_bytes(), &mut history).unwrap(), 2);
        assert_eq!(history.ledger().len(), 2);
    }

    #[test]
    fn test_one_bad_row_rejects_whole_file() {
        let mut history = history();
        let csv = format!(
            "{HEADER}BB4,Swiss,Bees,Wasps,2,1,2019-03-02T14:05:00-0800\n\
             BB4,Swiss,Bees,Hornets,2,1,2019-03-02T15:05:00-0800\n\
             BB9,Swiss,Bees,Wasps,x,1,2019-03-02T16:05:00-0800\n"
        );

        let err = ingest_matches(csv.as_bytes(), &mut history).unwrap_err();

        match err.downcast_ref::<LeagueError>() {
            Some(LeagueError::LedgerIntegrity { errors }) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0], "row 4: invalid team1 wins 'x'");
                assert!(errors[1].starts_with("Hornets not found in teams[BB4]"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(history.ledger().is_empty());
    }
}
