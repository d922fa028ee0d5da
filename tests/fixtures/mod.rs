//! Test fixtures and helpers for integration testing

#![allow(dead_code)]

use league_skill::config::{ReplaySettings, SkillSettings};
use league_skill::error::Result;
use league_skill::ingest::{ingest_matches, ingest_players};
use league_skill::league::RosterRegistry;
use league_skill::rating::MockSkillModel;
use league_skill::stats::RatingObserver;
use league_skill::types::{MatchRecord, RatingUpdateEvent};
use league_skill::LeagueHistory;
use std::sync::{Arc, Mutex};

/// Two tournaments. Blank team cells continue the team above; Wasps in BB1
/// has only three members, one of them unnamed.
pub const ROSTER_CSV: &str = "\
Tournament,Team,Player,Scene
BB1,Bees,Ada,SF
BB1,,Bo,SF
BB1,,Cal,SF
BB1,,Dee,SF
BB1,,Eve,SF
BB1,Wasps,Fay,PDX
BB1,,Gus,PDX
BB1,,,
BB2,Bees,Ada,SF
BB2,,Fay,PDX
BB2,,Cal,SF
BB2,,Hal,
BB2,,Ivy,LA
BB2,Wasps,Bo,SF
BB2,,Dee,SF
BB2,,Eve,SF
BB2,,Gus,PDX
BB2,,Jo,LA
";

/// Results deliberately out of chronological order
pub const MATCHES_CSV: &str = "\
Tournament,Bracket,Team1,Team2,Team1Wins,Team2Wins,Time
BB2,Final,Wasps,Bees,3,1,2019-05-04T18:00:00-0700
BB1,Swiss,Bees,Wasps,2,1,2019-01-12T10:00:00-0800
BB2,Swiss,Bees,Wasps,2,0,2019-05-04T11:00:00-0700
BB1,Final,Wasps,Bees,2,3,2019-01-12T16:00:00-0800
";

/// One unknown team, one unknown tournament, one unreadable timestamp
pub const BAD_MATCHES_CSV: &str = "\
Tournament,Bracket,Team1,Team2,Team1Wins,Team2Wins,Time
BB1,Swiss,Bees,Hornets,2,1,2019-01-12T10:00:00-0800
BB9,Swiss,Bees,Wasps,2,1,2019-01-12T10:00:00-0800
BB1,Swiss,Bees,Wasps,2,1,yesterday
";

/// Every player named in [`ROSTER_CSV`]
pub const PLAYERS: [&str; 11] = [
    "Ada", "Bo", "Cal", "Dee", "Eve", "Fay", "Gus", "Wasps 3", "Hal", "Ivy", "Jo",
];

/// Empty TrueSkill history with default settings
pub fn empty_history() -> LeagueHistory {
    LeagueHistory::new(SkillSettings::default(), ReplaySettings::default())
        .expect("default settings are valid")
}

/// TrueSkill history with the fixture datasets ingested but not replayed
pub fn fixture_history() -> LeagueHistory {
    let mut history = empty_history();
    ingest_players(ROSTER_CSV.as_bytes(), &mut history).expect("fixture roster ingests");
    ingest_matches(MATCHES_CSV.as_bytes(), &mut history).expect("fixture matches ingest");
    history
}

/// Fixture datasets rated by a recording mock model
pub fn mock_history() -> (LeagueHistory, Arc<MockSkillModel>) {
    let model = Arc::new(MockSkillModel::default());
    let mut history = LeagueHistory::with_model(model.clone(), ReplaySettings::default())
        .expect("default settings are valid");
    ingest_players(ROSTER_CSV.as_bytes(), &mut history).expect("fixture roster ingests");
    ingest_matches(MATCHES_CSV.as_bytes(), &mut history).expect("fixture matches ingest");
    (history, model)
}

/// Registry with `teams` of `size` players each in a single tournament
pub fn single_tournament_roster(tournament: &str, teams: &[&str], size: usize) -> RosterRegistry {
    let mut registry = RosterRegistry::new();
    for team in teams {
        for n in 1..=size {
            let player = format!("{}-{}", team, n);
            registry
                .register(tournament, Some(team), Some(&player), Some("SF"))
                .expect("team name is present");
        }
    }
    registry
}

/// Match record at `hour` o'clock on New Year's day 2019, UTC
pub fn match_at(tournament: &str, team1: &str, team2: &str, wins: (u32, u32), hour: u32) -> MatchRecord {
    MatchRecord {
        tournament: tournament.to_string(),
        bracket: "Swiss".to_string(),
        team1: team1.to_string(),
        team2: team2.to_string(),
        team1_wins: wins.0,
        team2_wins: wins.1,
        timestamp: chrono::DateTime::parse_from_rfc3339(&format!(
            "2019-01-01T{:02}:00:00+00:00",
            hour
        ))
        .expect("valid fixture timestamp"),
    }
}

/// Observer that appends `(label, player)` to a log shared between observers,
/// so tests can check the order observers were called in
#[derive(Debug, Clone)]
pub struct RecordingObserver {
    label: &'static str,
    log: Arc<Mutex<Vec<(&'static str, String)>>>,
}

impl RecordingObserver {
    pub fn new(label: &'static str, log: Arc<Mutex<Vec<(&'static str, String)>>>) -> Self {
        Self { label, log }
    }
}

impl RatingObserver for RecordingObserver {
    fn observe(&mut self, event: &RatingUpdateEvent, _rosters: &RosterRegistry) -> Result<()> {
        if let Ok(mut log) = self.log.lock() {
            log.push((self.label, event.player.clone()));
        }
        Ok(())
    }
}
