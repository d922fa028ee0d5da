//! Roster registry
//!
//! Tracks, per tournament, which players played on which team and in what
//! order. Rosters are append-only while datasets are ingested and are treated
//! as frozen once a replay starts.

use crate::error::{LeagueError, Result};
use crate::types::{PlayerName, TeamName, TournamentId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// A player as known from the rosters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: PlayerName,
    /// Local scene or affiliation, if the roster gave one
    pub scene: Option<String>,
    /// Tournaments in the order the player was first registered for them
    pub tournaments: Vec<TournamentId>,
    /// Team the player was on in each tournament
    pub teams: BTreeMap<TournamentId, TeamName>,
}

impl Player {
    fn new(name: PlayerName) -> Self {
        Self {
            name,
            scene: None,
            tournaments: Vec::new(),
            teams: BTreeMap::new(),
        }
    }

    pub fn team_in(&self, tournament: &str) -> Option<&TeamName> {
        self.teams.get(tournament)
    }
}

/// Why a roster entry needs manual review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncompleteReason {
    /// No player name was given; a "<team> <n>" placeholder was used
    PlaceholderName,
    /// The player has no scene tag
    MissingScene,
    /// The same name appears more than once on one team
    DuplicateMember { team: TeamName },
}

/// Non-fatal data-quality advisory raised while building rosters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompletePlayer {
    pub tournament: TournamentId,
    pub player: PlayerName,
    pub reason: IncompleteReason,
}

impl std::fmt::Display for IncompletePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            IncompleteReason::PlaceholderName => write!(f, "{}: {}", self.tournament, self.player),
            IncompleteReason::MissingScene => {
                write!(f, "{}: {} (no scene)", self.tournament, self.player)
            }
            IncompleteReason::DuplicateMember { team } => write!(
                f,
                "{}: {} listed more than once on {}",
                self.tournament, self.player, team
            ),
        }
    }
}

fn blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Tournament → team → ordered roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterRegistry {
    /// Tournament ids in first-registration order
    tournaments: Vec<TournamentId>,
    teams: BTreeMap<TournamentId, BTreeMap<TeamName, Vec<PlayerName>>>,
    players: BTreeMap<PlayerName, Player>,
    incomplete: Vec<IncompletePlayer>,
}

impl RosterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player to a team within a tournament.
    ///
    /// A missing player name is replaced by `"<team> <n>"`, where `n` is the
    /// player's 1-based position on the team. Returns the name the player was
    /// registered under.
    pub fn register(
        &mut self,
        tournament: &str,
        team: Option<&str>,
        player: Option<&str>,
        scene: Option<&str>,
    ) -> Result<PlayerName> {
        let team = blank(team).ok_or_else(|| LeagueError::MissingTeam {
            tournament: tournament.to_string(),
            player: player.map(str::to_string),
        })?;

        if !self.teams.contains_key(tournament) {
            self.tournaments.push(tournament.to_string());
        }
        let roster = self
            .teams
            .entry(tournament.to_string())
            .or_default()
            .entry(team.to_string())
            .or_default();

        let (name, scene) = match blank(player) {
            Some(name) => (name.to_string(), blank(scene)),
            None => {
                let placeholder = format!("{} {}", team, roster.len() + 1);
                self.incomplete.push(IncompletePlayer {
                    tournament: tournament.to_string(),
                    player: placeholder.clone(),
                    reason: IncompleteReason::PlaceholderName,
                });
                (placeholder, None)
            }
        };

        if roster.contains(&name) {
            warn!("{}: {} listed more than once on {}", tournament, name, team);
            self.incomplete.push(IncompletePlayer {
                tournament: tournament.to_string(),
                player: name.clone(),
                reason: IncompleteReason::DuplicateMember {
                    team: team.to_string(),
                },
            });
        }
        roster.push(name.clone());

        let is_placeholder = blank(player).is_none();
        let record = self
            .players
            .entry(name.clone())
            .or_insert_with(|| Player::new(name.clone()));
        if let Some(scene) = scene {
            record.scene = Some(scene.to_string());
        }
        if !record.tournaments.iter().any(|t| t == tournament) {
            record.tournaments.push(tournament.to_string());
        }
        record
            .teams
            .insert(tournament.to_string(), team.to_string());

        if !is_placeholder && record.scene.is_none() {
            self.incomplete.push(IncompletePlayer {
                tournament: tournament.to_string(),
                player: name.clone(),
                reason: IncompleteReason::MissingScene,
            });
        }

        Ok(name)
    }

    /// Ordered roster of a team
    pub fn team_roster(&self, tournament: &str, team: &str) -> Result<&[PlayerName]> {
        let teams = self
            .teams
            .get(tournament)
            .ok_or_else(|| LeagueError::UnknownTournament {
                tournament: tournament.to_string(),
            })?;

        teams
            .get(team)
            .map(Vec::as_slice)
            .ok_or_else(|| LeagueError::UnknownTeam {
                tournament: tournament.to_string(),
                team: team.to_string(),
            })
    }

    pub fn has_tournament(&self, tournament: &str) -> bool {
        self.teams.contains_key(tournament)
    }

    pub fn has_team(&self, tournament: &str, team: &str) -> bool {
        self.teams
            .get(tournament)
            .is_some_and(|teams| teams.contains_key(team))
    }

    /// Tournament ids in first-registration order
    pub fn tournaments(&self) -> &[TournamentId] {
        &self.tournaments
    }

    /// Team names of a tournament, in name order
    pub fn team_names(&self, tournament: &str) -> Result<Vec<&TeamName>> {
        self.teams
            .get(tournament)
            .map(|teams| teams.keys().collect())
            .ok_or_else(|| LeagueError::UnknownTournament {
                tournament: tournament.to_string(),
            })
    }

    pub fn player(&self, name: &str) -> Result<&Player> {
        self.players
            .get(name)
            .ok_or_else(|| LeagueError::UnknownPlayer {
                player: name.to_string(),
            })
    }

    /// All players in name order
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn player_names(&self) -> impl Iterator<Item = &PlayerName> {
        self.players.keys()
    }

    /// Placeholder-named, scene-less and duplicated entries, in the order found
    pub fn incomplete_players(&self) -> &[IncompletePlayer] {
        &self.incomplete
    }

    /// Advisories rendered one per line
    pub fn advisories(&self) -> Vec<String> {
        self.incomplete.iter().map(ToString::to_string).collect()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builds_ordered_roster() {
        let mut registry = RosterRegistry::new();
        registry
            .register("BB4", Some("Ni Howdy"), Some("Woody"), Some("SF"))
            .unwrap();
        registry
            .register("BB4", Some("Ni Howdy"), Some("Helen"), Some("SF"))
            .unwrap();
        registry
            .register("BB4", Some("Clean"), Some("Sam"), Some("PDX"))
            .unwrap();

        assert_eq!(
            registry.team_roster("BB4", "Ni Howdy").unwrap(),
            &["Woody".to_string(), "Helen".to_string()]
        );
        assert_eq!(registry.tournaments(), &["BB4".to_string()]);
        assert_eq!(registry.player_count(), 3);
        assert_eq!(
            registry.player("Sam").unwrap().scene.as_deref(),
            Some("PDX")
        );
        assert!(registry.incomplete_players().is_empty());
    }

    #[test]
    fn test_empty_team_is_missing_team() {
        let mut registry = RosterRegistry::new();
        let err = registry
            .register("BB4", Some("  "), Some("Woody"), Some("SF"))
            .unwrap_err();
        assert_eq!(
            err,
            LeagueError::MissingTeam {
                tournament: "BB4".to_string(),
                player: Some("Woody".to_string())
            }
        );
        assert!(registry.register("BB4", None, None, None).is_err());
        // Nothing is created for a rejected row
        assert!(registry.tournaments().is_empty());
    }

    #[test]
    fn test_missing_player_gets_placeholder() {
        let mut registry = RosterRegistry::new();
        registry
            .register("KQ30", Some("Bees"), Some("Ada"), Some("SEA"))
            .unwrap();
        let name = registry
            .register("KQ30", Some("Bees"), None, Some("SEA"))
            .unwrap();
        let first = registry
            .register("KQ30", Some("Wasps"), Some(""), None)
            .unwrap();

        assert_eq!(name, "Bees 2");
        assert_eq!(first, "Wasps 1");
        // Placeholders never carry a scene, even if the row had one
        assert_eq!(registry.player("Bees 2").unwrap().scene, None);

        let incomplete: Vec<String> = registry
            .incomplete_players()
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(incomplete, vec!["KQ30: Bees 2", "KQ30: Wasps 1"]);
    }

    #[test]
    fn test_scene_less_player_is_flagged() {
        let mut registry = RosterRegistry::new();
        registry
            .register("KQ30", Some("Bees"), Some("Ada"), None)
            .unwrap();

        let advisories = registry.incomplete_players();
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].reason, IncompleteReason::MissingScene);
    }

    #[test]
    fn test_duplicate_member_flagged_not_rejected() {
        let mut registry = RosterRegistry::new();
        registry
            .register("KQ30", Some("Bees"), Some("Ada"), Some("SEA"))
            .unwrap();
        registry
            .register("KQ30", Some("Bees"), Some("Ada"), Some("SEA"))
            .unwrap();

        assert_eq!(registry.team_roster("KQ30", "Bees").unwrap().len(), 2);
        assert_eq!(
            registry.player("Ada").unwrap().tournaments,
            vec!["KQ30".to_string()]
        );
        assert!(matches!(
            registry.incomplete_players()[0].reason,
            IncompleteReason::DuplicateMember { .. }
        ));
    }

    #[test]
    fn test_player_across_tournaments() {
        let mut registry = RosterRegistry::new();
        registry
            .register("BB3", Some("Clean"), Some("Ada"), Some("SF"))
            .unwrap();
        registry
            .register("BB4", Some("Ni Howdy"), Some("Ada"), None)
            .unwrap();

        let ada = registry.player("Ada").unwrap();
        assert_eq!(ada.tournaments, vec!["BB3".to_string(), "BB4".to_string()]);
        assert_eq!(ada.team_in("BB4").map(String::as_str), Some("Ni Howdy"));
        // A blank scene never erases a known one
        assert_eq!(ada.scene.as_deref(), Some("SF"));
        assert_eq!(
            registry.tournaments(),
            &["BB3".to_string(), "BB4".to_string()]
        );
    }

    #[test]
    fn test_unknown_lookups() {
        let mut registry = RosterRegistry::new();
        registry
            .register("BB4", Some("Clean"), Some("Ada"), Some("SF"))
            .unwrap();

        assert_eq!(
            registry.team_roster("BB9", "Clean"),
            Err(LeagueError::UnknownTournament {
                tournament: "BB9".to_string()
            })
        );
        assert_eq!(
            registry.team_roster("BB4", "Dirty"),
            Err(LeagueError::UnknownTeam {
                tournament: "BB4".to_string(),
                team: "Dirty".to_string()
            })
        );
        assert!(registry.has_team("BB4", "Clean"));
        assert!(!registry.has_team("BB4", "Dirty"));
        assert!(registry.player("Bo").is_err());
    }
}
