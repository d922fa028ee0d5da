//! Error types for the rating engine
//!
//! The core (roster, ledger, replay, reports) returns [`LeagueError`] directly so
//! callers can match on the failure kind. The file and command line layers wrap
//! these in `anyhow` with context, the same way the configuration module does.

use crate::types::{PlayerName, TeamName, TournamentId};

/// Result type alias for the core engine
pub type Result<T> = std::result::Result<T, LeagueError>;

/// Failure kinds raised while building rosters, replaying, or reporting
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LeagueError {
    #[error("{tournament}: roster row for player {player:?} has an empty team")]
    MissingTeam {
        tournament: TournamentId,
        player: Option<PlayerName>,
    },

    #[error("Tournament not found: {tournament}")]
    UnknownTournament { tournament: TournamentId },

    #[error("Team not found: {team} in {tournament}")]
    UnknownTeam {
        tournament: TournamentId,
        team: TeamName,
    },

    #[error("Player not found: {player}")]
    UnknownPlayer { player: PlayerName },

    #[error("Match ledger failed validation with {} error(s):\n{}", .errors.len(), .errors.join("\n"))]
    LedgerIntegrity { errors: Vec<String> },

    #[error("{player} has zero recorded games; roster and match ledger disagree")]
    ZeroGamesPlayed { player: PlayerName },

    #[error("Cannot estimate win probability: {side} has no ratings")]
    EmptyTeam { side: &'static str },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Skill model failure: {reason}")]
    SkillModelFailed { reason: String },

    #[error("Ratings have not been calculated for the current data")]
    NotRecalculated,
}
