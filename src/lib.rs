//! League Skill - historical TrueSkill ratings for team leagues
//!
//! This crate replays a league's tournament rosters and match results in
//! chronological order, rating every player with TrueSkill, snapshotting the
//! ratings after each tournament, and aggregating how players fared with and
//! against each other.

pub mod config;
pub mod error;
pub mod ingest;
pub mod league;
pub mod rating;
pub mod replay;
pub mod report;
pub mod stats;
pub mod types;

// Re-export commonly used types and traits
pub use error::{LeagueError, Result};
pub use types::*;

// Re-export key components
pub use league::{LeagueHistory, RosterRow};
pub use rating::{SkillModel, TrueSkillModel};
pub use replay::{ReplayEngine, ReplayOutcome, WinOrder};
pub use stats::RatingObserver;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
