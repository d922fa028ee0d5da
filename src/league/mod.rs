//! League data: rosters, match results and the history that ties them together

pub mod history;
pub mod ledger;
pub mod roster;

pub use history::{LeagueHistory, RosterRow};
pub use ledger::MatchLedger;
pub use roster::{IncompletePlayer, IncompleteReason, Player, RosterRegistry};
