//! Output of a ratings run: the player ratings CSV and the audit listings

pub mod audit;
pub mod ratings;

pub use audit::{
    compare_ratings, incomplete_players, player_scene_list, player_summary, tournaments_by_year,
    PlayerSummary,
};
pub use ratings::{player_rows, tournament_columns, write_ratings, write_ratings_file, PlayerRow};
