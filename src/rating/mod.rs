//! Rating system integration using the TrueSkill algorithm
//!
//! This module provides the skill model interface, its skillratings-backed
//! implementation, the rating store with tournament snapshots, and
//! win-probability estimation.

pub mod model;
pub mod probability;
pub mod store;
pub mod trueskill;

// Re-export commonly used types
pub use model::{MockSkillModel, SkillModel};
pub use probability::{win_probability, win_probability_single};
pub use store::{RatingComparison, RatingStore, SnapshotArchive};
pub use trueskill::TrueSkillModel;
