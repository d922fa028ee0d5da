//! Chronological replay of the match history
//!
//! The engine drives the skill model over every match, the padding fills
//! short-handed teams with bots, and the policy decides the order in which a
//! match's individual game wins are rated.

pub mod engine;
pub mod padding;
pub mod policy;

pub use engine::{ReplayEngine, ReplayOutcome};
pub use padding::BotPadding;
pub use policy::WinOrder;
