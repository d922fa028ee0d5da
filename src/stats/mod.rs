//! Statistics aggregation driven by rating update events
//!
//! Observers subscribe to the replay engine's event stream and keep running
//! totals keyed by player pairs.

pub mod aggregate;
pub mod observer;

pub use aggregate::{AggregatedStat, ByOpponent, ByTeammate, PairStats};
pub use observer::{EventLog, RatingObserver};
