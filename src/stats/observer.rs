//! Rating update observer interface

use crate::error::Result;
use crate::league::roster::RosterRegistry;
use crate::types::RatingUpdateEvent;

/// Receives every rating update the replay engine emits.
///
/// Observers are called in registration order, once per event, after the
/// match's ratings have been written back. `rosters` is the registry the
/// replay is running against, so observers can resolve team names.
pub trait RatingObserver {
    fn observe(&mut self, event: &RatingUpdateEvent, rosters: &RosterRegistry) -> Result<()>;
}

/// Observer that keeps every event it sees, in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<RatingUpdateEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RatingUpdateEvent] {
        &self.events
    }
}

impl RatingObserver for EventLog {
    fn observe(&mut self, event: &RatingUpdateEvent, _rosters: &RosterRegistry) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}
