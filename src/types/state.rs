//! Per-event accumulator state

use serde::{Deserialize, Serialize};

/// Where an accumulator is within the current event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventState {
    /// Reset for a new event, nothing added yet
    Idle,
    /// At least one input added
    Accumulating,
    /// Decision computed for this event
    Computed,
}

impl std::fmt::Display for EventState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventState::Idle => "IDLE",
            EventState::Accumulating => "ACCUMULATING",
            EventState::Computed => "COMPUTED",
        };
        write!(f, "{}", name)
    }
}
