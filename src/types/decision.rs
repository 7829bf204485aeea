//! Global trigger decision returned to the pipeline driver

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{TriggerDecision, TriggerReason};

/// Result of one event's trigger evaluation.
///
/// Returned by value: the caller owns it, the trigger keeps no reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalTriggerDecision {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Event identifier, stamped by the pipeline driver
    pub event_id: u64,
    /// Class name of the trigger variant that produced this decision
    pub trigger: String,
    /// Did the global trigger fire?
    pub fired: bool,
    /// Trigger classes that fired this event
    pub trigger_classes: Vec<String>,
    /// Human-readable description
    pub description: String,
    /// Lower-level decisions added this event, in input order
    pub contributing: Vec<TriggerDecision>,
    /// Snapshot of the run-level counters after this event
    pub counters: Vec<u64>,
    /// Why the decision came out the way it did
    pub reason: TriggerReason,
}

impl GlobalTriggerDecision {
    /// Create a decision; the reason follows from `fired` and the inputs
    pub fn new(
        trigger: impl Into<String>,
        fired: bool,
        trigger_classes: Vec<String>,
        description: impl Into<String>,
        contributing: Vec<TriggerDecision>,
        saw_inputs: bool,
    ) -> Self {
        let reason = if fired {
            TriggerReason::R001_FIRED
        } else if saw_inputs {
            TriggerReason::R001_NOT_FIRED
        } else {
            TriggerReason::R002_NO_INPUTS
        };
        Self {
            timestamp: Utc::now(),
            event_id: 0,
            trigger: trigger.into(),
            fired,
            trigger_classes,
            description: description.into(),
            contributing,
            counters: Vec::new(),
            reason,
        }
    }

    /// Attach a counters snapshot
    pub fn with_counters(mut self, counters: &[u64]) -> Self {
        self.counters = counters.to_vec();
        self
    }

    /// Number of contributing lower-level decisions
    pub fn contributing_count(&self) -> usize {
        self.contributing.len()
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let (color, mark) = if self.fired {
            ("\x1b[32m", "✓")
        } else {
            ("\x1b[90m", "·")
        };
        format!(
            "{}{} event={} | fired={} | classes=[{}] | inputs={} | {}\x1b[0m",
            color,
            mark,
            self.event_id,
            self.fired,
            self.trigger_classes.join(","),
            self.contributing.len(),
            self.reason.code(),
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "event={} | fired={} | classes=[{}] | inputs={} | reason={}",
            self.event_id,
            self.fired,
            self.trigger_classes.join(","),
            self.contributing.len(),
            self.reason.code()
        )
    }
}
