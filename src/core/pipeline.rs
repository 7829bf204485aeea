//! Per-event pipeline driver
//!
//! Feeds one [`EventRecord`] at a time through a trigger:
//! `new_event` → `reject_input` for each input that failed to decode → `add`
//! for each input in order → `calculate_trigger_decision`.

use serde::{Deserialize, Serialize};

use crate::core::GlobalTrigger;
use crate::types::{EventRecord, GlobalTriggerDecision};
use crate::TriggerError;

/// Run one event through `trigger`
pub fn process_event(
    trigger: &mut dyn GlobalTrigger,
    record: &EventRecord,
) -> GlobalTriggerDecision {
    trigger.new_event();
    for reason in &record.rejected {
        trigger.reject_input(*reason);
    }
    for input in &record.inputs {
        trigger.add(input);
    }
    let mut decision = trigger.calculate_trigger_decision();
    decision.event_id = record.event_id;
    log::debug!(
        "event {} {} -> fired={} [{}]",
        record.event_id,
        trigger.state(),
        decision.fired,
        decision.reason.code()
    );
    decision
}

/// Parse one JSON line; blank lines and `#` comments give `None`.
///
/// Only a line that is not an event at all is an error; bad inputs inside an
/// event end up in [`EventRecord::rejected`].
pub fn parse_event_line(line: &str) -> Result<Option<EventRecord>, TriggerError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Totals over a run of events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub trigger: String,
    pub events: u64,
    pub fired: u64,
    pub ignored_inputs: u64,
    /// Run-level counters of the trigger, in trigger-class order
    pub counters: Vec<u64>,
}

/// Trigger plus run totals
pub struct EventPipeline {
    trigger: Box<dyn GlobalTrigger>,
    summary: RunSummary,
}

impl EventPipeline {
    pub fn new(trigger: Box<dyn GlobalTrigger>) -> Self {
        let summary = RunSummary {
            trigger: trigger.class_name().to_string(),
            counters: trigger.counters().as_slice().to_vec(),
            ..RunSummary::default()
        };
        Self { trigger, summary }
    }

    /// Process one event and update the totals
    pub fn process(&mut self, record: &EventRecord) -> GlobalTriggerDecision {
        let decision = process_event(self.trigger.as_mut(), record);
        self.summary.events += 1;
        if decision.fired {
            self.summary.fired += 1;
        }
        self.summary.ignored_inputs += self.trigger.ignored_inputs();
        self.summary.counters = self.trigger.counters().as_slice().to_vec();
        decision
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Stop the run and hand back the totals
    pub fn finish(self) -> RunSummary {
        self.summary
    }
}
