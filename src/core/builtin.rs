//! Built-in trigger variant: fire when any lower-level trigger fired

use crate::core::{EventAccumulator, FactoryRegistry, GlobalTrigger};
use crate::types::{
    DataType, EventCounters, EventState, GlobalTriggerDecision, InputReason, RegistryReason,
    Specification, TriggerDecision,
};

/// Class name of [`AnyFiredTrigger`]
pub const ANY_FIRED_TRIGGER: &str = "AnyFiredTrigger";

/// Single trigger class that fires when any added decision fired.
///
/// The one counter counts fired events.
#[derive(Debug, Clone)]
pub struct AnyFiredTrigger {
    name: String,
    events: EventAccumulator,
    counters: EventCounters,
}

impl Default for AnyFiredTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl AnyFiredTrigger {
    pub fn new() -> Self {
        Self::with_name(ANY_FIRED_TRIGGER)
    }

    /// Same logic under another class name
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: EventAccumulator::new(),
            counters: EventCounters::new(1),
        }
    }
}

impl GlobalTrigger for AnyFiredTrigger {
    fn class_name(&self) -> &str {
        &self.name
    }

    fn new_event(&mut self) {
        self.events.reset();
    }

    fn add_decision(&mut self, decision: &TriggerDecision) {
        let _ = self.events.add_decision(decision);
    }

    fn add_object(
        &mut self,
        _payload: &serde_json::Value,
        _data_type: &DataType,
        _spec: Specification,
    ) {
        self.events.skip_object();
    }

    fn reject_input(&mut self, reason: InputReason) {
        self.events.ignore(reason);
    }

    fn calculate_trigger_decision(&mut self) -> GlobalTriggerDecision {
        if let Some(done) = self.events.computed() {
            return done.clone();
        }

        let fired = self.events.any_fired();
        if fired {
            // Counter 0 always exists
            let _ = self.counters.increment(0);
        }

        let (classes, description) = if fired {
            let names: Vec<&str> = self
                .events
                .decisions()
                .iter()
                .filter(|d| d.fired)
                .map(|d| d.name.as_str())
                .collect();
            (vec![self.name.clone()], format!("Fired by {}", names.join(", ")))
        } else {
            (Vec::new(), crate::DEFAULT_MENU_DESCRIPTION.to_string())
        };

        let decision = GlobalTriggerDecision::new(
            self.name.clone(),
            fired,
            classes,
            description,
            self.events.decisions().to_vec(),
            self.events.has_inputs(),
        )
        .with_counters(self.counters.as_slice());
        self.events.finish(decision)
    }

    fn counters(&self) -> &EventCounters {
        &self.counters
    }

    fn state(&self) -> EventState {
        self.events.state()
    }

    fn ignored_inputs(&self) -> u64 {
        self.events.ignored()
    }
}

/// Register every built-in variant
pub fn register_builtin(registry: &mut FactoryRegistry) -> Result<(), RegistryReason> {
    registry.register_fn(ANY_FIRED_TRIGGER, || Box::new(AnyFiredTrigger::new()))
}
