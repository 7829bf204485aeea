//! Global trigger contract and the per-event accumulator shared by variants
//!
//! Event lifecycle:
//! - IDLE: after `new_event`, per-event inputs cleared, counters untouched
//! - ACCUMULATING: after the first accepted `add_*` call
//! - COMPUTED: after `calculate_trigger_decision`; later calls return the same
//!   decision and never bump counters again

use crate::types::{
    DataObject, DataType, EventCounters, EventState, GlobalTriggerDecision, InputReason,
    Specification, TriggerDecision, TriggerInput,
};

/// Logic for one trigger menu.
///
/// Driven from a single thread: `new_event`, any number of `add_*` calls in any
/// order, then `calculate_trigger_decision`.
pub trait GlobalTrigger: Send {
    /// Class name of this variant
    fn class_name(&self) -> &str;

    /// Start a new event, clearing per-event state
    fn new_event(&mut self);

    /// Fold a lower-level trigger decision into the event
    fn add_decision(&mut self, decision: &TriggerDecision);

    /// Fold a data object found in a block of `data_type` / `spec` into the event
    fn add_object(
        &mut self,
        payload: &serde_json::Value,
        data_type: &DataType,
        spec: Specification,
    );

    /// Count an input that could not be decoded, so it is never added
    fn reject_input(&mut self, reason: InputReason);

    /// Compute the global decision for the current event
    fn calculate_trigger_decision(&mut self) -> GlobalTriggerDecision;

    /// Run-level counters, one per trigger class
    fn counters(&self) -> &EventCounters;

    /// Where the current event stands
    fn state(&self) -> EventState;

    /// Inputs ignored during the current event
    fn ignored_inputs(&self) -> u64 {
        0
    }

    /// Dispatch either input shape to the matching `add_*` method
    fn add(&mut self, input: &TriggerInput) {
        match input {
            TriggerInput::Decision(decision) => self.add_decision(decision),
            TriggerInput::Object(object) => {
                self.add_object(&object.payload, &object.data_type, object.spec)
            }
        }
    }
}

/// Per-event input store used by the built-in variants
#[derive(Debug, Clone)]
pub struct EventAccumulator {
    state: EventState,
    decisions: Vec<TriggerDecision>,
    objects: Vec<DataObject>,
    ignored: u64,
    computed: Option<GlobalTriggerDecision>,
}

impl Default for EventAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl EventAccumulator {
    pub fn new() -> Self {
        Self {
            state: EventState::Idle,
            decisions: Vec::new(),
            objects: Vec::new(),
            ignored: 0,
            computed: None,
        }
    }

    /// Clear everything gathered for the previous event
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Store a decision, or log and skip it
    pub fn add_decision(&mut self, decision: &TriggerDecision) -> Result<(), InputReason> {
        let accepted = self.accepting().and_then(|_| decision.validate());
        match accepted {
            Ok(()) => {
                self.decisions.push(decision.clone());
                self.state = EventState::Accumulating;
                Ok(())
            }
            Err(reason) => Err(self.ignore(reason)),
        }
    }

    /// Store a tagged object, or log and skip it
    pub fn add_object(
        &mut self,
        payload: &serde_json::Value,
        data_type: &DataType,
        spec: Specification,
    ) -> Result<(), InputReason> {
        if let Err(reason) = self.accepting() {
            return Err(self.ignore(reason));
        }
        self.objects
            .push(DataObject::new(*data_type, spec).with_payload(payload.clone()));
        self.state = EventState::Accumulating;
        Ok(())
    }

    /// Count an input the variant chose not to use
    pub fn ignore(&mut self, reason: InputReason) -> InputReason {
        self.ignored += 1;
        log::warn!("input ignored [{}]", reason);
        reason
    }

    /// Skip an object the variant has no use for
    pub fn skip_object(&mut self) -> InputReason {
        let reason = match self.accepting() {
            Ok(()) => InputReason::R203_OBJECT_NOT_USED,
            Err(reason) => reason,
        };
        self.ignore(reason)
    }

    fn accepting(&self) -> Result<(), InputReason> {
        if self.state == EventState::Computed {
            return Err(InputReason::R204_AFTER_COMPUTE);
        }
        Ok(())
    }

    /// Decisions added this event, in input order
    pub fn decisions(&self) -> &[TriggerDecision] {
        &self.decisions
    }

    /// Objects added this event, in input order
    pub fn objects(&self) -> &[DataObject] {
        &self.objects
    }

    /// Any input accepted this event?
    pub fn has_inputs(&self) -> bool {
        !self.decisions.is_empty() || !self.objects.is_empty()
    }

    /// True when a decision called `name` was added and fired
    pub fn decision_fired(&self, name: &str) -> bool {
        self.decisions.iter().any(|d| d.name == name && d.fired)
    }

    /// True when any added decision fired
    pub fn any_fired(&self) -> bool {
        self.decisions.iter().any(|d| d.fired)
    }

    /// True when an object of a matching type (and spec, if given) was added
    pub fn has_object(&self, data_type: &DataType, spec: Option<Specification>) -> bool {
        self.objects.iter().any(|o| {
            data_type.matches(&o.data_type) && spec.map_or(true, |s| s == o.spec)
        })
    }

    pub fn state(&self) -> EventState {
        self.state
    }

    pub fn ignored(&self) -> u64 {
        self.ignored
    }

    /// Decision already computed for this event
    pub fn computed(&self) -> Option<&GlobalTriggerDecision> {
        self.computed.as_ref()
    }

    /// Remember the decision and mark the event computed
    pub fn finish(&mut self, decision: GlobalTriggerDecision) -> GlobalTriggerDecision {
        self.state = EventState::Computed;
        self.computed = Some(decision.clone());
        decision
    }
}
