//! Trigger inputs: lower-level decisions and tagged data objects

use serde::{Deserialize, Serialize};

use crate::types::{DataType, InputReason, Specification};

/// Decision produced by a lower-level trigger component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerDecision {
    /// Name of the producing trigger (used by menu conditions)
    pub name: String,
    /// Did this trigger fire?
    pub fired: bool,
    /// Free-form description from the producer
    #[serde(default)]
    pub description: String,
}

impl TriggerDecision {
    /// Create a decision without description
    pub fn new(name: impl Into<String>, fired: bool) -> Self {
        Self {
            name: name.into(),
            fired,
            description: String::new(),
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the decision can be folded into an accumulator
    pub fn validate(&self) -> Result<(), InputReason> {
        if self.name.trim().is_empty() {
            return Err(InputReason::R201_DECISION_UNNAMED);
        }
        Ok(())
    }
}

/// Arbitrary data object found in a data block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataObject {
    /// Data block type the object was found in
    pub data_type: DataType,
    /// Data block specification the object was found in
    #[serde(default)]
    pub spec: Specification,
    /// Object content
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl DataObject {
    /// Create an object with no payload
    pub fn new(data_type: DataType, spec: Specification) -> Self {
        Self {
            data_type,
            spec,
            payload: serde_json::Value::Null,
        }
    }

    /// Attach a payload
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// One piece of evidence for the global trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerInput {
    /// A prior trigger decision
    Decision(TriggerDecision),
    /// A tagged data object
    Object(DataObject),
}

impl TriggerInput {
    /// Decode one input from JSON.
    ///
    /// An object whose data type is missing or invalid gives
    /// `R202_DATA_TYPE_INVALID`; anything else that fails gives
    /// `R206_INPUT_MALFORMED`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, InputReason> {
        let bad_data_type = value.get("kind").and_then(|k| k.as_str()) == Some("object")
            && value
                .get("data_type")
                .and_then(|t| t.as_str())
                .map_or(true, |t| t.parse::<DataType>().is_err());
        serde_json::from_value(value).map_err(|_| {
            if bad_data_type {
                InputReason::R202_DATA_TYPE_INVALID
            } else {
                InputReason::R206_INPUT_MALFORMED
            }
        })
    }
}

impl From<TriggerDecision> for TriggerInput {
    fn from(value: TriggerDecision) -> Self {
        Self::Decision(value)
    }
}

impl From<DataObject> for TriggerInput {
    fn from(value: DataObject) -> Self {
        Self::Object(value)
    }
}

/// All inputs for one event, as read by the pipeline driver.
///
/// Inputs are decoded one by one, so a bad input lands in `rejected` instead
/// of failing the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEventRecord")]
pub struct EventRecord {
    /// Event identifier
    pub event_id: u64,
    /// Inputs in the order they are to be added
    pub inputs: Vec<TriggerInput>,
    /// Inputs that could not be decoded
    #[serde(skip)]
    pub rejected: Vec<InputReason>,
}

impl EventRecord {
    pub fn new(event_id: u64, inputs: Vec<TriggerInput>) -> Self {
        Self {
            event_id,
            inputs,
            rejected: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
struct RawEventRecord {
    event_id: u64,
    #[serde(default)]
    inputs: Vec<serde_json::Value>,
}

impl From<RawEventRecord> for EventRecord {
    fn from(raw: RawEventRecord) -> Self {
        let mut record = EventRecord::new(raw.event_id, Vec::with_capacity(raw.inputs.len()));
        for value in raw.inputs {
            match TriggerInput::from_value(value) {
                Ok(input) => record.inputs.push(input),
                Err(reason) => record.rejected.push(reason),
            }
        }
        record
    }
}
