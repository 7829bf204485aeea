//! Reason codes for registry operations, ignored inputs and trigger decisions
//!
//! Every code renders as `CODE: description`, so the same value works as a log
//! tag, an error and a field in serialized output.

use serde::{Deserialize, Serialize};

/// Reason carried by every computed global decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum TriggerReason {
    /// At least one trigger class fired
    R001_FIRED,
    /// Inputs were seen but no trigger class fired
    R001_NOT_FIRED,
    /// No input was added for this event
    R002_NO_INPUTS,
}

impl TriggerReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R001_FIRED => "R001_FIRED",
            Self::R001_NOT_FIRED => "R001_NOT_FIRED",
            Self::R002_NO_INPUTS => "R002_NO_INPUTS",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R001_FIRED => "Trigger fired",
            Self::R001_NOT_FIRED => "No trigger class fired",
            Self::R002_NO_INPUTS => "No inputs for this event",
        }
    }
}

impl std::fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Reason codes for factory registry operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum RegistryReason {
    /// Registry already holds its maximum number of factories
    R101_CAPACITY_EXCEEDED,
    /// A factory with the same class name is already registered
    R102_DUPLICATE_NAME,
    /// No factory is registered under the requested name
    R103_UNKNOWN_VARIANT,
    /// Unregister was asked for a name that is not registered
    R104_NOT_REGISTERED,
    /// Class name is empty
    R105_INVALID_NAME,
}

impl RegistryReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_CAPACITY_EXCEEDED => "R101_CAPACITY_EXCEEDED",
            Self::R102_DUPLICATE_NAME => "R102_DUPLICATE_NAME",
            Self::R103_UNKNOWN_VARIANT => "R103_UNKNOWN_VARIANT",
            Self::R104_NOT_REGISTERED => "R104_NOT_REGISTERED",
            Self::R105_INVALID_NAME => "R105_INVALID_NAME",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_CAPACITY_EXCEEDED => "Factory registry is full",
            Self::R102_DUPLICATE_NAME => "Trigger class already registered",
            Self::R103_UNKNOWN_VARIANT => "No factory registered for trigger class",
            Self::R104_NOT_REGISTERED => "Trigger class was not registered",
            Self::R105_INVALID_NAME => "Trigger class name is empty",
        }
    }
}

impl std::fmt::Display for RegistryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

impl std::error::Error for RegistryReason {}

/// Reason codes for inputs that were ignored by an accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum InputReason {
    /// Lower-level decision has no name
    R201_DECISION_UNNAMED,
    /// Data type id or origin is empty, too long or not ASCII
    R202_DATA_TYPE_INVALID,
    /// Variant does not use tagged objects
    R203_OBJECT_NOT_USED,
    /// Input arrived after the decision was computed for this event
    R204_AFTER_COMPUTE,
    /// Counter index outside the declared trigger classes
    R205_COUNTER_OUT_OF_RANGE,
    /// Input is neither a decision nor a tagged object
    R206_INPUT_MALFORMED,
}

impl InputReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R201_DECISION_UNNAMED => "R201_DECISION_UNNAMED",
            Self::R202_DATA_TYPE_INVALID => "R202_DATA_TYPE_INVALID",
            Self::R203_OBJECT_NOT_USED => "R203_OBJECT_NOT_USED",
            Self::R204_AFTER_COMPUTE => "R204_AFTER_COMPUTE",
            Self::R205_COUNTER_OUT_OF_RANGE => "R205_COUNTER_OUT_OF_RANGE",
            Self::R206_INPUT_MALFORMED => "R206_INPUT_MALFORMED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R201_DECISION_UNNAMED => "Decision has no name",
            Self::R202_DATA_TYPE_INVALID => "Invalid data block type",
            Self::R203_OBJECT_NOT_USED => "Trigger variant ignores data objects",
            Self::R204_AFTER_COMPUTE => "Input added after decision was computed",
            Self::R205_COUNTER_OUT_OF_RANGE => "Counter index out of range",
            Self::R206_INPUT_MALFORMED => "Input could not be decoded",
        }
    }
}

impl std::fmt::Display for InputReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

impl std::error::Error for InputReason {}

/// Reason codes for trigger menu compilation and loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum MenuReason {
    /// Condition expression could not be parsed (item, detail)
    R301_CONDITION_SYNTAX { item: String, detail: String },
    /// Two items share a trigger class name
    R302_DUPLICATE_ITEM(String),
    /// Menu has no items
    R303_EMPTY_MENU,
    /// Menu or item name is empty
    R304_UNNAMED,
}

impl MenuReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R301_CONDITION_SYNTAX { .. } => "R301_CONDITION_SYNTAX",
            Self::R302_DUPLICATE_ITEM(_) => "R302_DUPLICATE_ITEM",
            Self::R303_EMPTY_MENU => "R303_EMPTY_MENU",
            Self::R304_UNNAMED => "R304_UNNAMED",
        }
    }
}

impl std::fmt::Display for MenuReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::R301_CONDITION_SYNTAX { item, detail } => {
                write!(f, "{}: condition of '{}': {}", self.code(), item, detail)
            }
            Self::R302_DUPLICATE_ITEM(name) => {
                write!(f, "{}: trigger class '{}' declared twice", self.code(), name)
            }
            Self::R303_EMPTY_MENU => write!(f, "{}: menu has no items", self.code()),
            Self::R304_UNNAMED => write!(f, "{}: menu or item name is empty", self.code()),
        }
    }
}

impl std::error::Error for MenuReason {}
