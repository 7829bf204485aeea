//! Core types for the global trigger

mod counters;
mod data_type;
mod decision;
mod input;
mod reason;
mod state;

pub use counters::EventCounters;
pub use data_type::{DataType, Specification, DATA_TYPE_ID_LEN, DATA_TYPE_ORIGIN_LEN};
pub use decision::GlobalTriggerDecision;
pub use input::{DataObject, EventRecord, TriggerDecision, TriggerInput};
pub use reason::{InputReason, MenuReason, RegistryReason, TriggerReason};
pub use state::EventState;
