//! Core modules for the global trigger

pub mod builtin;
pub mod condition;
pub mod global;
pub mod menu;
pub mod pipeline;
pub mod registry;
pub mod trigger;

pub use builtin::{register_builtin, AnyFiredTrigger, ANY_FIRED_TRIGGER};
pub use condition::Condition;
pub use menu::{CompiledMenu, MenuFactory, MenuItem, MenuTrigger, TriggerMenu};
pub use pipeline::{parse_event_line, process_event, EventPipeline, RunSummary};
pub use registry::{FactoryRegistry, FnFactory, TriggerFactory};
pub use trigger::{EventAccumulator, GlobalTrigger};
