//! hlt-trigger: global trigger factory registry and decision accumulator
//!
//! Trigger variants register a factory by class name, are created by name at
//! runtime, and are driven once per event: NewEvent → Add... → Compute.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod types;

pub use error::TriggerError;

// =============================================================================
// REGISTRY
// =============================================================================

/// Default number of factories a registry can hold
pub const MAX_FACTORIES: usize = 8;

// =============================================================================
// MENU
// =============================================================================

/// Prescalar applied when a menu item does not set one
pub const DEFAULT_PRESCALAR: u32 = 1;

/// Description used when no menu item fired
pub const DEFAULT_MENU_DESCRIPTION: &str = "Not triggered";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.1.0";
