//! Crate-level error for configuration loading and setup

use thiserror::Error;

use crate::types::{MenuReason, RegistryReason};

/// Errors surfaced while configuring registries and reading inputs.
///
/// Per-event accumulation never returns this; malformed inputs are logged and
/// skipped instead.
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error(transparent)]
    Registry(#[from] RegistryReason),

    #[error(transparent)]
    Menu(#[from] MenuReason),

    #[error("i/o error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl TriggerError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
