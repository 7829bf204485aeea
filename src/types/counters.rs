//! Run-level event counters, one per trigger class

use serde::{Deserialize, Serialize};

use crate::types::InputReason;

/// Dense array of 64-bit counters owned by a single trigger instance.
///
/// Counters are run statistics: starting a new event does not touch them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounters {
    counts: Vec<u64>,
}

impl EventCounters {
    /// Create `classes` counters, all zero
    pub fn new(classes: usize) -> Self {
        Self {
            counts: vec![0; classes],
        }
    }

    /// Increment counter `index`, returning the new value
    pub fn increment(&mut self, index: usize) -> Result<u64, InputReason> {
        let slot = self
            .counts
            .get_mut(index)
            .ok_or(InputReason::R205_COUNTER_OUT_OF_RANGE)?;
        *slot += 1;
        Ok(*slot)
    }

    /// Value of counter `index`, if declared
    pub fn get(&self, index: usize) -> Option<u64> {
        self.counts.get(index).copied()
    }

    /// All counters in trigger-class order
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// Number of trigger classes
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum over all trigger classes
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
