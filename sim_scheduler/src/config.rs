//! Scheduler configuration

use crate::error::{SchedulerError, SchedulerResult};
use serde::{Deserialize, Serialize};

/// Quantum used when none is configured
pub const DEFAULT_QUANTUM: u64 = 200;

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Number of time units a process may run per dispatch before preemption
    pub quantum: u64,
    /// Keep a copy of every emitted event for [`crate::Scheduler::drain_events`]
    pub buffer_events: bool,
}

impl SchedulerConfig {
    /// Creates a configuration with the given quantum
    pub fn with_quantum(quantum: u64) -> Self {
        Self {
            quantum,
            ..Self::default()
        }
    }

    /// Enables the internal event buffer
    pub fn buffered(mut self) -> Self {
        self.buffer_events = true;
        self
    }

    /// Checks that the configuration can drive a scheduler
    pub fn validate(&self) -> SchedulerResult<()> {
        if self.quantum == 0 {
            return Err(SchedulerError::InvalidQuantum(self.quantum));
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            buffer_events: false,
        }
    }
}
