//! Unique identifiers for simulated entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a simulated process
///
/// Process IDs are assigned by the caller, normally counting up from 1.
/// They are plain integers rather than random UUIDs so that a workload
/// replays with exactly the same identities every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(u32);

impl ProcessId {
    /// Creates a process ID from a raw value
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Returns the ID that follows this one
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl From<u32> for ProcessId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}
