//! Execution bursts
//!
//! A burst is a maximal stretch of time during which one subject holds the
//! CPU. The subject is either a process or the idle loop.

use crate::ids::ProcessId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who occupies the CPU during a burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    /// A process is running
    Process(ProcessId),
    /// Nothing is runnable
    Idle,
}

impl Subject {
    /// Returns the process ID, or `None` for idle time
    pub fn pid(&self) -> Option<ProcessId> {
        match self {
            Subject::Process(pid) => Some(*pid),
            Subject::Idle => None,
        }
    }

    /// Returns true for idle time
    pub fn is_idle(&self) -> bool {
        matches!(self, Subject::Idle)
    }
}

impl From<ProcessId> for Subject {
    fn from(pid: ProcessId) -> Self {
        Subject::Process(pid)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Process(pid) => write!(f, "{}", pid),
            Subject::Idle => write!(f, "IDLE"),
        }
    }
}

/// A closed execution burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Burst {
    /// Subject that held the CPU
    pub subject: Subject,
    /// Time the burst began
    pub start: u64,
    /// Length of the burst (always positive once recorded)
    pub duration: u64,
}

impl Burst {
    /// Creates a burst record
    pub fn new(subject: Subject, start: u64, duration: u64) -> Self {
        Self {
            subject,
            start,
            duration,
        }
    }

    /// Returns the time the burst ended
    pub fn end(&self) -> u64 {
        self.start + self.duration
    }
}

impl fmt::Display for Burst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}-{})", self.subject, self.start, self.end())
    }
}
