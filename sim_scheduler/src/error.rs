//! Scheduler error types

use core_types::{ProcessError, ProcessId};
use thiserror::Error;

/// Errors raised by scheduler configuration and admission calls
///
/// Every rejected call leaves the scheduler exactly as it was.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// Quantum must be at least one time unit
    #[error("Invalid quantum: {0} (must be positive)")]
    InvalidQuantum(u64),

    /// The process record itself is malformed
    #[error("Invalid process: {0}")]
    InvalidProcess(#[from] ProcessError),

    /// The process already carries progress from an earlier run
    #[error("Process {0} has stale progress; reset it before admission")]
    StaleProcess(ProcessId),

    /// The process ID is already tracked by this scheduler
    #[error("Process {0} is already admitted")]
    DuplicateProcess(ProcessId),
}

/// Convenience alias for scheduler results
pub type SchedulerResult<T> = Result<T, SchedulerError>;
