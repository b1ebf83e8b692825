//! Process records
//!
//! A [`Process`] carries its static workload (arrival and burst) plus the
//! progress the scheduler makes on it. Identity fields never change once
//! the record is built. Progress fields are owned by the scheduler while
//! the process is admitted.

use crate::ids::ProcessId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a process record
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ProcessError {
    /// Process IDs must be positive
    #[error("Invalid process id: {0} (must be positive)")]
    InvalidPid(ProcessId),

    /// A process must require at least one unit of CPU time
    #[error("Invalid burst for {pid}: {burst} (must be positive)")]
    InvalidBurst { pid: ProcessId, burst: u64 },

    /// Remaining time can never exceed the burst
    #[error("Invalid progress for {pid}: {remaining} remaining of {burst}")]
    InvalidProgress {
        pid: ProcessId,
        remaining: u64,
        burst: u64,
    },
}

/// A simulated process
///
/// Deserialized records go through the same checks as [`Process::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProcessRecord")]
pub struct Process {
    pid: ProcessId,
    arrival: u64,
    burst: u64,
    remaining: u64,
    start_time: Option<u64>,
    completion_time: Option<u64>,
}

impl Process {
    /// Creates a fresh process
    ///
    /// Rejects a zero pid and a zero burst.
    pub fn new(pid: ProcessId, arrival: u64, burst: u64) -> Result<Self, ProcessError> {
        let process = Self {
            pid,
            arrival,
            burst,
            remaining: burst,
            start_time: None,
            completion_time: None,
        };
        process.validate()?;
        Ok(process)
    }

    /// Checks the record: positive pid, positive burst, `remaining <= burst`
    pub fn validate(&self) -> Result<(), ProcessError> {
        if self.pid.raw() == 0 {
            return Err(ProcessError::InvalidPid(self.pid));
        }
        if self.burst == 0 {
            return Err(ProcessError::InvalidBurst {
                pid: self.pid,
                burst: self.burst,
            });
        }
        if self.remaining > self.burst {
            return Err(ProcessError::InvalidProgress {
                pid: self.pid,
                remaining: self.remaining,
                burst: self.burst,
            });
        }
        Ok(())
    }

    /// Returns the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Returns the arrival time
    pub fn arrival(&self) -> u64 {
        self.arrival
    }

    /// Returns the total CPU time required
    pub fn burst(&self) -> u64 {
        self.burst
    }

    /// Returns the CPU time still owed to this process
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Returns the time of first dispatch, if any
    pub fn start_time(&self) -> Option<u64> {
        self.start_time
    }

    /// Returns the completion time, if the process has finished
    pub fn completion_time(&self) -> Option<u64> {
        self.completion_time
    }

    /// Returns true once the process has received its full burst
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Returns true if no progress has been recorded
    pub fn is_fresh(&self) -> bool {
        self.remaining == self.burst && self.start_time.is_none() && self.completion_time.is_none()
    }

    /// Clears all progress so the process can be admitted again
    pub fn reset(&mut self) {
        self.remaining = self.burst;
        self.start_time = None;
        self.completion_time = None;
    }

    /// Records the first dispatch. Later calls are ignored.
    #[doc(hidden)]
    pub fn mark_started(&mut self, time: u64) {
        if self.start_time.is_none() {
            self.start_time = Some(time);
        }
    }

    /// Consumes one unit of CPU time
    #[doc(hidden)]
    pub fn run_for_one_unit(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Records completion. Later calls are ignored.
    #[doc(hidden)]
    pub fn mark_completed(&mut self, time: u64) {
        if self.completion_time.is_none() {
            self.completion_time = Some(time);
        }
    }
}

/// Wire shape of [`Process`], checked before it becomes one
#[derive(Deserialize)]
struct ProcessRecord {
    pid: ProcessId,
    arrival: u64,
    burst: u64,
    remaining: u64,
    start_time: Option<u64>,
    completion_time: Option<u64>,
}

impl TryFrom<ProcessRecord> for Process {
    type Error = ProcessError;

    fn try_from(record: ProcessRecord) -> Result<Self, Self::Error> {
        let process = Self {
            pid: record.pid,
            arrival: record.arrival,
            burst: record.burst,
            remaining: record.remaining,
            start_time: record.start_time,
            completion_time: record.completion_time,
        };
        process.validate()?;
        Ok(process)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: u32) -> ProcessId {
        ProcessId::new(raw)
    }

    #[test]
    fn test_new_process_is_fresh() {
        let p = Process::new(pid(1), 3, 5).unwrap();
        assert_eq!(p.pid(), pid(1));
        assert_eq!(p.arrival(), 3);
        assert_eq!(p.burst(), 5);
        assert_eq!(p.remaining(), 5);
        assert!(p.start_time().is_none());
        assert!(p.completion_time().is_none());
        assert!(p.is_fresh());
        assert!(!p.is_complete());
    }

    #[test]
    fn test_zero_burst_rejected() {
        let err = Process::new(pid(1), 0, 0).unwrap_err();
        assert_eq!(err, ProcessError::InvalidBurst { pid: pid(1), burst: 0 });
    }

    #[test]
    fn test_zero_pid_rejected() {
        let err = Process::new(pid(0), 0, 4).unwrap_err();
        assert_eq!(err, ProcessError::InvalidPid(pid(0)));
    }

    #[test]
    fn test_remaining_never_underflows() {
        let mut p = Process::new(pid(1), 0, 2).unwrap();
        p.run_for_one_unit();
        p.run_for_one_unit();
        p.run_for_one_unit();
        assert_eq!(p.remaining(), 0);
        assert!(p.is_complete());
    }

    #[test]
    fn test_start_and_completion_set_once() {
        let mut p = Process::new(pid(1), 0, 2).unwrap();
        p.mark_started(4);
        p.mark_started(9);
        assert_eq!(p.start_time(), Some(4));

        p.mark_completed(10);
        p.mark_completed(12);
        assert_eq!(p.completion_time(), Some(10));
        assert!(!p.is_fresh());
    }

    #[test]
    fn test_reset_clears_progress() {
        let mut p = Process::new(pid(2), 1, 3).unwrap();
        p.mark_started(1);
        p.run_for_one_unit();
        p.reset();
        assert!(p.is_fresh());
        assert_eq!(p.remaining(), 3);
        assert_eq!(p.arrival(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = ProcessError::InvalidBurst { pid: pid(4), burst: 0 };
        assert_eq!(err.to_string(), "Invalid burst for P4: 0 (must be positive)");
    }

    #[test]
    fn test_deserialize_rejects_zero_burst_and_pid() {
        let zero_burst = r#"{"pid":3,"arrival":0,"burst":0,"remaining":0,"start_time":null,"completion_time":null}"#;
        let err = serde_json::from_str::<Process>(zero_burst).unwrap_err();
        assert!(err.to_string().contains("Invalid burst for P3"));

        let zero_pid = r#"{"pid":0,"arrival":0,"burst":4,"remaining":4,"start_time":null,"completion_time":null}"#;
        assert!(serde_json::from_str::<Process>(zero_pid).is_err());

        let overrun = r#"{"pid":1,"arrival":0,"burst":2,"remaining":5,"start_time":null,"completion_time":null}"#;
        assert!(serde_json::from_str::<Process>(overrun).is_err());
    }

    #[test]
    fn test_deserialize_keeps_progress() {
        let mut p = Process::new(pid(5), 2, 4).unwrap();
        p.mark_started(3);
        p.run_for_one_unit();

        let json = serde_json::to_string(&p).unwrap();
        let back: Process = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert_eq!(back.remaining(), 3);
        assert!(back.validate().is_ok());
    }
}
