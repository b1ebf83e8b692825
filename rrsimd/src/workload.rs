//! # Workload Files
//!
//! A workload is a JSON document listing processes by arrival and burst.
//! Process IDs are not part of the file; they are assigned in file order
//! starting at 1.
//!
//! ## Example
//!
//! ```text
//! {
//!   "quantum": 3,
//!   "processes": [
//!     { "arrival": 0, "burst": 5 },
//!     { "arrival": 2, "burst": 4 }
//!   ]
//! }
//! ```

use core_types::{Process, ProcessError, ProcessId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Workload error types
#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("Failed to read workload file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse workload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Workload has no processes")]
    Empty,

    #[error("Invalid process #{index}: {source}")]
    InvalidProcess {
        index: usize,
        #[source]
        source: ProcessError,
    },
}

/// One process entry in a workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadProcess {
    pub arrival: u64,
    pub burst: u64,
}

/// A set of processes plus an optional quantum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    #[serde(default)]
    pub quantum: Option<u64>,
    pub processes: Vec<WorkloadProcess>,
}

impl Workload {
    /// The built-in sample: six staggered processes
    pub fn sample() -> Self {
        let processes = [
            (100, 200),
            (300, 500),
            (600, 200),
            (800, 600),
            (1000, 700),
            (1100, 300),
        ]
        .into_iter()
        .map(|(arrival, burst)| WorkloadProcess { arrival, burst })
        .collect();

        Self {
            quantum: None,
            processes,
        }
    }

    /// Parses a workload from JSON text
    pub fn from_json(text: &str) -> Result<Self, WorkloadError> {
        let workload: Workload = serde_json::from_str(text)?;
        if workload.processes.is_empty() {
            return Err(WorkloadError::Empty);
        }
        Ok(workload)
    }

    /// Reads and parses a workload file
    pub fn load(path: &Path) -> Result<Self, WorkloadError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Builds fresh process records, numbering pids from 1
    pub fn processes(&self) -> Result<Vec<Process>, WorkloadError> {
        let mut pid = ProcessId::new(1);
        let mut processes = Vec::with_capacity(self.processes.len());
        for (index, entry) in self.processes.iter().enumerate() {
            let process = Process::new(pid, entry.arrival, entry.burst)
                .map_err(|source| WorkloadError::InvalidProcess { index, source })?;
            processes.push(process);
            pid = pid.next();
        }
        Ok(processes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_workload() {
        let workload = Workload::from_json(
            r#"{ "quantum": 3, "processes": [ {"arrival": 0, "burst": 5}, {"arrival": 2, "burst": 4} ] }"#,
        )
        .unwrap();
        assert_eq!(workload.quantum, Some(3));
        assert_eq!(workload.processes.len(), 2);

        let processes = workload.processes().unwrap();
        assert_eq!(processes[0].pid(), ProcessId::new(1));
        assert_eq!(processes[1].pid(), ProcessId::new(2));
        assert_eq!(processes[1].arrival(), 2);
    }

    #[test]
    fn test_quantum_optional() {
        let workload = Workload::from_json(r#"{ "processes": [ {"arrival": 0, "burst": 1} ] }"#)
            .unwrap();
        assert_eq!(workload.quantum, None);
    }

    #[test]
    fn test_empty_workload_rejected() {
        let result = Workload::from_json(r#"{ "processes": [] }"#);
        assert!(matches!(result, Err(WorkloadError::Empty)));
    }

    #[test]
    fn test_negative_arrival_rejected() {
        let result = Workload::from_json(r#"{ "processes": [ {"arrival": -1, "burst": 3} ] }"#);
        assert!(matches!(result, Err(WorkloadError::Parse(_))));
    }

    #[test]
    fn test_zero_burst_rejected() {
        let workload = Workload::from_json(
            r#"{ "processes": [ {"arrival": 0, "burst": 2}, {"arrival": 1, "burst": 0} ] }"#,
        )
        .unwrap();
        let err = workload.processes().unwrap_err();
        assert!(matches!(err, WorkloadError::InvalidProcess { index: 1, .. }));
        assert!(err.to_string().contains("P2"));
    }

    #[test]
    fn test_sample_workload() {
        let sample = Workload::sample();
        assert_eq!(sample.processes.len(), 6);
        assert_eq!(
            sample.processes[0],
            WorkloadProcess {
                arrival: 100,
                burst: 200
            }
        );
        assert!(sample.processes().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "processes": [ {{"arrival": 4, "burst": 2}} ] }}"#).unwrap();

        let workload = Workload::load(file.path()).unwrap();
        assert_eq!(workload.processes[0].arrival, 4);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Workload::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(WorkloadError::Io(_))));
    }
}
