//! # Round-Robin Scheduler Simulation
//!
//! This crate simulates preemptive round-robin CPU scheduling for a fixed
//! set of processes and reports what happened.
//!
//! ## Purpose
//!
//! - Deterministic: a virtual clock, no threads, no wall-clock time
//! - Driven externally: each [`Scheduler::step`] does a bounded amount of work
//! - Inspectable: queues, history and metrics are all readable between steps
//!
//! ## Example
//!
//! ```
//! use core_types::{Process, ProcessId};
//! use sim_scheduler::Scheduler;
//!
//! let mut scheduler = Scheduler::with_quantum(2).unwrap();
//! scheduler.add_process(Process::new(ProcessId::new(1), 0, 4).unwrap()).unwrap();
//! scheduler.add_process(Process::new(ProcessId::new(2), 0, 4).unwrap()).unwrap();
//!
//! while scheduler.step() {}
//!
//! let metrics = scheduler.metrics().unwrap();
//! assert_eq!(metrics.makespan, 8);
//! assert_eq!(metrics.context_switches, 4);
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod scheduler;
pub mod test_utils;

pub use config::{SchedulerConfig, DEFAULT_QUANTUM};
pub use error::{SchedulerError, SchedulerResult};
pub use metrics::{Metrics, ProcessStats};
pub use observer::{EventRecorder, SchedulerEvent, SchedulerObserver};
pub use scheduler::Scheduler;
