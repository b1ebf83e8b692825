//! # Round-Robin Simulation Host
//!
//! Headless driver for the round-robin scheduler.
//!
//! ## Responsibilities
//!
//! The host:
//! - Loads a workload (JSON file or the built-in sample)
//! - Builds and configures a scheduler
//! - Steps it to completion (or a step budget)
//! - Returns a serializable report of history and metrics
//!
//! ## Non-Responsibilities
//!
//! The host does NOT render timelines, pace steps against a wall clock,
//! or collect input interactively.

pub mod runtime;
pub mod workload;

pub use runtime::{RuntimeError, SimReport, SimRuntime, SimRuntimeConfig};
pub use workload::{Workload, WorkloadError, WorkloadProcess};
