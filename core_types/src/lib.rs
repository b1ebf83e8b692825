//! # Core Types
//!
//! This crate defines the fundamental types shared by the scheduler, the
//! logger and the driver.
//!
//! ## Key Types
//!
//! - [`ProcessId`]: Caller-assigned identifier for a process
//! - [`Process`]: Static workload plus scheduler-owned progress
//! - [`Subject`]: Who holds the CPU (a process or idle)
//! - [`Burst`]: A closed, contiguous stretch of CPU occupancy

pub mod burst;
pub mod ids;
pub mod process;

pub use burst::{Burst, Subject};
pub use ids::ProcessId;
pub use process::{Process, ProcessError};
