//! # Simulation Runtime
//!
//! Ties a workload, a scheduler and the structured logger together and
//! runs the simulation to completion.

use crate::workload::{Workload, WorkloadError};
use core_types::Burst;
use log::info;
use serde::Serialize;
use services_logger::{LogEntry, LogLevel, LoggingObserver};
use sim_scheduler::{Metrics, Scheduler, SchedulerError, DEFAULT_QUANTUM};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

/// Runtime error types
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Workload error: {0}")]
    Workload(#[from] WorkloadError),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),
}

/// Runtime configuration
#[derive(Debug, Clone, Default)]
pub struct SimRuntimeConfig {
    /// Workload file; the built-in sample is used when absent
    pub workload: Option<PathBuf>,
    /// Quantum override (takes precedence over the workload's quantum)
    pub quantum: Option<u64>,
    /// Maximum steps to run (0 = unlimited)
    pub max_steps: u64,
    /// Include per-event log entries in the report
    pub verbose: bool,
}

/// Result of a simulation run
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub quantum: u64,
    pub clock: u64,
    pub steps: u64,
    /// False if the step budget ran out first
    pub completed: bool,
    pub context_switches: u64,
    pub history: Vec<Burst>,
    /// Absent when no process finished
    pub metrics: Option<Metrics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<LogEntry>,
}

/// Simulation runtime
pub struct SimRuntime {
    config: SimRuntimeConfig,
    scheduler: Scheduler,
    logger: Rc<RefCell<LoggingObserver>>,
}

impl SimRuntime {
    /// Creates a runtime, loading the configured workload
    pub fn new(config: SimRuntimeConfig) -> Result<Self, RuntimeError> {
        let workload = match &config.workload {
            Some(path) => Workload::load(path)?,
            None => Workload::sample(),
        };
        Self::with_workload(config, &workload)
    }

    /// Creates a runtime for an already-loaded workload
    pub fn with_workload(config: SimRuntimeConfig, workload: &Workload) -> Result<Self, RuntimeError> {
        let quantum = config
            .quantum
            .or(workload.quantum)
            .unwrap_or(DEFAULT_QUANTUM);
        let mut scheduler = Scheduler::with_quantum(quantum)?;
        for process in workload.processes()? {
            scheduler.add_process(process)?;
        }

        let level = if config.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        };
        let logger = Rc::new(RefCell::new(LoggingObserver::new(level)));
        scheduler.subscribe(Box::new(logger.clone()));

        info!(
            "loaded {} processes, quantum={}",
            workload.processes.len(),
            quantum
        );

        Ok(Self {
            config,
            scheduler,
            logger,
        })
    }

    /// Read access to the scheduler
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Runs until the simulation completes or the step budget is spent
    pub fn run(&mut self) -> SimReport {
        let budget = (self.config.max_steps > 0).then_some(self.config.max_steps);
        let steps = self.scheduler.run_to_completion(budget);
        let completed = self.scheduler.is_done();

        info!(
            "ran {} steps, clock={}, completed={}",
            steps,
            self.scheduler.clock(),
            completed
        );

        let log = if self.config.verbose {
            self.logger.borrow().entries().to_vec()
        } else {
            Vec::new()
        };

        SimReport {
            quantum: self.scheduler.quantum(),
            clock: self.scheduler.clock(),
            steps,
            completed,
            context_switches: self.scheduler.context_switches(),
            history: self.scheduler.history().to_vec(),
            metrics: self.scheduler.metrics(),
            log,
        }
    }
}
