//! Test utilities
//!
//! Helpers for building workloads and checking scheduler invariants in
//! unit and integration tests. They panic on invalid input, which is what
//! a test wants.

use crate::config::SchedulerConfig;
use crate::scheduler::Scheduler;
use core_types::{Process, ProcessId};

/// Builds a fresh process
///
/// # Panics
/// Panics if `pid` or `burst` is zero.
pub fn process(pid: u32, arrival: u64, burst: u64) -> Process {
    Process::new(ProcessId::new(pid), arrival, burst).expect("invalid test process")
}

/// Builds processes from `(arrival, burst)` pairs, numbering pids from 1
pub fn workload(spec: &[(u64, u64)]) -> Vec<Process> {
    spec.iter()
        .zip(1u32..)
        .map(|(&(arrival, burst), pid)| process(pid, arrival, burst))
        .collect()
}

/// Builds a scheduler with `quantum` and admits `spec` in order
pub fn scheduler_with(quantum: u64, spec: &[(u64, u64)]) -> Scheduler {
    scheduler_with_config(SchedulerConfig::with_quantum(quantum), spec)
}

/// Same as [`scheduler_with`] with a full configuration
pub fn scheduler_with_config(config: SchedulerConfig, spec: &[(u64, u64)]) -> Scheduler {
    let mut scheduler = Scheduler::with_config(config).expect("invalid test config");
    for process in workload(spec) {
        scheduler
            .add_process(process)
            .expect("failed to admit test process");
    }
    scheduler
}

/// Checks the structural invariants that must hold between steps
///
/// # Panics
/// Panics with a description of the first violated invariant.
pub fn assert_invariants(scheduler: &Scheduler) {
    let tracked: Vec<&Process> = scheduler
        .future()
        .iter()
        .chain(scheduler.ready())
        .chain(scheduler.current())
        .chain(scheduler.finished())
        .collect();

    for process in &tracked {
        assert!(
            process.remaining() <= process.burst(),
            "{} remaining {} exceeds burst {}",
            process.pid(),
            process.remaining(),
            process.burst()
        );
    }

    let mut pids: Vec<ProcessId> = tracked.iter().map(|p| p.pid()).collect();
    pids.sort();
    let before = pids.len();
    pids.dedup();
    assert_eq!(before, pids.len(), "a process occupies two collections");

    let unfinished = scheduler
        .future()
        .iter()
        .chain(scheduler.ready())
        .chain(scheduler.current());
    for process in unfinished {
        assert!(
            process.completion_time().is_none(),
            "{} has a completion time but is not finished",
            process.pid()
        );
    }
    for process in scheduler.finished() {
        assert!(
            process.completion_time().is_some() && process.remaining() == 0,
            "{} is finished without completing",
            process.pid()
        );
    }

    for window in scheduler.future().windows(2) {
        assert!(
            window[0].arrival() <= window[1].arrival(),
            "future queue out of arrival order"
        );
    }
}
