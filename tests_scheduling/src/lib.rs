//! Scheduling Test Utilities
//!
//! Shared helpers for the scenario tests in `tests/`.
//!
//! ## Test Philosophy
//!
//! - **Invariants after every step**: Not just at the end of a run
//! - **Deterministic replay**: Same workload + same quantum => same trace
//! - **Observable behavior only**: Tests read the scheduler through its
//!   public queries and notifications

use core_types::{Burst, Process};
use sim_scheduler::test_utils::{assert_invariants, scheduler_with_config};
use sim_scheduler::{Scheduler, SchedulerConfig, SchedulerEvent};

/// Everything observable about one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunTrace {
    pub events: Vec<SchedulerEvent>,
    pub history: Vec<Burst>,
    pub finished: Vec<Process>,
    pub clock: u64,
    pub context_switches: u64,
    pub steps: u64,
}

/// Builds a scheduler that buffers its events
pub fn test_bootstrap(quantum: u64, spec: &[(u64, u64)]) -> Scheduler {
    scheduler_with_config(SchedulerConfig::with_quantum(quantum).buffered(), spec)
}

/// Steps `scheduler` to completion, checking invariants after every step
pub fn run_checked(scheduler: &mut Scheduler) -> RunTrace {
    let mut events = Vec::new();
    let mut steps = 0u64;
    assert_invariants(scheduler);
    loop {
        let progressed = scheduler.step();
        events.extend(scheduler.drain_events());
        assert_invariants(scheduler);
        if !progressed {
            break;
        }
        steps += 1;
    }

    RunTrace {
        events,
        history: scheduler.history().to_vec(),
        finished: scheduler.finished().to_vec(),
        clock: scheduler.clock(),
        context_switches: scheduler.context_switches(),
        steps,
    }
}

/// Builds, runs and traces a workload in one call
pub fn trace(quantum: u64, spec: &[(u64, u64)]) -> RunTrace {
    let mut scheduler = test_bootstrap(quantum, spec);
    run_checked(&mut scheduler)
}
