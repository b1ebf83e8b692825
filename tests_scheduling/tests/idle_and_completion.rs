//! Idle Handling and Completion Tests
//!
//! Validates fast-forward over idle gaps, burst accounting and the
//! relationship between `is_done` and `step`.

use core_types::{Burst, ProcessId, Subject};
use sim_scheduler::SchedulerEvent;
use tests_scheduling::{test_bootstrap, trace};

#[test]
fn test_fast_forward_emits_single_tick() {
    let mut scheduler = test_bootstrap(4, &[(50, 2)]);

    assert!(scheduler.step());
    assert_eq!(scheduler.clock(), 50);

    let ticks: Vec<u64> = scheduler
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            SchedulerEvent::Tick { time } => Some(time),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, vec![50]);
    assert_eq!(scheduler.ready_len(), 1);
}

#[test]
fn test_bursts_cover_the_whole_clock() {
    let workloads: [&[(u64, u64)]; 4] = [
        &[(0, 5)],
        &[(3, 2), (4, 7), (20, 1)],
        &[(10, 4), (10, 4), (11, 1)],
        &[(0, 1), (5, 1), (10, 1)],
    ];

    for spec in workloads {
        for quantum in [1, 2, 3, 7] {
            let run = trace(quantum, spec);
            let total: u64 = run.history.iter().map(|b| b.duration).sum();
            assert_eq!(total, run.clock, "workload {:?} quantum {}", spec, quantum);

            for window in run.history.windows(2) {
                assert_eq!(window[0].end(), window[1].start, "gap or overlap in {:?}", run.history);
            }
            assert!(run.history.iter().all(|b| b.duration > 0));
        }
    }
}

#[test]
fn test_idle_gaps_recorded() {
    let run = trace(2, &[(3, 2), (10, 1)]);
    assert_eq!(
        run.history,
        vec![
            Burst::new(Subject::Idle, 0, 3),
            Burst::new(Subject::Process(ProcessId::new(1)), 3, 2),
            Burst::new(Subject::Idle, 5, 5),
            Burst::new(Subject::Process(ProcessId::new(2)), 10, 1),
        ]
    );
}

#[test]
fn test_is_done_iff_step_reports_no_progress() {
    let mut scheduler = test_bootstrap(2, &[(0, 3), (6, 2)]);
    loop {
        let done_before = scheduler.is_done();
        let progressed = scheduler.step();
        assert_eq!(done_before, !progressed, "at t={}", scheduler.clock());
        if !progressed {
            break;
        }
    }
    assert!(!scheduler.step());
}

#[test]
fn test_zero_length_bursts_never_reported() {
    let run = trace(1, &[(4, 1), (4, 1)]);
    let zero = run.events.iter().any(|e| {
        matches!(e, SchedulerEvent::ExecutionBurst { duration: 0, .. })
    });
    assert!(!zero);
}

#[test]
fn test_every_process_finishes_exactly_once() {
    let run = trace(3, &[(0, 7), (2, 4), (2, 9), (15, 1), (40, 2)]);

    let mut finished: Vec<u32> = run
        .events
        .iter()
        .filter_map(|e| match e {
            SchedulerEvent::ProcessFinished { process, .. } => Some(process.pid().raw()),
            _ => None,
        })
        .collect();
    finished.sort();
    assert_eq!(finished, vec![1, 2, 3, 4, 5]);

    for process in &run.finished {
        assert_eq!(process.remaining(), 0);
        assert!(process.completion_time().unwrap() >= process.arrival() + process.burst());
    }
}
