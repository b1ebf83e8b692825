//! Metrics and Replay Tests
//!
//! Validates the metrics report and that reset + re-admission replays a
//! run exactly.

use sim_scheduler::test_utils::workload;
use sim_scheduler::{Metrics, Scheduler, SchedulerConfig};
use tests_scheduling::{run_checked, test_bootstrap};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_no_finished_processes_means_no_metrics() {
    let scheduler = test_bootstrap(2, &[(0, 3)]);
    assert!(scheduler.metrics().is_none());
}

#[test]
fn test_single_process_metrics() {
    for quantum in [5, 6, 200] {
        let mut scheduler = test_bootstrap(quantum, &[(0, 5)]);
        run_checked(&mut scheduler);

        let m = scheduler.metrics().unwrap();
        assert!(approx(m.avg_turnaround, 5.0));
        assert!(approx(m.avg_waiting, 0.0));
        assert!(approx(m.avg_response, 0.0));
        assert!(approx(m.avg_ntat, 1.0));
        assert!(approx(m.throughput, 0.2));
        assert_eq!(m.stdev_ntat, 0.0);
        assert_eq!(m.cv_ntat, 0.0);
    }
}

#[test]
fn test_interleaved_metrics() {
    let mut scheduler = test_bootstrap(2, &[(0, 4), (0, 4)]);
    run_checked(&mut scheduler);

    let m = scheduler.metrics().unwrap();
    assert_eq!(m.makespan, 8);
    assert_eq!(m.context_switches, 4);
    assert!(approx(m.avg_turnaround, 7.0));
    assert!(approx(m.avg_waiting, 3.0));
    assert!(approx(m.avg_response, 1.0));
    assert!(approx(m.throughput, 0.25));
}

#[test]
fn test_reset_and_readmit_reproduces_run() {
    let spec = [(0, 5), (1, 3), (2, 8), (30, 2)];
    let mut scheduler = test_bootstrap(3, &spec);
    let first = run_checked(&mut scheduler);
    let first_metrics = scheduler.metrics();

    scheduler.reset();
    for process in workload(&spec) {
        scheduler.add_process(process).unwrap();
    }
    let second = run_checked(&mut scheduler);

    assert_eq!(first, second);
    assert_eq!(first_metrics, scheduler.metrics());
}

#[test]
fn test_finished_processes_can_be_readmitted_after_reset() {
    let spec = [(0, 2), (1, 2)];
    let mut scheduler = test_bootstrap(1, &spec);
    let first = run_checked(&mut scheduler);

    let mut finished = scheduler.finished().to_vec();
    scheduler.reset();

    finished.sort_by_key(|p| p.pid());
    for mut process in finished {
        assert!(scheduler.add_process(process.clone()).is_err());
        process.reset();
        scheduler.add_process(process).unwrap();
    }
    let second = run_checked(&mut scheduler);
    assert_eq!(first.history, second.history);
}

#[test]
fn test_metrics_serialize_to_json() {
    let mut scheduler = Scheduler::with_config(SchedulerConfig::with_quantum(4)).unwrap();
    for process in workload(&[(0, 4), (2, 2)]) {
        scheduler.add_process(process).unwrap();
    }
    scheduler.run_to_completion(None);

    let metrics = scheduler.metrics().unwrap();
    let json = serde_json::to_string(&metrics).unwrap();
    let parsed: Metrics = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.makespan, metrics.makespan);
    assert_eq!(parsed.processes.len(), 2);
}
