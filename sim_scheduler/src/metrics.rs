//! Performance metrics over finished processes

use core_types::{Process, ProcessId};
use serde::{Deserialize, Serialize};

/// Per-process timing figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStats {
    pub pid: ProcessId,
    pub arrival: u64,
    pub burst: u64,
    pub start_time: u64,
    pub completion_time: u64,
    /// completion - arrival
    pub turnaround: u64,
    /// turnaround - burst
    pub waiting: u64,
    /// first dispatch - arrival
    pub response: u64,
    /// turnaround / burst
    pub ntat: f64,
}

impl ProcessStats {
    /// Builds stats for a finished process
    ///
    /// Returns `None` if the process has no completion time.
    pub fn from_process(process: &Process) -> Option<Self> {
        let completion_time = process.completion_time()?;
        let start_time = process.start_time().unwrap_or(process.arrival());
        let turnaround = completion_time.saturating_sub(process.arrival());
        Some(Self {
            pid: process.pid(),
            arrival: process.arrival(),
            burst: process.burst(),
            start_time,
            completion_time,
            turnaround,
            waiting: turnaround.saturating_sub(process.burst()),
            response: start_time.saturating_sub(process.arrival()),
            ntat: turnaround as f64 / process.burst() as f64,
        })
    }
}

/// Aggregate statistics for a completed (or partially completed) run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
    pub avg_ntat: f64,
    /// Sample standard deviation of NTAT (0 with fewer than two processes)
    pub stdev_ntat: f64,
    /// Coefficient of variation of NTAT, in percent
    pub cv_ntat: f64,
    /// Completion time of the last process to finish
    pub makespan: u64,
    /// Finished processes per time unit; infinite for a zero makespan
    pub throughput: f64,
    pub context_switches: u64,
    /// One entry per finished process, in completion order
    pub processes: Vec<ProcessStats>,
}

impl Metrics {
    /// Computes metrics over `finished`
    ///
    /// Returns `None` when there is nothing to measure.
    pub fn compute(finished: &[Process], context_switches: u64) -> Option<Self> {
        let processes: Vec<ProcessStats> =
            finished.iter().filter_map(ProcessStats::from_process).collect();
        if processes.is_empty() {
            return None;
        }

        let n = processes.len() as f64;
        let mean = |f: fn(&ProcessStats) -> f64| processes.iter().map(f).sum::<f64>() / n;

        let avg_turnaround = mean(|s| s.turnaround as f64);
        let avg_waiting = mean(|s| s.waiting as f64);
        let avg_response = mean(|s| s.response as f64);
        let avg_ntat = mean(|s| s.ntat);

        let stdev_ntat = if processes.len() > 1 {
            let variance = processes
                .iter()
                .map(|s| (s.ntat - avg_ntat).powi(2))
                .sum::<f64>()
                / (n - 1.0);
            variance.sqrt()
        } else {
            0.0
        };
        let cv_ntat = if processes.len() > 1 && avg_ntat > 0.0 {
            stdev_ntat / avg_ntat * 100.0
        } else {
            0.0
        };

        let makespan = processes
            .iter()
            .map(|s| s.completion_time)
            .max()
            .unwrap_or(0);
        let throughput = if makespan > 0 {
            n / makespan as f64
        } else {
            f64::INFINITY
        };

        Some(Self {
            avg_turnaround,
            avg_waiting,
            avg_response,
            avg_ntat,
            stdev_ntat,
            cv_ntat,
            makespan,
            throughput,
            context_switches,
            processes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(pid: u32, arrival: u64, burst: u64, start: u64, completion: u64) -> Process {
        let mut p = Process::new(ProcessId::new(pid), arrival, burst).unwrap();
        p.mark_started(start);
        for _ in 0..burst {
            p.run_for_one_unit();
        }
        p.mark_completed(completion);
        p
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_is_no_data() {
        assert!(Metrics::compute(&[], 0).is_none());
    }

    #[test]
    fn test_unfinished_processes_are_ignored() {
        let p = Process::new(ProcessId::new(1), 0, 3).unwrap();
        assert!(Metrics::compute(&[p], 1).is_none());
    }

    #[test]
    fn test_single_process() {
        let m = Metrics::compute(&[finished(1, 0, 5, 0, 5)], 1).unwrap();
        assert!(approx(m.avg_turnaround, 5.0));
        assert!(approx(m.avg_waiting, 0.0));
        assert!(approx(m.avg_response, 0.0));
        assert!(approx(m.avg_ntat, 1.0));
        assert!(approx(m.throughput, 0.2));
        assert_eq!(m.makespan, 5);
        assert_eq!(m.stdev_ntat, 0.0);
        assert_eq!(m.cv_ntat, 0.0);
        assert_eq!(m.context_switches, 1);
    }

    #[test]
    fn test_two_processes() {
        // P1: tat 6, ntat 1.5. P2: tat 8, ntat 2.0.
        let done = [finished(1, 0, 4, 0, 6), finished(2, 0, 4, 2, 8)];
        let m = Metrics::compute(&done, 4).unwrap();

        assert!(approx(m.avg_turnaround, 7.0));
        assert!(approx(m.avg_waiting, 3.0));
        assert!(approx(m.avg_response, 1.0));
        assert!(approx(m.avg_ntat, 1.75));
        assert_eq!(m.makespan, 8);
        assert!(approx(m.throughput, 0.25));

        let stdev = (0.125f64).sqrt();
        assert!(approx(m.stdev_ntat, stdev));
        assert!(approx(m.cv_ntat, stdev / 1.75 * 100.0));
        assert_eq!(m.processes.len(), 2);
        assert_eq!(m.processes[1].waiting, 4);
    }

    #[test]
    fn test_zero_makespan_is_unbounded_throughput() {
        // Not reachable through the scheduler; exercises the guard.
        let mut p = Process::new(ProcessId::new(1), 0, 1).unwrap();
        p.mark_started(0);
        p.mark_completed(0);
        let m = Metrics::compute(&[p], 0).unwrap();
        assert!(m.throughput.is_infinite());
    }

    #[test]
    fn test_process_stats_with_late_arrival() {
        let stats = ProcessStats::from_process(&finished(3, 10, 4, 12, 20)).unwrap();
        assert_eq!(stats.turnaround, 10);
        assert_eq!(stats.waiting, 6);
        assert_eq!(stats.response, 2);
        assert!(approx(stats.ntat, 2.5));
    }
}
