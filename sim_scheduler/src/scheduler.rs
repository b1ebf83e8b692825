//! Preemptive round-robin scheduler
//!
//! The scheduler owns every admitted process, the virtual clock and the
//! execution history. It is driven one step at a time by an external
//! caller; nothing happens between calls.
//!
//! ## Design
//!
//! - **Round-robin**: Ready processes are dispatched in FIFO order. Both new
//!   arrivals and preempted processes join the tail of the queue.
//! - **Time-sliced**: A process runs for at most one quantum per dispatch.
//! - **Deterministic**: Same workload + same quantum => same schedule.
//! - **Idle fast-forward**: With nothing runnable, the clock jumps straight
//!   to the next arrival instead of ticking through the gap.
//!
//! ## Quantum changes
//!
//! The quantum is captured when a process is dispatched. [`Scheduler::set_quantum`]
//! never shortens or extends the allotment of the process already running;
//! the new value applies from the next dispatch.

use crate::config::SchedulerConfig;
use crate::error::{SchedulerError, SchedulerResult};
use crate::metrics::Metrics;
use crate::observer::{SchedulerEvent, SchedulerObserver};
use core_types::{Burst, Process, ProcessId, Subject};
use log::{debug, trace};
use std::collections::VecDeque;

/// The process currently holding the CPU
#[derive(Debug)]
struct Running {
    process: Process,
    /// Time units consumed since dispatch
    consumed: u64,
    /// Quantum in force when the process was dispatched
    allotment: u64,
}

/// A burst that has started but not yet closed
#[derive(Debug, Clone, Copy)]
struct OpenBurst {
    subject: Subject,
    start: u64,
}

/// Ready queue
///
/// A plain FIFO: processes are enqueued at the back and dequeued from the
/// front.
#[derive(Debug, Default)]
struct RunQueue {
    queue: VecDeque<Process>,
}

impl RunQueue {
    fn enqueue(&mut self, process: Process) {
        self.queue.push_back(process);
    }

    fn dequeue(&mut self) -> Option<Process> {
        self.queue.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn iter(&self) -> impl Iterator<Item = &Process> {
        self.queue.iter()
    }

    fn remove(&mut self, pid: ProcessId) -> Option<Process> {
        let index = self.queue.iter().position(|p| p.pid() == pid)?;
        self.queue.remove(index)
    }

    fn clear(&mut self) -> Vec<Process> {
        self.queue.drain(..).collect()
    }
}

/// Round-robin scheduling engine
pub struct Scheduler {
    config: SchedulerConfig,
    clock: u64,
    /// Not yet arrived, ordered by arrival (stable for ties)
    future: Vec<Process>,
    ready: RunQueue,
    current: Option<Running>,
    finished: Vec<Process>,
    context_switches: u64,
    history: Vec<Burst>,
    open_burst: Option<OpenBurst>,
    observers: Vec<Box<dyn SchedulerObserver>>,
    events: Vec<SchedulerEvent>,
}

impl Scheduler {
    /// Creates a scheduler with the default configuration
    pub fn new() -> Self {
        Self::build(SchedulerConfig::default())
    }

    /// Creates a scheduler with a custom configuration
    pub fn with_config(config: SchedulerConfig) -> SchedulerResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Creates a scheduler with the given quantum
    pub fn with_quantum(quantum: u64) -> SchedulerResult<Self> {
        Self::with_config(SchedulerConfig::with_quantum(quantum))
    }

    fn build(config: SchedulerConfig) -> Self {
        Self {
            config,
            clock: 0,
            future: Vec::new(),
            ready: RunQueue::default(),
            current: None,
            finished: Vec::new(),
            context_switches: 0,
            history: Vec::new(),
            open_burst: None,
            observers: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Registers an observer. Observers are notified in subscription order.
    pub fn subscribe(&mut self, observer: Box<dyn SchedulerObserver>) {
        self.observers.push(observer);
    }

    /// Admits a process
    ///
    /// Processes that have already arrived go to the tail of the ready
    /// queue; the rest wait in arrival order.
    pub fn add_process(&mut self, process: Process) -> SchedulerResult<()> {
        process.validate()?;
        if !process.is_fresh() {
            return Err(SchedulerError::StaleProcess(process.pid()));
        }
        if self.contains(process.pid()) {
            return Err(SchedulerError::DuplicateProcess(process.pid()));
        }

        debug!(
            "admit {} (arrival={}, burst={}) at t={}",
            process.pid(),
            process.arrival(),
            process.burst(),
            self.clock
        );

        self.enqueue_admitted(process);
        Ok(())
    }

    /// Removes a process from wherever it currently sits
    ///
    /// If the process is running, its burst is closed and the CPU is left
    /// free for the next step.
    pub fn remove_process(&mut self, pid: ProcessId) -> Option<Process> {
        if let Some(index) = self.future.iter().position(|p| p.pid() == pid) {
            return Some(self.future.remove(index));
        }
        if let Some(process) = self.ready.remove(pid) {
            return Some(process);
        }
        if self.current.as_ref().map(|r| r.process.pid()) == Some(pid) {
            self.close_burst();
            return self.current.take().map(|r| r.process);
        }
        let index = self.finished.iter().position(|p| p.pid() == pid)?;
        Some(self.finished.remove(index))
    }

    /// Returns true if the process is tracked in any collection
    pub fn contains(&self, pid: ProcessId) -> bool {
        self.future.iter().any(|p| p.pid() == pid)
            || self.ready.iter().any(|p| p.pid() == pid)
            || self.current.as_ref().map(|r| r.process.pid()) == Some(pid)
            || self.finished.iter().any(|p| p.pid() == pid)
    }

    /// Sets the quantum used from the next dispatch on
    pub fn set_quantum(&mut self, quantum: u64) -> SchedulerResult<()> {
        if quantum == 0 {
            return Err(SchedulerError::InvalidQuantum(quantum));
        }
        debug!("quantum {} -> {}", self.config.quantum, quantum);
        self.config.quantum = quantum;
        Ok(())
    }

    /// Advances the simulation by one time unit
    ///
    /// While nothing is runnable the clock jumps directly to the next
    /// arrival instead. Returns `false` once no further progress is
    /// possible.
    pub fn step(&mut self) -> bool {
        self.admit_arrivals();

        if self.current.is_none() && self.ready.is_empty() {
            return match self.future.first().map(Process::arrival) {
                Some(next_arrival) => {
                    self.fast_forward(next_arrival);
                    true
                }
                None => {
                    self.close_burst();
                    false
                }
            };
        }

        match self.current.as_ref().map(|r| r.process.pid()) {
            None => self.dispatch(),
            Some(pid) => self.ensure_burst(Subject::Process(pid)),
        }

        let Some(running) = self.current.as_mut() else {
            return false;
        };
        running.process.run_for_one_unit();
        running.consumed += 1;
        let completed = running.process.is_complete();
        let exhausted = running.consumed >= running.allotment;

        self.clock += 1;
        self.emit(SchedulerEvent::Tick { time: self.clock });
        self.admit_arrivals();

        if completed {
            self.complete_current();
        } else if exhausted {
            self.preempt_current();
        }
        true
    }

    /// Steps until no progress remains or `max_steps` steps have run
    ///
    /// Returns the number of steps taken.
    pub fn run_to_completion(&mut self, max_steps: Option<u64>) -> u64 {
        let mut steps = 0u64;
        while max_steps.map_or(true, |max| steps < max) {
            if !self.step() {
                break;
            }
            steps += 1;
        }
        steps
    }

    /// Clears all queues, the clock, counters and history
    ///
    /// Admitted processes are dropped; observers and configuration are kept.
    pub fn reset(&mut self) {
        debug!("reset at t={}", self.clock);
        self.clock = 0;
        self.future.clear();
        self.ready.clear();
        self.current = None;
        self.finished.clear();
        self.context_switches = 0;
        self.history.clear();
        self.open_burst = None;
        self.events.clear();
    }

    /// Resets the simulation and re-admits every tracked process with its
    /// progress cleared, in pid order
    pub fn restart(&mut self) {
        let mut processes: Vec<Process> = self.future.drain(..).collect();
        processes.extend(self.ready.clear());
        processes.extend(self.current.take().map(|r| r.process));
        processes.append(&mut self.finished);
        processes.sort_by_key(Process::pid);

        self.reset();
        for mut process in processes {
            process.reset();
            self.enqueue_admitted(process);
        }
    }

    /// Returns true when no process is waiting, ready or running
    pub fn is_done(&self) -> bool {
        self.future.is_empty() && self.ready.is_empty() && self.current.is_none()
    }

    /// Computes metrics over the finished processes
    ///
    /// Returns `None` until at least one process has finished.
    pub fn metrics(&self) -> Option<Metrics> {
        Metrics::compute(&self.finished, self.context_switches)
    }

    /// Takes the events buffered since the last call
    ///
    /// Always empty unless [`SchedulerConfig::buffer_events`] is set.
    pub fn drain_events(&mut self) -> Vec<SchedulerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current virtual time
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Quantum applied at the next dispatch
    pub fn quantum(&self) -> u64 {
        self.config.quantum
    }

    /// Active configuration
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Ready processes, head first
    pub fn ready(&self) -> impl Iterator<Item = &Process> {
        self.ready.iter()
    }

    /// Number of ready processes
    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }

    /// Processes that have not arrived yet, in arrival order
    pub fn future(&self) -> &[Process] {
        &self.future
    }

    /// The running process, if any
    pub fn current(&self) -> Option<&Process> {
        self.current.as_ref().map(|r| &r.process)
    }

    /// Time units the running process has used of its current allotment
    pub fn quantum_consumed(&self) -> u64 {
        self.current.as_ref().map_or(0, |r| r.consumed)
    }

    /// Finished processes, in completion order
    pub fn finished(&self) -> &[Process] {
        &self.finished
    }

    /// Closed bursts, oldest first
    pub fn history(&self) -> &[Burst] {
        &self.history
    }

    /// Number of dispatches so far
    pub fn context_switches(&self) -> u64 {
        self.context_switches
    }

    /// Routes an accepted process to the future list or the ready tail
    fn enqueue_admitted(&mut self, process: Process) {
        if process.arrival() > self.clock {
            let arrival = process.arrival();
            let index = self.future.partition_point(|p| p.arrival() <= arrival);
            self.future.insert(index, process);
        } else {
            self.ready.enqueue(process);
        }
    }

    fn admit_arrivals(&mut self) {
        let clock = self.clock;
        let arrived = self.future.partition_point(|p| p.arrival() <= clock);
        for process in self.future.drain(..arrived) {
            trace!("{} arrived at t={}", process.pid(), clock);
            self.ready.enqueue(process);
        }
    }

    fn fast_forward(&mut self, next_arrival: u64) {
        debug!("idle t={} -> t={}", self.clock, next_arrival);
        self.ensure_burst(Subject::Idle);
        self.clock = self.clock.max(next_arrival);
        self.close_burst();
        self.admit_arrivals();
        self.emit(SchedulerEvent::Tick { time: self.clock });
        self.open_burst(Subject::Idle);
    }

    fn dispatch(&mut self) {
        let Some(mut process) = self.ready.dequeue() else {
            return;
        };
        self.close_burst();

        process.mark_started(self.clock);
        self.context_switches += 1;
        let subject = Subject::Process(process.pid());
        debug!(
            "dispatch {} at t={} (remaining={}, quantum={})",
            process.pid(),
            self.clock,
            process.remaining(),
            self.config.quantum
        );

        self.current = Some(Running {
            process,
            consumed: 0,
            allotment: self.config.quantum,
        });
        self.emit(SchedulerEvent::ContextSwitch {
            subject,
            time: self.clock,
        });
        self.open_burst(subject);
    }

    fn complete_current(&mut self) {
        let Some(Running { mut process, .. }) = self.current.take() else {
            return;
        };
        process.mark_completed(self.clock);
        debug!("{} finished at t={}", process.pid(), self.clock);

        self.finished.push(process.clone());
        self.emit(SchedulerEvent::ProcessFinished {
            process,
            time: self.clock,
        });
        self.close_burst();
    }

    fn preempt_current(&mut self) {
        self.close_burst();
        if let Some(Running { process, .. }) = self.current.take() {
            debug!(
                "preempt {} at t={} (remaining={})",
                process.pid(),
                self.clock,
                process.remaining()
            );
            self.ready.enqueue(process);
        }
    }

    fn open_burst(&mut self, subject: Subject) {
        self.open_burst = Some(OpenBurst {
            subject,
            start: self.clock,
        });
    }

    /// Makes sure the open burst belongs to `subject`
    fn ensure_burst(&mut self, subject: Subject) {
        if self.open_burst.map(|b| b.subject) != Some(subject) {
            self.close_burst();
            self.open_burst(subject);
        }
    }

    /// Closes the open burst, recording it if it has positive length
    fn close_burst(&mut self) {
        let Some(OpenBurst { subject, start }) = self.open_burst.take() else {
            return;
        };
        let duration = self.clock.saturating_sub(start);
        if duration == 0 {
            return;
        }
        self.history.push(Burst::new(subject, start, duration));
        self.emit(SchedulerEvent::ExecutionBurst {
            subject,
            start,
            duration,
        });
    }

    fn emit(&mut self, event: SchedulerEvent) {
        for observer in self.observers.iter_mut() {
            event.dispatch_to(observer.as_mut());
        }
        if self.config.buffer_events {
            self.events.push(event);
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("clock", &self.clock)
            .field("quantum", &self.config.quantum)
            .field("future", &self.future.len())
            .field("ready", &self.ready.len())
            .field("current", &self.current().map(Process::pid))
            .field("finished", &self.finished.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
