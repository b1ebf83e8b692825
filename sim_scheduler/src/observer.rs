//! Scheduler notifications
//!
//! State changes are reported two ways. Push-style, through the
//! [`SchedulerObserver`] trait, whose methods are all no-ops by default so
//! implementers only override what they care about. And as plain
//! [`SchedulerEvent`] values, which a driver can collect and inspect after
//! each step instead of reacting inside a callback.
//!
//! Observers must not call back into the scheduler.

use core_types::{Process, Subject};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Receiver for scheduler notifications
pub trait SchedulerObserver {
    /// The clock advanced to `time`
    fn on_tick(&mut self, _time: u64) {}

    /// `subject` was given the CPU at `time`
    fn on_context_switch(&mut self, _subject: Subject, _time: u64) {}

    /// `process` received its full burst at `time`
    fn on_process_finished(&mut self, _process: &Process, _time: u64) {}

    /// A burst of positive length closed
    fn on_execution_burst(&mut self, _subject: Subject, _start: u64, _duration: u64) {}
}

/// Shared observers, so a caller can keep a handle and inspect it later
impl<T: SchedulerObserver> SchedulerObserver for Rc<RefCell<T>> {
    fn on_tick(&mut self, time: u64) {
        self.borrow_mut().on_tick(time);
    }

    fn on_context_switch(&mut self, subject: Subject, time: u64) {
        self.borrow_mut().on_context_switch(subject, time);
    }

    fn on_process_finished(&mut self, process: &Process, time: u64) {
        self.borrow_mut().on_process_finished(process, time);
    }

    fn on_execution_burst(&mut self, subject: Subject, start: u64, duration: u64) {
        self.borrow_mut().on_execution_burst(subject, start, duration);
    }
}

/// A single scheduler notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerEvent {
    /// The clock advanced
    Tick { time: u64 },
    /// A subject was given the CPU
    ContextSwitch { subject: Subject, time: u64 },
    /// A process completed
    ProcessFinished { process: Process, time: u64 },
    /// A burst closed
    ExecutionBurst {
        subject: Subject,
        start: u64,
        duration: u64,
    },
}

impl SchedulerEvent {
    /// Invokes the matching observer method
    pub fn dispatch_to(&self, observer: &mut dyn SchedulerObserver) {
        match self {
            SchedulerEvent::Tick { time } => observer.on_tick(*time),
            SchedulerEvent::ContextSwitch { subject, time } => {
                observer.on_context_switch(*subject, *time)
            }
            SchedulerEvent::ProcessFinished { process, time } => {
                observer.on_process_finished(process, *time)
            }
            SchedulerEvent::ExecutionBurst {
                subject,
                start,
                duration,
            } => observer.on_execution_burst(*subject, *start, *duration),
        }
    }

    /// Time at which the event happened (burst start for bursts)
    pub fn time(&self) -> u64 {
        match self {
            SchedulerEvent::Tick { time }
            | SchedulerEvent::ContextSwitch { time, .. }
            | SchedulerEvent::ProcessFinished { time, .. } => *time,
            SchedulerEvent::ExecutionBurst { start, .. } => *start,
        }
    }
}

/// Observer that keeps every notification as a [`SchedulerEvent`]
#[derive(Debug, Default, Clone)]
pub struct EventRecorder {
    events: Vec<SchedulerEvent>,
}

impl EventRecorder {
    /// Creates an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first
    pub fn events(&self) -> &[SchedulerEvent] {
        &self.events
    }

    /// Takes all recorded events
    pub fn take(&mut self) -> Vec<SchedulerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of tick notifications seen
    pub fn tick_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SchedulerEvent::Tick { .. }))
            .count()
    }
}

impl SchedulerObserver for EventRecorder {
    fn on_tick(&mut self, time: u64) {
        self.events.push(SchedulerEvent::Tick { time });
    }

    fn on_context_switch(&mut self, subject: Subject, time: u64) {
        self.events
            .push(SchedulerEvent::ContextSwitch { subject, time });
    }

    fn on_process_finished(&mut self, process: &Process, time: u64) {
        self.events.push(SchedulerEvent::ProcessFinished {
            process: process.clone(),
            time,
        });
    }

    fn on_execution_burst(&mut self, subject: Subject, start: u64, duration: u64) {
        self.events.push(SchedulerEvent::ExecutionBurst {
            subject,
            start,
            duration,
        });
    }
}
