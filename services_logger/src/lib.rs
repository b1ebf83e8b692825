//! # Logger Service
//!
//! This crate implements structured logging for scheduler runs.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Each scheduler notification becomes a [`LogEntry`] with typed fields;
//! the same entry is also forwarded to the `log` facade so a host binary
//! can route it wherever it likes.

use core_types::{Process, ProcessId, Subject};
use serde::{Deserialize, Serialize};
use sim_scheduler::SchedulerObserver;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Process the entry is about (if any)
    pub source: Option<ProcessId>,
    /// Simulation time of the event
    pub time: u64,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, time: u64, message: String) -> Self {
        Self {
            level,
            source: None,
            time,
            message,
            fields: Vec::new(),
        }
    }

    /// Sets the source process
    pub fn with_source(mut self, source: ProcessId) -> Self {
        self.source = Some(source);
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: &str, value: impl ToString) -> Self {
        self.fields.push((key.to_string(), value.to_string()));
        self
    }

    /// Looks up a field by key
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Observer that turns scheduler notifications into log entries
///
/// Ticks are logged at `Debug`, everything else at `Info`. Entries below
/// `min_level` are dropped.
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    min_level: LogLevel,
    entries: Vec<LogEntry>,
}

impl LoggingObserver {
    /// Creates a logger that keeps entries at `min_level` and above
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            min_level,
            entries: Vec::new(),
        }
    }

    /// Recorded entries, oldest first
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries about a single process
    pub fn entries_for(&self, pid: ProcessId) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.source == Some(pid))
    }

    /// Discards all recorded entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn record(&mut self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let level: log::Level = entry.level.into();
        log::log!(
            target: "rr_scheduler",
            level,
            "t={} {} {:?}",
            entry.time,
            entry.message,
            entry.fields
        );
        self.entries.push(entry);
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

fn with_subject(entry: LogEntry, subject: Subject) -> LogEntry {
    match subject {
        Subject::Process(pid) => entry.with_source(pid),
        Subject::Idle => entry,
    }
}

impl SchedulerObserver for LoggingObserver {
    fn on_tick(&mut self, time: u64) {
        self.record(LogEntry::new(LogLevel::Debug, time, "tick".to_string()));
    }

    fn on_context_switch(&mut self, subject: Subject, time: u64) {
        let entry = LogEntry::new(LogLevel::Info, time, "context switch".to_string())
            .with_field("subject", subject);
        self.record(with_subject(entry, subject));
    }

    fn on_process_finished(&mut self, process: &Process, time: u64) {
        let entry = LogEntry::new(LogLevel::Info, time, "process finished".to_string())
            .with_source(process.pid())
            .with_field("arrival", process.arrival())
            .with_field("burst", process.burst())
            .with_field("turnaround", time.saturating_sub(process.arrival()));
        self.record(entry);
    }

    fn on_execution_burst(&mut self, subject: Subject, start: u64, duration: u64) {
        let entry = LogEntry::new(LogLevel::Info, start, "execution burst".to_string())
            .with_field("subject", subject)
            .with_field("start", start)
            .with_field("duration", duration);
        self.record(with_subject(entry, subject));
    }
}
