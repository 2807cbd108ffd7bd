//! Process (job) model.
//!
//! A process is the unit of work handed to the simulator: an arrival time,
//! an alternating sequence of CPU and I/O bursts, and an optional priority.
//!
//! # Burst Layout
//!
//! Bursts strictly alternate, starting and ending with CPU work:
//!
//! | index | 0 | 1 | 2 | 3 | 4 |
//! |-------|---|---|---|---|---|
//! | kind  | CPU | I/O | CPU | I/O | CPU |
//!
//! # Time Representation
//! All times are integer time units relative to the simulation epoch (t=0).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A process submitted for simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Process identifier. Accepts either a JSON string or integer on input.
    #[serde(deserialize_with = "deserialize_pid")]
    pub pid: String,
    /// Arrival time. Must be non-negative.
    pub arrival: i64,
    /// Alternating CPU, I/O, CPU, ... burst lengths.
    pub bursts: Vec<i64>,
    /// Scheduling priority (lower = more urgent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl Process {
    /// Creates a process with no bursts.
    pub fn new(pid: impl Into<String>, arrival: i64) -> Self {
        Self {
            pid: pid.into(),
            arrival,
            bursts: Vec::new(),
            priority: None,
        }
    }

    /// Replaces the whole burst sequence.
    pub fn with_bursts(mut self, bursts: impl Into<Vec<i64>>) -> Self {
        self.bursts = bursts.into();
        self
    }

    /// Appends a CPU burst. Alternate with [`Process::with_io`].
    pub fn with_cpu(mut self, units: i64) -> Self {
        self.bursts.push(units);
        self
    }

    /// Appends an I/O burst.
    pub fn with_io(mut self, units: i64) -> Self {
        self.bursts.push(units);
        self
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// CPU bursts (even positions of the sequence).
    pub fn cpu_bursts(&self) -> impl Iterator<Item = i64> + '_ {
        self.bursts.iter().step_by(2).copied()
    }

    /// I/O bursts (odd positions of the sequence).
    pub fn io_bursts(&self) -> impl Iterator<Item = i64> + '_ {
        self.bursts.iter().skip(1).step_by(2).copied()
    }

    /// Total CPU demand.
    pub fn total_cpu_time(&self) -> i64 {
        self.cpu_bursts().sum()
    }

    /// Total I/O demand.
    pub fn total_io_time(&self) -> i64 {
        self.io_bursts().sum()
    }
}

/// Life-cycle state of a process inside a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcessState {
    /// Not yet arrived.
    New,
    /// Waiting for the CPU.
    Ready,
    /// Holding the CPU.
    Running,
    /// Waiting for an I/O burst to finish.
    Blocked,
    /// All bursts finished.
    Completed,
}

impl ProcessState {
    /// Upper-case wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Blocked => "BLOCKED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn deserialize_pid<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPid {
        Text(String),
        Number(i64),
    }

    Ok(match RawPid::deserialize(deserializer)? {
        RawPid::Text(s) => s,
        RawPid::Number(n) => n.to_string(),
    })
}
