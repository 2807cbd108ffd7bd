//! Policy selector.
//!
//! `Policy` is the tagged variant callers use to pick an ordering rule,
//! either directly or by its short route name (`"fcfs"`, `"srtf"`, ...).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::rules;
use super::OrderingRule;
use crate::error::Error;

/// Scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First-Come, First-Served.
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Longest Job First (non-preemptive).
    Ljf,
    /// Priority (non-preemptive).
    Priority,
    /// Shortest Remaining Time First.
    Srtf,
    /// Longest Remaining Time First.
    Lrtf,
    /// Priority (preemptive).
    PreemptivePriority,
}

impl Policy {
    /// Every policy, in declaration order.
    pub const ALL: [Policy; 7] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Ljf,
        Policy::Priority,
        Policy::Srtf,
        Policy::Lrtf,
        Policy::PreemptivePriority,
    ];

    /// The ordering rule backing this policy.
    pub fn rule(&self) -> &'static dyn OrderingRule {
        match self {
            Self::Fcfs => &rules::Fcfs,
            Self::Sjf => &rules::Sjf,
            Self::Ljf => &rules::Ljf,
            Self::Priority => &rules::Priority,
            Self::Srtf => &rules::Srtf,
            Self::Lrtf => &rules::Lrtf,
            Self::PreemptivePriority => &rules::PreemptivePriority,
        }
    }

    /// Whether the running process can lose the CPU mid-burst.
    pub fn is_preemptive(&self) -> bool {
        self.rule().is_preemptive()
    }

    /// Whether every process must carry a priority.
    pub fn requires_priority(&self) -> bool {
        matches!(self, Self::Priority | Self::PreemptivePriority)
    }

    /// Short route name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Ljf => "ljf",
            Self::Priority => "priority",
            Self::Srtf => "srtf",
            Self::Lrtf => "lrtf",
            Self::PreemptivePriority => "prtf",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "ljf" => Ok(Self::Ljf),
            "priority" | "prio" => Ok(Self::Priority),
            "srtf" => Ok(Self::Srtf),
            "lrtf" => Ok(Self::Lrtf),
            "prtf" | "preemptive_priority" | "preemptive-priority" => {
                Ok(Self::PreemptivePriority)
            }
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

impl Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
