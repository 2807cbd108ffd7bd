//! Gantt chart model.
//!
//! A Gantt chart lists the contiguous intervals during which one process
//! (or nobody) held the CPU. It is the batch-mode output of a simulation.

use serde::{Deserialize, Serialize};

/// Sentinel pid used for intervals where the CPU is idle.
pub const IDLE_PID: &str = "IDLE";

/// A contiguous CPU interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttSegment {
    /// Process that held the CPU, or [`IDLE_PID`].
    pub pid: String,
    /// Start time (inclusive).
    pub start: i64,
    /// End time (exclusive).
    pub end: i64,
}

impl GanttSegment {
    /// Creates a segment.
    pub fn new(pid: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            pid: pid.into(),
            start,
            end,
        }
    }

    /// Creates an idle segment.
    pub fn idle(start: i64, end: i64) -> Self {
        Self::new(IDLE_PID, start, end)
    }

    /// Whether this is an idle interval.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pid == IDLE_PID
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Ordered list of Gantt segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GanttChart {
    segments: Vec<GanttSegment>,
}

impl GanttChart {
    /// Creates an empty chart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a run of `pid` over `[start, end)` as its own segment.
    pub fn push_run(&mut self, pid: &str, start: i64, end: i64) {
        self.segments.push(GanttSegment::new(pid, start, end));
    }

    /// Appends an idle interval. Empty intervals are dropped.
    pub fn push_idle(&mut self, start: i64, end: i64) {
        if end > start {
            self.segments.push(GanttSegment::idle(start, end));
        }
    }

    /// Extends the last segment if it belongs to `pid` and ends at `start`,
    /// otherwise opens a new one.
    ///
    /// Used by unit-stepped engines so that consecutive units of the same
    /// run read as one interval.
    pub fn extend(&mut self, pid: &str, start: i64, end: i64) {
        match self.segments.last_mut() {
            Some(last) if last.pid == pid && last.end == start => last.end = end,
            _ => self.segments.push(GanttSegment::new(pid, start, end)),
        }
    }

    /// Segments in chronological order.
    pub fn segments(&self) -> &[GanttSegment] {
        &self.segments
    }

    /// Segments belonging to `pid`.
    pub fn segments_for(&self, pid: &str) -> Vec<&GanttSegment> {
        self.segments.iter().filter(|s| s.pid == pid).collect()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the chart has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// End of the last segment (0 for an empty chart).
    pub fn end_time(&self) -> i64 {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Time spent running processes.
    pub fn busy_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| !s.is_idle())
            .map(GanttSegment::duration)
            .sum()
    }

    /// Time spent idle.
    pub fn idle_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.is_idle())
            .map(GanttSegment::duration)
            .sum()
    }

    /// Consumes the chart, returning its segments.
    pub fn into_segments(self) -> Vec<GanttSegment> {
        self.segments
    }
}
