//! Per-run mutable process state.
//!
//! A [`ProcessRecord`] is built once from a [`Process`] at simulation start
//! and is mutated only by the engines. It tracks where the process is in its
//! burst sequence and the timestamps the metrics need.

use super::{Process, ProcessState};

/// How a CPU burst ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstEnd {
    /// An I/O burst of the given length follows.
    Block {
        /// I/O duration.
        io: i64,
    },
    /// That was the last CPU burst.
    Finish,
}

/// Mutable simulation state for one process.
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    /// Process identifier.
    pub pid: String,
    /// Arrival time.
    pub arrival: i64,
    /// Scheduling priority (lower = more urgent).
    pub priority: Option<i64>,
    /// Current life-cycle state.
    pub state: ProcessState,
    /// Total CPU time consumed so far.
    pub cpu_time: i64,
    /// CPU time still owed across all remaining CPU bursts.
    pub remaining_cpu: i64,
    bursts: Vec<i64>,
    cursor: usize,
    burst_left: i64,
    response_time: Option<i64>,
    completion_time: Option<i64>,
}

impl ProcessRecord {
    /// Creates a record in the `NEW` state.
    pub fn new(process: &Process) -> Self {
        Self {
            pid: process.pid.clone(),
            arrival: process.arrival,
            priority: process.priority,
            state: ProcessState::New,
            cpu_time: 0,
            remaining_cpu: process.total_cpu_time(),
            bursts: process.bursts.clone(),
            cursor: 0,
            burst_left: process.bursts.first().copied().unwrap_or(0),
            response_time: None,
            completion_time: None,
        }
    }

    /// Full length of the CPU burst the cursor points at.
    pub fn current_burst(&self) -> i64 {
        self.bursts.get(self.cursor).copied().unwrap_or(0)
    }

    /// Units left in the current CPU burst.
    pub fn burst_left(&self) -> i64 {
        self.burst_left
    }

    /// Response time (first dispatch − arrival), once dispatched.
    pub fn response_time(&self) -> Option<i64> {
        self.response_time
    }

    /// Completion time, once completed.
    pub fn completion_time(&self) -> Option<i64> {
        self.completion_time
    }

    /// Whether the record has reached `COMPLETED`.
    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Puts the record on the CPU at time `now`.
    ///
    /// Records the response time on the first dispatch only. Returns `true`
    /// when this was the first dispatch.
    pub fn dispatch(&mut self, now: i64) -> bool {
        self.state = ProcessState::Running;
        if self.response_time.is_none() {
            self.response_time = Some(now - self.arrival);
            true
        } else {
            false
        }
    }

    /// Executes one unit of the current CPU burst.
    ///
    /// Returns `Some` when that unit finished the burst.
    pub fn run_unit(&mut self) -> Option<BurstEnd> {
        self.consume(1);
        if self.burst_left == 0 {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Executes the rest of the current CPU burst in one step.
    pub fn run_burst(&mut self) -> BurstEnd {
        self.consume(self.burst_left);
        self.advance()
    }

    /// Marks the record `COMPLETED` at time `now`.
    pub fn complete(&mut self, now: i64) {
        self.state = ProcessState::Completed;
        self.completion_time = Some(now);
    }

    /// Turnaround time: completion − arrival.
    pub fn turnaround(&self) -> Option<i64> {
        self.completion_time.map(|c| c - self.arrival)
    }

    /// Waiting time: turnaround − CPU time consumed.
    pub fn waiting(&self) -> Option<i64> {
        self.turnaround().map(|tat| tat - self.cpu_time)
    }

    fn consume(&mut self, units: i64) {
        self.burst_left -= units;
        self.cpu_time += units;
        self.remaining_cpu -= units;
    }

    // Moves the cursor past the finished CPU burst and, if present, the
    // following I/O burst.
    fn advance(&mut self) -> BurstEnd {
        self.cursor += 1;
        match self.bursts.get(self.cursor).copied() {
            Some(io) => {
                self.cursor += 1;
                self.burst_left = self.current_burst();
                BurstEnd::Block { io }
            }
            None => BurstEnd::Finish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(bursts: &[i64]) -> ProcessRecord {
        ProcessRecord::new(&Process::new("P", 2).with_bursts(bursts.to_vec()))
    }

    #[test]
    fn test_new_record() {
        let r = record(&[4, 2, 3]);
        assert_eq!(r.state, ProcessState::New);
        assert_eq!(r.current_burst(), 4);
        assert_eq!(r.burst_left(), 4);
        assert_eq!(r.remaining_cpu, 7);
        assert_eq!(r.cpu_time, 0);
        assert!(r.response_time().is_none());
        assert!(!r.is_completed());
    }

    #[test]
    fn test_response_time_set_once() {
        let mut r = record(&[3]);
        assert!(r.dispatch(5));
        assert!(!r.dispatch(9));
        assert_eq!(r.response_time(), Some(3));
        assert_eq!(r.state, ProcessState::Running);
    }

    #[test]
    fn test_run_burst_blocks_then_finishes() {
        let mut r = record(&[4, 2, 3]);
        assert_eq!(r.run_burst(), BurstEnd::Block { io: 2 });
        assert_eq!(r.current_burst(), 3);
        assert_eq!(r.burst_left(), 3);
        assert_eq!(r.cpu_time, 4);
        assert_eq!(r.remaining_cpu, 3);

        assert_eq!(r.run_burst(), BurstEnd::Finish);
        assert_eq!(r.cpu_time, 7);
        assert_eq!(r.remaining_cpu, 0);
    }

    #[test]
    fn test_run_unit() {
        let mut r = record(&[2, 1, 1]);
        assert_eq!(r.run_unit(), None);
        assert_eq!(r.run_unit(), Some(BurstEnd::Block { io: 1 }));
        assert_eq!(r.run_unit(), Some(BurstEnd::Finish));
        assert_eq!(r.cpu_time, 3);
    }

    #[test]
    fn test_metrics_after_completion() {
        let mut r = record(&[4, 2, 3]);
        r.dispatch(2);
        r.run_burst();
        r.run_burst();
        r.complete(13);

        assert_eq!(r.state, ProcessState::Completed);
        assert_eq!(r.turnaround(), Some(11));
        assert_eq!(r.waiting(), Some(4));
        assert_eq!(
            r.turnaround().unwrap(),
            r.waiting().unwrap() + r.cpu_time
        );
    }
}
