//! Queue sets shared by both engines.
//!
//! Owns the process table and the NEW, READY and BLOCKED sets of one run.
//! Queues hold indices into the table; state changes go through the drain
//! operations here so both engines move processes the same way.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use tracing::trace;

use crate::dispatching::{OrderingRule, ReadyEntry, ReadyQueue};
use crate::models::{Process, ProcessRecord, ProcessState};

#[derive(Debug)]
pub(crate) struct SimulationState {
    records: Vec<ProcessRecord>,
    rule: &'static dyn OrderingRule,
    // Not yet arrived, sorted by (arrival, input order).
    arrivals: VecDeque<usize>,
    // (unblock time, block order, index)
    blocked: BinaryHeap<Reverse<(i64, u64, usize)>>,
    block_seq: u64,
    ready: ReadyQueue,
    completed: Vec<usize>,
}

impl SimulationState {
    pub(crate) fn new(processes: &[Process], rule: &'static dyn OrderingRule) -> Self {
        let records: Vec<ProcessRecord> = processes.iter().map(ProcessRecord::new).collect();
        let mut order: Vec<usize> = (0..records.len()).collect();
        order.sort_by_key(|&i| records[i].arrival);

        Self {
            records,
            rule,
            arrivals: order.into(),
            blocked: BinaryHeap::new(),
            block_seq: 0,
            ready: ReadyQueue::new(),
            completed: Vec::new(),
        }
    }

    pub(crate) fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub(crate) fn record(&self, index: usize) -> &ProcessRecord {
        &self.records[index]
    }

    pub(crate) fn record_mut(&mut self, index: usize) -> &mut ProcessRecord {
        &mut self.records[index]
    }

    /// Moves every process with `arrival <= now` from NEW to READY.
    ///
    /// Returns the admitted indices in admission order.
    pub(crate) fn admit_arrivals(&mut self, now: i64) -> Vec<usize> {
        let mut admitted = Vec::new();
        while let Some(&index) = self.arrivals.front() {
            if self.records[index].arrival > now {
                break;
            }
            self.arrivals.pop_front();
            self.enqueue(index);
            admitted.push(index);
        }
        admitted
    }

    /// Moves every process with `unblock <= now` from BLOCKED to READY.
    ///
    /// Returns the admitted indices in unblock order.
    pub(crate) fn admit_unblocked(&mut self, now: i64) -> Vec<usize> {
        let mut admitted = Vec::new();
        while let Some(&Reverse((until, _, index))) = self.blocked.peek() {
            if until > now {
                break;
            }
            self.blocked.pop();
            self.enqueue(index);
            admitted.push(index);
        }
        admitted
    }

    /// Admits every arrival with `arrival <= now`, then every process whose
    /// I/O finished by `now`.
    pub(crate) fn admit(&mut self, now: i64) {
        self.admit_arrivals(now);
        self.admit_unblocked(now);
    }

    /// Queues a process in READY with a fresh sequence stamp.
    fn enqueue(&mut self, index: usize) {
        let record = &mut self.records[index];
        record.state = ProcessState::Ready;
        let key = self.rule.key(record);
        let seq = self.ready.push(index, key);
        trace!(pid = %record.pid, key, seq, "ready");
    }

    /// Returns a preempted process to READY under its current key.
    pub(crate) fn requeue(&mut self, entry: ReadyEntry) {
        let record = &mut self.records[entry.index];
        record.state = ProcessState::Ready;
        let key = self.rule.key(record);
        self.ready.requeue(entry, key);
    }

    pub(crate) fn pop_ready(&mut self) -> Option<ReadyEntry> {
        self.ready.pop()
    }

    /// Puts a selected but not yet dispatched process back and selects
    /// again, so processes admitted since the selection compete with it.
    pub(crate) fn reselect(&mut self, entry: ReadyEntry) -> ReadyEntry {
        self.requeue(entry);
        self.pop_ready().unwrap_or(entry)
    }

    /// Parks a process in BLOCKED until `until`.
    pub(crate) fn block(&mut self, index: usize, until: i64) {
        let record = &mut self.records[index];
        record.state = ProcessState::Blocked;
        trace!(pid = %record.pid, until, "blocked");
        self.blocked.push(Reverse((until, self.block_seq, index)));
        self.block_seq += 1;
    }

    /// Retires a process as COMPLETED at `now`.
    pub(crate) fn complete(&mut self, index: usize, now: i64) {
        let record = &mut self.records[index];
        record.complete(now);
        trace!(pid = %record.pid, at = now, "completed");
        self.completed.push(index);
    }

    /// Earliest future arrival or unblock instant.
    pub(crate) fn next_event_time(&self) -> Option<i64> {
        let next_arrival = self
            .arrivals
            .front()
            .map(|&index| self.records[index].arrival);
        let next_unblock = self.blocked.peek().map(|Reverse((until, _, _))| *until);
        match (next_arrival, next_unblock) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether anything is left in NEW, READY or BLOCKED.
    pub(crate) fn has_work(&self) -> bool {
        !self.arrivals.is_empty() || !self.ready.is_empty() || !self.blocked.is_empty()
    }

    /// Consumes the state, returning completed records in completion order.
    pub(crate) fn into_completed(self) -> Vec<ProcessRecord> {
        let mut slots: Vec<Option<ProcessRecord>> = self.records.into_iter().map(Some).collect();
        self.completed
            .into_iter()
            .filter_map(|index| slots[index].take())
            .collect()
    }
}
