//! Ready queue ordered by `(key, insertion sequence)`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::RuleKey;

/// A process popped from the ready queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyEntry {
    /// Index into the process table.
    pub index: usize,
    /// Insertion sequence stamp that broke ties for this entry.
    pub seq: u64,
}

/// Min-ordered ready queue.
///
/// Keys are captured when a process is queued. The sequence counter is
/// local to one queue (one simulation run) and only ever increases.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    heap: BinaryHeap<Reverse<(RuleKey, u64, usize)>>,
    next_seq: u64,
}

impl ReadyQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `index` under `key` with a fresh sequence stamp.
    ///
    /// Returns the stamp.
    pub fn push(&mut self, index: usize, key: RuleKey) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((key, seq, index)));
        seq
    }

    /// Re-queues a preempted entry under a new key, keeping its stamp.
    pub fn requeue(&mut self, entry: ReadyEntry, key: RuleKey) {
        self.heap.push(Reverse((key, entry.seq, entry.index)));
    }

    /// Removes the entry with the lowest `(key, seq)`.
    pub fn pop(&mut self) -> Option<ReadyEntry> {
        self.heap
            .pop()
            .map(|Reverse((_, seq, index))| ReadyEntry { index, seq })
    }

    /// Peeks at the next entry without removing it.
    pub fn peek(&self) -> Option<ReadyEntry> {
        self.heap
            .peek()
            .map(|Reverse((_, seq, index))| ReadyEntry {
                index: *index,
                seq: *seq,
            })
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_by_key() {
        let mut q = ReadyQueue::new();
        q.push(0, 5);
        q.push(1, 1);
        q.push(2, 3);
        let order: Vec<_> = std::iter::from_fn(|| q.pop().map(|e| e.index)).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_by_insertion_order() {
        let mut q = ReadyQueue::new();
        q.push(7, 0);
        q.push(3, 0);
        q.push(5, 0);
        let order: Vec<_> = std::iter::from_fn(|| q.pop().map(|e| e.index)).collect();
        assert_eq!(order, vec![7, 3, 5]);
    }

    #[test]
    fn test_requeue_keeps_stamp() {
        let mut q = ReadyQueue::new();
        q.push(0, 3);
        let running = q.pop().unwrap();
        q.push(1, 3); // newcomer with an equal key
        q.requeue(running, 3);
        assert_eq!(q.pop().unwrap().index, 0);
        assert_eq!(q.pop().unwrap().index, 1);
    }

    #[test]
    fn test_sequence_increases() {
        let mut q = ReadyQueue::new();
        let a = q.push(0, 0);
        let b = q.push(1, 0);
        assert!(b > a);
        assert_eq!(q.peek().unwrap().seq, a);
        assert_eq!(q.len(), 2);
        q.pop();
        q.pop();
        assert!(q.is_empty());
        assert!(q.peek().is_none());
    }
}
