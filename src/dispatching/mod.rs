//! Ordering rules and the ready queue.
//!
//! Every scheduling policy is an [`OrderingRule`]: a function from a
//! process record to an integer key, plus a preemption flag. The
//! [`ReadyQueue`] orders records by `(key, insertion sequence)`, so equal
//! keys always resolve in the order processes entered `READY`.
//!
//! # Usage
//!
//! ```
//! use cpu_schedsim::dispatching::{Policy, ReadyQueue};
//! use cpu_schedsim::models::{Process, ProcessRecord};
//!
//! let records = vec![
//!     ProcessRecord::new(&Process::new("long", 0).with_cpu(8)),
//!     ProcessRecord::new(&Process::new("short", 0).with_cpu(2)),
//! ];
//! let rule = Policy::Sjf.rule();
//!
//! let mut ready = ReadyQueue::new();
//! for (index, record) in records.iter().enumerate() {
//!     ready.push(index, rule.key(record));
//! }
//! assert_eq!(ready.pop().map(|e| e.index), Some(1));
//! ```

mod policy;
mod queue;
pub mod rules;

pub use policy::Policy;
pub use queue::{ReadyEntry, ReadyQueue};

use crate::models::ProcessRecord;
use std::fmt::Debug;

/// Sort key returned by an ordering rule.
///
/// Lower keys are dispatched first.
pub type RuleKey = i64;

/// A ready-queue ordering rule.
///
/// # Key Convention
/// **Lower key = dispatched first.** "Longest first" rules negate their
/// measure. Ties are never resolved by the rule itself; the ready queue
/// falls back to insertion order.
pub trait OrderingRule: Send + Sync + Debug {
    /// Rule name (e.g., "FCFS", "SRTF").
    fn name(&self) -> &'static str;

    /// Computes the key of a record at the moment it is queued.
    fn key(&self, record: &ProcessRecord) -> RuleKey;

    /// Whether the running process is re-evaluated against the ready queue
    /// every time unit.
    fn is_preemptive(&self) -> bool {
        false
    }

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
