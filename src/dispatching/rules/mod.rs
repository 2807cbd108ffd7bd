//! Built-in ordering rules.
//!
//! # Categories
//!
//! - **Arrival-based**: FCFS
//! - **Burst-based** (non-preemptive): SJF, LJF
//! - **Remaining-time** (preemptive): SRTF, LRTF
//! - **Priority**: PRIORITY (non-preemptive), PRTF (preemptive)
//!
//! # Key Convention
//! All rules return lower keys for processes that should run first.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5

use super::{OrderingRule, RuleKey};
use crate::models::ProcessRecord;

// ======================== Arrival-based rules ========================

/// First-Come, First-Served.
///
/// Every record gets the same key, so the ready queue degenerates into a
/// FIFO ordered by insertion sequence.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl OrderingRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn key(&self, _record: &ProcessRecord) -> RuleKey {
        0
    }

    fn description(&self) -> &'static str {
        "First-Come, First-Served"
    }
}

// ======================== Burst-based rules ========================

/// Shortest Job First.
///
/// Keys on the length of the next CPU burst. Minimizes mean waiting time
/// among non-preemptive policies when burst lengths are known.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl OrderingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn key(&self, record: &ProcessRecord) -> RuleKey {
        record.current_burst()
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Longest Job First.
#[derive(Debug, Clone, Copy)]
pub struct Ljf;

impl OrderingRule for Ljf {
    fn name(&self) -> &'static str {
        "LJF"
    }

    fn key(&self, record: &ProcessRecord) -> RuleKey {
        -record.current_burst()
    }

    fn description(&self) -> &'static str {
        "Longest Job First"
    }
}

// ======================== Remaining-time rules ========================

/// Shortest Remaining Time First.
///
/// Preemptive counterpart of SJF keyed on the total CPU time still owed
/// across all remaining bursts.
#[derive(Debug, Clone, Copy)]
pub struct Srtf;

impl OrderingRule for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn key(&self, record: &ProcessRecord) -> RuleKey {
        record.remaining_cpu
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time First"
    }
}

/// Longest Remaining Time First.
#[derive(Debug, Clone, Copy)]
pub struct Lrtf;

impl OrderingRule for Lrtf {
    fn name(&self) -> &'static str {
        "LRTF"
    }

    fn key(&self, record: &ProcessRecord) -> RuleKey {
        -record.remaining_cpu
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Longest Remaining Time First"
    }
}

// ======================== Priority rules ========================

/// Non-preemptive priority.
///
/// Lower priority value = more urgent. Records without a priority sort
/// last; validation rejects them before a priority run starts.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl OrderingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn key(&self, record: &ProcessRecord) -> RuleKey {
        record.priority.unwrap_or(RuleKey::MAX)
    }

    fn description(&self) -> &'static str {
        "Priority (non-preemptive)"
    }
}

/// Preemptive priority.
#[derive(Debug, Clone, Copy)]
pub struct PreemptivePriority;

impl OrderingRule for PreemptivePriority {
    fn name(&self) -> &'static str {
        "PRTF"
    }

    fn key(&self, record: &ProcessRecord) -> RuleKey {
        record.priority.unwrap_or(RuleKey::MAX)
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Priority (preemptive)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn make_record(pid: &str, bursts: &[i64], priority: Option<i64>) -> ProcessRecord {
        let mut process = Process::new(pid, 0).with_bursts(bursts.to_vec());
        process.priority = priority;
        ProcessRecord::new(&process)
    }

    #[test]
    fn test_fcfs_constant_key() {
        let a = make_record("a", &[9], None);
        let b = make_record("b", &[1], None);
        assert_eq!(Fcfs.key(&a), Fcfs.key(&b));
        assert!(!Fcfs.is_preemptive());
    }

    #[test]
    fn test_sjf_uses_next_burst() {
        // Next burst 2 despite a long tail.
        let short_next = make_record("s", &[2, 1, 20], None);
        let long_next = make_record("l", &[5], None);
        assert!(Sjf.key(&short_next) < Sjf.key(&long_next));
    }

    #[test]
    fn test_ljf() {
        let short = make_record("s", &[2], None);
        let long = make_record("l", &[5], None);
        assert!(Ljf.key(&long) < Ljf.key(&short));
    }

    #[test]
    fn test_srtf_uses_total_remaining() {
        let a = make_record("a", &[2, 1, 20], None); // remaining 22
        let b = make_record("b", &[5], None); // remaining 5
        assert!(Srtf.key(&b) < Srtf.key(&a));
        assert!(Srtf.is_preemptive());
    }

    #[test]
    fn test_srtf_key_tracks_progress() {
        let mut a = make_record("a", &[5], None);
        let before = Srtf.key(&a);
        a.run_unit();
        assert_eq!(Srtf.key(&a), before - 1);
    }

    #[test]
    fn test_lrtf() {
        let a = make_record("a", &[2], None);
        let b = make_record("b", &[5], None);
        assert!(Lrtf.key(&b) < Lrtf.key(&a));
        assert!(Lrtf.is_preemptive());
    }

    #[test]
    fn test_priority_lower_value_first() {
        let urgent = make_record("u", &[5], Some(1));
        let relaxed = make_record("r", &[5], Some(10));
        let missing = make_record("m", &[5], None);
        assert!(Priority.key(&urgent) < Priority.key(&relaxed));
        assert!(Priority.key(&relaxed) < Priority.key(&missing));
        assert!(!Priority.is_preemptive());
    }

    #[test]
    fn test_preemptive_priority() {
        let urgent = make_record("u", &[5], Some(1));
        let relaxed = make_record("r", &[5], Some(10));
        assert!(PreemptivePriority.key(&urgent) < PreemptivePriority.key(&relaxed));
        assert!(PreemptivePriority.is_preemptive());
    }
}
