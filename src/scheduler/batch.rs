//! Batch (statistics) engine.
//!
//! # Algorithm
//!
//! Non-preemptive policies advance time from event to event:
//!
//! 1. Admit every arrival up to now, then every process whose I/O has
//!    finished, into READY.
//! 2. Pop the selected process and run its whole CPU burst as one segment.
//! 3. Block it for the following I/O burst, or complete it.
//! 4. Add the context-switch delay if work remains.
//! 5. With READY empty, emit one IDLE segment up to the next arrival or
//!    unblock and jump there.
//!
//! Preemptive policies step one time unit at a time: the running process is
//! re-queued every tick under its current key and the best process is
//! re-selected. Consecutive units of the same run are merged into one
//! segment. A preemption pays the context-switch delay before dispatch;
//! processes admitted during the delay compete with the chosen one again.
//!
//! # Complexity
//! O(e log n) event steps for non-preemptive policies, O(T log n) ticks for
//! preemptive ones, where T is the simulated span.

use tracing::{debug, instrument, trace};

use super::state::SimulationState;
use crate::dispatching::{Policy, ReadyEntry};
use crate::models::{BurstEnd, GanttChart, Process, ProcessRecord, IDLE_PID};

/// Raw result of a batch run, before metrics.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// CPU intervals in chronological order.
    pub gantt: GanttChart,
    /// Completed records in completion order.
    pub completed: Vec<ProcessRecord>,
    /// Simulated time at which the run ended.
    pub total_time: i64,
}

/// Event-jump / unit-step simulation engine producing a Gantt chart.
///
/// # Example
///
/// ```
/// use cpu_schedsim::dispatching::Policy;
/// use cpu_schedsim::models::Process;
/// use cpu_schedsim::scheduler::BatchEngine;
///
/// let processes = vec![
///     Process::new("A", 0).with_cpu(5),
///     Process::new("B", 2).with_cpu(3),
/// ];
/// let outcome = BatchEngine::new(Policy::Fcfs).run(&processes);
/// assert_eq!(outcome.total_time, 8);
/// assert_eq!(outcome.gantt.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BatchEngine {
    policy: Policy,
    context_switch: i64,
}

impl BatchEngine {
    /// Creates an engine with no context-switch delay.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            context_switch: 0,
        }
    }

    /// Sets the fixed delay charged each time a process leaves the CPU
    /// while work remains.
    pub fn with_context_switch(mut self, context_switch: i64) -> Self {
        self.context_switch = context_switch;
        self
    }

    /// The policy this engine simulates.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Runs the simulation. Input is assumed to be validated.
    #[instrument(
        level = "debug",
        skip_all,
        fields(policy = %self.policy, processes = processes.len())
    )]
    pub fn run(&self, processes: &[Process]) -> BatchOutcome {
        let state = SimulationState::new(processes, self.policy.rule());
        let outcome = if self.policy.is_preemptive() {
            self.run_preemptive(state)
        } else {
            self.run_to_completion(state)
        };
        debug!(
            total_time = outcome.total_time,
            segments = outcome.gantt.len(),
            completed = outcome.completed.len(),
            "batch run finished"
        );
        outcome
    }

    fn run_to_completion(&self, mut state: SimulationState) -> BatchOutcome {
        let mut gantt = GanttChart::new();
        let mut now = 0;

        loop {
            state.admit(now);

            if let Some(entry) = state.pop_ready() {
                let record = state.record_mut(entry.index);
                record.dispatch(now);
                let end = now + record.burst_left();
                gantt.push_run(&record.pid, now, end);
                trace!(pid = %record.pid, start = now, end, "dispatched");

                match record.run_burst() {
                    BurstEnd::Block { io } => state.block(entry.index, end + io),
                    BurstEnd::Finish => state.complete(entry.index, end),
                }

                now = if state.has_work() {
                    end + self.context_switch
                } else {
                    end
                };
            } else if let Some(next) = state.next_event_time() {
                gantt.push_idle(now, next);
                now = now.max(next);
            } else {
                break;
            }
        }

        BatchOutcome {
            gantt,
            completed: state.into_completed(),
            total_time: now,
        }
    }

    fn run_preemptive(&self, mut state: SimulationState) -> BatchOutcome {
        let mut gantt = GanttChart::new();
        let mut running: Option<ReadyEntry> = None;
        let mut now = 0;

        while running.is_some() || state.has_work() {
            state.admit(now);
            let previous = running.take();
            if let Some(entry) = previous {
                state.requeue(entry);
            }

            let Some(mut entry) = state.pop_ready() else {
                gantt.extend(IDLE_PID, now, now + 1);
                now += 1;
                continue;
            };

            if let Some(prev) = previous.filter(|p| p.index != entry.index) {
                trace!(
                    preempted = %state.record(prev.index).pid,
                    by = %state.record(entry.index).pid,
                    at = now,
                    "preempted"
                );
                if self.context_switch > 0 {
                    now += self.context_switch;
                    state.admit(now);
                    entry = state.reselect(entry);
                }
            }

            let record = state.record_mut(entry.index);
            record.dispatch(now);
            gantt.extend(&record.pid, now, now + 1);
            let finished = record.run_unit();
            now += 1;

            match finished {
                None => running = Some(entry),
                Some(BurstEnd::Block { io }) => state.block(entry.index, now + io),
                Some(BurstEnd::Finish) => state.complete(entry.index, now),
            }
            if finished.is_some() && state.has_work() {
                now += self.context_switch;
            }
        }

        BatchOutcome {
            gantt,
            completed: state.into_completed(),
            total_time: now,
        }
    }
}
