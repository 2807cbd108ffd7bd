//! Visualization engine.
//!
//! Steps every policy one time unit at a time and records each state
//! transition at the tick it happens.
//!
//! # Per-tick order
//!
//! 1. Tick 0 only: announce every process as `NEW`.
//! 2. `NEW → READY` for arrivals, then `BLOCKED → READY` for finished I/O.
//! 3. Preemptive policies: re-queue the runner and re-select; a change of
//!    runner emits `RUNNING → READY` then `READY → RUNNING`.
//! 4. Idle CPU: `READY → RUNNING` for the selected process.
//! 5. Execute one unit; a finished burst emits `RUNNING → BLOCKED` or
//!    `RUNNING → COMPLETED`.
//!
//! A process whose burst ends during tick `t` (instant `t + 1`) with an
//! I/O burst of `io` units re-enters READY at tick `t + 1 + io`, the same
//! instant the batch engine uses.

use tracing::{debug, instrument};

use super::state::SimulationState;
use crate::dispatching::{Policy, ReadyEntry};
use crate::models::{BurstEnd, Process, ProcessState, Timeline};

use ProcessState::{Blocked, Completed, New, Ready, Running};

/// Unit-step simulation engine producing a per-tick transition timeline.
#[derive(Debug, Clone, Copy)]
pub struct VisualizationEngine {
    policy: Policy,
}

impl VisualizationEngine {
    /// Creates an engine for `policy`.
    pub fn new(policy: Policy) -> Self {
        Self { policy }
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
    pub fn run(&self, processes: &[Process]) -> Timeline {
        let mut state = SimulationState::new(processes, self.policy.rule());
        let preemptive = self.policy.is_preemptive();
        let mut timeline = Timeline::new();
        let mut running: Option<ReadyEntry> = None;

        while running.is_some() || state.has_work() {
            let now = timeline.begin_tick();

            if now == 0 {
                for record in state.records() {
                    timeline.record(&record.pid, None, New);
                }
            }

            for index in state.admit_arrivals(now) {
                timeline.record(&state.record(index).pid, Some(New), Ready);
            }
            for index in state.admit_unblocked(now) {
                timeline.record(&state.record(index).pid, Some(Blocked), Ready);
            }

            if preemptive {
                if let Some(current) = running.take() {
                    state.requeue(current);
                    running = state.pop_ready();
                    if let Some(next) = running.filter(|n| n.index != current.index) {
                        timeline.record(&state.record(current.index).pid, Some(Running), Ready);
                        timeline.record(&state.record(next.index).pid, Some(Ready), Running);
                    }
                }
            }

            if running.is_none() {
                running = state.pop_ready();
                if let Some(next) = running {
                    timeline.record(&state.record(next.index).pid, Some(Ready), Running);
                }
            }

            let Some(entry) = running else {
                continue;
            };

            let record = state.record_mut(entry.index);
            record.dispatch(now);
            let Some(end) = record.run_unit() else {
                continue;
            };

            let pid = record.pid.clone();
            running = None;
            match end {
                BurstEnd::Block { io } => {
                    timeline.record(&pid, Some(Running), Blocked);
                    state.block(entry.index, now + 1 + io);
                }
                BurstEnd::Finish => {
                    timeline.record(&pid, Some(Running), Completed);
                    state.complete(entry.index, now + 1);
                }
            }
        }

        debug!(ticks = timeline.len(), "visualization run finished");
        timeline
    }
}
