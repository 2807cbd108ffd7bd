//! Simulation domain models.
//!
//! Provides the core data types for describing a workload and the results
//! of simulating it.
//!
//! # Types
//!
//! | Type | Role |
//! |------|------|
//! | `Process` | Input job: arrival, CPU/I/O bursts, priority |
//! | `ProcessRecord` | Mutable per-run state of one process |
//! | `GanttChart` | Batch output: CPU intervals |
//! | `Timeline` | Visualization output: per-tick state transitions |

mod gantt;
mod process;
mod record;
mod timeline;

pub use gantt::{GanttChart, GanttSegment, IDLE_PID};
pub use process::{Process, ProcessState};
pub use record::{BurstEnd, ProcessRecord};
pub use timeline::{Timeline, TransitionEvent};
