//! Discrete-time CPU scheduling simulator.
//!
//! Simulates a set of processes, each an alternating sequence of CPU and
//! I/O bursts, under a classic single-CPU scheduling policy, and reports
//! either a Gantt chart with metrics or a per-tick state-transition
//! timeline.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessState`, `GanttChart`,
//!   `Timeline`
//! - **`dispatching`**: Ordering rules (FCFS, SJF, LJF, Priority, SRTF,
//!   LRTF, preemptive Priority), the `Policy` selector and the ready queue
//! - **`scheduler`**: Batch and visualization engines, metrics, and the
//!   `Simulator` facade
//! - **`validation`**: Input integrity checks
//! - **`workload`**: Seeded random workload generation
//!
//! # Example
//!
//! ```
//! use cpu_schedsim::{simulate_json, Mode, Policy};
//!
//! let body = r#"{"processes": [
//!     {"pid": "A", "arrival": 0, "bursts": [5]},
//!     {"pid": "B", "arrival": 2, "bursts": [3]}
//! ]}"#;
//! let json = simulate_json(Policy::Fcfs, Mode::Batch, body).unwrap();
//! assert!(json.contains(r#"{"pid":"B","start":5,"end":8}"#));
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts"
//! - Tanenbaum & Bos (2014), "Modern Operating Systems"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use dispatching::Policy;
pub use error::Error;
pub use scheduler::{simulate, simulate_json, Mode, SimulationRequest, Simulator};
