//! Simulation engines, metrics and the simulator facade.
//!
//! Two engines share one queue model (see [`crate::dispatching`]):
//!
//! - [`BatchEngine`] produces a Gantt chart. Non-preemptive policies jump
//!   from event to event; preemptive ones step one time unit at a time.
//! - [`VisualizationEngine`] steps every policy one unit at a time and
//!   records each state transition at the tick it happens.
//!
//! [`SimulationKpi`] turns a batch run into per-process and system metrics.
//! [`Simulator`] validates a [`SimulationRequest`] and routes it to the
//! engine selected by [`Mode`].
//!
//! # Time Model
//!
//! Time is discrete. A CPU burst ending at instant `e` followed by an I/O
//! burst of `io` units re-enters READY at `e + io`. At equal instants, new
//! arrivals enter READY before processes returning from I/O.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod batch;
mod kpi;
mod request;
mod simulator;
mod state;
mod visual;

pub use batch::{BatchEngine, BatchOutcome};
pub use kpi::{AverageMetrics, ProcessMetrics, SimulationKpi, SystemMetrics};
pub use request::SimulationRequest;
pub use simulator::{
    simulate, simulate_json, BatchReport, Mode, SimulationOutput, Simulator, VisualizationReport,
};
pub use visual::VisualizationEngine;
