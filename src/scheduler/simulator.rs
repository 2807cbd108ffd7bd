//! Simulator facade.
//!
//! Ties request parsing, validation, engine selection and metrics together
//! behind one call per `(policy, mode)` pair, the shape a transport layer
//! routes requests to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, instrument};

use super::batch::BatchEngine;
use super::kpi::SimulationKpi;
use super::request::SimulationRequest;
use super::visual::VisualizationEngine;
use crate::dispatching::Policy;
use crate::error::Error;
use crate::models::{GanttChart, Timeline};
use crate::validation::validate_request;

/// Output flavour of a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Gantt chart plus metrics.
    #[default]
    Batch,
    /// Per-tick state-transition timeline.
    Visualization,
}

impl Mode {
    /// Route name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Batch => "batch",
            Self::Visualization => "visualization",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "batch" | "stats" => Ok(Self::Batch),
            "visualization" | "visual" | "timeline" => Ok(Self::Visualization),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

/// Batch-mode result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// CPU intervals in chronological order.
    pub gantt: GanttChart,
    /// Per-process, average and system metrics.
    #[serde(flatten)]
    pub kpi: SimulationKpi,
}

/// Visualization-mode result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationReport {
    /// Transitions keyed by tick.
    pub timeline: Timeline,
}

/// Result of [`Simulator::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SimulationOutput {
    /// Batch-mode result.
    Batch(BatchReport),
    /// Visualization-mode result.
    Visualization(VisualizationReport),
}

impl SimulationOutput {
    /// The batch report, if this is one.
    pub fn as_batch(&self) -> Option<&BatchReport> {
        match self {
            Self::Batch(report) => Some(report),
            Self::Visualization(_) => None,
        }
    }

    /// The visualization report, if this is one.
    pub fn as_visualization(&self) -> Option<&VisualizationReport> {
        match self {
            Self::Visualization(report) => Some(report),
            Self::Batch(_) => None,
        }
    }

    /// Encodes the result as JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(Error::Encode)
    }
}

/// Validates a request and runs it under one policy and mode.
///
/// # Example
///
/// ```
/// use cpu_schedsim::dispatching::Policy;
/// use cpu_schedsim::models::Process;
/// use cpu_schedsim::scheduler::{SimulationRequest, Simulator};
///
/// let request = SimulationRequest::default()
///     .with_process(Process::new("A", 0).with_cpu(5))
///     .with_process(Process::new("B", 2).with_cpu(3));
///
/// let output = Simulator::new(Policy::Srtf).run(&request).unwrap();
/// let report = output.as_batch().unwrap();
/// assert_eq!(report.kpi.system.total_time, 8);
/// assert_eq!(report.kpi.process("B").unwrap().wt, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulator {
    policy: Policy,
    mode: Mode,
}

impl Simulator {
    /// Creates a batch-mode simulator.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            mode: Mode::Batch,
        }
    }

    /// Sets the output mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// The configured policy.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// The configured mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Runs the simulation.
    ///
    /// # Errors
    /// [`Error::Validation`] with every detected problem if the request is
    /// malformed. Nothing is simulated in that case.
    #[instrument(skip_all, fields(policy = %self.policy, mode = %self.mode))]
    pub fn run(&self, request: &SimulationRequest) -> Result<SimulationOutput, Error> {
        validate_request(request, self.policy).map_err(|errors| {
            debug!(errors = errors.len(), "request rejected");
            Error::Validation(errors)
        })?;

        info!(processes = request.processes.len(), "simulation started");
        let output = match self.mode {
            Mode::Batch => {
                let outcome = BatchEngine::new(self.policy)
                    .with_context_switch(request.context_switch)
                    .run(&request.processes);
                let kpi = SimulationKpi::calculate(
                    &outcome.completed,
                    &outcome.gantt,
                    outcome.total_time,
                );
                SimulationOutput::Batch(BatchReport {
                    gantt: outcome.gantt,
                    kpi,
                })
            }
            Mode::Visualization => {
                let timeline = VisualizationEngine::new(self.policy).run(&request.processes);
                SimulationOutput::Visualization(VisualizationReport { timeline })
            }
        };
        info!("simulation finished");
        Ok(output)
    }
}

/// Shorthand for `Simulator::new(policy).with_mode(mode).run(request)`.
pub fn simulate(
    policy: Policy,
    mode: Mode,
    request: &SimulationRequest,
) -> Result<SimulationOutput, Error> {
    Simulator::new(policy).with_mode(mode).run(request)
}

/// JSON in, JSON out.
///
/// Every error except [`Error::Encode`] is a client error; see
/// [`Error::is_client_error`].
pub fn simulate_json(policy: Policy, mode: Mode, body: &str) -> Result<String, Error> {
    let request = SimulationRequest::from_json(body)?;
    simulate(policy, mode, &request)?.to_json()
}
