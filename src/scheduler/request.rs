//! Simulation request.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::Process;

/// Input container for one simulation run.
///
/// # Example
///
/// ```
/// use cpu_schedsim::scheduler::SimulationRequest;
///
/// let request = SimulationRequest::from_json(
///     r#"{"processes": [{"pid": "A", "arrival": 0, "bursts": [4, 2, 4]}]}"#,
/// )
/// .unwrap();
/// assert_eq!(request.processes.len(), 1);
/// assert_eq!(request.context_switch, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Processes to simulate, in submission order.
    pub processes: Vec<Process>,
    /// Fixed delay added each time a process leaves the CPU while work
    /// remains (batch mode only).
    #[serde(default)]
    pub context_switch: i64,
}

impl SimulationRequest {
    /// Creates a request from a process list.
    pub fn new(processes: Vec<Process>) -> Self {
        Self {
            processes,
            context_switch: 0,
        }
    }

    /// Adds a process.
    pub fn with_process(mut self, process: Process) -> Self {
        self.processes.push(process);
        self
    }

    /// Sets the context-switch delay.
    pub fn with_context_switch(mut self, context_switch: i64) -> Self {
        self.context_switch = context_switch;
        self
    }

    /// Parses a JSON request body.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        serde_json::from_str(body).map_err(Error::InvalidJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = SimulationRequest::default()
            .with_process(Process::new("A", 0).with_cpu(3))
            .with_process(Process::new("B", 1).with_cpu(2))
            .with_context_switch(1);
        assert_eq!(request.processes.len(), 2);
        assert_eq!(request.context_switch, 1);
    }

    #[test]
    fn test_from_json_with_context_switch() {
        let request = SimulationRequest::from_json(
            r#"{
                "context_switch": 2,
                "processes": [
                    {"pid": "P1", "arrival": 0, "bursts": [3], "priority": 2},
                    {"pid": 2, "arrival": 4, "bursts": [1, 2, 1]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(request.context_switch, 2);
        assert_eq!(request.processes[0].priority, Some(2));
        assert_eq!(request.processes[1].pid, "2");
    }

    #[test]
    fn test_from_json_missing_field() {
        let err = SimulationRequest::from_json(r#"{"processes": [{"pid": "A", "bursts": [1]}]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidJson(_)));
    }
}
