//! Simulation performance metrics.
//!
//! Computes standard CPU scheduling indicators from the completed process
//! records of a batch run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround (tat) | completion − arrival |
//! | Waiting (wt) | turnaround − CPU time consumed |
//! | Response (rt) | first dispatch − arrival |
//! | Throughput | completed / total simulated time |
//! | Utilization | busy CPU time / total simulated time |
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5.2

use serde::{Deserialize, Serialize};

use crate::models::{GanttChart, ProcessRecord};

/// Metrics of one completed process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process identifier.
    pub pid: String,
    /// Arrival time.
    pub arrival: i64,
    /// Total CPU time consumed.
    pub burst_time: i64,
    /// Completion time.
    pub completion_time: i64,
    /// Turnaround time.
    pub tat: i64,
    /// Waiting time.
    pub wt: i64,
    /// Response time.
    pub rt: i64,
}

impl ProcessMetrics {
    /// Builds metrics from a completed record.
    ///
    /// Returns `None` if the record never completed.
    pub fn from_record(record: &ProcessRecord) -> Option<Self> {
        let completion_time = record.completion_time()?;
        let tat = completion_time - record.arrival;
        Some(Self {
            pid: record.pid.clone(),
            arrival: record.arrival,
            burst_time: record.cpu_time,
            completion_time,
            tat,
            wt: tat - record.cpu_time,
            rt: record.response_time().unwrap_or(0),
        })
    }
}

/// Averages over all completed processes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    /// Mean turnaround time.
    pub tat: f64,
    /// Mean waiting time.
    pub wt: f64,
    /// Mean response time.
    pub rt: f64,
}

/// System-level indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    /// Simulated time at which the run ended.
    pub total_time: i64,
    /// Completed processes per time unit.
    pub throughput: f64,
    /// Time the CPU spent running processes.
    pub busy_time: i64,
    /// Time the CPU spent idle (context-switch gaps excluded).
    pub idle_time: i64,
    /// `busy_time / total_time` (0.0..1.0).
    pub utilization: f64,
}

/// Aggregated metrics of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationKpi {
    /// Per-process metrics in completion order.
    pub processes: Vec<ProcessMetrics>,
    /// Averages across processes.
    pub average: AverageMetrics,
    /// System-level indicators.
    pub system: SystemMetrics,
}

impl SimulationKpi {
    /// Computes metrics from completed records.
    ///
    /// # Arguments
    /// * `completed` - Records in completion order.
    /// * `gantt` - The run's Gantt chart (for busy/idle time).
    /// * `total_time` - Simulated time at which the run ended.
    pub fn calculate(completed: &[ProcessRecord], gantt: &GanttChart, total_time: i64) -> Self {
        let processes: Vec<ProcessMetrics> = completed
            .iter()
            .filter_map(ProcessMetrics::from_record)
            .collect();

        let n = processes.len();
        let average = if n == 0 {
            AverageMetrics::default()
        } else {
            let (tat, wt, rt) = processes.iter().fold((0.0, 0.0, 0.0), |(tat, wt, rt), p| {
                (tat + p.tat as f64, wt + p.wt as f64, rt + p.rt as f64)
            });
            AverageMetrics {
                tat: tat / n as f64,
                wt: wt / n as f64,
                rt: rt / n as f64,
            }
        };

        let busy_time = gantt.busy_time();
        let (throughput, utilization) = if total_time > 0 {
            (
                n as f64 / total_time as f64,
                busy_time as f64 / total_time as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            processes,
            average,
            system: SystemMetrics {
                total_time,
                throughput,
                busy_time,
                idle_time: gantt.idle_time(),
                utilization,
            },
        }
    }

    /// Metrics of a single process.
    pub fn process(&self, pid: &str) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}
