//! Random workload generation.
//!
//! Produces valid [`SimulationRequest`]s for demos, benchmarks and
//! property tests. Every generated process has a non-negative arrival, an
//! odd number of positive bursts, and (optionally) a priority.
//!
//! # Example
//!
//! ```
//! use cpu_schedsim::workload::WorkloadGenerator;
//!
//! let generator = WorkloadGenerator::new(42).with_process_count(5);
//! let request = generator.generate();
//! assert_eq!(request.processes.len(), 5);
//! assert_eq!(request, generator.generate());
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Process;
use crate::scheduler::SimulationRequest;

/// Seeded generator of random process sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadGenerator {
    seed: u64,
    process_count: usize,
    max_arrival: i64,
    max_cpu_burst: i64,
    max_io_burst: i64,
    max_io_rounds: usize,
    max_priority: Option<i64>,
    context_switch: i64,
}

impl WorkloadGenerator {
    /// Creates a generator with small defaults: 6 processes arriving within
    /// 10 units, CPU bursts up to 8, up to 2 I/O rounds of up to 4 units.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            process_count: 6,
            max_arrival: 10,
            max_cpu_burst: 8,
            max_io_burst: 4,
            max_io_rounds: 2,
            max_priority: None,
            context_switch: 0,
        }
    }

    /// Sets the number of processes.
    pub fn with_process_count(mut self, count: usize) -> Self {
        self.process_count = count;
        self
    }

    /// Sets the latest arrival time (inclusive).
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival.max(0);
        self
    }

    /// Sets the longest CPU burst (inclusive, at least 1).
    pub fn with_max_cpu_burst(mut self, units: i64) -> Self {
        self.max_cpu_burst = units.max(1);
        self
    }

    /// Sets the longest I/O burst (inclusive, at least 1).
    pub fn with_max_io_burst(mut self, units: i64) -> Self {
        self.max_io_burst = units.max(1);
        self
    }

    /// Sets the maximum number of I/O bursts per process.
    pub fn with_max_io_rounds(mut self, rounds: usize) -> Self {
        self.max_io_rounds = rounds;
        self
    }

    /// Assigns priorities in `0..=4` to every process, or none.
    pub fn with_priorities(mut self, enabled: bool) -> Self {
        self.max_priority = enabled.then_some(4);
        self
    }

    /// Assigns priorities in `0..=max` to every process.
    pub fn with_max_priority(mut self, max: i64) -> Self {
        self.max_priority = Some(max.max(0));
        self
    }

    /// Sets the context-switch delay of generated requests.
    pub fn with_context_switch(mut self, context_switch: i64) -> Self {
        self.context_switch = context_switch.max(0);
        self
    }

    /// Generates the request for this generator's seed.
    ///
    /// The same configuration always yields the same request.
    pub fn generate(&self) -> SimulationRequest {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.generate_with(&mut rng)
    }

    /// Generates a request drawing from `rng`.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> SimulationRequest {
        let processes = (0..self.process_count)
            .map(|i| self.random_process(i, rng))
            .collect();
        SimulationRequest::new(processes).with_context_switch(self.context_switch)
    }

    fn random_process<R: Rng>(&self, index: usize, rng: &mut R) -> Process {
        let rounds = rng.random_range(0..=self.max_io_rounds);
        let mut bursts = Vec::with_capacity(rounds * 2 + 1);
        for _ in 0..rounds {
            bursts.push(rng.random_range(1..=self.max_cpu_burst));
            bursts.push(rng.random_range(1..=self.max_io_burst));
        }
        bursts.push(rng.random_range(1..=self.max_cpu_burst));

        let arrival = rng.random_range(0..=self.max_arrival);
        let process = Process::new(format!("P{}", index + 1), arrival).with_bursts(bursts);
        match self.max_priority {
            Some(max) => process.with_priority(rng.random_range(0..=max)),
            None => process,
        }
    }
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
