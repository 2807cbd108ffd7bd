//! Input validation for simulation requests.
//!
//! Checks structural integrity of a request before any engine runs.
//! Detects:
//! - Duplicate, empty or reserved pids
//! - Negative arrival times
//! - Malformed burst sequences (empty, non-positive, ending on I/O)
//! - Missing priorities under priority policies
//! - Negative context-switch delay
//! - Workloads whose timeline would not fit in an `i64`
//!
//! Engines assume validated input: a well-formed request always
//! terminates because every burst is a positive finite length.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::dispatching::Policy;
use crate::models::{Process, IDLE_PID};
use crate::scheduler::SimulationRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending process, if the error is tied to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Two processes share the same pid.
    DuplicatePid,
    /// A pid is the empty string.
    EmptyPid,
    /// A pid collides with the idle marker of the Gantt chart.
    ReservedPid,
    /// A process arrives before time 0.
    NegativeArrival,
    /// A process has no bursts.
    EmptyBursts,
    /// A burst length is zero or negative.
    NonPositiveBurst,
    /// The burst sequence ends on an I/O burst (even length).
    EndsOnIo,
    /// A priority policy was requested but a process has no priority.
    MissingPriority,
    /// The context-switch delay is negative.
    NegativeContextSwitch,
    /// Simulated time could exceed `i64::MAX`.
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        pid: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            pid: pid.map(str::to_owned),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a request for the given policy.
///
/// Checks:
/// 1. Context-switch delay is non-negative
/// 2. Pids are non-empty, unique and not reserved
/// 3. Arrival times are non-negative
/// 4. Burst sequences are non-empty, positive and odd-length
/// 5. Every process has a priority if the policy orders by priority
/// 6. Every instant the engines can reach fits in an `i64`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &SimulationRequest, policy: Policy) -> ValidationResult {
    let mut errors = Vec::new();

    if request.context_switch < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeContextSwitch,
            None,
            format!("Context switch must be non-negative, got {}", request.context_switch),
        ));
    }

    let mut pids = HashSet::new();
    for process in &request.processes {
        let pid = process.pid.as_str();
        if pid.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyPid,
                Some(pid),
                "Process pid must not be empty",
            ));
        } else if pid == IDLE_PID {
            errors.push(ValidationError::new(
                ValidationErrorKind::ReservedPid,
                Some(pid),
                format!("Process pid '{IDLE_PID}' is reserved for idle segments"),
            ));
        }
        if !pids.insert(pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                Some(pid),
                format!("Duplicate process pid: {pid}"),
            ));
        }

        validate_process(process, policy, &mut errors);
    }

    if errors.is_empty() && time_horizon(request).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            None,
            "Total simulated time would overflow",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_process(process: &Process, policy: Policy, errors: &mut Vec<ValidationError>) {
    let pid = process.pid.as_str();

    if process.arrival < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeArrival,
            Some(pid),
            format!("Process '{pid}' arrives at negative time {}", process.arrival),
        ));
    }

    if process.bursts.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyBursts,
            Some(pid),
            format!("Process '{pid}' has no bursts"),
        ));
    } else if process.bursts.len() % 2 == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EndsOnIo,
            Some(pid),
            format!(
                "Process '{pid}' must end on a CPU burst (got {} bursts)",
                process.bursts.len()
            ),
        ));
    }

    if let Some((i, &len)) = process.bursts.iter().enumerate().find(|(_, &b)| b <= 0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveBurst,
            Some(pid),
            format!("Process '{pid}' burst {i} has non-positive length {len}"),
        ));
    }

    if process
        .bursts
        .iter()
        .try_fold(process.arrival, |at, &len| at.checked_add(len))
        .is_none()
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            Some(pid),
            format!("Process '{pid}' arrival plus bursts overflows the time range"),
        ));
    }

    if policy.requires_priority() && process.priority.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingPriority,
            Some(pid),
            format!("Process '{pid}' needs a priority under policy '{policy}'"),
        ));
    }
}

/// Upper bound on any instant a run can reach.
///
/// Latest arrival, plus every burst of every process, plus one context
/// switch per CPU unit and per burst end. `None` on overflow.
fn time_horizon(request: &SimulationRequest) -> Option<i64> {
    let mut horizon = request
        .processes
        .iter()
        .map(|p| p.arrival)
        .max()
        .unwrap_or(0);
    let mut switches: i64 = 0;
    for process in &request.processes {
        for &len in &process.bursts {
            horizon = horizon.checked_add(len)?;
        }
        switches = switches
            .checked_add(process.total_cpu_time())?
            .checked_add(process.bursts.len() as i64)?;
    }
    horizon.checked_add(switches.checked_mul(request.context_switch)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(processes: Vec<Process>) -> SimulationRequest {
        SimulationRequest::new(processes)
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        let req = request(vec![
            Process::new("A", 0).with_bursts([4, 2, 4]),
            Process::new("B", 3).with_cpu(2),
        ]);
        for policy in Policy::ALL.into_iter().filter(|p| !p.requires_priority()) {
            assert!(validate_request(&req, policy).is_ok(), "{policy}");
        }
    }

    #[test]
    fn test_empty_request_is_valid() {
        assert!(validate_request(&SimulationRequest::default(), Policy::Fcfs).is_ok());
    }

    #[test]
    fn test_duplicate_pid() {
        let req = request(vec![
            Process::new("A", 0).with_cpu(1),
            Process::new("A", 1).with_cpu(1),
        ]);
        let errors = validate_request(&req, Policy::Fcfs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicatePid);
        assert_eq!(errors[0].pid.as_deref(), Some("A"));
    }

    #[test]
    fn test_empty_and_reserved_pid() {
        let req = request(vec![
            Process::new("", 0).with_cpu(1),
            Process::new("IDLE", 0).with_cpu(1),
        ]);
        assert_eq!(
            kinds(validate_request(&req, Policy::Fcfs)),
            vec![ValidationErrorKind::EmptyPid, ValidationErrorKind::ReservedPid]
        );
    }

    #[test]
    fn test_negative_arrival() {
        let req = request(vec![Process::new("A", -1).with_cpu(1)]);
        assert_eq!(
            kinds(validate_request(&req, Policy::Sjf)),
            vec![ValidationErrorKind::NegativeArrival]
        );
    }

    #[test]
    fn test_empty_bursts() {
        let req = request(vec![Process::new("A", 0)]);
        assert_eq!(
            kinds(validate_request(&req, Policy::Fcfs)),
            vec![ValidationErrorKind::EmptyBursts]
        );
    }

    #[test]
    fn test_ends_on_io() {
        let req = request(vec![Process::new("A", 0).with_bursts([3, 2])]);
        assert_eq!(
            kinds(validate_request(&req, Policy::Fcfs)),
            vec![ValidationErrorKind::EndsOnIo]
        );
    }

    #[test]
    fn test_non_positive_burst() {
        let req = request(vec![Process::new("A", 0).with_bursts([3, 0, 2])]);
        let errors = validate_request(&req, Policy::Srtf).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveBurst);
        assert!(errors[0].message.contains("burst 1"));
    }

    #[test]
    fn test_missing_priority_only_for_priority_policies() {
        let req = request(vec![
            Process::new("A", 0).with_cpu(2).with_priority(1),
            Process::new("B", 0).with_cpu(2),
        ]);
        assert!(validate_request(&req, Policy::Ljf).is_ok());
        for policy in [Policy::Priority, Policy::PreemptivePriority] {
            let errors = validate_request(&req, policy).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].kind, ValidationErrorKind::MissingPriority);
            assert_eq!(errors[0].pid.as_deref(), Some("B"));
        }
    }

    #[test]
    fn test_negative_context_switch() {
        let req = request(vec![Process::new("A", 0).with_cpu(1)]).with_context_switch(-2);
        let errors = validate_request(&req, Policy::Fcfs).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeContextSwitch);
        assert_eq!(errors[0].pid, None);
    }

    #[test]
    fn test_multiple_errors() {
        let req = request(vec![
            Process::new("A", -3).with_bursts([1, 1]),
            Process::new("B", 0),
        ])
        .with_context_switch(-1);
        let errors = validate_request(&req, Policy::Priority).unwrap_err();
        assert!(errors.len() >= 5);
    }

    #[test]
    fn test_process_time_overflow() {
        let req = request(vec![Process::new("A", 0).with_bursts([i64::MAX, 1, 1])]);
        let errors = validate_request(&req, Policy::Fcfs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);
        assert_eq!(errors[0].pid.as_deref(), Some("A"));

        let req = request(vec![Process::new("B", i64::MAX).with_cpu(1)]);
        assert_eq!(
            kinds(validate_request(&req, Policy::Fcfs)),
            vec![ValidationErrorKind::TimeOverflow]
        );
    }

    #[test]
    fn test_request_time_overflow() {
        let half = i64::MAX / 2 + 1;
        let req = request(vec![
            Process::new("A", 0).with_cpu(half),
            Process::new("B", 0).with_cpu(half),
        ]);
        let errors = validate_request(&req, Policy::Srtf).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);
        assert_eq!(errors[0].pid, None);

        let req = request(vec![Process::new("A", 0).with_cpu(1 << 40)])
            .with_context_switch(1 << 40);
        assert_eq!(
            kinds(validate_request(&req, Policy::Srtf)),
            vec![ValidationErrorKind::TimeOverflow]
        );
    }

    #[test]
    fn test_error_serialization() {
        let err = ValidationError::new(ValidationErrorKind::EndsOnIo, Some("A"), "bad");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "ends_on_io");
        assert_eq!(json["pid"], "A");
        assert_eq!(err.to_string(), "bad");
    }
}
