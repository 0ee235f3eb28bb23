//! Input validation for process sets.
//!
//! Checks a set before simulation. Detects:
//! - Duplicate PIDs (the final tie-breaker must be unique)
//! - Zero burst times (a process with no work never completes a tick)
//! - Horizons past [`MAX_HORIZON`] (latest arrival plus total work)
//!
//! All problems are collected rather than stopping at the first one.

use crate::models::{total_work, Pid, Process, Tick};
use std::collections::HashSet;

/// Longest simulation accepted, in ticks.
///
/// Every engine finishes by `latest arrival + total work` (plus at most
/// one quantum of padding), and a materialized trace holds one slot per
/// tick, so this bounds both run time and trace memory.
pub const MAX_HORIZON: Tick = 10_000_000;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending process.
    pub pid: Pid,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share a PID.
    DuplicatePid,
    /// A process requires no CPU time.
    ZeroBurst,
    /// Arrivals and bursts together run past [`MAX_HORIZON`].
    HorizonTooLarge,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, pid: Pid, message: impl Into<String>) -> Self {
        Self {
            kind,
            pid,
            message: message.into(),
        }
    }
}

/// Validates a process set.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for p in processes {
        if !seen.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                p.pid,
                format!("Duplicate PID: {}", p.pid),
            ));
        }

        if p.burst == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroBurst,
                p.pid,
                format!("Process P{} has a burst time of 0", p.pid),
            ));
        }
    }

    if let Some(latest) = processes.iter().max_by_key(|p| p.arrival) {
        let horizon = latest.arrival.saturating_add(total_work(processes));
        if horizon > MAX_HORIZON {
            errors.push(ValidationError::new(
                ValidationErrorKind::HorizonTooLarge,
                latest.pid,
                format!(
                    "Simulation horizon of {horizon} ticks exceeds the limit of {MAX_HORIZON}"
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let set = vec![Process::new(1, 5), Process::new(2, 3).with_arrival(2)];
        assert!(validate_processes(&set).is_ok());
    }

    #[test]
    fn test_empty_set_is_valid() {
        assert!(validate_processes(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_pid() {
        let set = vec![
            Process::new(1, 5),
            Process::new(1, 5).with_arrival(1),
            Process::new(2, 1),
        ];
        let errors = validate_processes(&set).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicatePid);
        assert_eq!(errors[0].pid, 1);
    }

    #[test]
    fn test_zero_burst() {
        let set = vec![Process::new(4, 0)];
        let errors = validate_processes(&set).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ZeroBurst));
        assert_eq!(errors[0].to_string(), "Process P4 has a burst time of 0");
    }

    #[test]
    fn test_multiple_errors() {
        let set = vec![Process::new(1, 0), Process::new(1, 2), Process::new(3, 0)];
        let errors = validate_processes(&set).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_overflowing_bursts() {
        let set: Vec<Process> = (1..=3).map(|pid| Process::new(pid, Tick::MAX / 2)).collect();
        let errors = validate_processes(&set).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::HorizonTooLarge);
    }

    #[test]
    fn test_late_arrival_past_horizon() {
        let set = vec![
            Process::new(1, 2),
            Process::new(2, 1).with_arrival(MAX_HORIZON),
        ];
        let errors = validate_processes(&set).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::HorizonTooLarge);
        assert_eq!(errors[0].pid, 2);
    }

    #[test]
    fn test_horizon_at_limit_is_valid() {
        let set = vec![
            Process::new(1, 10),
            Process::new(2, 5).with_arrival(MAX_HORIZON - 15),
        ];
        assert!(validate_processes(&set).is_ok());
    }
}
