//! Selection rules for picking the next process to run.
//!
//! Each rule maps a ready process to a lexicographic key; the candidate
//! with the smallest key runs. Every key ends with the PID, so for a set
//! with unique PIDs the order is strict and selection is deterministic.
//!
//! # Usage
//!
//! ```
//! use cpusched::dispatching::{rules, select_best, Candidate};
//! use cpusched::models::Process;
//!
//! let long = Process::new(1, 8);
//! let short = Process::new(2, 3).with_arrival(1);
//! let ready = [Candidate::new(&long, 2), Candidate::fresh(&short)];
//!
//! assert_eq!(select_best(&rules::ShortestRemaining, &ready), Some(1));
//! assert_eq!(select_best(&rules::ArrivalOrder, &ready), Some(0));
//! ```

mod context;
pub mod rules;

pub use context::Candidate;

use crate::models::{Pid, Tick};
use std::cmp::Ordering;
use std::fmt::Debug;

/// Ordering key produced by a selection rule.
///
/// `(primary, arrival, pid)`, compared lexicographically; smaller runs first.
pub type RuleKey = (i128, Tick, Pid);

/// A selection rule (policy comparator).
///
/// Rules are pure and stateless: the key depends only on the candidate.
///
/// # Key Convention
/// **Lower key = runs first.**
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "FCFS", "SRT").
    fn name(&self) -> &'static str;

    /// Computes the ordering key of a candidate.
    fn key(&self, candidate: &Candidate<'_>) -> RuleKey;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }

    /// Compares two candidates under this rule.
    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        self.key(a).cmp(&self.key(b))
    }
}

/// Returns the index of the candidate that should run next.
///
/// `None` for an empty candidate set.
pub fn select_best<R: SelectionRule + ?Sized>(
    rule: &R,
    candidates: &[Candidate<'_>],
) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| rule.compare(a, b))
        .map(|(i, _)| i)
}

/// Returns candidate indices sorted from first-to-run to last.
pub fn sort_indices<R: SelectionRule + ?Sized>(
    rule: &R,
    candidates: &[Candidate<'_>],
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..candidates.len()).collect();
    indices.sort_by(|&a, &b| rule.compare(&candidates[a], &candidates[b]));
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    #[test]
    fn test_select_best_empty() {
        assert_eq!(select_best(&rules::ArrivalOrder, &[]), None);
        assert!(sort_indices(&rules::PriorityOrder, &[]).is_empty());
    }

    #[test]
    fn test_sort_indices() {
        let a = Process::new(3, 4).with_arrival(2);
        let b = Process::new(1, 4).with_arrival(5);
        let c = Process::new(2, 4).with_arrival(2);
        let ready = [Candidate::fresh(&a), Candidate::fresh(&b), Candidate::fresh(&c)];

        // Arrival 2 twice → PID breaks the tie (2 before 3).
        assert_eq!(sort_indices(&rules::ArrivalOrder, &ready), vec![2, 0, 1]);
    }

    #[test]
    fn test_dyn_rule() {
        let rule: Box<dyn SelectionRule> = Box::new(rules::PriorityOrder);
        let hi = Process::new(1, 1).with_priority(0);
        let lo = Process::new(2, 1).with_priority(5);
        let ready = [Candidate::fresh(&lo), Candidate::fresh(&hi)];
        assert_eq!(select_best(&*rule, &ready), Some(1));
    }
}
