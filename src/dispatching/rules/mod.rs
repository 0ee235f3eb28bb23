//! Built-in selection rules.
//!
//! | Rule | Key | Used by |
//! |------|-----|---------|
//! | `ArrivalOrder` | (arrival, pid) | FCFS, round-robin admission |
//! | `ShortestRemaining` | (burst - completed, arrival, pid) | SRT, SJF |
//! | `PriorityOrder` | (priority, arrival, pid) | Priority |
//!
//! # Key Convention
//! All rules return lower keys for candidates that should run first.

use super::{Candidate, RuleKey, SelectionRule};

/// First Come, First Served.
///
/// Earliest arrival wins; equal arrivals go by PID.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrivalOrder;

impl SelectionRule for ArrivalOrder {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn key(&self, candidate: &Candidate<'_>) -> RuleKey {
        (0, candidate.process.arrival, candidate.pid())
    }

    fn description(&self) -> &'static str {
        "First Come, First Served"
    }
}

/// Shortest Remaining Time.
///
/// Least outstanding work wins. Before a process has run its remaining
/// time equals its burst, so at a fresh decision point this is plain
/// shortest-job-first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestRemaining;

impl SelectionRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn key(&self, candidate: &Candidate<'_>) -> RuleKey {
        (
            i128::from(candidate.remaining()),
            candidate.process.arrival,
            candidate.pid(),
        )
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time"
    }
}

/// Static priority.
///
/// Lowest `priority` value wins, then earliest arrival, then PID.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityOrder;

impl SelectionRule for PriorityOrder {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn key(&self, candidate: &Candidate<'_>) -> RuleKey {
        (
            i128::from(candidate.process.priority),
            candidate.process.arrival,
            candidate.pid(),
        )
    }

    fn description(&self) -> &'static str {
        "Lowest Priority Value First"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::select_best;
    use crate::models::Process;

    fn make(pid: u32, arrival: u64, burst: u64, priority: i32) -> Process {
        Process::new(pid, burst)
            .with_arrival(arrival)
            .with_priority(priority)
    }

    #[test]
    fn test_arrival_order() {
        let early = make(2, 0, 9, 5);
        let late = make(1, 3, 1, 0);
        let a = Candidate::fresh(&early);
        let b = Candidate::fresh(&late);
        assert!(ArrivalOrder.key(&a) < ArrivalOrder.key(&b));
    }

    #[test]
    fn test_arrival_order_pid_tie_break() {
        let p7 = make(7, 4, 1, 0);
        let p3 = make(3, 4, 9, 0);
        let ready = [Candidate::fresh(&p7), Candidate::fresh(&p3)];
        assert_eq!(select_best(&ArrivalOrder, &ready), Some(1));
    }

    #[test]
    fn test_shortest_remaining_uses_progress() {
        let long = make(1, 0, 10, 0);
        let short = make(2, 0, 4, 0);
        // 8 of 10 done → 2 remaining beats a fresh 4-tick job
        let ready = [Candidate::new(&long, 8), Candidate::fresh(&short)];
        assert_eq!(select_best(&ShortestRemaining, &ready), Some(0));

        let ready = [Candidate::new(&long, 5), Candidate::fresh(&short)];
        assert_eq!(select_best(&ShortestRemaining, &ready), Some(1));
    }

    #[test]
    fn test_shortest_remaining_tie_goes_to_earlier_arrival() {
        let running = make(1, 0, 5, 0);
        let newcomer = make(2, 2, 3, 0);
        // Both have 3 ticks left; the earlier arrival keeps the CPU
        let ready = [Candidate::fresh(&newcomer), Candidate::new(&running, 2)];
        assert_eq!(select_best(&ShortestRemaining, &ready), Some(1));
    }

    #[test]
    fn test_priority_order() {
        let urgent = make(5, 9, 3, -2);
        let normal = make(1, 0, 3, 1);
        let ready = [Candidate::fresh(&normal), Candidate::fresh(&urgent)];
        assert_eq!(select_best(&PriorityOrder, &ready), Some(1));
    }

    #[test]
    fn test_priority_ties() {
        let a = make(4, 1, 3, 2);
        let b = make(2, 1, 3, 2);
        let c = make(1, 2, 3, 2);
        let ready = [Candidate::fresh(&a), Candidate::fresh(&b), Candidate::fresh(&c)];
        // Same priority → arrival 1 before 2 → PID 2 before 4
        assert_eq!(select_best(&PriorityOrder, &ready), Some(1));
    }

    #[test]
    fn test_keys_are_strict_for_distinct_pids() {
        let a = make(1, 0, 3, 0);
        let b = make(2, 0, 3, 0);
        let (ca, cb) = (Candidate::fresh(&a), Candidate::fresh(&b));
        for rule in [
            &ArrivalOrder as &dyn SelectionRule,
            &ShortestRemaining,
            &PriorityOrder,
        ] {
            assert_ne!(rule.compare(&ca, &cb), std::cmp::Ordering::Equal);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(ArrivalOrder.name(), "FCFS");
        assert_eq!(ShortestRemaining.description(), "Shortest Remaining Time");
        assert_eq!(PriorityOrder.name(), "PRIORITY");
    }
}
