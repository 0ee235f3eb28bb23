//! Tick-driven engine over an unordered ready set.
//!
//! # Algorithm
//!
//! For every tick `t`:
//! 1. Admit the processes arriving at `t` into the ready set.
//! 2. If the trigger fires, make the rule-minimum of the ready set active.
//! 3. Charge one tick to the active process and emit it (or idle).
//! 4. A process that reaches its burst leaves the ready set for good.
//!
//! Re-selecting every tick yields FCFS, SRT and Priority; re-selecting
//! only when the CPU is free yields non-preemptive SJF.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::arrivals_by_tick;
use crate::dispatching::{select_best, Candidate, SelectionRule};
use crate::models::{total_work, Occupant, Process, Tick};

/// When the engine consults its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTrigger {
    /// Every tick. A better candidate displaces the running process.
    EveryTick,
    /// Only while no process holds the CPU (strict non-preemption).
    WhenIdle,
    /// While the CPU is free, and on any tick with new arrivals.
    WhenIdleOrArrival,
}

/// Simulation engine for the ready-set disciplines.
///
/// Yields one [`Occupant`] per tick until every process has finished.
#[derive(Debug)]
pub struct ReevaluatingEngine<'a> {
    processes: &'a [Process],
    rule: Box<dyn SelectionRule>,
    trigger: SelectionTrigger,
    arrivals: BTreeMap<Tick, Vec<usize>>,
    ready: Vec<usize>,
    completed: Vec<Tick>,
    active: Option<usize>,
    now: Tick,
    outstanding: Tick,
}

impl<'a> ReevaluatingEngine<'a> {
    /// Creates an engine at t=0 with no progress on any process.
    pub fn new<R: SelectionRule + 'static>(
        processes: &'a [Process],
        rule: R,
        trigger: SelectionTrigger,
    ) -> Self {
        Self {
            processes,
            rule: Box::new(rule),
            trigger,
            arrivals: arrivals_by_tick(processes),
            ready: Vec::with_capacity(processes.len()),
            completed: vec![0; processes.len()],
            active: None,
            now: 0,
            outstanding: total_work(processes),
        }
    }

    /// Current tick (the next one to be emitted).
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Moves this tick's arrivals into the ready set.
    ///
    /// Returns whether anything arrived.
    fn admit(&mut self) -> bool {
        match self.arrivals.remove(&self.now) {
            Some(arrived) => {
                for &idx in &arrived {
                    trace!(tick = self.now, pid = self.processes[idx].pid, "arrived");
                }
                self.ready.extend(arrived);
                true
            }
            None => false,
        }
    }

    fn reselect(&mut self) {
        let processes = self.processes;
        let candidates: Vec<Candidate<'_>> = self
            .ready
            .iter()
            .map(|&idx| Candidate::new(&processes[idx], self.completed[idx]))
            .collect();

        let next = select_best(&*self.rule, &candidates).map(|pos| self.ready[pos]);

        if next != self.active {
            if let (Some(prev), Some(idx)) = (self.active, next) {
                debug!(
                    tick = self.now,
                    rule = self.rule.name(),
                    preempted = processes[prev].pid,
                    by = processes[idx].pid,
                    "preempted"
                );
            } else if let Some(idx) = next {
                debug!(tick = self.now, pid = processes[idx].pid, "dispatched");
            }
        }
        self.active = next;
    }
}

impl Iterator for ReevaluatingEngine<'_> {
    type Item = Occupant;

    fn next(&mut self) -> Option<Occupant> {
        if self.outstanding == 0 {
            return None;
        }

        let arrived = self.admit();
        let reselect = match self.trigger {
            SelectionTrigger::EveryTick => true,
            SelectionTrigger::WhenIdle => self.active.is_none(),
            SelectionTrigger::WhenIdleOrArrival => self.active.is_none() || arrived,
        };
        if reselect {
            self.reselect();
        }

        let occupant = match self.active {
            None => {
                trace!(tick = self.now, "idle");
                Occupant::Idle
            }
            Some(idx) => {
                let process = &self.processes[idx];
                self.completed[idx] += 1;
                self.outstanding -= 1;
                debug_assert!(self.completed[idx] <= process.burst);

                if self.completed[idx] == process.burst {
                    self.ready.retain(|&i| i != idx);
                    self.active = None;
                    debug!(tick = self.now, pid = process.pid, "completed");
                }
                Occupant::Process(process.pid)
            }
        };

        self.now += 1;
        Some(occupant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;
    use crate::models::Occupant::{Idle, Process as P};

    fn make(pid: u32, arrival: u64, burst: u64, priority: i32) -> Process {
        Process::new(pid, burst)
            .with_arrival(arrival)
            .with_priority(priority)
    }

    fn run<R: SelectionRule + 'static>(
        processes: &[Process],
        rule: R,
        trigger: SelectionTrigger,
    ) -> Vec<Occupant> {
        ReevaluatingEngine::new(processes, rule, trigger).collect()
    }

    #[test]
    fn test_fcfs_runs_to_completion() {
        let set = vec![make(1, 0, 5, 1), make(2, 2, 3, 2)];
        let trace = run(&set, rules::ArrivalOrder, SelectionTrigger::EveryTick);
        assert_eq!(trace, vec![P(1), P(1), P(1), P(1), P(1), P(2), P(2), P(2)]);
    }

    #[test]
    fn test_srt_preempts_on_shorter_arrival() {
        let set = vec![make(1, 0, 5, 0), make(2, 1, 2, 0)];
        let trace = run(&set, rules::ShortestRemaining, SelectionTrigger::EveryTick);
        assert_eq!(trace, vec![P(1), P(2), P(2), P(1), P(1), P(1), P(1)]);
    }

    #[test]
    fn test_strict_sjf_does_not_preempt() {
        let set = vec![make(1, 0, 5, 0), make(2, 1, 2, 0)];
        let trace = run(&set, rules::ShortestRemaining, SelectionTrigger::WhenIdle);
        assert_eq!(trace, vec![P(1), P(1), P(1), P(1), P(1), P(2), P(2)]);
    }

    #[test]
    fn test_reselect_on_arrival_sjf_can_switch() {
        let set = vec![make(1, 0, 5, 0), make(2, 1, 2, 0)];
        let trace = run(
            &set,
            rules::ShortestRemaining,
            SelectionTrigger::WhenIdleOrArrival,
        );
        // The arrival at t=1 forces a fresh comparison, which P2 wins
        assert_eq!(trace, vec![P(1), P(2), P(2), P(1), P(1), P(1), P(1)]);
    }

    #[test]
    fn test_priority_preempts() {
        let set = vec![make(1, 0, 4, 5), make(2, 2, 2, 1)];
        let trace = run(&set, rules::PriorityOrder, SelectionTrigger::EveryTick);
        assert_eq!(trace, vec![P(1), P(1), P(2), P(2), P(1), P(1)]);
    }

    #[test]
    fn test_idle_gap() {
        let set = vec![make(1, 0, 2, 0), make(2, 4, 1, 0)];
        let trace = run(&set, rules::ArrivalOrder, SelectionTrigger::EveryTick);
        assert_eq!(trace, vec![P(1), P(1), Idle, Idle, P(2)]);
    }

    #[test]
    fn test_late_first_arrival() {
        let set = vec![make(1, 2, 1, 0)];
        let trace = run(&set, rules::ArrivalOrder, SelectionTrigger::WhenIdle);
        assert_eq!(trace, vec![Idle, Idle, P(1)]);
    }

    #[test]
    fn test_empty_set() {
        let trace = run(&[], rules::ArrivalOrder, SelectionTrigger::EveryTick);
        assert!(trace.is_empty());
    }

    #[test]
    fn test_zero_burst_never_runs() {
        let set = vec![make(1, 0, 0, 0), make(2, 0, 2, 0)];
        let trace = run(&set, rules::ArrivalOrder, SelectionTrigger::EveryTick);
        assert_eq!(trace, vec![P(2), P(2)]);
    }

    #[test]
    fn test_caller_records_untouched() {
        let set = vec![make(1, 0, 3, 0)];
        let before = set.clone();
        let first = run(&set, rules::ArrivalOrder, SelectionTrigger::EveryTick);
        let second = run(&set, rules::ArrivalOrder, SelectionTrigger::EveryTick);
        assert_eq!(first, second);
        assert_eq!(set, before);
    }
}
