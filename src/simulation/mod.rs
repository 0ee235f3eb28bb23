//! Discrete-time scheduling simulation.
//!
//! Every policy is an engine: a finite, forward-only iterator that yields
//! the CPU occupant for tick 0, 1, 2, ... until all work is done. Engines
//! borrow the process set immutably and keep their own progress counters,
//! so one set can be replayed under any number of policies.
//!
//! # Policies
//!
//! | Policy | Engine | Preemptive |
//! |--------|--------|------------|
//! | FCFS | ready set, `ArrivalOrder`, every tick | no (in effect) |
//! | SJF | ready set, `ShortestRemaining`, when idle | no |
//! | SRT | ready set, `ShortestRemaining`, every tick | yes |
//! | Priority | ready set, `PriorityOrder`, every tick | yes |
//! | Round-robin fixed | FIFO, rotation on the quantum grid | yes |
//! | Round-robin variable | FIFO, rotation per dispatch window | yes |
//!
//! # Example
//!
//! ```
//! use cpusched::models::{Occupant, Process};
//! use cpusched::simulation::Policy;
//!
//! let processes = vec![
//!     Process::new(1, 5).with_priority(1),
//!     Process::new(2, 3).with_arrival(2).with_priority(2),
//! ];
//! let trace = Policy::Fcfs.simulate(&processes);
//! assert_eq!(trace.len(), 8);
//! assert_eq!(trace.at(5), Some(Occupant::Process(2)));
//! ```

mod reevaluating;
mod round_robin;

pub use reevaluating::{ReevaluatingEngine, SelectionTrigger};
pub use round_robin::{RoundRobinEngine, Rotation};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU64;
use tracing::info;

use crate::dispatching::{rules, sort_indices, Candidate};
use crate::models::{Occupant, Process, Tick, Trace};

/// Quantum used when none is configured.
pub const DEFAULT_QUANTUM: NonZeroU64 = match NonZeroU64::new(2) {
    Some(q) => q,
    None => unreachable!(),
};

/// How non-preemptive SJF reacts to arrivals while a job is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SjfMode {
    /// A started job keeps the CPU until it finishes.
    #[default]
    Strict,
    /// Any tick with new arrivals triggers a fresh comparison among all
    /// ready jobs, including the running one, which may lose the CPU.
    ReselectOnArrival,
}

/// A scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Policy {
    /// First Come, First Served.
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf(SjfMode),
    /// Shortest Remaining Time (preemptive SJF).
    Srt,
    /// Lowest priority value first, preemptive.
    Priority,
    /// Round-robin with rotation at multiples of the quantum.
    RoundRobinFixed { quantum: NonZeroU64 },
    /// Round-robin with rotation windows that restart at every dispatch.
    RoundRobinVariable { quantum: NonZeroU64 },
}

impl Policy {
    /// All six disciplines, in reporting order.
    pub fn all(quantum: NonZeroU64, sjf_mode: SjfMode) -> [Policy; 6] {
        [
            Policy::Fcfs,
            Policy::Srt,
            Policy::Sjf(sjf_mode),
            Policy::Priority,
            Policy::RoundRobinFixed { quantum },
            Policy::RoundRobinVariable { quantum },
        ]
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf(_) => "SJF",
            Policy::Srt => "SRT",
            Policy::Priority => "Priority",
            Policy::RoundRobinFixed { .. } => "Round-robin fixed",
            Policy::RoundRobinVariable { .. } => "Round-robin variable",
        }
    }

    /// Quantum for round-robin policies.
    pub fn quantum(&self) -> Option<NonZeroU64> {
        match self {
            Policy::RoundRobinFixed { quantum } | Policy::RoundRobinVariable { quantum } => {
                Some(*quantum)
            }
            _ => None,
        }
    }

    /// Builds a fresh engine over `processes`.
    ///
    /// PIDs must be unique (see [`crate::validation::validate_processes`]).
    pub fn engine<'a>(&self, processes: &'a [Process]) -> Engine<'a> {
        match *self {
            Policy::Fcfs => Engine::ReadySet(ReevaluatingEngine::new(
                processes,
                rules::ArrivalOrder,
                SelectionTrigger::EveryTick,
            )),
            Policy::Sjf(mode) => Engine::ReadySet(ReevaluatingEngine::new(
                processes,
                rules::ShortestRemaining,
                match mode {
                    SjfMode::Strict => SelectionTrigger::WhenIdle,
                    SjfMode::ReselectOnArrival => SelectionTrigger::WhenIdleOrArrival,
                },
            )),
            Policy::Srt => Engine::ReadySet(ReevaluatingEngine::new(
                processes,
                rules::ShortestRemaining,
                SelectionTrigger::EveryTick,
            )),
            Policy::Priority => Engine::ReadySet(ReevaluatingEngine::new(
                processes,
                rules::PriorityOrder,
                SelectionTrigger::EveryTick,
            )),
            Policy::RoundRobinFixed { quantum } => {
                Engine::RoundRobin(RoundRobinEngine::new(processes, quantum, Rotation::Fixed))
            }
            Policy::RoundRobinVariable { quantum } => Engine::RoundRobin(RoundRobinEngine::new(
                processes,
                quantum,
                Rotation::Variable,
            )),
        }
    }

    /// Runs the policy to completion and materializes the trace.
    pub fn simulate(&self, processes: &[Process]) -> Trace {
        info!(policy = %self, processes = processes.len(), "simulation started");
        let trace: Trace = self.engine(processes).collect();
        info!(
            policy = %self,
            ticks = trace.len(),
            busy = trace.busy_ticks(),
            "simulation finished"
        );
        trace
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quantum() {
            Some(q) => write!(f, "{} (q={q})", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

/// A running simulation for any policy.
#[derive(Debug)]
pub enum Engine<'a> {
    /// FCFS, SJF, SRT and Priority.
    ReadySet(ReevaluatingEngine<'a>),
    /// Both round-robin variants.
    RoundRobin(RoundRobinEngine<'a>),
}

impl Engine<'_> {
    /// Current tick (the next one to be emitted).
    pub fn now(&self) -> Tick {
        match self {
            Engine::ReadySet(e) => e.now(),
            Engine::RoundRobin(e) => e.now(),
        }
    }
}

impl Iterator for Engine<'_> {
    type Item = Occupant;

    fn next(&mut self) -> Option<Occupant> {
        match self {
            Engine::ReadySet(e) => e.next(),
            Engine::RoundRobin(e) => e.next(),
        }
    }
}

/// Convenience wrapper for [`Policy::simulate`].
pub fn simulate(policy: Policy, processes: &[Process]) -> Trace {
    policy.simulate(processes)
}

/// Buckets process indices by arrival tick, each bucket in arrival order.
///
/// Zero-burst processes have no work and are left out.
pub(crate) fn arrivals_by_tick(processes: &[Process]) -> BTreeMap<Tick, Vec<usize>> {
    let mut buckets: BTreeMap<Tick, Vec<usize>> = BTreeMap::new();
    for (idx, p) in processes.iter().enumerate() {
        if p.burst > 0 {
            buckets.entry(p.arrival).or_default().push(idx);
        }
    }

    for bucket in buckets.values_mut() {
        let candidates: Vec<Candidate<'_>> = bucket
            .iter()
            .map(|&idx| Candidate::fresh(&processes[idx]))
            .collect();
        let ordered: Vec<usize> = sort_indices(&rules::ArrivalOrder, &candidates)
            .into_iter()
            .map(|pos| bucket[pos])
            .collect();
        *bucket = ordered;
    }
    buckets
}
