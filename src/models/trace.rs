//! Gantt trace model.
//!
//! A trace is the per-tick record of which process held the CPU.
//! Slot `t` names the occupant during tick `t`; traces are produced once
//! per simulation run and never modified afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Pid, Tick};

/// Occupant of the CPU during a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    /// No process was ready.
    Idle,
    /// The process with this PID ran.
    Process(Pid),
}

impl Occupant {
    /// PID of the running process, if any.
    #[inline]
    pub fn pid(&self) -> Option<Pid> {
        match self {
            Occupant::Idle => None,
            Occupant::Process(pid) => Some(*pid),
        }
    }

    /// Whether the CPU was idle.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Occupant::Idle)
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::Idle => f.write_str("--"),
            Occupant::Process(pid) => write!(f, "P{pid}"),
        }
    }
}

/// A maximal run of consecutive ticks with the same occupant.
///
/// Covers the half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub occupant: Occupant,
    pub start: Tick,
    pub end: Tick,
}

impl Segment {
    /// Number of ticks covered.
    #[inline]
    pub fn duration(&self) -> Tick {
        self.end - self.start
    }
}

/// A complete, materialized Gantt trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    slots: Vec<Occupant>,
}

impl Trace {
    /// Creates a trace from per-tick occupants.
    pub fn new(slots: Vec<Occupant>) -> Self {
        Self { slots }
    }

    /// Per-tick occupants, indexed by tick.
    pub fn slots(&self) -> &[Occupant] {
        &self.slots
    }

    /// Number of simulated ticks.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no tick was simulated.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Occupant at a tick, `None` past the end.
    pub fn at(&self, tick: Tick) -> Option<Occupant> {
        usize::try_from(tick)
            .ok()
            .and_then(|i| self.slots.get(i))
            .copied()
    }

    /// Ticks during which some process ran.
    pub fn busy_ticks(&self) -> Tick {
        self.slots.iter().filter(|o| !o.is_idle()).count() as Tick
    }

    /// Ticks occupied by the given process.
    pub fn ticks_for(&self, pid: Pid) -> Tick {
        self.slots
            .iter()
            .filter(|o| o.pid() == Some(pid))
            .count() as Tick
    }

    /// First tick the process ran.
    pub fn first_tick(&self, pid: Pid) -> Option<Tick> {
        self.slots
            .iter()
            .position(|o| o.pid() == Some(pid))
            .map(|i| i as Tick)
    }

    /// Last tick the process ran (its completion tick).
    pub fn last_tick(&self, pid: Pid) -> Option<Tick> {
        self.slots
            .iter()
            .rposition(|o| o.pid() == Some(pid))
            .map(|i| i as Tick)
    }

    /// Collapses the trace into contiguous segments.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();
        for (tick, &occupant) in self.slots.iter().enumerate() {
            let tick = tick as Tick;
            match segments.last_mut() {
                Some(last) if last.occupant == occupant => last.end = tick + 1,
                _ => segments.push(Segment {
                    occupant,
                    start: tick,
                    end: tick + 1,
                }),
            }
        }
        segments
    }
}

impl FromIterator<Occupant> for Trace {
    fn from_iter<I: IntoIterator<Item = Occupant>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
