//! Process model.
//!
//! A process is the schedulable unit of the simulation: it becomes
//! eligible at its arrival tick and needs `burst` ticks of CPU time.
//!
//! Records are immutable. Progress (ticks completed so far) is owned by
//! each simulation run, so the same process set can be replayed under
//! any number of policies without a reset step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated time, in whole ticks from t=0.
pub type Tick = u64;

/// Process identifier. Unique within a process set.
pub type Pid = u32;

/// A process to be scheduled.
///
/// # Priority Convention
/// Lower `priority` values are served first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier (final tie-breaker in every ordering).
    pub pid: Pid,
    /// Tick at which the process becomes ready.
    pub arrival: Tick,
    /// Total CPU ticks required. Always > 0 in a validated set.
    pub burst: Tick,
    /// Scheduling priority (lower = more urgent).
    pub priority: i32,
}

impl Process {
    /// Creates a process arriving at t=0 with priority 0.
    pub fn new(pid: Pid, burst: Tick) -> Self {
        Self {
            pid,
            arrival: 0,
            burst,
            priority: 0,
        }
    }

    /// Sets the arrival tick.
    pub fn with_arrival(mut self, arrival: Tick) -> Self {
        self.arrival = arrival;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Display label used in traces and reports (`"P" + pid`).
    pub fn label(&self) -> String {
        label_for(self.pid)
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{} (arrival {}, burst {}, priority {})",
            self.pid, self.arrival, self.burst, self.priority
        )
    }
}

/// Label for a PID, as used in Gantt charts and JSON reports.
#[inline]
pub fn label_for(pid: Pid) -> String {
    format!("P{pid}")
}

/// Sum of all burst times, i.e. the busy ticks of any complete trace.
///
/// Saturates at `Tick::MAX`; validated sets stay far below it.
pub fn total_work(processes: &[Process]) -> Tick {
    processes
        .iter()
        .fold(0, |acc: Tick, p| acc.saturating_add(p.burst))
}
