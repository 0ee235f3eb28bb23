//! Candidate view passed to selection rules.

use crate::models::{Pid, Process, Tick};

/// A ready process as seen by a selection rule: the immutable record
/// plus the progress the current run has made on it.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// The process record.
    pub process: &'a Process,
    /// Ticks of CPU already received in this run.
    pub completed: Tick,
}

impl<'a> Candidate<'a> {
    /// Creates a candidate with the given progress.
    pub fn new(process: &'a Process, completed: Tick) -> Self {
        debug_assert!(
            completed <= process.burst,
            "P{} completed {completed} ticks of a {}-tick burst",
            process.pid,
            process.burst
        );
        Self { process, completed }
    }

    /// Candidate that has not run yet.
    pub fn fresh(process: &'a Process) -> Self {
        Self::new(process, 0)
    }

    /// Ticks of work still outstanding.
    #[inline]
    pub fn remaining(&self) -> Tick {
        self.process.burst - self.completed
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.process.pid
    }
}
