//! Round-robin engines over a strict FIFO ready queue.
//!
//! # Rotation
//!
//! - **Fixed**: the CPU changes hands only at ticks that are multiples of
//!   the quantum. A process that finishes mid-quantum leaves the CPU idle
//!   until the next boundary, so each process occupies whole quanta.
//! - **Variable**: every dispatch opens a fresh window of `quantum` ticks.
//!   When a process finishes early the next one starts immediately, so the
//!   rotation points slide instead of staying on the global grid.
//!
//! In both modes arrivals for a tick are queued (in arrival order, PID
//! tie-break) before the expiring process is put back at the tail.

use std::collections::{BTreeMap, VecDeque};
use std::num::NonZeroU64;

use tracing::{debug, trace};

use super::arrivals_by_tick;
use crate::models::{total_work, Occupant, Process, Tick};

/// Where rotation points fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// At multiples of the quantum.
    Fixed,
    /// `quantum` ticks after the last dispatch, or as soon as the CPU frees up.
    Variable,
}

/// Round-robin simulation engine.
#[derive(Debug)]
pub struct RoundRobinEngine<'a> {
    processes: &'a [Process],
    quantum: NonZeroU64,
    rotation: Rotation,
    arrivals: BTreeMap<Tick, Vec<usize>>,
    queue: VecDeque<usize>,
    completed: Vec<Tick>,
    active: Option<usize>,
    slice_start: Tick,
    now: Tick,
    outstanding: Tick,
}

impl<'a> RoundRobinEngine<'a> {
    /// Creates an engine at t=0 with an empty queue.
    pub fn new(processes: &'a [Process], quantum: NonZeroU64, rotation: Rotation) -> Self {
        Self {
            processes,
            quantum,
            rotation,
            arrivals: arrivals_by_tick(processes),
            queue: VecDeque::with_capacity(processes.len()),
            completed: vec![0; processes.len()],
            active: None,
            slice_start: 0,
            now: 0,
            outstanding: total_work(processes),
        }
    }

    /// Current tick (the next one to be emitted).
    pub fn now(&self) -> Tick {
        self.now
    }

    #[inline]
    fn on_boundary(&self) -> bool {
        self.now % self.quantum.get() == 0
    }

    fn finished(&self) -> bool {
        match self.rotation {
            // Pad to the boundary so every process spans whole quanta
            Rotation::Fixed => self.outstanding == 0 && self.on_boundary(),
            Rotation::Variable => self.outstanding == 0,
        }
    }

    fn admit(&mut self) {
        if let Some(arrived) = self.arrivals.remove(&self.now) {
            for &idx in &arrived {
                trace!(tick = self.now, pid = self.processes[idx].pid, "queued");
            }
            self.queue.extend(arrived);
        }
    }

    fn should_rotate(&self) -> bool {
        match self.rotation {
            Rotation::Fixed => self.on_boundary(),
            Rotation::Variable => {
                self.active.is_none() || self.now - self.slice_start >= self.quantum.get()
            }
        }
    }

    fn rotate(&mut self) {
        let expired = self.active.take();
        if let Some(idx) = expired {
            self.queue.push_back(idx);
        }
        self.active = self.queue.pop_front();

        if let Some(idx) = self.active {
            self.slice_start = self.now;
            if expired != self.active {
                debug!(
                    tick = self.now,
                    pid = self.processes[idx].pid,
                    expired = expired.map(|i| self.processes[i].pid),
                    "rotated"
                );
            }
        }
    }
}

impl Iterator for RoundRobinEngine<'_> {
    type Item = Occupant;

    fn next(&mut self) -> Option<Occupant> {
        if self.finished() {
            return None;
        }

        self.admit();
        if self.should_rotate() {
            self.rotate();
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
