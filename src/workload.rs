//! Seeded random process sets.
//!
//! Handy for comparing policies on many inputs and for invariant tests.
//! The same seed and shape always produce the same set.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

use crate::models::{Pid, Process, Tick};

/// Parameters of a random workload.
#[derive(Debug, Clone)]
pub struct WorkloadShape {
    /// Gap between consecutive arrivals (ticks).
    pub arrival_gap: RangeInclusive<Tick>,
    /// Burst time range. The lower bound is raised to 1.
    pub burst: RangeInclusive<Tick>,
    /// Priority range.
    pub priority: RangeInclusive<i32>,
}

impl Default for WorkloadShape {
    fn default() -> Self {
        Self {
            arrival_gap: 0..=3,
            burst: 1..=8,
            priority: 0..=4,
        }
    }
}

/// Generates `count` processes with PIDs `1..=count`, arrivals ascending.
///
/// At most `Pid::MAX` processes are produced, since PIDs must stay unique.
pub fn random_workload(count: usize, seed: u64, shape: &WorkloadShape) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(seed);
    let burst_lo = (*shape.burst.start()).max(1);
    let burst_hi = (*shape.burst.end()).max(burst_lo);

    let mut arrival: Tick = 0;
    let mut processes = Vec::with_capacity(count.min(Pid::MAX as usize));
    for pid in (1..=Pid::MAX).take(count) {
        if pid > 1 {
            arrival += rng.random_range(shape.arrival_gap.clone());
        }
        processes.push(Process {
            pid,
            arrival,
            burst: rng.random_range(burst_lo..=burst_hi),
            priority: rng.random_range(shape.priority.clone()),
        });
    }
    processes
}
