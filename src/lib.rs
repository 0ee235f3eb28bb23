//! Discrete-time CPU scheduling simulator.
//!
//! Replays a fixed set of processes (arrival, burst, priority) under
//! classical scheduling disciplines, producing a per-tick Gantt trace and
//! turnaround/wait statistics.
//!
//! # Modules
//!
//! - **`models`**: `Process`, `Occupant`, `Trace`
//! - **`dispatching`**: selection rules (arrival order, shortest remaining, priority)
//! - **`simulation`**: `Policy` and the tick-driven engines
//! - **`analysis`**: per-process turnaround, wait and response; aggregates
//! - **`validation`**: process-set integrity checks (unique PIDs, non-zero bursts)
//! - **`loader`**: CSV input
//! - **`gantt`**: text rendering of traces
//! - **`workload`**: seeded random process sets
//!
//! # Example
//!
//! ```
//! use cpusched::analysis::TraceAnalysis;
//! use cpusched::models::Process;
//! use cpusched::simulation::Policy;
//!
//! let processes = vec![
//!     Process::new(1, 5).with_priority(1),
//!     Process::new(2, 3).with_arrival(2).with_priority(2),
//! ];
//! let trace = Policy::Fcfs.simulate(&processes);
//! let analysis = TraceAnalysis::calculate(&trace, &processes);
//!
//! assert_eq!(analysis.get(2).unwrap().turnaround, 6);
//! assert_eq!(analysis.get(2).unwrap().wait, 3);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod analysis;
pub mod dispatching;
pub mod error;
pub mod gantt;
pub mod loader;
pub mod models;
pub mod simulation;
pub mod validation;
pub mod workload;

pub use error::{Error, Result};
