//! Simulation domain models.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Process` | Schedulable unit: PID, arrival, burst, priority |
//! | `Occupant` | CPU holder for one tick (a PID or idle) |
//! | `Trace` | Per-tick Gantt record of one simulation run |
//! | `Segment` | Contiguous run of one occupant inside a trace |

mod process;
mod trace;

pub use process::{label_for, total_work, Pid, Process, Tick};
pub use trace::{Occupant, Segment, Trace};
