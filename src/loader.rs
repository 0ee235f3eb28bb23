//! CSV loading of process sets.
//!
//! # Format
//!
//! Headerless rows of four integers, one process per row:
//!
//! ```text
//! PID, arrival, burst, priority
//! 1, 0, 5, 1
//! 2, 2, 3, 2
//! ```
//!
//! Surrounding whitespace is ignored and lines starting with `#` are
//! comments. Loading fails on the first malformed row and validates the
//! whole set before returning, so callers never simulate a partial list.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::Process;
use crate::validation::validate_processes;

const FIELDS: [&str; 4] = ["PID", "arrival", "burst", "priority"];

/// Loads and validates a process set from a CSV file.
pub fn load_processes_csv(path: impl AsRef<Path>) -> Result<Vec<Process>> {
    let path = path.as_ref();
    let processes = load_processes_reader(File::open(path)?)?;
    info!(path = %path.display(), processes = processes.len(), "loaded process list");
    Ok(processes)
}

/// Loads and validates a process set from any CSV source.
pub fn load_processes_reader<R: Read>(reader: R) -> Result<Vec<Process>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut processes = Vec::new();
    for record in rdr.records() {
        let process = parse_record(&record?)?;
        debug!(%process, "parsed row");
        processes.push(process);
    }

    validate_processes(&processes).map_err(Error::Validation)?;
    Ok(processes)
}

fn parse_record(record: &StringRecord) -> Result<Process> {
    let line = record.position().map_or(0, |pos| pos.line());
    if record.len() != FIELDS.len() {
        return Err(Error::FieldCount {
            line,
            found: record.len(),
        });
    }

    let mut values = [0i64; 4];
    for (i, (raw, field)) in record.iter().zip(FIELDS).enumerate() {
        values[i] = raw.parse().map_err(|_| Error::InvalidInteger {
            line,
            field,
            value: raw.to_string(),
        })?;
    }
    let [pid, arrival, burst, priority] = values;

    let out_of_range = |field: &'static str, value: i64| Error::OutOfRange { line, field, value };
    Ok(Process {
        pid: u32::try_from(pid).map_err(|_| out_of_range("PID", pid))?,
        arrival: u64::try_from(arrival).map_err(|_| out_of_range("arrival", arrival))?,
        burst: u64::try_from(burst).map_err(|_| out_of_range("burst", burst))?,
        priority: i32::try_from(priority).map_err(|_| out_of_range("priority", priority))?,
    })
}
