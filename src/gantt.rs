//! Text Gantt charts.
//!
//! ```text
//! +--------------------+------------+
//! |         P1         |     P2     |
//! +--------------------+------------+
//! 0                    5            8
//! ```
//!
//! Each contiguous run becomes a box `unit_width * duration` characters
//! wide, where `unit_width` is the longest PID digit count plus three.
//! Idle runs are labelled `--`.

use crate::models::Trace;

/// Renders a trace as a four-line chart. An empty trace renders as "".
pub fn render(trace: &Trace) -> String {
    let segments = trace.segments();
    let Some(last) = segments.last() else {
        return String::new();
    };

    let unit_width = trace
        .slots()
        .iter()
        .filter_map(|o| o.pid())
        .map(|pid| pid.to_string().len())
        .max()
        .unwrap_or(1)
        + 3;
    let widths: Vec<usize> = segments
        .iter()
        .map(|s| unit_width * s.duration() as usize)
        .collect();

    let mut border = String::from("+");
    let mut labels = String::from("|");
    let mut ticks = String::new();
    for (seg, &width) in segments.iter().zip(&widths) {
        border.push_str(&"-".repeat(width));
        border.push('+');
        labels.push_str(&format!("{:^width$}|", seg.occupant.to_string()));
        ticks.push_str(&format!("{:<w$}", seg.start, w = width + 1));
    }
    ticks.push_str(&last.end.to_string());

    format!("{border}\n{labels}\n{border}\n{ticks}\n")
}
