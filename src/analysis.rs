//! Trace analysis: per-process timing and aggregate metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion tick | Index of the last tick the process ran |
//! | Turnaround | completion tick + 1 - arrival |
//! | Wait | Ticks in [arrival, completion tick] run by others or idle |
//! | Response | First tick run - arrival |
//! | Utilization | Busy ticks / trace length |
//!
//! Turnaround counts the completion tick itself, so it is never shorter
//! than the burst and `wait == turnaround - burst`.

use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::models::{label_for, Pid, Process, Tick, Trace};

/// Timing of one process within a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    pub pid: Pid,
    pub arrival: Tick,
    pub burst: Tick,
    /// First tick the process held the CPU.
    pub first_tick: Tick,
    /// Last tick the process held the CPU.
    pub completion_tick: Tick,
    pub turnaround: Tick,
    pub wait: Tick,
    pub response: Tick,
}

/// Aggregate metrics for one trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub process_count: usize,
    /// Trace length in ticks.
    pub makespan: Tick,
    pub busy_ticks: Tick,
    pub idle_ticks: Tick,
    /// Busy fraction of the trace (0.0..1.0).
    pub utilization: f64,
    pub avg_turnaround: f64,
    pub avg_wait: f64,
    pub avg_response: f64,
}

/// Analysis output handed to renderers.
///
/// Serializes as `{"turnaround_times": {"P1": 5, ...}, "wait_times": {...}}`,
/// keys in PID order, with an optional `summary` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    #[serde(serialize_with = "serialize_labelled")]
    pub turnaround_times: BTreeMap<Pid, Tick>,
    #[serde(serialize_with = "serialize_labelled")]
    pub wait_times: BTreeMap<Pid, Tick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<AnalysisSummary>,
}

impl AnalysisReport {
    /// Attaches aggregate metrics.
    pub fn with_summary(mut self, summary: AnalysisSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Pretty JSON with four-space indentation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(serde_json::Error::custom)
    }
}

fn serialize_labelled<S: Serializer>(
    values: &BTreeMap<Pid, Tick>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(values.len()))?;
    for (pid, value) in values {
        map.serialize_entry(&label_for(*pid), value)?;
    }
    map.end()
}

/// Per-process statistics for a finished trace.
#[derive(Debug, Clone, Default)]
pub struct TraceAnalysis {
    stats: BTreeMap<Pid, ProcessStats>,
    makespan: Tick,
    busy_ticks: Tick,
}

impl TraceAnalysis {
    /// Analyzes a trace against the process set that produced it.
    ///
    /// Processes that never appear in the trace are left out.
    pub fn calculate(trace: &Trace, processes: &[Process]) -> Self {
        let slots = trace.slots();
        let mut stats = BTreeMap::new();

        for p in processes {
            let (Some(first_tick), Some(completion_tick)) =
                (trace.first_tick(p.pid), trace.last_tick(p.pid))
            else {
                continue;
            };

            let window_start = p.arrival.min(completion_tick) as usize;
            let window = &slots[window_start..=completion_tick as usize];
            let wait = window.iter().filter(|o| o.pid() != Some(p.pid)).count() as Tick;

            stats.insert(
                p.pid,
                ProcessStats {
                    pid: p.pid,
                    arrival: p.arrival,
                    burst: p.burst,
                    first_tick,
                    completion_tick,
                    turnaround: (completion_tick + 1).saturating_sub(p.arrival),
                    wait,
                    response: first_tick.saturating_sub(p.arrival),
                },
            );
        }

        Self {
            stats,
            makespan: trace.len() as Tick,
            busy_ticks: trace.busy_ticks(),
        }
    }

    /// Statistics for one process.
    pub fn get(&self, pid: Pid) -> Option<&ProcessStats> {
        self.stats.get(&pid)
    }

    /// All statistics, in PID order.
    pub fn iter(&self) -> impl Iterator<Item = &ProcessStats> {
        self.stats.values()
    }

    /// Number of analyzed processes.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Turnaround and wait mappings for rendering.
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            turnaround_times: self.stats.iter().map(|(&pid, s)| (pid, s.turnaround)).collect(),
            wait_times: self.stats.iter().map(|(&pid, s)| (pid, s.wait)).collect(),
            summary: None,
        }
    }

    /// Aggregate metrics. Averages are 0.0 for an empty analysis.
    pub fn summary(&self) -> AnalysisSummary {
        let count = self.stats.len();
        let mean = |f: fn(&ProcessStats) -> Tick| {
            if count == 0 {
                0.0
            } else {
                self.stats.values().map(f).sum::<Tick>() as f64 / count as f64
            }
        };

        AnalysisSummary {
            process_count: count,
            makespan: self.makespan,
            busy_ticks: self.busy_ticks,
            idle_ticks: self.makespan - self.busy_ticks,
            utilization: if self.makespan == 0 {
                0.0
            } else {
                self.busy_ticks as f64 / self.makespan as f64
            },
            avg_turnaround: mean(|s| s.turnaround),
            avg_wait: mean(|s| s.wait),
            avg_response: mean(|s| s.response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Occupant::{Idle, Process as P};
    use crate::simulation::{Policy, SjfMode};
    use crate::workload::{random_workload, WorkloadShape};
    use std::num::NonZeroU64;

    fn scenario() -> Vec<Process> {
        vec![
            Process::new(1, 5).with_priority(1),
            Process::new(2, 3).with_arrival(2).with_priority(2),
        ]
    }

    #[test]
    fn test_fcfs_scenario() {
        let set = scenario();
        let trace = Trace::new(vec![P(1), P(1), P(1), P(1), P(1), P(2), P(2), P(2)]);
        let analysis = TraceAnalysis::calculate(&trace, &set);

        let p1 = analysis.get(1).unwrap();
        assert_eq!(p1.completion_tick, 4);
        assert_eq!(p1.turnaround, 5);
        assert_eq!(p1.wait, 0);

        let p2 = analysis.get(2).unwrap();
        assert_eq!(p2.completion_tick, 7);
        assert_eq!(p2.turnaround, 6);
        assert_eq!(p2.wait, 3);
        assert_eq!(p2.response, 3);
    }

    #[test]
    fn test_idle_ticks_count_as_wait() {
        let set = vec![Process::new(1, 2).with_arrival(1)];
        let trace = Trace::new(vec![Idle, Idle, P(1), Idle, P(1)]);
        let s = TraceAnalysis::calculate(&trace, &set).get(1).cloned().unwrap();
        // Window [1, 4] holds two foreign ticks
        assert_eq!(s.wait, 2);
        assert_eq!(s.turnaround, 4);
    }

    #[test]
    fn test_missing_process_skipped() {
        let set = vec![Process::new(1, 1), Process::new(2, 1)];
        let trace = Trace::new(vec![P(1)]);
        let analysis = TraceAnalysis::calculate(&trace, &set);
        assert_eq!(analysis.len(), 1);
        assert!(analysis.get(2).is_none());
    }

    #[test]
    fn test_report_json_shape() {
        let set = scenario();
        let trace = Policy::Fcfs.simulate(&set);
        let json = TraceAnalysis::calculate(&trace, &set).report().to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["turnaround_times"]["P1"], 5);
        assert_eq!(value["turnaround_times"]["P2"], 6);
        assert_eq!(value["wait_times"]["P1"], 0);
        assert_eq!(value["wait_times"]["P2"], 3);
        assert!(value.get("summary").is_none());
        assert!(json.contains("\n    \"turnaround_times\""));
    }

    #[test]
    fn test_report_keys_in_pid_order() {
        let set: Vec<Process> = (1..=11).map(|pid| Process::new(pid, 1)).collect();
        let trace = Policy::Fcfs.simulate(&set);
        let json = TraceAnalysis::calculate(&trace, &set).report().to_json().unwrap();
        let p2 = json.find("\"P2\"").unwrap();
        let p10 = json.find("\"P10\"").unwrap();
        assert!(p2 < p10);
    }

    #[test]
    fn test_summary() {
        let set = vec![Process::new(1, 2), Process::new(2, 1).with_arrival(4)];
        let trace = Policy::Fcfs.simulate(&set);
        let summary = TraceAnalysis::calculate(&trace, &set).summary();
        assert_eq!(summary.makespan, 5);
        assert_eq!(summary.busy_ticks, 3);
        assert_eq!(summary.idle_ticks, 2);
        assert!((summary.utilization - 0.6).abs() < 1e-10);
        assert!((summary.avg_turnaround - 1.5).abs() < 1e-10);
        assert!((summary.avg_wait - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty() {
        let analysis = TraceAnalysis::calculate(&Trace::default(), &[]);
        assert!(analysis.is_empty());
        let summary = analysis.summary();
        assert_eq!(summary.makespan, 0);
        assert!((summary.utilization - 0.0).abs() < 1e-10);
        assert!((summary.avg_wait - 0.0).abs() < 1e-10);
        assert_eq!(analysis.report().to_json().unwrap().matches('P').count(), 0);
    }

    #[test]
    fn test_turnaround_bounds_random() {
        let quantum = NonZeroU64::new(3).unwrap();
        for seed in 0..15 {
            let set = random_workload(10, seed, &WorkloadShape::default());
            for policy in Policy::all(quantum, SjfMode::Strict) {
                let trace = policy.simulate(&set);
                let analysis = TraceAnalysis::calculate(&trace, &set);
                assert_eq!(analysis.len(), set.len());
                for s in analysis.iter() {
                    assert!(s.turnaround >= s.burst, "{policy}: P{}", s.pid);
                    assert_eq!(s.wait, s.turnaround - s.burst, "{policy}: P{}", s.pid);
                    assert!(s.response <= s.wait);
                }
            }
        }
    }
}
