//! cpusched CLI
//!
//! Reads a process list, runs the selected scheduling policies and prints
//! a Gantt chart plus a JSON block of turnaround and wait times for each.
//!
//! Binary: cpusched

use std::num::NonZeroU64;
use std::path::PathBuf;

use anyhow::Context;
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cpusched::analysis::TraceAnalysis;
use cpusched::gantt;
use cpusched::loader::load_processes_csv;
use cpusched::models::Process;
use cpusched::simulation::{Policy, SjfMode, DEFAULT_QUANTUM};
use cpusched::workload::{random_workload, WorkloadShape};

/// Upper bound for `--random`, keeping generated sets well inside the
/// simulation horizon.
const MAX_RANDOM_PROCESSES: u64 = 100_000;

/// Draw Gantt charts and compute statistics for CPU scheduling algorithms
#[derive(Parser, Debug)]
#[command(name = "cpusched")]
#[command(about = "Draw Gantt charts and compute statistics for CPU scheduling algorithms", long_about = None)]
struct Args {
    /// CSV file of [PID, arrival, burst, priority] rows
    #[arg(required_unless_present = "random")]
    input: Option<PathBuf>,

    /// First Come, First Served
    #[arg(long, alias = "FCFS")]
    fcfs: bool,

    /// Shortest Remaining Time (preemptive)
    #[arg(long, alias = "SRT")]
    srt: bool,

    /// Shortest Job First (non-preemptive)
    #[arg(long, alias = "SJF")]
    sjf: bool,

    /// Priority (lower value first)
    #[arg(long)]
    priority: bool,

    /// Round-robin, rotation on the fixed quantum grid
    #[arg(long, alias = "fRR")]
    frr: bool,

    /// Round-robin, rotation window restarts at every dispatch
    #[arg(long, alias = "vRR")]
    vrr: bool,

    /// Run every policy (the default when none is selected)
    #[arg(long)]
    all: bool,

    /// Round-robin quantum in ticks
    #[arg(short, long, default_value_t = DEFAULT_QUANTUM)]
    quantum: NonZeroU64,

    /// Let SJF re-evaluate all ready jobs whenever new ones arrive
    #[arg(long)]
    sjf_reselect_on_arrival: bool,

    /// Generate COUNT random processes instead of reading INPUT
    #[arg(
        long,
        value_name = "COUNT",
        conflicts_with = "input",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_RANDOM_PROCESSES)
    )]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Append averages and utilization to each JSON block
    #[arg(long)]
    summary: bool,
}

impl Args {
    fn policies(&self) -> Vec<Policy> {
        let sjf_mode = if self.sjf_reselect_on_arrival {
            SjfMode::ReselectOnArrival
        } else {
            SjfMode::Strict
        };
        let selected = [self.fcfs, self.srt, self.sjf, self.priority, self.frr, self.vrr];
        let run_all = self.all || !selected.contains(&true);

        Policy::all(self.quantum, sjf_mode)
            .into_iter()
            .zip(selected)
            .filter(|&(_, on)| run_all || on)
            .map(|(policy, _)| policy)
            .collect()
    }

    fn processes(&self) -> anyhow::Result<Vec<Process>> {
        match (&self.input, self.random) {
            (_, Some(count)) => {
                info!(count, seed = self.seed, "generating random workload");
                Ok(random_workload(count, self.seed, &WorkloadShape::default()))
            }
            (Some(path), None) => load_processes_csv(path)
                .with_context(|| format!("failed to load {}", path.display())),
            (None, None) => anyhow::bail!("no input file given"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cpusched=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let processes = args.processes()?;

    for policy in args.policies() {
        let trace = policy.simulate(&processes);
        let analysis = TraceAnalysis::calculate(&trace, &processes);
        let mut report = analysis.report();
        if args.summary {
            report = report.with_summary(analysis.summary());
        }

        println!("\n{policy}:");
        print!("{}", gantt::render(&trace));
        println!("{}", report.to_json()?);
    }

    Ok(())
}
