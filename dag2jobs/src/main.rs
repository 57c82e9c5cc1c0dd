/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use dag2jobs::hyperperiod;
use dag2jobs::materialize;
use dag2jobs::output;
use dag2jobs::parser;
use dag2jobs::priority::{PriorityPolicy, PriorityResolver};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Convert a DAG task specification to a job set + edge list.
///
/// Example:
///   dag2jobs tasks.csv jobs.csv edges.csv --policy RM --fixed 2
#[derive(Debug, Parser)]
#[command(
    name = "dag2jobs",
    about = "Convert a DAG task specification to a job set + edge list",
    long_about = None,
)]
struct Cli {
    /// The task set that should contribute to this job set.
    #[arg(value_name = "DAG-TASKS-CSV-FILE")]
    dag_tasks: PathBuf,

    /// Where to store all jobs.
    #[arg(value_name = "JOBS-CSV-FILE")]
    jobs_file: PathBuf,

    /// Where to store all edges.
    #[arg(value_name = "EDGES-CSV-FILE")]
    edges_file: PathBuf,

    /// How to assign job priorities.
    #[arg(short = 'p', long = "policy", value_enum, default_value = "EDF")]
    policy: PolicyArg,

    /// Gang size assumed for vertices that omit explicit score bounds.
    #[arg(long = "fixed", default_value_t = 1)]
    fixed: u32,
}

/// Priority policy as exposed on the CLI; mapped onto the library enum so the
/// library itself stays clap-free.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Earliest Deadline First: priority is the job's absolute deadline.
    #[value(name = "EDF")]
    Edf,
    /// Rate Monotonic: rank tasks by ascending period.
    #[value(name = "RM")]
    Rm,
    /// Deadline Monotonic: rank tasks by ascending relative deadline.
    #[value(name = "DM")]
    Dm,
    /// Fixed priority: the task id is the priority.
    #[value(name = "FP")]
    Fp,
}

impl From<PolicyArg> for PriorityPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Edf => PriorityPolicy::Edf,
            PolicyArg::Rm => PriorityPolicy::Rm,
            PolicyArg::Dm => PriorityPolicy::Dm,
            PolicyArg::Fp => PriorityPolicy::Fp,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Structured logging; level controlled by RUST_LOG (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let task_set = parser::parse_task_file(&cli.dag_tasks, cli.fixed)
        .context("failed to parse the DAG task file")?;

    let hyperperiod_us = hyperperiod::hyperperiod(&task_set.periods())
        .context("failed to compute the hyperperiod")?;
    info!(
        hyperperiod_us,
        tasks = task_set.task_count(),
        "hyperperiod computed"
    );

    let policy = PriorityPolicy::from(cli.policy);
    let resolver = PriorityResolver::new(policy, &task_set);

    let job_set = materialize::materialize(&task_set, hyperperiod_us, &resolver)
        .context("failed to materialize the job set")?;

    output::write_job_set(&cli.jobs_file, &cli.edges_file, &job_set)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
