/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

mod gen;

use gen::GenParams;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Generate random DAG task sets in the row-tagged format consumed by
/// dag2jobs.
///
/// Example:
///   taskgen -t 5 -j 4 --maximum 200 --seed 1 --save tasks.csv
#[derive(Debug, Parser)]
#[command(
    name = "taskgen",
    about = "Generate random tasks",
    long_about = None,
)]
struct Cli {
    /// How many random tasks should be created.
    #[arg(short = 't', long = "tasks", default_value_t = 3)]
    tasks: u32,

    /// Maximum number of vertices in each task (exclusive).
    #[arg(
        short = 'j',
        long = "jobs",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(2..)
    )]
    jobs: u32,

    /// Upper bound (exclusive) for generated periods and deadlines.
    #[arg(
        long = "maximum",
        default_value_t = 100,
        value_parser = clap::value_parser!(u32).range(3..)
    )]
    maximum: u32,

    /// Maximum precedence predecessors per vertex (0 disables precedence).
    #[arg(short = 'p', long = "precedence", default_value_t = 0)]
    precedence: u32,

    /// Name to store the random DAG under.
    #[arg(long = "save", value_name = "CSV-FILE")]
    save: PathBuf,

    /// RNG seed for reproducible output; seeded from the OS when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
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
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let params = GenParams {
        tasks: cli.tasks,
        max_vertices: cli.jobs,
        max_value: cli.maximum,
        max_precedence: cli.precedence,
    };

    let (tasks, vertices) = gen::generate(&mut rng, &params);
    std::fs::write(&cli.save, gen::render(&tasks, &vertices))
        .with_context(|| format!("cannot write '{}'", cli.save.display()))?;

    info!(
        tasks = tasks.len(),
        vertices = vertices.len(),
        path = %cli.save.display(),
        "wrote random task set"
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
