/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Random DAG task-set generation.
//!
//! Produces `T` and `V` rows in the row-tagged format consumed by dag2jobs:
//!
//! ```text
//! T,<task_id>,<period>,<deadline>
//! V,<task_id>,<vertex_id>,<r_min>,<r_max>,<bcet>,<wcet>[,<predecessor>]
//! ```
//!
//! Values are drawn in whole external time units (no millisecond scaling on
//! this side). Deadlines are at least the period (arbitrary-deadline model);
//! release windows and costs are bounded by a quarter of the period and
//! deadline respectively, keeping generated sets comfortably feasible.
//!
//! Generation is generic over [`Rng`] so tests and the `--seed` flag can use
//! a deterministic [`StdRng`](rand::rngs::StdRng) while normal runs seed from
//! the OS.

use rand::Rng;

// ── Parameters ────────────────────────────────────────────────────────────────

/// Knobs for one generation run, mirroring the CLI flags.
#[derive(Debug, Clone)]
pub struct GenParams {
    /// Number of tasks to create.
    pub tasks: u32,

    /// Exclusive upper bound on vertices per task (must be >= 2, so every
    /// task gets at least one vertex).
    pub max_vertices: u32,

    /// Exclusive upper bound on periods and deadlines (must be >= 3).
    pub max_value: u32,

    /// Maximum precedence predecessors per vertex; 0 disables precedence.
    pub max_precedence: u32,
}

// ── Generated rows ────────────────────────────────────────────────────────────

/// One generated `T` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRow {
    pub id: u32,
    pub period: u32,
    pub deadline: u32,
}

/// One generated `V` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRow {
    pub task_id: u32,
    pub vertex_id: u32,
    pub r_min: u32,
    pub r_max: u32,
    pub bcet: u32,
    pub wcet: u32,
    /// At most one predecessor, always an earlier vertex of the same task,
    /// so the emitted structure is acyclic by construction.
    pub predecessor: Option<u32>,
}

// ── Generation ────────────────────────────────────────────────────────────────

/// Generate a full random task set.
pub fn generate<R: Rng>(rng: &mut R, params: &GenParams) -> (Vec<TaskRow>, Vec<VertexRow>) {
    let tasks = generate_tasks(rng, params);
    let vertices = generate_vertices(rng, params, &tasks);
    (tasks, vertices)
}

fn generate_tasks<R: Rng>(rng: &mut R, params: &GenParams) -> Vec<TaskRow> {
    (0..params.tasks)
        .map(|i| {
            let period = rng.random_range(2..params.max_value);
            let deadline = rng.random_range(period..params.max_value);
            TaskRow { id: i + 1, period, deadline }
        })
        .collect()
}

fn generate_vertices<R: Rng>(
    rng: &mut R,
    params: &GenParams,
    tasks: &[TaskRow],
) -> Vec<VertexRow> {
    let mut rows = Vec::new();
    for task in tasks {
        let count = rng.random_range(1..params.max_vertices);
        for j in 0..count {
            let vertex_id = j + 1;
            let r_min = rng.random_range(0..=task.period / 4);
            let r_max = r_min + rng.random_range(0..=task.period / 4);
            let bcet = rng.random_range(0..=task.deadline / 4);
            let wcet = bcet + rng.random_range(0..=task.deadline / 4);

            let predecessor = if params.max_precedence >= 1 && vertex_id > 1 {
                Some(rng.random_range(1..vertex_id))
            } else {
                None
            };

            rows.push(VertexRow {
                task_id: task.id,
                vertex_id,
                r_min,
                r_max,
                bcet,
                wcet,
                predecessor,
            });
        }
    }
    rows
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the generated rows as a task file: all `T` rows first, then all
/// `V` rows.
pub fn render(tasks: &[TaskRow], vertices: &[VertexRow]) -> String {
    let mut out = String::new();
    for t in tasks {
        out.push_str(&format!("T,{},{},{}\n", t.id, t.period, t.deadline));
    }
    for v in vertices {
        out.push_str(&format!(
            "V,{},{},{},{},{},{}",
            v.task_id, v.vertex_id, v.r_min, v.r_max, v.bcet, v.wcet,
        ));
        if let Some(pred) = v.predecessor {
            out.push_str(&format!(",{pred}"));
        }
        out.push('\n');
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
