/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Job materialization: unrolling the recurring task model into the finite
//! job set covering one hyperperiod.
//!
//! Each task contributes `hyperperiod / period` instances. Instance `i`
//! releases at `i × period`, carries the absolute deadline
//! `release + relative deadline`, and expands every vertex of the task into
//! one [`Job`] in declared vertex order.
//!
//! # Job-id layout
//! Within one task, instance `i` numbers its jobs from the base
//! `i × stride + 1`, where the stride is the smallest power of ten that is at
//! least the task's vertex count. Consecutive instances therefore occupy
//! disjoint, visually aligned id ranges (a task with 7 vertices uses
//! 1..=7, 11..=17, 21..=27, ...), and ids are strictly increasing with
//! instance index and vertex order. Across tasks, jobs are identified by the
//! `(task_id, job_id)` pair.
//!
//! The hyperperiod is the LCM of all periods, so the per-task division is
//! exact; a non-divisible pair can only reach this module through a caller
//! that computed the window some other way, and is rejected rather than
//! truncated.

use thiserror::Error;
use tracing::{debug, info};

use crate::priority::PriorityResolver;
use crate::task::{Edge, Job, Task, TaskId, TaskSet, Vertex};

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors that can occur while unrolling tasks into jobs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaterializeError {
    /// The analysis window is not an exact multiple of a task's period, so
    /// the task's instance count would have to be truncated.
    #[error(
        "hyperperiod {hyperperiod_us}us is not divisible by the {period_us}us period of task {task_id}"
    )]
    NonDivisibleHyperperiod {
        task_id: TaskId,
        period_us: u64,
        hyperperiod_us: u64,
    },
}

// ── JobSet ────────────────────────────────────────────────────────────────────

/// The materialized output: all jobs (sorted ascending by job id) plus the
/// precedence edges between them.
#[derive(Debug, Default)]
pub struct JobSet {
    pub jobs: Vec<Job>,
    pub edges: Vec<Edge>,
}

// ── Materialization ───────────────────────────────────────────────────────────

/// Unroll every task of `set` across `hyperperiod_us` and assign priorities
/// through `resolver`.
///
/// Tasks declared without vertices contribute nothing. The returned job list
/// is sorted ascending by job id (stable, so equal ids keep ascending-task
/// order). The edge list is empty: the input format carries no precedence
/// data between vertices, so there is nothing to expand into job edges.
pub fn materialize(
    set: &TaskSet,
    hyperperiod_us: u64,
    resolver: &PriorityResolver,
) -> Result<JobSet, MaterializeError> {
    let mut jobs = Vec::new();

    for task in set.tasks() {
        let vertices = set.vertices_of(task.id);
        if vertices.is_empty() {
            debug!(task_id = task.id, "task has no vertices, nothing to materialize");
            continue;
        }

        if hyperperiod_us % task.period_us != 0 {
            return Err(MaterializeError::NonDivisibleHyperperiod {
                task_id: task.id,
                period_us: task.period_us,
                hyperperiod_us,
            });
        }
        let instances = hyperperiod_us / task.period_us;

        debug!(
            task_id = task.id,
            instances,
            vertices = vertices.len(),
            "unrolling task"
        );
        instantiate_task(task, vertices, instances, resolver, &mut jobs);
    }

    jobs.sort_by_key(|j| j.job_id);

    info!(
        jobs = jobs.len(),
        hyperperiod_us,
        policy = %resolver.policy(),
        "materialized job set"
    );
    Ok(JobSet { jobs, edges: Vec::new() })
}

/// Expand one task into `instances` releases, appending one job per vertex
/// per instance.
fn instantiate_task(
    task: &Task,
    vertices: &[Vertex],
    instances: u64,
    resolver: &PriorityResolver,
    jobs: &mut Vec<Job>,
) {
    let stride = next_power_of_ten(vertices.len() as u64);

    for i in 0..instances {
        let release_us = i * task.period_us;
        let deadline_us = release_us.saturating_add(task.deadline_us);
        let priority = resolver.priority(task.id, deadline_us, task.period_us);

        let mut job_id = i * stride + 1;
        for vertex in vertices {
            jobs.push(Job {
                task_id: task.id,
                job_id,
                arrival_min_us: release_us.saturating_add(vertex.r_min_us),
                arrival_max_us: release_us.saturating_add(vertex.r_max_us),
                bcet_us: vertex.bcet_us.clone(),
                wcet_us: vertex.wcet_us.clone(),
                deadline_us,
                priority,
                scores_min: vertex.scores_min,
                scores_max: vertex.scores_max,
            });
            job_id += 1;
        }
    }
}

/// Smallest power of ten that is at least `n` (`1` for `n <= 1`). Used as the
/// per-instance job-id stride, so an instance's id range can never overlap
/// the next one's.
fn next_power_of_ten(n: u64) -> u64 {
    let mut p = 1u64;
    while p < n {
        p *= 10;
    }
    p
}

// ── Tests ─────────────────────────────────────────────────────────────────────
