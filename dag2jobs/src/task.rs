/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core data structures for the task-to-job expansion pipeline.
//!
//! Two groups of types model the two sides of the pipeline:
//!
//! ```text
//! task file ──(parser)──► TaskSet { Task, Vertex } ──(materializer)──► Job / Edge ──► output tables
//!                           ↑ input, immutable after parsing              ↑ output, one row each
//! ```
//!
//! All timing values are integer microseconds (`u64`); the parser is the only
//! place where the external millisecond unit is converted. Named structs with
//! typed fields replace positional encodings end to end, so a gang-size bound
//! can never be confused with a release offset.

use std::collections::BTreeMap;

/// Task and vertex identifiers are non-negative integers in the input format.
pub type TaskId = u32;
/// Unique within its task only; two tasks may both have a vertex 1.
pub type VertexId = u32;

// ── Task ──────────────────────────────────────────────────────────────────────

/// One periodic task declaration (a `T` row).
///
/// Exactly one `Task` exists per distinct id; a repeated declaration replaces
/// the earlier one. Created by the parser, immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,

    /// Period in µs. Validated > 0 by the parser.
    pub period_us: u64,

    /// Relative deadline in µs, measured from the start of each period.
    /// Validated > 0 by the parser.
    pub deadline_us: u64,
}

// ── Vertex ────────────────────────────────────────────────────────────────────

/// One node of a task's DAG (a `V` row): a unit of work released once per
/// period instance, executable on `scores_min..=scores_max` cores.
///
/// # Invariants (enforced by the parser)
/// * `r_min_us <= r_max_us`
/// * `bcet_us.len() == wcet_us.len() == gang_width()`
/// * `bcet_us[k] <= wcet_us[k]` for every index
///
/// The cost arrays are index-aligned with this vertex's own gang range:
/// `bcet_us[0]` is the best-case cost on `scores_min` cores, the last entry
/// the cost on `scores_max` cores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub id: VertexId,

    /// Earliest release offset in µs, relative to the start of the period.
    pub r_min_us: u64,

    /// Latest release offset in µs, relative to the start of the period.
    pub r_max_us: u64,

    /// Best-case execution time per achievable gang size, in µs.
    pub bcet_us: Vec<u64>,

    /// Worst-case execution time per achievable gang size, in µs.
    pub wcet_us: Vec<u64>,

    /// Smallest number of cores this vertex can run on.
    pub scores_min: u32,

    /// Largest number of cores this vertex can run on.
    pub scores_max: u32,
}

impl Vertex {
    /// Number of achievable gang sizes, i.e. the required cost-array length.
    pub fn gang_width(&self) -> usize {
        (self.scores_max - self.scores_min) as usize + 1
    }
}

// ── TaskSet ───────────────────────────────────────────────────────────────────

/// Parsed task file: the task declarations plus each task's ordered vertices.
///
/// Tasks are kept in a `BTreeMap` so every downstream traversal sees them in
/// ascending-id order, independent of declaration order in the file. Vertex
/// lists keep file order, because job-id assignment follows it.
#[derive(Debug, Default)]
pub struct TaskSet {
    tasks: BTreeMap<TaskId, Task>,
    vertices: BTreeMap<TaskId, Vec<Vertex>>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a task declaration. Returns the replaced task, if
    /// any, so callers can log duplicate declarations.
    pub fn insert_task(&mut self, task: Task) -> Option<Task> {
        self.tasks.insert(task.id, task)
    }

    /// Append a vertex to `task_id`'s ordered list. The task need not be
    /// declared yet (or ever); undeclared vertices simply never produce jobs.
    pub fn push_vertex(&mut self, task_id: TaskId, vertex: Vertex) {
        self.vertices.entry(task_id).or_default().push(vertex);
    }

    /// Tasks in ascending-id order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The ordered vertex list of `task_id`; empty if none were declared.
    pub fn vertices_of(&self, task_id: TaskId) -> &[Vertex] {
        self.vertices.get(&task_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All task periods, in ascending-id order.
    pub fn periods(&self) -> Vec<u64> {
        self.tasks.values().map(|t| t.period_us).collect()
    }

    /// Task ids that have vertices but no `T` declaration.
    pub fn undeclared_vertex_tasks(&self) -> Vec<TaskId> {
        self.vertices
            .keys()
            .filter(|tid| !self.tasks.contains_key(tid))
            .copied()
            .collect()
    }
}

// ── Job (output) ──────────────────────────────────────────────────────────────

/// One concrete instance of a vertex within one period instance of its task.
///
/// Produced by the materializer, immutable, and written straight to the job
/// table. The cost arrays and gang range are inherited from the vertex
/// unchanged; arrivals and deadline are absolute (µs since time zero).
///
/// `job_id` is unique within the task and strictly increasing with instance
/// index and vertex order; jobs are identified across the whole set by the
/// `(task_id, job_id)` pair, the same key the edge table uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub task_id: TaskId,
    pub job_id: u64,
    pub arrival_min_us: u64,
    pub arrival_max_us: u64,
    pub bcet_us: Vec<u64>,
    pub wcet_us: Vec<u64>,
    pub deadline_us: u64,
    pub priority: u64,
    pub scores_min: u32,
    pub scores_max: u32,
}

// ── Edge (output) ─────────────────────────────────────────────────────────────

/// A precedence constraint between two jobs, each named by its
/// `(task id, job id)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from_task: TaskId,
    pub from_job: u64,
    pub to_task: TaskId,
    pub to_job: u64,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(id: VertexId, scores_min: u32, scores_max: u32, costs: usize) -> Vertex {
        Vertex {
            id,
            r_min_us: 0,
            r_max_us: 0,
            bcet_us: vec![1; costs],
            wcet_us: vec![2; costs],
            scores_min,
            scores_max,
        }
    }

    // ── Vertex ────────────────────────────────────────────────────────────────

    #[test]
    fn gang_width_single_core() {
        assert_eq!(vertex(1, 1, 1, 1).gang_width(), 1);
    }

    #[test]
    fn gang_width_covers_range_inclusive() {
        // cores 2..=5 → four achievable gang sizes
        assert_eq!(vertex(1, 2, 5, 4).gang_width(), 4);
    }

    // ── TaskSet ───────────────────────────────────────────────────────────────

    #[test]
    fn tasks_iterate_in_ascending_id_order() {
        let mut set = TaskSet::new();
        set.insert_task(Task { id: 7, period_us: 3_000, deadline_us: 3_000 });
        set.insert_task(Task { id: 2, period_us: 1_000, deadline_us: 900 });
        let ids: Vec<TaskId> = set.tasks().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 7]);
        assert_eq!(set.periods(), vec![1_000, 3_000]);
    }

    #[test]
    fn repeated_declaration_replaces_task() {
        let mut set = TaskSet::new();
        assert!(set
            .insert_task(Task { id: 1, period_us: 1_000, deadline_us: 1_000 })
            .is_none());
        let old = set.insert_task(Task { id: 1, period_us: 2_000, deadline_us: 2_000 });
        assert_eq!(old.unwrap().period_us, 1_000);
        assert_eq!(set.task_count(), 1);
        assert_eq!(set.tasks().next().unwrap().period_us, 2_000);
    }

    #[test]
    fn vertices_keep_insertion_order() {
        let mut set = TaskSet::new();
        set.push_vertex(1, vertex(3, 1, 1, 1));
        set.push_vertex(1, vertex(1, 1, 1, 1));
        let ids: Vec<VertexId> = set.vertices_of(1).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn vertices_of_unknown_task_is_empty() {
        let set = TaskSet::new();
        assert!(set.vertices_of(42).is_empty());
    }

    #[test]
    fn undeclared_vertex_tasks_are_reported() {
        let mut set = TaskSet::new();
        set.insert_task(Task { id: 1, period_us: 1_000, deadline_us: 1_000 });
        set.push_vertex(1, vertex(1, 1, 1, 1));
        set.push_vertex(9, vertex(1, 1, 1, 1)); // no T row for task 9
        assert_eq!(set.undeclared_vertex_tasks(), vec![9]);
    }
}
