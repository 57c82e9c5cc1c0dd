/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Fixed-width tabular output for the job and edge sets.
//!
//! Column layout is part of the external contract and must stay stable:
//!
//! * Jobs: ten columns (task id, job id, arrival min/max, colon-joined cost
//!   arrays, deadline, priority, gang-size min/max). The two id columns are
//!   10 wide, the rest 20; numeric columns are right-aligned, the serialized
//!   cost arrays left-aligned.
//! * Edges: four columns (from task/job id, to task/job id), 8 wide,
//!   right-aligned.
//!
//! Both files are written atomically: the full table is rendered in memory,
//! staged into a temporary file next to the destination, and only then
//! persisted over the target path. A failed run therefore never leaves a
//! truncated table behind.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::info;

use crate::materialize::JobSet;
use crate::task::{Edge, Job};

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the job table, header included.
pub fn render_jobs(jobs: &[Job]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>10}, {:>10}, {:>20}, {:>20}, {:>20}, {:>20}, {:>20}, {:>20}, {:>20}, {:>20}\n",
        "Task ID",
        "Job ID",
        "Arrival min",
        "Arrival max",
        "Cost min(s_i)",
        "Cost max(s_i)",
        "Deadline",
        "Priority",
        "Scores min",
        "Scores max",
    ));
    for job in jobs {
        out.push_str(&format!(
            "{:>10}, {:>10}, {:>20}, {:>20}, {:<20}, {:<20}, {:>20}, {:>20}, {:>20}, {:>20}\n",
            job.task_id,
            job.job_id,
            job.arrival_min_us,
            job.arrival_max_us,
            join_costs(&job.bcet_us),
            join_costs(&job.wcet_us),
            job.deadline_us,
            job.priority,
            job.scores_min,
            job.scores_max,
        ));
    }
    out
}

/// Render the edge table, header included.
pub fn render_edges(edges: &[Edge]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>8}, {:>8}, {:>8}, {:>8}\n",
        "From TID", "From JID", "To TID", "To JID",
    ));
    for edge in edges {
        out.push_str(&format!(
            "{:>8}, {:>8}, {:>8}, {:>8}\n",
            edge.from_task, edge.from_job, edge.to_task, edge.to_job,
        ));
    }
    out
}

/// Serialize a per-gang-size cost array as colon-joined integers.
fn join_costs(costs: &[u64]) -> String {
    costs
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(":")
}

// ── File writing ──────────────────────────────────────────────────────────────

/// Write the job and edge tables to their destination paths.
///
/// Both tables are staged before either is persisted, so an IO failure
/// produces no output artifact at all.
pub fn write_job_set(jobs_path: &Path, edges_path: &Path, set: &JobSet) -> Result<()> {
    let jobs_stage = stage(jobs_path, &render_jobs(&set.jobs))?;
    let edges_stage = stage(edges_path, &render_edges(&set.edges))?;

    persist(jobs_stage, jobs_path)?;
    persist(edges_stage, edges_path)?;

    info!(
        jobs = set.jobs.len(),
        edges = set.edges.len(),
        jobs_file = %jobs_path.display(),
        edges_file = %edges_path.display(),
        "wrote job set"
    );
    Ok(())
}

/// Write `contents` into a temporary file in `path`'s directory.
fn stage(path: &Path, contents: &str) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("cannot create a temporary file in '{}'", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("cannot write staged output for '{}'", path.display()))?;
    Ok(tmp)
}

/// Atomically move a staged file over its destination.
fn persist(tmp: NamedTempFile, path: &Path) -> Result<()> {
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("cannot replace '{}'", path.display()))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn example_job() -> Job {
        Job {
            task_id: 1,
            job_id: 1,
            arrival_min_us: 0,
            arrival_max_us: 0,
            bcet_us: vec![100],
            wcet_us: vec![200],
            deadline_us: 800,
            priority: 800,
            scores_min: 1,
            scores_max: 1,
        }
    }

    /// Split a rendered line into its trimmed column values.
    fn columns(line: &str) -> Vec<&str> {
        line.split(',').map(str::trim).collect()
    }

    // ── job table ─────────────────────────────────────────────────────────────

    #[test]
    fn job_header_names_all_ten_columns() {
        let rendered = render_jobs(&[]);
        let header = rendered.lines().next().unwrap();
        assert_eq!(
            columns(header),
            vec![
                "Task ID",
                "Job ID",
                "Arrival min",
                "Arrival max",
                "Cost min(s_i)",
                "Cost max(s_i)",
                "Deadline",
                "Priority",
                "Scores min",
                "Scores max",
            ]
        );
        assert!(header.starts_with("   Task ID,     Job ID,"));
    }

    #[test]
    fn job_rows_have_the_same_fixed_width_as_the_header() {
        let rendered = render_jobs(&[example_job()]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        // id columns 10 wide, eight 20-wide columns, ", " separators
        let width = 2 * 10 + 8 * 20 + 9 * 2;
        assert_eq!(lines[0].len(), width);
        assert_eq!(lines[1].len(), width);
    }

    #[test]
    fn job_row_fields_match_the_job() {
        let rendered = render_jobs(&[example_job()]);
        let row = rendered.lines().nth(1).unwrap();
        assert_eq!(
            columns(row),
            vec!["1", "1", "0", "0", "100", "200", "800", "800", "1", "1"]
        );
        // numeric columns right-aligned, cost arrays left-aligned
        assert!(row.starts_with("         1,          1,"));
        assert!(row.contains(", 100                 ,"));
    }

    #[test]
    fn multi_entry_cost_arrays_are_colon_joined() {
        let mut job = example_job();
        job.bcet_us = vec![300, 180, 120];
        job.wcet_us = vec![600, 350, 240];
        let rendered = render_jobs(&[job]);
        let row = rendered.lines().nth(1).unwrap();
        let cols = columns(row);
        assert_eq!(cols[4], "300:180:120");
        assert_eq!(cols[5], "600:350:240");
    }

    // ── edge table ────────────────────────────────────────────────────────────

    #[test]
    fn edge_table_renders_header_even_when_empty() {
        let rendered = render_edges(&[]);
        assert_eq!(rendered, "From TID, From JID,   To TID,   To JID\n");
    }

    #[test]
    fn edge_rows_are_right_aligned() {
        let edge = Edge { from_task: 1, from_job: 2, to_task: 1, to_job: 3 };
        let rendered = render_edges(&[edge]);
        let row = rendered.lines().nth(1).unwrap();
        assert_eq!(row, "       1,        2,        1,        3");
    }

    // ── file writing ──────────────────────────────────────────────────────────

    #[test]
    fn write_job_set_creates_both_files_and_nothing_else() {
        let dir = tempfile::tempdir().unwrap();
        let jobs_path = dir.path().join("jobs.csv");
        let edges_path = dir.path().join("edges.csv");

        let set = JobSet { jobs: vec![example_job()], edges: Vec::new() };
        write_job_set(&jobs_path, &edges_path, &set).unwrap();

        let jobs_text = std::fs::read_to_string(&jobs_path).unwrap();
        assert_eq!(jobs_text, render_jobs(&set.jobs));
        let edges_text = std::fs::read_to_string(&edges_path).unwrap();
        assert_eq!(edges_text, render_edges(&[]));

        // no staging residue left behind
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 2);
    }

    #[test]
    fn write_job_set_replaces_existing_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let jobs_path = dir.path().join("jobs.csv");
        let edges_path = dir.path().join("edges.csv");
        std::fs::write(&jobs_path, "stale").unwrap();
        std::fs::write(&edges_path, "stale").unwrap();

        let set = JobSet { jobs: vec![example_job()], edges: Vec::new() };
        write_job_set(&jobs_path, &edges_path, &set).unwrap();

        let jobs_text = std::fs::read_to_string(&jobs_path).unwrap();
        assert!(jobs_text.starts_with("   Task ID,"));
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("jobs.csv");
        let edges_path = dir.path().join("edges.csv");
        let set = JobSet::default();
        assert!(write_job_set(&missing, &edges_path, &set).is_err());
    }
}
