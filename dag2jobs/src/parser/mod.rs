//! Row-tagged task-file parsing.
//!
//! The input is one record per line, comma-separated, with optional
//! whitespace around every field. Two record kinds exist:
//!
//! ```text
//! T,<task_id>,<period_ms>,<deadline_ms>
//! V,<task_id>,<vertex_id>,<r_min_ms>,<r_max_ms>,<bcet:list>,<wcet:list>[,<scores_min>,<scores_max>]
//! ```
//!
//! Time fields are fractional milliseconds; they are scaled to integer
//! microseconds by rounding up, so a non-zero duration never collapses to
//! zero. The BCET/WCET lists are colon-delimited, one entry per achievable
//! gang size. When the two trailing gang-size fields are absent, both default
//! to the caller-supplied fixed core count.
//!
//! Every constraint violation is a typed [`ParseError`] carrying the line
//! number and the raw row; the first violation aborts the parse.

pub mod error;

pub use error::ParseError;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::task::{Task, TaskId, TaskSet, Vertex, VertexId};

// ── Unit scaling ──────────────────────────────────────────────────────────────

const MS_TO_US: f64 = 1000.0;

/// Scale a millisecond quantity to whole microseconds, rounding up.
/// Callers must ensure `ms` is non-negative and finite.
fn ms_to_us(ms: f64) -> u64 {
    (MS_TO_US * ms).ceil() as u64
}

/// Parse a strictly positive millisecond field, scaled to µs.
/// Rejects non-numeric input, zero, negatives, NaN and infinities.
fn parse_positive_ms(field: &str) -> Option<u64> {
    let ms: f64 = field.parse().ok()?;
    if ms > 0.0 && ms.is_finite() {
        Some(ms_to_us(ms))
    } else {
        None
    }
}

/// Parse a non-negative millisecond field (offsets and costs may be zero),
/// scaled to µs.
fn parse_offset_ms(field: &str) -> Option<u64> {
    let ms: f64 = field.parse().ok()?;
    if ms >= 0.0 && ms.is_finite() {
        Some(ms_to_us(ms))
    } else {
        None
    }
}

/// Parse a colon-delimited list of non-negative millisecond costs.
fn parse_cost_list(field: &str) -> Option<Vec<u64>> {
    field.split(':').map(parse_offset_ms).collect()
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Read and parse `path`, returning the validated [`TaskSet`].
///
/// `fixed_scores` is the gang size assumed for vertices that omit explicit
/// bounds.
pub fn parse_task_file(path: &Path, fixed_scores: u32) -> Result<TaskSet, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let set = parse_rows(content.lines(), fixed_scores)?;
    info!(
        path = %path.display(),
        tasks = set.task_count(),
        "parsed task file"
    );
    Ok(set)
}

/// Parse an in-memory sequence of rows. Blank lines are skipped.
pub fn parse_rows<'a, I>(rows: I, fixed_scores: u32) -> Result<TaskSet, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut set = TaskSet::new();

    for (index, raw) in rows.into_iter().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = raw.split(',').map(str::trim).collect();

        match fields[0] {
            "T" => {
                let task = parse_task_row(line, raw, &fields)?;
                if set.insert_task(task).is_some() {
                    debug!(task_id = task.id, line, "task re-declared, replacing earlier row");
                }
            }
            "V" => {
                let (task_id, vertex) = parse_vertex_row(line, raw, &fields, fixed_scores)?;
                set.push_vertex(task_id, vertex);
            }
            tag => {
                return Err(ParseError::UnknownRowTag {
                    line,
                    tag: tag.to_string(),
                    row: raw.to_string(),
                });
            }
        }
    }

    for task_id in set.undeclared_vertex_tasks() {
        warn!(task_id, "vertex rows reference an undeclared task and will not produce jobs");
    }

    Ok(set)
}

// ── Row parsers ───────────────────────────────────────────────────────────────

fn parse_task_row(line: usize, raw: &str, fields: &[&str]) -> Result<Task, ParseError> {
    let err = |reason: String| ParseError::MalformedTaskRow {
        line,
        row: raw.to_string(),
        reason,
    };

    // Extra fields are tolerated and ignored.
    if fields.len() < 4 {
        return Err(err(format!("expected 4 fields, found {}", fields.len())));
    }

    let id: TaskId = fields[1]
        .parse()
        .map_err(|_| err(format!("task id '{}' is not a non-negative integer", fields[1])))?;

    let period_us = parse_positive_ms(fields[2]).ok_or_else(|| {
        err(format!("period '{}' is not a positive number of milliseconds", fields[2]))
    })?;

    let deadline_us = parse_positive_ms(fields[3]).ok_or_else(|| {
        err(format!("deadline '{}' is not a positive number of milliseconds", fields[3]))
    })?;

    Ok(Task { id, period_us, deadline_us })
}

fn parse_vertex_row(
    line: usize,
    raw: &str,
    fields: &[&str],
    fixed_scores: u32,
) -> Result<(TaskId, Vertex), ParseError> {
    let err = |reason: String| ParseError::MalformedVertexRow {
        line,
        row: raw.to_string(),
        reason,
    };

    if fields.len() < 7 {
        return Err(err(format!("expected at least 7 fields, found {}", fields.len())));
    }

    let task_id: TaskId = fields[1]
        .parse()
        .map_err(|_| err(format!("task id '{}' is not a non-negative integer", fields[1])))?;

    let id: VertexId = fields[2]
        .parse()
        .map_err(|_| err(format!("vertex id '{}' is not a non-negative integer", fields[2])))?;

    let r_min_us = parse_offset_ms(fields[3]).ok_or_else(|| {
        err(format!("earliest release '{}' is not a non-negative number", fields[3]))
    })?;
    let r_max_us = parse_offset_ms(fields[4]).ok_or_else(|| {
        err(format!("latest release '{}' is not a non-negative number", fields[4]))
    })?;
    if r_min_us > r_max_us {
        return Err(err(format!(
            "earliest release {r_min_us}us exceeds latest release {r_max_us}us"
        )));
    }

    let bcet_us = parse_cost_list(fields[5])
        .ok_or_else(|| err(format!("BCET list '{}' contains a non-numeric entry", fields[5])))?;
    let wcet_us = parse_cost_list(fields[6])
        .ok_or_else(|| err(format!("WCET list '{}' contains a non-numeric entry", fields[6])))?;

    if bcet_us.len() != wcet_us.len() {
        return Err(err(format!(
            "BCET and WCET lists differ in length ({} vs {})",
            bcet_us.len(),
            wcet_us.len()
        )));
    }
    for (k, (&b, &w)) in bcet_us.iter().zip(wcet_us.iter()).enumerate() {
        if b > w {
            return Err(err(format!(
                "BCET exceeds WCET at gang-size index {k} ({b}us > {w}us)"
            )));
        }
    }

    // Both gang-size bounds must be present to take effect; a partial tail
    // (only one of the two fields) falls back to the fixed core count.
    let (scores_min, scores_max) = if fields.len() >= 9 {
        let scores_min: u32 = fields[7]
            .parse()
            .map_err(|_| err(format!("gang-size minimum '{}' is not an integer", fields[7])))?;
        let scores_max: u32 = fields[8]
            .parse()
            .map_err(|_| err(format!("gang-size maximum '{}' is not an integer", fields[8])))?;
        (scores_min, scores_max)
    } else {
        (fixed_scores, fixed_scores)
    };

    if scores_max < scores_min {
        return Err(err(format!(
            "gang-size maximum {scores_max} is below minimum {scores_min}"
        )));
    }

    let vertex = Vertex {
        id,
        r_min_us,
        r_max_us,
        bcet_us,
        wcet_us,
        scores_min,
        scores_max,
    };
    if vertex.bcet_us.len() != vertex.gang_width() {
        return Err(err(format!(
            "{} cost entries for gang sizes {}..={} (expected {})",
            vertex.bcet_us.len(),
            scores_min,
            scores_max,
            vertex.gang_width()
        )));
    }

    Ok((task_id, vertex))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
