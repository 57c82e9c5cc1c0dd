/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the task-file parser.
//!
//! Every malformed-row variant carries the 1-based line number, the raw row
//! text, and a reason string naming the violated constraint, so the CLI can
//! print the offending record without re-reading the file. All variants are
//! fatal: the parser never returns a partial [`TaskSet`].
//!
//! [`TaskSet`]: crate::task::TaskSet

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading and validating a task file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The task file could not be read at all.
    #[error("cannot read task file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `T` row violated the task constraints (field count, non-negative
    /// integer id, strictly positive period and deadline).
    #[error("malformed task row at line {line}: {reason} (row: '{row}')")]
    MalformedTaskRow {
        line: usize,
        row: String,
        reason: String,
    },

    /// A `V` row violated the vertex constraints (release-offset ordering,
    /// cost-array lengths and ordering, gang-size bounds).
    #[error("malformed vertex row at line {line}: {reason} (row: '{row}')")]
    MalformedVertexRow {
        line: usize,
        row: String,
        reason: String,
    },

    /// The leading discriminator was neither `T` nor `V`.
    #[error("unknown row tag '{tag}' at line {line} (row: '{row}')")]
    UnknownRowTag {
        line: usize,
        tag: String,
        row: String,
    },
}
