/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! dag2jobs – expands a periodic DAG task description into the concrete job
//! set covering one hyperperiod.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task         – Task / Vertex / TaskSet input model, Job / Edge output model
//! ├── parser       – row-tagged task-file parsing (T / V rows)
//! ├── hyperperiod  – LCM / GCD helpers
//! ├── priority     – EDF / RM / DM / FP priority assignment
//! ├── materialize  – task unrolling and job-id assignment
//! └── output       – fixed-width job / edge tables, atomic writes
//! ```
//!
//! The pipeline is strictly forward: parse, compute the hyperperiod, build
//! the priority resolver, materialize, write. Any failure aborts the run
//! before an output file is produced.

pub mod hyperperiod;
pub mod materialize;
pub mod output;
pub mod parser;
pub mod priority;
pub mod task;
