/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Priority assignment policies.
//!
//! Four policies map a job to its numeric priority value (smaller value =
//! more urgent; downstream consumers sort on it):
//!
//! | Policy | Kind    | Priority value |
//! |--------|---------|----------------|
//! | EDF    | dynamic | the job's absolute deadline |
//! | RM     | static  | task rank by ascending period |
//! | DM     | static  | task rank by ascending relative deadline |
//! | FP     | static  | the task id itself |
//!
//! The static policies need global knowledge of every task's period or
//! deadline, so [`PriorityResolver::new`] builds their rank tables once from
//! the full task set, before any job exists. The resolver is an immutable
//! value passed by reference into the materializer; there is no hidden shared
//! state, and each policy can be exercised in isolation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::task::{TaskId, TaskSet};

// ── Policy enum ───────────────────────────────────────────────────────────────

/// Job priority assignment policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityPolicy {
    /// Earliest Deadline First.
    #[default]
    Edf,
    /// Rate Monotonic.
    Rm,
    /// Deadline Monotonic.
    Dm,
    /// Fixed priority by task id.
    Fp,
}

impl PriorityPolicy {
    /// Canonical external name, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            PriorityPolicy::Edf => "EDF",
            PriorityPolicy::Rm => "RM",
            PriorityPolicy::Dm => "DM",
            PriorityPolicy::Fp => "FP",
        }
    }
}

impl fmt::Display for PriorityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rejection of a policy name outside the closed set. Unreachable through the
/// CLI (clap enforces the choice set) but defined for programmatic callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("unknown priority policy '{0}' (valid: EDF, RM, DM, FP)")]
    InvalidPolicy(String),
}

impl FromStr for PriorityPolicy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EDF" => Ok(PriorityPolicy::Edf),
            "RM" => Ok(PriorityPolicy::Rm),
            "DM" => Ok(PriorityPolicy::Dm),
            "FP" => Ok(PriorityPolicy::Fp),
            other => Err(PolicyError::InvalidPolicy(other.to_string())),
        }
    }
}

// ── Resolver ──────────────────────────────────────────────────────────────────

/// Precomputed priority lookup for one run.
///
/// For RM/DM the rank table is built here, once, from the complete task set;
/// for EDF/FP it stays empty. `priority()` then answers for any job without
/// further global knowledge.
#[derive(Debug)]
pub struct PriorityResolver {
    policy: PriorityPolicy,
    rank: BTreeMap<TaskId, u64>,
}

impl PriorityResolver {
    /// Build the resolver for `policy` over the full task set.
    pub fn new(policy: PriorityPolicy, tasks: &TaskSet) -> Self {
        let rank = match policy {
            PriorityPolicy::Rm => rank_table(tasks.tasks().map(|t| (t.id, t.period_us))),
            PriorityPolicy::Dm => rank_table(tasks.tasks().map(|t| (t.id, t.deadline_us))),
            PriorityPolicy::Edf | PriorityPolicy::Fp => BTreeMap::new(),
        };
        Self { policy, rank }
    }

    pub fn policy(&self) -> PriorityPolicy {
        self.policy
    }

    /// The uniform priority function: every policy answers through this one
    /// signature, so the materializer never branches on the active policy.
    /// The period parameter is part of the shared call shape; no current
    /// policy consumes it directly (RM reads periods from its table instead).
    pub fn priority(&self, task_id: TaskId, absolute_deadline_us: u64, _period_us: u64) -> u64 {
        match self.policy {
            PriorityPolicy::Edf => absolute_deadline_us,
            PriorityPolicy::Rm | PriorityPolicy::Dm => {
                // Tasks outside the build set sort last
                self.rank.get(&task_id).copied().unwrap_or(u64::MAX)
            }
            PriorityPolicy::Fp => u64::from(task_id),
        }
    }
}

/// Rank tasks by ascending parameter value, ties broken by ascending task id.
/// Rank 1 is the highest priority.
fn rank_table<I>(params: I) -> BTreeMap<TaskId, u64>
where
    I: IntoIterator<Item = (TaskId, u64)>,
{
    let mut ordered: Vec<(u64, TaskId)> = params.into_iter().map(|(id, v)| (v, id)).collect();
    ordered.sort_unstable();
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, (_, id))| (id, i as u64 + 1))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    fn task_set(tasks: &[(TaskId, u64, u64)]) -> TaskSet {
        let mut set = TaskSet::new();
        for &(id, period_us, deadline_us) in tasks {
            set.insert_task(Task { id, period_us, deadline_us });
        }
        set
    }

    // ── parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn policy_names_round_trip() {
        for policy in [
            PriorityPolicy::Edf,
            PriorityPolicy::Rm,
            PriorityPolicy::Dm,
            PriorityPolicy::Fp,
        ] {
            assert_eq!(policy.name().parse::<PriorityPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn unknown_policy_name_is_rejected() {
        let err = "LLF".parse::<PriorityPolicy>().unwrap_err();
        assert_eq!(err, PolicyError::InvalidPolicy("LLF".to_string()));
    }

    #[test]
    fn lowercase_names_are_not_accepted() {
        assert!("edf".parse::<PriorityPolicy>().is_err());
    }

    // ── EDF ───────────────────────────────────────────────────────────────────

    #[test]
    fn edf_priority_is_the_absolute_deadline() {
        let set = task_set(&[(1, 1_000, 800)]);
        let resolver = PriorityResolver::new(PriorityPolicy::Edf, &set);
        assert_eq!(resolver.priority(1, 800, 1_000), 800);
        assert_eq!(resolver.priority(1, 1_800, 1_000), 1_800);
    }

    // ── RM ────────────────────────────────────────────────────────────────────

    #[test]
    fn rm_ranks_by_ascending_period() {
        let set = task_set(&[(1, 5_000, 5_000), (2, 1_000, 1_000), (3, 3_000, 3_000)]);
        let resolver = PriorityResolver::new(PriorityPolicy::Rm, &set);
        // shortest period → rank 1
        assert_eq!(resolver.priority(2, 0, 0), 1);
        assert_eq!(resolver.priority(3, 0, 0), 2);
        assert_eq!(resolver.priority(1, 0, 0), 3);
    }

    #[test]
    fn rm_equal_periods_tie_break_by_task_id() {
        let set = task_set(&[(9, 2_000, 2_000), (4, 2_000, 2_000)]);
        let resolver = PriorityResolver::new(PriorityPolicy::Rm, &set);
        assert_eq!(resolver.priority(4, 0, 0), 1);
        assert_eq!(resolver.priority(9, 0, 0), 2);
    }

    #[test]
    fn rm_priority_ignores_the_job_deadline() {
        let set = task_set(&[(1, 1_000, 1_000), (2, 2_000, 2_000)]);
        let resolver = PriorityResolver::new(PriorityPolicy::Rm, &set);
        // same rank for every instance, whatever its absolute deadline
        assert_eq!(resolver.priority(1, 1_000, 1_000), resolver.priority(1, 9_000, 1_000));
    }

    // ── DM ────────────────────────────────────────────────────────────────────

    #[test]
    fn dm_ranks_by_ascending_relative_deadline() {
        // periods would give the opposite order
        let set = task_set(&[(1, 1_000, 900), (2, 5_000, 400)]);
        let resolver = PriorityResolver::new(PriorityPolicy::Dm, &set);
        assert_eq!(resolver.priority(2, 0, 0), 1);
        assert_eq!(resolver.priority(1, 0, 0), 2);
    }

    #[test]
    fn dm_equal_deadlines_tie_break_by_task_id() {
        let set = task_set(&[(8, 3_000, 1_000), (3, 9_000, 1_000)]);
        let resolver = PriorityResolver::new(PriorityPolicy::Dm, &set);
        assert_eq!(resolver.priority(3, 0, 0), 1);
        assert_eq!(resolver.priority(8, 0, 0), 2);
    }

    // ── FP ────────────────────────────────────────────────────────────────────

    #[test]
    fn fp_priority_is_the_task_id() {
        let set = task_set(&[(7, 1_000, 1_000)]);
        let resolver = PriorityResolver::new(PriorityPolicy::Fp, &set);
        assert_eq!(resolver.priority(7, 12_345, 1_000), 7);
    }

    // ── table construction ────────────────────────────────────────────────────

    #[test]
    fn unknown_task_ranks_last_under_static_policies() {
        let set = task_set(&[(1, 1_000, 1_000)]);
        let resolver = PriorityResolver::new(PriorityPolicy::Rm, &set);
        assert_eq!(resolver.priority(99, 0, 0), u64::MAX);
    }

    #[test]
    fn rank_table_is_dense_from_one() {
        let table = rank_table([(10, 300), (20, 100), (30, 200)]);
        let mut ranks: Vec<u64> = table.values().copied().collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(table[&20], 1);
    }
}
