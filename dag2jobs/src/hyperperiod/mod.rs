//! Hyperperiod calculation.
//!
//! The hyperperiod of a periodic task set is the Least Common Multiple of all
//! task periods: the smallest window after which the release pattern of every
//! task repeats. It bounds how many instances of each task the materializer
//! unrolls, so it must exist and be finite before any job is generated.
//!
//! An empty task set has no meaningful hyperperiod; that case is a named
//! error rather than a silent identity value, so a file without a single `T`
//! row fails loudly instead of producing an empty-but-plausible job table.

pub mod math;

use thiserror::Error;
use tracing::debug;

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors that can occur during hyperperiod calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HyperperiodError {
    /// No task periods were supplied.
    #[error("cannot compute a hyperperiod for an empty task set")]
    EmptyTaskSet,

    /// LCM calculation overflowed `u64`. Carries the two operands so the
    /// caller can log a useful message.
    #[error("LCM overflow while combining periods {a}us and {b}us")]
    Overflow { a: u64, b: u64 },
}

// ── Calculation ───────────────────────────────────────────────────────────────

/// Fold the period set into its overall LCM, starting from the identity `1`.
///
/// # Errors
/// * [`HyperperiodError::EmptyTaskSet`] for an empty slice.
/// * [`HyperperiodError::Overflow`] if the running LCM exceeds `u64`.
pub fn hyperperiod(periods: &[u64]) -> Result<u64, HyperperiodError> {
    if periods.is_empty() {
        return Err(HyperperiodError::EmptyTaskSet);
    }

    let h = periods.iter().try_fold(1u64, |acc, &p| math::lcm(acc, p))?;

    debug!(hyperperiod_us = h, periods = periods.len(), "computed hyperperiod");
    Ok(h)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
