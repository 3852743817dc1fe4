//! Threshold evaluation for a query count.
//!
//! Pure logic. Comparisons are strict and critical is checked before
//! warning, in both directions. Bounds are not validated against each other:
//! a critical bound that is looser than the warning bound simply makes
//! critical win whenever both match.

use serde::Serialize;

use crate::status::CheckStatus;

/// Warning/critical bounds for a single check run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThresholdConfig {
    pub warning: i64,
    pub critical: i64,
    /// Treat the bounds as lower limits (`count < bound` breaches).
    pub invert: bool,
    /// Print every matched document before the verdict line.
    pub include_results: bool,
}

/// Which direction a bound was crossed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Above,
    Below,
}

/// The bound a count crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Breach {
    pub direction: Direction,
    pub threshold: i64,
}

/// Outcome of evaluating a count. `status` is never `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub status: CheckStatus,
    pub count: u64,
    /// `None` when the count is within bounds.
    pub breach: Option<Breach>,
    pub message: String,
}

impl Verdict {
    fn ok(count: u64) -> Self {
        Self {
            status: CheckStatus::Ok,
            count,
            breach: None,
            message: format!("Query count ({count}) was ok."),
        }
    }

    fn breached(status: CheckStatus, count: u64, direction: Direction, threshold: i64) -> Self {
        let side = match direction {
            Direction::Above => "above",
            Direction::Below => "below",
        };
        let level = match status {
            CheckStatus::Critical => "critical",
            _ => "warning",
        };
        Self {
            status,
            count,
            breach: Some(Breach {
                direction,
                threshold,
            }),
            message: format!("Query count ({count}) was {side} {level} threshold."),
        }
    }
}

/// Classify `count` against `cfg`. Total; first matching rule wins.
pub fn evaluate(count: u64, cfg: &ThresholdConfig) -> Verdict {
    // Counts past i64::MAX cannot be stored by MongoDB anyway.
    let value = i64::try_from(count).unwrap_or(i64::MAX);

    if cfg.invert {
        if value < cfg.critical {
            Verdict::breached(CheckStatus::Critical, count, Direction::Below, cfg.critical)
        } else if value < cfg.warning {
            Verdict::breached(CheckStatus::Warning, count, Direction::Below, cfg.warning)
        } else {
            Verdict::ok(count)
        }
    } else if value > cfg.critical {
        Verdict::breached(CheckStatus::Critical, count, Direction::Above, cfg.critical)
    } else if value > cfg.warning {
        Verdict::breached(CheckStatus::Warning, count, Direction::Above, cfg.warning)
    } else {
        Verdict::ok(count)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
