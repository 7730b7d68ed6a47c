//! Entropy scoring and the printable report.
//!
//! The score maps a corpus summary onto `0..=100`:
//!
//! - `0`: every run produced the same line (fully deterministic host),
//! - `100`: no two runs produced the same line,
//! - in between it grows linearly, `(distinct - 1) / (total - 1) * 100`.
//!
//! A corpus of zero or one runs carries no spread information at all, so
//! scoring one is an error rather than a misleading hard `0`.

use std::fmt;

use serde::Serialize;

use crate::corpus::CorpusSummary;
use crate::error::ScoreError;

/// Maps distinct/total line counts onto the `0..=100` entropy scale.
pub fn entropy_score(distinct: u64, total: u64) -> Result<f64, ScoreError> {
    if total < 2 {
        return Err(ScoreError::InsufficientSamples { total });
    }
    // distinct can be 0 only in a hand-built summary; clamp rather than wrap.
    let spread = distinct.saturating_sub(1) as f64;
    Ok(spread / (total - 1) as f64 * 100.0)
}

/// A scored corpus, ready for terminal or JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreReport {
    pub distinct: u64,
    pub total: u64,
    pub score: f64,
}

impl ScoreReport {
    /// Scores a scanned corpus.
    pub fn from_summary(summary: &CorpusSummary) -> Result<ScoreReport, ScoreError> {
        let score = entropy_score(summary.distinct, summary.total)?;
        Ok(ScoreReport { distinct: summary.distinct, total: summary.total, score })
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} distinct executions out of {} executions: score: {:.2}%",
            self.distinct, self.total, self.score
        )
    }
}
