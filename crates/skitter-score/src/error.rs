//! Error types for the scorer.

use std::fmt;
use std::io;

/// Errors produced while reading or scoring a corpus.
#[derive(Debug)]
pub enum ScoreError {
    /// The corpus holds fewer than two runs, so spread is undefined.
    InsufficientSamples { total: u64 },
    /// Reading the corpus failed.
    Io(io::Error),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::InsufficientSamples { total } => {
                write!(
                    f,
                    "insufficient samples: need at least 2 recorded runs, found {}",
                    total
                )
            }
            ScoreError::Io(e) => write!(f, "failed to read corpus: {}", e),
        }
    }
}

impl std::error::Error for ScoreError {}
