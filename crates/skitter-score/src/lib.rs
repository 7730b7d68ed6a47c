//! Entropy scorer for recorded run-order corpora.
//!
//! Feed it a file of run-order lines (one recording run per line) and it
//! answers one question: across all these runs, how many distinct orders
//! showed up? The answer folds into a score on `0..=100`, where `0` means
//! the host scheduled identical work identically every time and `100` means
//! no two runs agreed.
//!
//! ## Modules
//!
//! - [`corpus`]: one-pass line scanner (total and distinct counts)
//! - [`report`]: the score formula and the printable/serializable report
//! - [`error`]: scorer errors

pub mod corpus;
pub mod error;
pub mod report;

// Re-export the surface most callers need.
pub use corpus::{scan_corpus, CorpusSummary};
pub use error::ScoreError;
pub use report::{entropy_score, ScoreReport};
