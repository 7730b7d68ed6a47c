//! Worker-race recorder for the Skitter scheduling-entropy harness.
//!
//! One call to [`record_race`] races N worker threads. Each worker picks one
//! of K always-ready events and then sleeps a short random delay before
//! reporting to a collector; once all N reports are in, the collector writes
//! the arrival order as a single corpus line. Over many runs, the spread of
//! distinct lines measures how much scheduling freedom the host gives
//! identical concurrent work.
//!
//! ## Modules
//!
//! - [`choice`]: uniform choice among simultaneously-ready events
//! - [`config`]: run tunables and validation
//! - [`recorder`]: the race protocol (spawn, delay, report, collect)
//! - [`trace`]: the one-line run-order format and its parser
//! - [`error`]: everything that can go wrong with a run

pub mod choice;
pub mod config;
pub mod error;
pub mod recorder;
pub mod trace;

// Re-export the surface most callers need.
pub use choice::ReadyEvents;
pub use config::{
    RaceConfig, DEFAULT_EVENTS, DEFAULT_MAX_DELAY_MS, DEFAULT_REPORT_TIMEOUT_MS, DEFAULT_WORKERS,
};
pub use error::RaceError;
pub use recorder::record_race;
pub use trace::{RunOrder, TokenStyle, TraceError, WorkerResult};
