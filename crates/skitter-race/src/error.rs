//! Error types for the race recorder.

use std::fmt;
use std::io;
use std::time::Duration;

/// Errors produced while staging, racing, or recording a run.
#[derive(Debug)]
pub enum RaceError {
    /// The configuration asked for zero workers.
    ZeroWorkers,
    /// The configuration asked for zero ready events.
    ZeroEvents,
    /// The delay floor is above the delay ceiling.
    EmptyDelayRange { floor: Duration, ceiling: Duration },
    /// The OS refused to spawn a worker thread.
    Spawn(io::Error),
    /// Not every worker reported before the deadline.
    ReportTimeout { reported: u32, expected: u32 },
    /// A worker exited without reporting, so the run can never complete.
    WorkerLost { reported: u32, expected: u32 },
    /// A worker reported and then panicked before exiting.
    WorkerPanicked { id: u32 },
    /// Writing the recorded line to the sink failed.
    Io(io::Error),
}

impl fmt::Display for RaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceError::ZeroWorkers => write!(f, "worker count must be at least 1"),
            RaceError::ZeroEvents => write!(f, "event count must be at least 1"),
            RaceError::EmptyDelayRange { floor, ceiling } => {
                write!(f, "delay floor {:?} exceeds delay ceiling {:?}", floor, ceiling)
            }
            RaceError::Spawn(e) => write!(f, "failed to spawn worker thread: {}", e),
            RaceError::ReportTimeout { reported, expected } => {
                write!(
                    f,
                    "timed out waiting for worker reports ({} of {} arrived)",
                    reported, expected
                )
            }
            RaceError::WorkerLost { reported, expected } => {
                write!(
                    f,
                    "worker exited without reporting ({} of {} arrived)",
                    reported, expected
                )
            }
            RaceError::WorkerPanicked { id } => write!(f, "worker {} panicked", id),
            RaceError::Io(e) => write!(f, "failed to write run order: {}", e),
        }
    }
}

impl std::error::Error for RaceError {}
