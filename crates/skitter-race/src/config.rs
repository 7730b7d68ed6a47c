//! Recorder configuration.

use std::time::Duration;

use crate::error::RaceError;
use crate::trace::TokenStyle;

/// Default number of racing workers.
pub const DEFAULT_WORKERS: u32 = 2;

/// Default number of always-ready events each worker chooses among.
pub const DEFAULT_EVENTS: u32 = 4;

/// Default upper bound of the randomized pre-report delay, in milliseconds.
pub const DEFAULT_MAX_DELAY_MS: u64 = 5;

/// Default deadline for collecting all worker reports, in milliseconds.
pub const DEFAULT_REPORT_TIMEOUT_MS: u64 = 5_000;

/// Tunables for one recording run.
///
/// The defaults match the smallest interesting race: two workers, four
/// candidate events, and a few milliseconds of jitter. A run with one worker
/// is legal but can only ever produce one order.
#[derive(Debug, Clone)]
pub struct RaceConfig {
    /// How many workers race in this run.
    pub workers: u32,
    /// How many always-ready events each worker picks among.
    pub events: u32,
    /// Lower bound of the randomized delay each worker sleeps before reporting.
    pub delay_floor: Duration,
    /// Upper bound of the randomized delay (inclusive).
    pub delay_ceiling: Duration,
    /// How long the collector waits for all reports before giving up.
    pub report_timeout: Duration,
    /// Shape of the per-worker tokens in the recorded line.
    pub style: TokenStyle,
}

impl Default for RaceConfig {
    fn default() -> Self {
        RaceConfig {
            workers: DEFAULT_WORKERS,
            events: DEFAULT_EVENTS,
            delay_floor: Duration::ZERO,
            delay_ceiling: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            report_timeout: Duration::from_millis(DEFAULT_REPORT_TIMEOUT_MS),
            style: TokenStyle::Bare,
        }
    }
}

impl RaceConfig {
    /// Default configuration for `workers` racing workers.
    pub fn new(workers: u32) -> Self {
        RaceConfig { workers, ..RaceConfig::default() }
    }

    /// Rejects configurations that cannot produce a run.
    pub fn validate(&self) -> Result<(), RaceError> {
        if self.workers == 0 {
            return Err(RaceError::ZeroWorkers);
        }
        if self.events == 0 {
            return Err(RaceError::ZeroEvents);
        }
        if self.delay_floor > self.delay_ceiling {
            return Err(RaceError::EmptyDelayRange {
                floor: self.delay_floor,
                ceiling: self.delay_ceiling,
            });
        }
        Ok(())
    }
}
