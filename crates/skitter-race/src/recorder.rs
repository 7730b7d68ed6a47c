//! The race itself: spawn, choose, delay, report, collect.
//!
//! ## Protocol
//!
//! One recording run races `workers` OS threads. Each worker:
//!
//! 1. picks one of `events` always-ready events ([`ReadyEvents::choose`]),
//! 2. sleeps a random delay drawn from `[delay_floor, delay_ceiling]`,
//! 3. reports its id (and choice, for choice-style runs) and exits.
//!
//! The collector owns the sole receiver of a channel whose capacity equals
//! the worker count, so a report never blocks a worker. It drains exactly
//! `workers` reports under one deadline; the drain doubles as the barrier,
//! since the run is complete precisely when the last report arrives.
//!
//! ## Failure containment
//!
//! A harness built to observe schedulers must not itself hang on a stuck
//! worker. Every collector wait is bounded by `report_timeout`: on expiry
//! the run is abandoned with [`RaceError::ReportTimeout`] and the straggler
//! threads are detached rather than joined, because a join would block on
//! the very thread that missed the deadline. Workers that exit without
//! reporting surface as [`RaceError::WorkerLost`] the moment the channel
//! disconnects.
//!
//! Nothing reaches the sink until every report is in; a failed run leaves
//! the corpus untouched.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use rand::Rng;

use crate::choice::ReadyEvents;
use crate::config::RaceConfig;
use crate::error::RaceError;
use crate::trace::{RunOrder, TokenStyle, WorkerResult};

/// Races the configured workers once and appends the arrival order to `sink`.
///
/// The recorded line (token text plus one newline) goes out in a single
/// `write_all`, so recorders appending to the same file never interleave
/// within a line. Returns the order for callers that want the structure
/// as well as the bytes.
pub fn record_race(config: &RaceConfig, sink: &mut dyn Write) -> Result<RunOrder, RaceError> {
    config.validate()?;

    let workers = config.workers;
    // Capacity equals the worker count so no report can ever block.
    let (report_tx, report_rx) = bounded::<WorkerResult>(workers as usize);

    let mut handles = Vec::with_capacity(workers as usize);
    for id in 0..workers {
        let tx = report_tx.clone();
        let events = config.events;
        let style = config.style;
        let delay_floor = config.delay_floor;
        let delay_span = config.delay_ceiling - config.delay_floor;
        let handle = thread::Builder::new()
            .name(format!("skitter-worker-{}", id))
            .spawn(move || run_worker(id, events, style, delay_floor, delay_span, tx))
            .map_err(RaceError::Spawn)?;
        handles.push(handle);
    }
    // Only workers hold senders now: a disconnect means every outstanding
    // worker is gone.
    drop(report_tx);

    let deadline = Instant::now() + config.report_timeout;
    let mut results = Vec::with_capacity(workers as usize);
    while results.len() < workers as usize {
        match report_rx.recv_deadline(deadline) {
            Ok(result) => results.push(result),
            Err(RecvTimeoutError::Timeout) => {
                return Err(RaceError::ReportTimeout {
                    reported: results.len() as u32,
                    expected: workers,
                });
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(RaceError::WorkerLost {
                    reported: results.len() as u32,
                    expected: workers,
                });
            }
        }
    }

    // Every worker has reported, so these joins are prompt.
    for (id, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            return Err(RaceError::WorkerPanicked { id: id as u32 });
        }
    }

    let order = RunOrder::new(results);
    debug_assert!(
        order.is_permutation(workers),
        "collector drained a non-permutation of worker ids"
    );

    let mut line = order.to_line();
    line.push('\n');
    sink.write_all(line.as_bytes()).map_err(RaceError::Io)?;
    sink.flush().map_err(RaceError::Io)?;
    Ok(order)
}

fn run_worker(
    id: u32,
    events: u32,
    style: TokenStyle,
    delay_floor: Duration,
    delay_span: Duration,
    reports: Sender<WorkerResult>,
) {
    let choice = ReadyEvents::stage(events).choose();

    let span_micros = delay_span.as_micros() as u64;
    let jitter = if span_micros == 0 {
        0
    } else {
        rand::rng().random_range(0..=span_micros)
    };
    thread::sleep(delay_floor + Duration::from_micros(jitter));

    let result = WorkerResult {
        id,
        choice: match style {
            TokenStyle::Choice => Some(choice),
            TokenStyle::Bare => None,
        },
    };
    // A send can only fail once the collector has abandoned the run.
    let _ = reports.send(result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn fast_config(workers: u32) -> RaceConfig {
        RaceConfig {
            workers,
            delay_ceiling: Duration::from_millis(1),
            ..RaceConfig::default()
        }
    }

    #[test]
    fn test_record_writes_one_newline_terminated_line() {
        let mut sink = Vec::new();
        let order = record_race(&fast_config(2), &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert!(text.ends_with('\n'), "line must end with a newline");
        assert_eq!(text.lines().count(), 1);
        assert_eq!(text.trim_end_matches('\n'), order.to_line());
    }

    #[test]
    fn test_recorded_line_is_a_permutation_of_worker_ids() {
        for workers in [1, 2, 5, 8] {
            let mut sink = Vec::new();
            record_race(&fast_config(workers), &mut sink).unwrap();
            let text = String::from_utf8(sink).unwrap();
            let order = RunOrder::parse(text.trim_end()).unwrap();
            assert!(
                order.is_permutation(workers),
                "'{}' is not a permutation of {} worker ids",
                text.trim_end(),
                workers
            );
        }
    }

    #[test]
    fn test_choice_style_records_in_range_choices() {
        let config = RaceConfig { style: TokenStyle::Choice, ..fast_config(4) };
        let mut sink = Vec::new();
        let order = record_race(&config, &mut sink).unwrap();
        for result in order.results() {
            let choice = result.choice.expect("choice style must record a choice");
            assert!(choice < config.events, "choice {} out of range", choice);
        }
    }

    #[test]
    fn test_recorded_choices_vary_across_runs() {
        // Every worker thread is fresh, so this exercises first-select
        // choices end to end. 40 runs with 2 workers record 80 choices over
        // four events; all landing on one event has probability 4 * (1/4)^80.
        let config = RaceConfig { style: TokenStyle::Choice, ..fast_config(2) };
        let mut seen = HashSet::new();
        for _ in 0..40 {
            let mut sink = Vec::new();
            let order = record_race(&config, &mut sink).unwrap();
            for result in order.results() {
                seen.insert(result.choice.expect("choice style must record a choice"));
            }
        }
        assert!(
            seen.len() >= 2,
            "all recorded choices pinned to one event: {:?}",
            seen
        );
    }

    #[test]
    fn test_bare_style_records_no_choices() {
        let mut sink = Vec::new();
        let order = record_race(&fast_config(3), &mut sink).unwrap();
        assert!(order.results().iter().all(|r| r.choice.is_none()));
    }

    #[test]
    fn test_single_worker_records_id_zero() {
        let mut sink = Vec::new();
        record_race(&fast_config(1), &mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "0\n");
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let mut sink = Vec::new();
        let err = record_race(&RaceConfig::new(0), &mut sink).unwrap_err();
        assert!(matches!(err, RaceError::ZeroWorkers));
        assert!(sink.is_empty(), "a rejected run must not touch the sink");
    }

    #[test]
    fn test_zero_events_rejected_before_any_spawn() {
        let config = RaceConfig { events: 0, ..RaceConfig::default() };
        let mut sink = Vec::new();
        let err = record_race(&config, &mut sink).unwrap_err();
        assert!(matches!(err, RaceError::ZeroEvents));
        assert!(sink.is_empty(), "a rejected run must not touch the sink");
    }

    #[test]
    fn test_timeout_fires_and_leaves_sink_untouched() {
        // Workers sleep 200ms while the collector gives up after 5ms, so the
        // deadline always wins.
        let config = RaceConfig {
            workers: 2,
            delay_floor: Duration::from_millis(200),
            delay_ceiling: Duration::from_millis(200),
            report_timeout: Duration::from_millis(5),
            ..RaceConfig::default()
        };
        let mut sink = Vec::new();
        let err = record_race(&config, &mut sink).unwrap_err();
        match err {
            RaceError::ReportTimeout { reported, expected } => {
                assert_eq!(expected, 2);
                assert!(reported < 2, "a timed-out run cannot have all reports");
            }
            other => panic!("expected ReportTimeout, got {:?}", other),
        }
        assert!(sink.is_empty(), "a timed-out run must not touch the sink");
    }
}
