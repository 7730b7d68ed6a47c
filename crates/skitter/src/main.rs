//! The Skitter CLI.
//!
//! Provides the `skitter` command with the following subcommands:
//!
//! - `skitter record` - Race N workers once, append the run order as one line
//! - `skitter score <file>` - Score a corpus of recorded run-order lines
//!
//! Options:
//! - `--workers` - How many workers race in one run (default 2)
//! - `--events` - How many ready events each worker chooses among (default 4)
//! - `--choices` - Record each worker's chosen event as an `{id,choice}` token
//! - `--max-delay-ms` - Upper bound of the random pre-report delay
//! - `--timeout-ms` - How long to wait for the full set of reports
//! - `--out` - Append the recorded line to a file instead of stdout
//! - `--json` - Output the score report as JSON

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};

use skitter_race::{
    record_race, RaceConfig, TokenStyle, DEFAULT_EVENTS, DEFAULT_MAX_DELAY_MS,
    DEFAULT_REPORT_TIMEOUT_MS, DEFAULT_WORKERS,
};
use skitter_score::{scan_corpus, ScoreReport};

#[derive(Parser)]
#[command(name = "skitter", version, about = "Record worker races and score scheduling entropy")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Race N workers once and record their completion order as one line
    Record {
        /// How many workers race in this run
        #[arg(long, default_value_t = DEFAULT_WORKERS)]
        workers: u32,

        /// How many always-ready events each worker chooses among
        #[arg(long, default_value_t = DEFAULT_EVENTS)]
        events: u32,

        /// Record each worker's chosen event as an {id,choice} token
        #[arg(long)]
        choices: bool,

        /// Upper bound of the random pre-report delay, in milliseconds
        #[arg(long = "max-delay-ms", default_value_t = DEFAULT_MAX_DELAY_MS)]
        max_delay_ms: u64,

        /// How long to wait for all worker reports, in milliseconds
        #[arg(long = "timeout-ms", default_value_t = DEFAULT_REPORT_TIMEOUT_MS)]
        timeout_ms: u64,

        /// Append the recorded line to this file (created if missing) instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Score a corpus of recorded run-order lines
    Score {
        /// Path to the corpus file (one recorded run per line)
        path: PathBuf,

        /// Output the report as JSON instead of the human-readable summary
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Record { workers, events, choices, max_delay_ms, timeout_ms, out } => {
            if let Err(e) =
                record(workers, events, choices, max_delay_ms, timeout_ms, out.as_deref())
            {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        }
        Commands::Score { path, json } => {
            if let Err(e) = score(&path, json) {
                if json {
                    // In JSON mode, emit the final error as JSON too.
                    let msg = serde_json::json!({ "error": e });
                    eprintln!("{}", msg);
                } else {
                    eprintln!("error: {}", e);
                }
                process::exit(1);
            }
        }
    }
}

/// Run one recording: race the workers, append one line to the chosen sink.
fn record(
    workers: u32,
    events: u32,
    choices: bool,
    max_delay_ms: u64,
    timeout_ms: u64,
    out: Option<&Path>,
) -> Result<(), String> {
    let config = RaceConfig {
        workers,
        events,
        delay_ceiling: Duration::from_millis(max_delay_ms),
        report_timeout: Duration::from_millis(timeout_ms),
        style: if choices { TokenStyle::Choice } else { TokenStyle::Bare },
        ..RaceConfig::default()
    };

    match out {
        Some(path) => {
            // Append mode keeps concurrent recorders line-atomic on one file.
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("Failed to open '{}' for append: {}", path.display(), e))?;
            record_race(&config, &mut file).map_err(|e| e.to_string())?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            record_race(&config, &mut handle).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

/// Scan the corpus and print the entropy report.
fn score(path: &Path, json: bool) -> Result<(), String> {
    let file =
        File::open(path).map_err(|e| format!("Failed to open '{}': {}", path.display(), e))?;
    let summary = scan_corpus(BufReader::new(file)).map_err(|e| e.to_string())?;
    let report = ScoreReport::from_summary(&summary).map_err(|e| e.to_string())?;

    if json {
        let rendered = serde_json::to_string(&report)
            .map_err(|e| format!("Failed to encode report as JSON: {}", e))?;
        println!("{}", rendered);
    } else {
        println!("{}", report);
    }
    Ok(())
}
