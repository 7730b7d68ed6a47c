//! Run-order trace format.
//!
//! One recording run produces one line of text: the worker tokens in arrival
//! order, joined by `-` and terminated by a newline. Runs that interleaved
//! identically produce byte-identical lines, so a corpus of lines can be
//! compared with plain string equality and nothing more.
//!
//! Two token shapes exist:
//!
//! - `Bare`: just the worker id, e.g. `1-0-2`.
//! - `Choice`: the worker id paired with its chosen event index, e.g.
//!   `{1,3}-{0,0}-{2,1}`.
//!
//! Shapes never mix within a line. [`RunOrder::parse`] detects the shape per
//! token from the leading `{`, so tools that want the structure back can read
//! the same file a string-equality scorer reads.

use std::fmt;

// ── Tokens ────────────────────────────────────────────────────────────────

/// Shape of the per-worker tokens in a recorded line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStyle {
    /// Worker id only: `3`.
    Bare,
    /// Worker id and chosen event index: `{3,1}`.
    Choice,
}

impl Default for TokenStyle {
    fn default() -> Self {
        TokenStyle::Bare
    }
}

/// What one worker reported when its race finished.
///
/// `choice` is present only for [`TokenStyle::Choice`] runs; the token
/// formatter keys off its presence, so a result can never render in the
/// wrong shape for the data it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerResult {
    /// Id of the reporting worker, `0..workers`.
    pub id: u32,
    /// Index of the event the worker picked, if the run records choices.
    pub choice: Option<u32>,
}

fn format_token(result: &WorkerResult) -> String {
    match result.choice {
        Some(choice) => format!("{{{},{}}}", result.id, choice),
        None => result.id.to_string(),
    }
}

// ── Run orders ────────────────────────────────────────────────────────────

/// The arrival order of one recording run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOrder {
    results: Vec<WorkerResult>,
}

impl RunOrder {
    /// Wraps worker results already in arrival order.
    pub fn new(results: Vec<WorkerResult>) -> RunOrder {
        RunOrder { results }
    }

    /// The results in arrival order.
    pub fn results(&self) -> &[WorkerResult] {
        &self.results
    }

    /// Number of reports in the run.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Renders the run as one corpus line, without the trailing newline.
    pub fn to_line(&self) -> String {
        let tokens: Vec<String> = self.results.iter().map(format_token).collect();
        tokens.join("-")
    }

    /// True when the run holds each worker id in `0..workers` exactly once.
    ///
    /// A line that fails this check was produced by a collector that lost or
    /// duplicated a report, not by an unlucky interleaving.
    pub fn is_permutation(&self, workers: u32) -> bool {
        if self.results.len() != workers as usize {
            return false;
        }
        let mut seen = vec![false; workers as usize];
        for result in &self.results {
            match seen.get_mut(result.id as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────

impl RunOrder {
    /// Parses one corpus line (no trailing newline) back into a run.
    pub fn parse(line: &str) -> Result<RunOrder, TraceError> {
        if line.is_empty() {
            return Err(TraceError::EmptyLine);
        }
        let mut results = Vec::new();
        for token in line.split('-') {
            results.push(parse_token(token)?);
        }
        Ok(RunOrder { results })
    }
}

fn parse_token(token: &str) -> Result<WorkerResult, TraceError> {
    let malformed = || TraceError::MalformedToken(token.to_string());
    if let Some(body) = token.strip_prefix('{') {
        let body = body.strip_suffix('}').ok_or_else(malformed)?;
        let (id, choice) = body.split_once(',').ok_or_else(malformed)?;
        let id = id.parse::<u32>().map_err(|_| malformed())?;
        let choice = choice.parse::<u32>().map_err(|_| malformed())?;
        Ok(WorkerResult { id, choice: Some(choice) })
    } else {
        let id = token.parse::<u32>().map_err(|_| malformed())?;
        Ok(WorkerResult { id, choice: None })
    }
}

// ── TraceError ────────────────────────────────────────────────────────────

/// Errors produced while parsing a recorded line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The line has no tokens at all.
    EmptyLine,
    /// A token is neither a bare id nor an `{id,choice}` pair.
    MalformedToken(String),
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::EmptyLine => write!(f, "empty run-order line"),
            TraceError::MalformedToken(token) => {
                write!(f, "malformed run-order token '{}'", token)
            }
        }
    }
}

impl std::error::Error for TraceError {}
