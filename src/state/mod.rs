//! Shared progress and result state for a scan run
//!
//! Exactly one [`CrawlState`] exists per process. The crawl loop is its only
//! writer; status and result queries read it concurrently from the command
//! context. All access goes through a single mutex held only for the
//! duration of each field update, never across a network call. The stop
//! flag lives outside the mutex so cancellation checks never contend with
//! readers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::ScoutError;

/// How a page was matched against the target resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMethod {
    /// The literal target URL (or its site-relative form) appears in the body
    ExactLink,
    /// The target's filename appears in the body
    Filename,
    /// The target's stem (filename without extension) appears in the body
    PartialFilename,
    /// The filename appears behind a known asset-path prefix
    KnownUploadPath,
    /// An outbound link redirects to the target
    Redirect,
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchMethod::ExactLink => "exact-link",
            MatchMethod::Filename => "filename",
            MatchMethod::PartialFilename => "partial-filename",
            MatchMethod::KnownUploadPath => "known-upload-path",
            MatchMethod::Redirect => "redirect",
        };
        write!(f, "{}", name)
    }
}

/// One page where the target was found
///
/// Records are immutable once appended and keep the order in which pages
/// were processed.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    /// URL of the matching page
    pub page: String,

    /// Strategy that produced the match
    pub method: MatchMethod,

    /// The literal text that matched, or the final resolved URL for
    /// redirect matches
    pub evidence: String,

    /// 1-based position of the page in the scan at time of discovery
    pub ordinal: u64,

    /// When the match was recorded
    pub found_at: DateTime<Utc>,
}

/// Point-in-time view of run progress
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusSnapshot {
    pub pages_processed: u64,
    pub pages_discovered: u64,
    pub active: bool,
}

#[derive(Debug, Default)]
struct RunState {
    pages_processed: u64,
    pages_discovered: u64,
    active: bool,
    results: Vec<MatchRecord>,
}

/// Process-wide crawl state shared between the scan loop and query handlers
#[derive(Debug, Default)]
pub struct CrawlState {
    run: Mutex<RunState>,
    stop: AtomicBool,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the state for a new run
    ///
    /// Resets counters and results, sets the active flag, and clears any
    /// leftover stop request. Fails with [`ScoutError::ScanInProgress`] if a
    /// run is already active; the running scan is unaffected.
    pub fn begin(&self) -> Result<(), ScoutError> {
        let mut run = self.run.lock().unwrap();
        if run.active {
            return Err(ScoutError::ScanInProgress);
        }
        *run = RunState {
            pages_processed: 0,
            // The seed is already discovered when a run begins
            pages_discovered: 1,
            active: true,
            results: Vec::new(),
        };
        self.stop.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Appends a match; records are never reordered or rolled back
    pub fn record_match(&self, record: MatchRecord) {
        let mut run = self.run.lock().unwrap();
        run.results.push(record);
    }

    /// Publishes the counters after one page cycle
    pub fn record_progress(&self, processed: u64, discovered: u64) {
        let mut run = self.run.lock().unwrap();
        run.pages_processed = processed;
        run.pages_discovered = discovered;
    }

    /// Requests cooperative cancellation; idempotent when no run is active
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Checked by the scan loop once per iteration
    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Marks the run as ended; counters and results are retained until the
    /// next `begin` overwrites them
    pub fn finish(&self) {
        let mut run = self.run.lock().unwrap();
        run.active = false;
    }

    pub fn status(&self) -> StatusSnapshot {
        let run = self.run.lock().unwrap();
        StatusSnapshot {
            pages_processed: run.pages_processed,
            pages_discovered: run.pages_discovered,
            active: run.active,
        }
    }

    pub fn results(&self) -> Vec<MatchRecord> {
        let run = self.run.lock().unwrap();
        run.results.clone()
    }
}
