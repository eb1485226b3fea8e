//! Scan coordination - start/stop control and the main crawl loop
//!
//! The [`Controller`] is the command surface: it validates input, enforces
//! the single-active-run rule, and spawns the scan task. The scan itself is
//! a single logical sequence of page cycles: fetch, match, extract, enqueue,
//! publish progress, check the stop flag. The command context and the scan
//! task communicate only through the shared [`CrawlState`].

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_hrefs;
use crate::matcher::{self, TargetSpec};
use crate::state::{CrawlState, MatchRecord, StatusSnapshot};
use crate::url::{extract_domain, normalize_href, normalize_url};
use crate::{Result, UrlError};
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Command surface for starting, stopping, and observing scans
///
/// Exactly one scan may be active at a time process-wide; `start` while a
/// scan is running fails fast with a conflict and leaves the running scan
/// untouched.
pub struct Controller {
    config: Arc<Config>,
    client: Client,
    state: Arc<CrawlState>,
}

impl Controller {
    /// Creates a controller with its HTTP client built from configuration
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
            state: Arc::new(CrawlState::new()),
        })
    }

    /// Begins a scan in a background task
    ///
    /// Both URLs are validated before any fetch occurs; malformed input is
    /// rejected synchronously. Returns [`crate::ScoutError::ScanInProgress`]
    /// if a scan is already active.
    pub fn start(&self, site: &str, target: &str) -> Result<()> {
        let (seed, domain, target) = self.prepare(site, target)?;
        self.state.begin()?;

        let job = ScanJob::new(
            self.client.clone(),
            Arc::clone(&self.config),
            Arc::clone(&self.state),
            seed,
            domain,
            target,
        );
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            job.run().await;
            state.finish();
        });

        Ok(())
    }

    /// Runs a scan to completion and returns its results
    ///
    /// One-shot variant used by the CLI; same validation and conflict rules
    /// as [`Controller::start`].
    pub async fn scan(&self, site: &str, target: &str) -> Result<Vec<MatchRecord>> {
        let (seed, domain, target) = self.prepare(site, target)?;
        self.state.begin()?;

        let job = ScanJob::new(
            self.client.clone(),
            Arc::clone(&self.config),
            Arc::clone(&self.state),
            seed,
            domain,
            target,
        );
        job.run().await;
        self.state.finish();

        Ok(self.results())
    }

    /// Requests cooperative cancellation of the active scan
    ///
    /// The loop observes the flag at its next iteration boundary; an
    /// in-flight fetch completes first. Idempotent when no scan is active.
    pub fn stop(&self) {
        self.state.request_stop();
    }

    /// Current progress counters and the active flag
    pub fn status(&self) -> StatusSnapshot {
        self.state.status()
    }

    /// Matches accumulated so far, in processing order
    ///
    /// Available both during and after a run; a new start overwrites them.
    pub fn results(&self) -> Vec<MatchRecord> {
        self.state.results()
    }

    fn prepare(&self, site: &str, target: &str) -> Result<(Url, String, TargetSpec)> {
        let seed = normalize_url(site)?;
        let target = TargetSpec::parse(target)?;
        let domain = extract_domain(&seed).ok_or(UrlError::MissingDomain)?;
        Ok((seed, domain, target))
    }
}

/// One scan run: owns the frontier and drives the page cycles
struct ScanJob {
    client: Client,
    config: Arc<Config>,
    state: Arc<CrawlState>,
    target: TargetSpec,
    domain: String,
    frontier: Frontier,
    processed: u64,
}

impl ScanJob {
    fn new(
        client: Client,
        config: Arc<Config>,
        state: Arc<CrawlState>,
        seed: Url,
        domain: String,
        target: TargetSpec,
    ) -> Self {
        Self {
            client,
            config,
            state,
            target,
            domain,
            frontier: Frontier::seed(seed),
            processed: 0,
        }
    }

    /// The main crawl loop
    ///
    /// Terminates when the frontier is exhausted or a stop was requested.
    /// A failing page is logged and skipped; no per-page fault can escape
    /// the loop.
    async fn run(mut self) {
        tracing::info!(
            "Scanning domain {} for {}",
            self.domain,
            self.target.url()
        );
        let started = std::time::Instant::now();

        while let Some(page) = self.frontier.next() {
            if self.state.stop_requested() {
                tracing::info!(
                    "Stop requested, abandoning {} queued pages",
                    self.frontier.pending()
                );
                break;
            }

            tracing::debug!("Scanning: {}", page);

            if let Err(e) = self.process_page(&page).await {
                tracing::warn!("Skipping {}: {}", page, e);
            }

            self.processed += 1;
            let discovered = self.processed + self.frontier.pending() as u64;
            self.state.record_progress(self.processed, discovered);

            if self.processed % 10 == 0 {
                tracing::info!("Progress: {} of {} pages", self.processed, discovered);
            }
        }

        tracing::info!(
            "Scan finished: {} pages processed, {} matched in {:?}",
            self.processed,
            self.state.results().len(),
            started.elapsed()
        );
    }

    /// One page cycle: fetch, match, extract, enqueue
    async fn process_page(&mut self, page: &Url) -> Result<()> {
        let body = match fetch_page(&self.client, page).await {
            FetchResult::Success { body, .. } => body,
            FetchResult::HttpError { status_code } => {
                tracing::debug!("Unreachable {} (HTTP {})", page, status_code);
                return Ok(());
            }
            FetchResult::NetworkError { error } => {
                tracing::debug!("Unreachable {} ({})", page, error);
                return Ok(());
            }
        };

        // Href extraction is synchronous; the DOM is gone before any await
        let links = self.collect_links(&body, page);

        let hit = match matcher::match_body(&body, &self.target, &self.config.matcher) {
            Some(hit) => Some(hit),
            None => {
                let candidates =
                    matcher::redirect_candidates(&links, &self.target, &self.config.matcher);
                let timeout = Duration::from_secs(self.config.crawler.redirect_timeout_secs);
                matcher::match_redirects(&self.client, &candidates, &self.target, timeout).await
            }
        };

        if let Some(hit) = hit {
            tracing::info!("Match on {} via {}: {}", page, hit.method, hit.evidence);
            self.state.record_match(MatchRecord {
                page: page.to_string(),
                method: hit.method,
                evidence: hit.evidence,
                ordinal: self.processed + 1,
                found_at: Utc::now(),
            });
        }

        for link in links {
            self.frontier.offer(link, &self.domain);
        }

        Ok(())
    }

    /// Normalizes extracted hrefs against the page they were found on
    ///
    /// Non-crawlable and malformed hrefs are dropped here; cross-domain
    /// links are kept because redirect candidates may live off-site, and
    /// the frontier applies the domain scope on its own.
    fn collect_links(&self, body: &str, page: &Url) -> Vec<Url> {
        let mut links = Vec::new();
        for href in extract_hrefs(body) {
            match normalize_href(&href, page) {
                Ok(link) => links.push(link),
                Err(e) => tracing::trace!("Dropping href {:?}: {}", href, e),
            }
        }
        links
    }
}
