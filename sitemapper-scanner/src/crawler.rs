use crate::error::{Result, ScanError};
use crate::extract::{self, Extraction};
use crate::fetch::Fetcher;
use crate::result::Page;
use crate::scope::{Scope, VisitedSet};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

/// Invoked with the number of fetches dispatched so far and the URL being fetched.
pub type ProgressCallback = Arc<dyn Fn(usize, &Url) + Send + Sync>;

/// Breadth-first, same-domain crawler.
///
/// The frontier is a FIFO queue owned by [`Crawler::crawl`]. Up to `workers` fetches
/// run at once; each one fetches and extracts on its own task and hands its newly
/// claimed links back to the coordinator. Pages are returned in the order their
/// fetches completed, which with a single worker is plain breadth-first order.
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    visited: Option<VisitedSet>,
    last_visited: Mutex<VisitedSet>,
    workers: usize,
    max_pages: Option<usize>,
    progress_callback: Option<ProgressCallback>,
}

/// Result of one fetch task, handed back to the coordinator.
struct FetchOutcome {
    url: Url,
    extraction: Result<Extraction>,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            visited: None,
            last_visited: Mutex::new(VisitedSet::new()),
            workers: 1,
            max_pages: None,
            progress_callback: None,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Share `visited` with the caller. URLs already in it are never enqueued as links;
    /// the seed itself is always fetched. Without this every `crawl` starts from an
    /// empty set.
    pub fn with_visited(mut self, visited: VisitedSet) -> Self {
        self.visited = Some(visited);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Number of URLs marked visited by the most recent `crawl`.
    pub fn visited_count(&self) -> usize {
        self.last_visited
            .lock()
            .map(|visited| visited.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    pub async fn crawl(&self, start_url: &str) -> Result<Vec<Page>> {
        let mut seed = Url::parse(start_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", start_url, e)))?;
        seed.set_fragment(None);

        let visited = self.visited.clone().unwrap_or_default();
        let scope = Scope::new(&seed, visited.clone())?;
        match self.last_visited.lock() {
            Ok(mut last) => *last = visited,
            Err(poisoned) => *poisoned.into_inner() = visited,
        }
        info!(
            "Starting crawl of {} (domain {}) with {} workers",
            seed,
            scope.domain(),
            self.workers
        );

        scope.visited().mark(&seed);
        let mut frontier = VecDeque::from([seed]);

        let mut in_flight: JoinSet<FetchOutcome> = JoinSet::new();
        let mut dispatched = 0usize;
        let mut failed = 0usize;
        let mut pages = Vec::new();

        loop {
            while in_flight.len() < self.workers && !self.budget_exhausted(dispatched) {
                let Some(url) = frontier.pop_front() else {
                    break;
                };
                dispatched += 1;
                if let Some(ref callback) = self.progress_callback {
                    callback(dispatched, &url);
                }
                in_flight.spawn(Self::fetch_and_extract(
                    self.fetcher.clone(),
                    scope.clone(),
                    url,
                ));
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("{}", ScanError::from(e));
                    failed += 1;
                    continue;
                }
            };

            match outcome.extraction {
                Ok(extraction) => {
                    debug!(
                        "{} yielded {} new links, {} assets",
                        outcome.url,
                        extraction.links.len(),
                        extraction.assets.len()
                    );
                    frontier.extend(extraction.links.iter().cloned());
                    match extraction.into_page(outcome.url) {
                        Some(page) => pages.push(page),
                        None => debug!("No anchors found, page left out of sitemap"),
                    }
                }
                Err(e) => {
                    warn!("Failed GET to {}: {}", outcome.url, e);
                    failed += 1;
                }
            }
        }

        if !frontier.is_empty() {
            info!(
                "Page budget reached, {} discovered URLs left unfetched",
                frontier.len()
            );
        }
        info!(
            "Crawl complete. Fetched {} URLs, {} failed, {} pages mapped",
            dispatched,
            failed,
            pages.len()
        );
        Ok(pages)
    }

    fn budget_exhausted(&self, dispatched: usize) -> bool {
        self.max_pages.is_some_and(|max| dispatched >= max)
    }

    async fn fetch_and_extract(fetcher: Arc<dyn Fetcher>, scope: Scope, url: Url) -> FetchOutcome {
        info!("Fetching: {}", url);
        let extraction = fetcher
            .fetch(&url)
            .await
            .map(|body| extract::extract(&url, &body, &scope));
        FetchOutcome { url, extraction }
    }
}
