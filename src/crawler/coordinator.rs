//! Traversal coordinator
//!
//! Walks the pagination frontier: the base page is fetched once to derive
//! the full page sequence, then every page is fetched and parsed in order,
//! unseen replays are added to the index, and the index is persisted after
//! each page. Encountering an already indexed replay sets the halt flag and
//! ends the run - the index has caught up with the site.

use crate::crawler::Fetch;
use crate::index::{AddOutcome, ReplayIndex};
use crate::parser::{parse_listing_page, parse_listing_page_links};
use crate::Result;
use url::Url;

/// Caller's reply to a progress report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Keep crawling
    Continue,
    /// End the run before the next page is fetched
    Stop,
}

/// How a crawl run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The whole frontier was processed
    Completed { pages_processed: usize },
    /// An already indexed replay was encountered
    CaughtUp { pages_processed: usize },
    /// The progress callback requested termination
    Stopped { pages_processed: usize },
}

impl CrawlOutcome {
    /// Number of pages fully processed and persisted during the run
    pub fn pages_processed(&self) -> usize {
        match *self {
            CrawlOutcome::Completed { pages_processed }
            | CrawlOutcome::CaughtUp { pages_processed }
            | CrawlOutcome::Stopped { pages_processed } => pages_processed,
        }
    }
}

/// Traversal controller over the pagination frontier
///
/// Exclusively owns the index for the duration of a run.
pub struct Crawler<F: Fetch> {
    index: ReplayIndex,
    base_url: Url,
    fetcher: F,
}

impl<F: Fetch> Crawler<F> {
    /// Creates a crawler over `base_url` with the given index and fetcher
    pub fn new(index: ReplayIndex, base_url: Url, fetcher: F) -> Self {
        Self {
            index,
            base_url,
            fetcher,
        }
    }

    /// The index in its current state
    pub fn index(&self) -> &ReplayIndex {
        &self.index
    }

    /// Consumes the crawler, returning the index
    pub fn into_index(self) -> ReplayIndex {
        self.index
    }

    /// Crawls the whole frontier without outside stop capability
    pub async fn crawl(&mut self) -> Result<CrawlOutcome> {
        self.crawl_with_progress(|_, _| Progress::Continue).await
    }

    /// Crawls the frontier, reporting after each persisted page
    ///
    /// The callback receives `(pages_processed, total_pages)` with
    /// `pages_processed` 1-based. Returning [`Progress::Stop`] takes effect
    /// before the next fetch. The index is saved after every fully
    /// processed page; a save failure aborts the run so the frontier never
    /// advances past unpersisted state.
    pub async fn crawl_with_progress(
        &mut self,
        mut progress: impl FnMut(usize, usize) -> Progress,
    ) -> Result<CrawlOutcome> {
        let first_page = self.fetcher.fetch(self.base_url.as_str()).await?;

        let mut frontier = vec![self.base_url.to_string()];
        frontier.extend(parse_listing_page_links(&first_page)?);
        let total = frontier.len();
        tracing::info!("frontier holds {} listing page(s)", total);

        let mut pages_processed = 0;
        for page_ref in &frontier {
            let url = resolve_page_url(&self.base_url, page_ref)?;
            tracing::debug!("fetching listing page {}", url);
            let content = self.fetcher.fetch(&url).await?;

            let mut caught_up = false;
            for replay in parse_listing_page(&content) {
                let already_seen = replay.id().is_some_and(|id| self.index.exists(id));
                if already_seen {
                    caught_up = true;
                    break;
                }
                if let AddOutcome::Rejected = self.index.add(replay) {
                    tracing::warn!("listing row produced a record without an id, ignored");
                }
            }

            if caught_up {
                // persist whatever was new on this page before stopping
                self.index.save()?;
                tracing::info!(
                    "reached an already indexed replay after {} page(s), stopping",
                    pages_processed
                );
                return Ok(CrawlOutcome::CaughtUp { pages_processed });
            }

            self.index.save()?;
            pages_processed += 1;

            if progress(pages_processed, total) == Progress::Stop {
                tracing::info!("caller requested stop after {} page(s)", pages_processed);
                return Ok(CrawlOutcome::Stopped { pages_processed });
            }
        }

        tracing::info!("frontier exhausted, {} page(s) processed", pages_processed);
        Ok(CrawlOutcome::Completed { pages_processed })
    }
}

/// Resolves a page reference against the listing base
///
/// References that already parse as absolute URLs are used verbatim; only
/// relative ones are joined against the base, so an absolute link to the
/// source site is never double-prefixed.
fn resolve_page_url(base: &Url, page_ref: &str) -> Result<String> {
    match Url::parse(page_ref) {
        Ok(_) => Ok(page_ref.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(base.join(page_ref)?.to_string()),
        Err(e) => Err(e.into()),
    }
}
