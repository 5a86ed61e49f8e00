//! Crawler module
//!
//! Orchestrates the fetcher, the listing parser and the replay index across
//! the pagination frontier. One page at a time, in frontier order, stopping
//! as soon as a previously indexed replay turns up.

mod coordinator;
mod fetcher;

pub use coordinator::{CrawlOutcome, Crawler, Progress};
pub use fetcher::{build_http_client, Fetch, HttpFetcher};

use crate::config::Config;
use crate::index::ReplayIndex;
use crate::Result;
use url::Url;

/// Runs a complete crawl from a configuration
///
/// Opens the index document, builds the HTTP client and walks the listing
/// to completion (or until the index catches up with the site).
///
/// # Example
///
/// ```no_run
/// use gosu_replays::config::Config;
///
/// # async fn run() -> gosu_replays::Result<()> {
/// let outcome = gosu_replays::crawler::crawl(Config::default()).await?;
/// println!("{} pages processed", outcome.pages_processed());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config) -> Result<CrawlOutcome> {
    crawl_with_progress(config, |_, _| Progress::Continue).await
}

/// Runs a complete crawl, reporting progress after each persisted page
///
/// The callback receives the 1-based count of pages processed so far and
/// the total frontier length; returning [`Progress::Stop`] ends the run
/// before the next page is fetched.
pub async fn crawl_with_progress(
    config: Config,
    progress: impl FnMut(usize, usize) -> Progress,
) -> Result<CrawlOutcome> {
    let base_url = Url::parse(&config.source.base_url)?;
    let index = ReplayIndex::new(config.index.path.as_str())?;
    let fetcher = HttpFetcher::new(&config.source)?;

    let mut crawler = Crawler::new(index, base_url, fetcher);
    crawler.crawl_with_progress(progress).await
}
