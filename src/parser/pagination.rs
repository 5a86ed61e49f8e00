//! Pagination frontier reconstruction
//!
//! The listing only links a sliding window of nearby pages. The widget's
//! first five anchors carry `start` offsets in arithmetic progression, so
//! we read those and extrapolate the whole run without visiting every page
//! just to discover its neighbors. This assumes a uniform step across the
//! run, which holds for the source but is an approximation, not a guarantee.

use crate::parser::{ParseError, ParseResult};
use scraper::{Html, Selector};

/// Number of pagination anchors sampled for the extrapolation.
const PAGINATION_SAMPLE: usize = 5;

/// Reconstructs the listing page references from a page's pagination widget
///
/// Reads the first five anchors under the widget cell
/// (`td.wide_middle[width="800"]`), derives the step from the first two
/// `start` values, and emits `replays.php?&start=<v>` for the full inclusive
/// sequence from the first to the fifth value.
///
/// Policies for degenerate widgets:
/// - no anchors at all: the listing has a single page, returns an empty list
/// - one to four anchors: [`ParseError::InsufficientPagination`]
/// - non-increasing offsets: [`ParseError::BadPaginationStep`]
pub fn parse_listing_page_links(html: &str) -> ParseResult<Vec<String>> {
    let document = Html::parse_document(html);

    let mut hrefs: Vec<String> = Vec::new();
    if let Ok(anchor_selector) = Selector::parse(r#"td.wide_middle[width="800"] a[href]"#) {
        hrefs = document
            .select(&anchor_selector)
            .take(PAGINATION_SAMPLE)
            .filter_map(|anchor| anchor.value().attr("href"))
            .map(str::to_string)
            .collect();
    }

    if hrefs.is_empty() {
        tracing::debug!("no pagination widget found, treating listing as a single page");
        return Ok(Vec::new());
    }

    if hrefs.len() < PAGINATION_SAMPLE {
        return Err(ParseError::InsufficientPagination { found: hrefs.len() });
    }

    let values = hrefs
        .iter()
        .map(|href| start_value(href))
        .collect::<ParseResult<Vec<i64>>>()?;

    let step = values[1] - values[0];
    if step <= 0 {
        return Err(ParseError::BadPaginationStep { step });
    }

    let first = values[0];
    let last = values[PAGINATION_SAMPLE - 1];

    let pages = (first..=last)
        .step_by(step as usize)
        .map(|value| format!("replays.php?&start={}", value))
        .collect();

    Ok(pages)
}

/// Extracts the numeric `start` query value from a pagination href
///
/// Example: `replays.php?&start=30` -> `30`
fn start_value(href: &str) -> ParseResult<i64> {
    href.split_once("start=")
        .map(|(_, rest)| rest.chars().take_while(char::is_ascii_digit).collect::<String>())
        .filter(|digits| !digits.is_empty())
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| ParseError::MissingStartValue {
            href: href.to_string(),
        })
}
