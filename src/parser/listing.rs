//! Row extraction from a listing page
//!
//! Each listing row (`tr.wide_middle`) carries a fixed positional sequence
//! of cells - sentinel team, scourge team, version, event, rating, download
//! count, date - plus an anchor whose href yields the replay `id` and `link`.

use crate::index::Record;
use crate::parser::normalize::repair_row_boundaries;
use scraper::{ElementRef, Html, Selector};

/// Positional field names of the listing row cells, in document order.
const CELL_FIELDS: [&str; 7] = [
    "sentinel", "scourge", "version", "event", "rating", "dl_count", "date",
];

/// Parses a listing page into one record per row, in document order
///
/// The source lists newest replays first, so the first record is the most
/// recent. Rows that are missing the anchor or the full cell complement are
/// skipped with a warning; a record without an `id` is never produced.
///
/// # Example
///
/// ```no_run
/// use gosu_replays::parser::parse_listing_page;
///
/// # let html = String::new();
/// let replays = parse_listing_page(&html);
/// for replay in &replays {
///     println!("{:?} vs {:?}", replay.get("sentinel"), replay.get("scourge"));
/// }
/// ```
pub fn parse_listing_page(html: &str) -> Vec<Record> {
    let repaired = repair_row_boundaries(html);
    let document = Html::parse_document(&repaired);
    let mut replays = Vec::new();

    if let Ok(row_selector) = Selector::parse("tr.wide_middle") {
        for (position, row) in document.select(&row_selector).enumerate() {
            match parse_row(&row) {
                Some(record) => replays.push(record),
                None => tracing::warn!("skipping malformed listing row at position {}", position),
            }
        }
    }

    replays
}

/// Extracts one record from a listing row, or `None` if the row does not
/// match the expected shape
fn parse_row(row: &ElementRef) -> Option<Record> {
    let anchor_selector = Selector::parse("a[href]").ok()?;
    let cell_selector = Selector::parse("td").ok()?;

    let href = row
        .select(&anchor_selector)
        .next()?
        .value()
        .attr("href")?
        .trim();

    // the id is the href's second path component: "/dota/4242-..." -> "4242-..."
    let id = href.split('/').nth(2).filter(|s| !s.is_empty())?;

    let cells: Vec<String> = row
        .select(&cell_selector)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect();

    if cells.len() < CELL_FIELDS.len() {
        return None;
    }

    let mut record = Record::new();
    record.insert("id", id);
    for (name, value) in CELL_FIELDS.iter().zip(&cells) {
        record.insert(*name, value.clone());
    }
    record.insert("link", href);

    Some(record)
}
