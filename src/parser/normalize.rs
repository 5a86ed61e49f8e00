//! Input normalization for the listing markup
//!
//! The source site sometimes omits the `</tr>` right after a date cell, so
//! two logical rows arrive glued together and a structural parser sees one.
//! We close the row ourselves before parsing.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Inserts the missing `</tr>` between a date value and the start of the
/// next listing row
///
/// Returns the input unchanged (no allocation) when no repair is needed.
pub fn repair_row_boundaries(html: &str) -> Cow<'_, str> {
    static BROKEN_ROW: OnceLock<Regex> = OnceLock::new();
    let pattern = BROKEN_ROW.get_or_init(|| {
        Regex::new(r#"(\d{4}-\d{2}-\d{2})(\s+)?<tr class="wide_middle""#)
            .expect("row boundary pattern is valid")
    });

    pattern.replace_all(html, "$1</tr><tr class=\"wide_middle\"")
}
