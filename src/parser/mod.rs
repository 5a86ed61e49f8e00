//! Listing page parser
//!
//! This module turns the raw markup of one replay listing page into
//! structured data:
//! - [`parse_listing_page`] extracts one [`Record`](crate::index::Record)
//!   per listing row
//! - [`parse_listing_page_links`] reconstructs the full run of listing
//!   pages from the pagination widget
//!
//! The source site's markup is broken in a known way (unterminated row
//! tags after date cells); the repair lives in its own normalization step
//! so it can be removed if the site ever fixes it.

mod listing;
mod normalize;
mod pagination;

pub use listing::parse_listing_page;
pub use normalize::repair_row_boundaries;
pub use pagination::parse_listing_page_links;

use thiserror::Error;

/// Errors raised when a listing page violates structural assumptions
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Expected 5 pagination anchors, found {found}")]
    InsufficientPagination { found: usize },

    #[error("Pagination step must be positive, got {step}")]
    BadPaginationStep { step: i64 },

    #[error("Pagination anchor {href:?} has no numeric start value")]
    MissingStartValue { href: String },
}

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;
