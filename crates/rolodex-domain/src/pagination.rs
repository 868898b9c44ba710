//! Sort direction and page metadata types.

use serde::{Deserialize, Serialize};

/// Page size used when a list request does not carry a positive `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Generic sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    Desc,
    #[default]
    Asc,
}

impl Sort {
    /// Parse a client-supplied order token.
    ///
    /// Only `DESC` (any case) selects descending; anything else, including an
    /// empty or misspelled token, sorts ascending.
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("desc") {
            Sort::Desc
        } else {
            Sort::Asc
        }
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl PageMeta {
    /// Derive page metadata from the requested window.
    ///
    /// `page = floor(offset / page_size) + 1`, where `page_size` falls back to
    /// [`DEFAULT_PAGE_SIZE`] when `limit` is not positive.
    pub fn new(total: u64, limit: i64, offset: i64) -> Self {
        let page_size = if limit > 0 { limit } else { DEFAULT_PAGE_SIZE };
        let page = (offset.max(0) / page_size).saturating_add(1);
        let total_pages = i64::try_from(total.div_ceil(page_size as u64)).unwrap_or(i64::MAX);
        Self {
            total,
            page,
            page_size,
            total_pages,
        }
    }
}
