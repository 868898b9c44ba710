//! Declarative list query shared by every list endpoint.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::{PageMeta, Sort};
use crate::time::parse_flexible_time;

/// Inclusive date bounds for one field. Either side may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DateRange {
    /// Parsed `(from, to)` bounds.
    ///
    /// A bound that is empty or does not parse yields `None` and is simply not
    /// applied as a predicate.
    pub fn bounds(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (parse_bound(self.from.as_deref()), parse_bound(self.to.as_deref()))
    }
}

fn parse_bound(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.filter(|s| !s.trim().is_empty())
        .and_then(|s| parse_flexible_time(s).ok())
}

/// Filter, sort, window and eager-load description for a list request.
///
/// Deserializes from a JSON body or a nested query string:
///
/// ```text
/// ?search[first_name]=Ali&or=true&sort_by=created_at&order=desc&limit=20&offset=40
///  &date_ranges[created_at][from]=2025-01-01&preload[0]=tags
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Field name → search term.
    pub search: BTreeMap<String, String>,
    /// OR every search condition together instead of AND.
    pub or: bool,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub limit: i64,
    pub offset: i64,
    pub date_ranges: BTreeMap<String, DateRange>,
    pub preload: Vec<String>,
}

impl ListQuery {
    pub fn sort(&self) -> Sort {
        Sort::from_token(self.order.as_deref().unwrap_or_default())
    }

    /// Sort field, ignoring a blank value.
    pub fn sort_field(&self) -> Option<&str> {
        self.sort_by.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn page_meta(&self, total: u64) -> PageMeta {
        PageMeta::new(total, self.limit, self.offset)
    }
}

/// Whether a search field is matched by equality rather than substring.
///
/// `id` and every `*_id` field are identifiers; everything else is text.
pub fn is_identifier_field(field: &str) -> bool {
    field == "id" || field.ends_with("_id")
}
