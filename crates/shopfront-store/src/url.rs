//! Bidirectional mapping between query state and the address-bar query
//! string.
//!
//! Recognized keys: `search` (omitted when empty), `categories`
//! (comma-joined numeric ids, omitted when empty), `page` (omitted when 1
//! or lower). Updates merge into the existing query string; keys the
//! synchronizer does not recognize pass through untouched.

use std::sync::{Mutex, PoisonError};

use percent_encoding::percent_decode_str;
use shopfront_data::encode_value;

/// Decoded view of the recognized query-string fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlQuery {
    /// Search text, percent-decoded.
    pub search: String,
    /// Raw category ids. Resolution against the loaded category list
    /// happens in the store.
    pub category_ids: Vec<u64>,
    /// Page number, at least 1.
    pub page: u32,
}

impl Default for UrlQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category_ids: Vec::new(),
            page: 1,
        }
    }
}

/// Parse a query string tolerantly.
///
/// Missing keys take their defaults; category ids that do not parse as
/// integers are dropped; a malformed or sub-1 `page` falls back to 1.
pub fn decode(query_string: &str) -> UrlQuery {
    let mut query = UrlQuery::default();

    for (key, raw_value) in split_pairs(query_string) {
        let value = decode_value(&raw_value);
        match key.as_str() {
            "search" => query.search = value,
            "categories" => {
                query.category_ids = value
                    .split(',')
                    .filter_map(|id| id.trim().parse().ok())
                    .collect();
            }
            "page" => {
                query.page = value.parse().ok().filter(|page| *page >= 1).unwrap_or(1);
            }
            _ => {}
        }
    }

    query
}

/// A partial update to the query string.
///
/// `None` fields preserve whatever the current query string carries; a
/// `Some` field replaces (or removes, when at its default) that key only.
#[derive(Debug, Clone, Default)]
pub struct UrlUpdate {
    pub search: Option<String>,
    pub category_ids: Option<Vec<u64>>,
    pub page: Option<u32>,
}

impl UrlUpdate {
    /// Merge this update into `current` and return the new query string.
    pub fn apply(&self, current: &str) -> String {
        let mut pairs = split_pairs(current);

        if let Some(search) = &self.search {
            let value = (!search.trim().is_empty()).then(|| encode_value(search));
            set_or_remove(&mut pairs, "search", value);
        }
        if let Some(ids) = &self.category_ids {
            let value = (!ids.is_empty()).then(|| {
                ids.iter()
                    .map(u64::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            });
            set_or_remove(&mut pairs, "categories", value);
        }
        if let Some(page) = self.page {
            set_or_remove(&mut pairs, "page", (page > 1).then(|| page.to_string()));
        }

        pairs
            .iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    key.clone()
                } else {
                    format!("{key}={value}")
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// The navigate/read-current-URL capability the synchronizer consumes.
///
/// Replacement carries replace-history semantics: incremental filter
/// tweaks must not pile up as history entries.
pub trait UrlSource: Send + Sync {
    /// Current query string, without the leading `?`.
    fn query_string(&self) -> String;

    /// Replace the query string without creating a history entry.
    fn replace_query_string(&self, query_string: &str);
}

/// In-process URL source used by tests and the terminal client.
#[derive(Default)]
pub struct MemoryUrlSource {
    query: Mutex<String>,
}

impl MemoryUrlSource {
    /// Create with an empty query string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an initial query string (leading `?` accepted).
    pub fn with_query(query_string: &str) -> Self {
        Self {
            query: Mutex::new(query_string.trim_start_matches('?').to_string()),
        }
    }
}

impl UrlSource for MemoryUrlSource {
    fn query_string(&self) -> String {
        self.query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_query_string(&self, query_string: &str) {
        *self.query.lock().unwrap_or_else(PoisonError::into_inner) =
            query_string.trim_start_matches('?').to_string();
    }
}

fn split_pairs(query_string: &str) -> Vec<(String, String)> {
    query_string
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("").to_string();
            let value = parts.next().unwrap_or("").to_string();
            (key, value)
        })
        .collect()
}

fn decode_value(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let decoded = percent_decode_str(&spaced)
        .decode_utf8()
        .map(|value| value.into_owned());
    decoded.unwrap_or(spaced)
}

fn set_or_remove(pairs: &mut Vec<(String, String)>, key: &str, value: Option<String>) {
    match value {
        Some(value) => {
            if let Some(existing) = pairs.iter_mut().find(|(k, _)| k == key) {
                existing.1 = value;
            } else {
                pairs.push((key.to_string(), value));
            }
        }
        None => pairs.retain(|(k, _)| k != key),
    }
}
