//! Pagination types
//!
//! Request parameters, the resolved decision, the row window and the
//! paginated result handed back to callers.

use crate::config::PaginationConfig;
use crate::types::{JsonObject, JsonValue, TotalItems};
use serde::Serialize;

// ============================================================================
// Request Parameters
// ============================================================================

/// Pagination values supplied by the client for a single request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParameters {
    /// Requested page number
    pub page: Option<JsonValue>,
    /// Requested page size
    pub items_per_page: Option<JsonValue>,
    /// Partial pagination toggle
    pub partial: Option<JsonValue>,
    /// Pagination toggle
    pub enabled: Option<JsonValue>,
}

impl RequestParameters {
    /// Create an empty parameter set (a request that sent nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract parameters using the configured names
    ///
    /// The pre-resolved pagination attribute bag is checked first and the flat
    /// query parameters second.
    pub fn extract(
        config: &PaginationConfig,
        attributes: Option<&JsonObject>,
        query: &JsonObject,
    ) -> Self {
        let lookup = |name: &str| -> Option<JsonValue> {
            attributes
                .and_then(|bag| bag.get(name))
                .or_else(|| query.get(name))
                .cloned()
        };

        Self {
            page: lookup(&config.page_parameter_name),
            items_per_page: lookup(&config.items_per_page_parameter_name),
            partial: lookup(&config.partial_parameter_name),
            enabled: lookup(&config.enabled_parameter_name),
        }
    }

    /// Set the page
    #[must_use]
    pub fn with_page(mut self, page: impl Into<JsonValue>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_items_per_page(mut self, items_per_page: impl Into<JsonValue>) -> Self {
        self.items_per_page = Some(items_per_page.into());
        self
    }

    /// Set the partial toggle
    #[must_use]
    pub fn with_partial(mut self, partial: impl Into<JsonValue>) -> Self {
        self.partial = Some(partial.into());
        self
    }

    /// Set the pagination toggle
    #[must_use]
    pub fn with_enabled(mut self, enabled: impl Into<JsonValue>) -> Self {
        self.enabled = Some(enabled.into());
        self
    }
}

// ============================================================================
// Decision
// ============================================================================

/// Fully resolved pagination settings for one request
///
/// Values are not validated here; `window` rejects invalid combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationDecision {
    /// Full pagination enabled
    pub enabled: bool,
    /// Partial pagination enabled
    pub partial: bool,
    /// Requested page, 1-based
    pub page: i64,
    /// Page size
    pub items_per_page: i64,
    /// Upper bound for the page size
    pub maximum_items_per_page: Option<i64>,
}

impl PaginationDecision {
    /// Whether the request is paginated at all
    pub fn is_paginated(&self) -> bool {
        self.enabled || self.partial
    }

    /// Whether the total count is skipped; partial wins over full
    pub fn is_partial(&self) -> bool {
        self.partial
    }
}

// ============================================================================
// Window
// ============================================================================

/// Row range of the base query to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    /// Number of rows (LIMIT)
    pub limit: u64,
    /// Rows to skip (OFFSET)
    pub offset: u64,
}

impl Window {
    /// Append `LIMIT .. OFFSET ..` to a base query
    ///
    /// The clause goes on its own line so a trailing `--` comment cannot
    /// swallow it.
    pub fn apply(&self, base_query: &str) -> String {
        let base = base_query.trim_end().trim_end_matches(';').trim_end();
        format!("{base}\nLIMIT {} OFFSET {}", self.limit, self.offset)
    }
}

// ============================================================================
// Paginated Result
// ============================================================================

/// One page of a collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaginatedResult<T> {
    /// Page plus the total number of items
    Full {
        items: Vec<T>,
        page: u64,
        items_per_page: u64,
        total_items: u64,
    },
    /// Page only; the total is unknown
    Partial {
        items: Vec<T>,
        page: u64,
        items_per_page: u64,
    },
}

impl<T> PaginatedResult<T> {
    /// Items of the current page
    pub fn items(&self) -> &[T] {
        match self {
            Self::Full { items, .. } | Self::Partial { items, .. } => items,
        }
    }

    /// Consume the result and return the items
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Full { items, .. } | Self::Partial { items, .. } => items,
        }
    }

    /// Current page, 1-based
    pub fn current_page(&self) -> u64 {
        match self {
            Self::Full { page, .. } | Self::Partial { page, .. } => *page,
        }
    }

    /// Page size used for this page
    pub fn items_per_page(&self) -> u64 {
        match self {
            Self::Full { items_per_page, .. } | Self::Partial { items_per_page, .. } => {
                *items_per_page
            }
        }
    }

    /// Total number of items, or `Unknown` for partial pages
    pub fn total_items(&self) -> TotalItems {
        match self {
            Self::Full { total_items, .. } => TotalItems::Known(*total_items),
            Self::Partial { .. } => TotalItems::Unknown,
        }
    }

    /// Last page number; only known for full pagination
    pub fn last_page(&self) -> Option<u64> {
        match self {
            Self::Full {
                items_per_page,
                total_items,
                ..
            } => {
                if *items_per_page == 0 || *total_items == 0 {
                    Some(1)
                } else {
                    Some(total_items.div_ceil(*items_per_page))
                }
            }
            Self::Partial { .. } => None,
        }
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// Check if this page has no items
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Check if this is a partial page
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial { .. })
    }
}

impl<T> IntoIterator for PaginatedResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_items().into_iter()
    }
}
