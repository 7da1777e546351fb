//! Engine types
//!
//! Collaborator traits (query execution, row mapping) and the request and
//! plan types used by the paginator.

use crate::error::{Error, Result};
use crate::pagination::{PaginationDecision, Window};
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

// ============================================================================
// Collaborators
// ============================================================================

/// Runs SQL and returns rows as JSON objects keyed by column name
///
/// Errors are propagated by the paginator as-is; retries and timeouts are the
/// executor's business.
pub trait QueryExecutor {
    /// Execute a query and collect its rows
    fn execute(&self, sql: &str) -> Result<Vec<JsonObject>>;
}

/// Turns raw rows into domain items
pub trait RowMapper {
    /// Domain item type
    type Item;

    /// Map the rows of one page for the given resource
    fn map(&self, rows: Vec<JsonObject>, resource: &str) -> Result<Vec<Self::Item>>;
}

/// Passes rows through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMapper;

impl RowMapper for JsonMapper {
    type Item = JsonObject;

    fn map(&self, rows: Vec<JsonObject>, _resource: &str) -> Result<Vec<JsonObject>> {
        Ok(rows)
    }
}

/// Deserializes each row into `T`
#[derive(Debug, Clone, Copy)]
pub struct SerdeMapper<T> {
    _item: PhantomData<fn() -> T>,
}

impl<T> SerdeMapper<T> {
    /// Create a new serde mapper
    pub fn new() -> Self {
        Self { _item: PhantomData }
    }
}

impl<T> Default for SerdeMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> RowMapper for SerdeMapper<T> {
    type Item = T;

    fn map(&self, rows: Vec<JsonObject>, resource: &str) -> Result<Vec<T>> {
        rows.into_iter()
            .map(|row| {
                serde_json::from_value(JsonValue::Object(row))
                    .map_err(|e| Error::mapping(resource, e.to_string()))
            })
            .collect()
    }
}

// ============================================================================
// Request & Plan
// ============================================================================

/// The collection being paginated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionRequest<'a> {
    /// Complete SELECT without LIMIT/OFFSET
    pub base_query: &'a str,
    /// Resource name (passed to the mapper)
    pub resource: &'a str,
    /// Operation name
    pub operation: &'a str,
}

impl<'a> CollectionRequest<'a> {
    /// Create a collection request
    pub fn new(base_query: &'a str, resource: &'a str, operation: &'a str) -> Self {
        Self {
            base_query,
            resource,
            operation,
        }
    }
}

/// Count statement ready to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountQuery {
    /// Single-row total statement
    pub sql: String,
    /// The count is grouped and wrapped as a derived table
    pub grouped: bool,
}

/// Everything decided before touching the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationPlan {
    /// Resolved, clamped decision
    pub decision: PaginationDecision,
    /// Validated window
    pub window: Window,
    /// Count statement; `None` for partial pagination
    pub count: Option<CountQuery>,
    /// Base query with LIMIT/OFFSET applied
    pub data_query: String,
}

impl PaginationPlan {
    /// Number of executor round trips this plan needs
    pub fn round_trips(&self) -> usize {
        if self.count.is_some() {
            2
        } else {
            1
        }
    }
}
