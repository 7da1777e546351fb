//! Tests for engine module

use super::*;
use crate::config::PaginationOverrides;
use crate::types::{JsonObject, TotalItems};
use serde::Deserialize;
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Executor returning canned responses and recording every statement
#[derive(Default)]
struct RecordingExecutor {
    responses: RefCell<VecDeque<Result<Vec<JsonObject>>>>,
    executed: RefCell<Vec<String>>,
}

impl RecordingExecutor {
    fn with_responses(responses: Vec<Result<Vec<JsonObject>>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            executed: RefCell::new(Vec::new()),
        }
    }

    fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }
}

impl QueryExecutor for RecordingExecutor {
    fn execute(&self, sql: &str) -> Result<Vec<JsonObject>> {
        self.executed.borrow_mut().push(sql.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn rows(values: &[serde_json::Value]) -> Vec<JsonObject> {
    values
        .iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

fn paginator(config: PaginationConfig) -> Paginator {
    Paginator::new(Arc::new(config))
}

const BOOKS: &str = "SELECT id, title FROM books ORDER BY id";

fn books() -> CollectionRequest<'static> {
    CollectionRequest::new(BOOKS, "books", "list")
}

// ============================================================================
// Plan Tests
// ============================================================================

#[test]
fn test_plan_full_pagination() {
    let paginator = paginator(
        PaginationConfig::new()
            .with_items_per_page(10)
            .with_client_items_per_page(true),
    );
    let params = RequestParameters::new().with_page("2").with_items_per_page("10");

    let plan = paginator
        .plan(&books(), &ResourceOverrides::none(), Some(&params))
        .unwrap();

    assert!(plan.data_query.ends_with("LIMIT 10 OFFSET 10"));
    let count = plan.count.unwrap();
    assert_eq!(
        count.sql,
        "SELECT COUNT(*) AS _count FROM (SELECT COUNT(1) AS _count FROM books GROUP BY id) AS _groups"
    );
    assert!(count.grouped);
}

#[test]
fn test_plan_round_trips() {
    let paginator = paginator(PaginationConfig::default());
    let params = RequestParameters::new();

    let full = paginator
        .plan(&books(), &ResourceOverrides::none(), Some(&params))
        .unwrap();
    assert_eq!(full.round_trips(), 2);

    let overrides = ResourceOverrides::new(
        PaginationOverrides::new(),
        PaginationOverrides::new().partial(true),
    );
    let partial = paginator.plan(&books(), &overrides, Some(&params)).unwrap();
    assert_eq!(partial.round_trips(), 1);
    assert!(partial.count.is_none());
}

#[test]
fn test_plan_without_request_context() {
    let paginator = paginator(PaginationConfig::default());
    let err = paginator
        .plan(&books(), &ResourceOverrides::none(), None)
        .unwrap_err();
    assert!(matches!(err, Error::NoRequestContext));
}

#[test]
fn test_plan_rejects_disabled_pagination() {
    let paginator = paginator(PaginationConfig::default());
    let overrides = ResourceOverrides::new(
        PaginationOverrides::new().enabled(false),
        PaginationOverrides::new(),
    );

    assert!(!paginator.is_enabled(&overrides, &RequestParameters::new()));
    let err = paginator
        .plan(&books(), &overrides, Some(&RequestParameters::new()))
        .unwrap_err();
    assert!(matches!(err, Error::PaginationDisabled { .. }));
}

// ============================================================================
// Paginate Tests
// ============================================================================

#[test]
fn test_paginate_full_runs_count_then_window() {
    let paginator = paginator(PaginationConfig::new().with_items_per_page(2));
    let executor = RecordingExecutor::with_responses(vec![
        Ok(rows(&[json!({"_count": 3})])),
        Ok(rows(&[json!({"id": 3, "title": "C"})])),
    ]);
    let params = RequestParameters::new().with_page(2);

    let result = paginator
        .paginate(
            &books(),
            &ResourceOverrides::none(),
            Some(&params),
            &executor,
            &JsonMapper,
        )
        .unwrap();

    assert_eq!(
        executor.executed(),
        vec![
            "SELECT COUNT(*) AS _count FROM (SELECT COUNT(1) AS _count FROM books GROUP BY id) AS _groups".to_string(),
            "SELECT id, title FROM books ORDER BY id\nLIMIT 2 OFFSET 2".to_string(),
        ]
    );
    assert_eq!(result.total_items(), TotalItems::Known(3));
    assert_eq!(result.current_page(), 2);
    assert_eq!(result.items_per_page(), 2);
    assert_eq!(result.last_page(), Some(2));
    assert_eq!(result.items()[0]["title"], "C");
}

#[test]
fn test_paginate_ungrouped_reads_scalar_count() {
    let paginator = paginator(PaginationConfig::default());
    let executor = RecordingExecutor::with_responses(vec![
        Ok(rows(&[json!({"_count": 57})])),
        Ok(Vec::new()),
    ]);

    let result = paginator
        .paginate(
            &CollectionRequest::new("SELECT * FROM books", "books", "list"),
            &ResourceOverrides::none(),
            Some(&RequestParameters::new()),
            &executor,
            &JsonMapper,
        )
        .unwrap();

    assert_eq!(executor.executed()[0], "SELECT COUNT(1) AS _count FROM books");
    assert_eq!(result.total_items(), TotalItems::Known(57));
    assert!(result.is_empty());
}

#[test]
fn test_paginate_rejects_multi_row_count_result() {
    let paginator = paginator(PaginationConfig::default());
    let executor = RecordingExecutor::with_responses(vec![Ok(rows(&[
        json!({"_count": 1}),
        json!({"_count": 1}),
    ]))]);

    let err = paginator
        .paginate(
            &books(),
            &ResourceOverrides::none(),
            Some(&RequestParameters::new()),
            &executor,
            &JsonMapper,
        )
        .unwrap_err();

    assert!(matches!(err, Error::InvalidCountResult { .. }));
    assert_eq!(executor.executed().len(), 1);
}

#[test]
fn test_paginate_partial_skips_count() {
    let paginator = paginator(PaginationConfig::new().with_client_partial(true));
    let executor = RecordingExecutor::with_responses(vec![Ok(rows(&[
        json!({"id": 1, "title": "A"}),
        json!({"id": 2, "title": "B"}),
    ]))]);
    let params = RequestParameters::new().with_partial("true");

    let result = paginator
        .paginate(
            &books(),
            &ResourceOverrides::none(),
            Some(&params),
            &executor,
            &JsonMapper,
        )
        .unwrap();

    assert_eq!(executor.executed().len(), 1);
    assert!(result.is_partial());
    assert_eq!(result.total_items(), TotalItems::Unknown);
    assert_eq!(result.len(), 2);
}

#[test]
fn test_paginate_partial_wins_when_both_enabled() {
    let paginator = paginator(PaginationConfig::new().with_partial(true));
    let executor = RecordingExecutor::default();

    let result = paginator
        .paginate(
            &books(),
            &ResourceOverrides::none(),
            Some(&RequestParameters::new()),
            &executor,
            &JsonMapper,
        )
        .unwrap();

    assert!(paginator.config().enabled);
    assert!(result.is_partial());
    assert_eq!(executor.executed().len(), 1);
}

#[test]
fn test_paginate_invalid_page_performs_no_io() {
    let paginator = paginator(PaginationConfig::default());
    let executor = RecordingExecutor::default();
    let params = RequestParameters::new().with_page(0);

    let err = paginator
        .paginate(
            &books(),
            &ResourceOverrides::none(),
            Some(&params),
            &executor,
            &JsonMapper,
        )
        .unwrap_err();

    assert!(err.is_client_error());
    assert!(executor.executed().is_empty());
}

#[test]
fn test_paginate_unsupported_query_performs_no_io() {
    let paginator = paginator(PaginationConfig::default());
    let executor = RecordingExecutor::default();

    let err = paginator
        .paginate(
            &CollectionRequest::new("SELECT 1 UNION SELECT 2", "numbers", "list"),
            &ResourceOverrides::none(),
            Some(&RequestParameters::new()),
            &executor,
            &JsonMapper,
        )
        .unwrap_err();

    assert!(matches!(err, Error::NotASelectStatement { .. }));
    assert!(executor.executed().is_empty());
}

#[test]
fn test_paginate_propagates_executor_errors() {
    let paginator = paginator(PaginationConfig::default());
    let executor =
        RecordingExecutor::with_responses(vec![Err(Error::execution("connection reset"))]);

    let err = paginator
        .paginate(
            &books(),
            &ResourceOverrides::none(),
            Some(&RequestParameters::new()),
            &executor,
            &JsonMapper,
        )
        .unwrap_err();

    assert_eq!(err.to_string(), "Query execution failed: connection reset");
    assert_eq!(executor.executed().len(), 1);
}

#[test]
fn test_paginate_clamps_to_maximum() {
    let paginator = paginator(
        PaginationConfig::new()
            .with_client_items_per_page(true)
            .with_client_partial(true),
    );
    let overrides = ResourceOverrides::new(
        PaginationOverrides::new().maximum_items_per_page(50),
        PaginationOverrides::new(),
    );
    let params = RequestParameters::new()
        .with_items_per_page("1000")
        .with_partial("1");
    let executor = RecordingExecutor::default();

    let result = paginator
        .paginate(&books(), &overrides, Some(&params), &executor, &JsonMapper)
        .unwrap();

    assert_eq!(result.items_per_page(), 50);
    assert!(executor.executed()[0].ends_with("LIMIT 50 OFFSET 0"));
}

// ============================================================================
// Mapper Tests
// ============================================================================

#[derive(Debug, Deserialize, PartialEq)]
struct Book {
    id: i64,
    title: String,
}

#[test]
fn test_serde_mapper() {
    let mapper = SerdeMapper::<Book>::new();
    let books = mapper
        .map(rows(&[json!({"id": 1, "title": "Dune"})]), "books")
        .unwrap();
    assert_eq!(
        books,
        vec![Book {
            id: 1,
            title: "Dune".to_string()
        }]
    );
}

#[test]
fn test_serde_mapper_reports_resource() {
    let mapper = SerdeMapper::<Book>::new();
    let err = mapper
        .map(rows(&[json!({"id": "one"})]), "books")
        .unwrap_err();
    assert!(matches!(err, Error::Mapping { ref resource, .. } if resource == "books"));
}
