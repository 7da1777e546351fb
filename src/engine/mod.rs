//! Pagination engine module
//!
//! Ties policy resolution, windowing and count rewriting together and runs
//! the resulting queries through an injected executor.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Paginator` - Builds a `PaginationPlan` and executes it
//! - `QueryExecutor` / `RowMapper` - Collaborator traits
//! - `JsonMapper` / `SerdeMapper` - Ready-made mappers

mod types;

pub use types::{
    CollectionRequest, CountQuery, JsonMapper, PaginationPlan, QueryExecutor, RowMapper,
    SerdeMapper,
};

use crate::config::{PaginationConfig, ResourceOverrides};
use crate::count::{read_count, to_count_statement, to_total_statement, CountableStatement};
use crate::error::{Error, Result};
use crate::pagination::{self, PaginatedResult, RequestParameters};
use std::sync::Arc;

/// Paginates collection queries against a shared configuration
#[derive(Debug, Clone)]
pub struct Paginator {
    /// Process-wide defaults
    config: Arc<PaginationConfig>,
}

impl Paginator {
    /// Create a new paginator
    pub fn new(config: Arc<PaginationConfig>) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Whether the request would be paginated at all
    pub fn is_enabled(&self, overrides: &ResourceOverrides, params: &RequestParameters) -> bool {
        pagination::is_enabled(&self.config, overrides, params)
    }

    /// Resolve, validate and build every query without executing anything
    ///
    /// `params` is `None` when called outside of a request.
    pub fn plan(
        &self,
        request: &CollectionRequest<'_>,
        overrides: &ResourceOverrides,
        params: Option<&RequestParameters>,
    ) -> Result<PaginationPlan> {
        let params = params.ok_or(Error::NoRequestContext)?;

        let decision = pagination::resolve(&self.config, overrides, params);
        if !decision.is_paginated() {
            return Err(Error::PaginationDisabled {
                resource: request.resource.to_string(),
                operation: request.operation.to_string(),
            });
        }

        let decision = pagination::clamp(decision);
        let window = pagination::window(&decision)?;
        tracing::debug!(
            resource = request.resource,
            operation = request.operation,
            page = decision.page,
            items_per_page = decision.items_per_page,
            partial = decision.is_partial(),
            "Paginating collection"
        );

        let count = if decision.is_partial() {
            None
        } else {
            let statement = CountableStatement::parse(request.base_query, self.config.dialect)?;
            let statement = to_count_statement(statement)?;
            let grouped = statement.is_grouped();
            Some(CountQuery {
                grouped,
                sql: to_total_statement(statement)?.to_sql(),
            })
        };

        Ok(PaginationPlan {
            decision,
            window,
            count,
            data_query: window.apply(request.base_query),
        })
    }

    /// Paginate a collection
    ///
    /// Full pagination runs the count query and then the window query;
    /// partial pagination runs only the window query.
    pub fn paginate<M: RowMapper>(
        &self,
        request: &CollectionRequest<'_>,
        overrides: &ResourceOverrides,
        params: Option<&RequestParameters>,
        executor: &dyn QueryExecutor,
        mapper: &M,
    ) -> Result<PaginatedResult<M::Item>> {
        let plan = self.plan(request, overrides, params)?;

        let total_items = match &plan.count {
            Some(count) => {
                tracing::debug!(sql = %count.sql, "Executing count query");
                let rows = executor.execute(&count.sql)?;
                Some(read_count(&rows)?)
            }
            None => None,
        };

        tracing::debug!(sql = %plan.data_query, "Executing window query");
        let rows = executor.execute(&plan.data_query)?;
        let items = mapper.map(rows, request.resource)?;

        let page = plan.decision.page as u64;
        let items_per_page = plan.window.limit;

        Ok(match total_items {
            Some(total_items) => PaginatedResult::Full {
                items,
                page,
                items_per_page,
                total_items,
            },
            None => PaginatedResult::Partial {
                items,
                page,
                items_per_page,
            },
        })
    }
}

#[cfg(test)]
mod tests;
