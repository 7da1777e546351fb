// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]

//! # sql-pagination
//!
//! Page-number pagination for SQL-backed collections.
//!
//! ## Features
//!
//! - **Layered Policy**: process defaults, resource and operation overrides, client parameters
//! - **Validated Windows**: `LIMIT`/`OFFSET` from page and page size, clamped to a maximum
//! - **Count Rewriting**: SELECT → `COUNT(1)` on the parsed statement, ORDER BY → GROUP BY
//! - **Partial Pagination**: skip the count query entirely when the total is not needed
//! - **DuckDB Executor**: run paginated queries against an embedded database
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sql_pagination::{CollectionRequest, JsonMapper, PaginationConfig, Paginator};
//! use sql_pagination::{RequestParameters, ResourceOverrides};
//! use sql_pagination::database::DuckDbExecutor;
//! use std::sync::Arc;
//!
//! let paginator = Paginator::new(Arc::new(PaginationConfig::default()));
//! let executor = DuckDbExecutor::open("books.duckdb")?;
//! let params = RequestParameters::new().with_page("2");
//!
//! let page = paginator.paginate(
//!     &CollectionRequest::new("SELECT * FROM books ORDER BY id", "books", "list"),
//!     &ResourceOverrides::none(),
//!     Some(&params),
//!     &executor,
//!     &JsonMapper,
//! )?;
//! println!("{} of {:?}", page.len(), page.total_items());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Paginator::paginate                     │
//! └──────────────────────────────────────────────────────────────┘
//!        │                │                 │                │
//! ┌──────┴──────┐ ┌───────┴──────┐ ┌────────┴───────┐ ┌──────┴──────┐
//! │   resolve   │ │    window    │ │     count      │ │  executor   │
//! ├─────────────┤ ├──────────────┤ ├────────────────┤ ├─────────────┤
//! │ defaults    │ │ clamp max    │ │ parse SELECT   │ │ count query │
//! │ resource    │ │ validate     │ │ COUNT(1)       │ │ window query│
//! │ operation   │ │ LIMIT/OFFSET │ │ ORDER→GROUP BY │ │ row mapper  │
//! │ client      │ │              │ │                │ │             │
//! └─────────────┘ └──────────────┘ └────────────────┘ └─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Pagination configuration layers
pub mod config;

/// Policy resolution and windowing
pub mod pagination;

/// SELECT → COUNT rewriting
pub mod count;

/// Paginator and collaborator traits
pub mod engine;

/// DuckDB query executor
pub mod database;

/// YAML settings loader
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{PaginationConfig, PaginationOverrides, ResourceOverrides};
pub use count::{CountableStatement, COUNT_ALIAS};
pub use engine::{CollectionRequest, JsonMapper, Paginator, QueryExecutor, RowMapper, SerdeMapper};
pub use pagination::{PaginatedResult, PaginationDecision, RequestParameters, Window};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
