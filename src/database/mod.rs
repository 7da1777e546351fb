//! Database support via DuckDB
//!
//! An embedded DuckDB connection implementing `QueryExecutor`, used by the
//! CLI and the integration tests.

mod executor;

pub use executor::DuckDbExecutor;
