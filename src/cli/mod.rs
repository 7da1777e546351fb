//! CLI module
//!
//! Command-line interface for inspecting and running pagination.
//!
//! # Commands
//!
//! - `count` - Print the COUNT statement for a SELECT
//! - `plan` - Resolve pagination and print the queries it would run
//! - `paginate` - Run a paginated query against DuckDB

mod commands;
mod runner;

pub use commands::{Cli, Commands, RequestArgs};
pub use runner::Runner;
