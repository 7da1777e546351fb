//! CLI commands and argument parsing

use crate::types::SqlDialect;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Paginate SQL collections and rewrite SELECT statements into COUNT queries
#[derive(Parser, Debug)]
#[command(name = "sql-pagination")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the COUNT statement for a SELECT
    Count {
        /// Base SELECT statement
        #[arg(short, long)]
        query: String,

        /// SQL dialect (defaults to the settings file's dialect)
        #[arg(short, long)]
        dialect: Option<SqlDialect>,
    },

    /// Resolve pagination for a request and print the queries it would run
    Plan {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Paginate a query against a DuckDB database
    Paginate {
        #[command(flatten)]
        request: RequestArgs,

        /// DuckDB database file, or :memory:
        #[arg(long, default_value = ":memory:")]
        database: PathBuf,

        /// SQL script to run before paginating (schema, fixtures)
        #[arg(long)]
        init_sql: Option<PathBuf>,
    },
}

/// Arguments describing one collection request
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Base SELECT statement (without LIMIT/OFFSET)
    #[arg(short, long)]
    pub query: String,

    /// Resource name
    #[arg(short, long, default_value = "default")]
    pub resource: String,

    /// Operation name
    #[arg(short, long, default_value = "get_collection")]
    pub operation: String,

    /// Query parameter as key=value (repeatable)
    #[arg(short, long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Pre-resolved pagination attributes (JSON object), checked before --param
    #[arg(long)]
    pub attributes: Option<String>,
}

/// Parse a `key=value` pair
fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value: no '=' found in '{s}'"))?;
    Ok((key.to_string(), value.to_string()))
}
