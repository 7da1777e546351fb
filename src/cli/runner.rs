//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, RequestArgs};
use crate::count::{to_count_statement, to_total_statement, CountableStatement};
use crate::database::DuckDbExecutor;
use crate::engine::{CollectionRequest, JsonMapper, Paginator, QueryExecutor};
use crate::error::{Error, Result, ResultExt};
use crate::loader::{load_settings, Settings};
use crate::pagination::RequestParameters;
use crate::types::{JsonObject, JsonValue, SqlDialect};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Count { query, dialect } => self.count(query, *dialect),
            Commands::Plan { request } => self.plan(request),
            Commands::Paginate {
                request,
                database,
                init_sql,
            } => self.paginate(request, database, init_sql.as_deref()),
        }
    }

    /// Load settings, falling back to defaults when no file is given
    fn settings(&self) -> Result<Settings> {
        match &self.cli.settings {
            Some(path) => load_settings(path),
            None => Ok(Settings::default()),
        }
    }

    fn count(&self, query: &str, dialect: Option<SqlDialect>) -> Result<()> {
        let dialect = match dialect {
            Some(dialect) => dialect,
            None => self.settings()?.pagination.dialect,
        };

        let count = to_count_statement(CountableStatement::parse(query, dialect)?)?;
        let count_query = count.to_sql();
        let total_query = to_total_statement(count)?.to_sql();
        self.emit(&json!({
            "query": query,
            "count_query": count_query,
            "total_query": total_query,
        }))
    }

    fn plan(&self, args: &RequestArgs) -> Result<()> {
        let settings = self.settings()?;
        let params = request_parameters(&settings, args)?;
        let overrides = settings.overrides_for(&args.resource, &args.operation);
        let paginator = Paginator::new(Arc::new(settings.pagination));

        let request = CollectionRequest::new(&args.query, &args.resource, &args.operation);
        let plan = paginator.plan(&request, &overrides, Some(&params))?;
        self.emit(&plan)
    }

    fn paginate(&self, args: &RequestArgs, database: &Path, init_sql: Option<&Path>) -> Result<()> {
        let settings = self.settings()?;
        let params = request_parameters(&settings, args)?;
        let overrides = settings.overrides_for(&args.resource, &args.operation);
        let paginator = Paginator::new(Arc::new(settings.pagination));

        let executor = DuckDbExecutor::open(database)?;
        if let Some(path) = init_sql {
            let script = fs::read_to_string(path)
                .with_context(|| format!("Failed to read init script '{}'", path.display()))?;
            executor.execute_batch(&script)?;
        }

        if !paginator.is_enabled(&overrides, &params) {
            tracing::info!(
                resource = %args.resource,
                operation = %args.operation,
                "Pagination disabled, returning the whole collection"
            );
            let items = executor.execute(&args.query)?;
            return self.emit(&json!({ "kind": "unpaginated", "items": items }));
        }

        let request = CollectionRequest::new(&args.query, &args.resource, &args.operation);
        let result = paginator.paginate(&request, &overrides, Some(&params), &executor, &JsonMapper)?;

        tracing::info!(
            resource = %args.resource,
            page = result.current_page(),
            items = result.len(),
            "Fetched page"
        );
        self.emit(&result)
    }

    /// Print a value as JSON on stdout
    fn emit(&self, value: &impl Serialize) -> Result<()> {
        let output = if self.cli.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{output}");
        Ok(())
    }
}

/// Build request parameters from `--param` pairs and `--attributes`
fn request_parameters(settings: &Settings, args: &RequestArgs) -> Result<RequestParameters> {
    let query: JsonObject = args
        .params
        .iter()
        .map(|(key, value)| (key.clone(), JsonValue::String(value.clone())))
        .collect();

    let attributes = match &args.attributes {
        Some(raw) => match serde_json::from_str::<JsonValue>(raw)? {
            JsonValue::Object(bag) => Some(bag),
            _ => {
                return Err(Error::config("--attributes must be a JSON object"));
            }
        },
        None => None,
    };

    Ok(RequestParameters::extract(
        &settings.pagination,
        attributes.as_ref(),
        &query,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(params: &[(&str, &str)], attributes: Option<&str>) -> RequestArgs {
        RequestArgs {
            query: "SELECT * FROM t".to_string(),
            resource: "t".to_string(),
            operation: "list".to_string(),
            params: params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            attributes: attributes.map(String::from),
        }
    }

    #[test]
    fn test_request_parameters_from_params() {
        let params =
            request_parameters(&Settings::default(), &args(&[("page", "2")], None)).unwrap();
        assert_eq!(params.page, Some(json!("2")));
        assert!(params.items_per_page.is_none());
    }

    #[test]
    fn test_request_parameters_attributes_win() {
        let params = request_parameters(
            &Settings::default(),
            &args(&[("page", "2")], Some(r#"{"page": 4}"#)),
        )
        .unwrap();
        assert_eq!(params.page, Some(json!(4)));
    }

    #[test]
    fn test_request_parameters_rejects_non_object_attributes() {
        let err = request_parameters(&Settings::default(), &args(&[], Some("[1, 2]"))).unwrap_err();
        assert!(err.to_string().contains("--attributes"));
    }
}
