//! DuckDB-based query executor
//!
//! Runs paginated queries on an embedded DuckDB connection and returns rows as
//! JSON objects keyed by column name.

use crate::engine::QueryExecutor;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use duckdb::types::Value as DuckValue;
use duckdb::Connection;
use std::path::Path;

/// Query executor backed by a DuckDB connection
pub struct DuckDbExecutor {
    /// DuckDB connection
    conn: Connection,
    /// Database location (for logging)
    location: String,
}

impl DuckDbExecutor {
    /// Open an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::config(format!("Failed to create DuckDB connection: {e}")))?;

        Ok(Self {
            conn,
            location: ":memory:".to_string(),
        })
    }

    /// Open a database file (`:memory:` opens an in-memory database)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str() == ":memory:" {
            return Self::open_in_memory();
        }

        let conn = Connection::open(path).map_err(|e| {
            Error::config(format!(
                "Failed to open DuckDB database '{}': {e}",
                path.display()
            ))
        })?;

        Ok(Self {
            conn,
            location: path.display().to_string(),
        })
    }

    /// Run one or more statements that return no rows (schema setup, inserts)
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Test the connection
    pub fn check_connection(&self) -> Result<()> {
        self.conn
            .execute("SELECT 1", [])
            .map_err(|e| Error::config(format!("Connection check failed: {e}")))?;
        Ok(())
    }

    /// Database location
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl QueryExecutor for DuckDbExecutor {
    fn execute(&self, sql: &str) -> Result<Vec<JsonObject>> {
        tracing::trace!(database = %self.location, sql, "Executing query");

        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;

        // Column names are only known once the statement has run.
        let columns = rows
            .as_ref()
            .map(|statement| statement.column_names())
            .unwrap_or_default();

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = JsonObject::new();
            for (index, column) in columns.iter().enumerate() {
                let value: DuckValue = row.get(index)?;
                record.insert(column.clone(), duckdb_value_to_json(value));
            }
            records.push(record);
        }

        Ok(records)
    }
}

/// Convert DuckDB Value to JSON Value
fn duckdb_value_to_json(value: DuckValue) -> JsonValue {
    match value {
        DuckValue::Null => JsonValue::Null,
        DuckValue::Boolean(b) => JsonValue::Bool(b),
        DuckValue::TinyInt(i) => JsonValue::Number(i.into()),
        DuckValue::SmallInt(i) => JsonValue::Number(i.into()),
        DuckValue::Int(i) => JsonValue::Number(i.into()),
        DuckValue::BigInt(i) => JsonValue::Number(i.into()),
        DuckValue::HugeInt(i) => i64::try_from(i)
            .map(|i| JsonValue::Number(i.into()))
            .unwrap_or_else(|_| JsonValue::String(i.to_string())),
        DuckValue::UTinyInt(i) => JsonValue::Number(i.into()),
        DuckValue::USmallInt(i) => JsonValue::Number(i.into()),
        DuckValue::UInt(i) => JsonValue::Number(i.into()),
        DuckValue::UBigInt(i) => JsonValue::Number(i.into()),
        DuckValue::Float(f) => {
            serde_json::Number::from_f64(f64::from(f)).map_or(JsonValue::Null, JsonValue::Number)
        }
        DuckValue::Double(f) => {
            serde_json::Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number)
        }
        DuckValue::Decimal(d) => d
            .to_string()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map_or_else(|| JsonValue::String(d.to_string()), JsonValue::Number),
        DuckValue::Text(s) => JsonValue::String(s),
        DuckValue::Blob(b) => JsonValue::String(base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            b,
        )),
        DuckValue::Timestamp(_, micros) => {
            let secs = micros.div_euclid(1_000_000);
            let nsecs = (micros.rem_euclid(1_000_000) * 1000) as u32;
            chrono::DateTime::from_timestamp(secs, nsecs)
                .map(|dt| JsonValue::String(dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()))
                .unwrap_or(JsonValue::Number(micros.into()))
        }
        DuckValue::Date32(days) => {
            // 719163 days separate 0001-01-01 from 1970-01-01
            chrono::NaiveDate::from_num_days_from_ce_opt(days + 719_163)
                .map(|date| JsonValue::String(date.format("%Y-%m-%d").to_string()))
                .unwrap_or(JsonValue::Number(days.into()))
        }
        DuckValue::List(values) => {
            JsonValue::Array(values.into_iter().map(duckdb_value_to_json).collect())
        }
        other => JsonValue::String(format!("{other:?}")),
    }
}
