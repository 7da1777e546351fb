//! SELECT → COUNT rewriting
//!
//! The projection is replaced with `COUNT(1) AS _count`. ORDER BY expressions
//! move to GROUP BY so rows multiplied by joins on the ordering columns count
//! once per ordering key. Statements without ORDER BY get no GROUP BY.
//!
//! A grouped count yields one row per group; `to_total_statement` wraps it as
//! a derived table so the database returns a single `_count` row.

use super::statement::CountableStatement;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, SqlDialect};
use sqlparser::ast::{
    visit_expressions, Distinct, Expr, Function, GroupByExpr, Select, SelectItem, TableFactor,
    Value,
};
use std::ops::ControlFlow;

/// Column alias of the count aggregate
pub const COUNT_ALIAS: &str = "_count";

/// Alias of the derived table wrapping a grouped count
pub const GROUPS_ALIAS: &str = "_groups";

/// Aggregate functions that cannot appear in GROUP BY
const AGGREGATES: &[&str] = &[
    "any_value",
    "approx_count_distinct",
    "array_agg",
    "avg",
    "bit_and",
    "bit_or",
    "bool_and",
    "bool_or",
    "count",
    "every",
    "group_concat",
    "json_agg",
    "json_object_agg",
    "jsonb_agg",
    "list",
    "listagg",
    "max",
    "median",
    "min",
    "mode",
    "stddev",
    "stddev_pop",
    "stddev_samp",
    "string_agg",
    "sum",
    "var_pop",
    "var_samp",
    "variance",
];

// ============================================================================
// Rewriting
// ============================================================================

/// Rewrite a SELECT into the equivalent COUNT statement
///
/// ORDER BY keys holding aggregate or window calls are dropped instead of
/// moved. DISTINCT queries group by their projected expressions; when that is
/// not possible (`DISTINCT ON`, wildcards, aggregates, an existing GROUP BY)
/// the DISTINCT projection is kept and only ORDER BY is removed.
pub fn to_count_statement(mut statement: CountableStatement) -> Result<CountableStatement> {
    let count_item = count_projection(statement.dialect())?;

    let group_keys: Vec<Expr> = statement
        .take_order_by()
        .into_iter()
        .map(|order| resolve_projection_reference(order.expr, statement.projection()))
        .filter(|expr| !contains_aggregate(expr))
        .collect();

    let select = statement.select_mut();
    if select.distinct.is_some() {
        if let Some(keys) = distinct_keys(select) {
            select.distinct = None;
            select.projection = vec![count_item];
            select.group_by = GroupByExpr::Expressions(keys, Vec::new());
        }
        return Ok(statement);
    }

    select.projection = vec![count_item];
    if let GroupByExpr::Expressions(exprs, _) = &mut select.group_by {
        for key in group_keys {
            if !exprs.contains(&key) {
                exprs.push(key);
            }
        }
    }

    Ok(statement)
}

/// Wrap a grouped count so it returns a single `_count` row
///
/// `SELECT COUNT(*) AS _count FROM (<grouped count>) AS _groups`. Ungrouped
/// statements are returned unchanged.
pub fn to_total_statement(statement: CountableStatement) -> Result<CountableStatement> {
    if !statement.is_grouped() {
        return Ok(statement);
    }

    let mut total = CountableStatement::parse(
        &format!("SELECT COUNT(*) AS {COUNT_ALIAS} FROM (SELECT 1) AS {GROUPS_ALIAS}"),
        statement.dialect(),
    )?;

    match total
        .select_mut()
        .from
        .first_mut()
        .map(|table| &mut table.relation)
    {
        Some(TableFactor::Derived { subquery, .. }) => {
            *subquery = statement.into_query();
            Ok(total)
        }
        _ => Err(Error::not_a_select("total template has no derived table")),
    }
}

/// Parse `sql` and return the text of its COUNT statement
pub fn count_sql(sql: &str, dialect: SqlDialect) -> Result<String> {
    let statement = CountableStatement::parse(sql, dialect)?;
    Ok(to_count_statement(statement)?.to_sql())
}

/// Parse `sql` and return the single-row statement that yields its total
pub fn total_sql(sql: &str, dialect: SqlDialect) -> Result<String> {
    let statement = CountableStatement::parse(sql, dialect)?;
    Ok(to_total_statement(to_count_statement(statement)?)?.to_sql())
}

/// Read the total from the single row returned by a total statement
pub fn read_count(rows: &[JsonObject]) -> Result<u64> {
    let row = rows
        .first()
        .ok_or_else(|| Error::invalid_count("count query returned no rows"))?;
    if rows.len() > 1 {
        return Err(Error::invalid_count(format!(
            "count query returned {} rows",
            rows.len()
        )));
    }
    let value = row
        .get(COUNT_ALIAS)
        .ok_or_else(|| Error::invalid_count(format!("missing '{COUNT_ALIAS}' column")))?;

    let count = match value {
        JsonValue::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    count.ok_or_else(|| {
        Error::invalid_count(format!(
            "'{COUNT_ALIAS}' is not a non-negative integer: {value}"
        ))
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn count_projection(dialect: SqlDialect) -> Result<SelectItem> {
    let template =
        CountableStatement::parse(&format!("SELECT COUNT(1) AS {COUNT_ALIAS}"), dialect)?;
    template
        .projection()
        .first()
        .cloned()
        .ok_or_else(|| Error::not_a_select("count template has no projection"))
}

/// GROUP BY keys equivalent to a plain DISTINCT, if it can be expressed that way
fn distinct_keys(select: &Select) -> Option<Vec<Expr>> {
    if !matches!(select.distinct, Some(Distinct::Distinct)) {
        return None;
    }
    if !matches!(&select.group_by, GroupByExpr::Expressions(exprs, _) if exprs.is_empty()) {
        return None;
    }

    let mut keys: Vec<Expr> = Vec::with_capacity(select.projection.len());
    for item in &select.projection {
        let expr = match item {
            SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => expr,
            _ => return None,
        };
        if contains_aggregate(expr) {
            return None;
        }
        if !keys.contains(expr) {
            keys.push(expr.clone());
        }
    }
    Some(keys)
}

/// Whether an expression calls an aggregate or window function anywhere
fn contains_aggregate(expr: &Expr) -> bool {
    visit_expressions(expr, |expr| match expr {
        Expr::Function(function) if is_aggregate(function) => ControlFlow::Break(()),
        _ => ControlFlow::Continue(()),
    })
    .is_break()
}

fn is_aggregate(function: &Function) -> bool {
    if function.over.is_some() || function.filter.is_some() || !function.within_group.is_empty()
    {
        return true;
    }
    function.name.0.last().is_some_and(|ident| {
        AGGREGATES.contains(&ident.value.to_ascii_lowercase().as_str())
    })
}

/// Replace output-column references (alias or 1-based position) with the
/// projected expression, since the projection is about to be dropped.
fn resolve_projection_reference(expr: Expr, projection: &[SelectItem]) -> Expr {
    let resolved = match &expr {
        Expr::Identifier(ident) => projection.iter().find_map(|item| match item {
            SelectItem::ExprWithAlias { expr, alias } if alias.value == ident.value => {
                Some(expr.clone())
            }
            _ => None,
        }),
        Expr::Value(Value::Number(position, _)) => position
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|index| projection.get(index))
            .and_then(|item| match item {
                SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => {
                    Some(expr.clone())
                }
                _ => None,
            }),
        _ => None,
    };

    resolved.unwrap_or(expr)
}
