//! Parsed SELECT statements
//!
//! `CountableStatement` wraps a single parsed `SELECT` so the rewriter can work
//! on the grammar tree instead of the SQL text.

use crate::error::{Error, Result};
use crate::types::SqlDialect;
use sqlparser::ast::{Expr, GroupByExpr, OrderByExpr, Query, Select, SelectItem, SetExpr, Statement};
use sqlparser::parser::Parser;
use std::fmt;

/// A single plain SELECT statement
#[derive(Debug, Clone, PartialEq)]
pub struct CountableStatement {
    query: Box<Query>,
    dialect: SqlDialect,
}

impl CountableStatement {
    /// Parse SQL text into a countable statement
    ///
    /// Rejects multi-statement scripts, set operations (UNION, INTERSECT,
    /// EXCEPT) and anything that is not a query.
    pub fn parse(sql: &str, dialect: SqlDialect) -> Result<Self> {
        let mut statements = Parser::parse_sql(dialect.parser_dialect().as_ref(), sql)?;

        if statements.len() != 1 {
            return Err(Error::not_a_select(format!(
                "expected a single statement, found {}",
                statements.len()
            )));
        }

        match statements.remove(0) {
            Statement::Query(query) => Self::from_query(query, dialect),
            other => Err(Error::not_a_select(format!(
                "expected SELECT, found {}",
                statement_keyword(&other)
            ))),
        }
    }

    fn from_query(query: Box<Query>, dialect: SqlDialect) -> Result<Self> {
        match query.body.as_ref() {
            SetExpr::Select(_) => Ok(Self { query, dialect }),
            SetExpr::SetOperation { op, .. } => Err(Error::not_a_select(format!(
                "{op} queries cannot be counted"
            ))),
            _ => Err(Error::not_a_select("query body is not a plain SELECT")),
        }
    }

    /// Dialect the statement was parsed with
    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Projection list
    pub fn projection(&self) -> &[SelectItem] {
        &self.select().projection
    }

    /// ORDER BY list (empty when there is no ORDER BY)
    pub fn order_by(&self) -> &[OrderByExpr] {
        match &self.query.order_by {
            Some(order_by) => &order_by.exprs,
            None => &[],
        }
    }

    /// GROUP BY expressions (empty for no GROUP BY and for GROUP BY ALL)
    pub fn group_by(&self) -> &[Expr] {
        match &self.select().group_by {
            GroupByExpr::Expressions(exprs, _) => exprs,
            GroupByExpr::All(_) => &[],
        }
    }

    /// Whether the statement yields one row per group or distinct tuple
    pub fn is_grouped(&self) -> bool {
        let select = self.select();
        select.distinct.is_some()
            || match &select.group_by {
                GroupByExpr::Expressions(exprs, _) => !exprs.is_empty(),
                GroupByExpr::All(_) => true,
            }
    }

    /// Serialize back to SQL text
    pub fn to_sql(&self) -> String {
        self.query.to_string()
    }

    pub(super) fn select(&self) -> &Select {
        match self.query.body.as_ref() {
            SetExpr::Select(select) => select,
            _ => unreachable!("countable statements always wrap a plain SELECT"),
        }
    }

    pub(super) fn select_mut(&mut self) -> &mut Select {
        match self.query.body.as_mut() {
            SetExpr::Select(select) => select,
            _ => unreachable!("countable statements always wrap a plain SELECT"),
        }
    }

    pub(super) fn into_query(self) -> Box<Query> {
        self.query
    }

    pub(super) fn take_order_by(&mut self) -> Vec<OrderByExpr> {
        self.query
            .order_by
            .take()
            .map(|order_by| order_by.exprs)
            .unwrap_or_default()
    }
}

impl fmt::Display for CountableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query)
    }
}

/// Leading keyword of a statement, for error messages
fn statement_keyword(statement: &Statement) -> String {
    statement
        .to_string()
        .split_whitespace()
        .next()
        .unwrap_or("statement")
        .to_uppercase()
}
