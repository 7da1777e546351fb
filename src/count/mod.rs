//! Count rewriting
//!
//! Turns the base SELECT of a collection into a COUNT statement by editing
//! the parsed statement tree, then serializing it back to SQL.

mod rewriter;
mod statement;

pub use rewriter::{
    count_sql, read_count, to_count_statement, to_total_statement, total_sql, COUNT_ALIAS,
    GROUPS_ALIAS,
};
pub use statement::CountableStatement;
