//! Complete statements composed from a [`QuerySet`].
//!
//! These functions only concatenate fragments; executing the result is the
//! caller's job. Table names are quoted with the query set's dialect.
//!
//! ```
//! use zorm_db::lookups;
//! use zorm_db::query::{statement, QuerySet};
//! use zorm_db::query::dialect::Backend;
//!
//! let mut qs = QuerySet::for_backend(Backend::MySql);
//! qs.filter(lookups! { "id" => 7 }).unwrap();
//!
//! let stmt = statement::update(&qs, "users", lookups! { "name" => "ann" }).unwrap();
//! assert_eq!(stmt.sql, "UPDATE `users` SET `name`=? WHERE (`id`=?)");
//! assert_eq!(stmt.params.len(), 2);
//! ```

use super::clauses::quote_list;
use super::lookups::Lookups;
use super::queryset::QuerySet;
use crate::value::{Value, ValueShape};
use zorm_core::logging::query_span;
use zorm_core::{ZormError, ZormResult};

/// SQL text with its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The statement, with `?` placeholders.
    pub sql: String,
    /// Arguments in placeholder order.
    pub params: Vec<Value>,
}

impl Statement {
    /// Consumes the statement, returning its SQL and arguments.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// `SELECT <columns> FROM <table>` with WHERE, GROUP BY, ORDER BY, and LIMIT.
///
/// Without an explicit select list, the known field set is selected if one
/// was given, otherwise `*`.
pub fn select(qs: &QuerySet, table: &str) -> Statement {
    render_select(qs, table, &qs.limit_sql())
}

/// Like [`select`], limited to a single row.
pub fn select_one(qs: &QuerySet, table: &str) -> Statement {
    render_select(qs, table, " LIMIT 1")
}

fn render_select(qs: &QuerySet, table: &str, limit: &str) -> Statement {
    let _span = query_span(table).entered();
    let dialect = qs.dialect();
    let columns = match qs.fields() {
        Some(fields) if qs.select_spec().is_empty() && !fields.is_empty() => {
            quote_list(fields.columns(), dialect)
        }
        _ => qs.select_sql(),
    };
    let (clause, params) = qs.where_clause();
    let sql = format!(
        "SELECT {columns} FROM {}{clause}{}{}{limit}",
        dialect.quote_identifier(table),
        qs.group_by_sql(),
        qs.order_by_sql(),
    );
    tracing::debug!(sql = %sql, params = params.len(), "select statement");
    Statement { sql, params }
}

/// `SELECT count(1) FROM <table>` with the WHERE clause.
pub fn count(qs: &QuerySet, table: &str) -> Statement {
    let _span = query_span(table).entered();
    let (clause, params) = qs.where_clause();
    let sql = format!(
        "SELECT count(1) FROM {}{clause}",
        qs.dialect().quote_identifier(table)
    );
    Statement { sql, params }
}

/// `DELETE FROM <table>` with the WHERE clause.
///
/// An empty query set yields an unconditional delete.
pub fn delete(qs: &QuerySet, table: &str) -> Statement {
    let _span = query_span(table).entered();
    let (clause, params) = qs.where_clause();
    if clause.is_empty() {
        tracing::warn!("delete without a where clause");
    }
    let sql = format!("DELETE FROM {}{clause}", qs.dialect().quote_identifier(table));
    Statement { sql, params }
}

/// `UPDATE <table> SET ...` with the WHERE clause.
///
/// Assignment keys are plain column names; unknown columns are skipped when
/// the query set has a field set. SET arguments come before WHERE arguments.
///
/// # Errors
///
/// Returns [`ZormError::EmptyAssignment`] if no assignment remains, and
/// [`ZormError::UnsupportedValue`] for list or JSON values.
pub fn update(
    qs: &QuerySet,
    table: &str,
    assignments: impl Into<Lookups>,
) -> ZormResult<Statement> {
    let _span = query_span(table).entered();
    let dialect = qs.dialect();
    let mut sets = Vec::new();
    let mut params = Vec::new();

    let assignments: Lookups = assignments.into();
    for (column, value) in assignments {
        if !value.is_null() && value.shape() != ValueShape::Scalar {
            return Err(ZormError::UnsupportedValue {
                key: column,
                kind: value.kind_name().to_string(),
            });
        }
        if !qs.is_known(&column, "update") {
            continue;
        }
        sets.push(format!("{}=?", dialect.quote_identifier(&column)));
        params.push(value);
    }

    if sets.is_empty() {
        return Err(ZormError::EmptyAssignment);
    }

    let (clause, where_params) = qs.where_clause();
    params.extend(where_params);
    let sql = format!(
        "UPDATE {} SET {}{clause}",
        dialect.quote_identifier(table),
        sets.join(",")
    );
    Ok(Statement { sql, params })
}
