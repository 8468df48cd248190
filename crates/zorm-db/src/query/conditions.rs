//! WHERE clause accumulation.
//!
//! A [`ConditionSet`] collects compiled filter batches, each tagged as an
//! include or an exclude, and assembles them into one WHERE clause:
//!
//! ```text
//!  WHERE (f1) AND (f2) AND NOT (e1) AND NOT (e2)
//! ```
//!
//! A raw condition set through [`ConditionSet::set_raw`] replaces all of that.

use super::compiler::FilterExpression;
use crate::value::Value;

/// Whether a batch keeps or removes matching rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Rows must match the batch.
    Include,
    /// Rows must not match the batch.
    Exclude,
}

/// A compiled batch with its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedExpression {
    /// Include or exclude.
    pub kind: FilterKind,
    /// The compiled batch.
    pub expression: FilterExpression,
}

/// A caller-written condition used verbatim as the WHERE body.
#[derive(Debug, Clone, PartialEq)]
struct RawCondition {
    sql: String,
    params: Vec<Value>,
}

/// Accumulated WHERE state for one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSet {
    expressions: Vec<TaggedExpression>,
    raw: Option<RawCondition>,
}

impl ConditionSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self {
            expressions: Vec::new(),
            raw: None,
        }
    }

    /// Adds a compiled batch. Empty batches are ignored.
    pub fn add(&mut self, kind: FilterKind, expression: FilterExpression) {
        if expression.is_empty() {
            return;
        }
        self.expressions.push(TaggedExpression { kind, expression });
    }

    /// Sets the raw override. Blank text clears it.
    pub fn set_raw(&mut self, sql: impl Into<String>, params: Vec<Value>) {
        let sql = sql.into();
        if sql.trim().is_empty() {
            if !params.is_empty() {
                tracing::warn!(params = params.len(), "blank raw condition ignored");
            }
            self.raw = None;
            return;
        }
        tracing::trace!(sql = %sql, params = params.len(), "raw condition set");
        self.raw = Some(RawCondition { sql, params });
    }

    /// Iterates the batches of one kind in the order they were added.
    pub fn expressions(&self, kind: FilterKind) -> impl Iterator<Item = &FilterExpression> {
        self.expressions
            .iter()
            .filter(move |t| t.kind == kind)
            .map(|t| &t.expression)
    }

    /// Discards all batches and the raw override.
    pub fn clear(&mut self) {
        self.expressions.clear();
        self.raw = None;
    }

    /// Builds the WHERE clause (with a leading space) and its arguments.
    ///
    /// Include batches come first, then exclude batches, each group in the
    /// order added; arguments follow the same order.
    pub fn assemble(&self) -> FilterExpression {
        if let Some(raw) = &self.raw {
            return FilterExpression::new(format!(" WHERE {}", raw.sql), raw.params.clone());
        }
        if self.expressions.is_empty() {
            return FilterExpression::default();
        }

        let mut terms = Vec::with_capacity(self.expressions.len());
        let mut params = Vec::new();
        for kind in [FilterKind::Include, FilterKind::Exclude] {
            for expr in self.expressions(kind) {
                terms.push(match kind {
                    FilterKind::Include => format!("({})", expr.sql),
                    FilterKind::Exclude => format!("NOT ({})", expr.sql),
                });
                params.extend(expr.params.iter().cloned());
            }
        }

        FilterExpression::new(format!(" WHERE {}", terms.join(" AND ")), params)
    }
}
