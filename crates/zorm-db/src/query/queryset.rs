//! The [`QuerySet`] facade.
//!
//! A `QuerySet` accumulates filters, exclusions, a raw WHERE override,
//! ordering, paging, the select list, and grouping for one logical query.
//! Nothing is executed: the readers hand back SQL fragments that a
//! repository layer concatenates with its own statement prefix (see
//! [`statement`](super::statement) for the built-in composition).
//!
//! # Examples
//!
//! ```
//! use zorm_db::lookups;
//! use zorm_db::query::QuerySet;
//! use zorm_db::query::dialect::Backend;
//! use zorm_db::value::Value;
//!
//! let mut qs = QuerySet::for_backend(Backend::MySql);
//! qs.filter(lookups! { "price__between" => vec![10, 20] }).unwrap();
//! qs.order_by("-created_at").limit(10, 2);
//!
//! let (clause, params) = qs.where_clause();
//! assert_eq!(clause, " WHERE (`price` BETWEEN ? AND ?)");
//! assert_eq!(params, vec![Value::Int(10), Value::Int(20)]);
//! assert_eq!(qs.order_by_sql(), " ORDER BY `created_at` DESC");
//! assert_eq!(qs.limit_sql(), " LIMIT 10 OFFSET 10");
//! ```

use std::sync::Arc;

use super::clauses::{Columns, GroupSpec, LimitSpec, OrderSpec, OrderTerm, SelectSpec};
use super::compiler::FilterCompiler;
use super::conditions::{ConditionSet, FilterKind};
use super::dialect::{Backend, Dialect};
use super::lookups::Lookups;
use crate::fields::FieldSet;
use crate::value::Value;
use zorm_core::{Settings, ZormResult};

/// A reusable builder of WHERE, ORDER BY, LIMIT, SELECT, and GROUP BY fragments.
///
/// Not meant to be mutated from more than one place at a time; call
/// [`reset`](Self::reset) to reuse it for an unrelated query.
#[derive(Debug, Clone)]
pub struct QuerySet {
    dialect: Arc<dyn Dialect>,
    fields: Option<FieldSet>,
    conditions: ConditionSet,
    order: OrderSpec,
    limit: Option<LimitSpec>,
    select: SelectSpec,
    group: GroupSpec,
}

impl QuerySet {
    /// Creates an empty query set using `dialect`.
    pub fn new(dialect: Arc<dyn Dialect>) -> Self {
        Self {
            dialect,
            fields: None,
            conditions: ConditionSet::new(),
            order: OrderSpec::default(),
            limit: None,
            select: SelectSpec::default(),
            group: GroupSpec::default(),
        }
    }

    /// Creates an empty query set for a backend.
    pub fn for_backend(backend: Backend) -> Self {
        Self::new(backend.dialect())
    }

    /// Creates an empty query set for the engine named in `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`ZormError::UnknownBackend`](zorm_core::ZormError::UnknownBackend)
    /// if the engine is not supported.
    pub fn from_settings(settings: &Settings) -> ZormResult<Self> {
        Backend::from_engine(&settings.database.engine).map(Self::for_backend)
    }

    /// Restricts ORDER BY, GROUP BY, SELECT, and UPDATE columns to `fields`.
    #[must_use]
    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Returns the active dialect.
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Returns the known-column set, if any.
    pub const fn fields(&self) -> Option<&FieldSet> {
        self.fields.as_ref()
    }

    /// Adds a batch of lookups that rows must match.
    ///
    /// An empty batch changes nothing.
    ///
    /// # Errors
    ///
    /// Returns the compiler's error if any pair is invalid; the query set is
    /// left as it was.
    pub fn filter(&mut self, lookups: impl Into<Lookups>) -> ZormResult<&mut Self> {
        self.add_batch(FilterKind::Include, &lookups.into())
    }

    /// Adds a batch of lookups that rows must not match.
    ///
    /// # Errors
    ///
    /// Same as [`filter`](Self::filter).
    pub fn exclude(&mut self, lookups: impl Into<Lookups>) -> ZormResult<&mut Self> {
        self.add_batch(FilterKind::Exclude, &lookups.into())
    }

    fn add_batch(&mut self, kind: FilterKind, lookups: &Lookups) -> ZormResult<&mut Self> {
        let expression = FilterCompiler::new(self.dialect.as_ref()).compile(lookups)?;
        self.conditions.add(kind, expression);
        Ok(self)
    }

    /// Sets a raw WHERE body that replaces every filter and exclusion.
    ///
    /// Blank text removes a previously set override.
    pub fn where_raw(&mut self, sql: impl Into<String>, params: Vec<Value>) -> &mut Self {
        self.conditions.set_raw(sql, params);
        self
    }

    /// Appends ORDER BY terms; a leading `-` sorts that column descending.
    pub fn order_by(&mut self, columns: impl Into<Columns>) -> &mut Self {
        let columns: Columns = columns.into();
        let terms: Vec<OrderTerm> = columns
            .as_slice()
            .iter()
            .filter_map(|entry| OrderTerm::parse(entry))
            .filter(|term| self.is_known(&term.column, "order by"))
            .collect();
        self.order.extend(terms);
        self
    }

    /// Pages the result: `page_size` rows starting at 1-based page `page_num`.
    ///
    /// Non-positive arguments leave the current window unchanged.
    pub fn limit(&mut self, page_size: i64, page_num: i64) -> &mut Self {
        if page_size <= 0 || page_num <= 0 {
            tracing::debug!(page_size, page_num, "limit ignored");
            return self;
        }
        match LimitSpec::from_page(page_size, page_num) {
            Some(spec) => self.limit = Some(spec),
            None => tracing::warn!(page_size, page_num, "limit offset overflows, ignored"),
        }
        self
    }

    /// Replaces the select list. An empty list selects every column.
    ///
    /// If every requested column is unknown to the field set, the current
    /// list is kept.
    pub fn select(&mut self, columns: impl Into<Columns>) -> &mut Self {
        if let Some(columns) = self.known(columns.into(), "select") {
            self.select.replace(columns);
        }
        self
    }

    /// Replaces the GROUP BY list.
    ///
    /// If every requested column is unknown to the field set, the current
    /// grouping is kept.
    pub fn group_by(&mut self, columns: impl Into<Columns>) -> &mut Self {
        if let Some(columns) = self.known(columns.into(), "group by") {
            self.group.replace(columns);
        }
        self
    }

    /// Discards all query state, keeping the dialect and field set.
    pub fn reset(&mut self) -> &mut Self {
        self.conditions.clear();
        self.order = OrderSpec::default();
        self.limit = None;
        self.select = SelectSpec::default();
        self.group = GroupSpec::default();
        self
    }

    /// Returns the WHERE clause (with a leading space, or empty) and its arguments.
    pub fn where_clause(&self) -> (String, Vec<Value>) {
        self.conditions.assemble().into_parts()
    }

    /// Returns the ORDER BY clause, or an empty string.
    pub fn order_by_sql(&self) -> String {
        self.order.to_sql(self.dialect.as_ref())
    }

    /// Returns the LIMIT clause, or an empty string.
    pub fn limit_sql(&self) -> String {
        self.limit.map(LimitSpec::to_sql).unwrap_or_default()
    }

    /// Returns the select list, `*` when empty.
    pub fn select_sql(&self) -> String {
        self.select.to_sql(self.dialect.as_ref())
    }

    /// Returns the GROUP BY clause, or an empty string.
    pub fn group_by_sql(&self) -> String {
        self.group.to_sql(self.dialect.as_ref())
    }

    pub(crate) const fn select_spec(&self) -> &SelectSpec {
        &self.select
    }

    pub(crate) fn is_known(&self, column: &str, context: &str) -> bool {
        match &self.fields {
            Some(fields) if !fields.contains(column) => {
                tracing::warn!(clause = context, column, "column does not exist, skipped");
                false
            }
            _ => true,
        }
    }

    /// Filters `columns` through the field set. Returns `None` when a
    /// non-empty request has no known column left.
    fn known(&self, columns: Columns, context: &str) -> Option<Vec<String>> {
        let Some(fields) = &self.fields else {
            return Some(columns.into_vec());
        };
        let requested = columns.into_vec();
        if requested.is_empty() {
            return Some(requested);
        }
        let kept = fields.retain_known(requested, context);
        if kept.is_empty() {
            tracing::warn!(clause = context, "no known columns requested, clause unchanged");
            return None;
        }
        Some(kept)
    }
}
