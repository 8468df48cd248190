//! Known-column sets supplied by the schema layer.
//!
//! A [`FieldSet`] lists the columns a table actually has. When a
//! [`QuerySet`](crate::query::QuerySet) carries one, ORDER BY, GROUP BY,
//! SELECT, and UPDATE assignments silently drop (and log) names that are not
//! in the set. Filter keys are not checked.

use std::collections::HashSet;

/// An ordered set of column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    ordered: Vec<String>,
    index: HashSet<String>,
}

impl FieldSet {
    /// Creates a field set from column names, keeping first-seen order and
    /// dropping duplicates.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for column in columns {
            let column = column.into();
            if set.index.insert(column.clone()) {
                set.ordered.push(column);
            }
        }
        set
    }

    /// Returns `true` if `column` is a known column.
    pub fn contains(&self, column: &str) -> bool {
        self.index.contains(column)
    }

    /// Returns the columns in declaration order.
    pub fn columns(&self) -> &[String] {
        &self.ordered
    }

    /// Returns `true` if no columns are known.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Keeps the names that are known columns, logging each dropped one.
    ///
    /// `context` names the clause being built and only appears in the log.
    pub fn retain_known(&self, names: Vec<String>, context: &str) -> Vec<String> {
        names
            .into_iter()
            .filter(|name| {
                let known = self.contains(name);
                if !known {
                    tracing::warn!(clause = context, column = %name, "column does not exist, skipped");
                }
                known
            })
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
