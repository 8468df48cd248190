//! ORDER BY, LIMIT/OFFSET, SELECT list, and GROUP BY builders.
//!
//! Each clause type renders itself with the active [`Dialect`]. Rendered clauses
//! carry their own leading space so they can be appended straight onto a
//! statement; an empty clause renders as an empty string (or `*` for the
//! select list).

use super::dialect::Dialect;

/// A list of column names accepted by the clause builders.
///
/// Converts from slices, arrays, and vectors of names, or from a single
/// comma-separated string. Names are trimmed and blank entries dropped.
///
/// ```
/// use zorm_db::query::clauses::Columns;
///
/// let cols = Columns::from("name, -created_at,");
/// assert_eq!(cols.as_slice(), ["name", "-created_at"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns(Vec<String>);

impl Columns {
    fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            names
                .into_iter()
                .map(|n| n.as_ref().trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
        )
    }

    /// Returns the names.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Consumes the list, returning the names.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Columns {
    fn from(s: &str) -> Self {
        Self::from_names(s.split(','))
    }
}

impl From<String> for Columns {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl<S: AsRef<str>> From<Vec<S>> for Columns {
    fn from(v: Vec<S>) -> Self {
        Self::from_names(v)
    }
}

impl<S: AsRef<str>> From<&[S]> for Columns {
    fn from(v: &[S]) -> Self {
        Self::from_names(v)
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for Columns {
    fn from(v: [S; N]) -> Self {
        Self::from_names(v)
    }
}

// ── ORDER BY ─────────────────────────────────────────────────────────

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    pub const fn sql_keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTerm {
    /// The column name.
    pub column: String,
    /// The sort direction.
    pub direction: Direction,
}

impl OrderTerm {
    /// Parses `column` (ascending) or `-column` (descending).
    ///
    /// Returns `None` when no column name remains.
    pub fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        let (column, direction) = match entry.strip_prefix('-') {
            Some(rest) => (rest.trim(), Direction::Desc),
            None => (entry, Direction::Asc),
        };
        if column.is_empty() {
            return None;
        }
        Some(Self {
            column: column.to_string(),
            direction,
        })
    }
}

/// Accumulated ORDER BY terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSpec {
    terms: Vec<OrderTerm>,
}

impl OrderSpec {
    /// Appends terms after the ones already present.
    pub fn extend(&mut self, terms: impl IntoIterator<Item = OrderTerm>) {
        self.terms.extend(terms);
    }

    /// Renders ` ORDER BY `a` ASC, `b` DESC`, or nothing.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        if self.terms.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = self
            .terms
            .iter()
            .map(|t| {
                format!(
                    "{} {}",
                    dialect.quote_identifier(&t.column),
                    t.direction.sql_keyword()
                )
            })
            .collect();
        format!(" ORDER BY {}", parts.join(", "))
    }
}

// ── LIMIT / OFFSET ───────────────────────────────────────────────────

/// A page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitSpec {
    /// Maximum rows.
    pub limit: i64,
    /// Rows skipped.
    pub offset: i64,
}

impl LimitSpec {
    /// Builds the window for 1-based page `page_num` of `page_size` rows.
    ///
    /// Returns `None` unless both are positive, or if the offset overflows.
    pub fn from_page(page_size: i64, page_num: i64) -> Option<Self> {
        if page_size <= 0 || page_num <= 0 {
            return None;
        }
        let offset = (page_num - 1).checked_mul(page_size)?;
        Some(Self {
            limit: page_size,
            offset,
        })
    }

    /// Renders ` LIMIT n OFFSET m`.
    pub fn to_sql(self) -> String {
        format!(" LIMIT {} OFFSET {}", self.limit, self.offset)
    }
}

// ── SELECT list ──────────────────────────────────────────────────────

/// The selected columns. Empty means all columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectSpec {
    columns: Vec<String>,
}

impl SelectSpec {
    /// Replaces the list.
    pub fn replace(&mut self, columns: Vec<String>) {
        self.columns = columns;
    }

    /// Returns `true` if all columns are selected.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Renders `` `a`,`b` `` or `*`.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        if self.columns.is_empty() {
            return "*".to_string();
        }
        quote_list(&self.columns, dialect)
    }
}

// ── GROUP BY ─────────────────────────────────────────────────────────

/// The GROUP BY columns. Empty means no grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSpec {
    columns: Vec<String>,
}

impl GroupSpec {
    /// Replaces the list.
    pub fn replace(&mut self, columns: Vec<String>) {
        self.columns = columns;
    }

    /// Renders `` GROUP BY `a`,`b` `` or nothing.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        if self.columns.is_empty() {
            return String::new();
        }
        format!(" GROUP BY {}", quote_list(&self.columns, dialect))
    }
}

/// Quotes and comma-joins column names.
pub(crate) fn quote_list(columns: &[String], dialect: &dyn Dialect) -> String {
    columns
        .iter()
        .map(|c| dialect.quote_identifier(c))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::dialect::{MySqlDialect, SqliteDialect};

    #[test]
    fn test_columns_from_string_and_lists() {
        assert_eq!(Columns::from(" a ,b,, ").as_slice(), ["a", "b"]);
        assert_eq!(Columns::from(vec!["a", " "]).as_slice(), ["a"]);
        assert_eq!(Columns::from(["x", "y"]).into_vec(), ["x", "y"]);
        let owned = vec!["p".to_string()];
        assert_eq!(Columns::from(owned.as_slice()).as_slice(), ["p"]);
        assert!(Columns::from("").as_slice().is_empty());
    }

    #[test]
    fn test_order_term_parse() {
        assert_eq!(
            OrderTerm::parse("-created_at"),
            Some(OrderTerm {
                column: "created_at".into(),
                direction: Direction::Desc
            })
        );
        assert_eq!(OrderTerm::parse(" name ").unwrap().direction, Direction::Asc);
        assert_eq!(OrderTerm::parse("-"), None);
        assert_eq!(OrderTerm::parse(""), None);
    }

    #[test]
    fn test_order_directions_are_independent() {
        let mut spec = OrderSpec::default();
        spec.extend(["-a", "b", "-c", "d"].into_iter().filter_map(OrderTerm::parse));
        assert_eq!(
            spec.to_sql(&MySqlDialect),
            " ORDER BY `a` DESC, `b` ASC, `c` DESC, `d` ASC"
        );
    }

    #[test]
    fn test_order_accumulates() {
        let mut spec = OrderSpec::default();
        spec.extend(OrderTerm::parse("name"));
        spec.extend(std::iter::empty());
        spec.extend(OrderTerm::parse("-id"));
        assert_eq!(spec.to_sql(&MySqlDialect), " ORDER BY `name` ASC, `id` DESC");
    }

    #[test]
    fn test_empty_order_renders_nothing() {
        assert_eq!(OrderSpec::default().to_sql(&MySqlDialect), "");
    }

    #[test]
    fn test_limit_from_page() {
        let spec = LimitSpec::from_page(10, 2).unwrap();
        assert_eq!(spec, LimitSpec { limit: 10, offset: 10 });
        assert_eq!(spec.to_sql(), " LIMIT 10 OFFSET 10");
        assert_eq!(LimitSpec::from_page(25, 1).unwrap().offset, 0);
    }

    #[test]
    fn test_limit_requires_positive_inputs() {
        assert_eq!(LimitSpec::from_page(0, 1), None);
        assert_eq!(LimitSpec::from_page(10, 0), None);
        assert_eq!(LimitSpec::from_page(-5, 3), None);
    }

    #[test]
    fn test_limit_offset_overflow() {
        assert_eq!(LimitSpec::from_page(i64::MAX, 3), None);
    }

    #[test]
    fn test_select_spec() {
        let mut spec = SelectSpec::default();
        assert_eq!(spec.to_sql(&MySqlDialect), "*");
        spec.replace(vec!["id".into(), "name".into()]);
        assert_eq!(spec.to_sql(&MySqlDialect), "`id`,`name`");
        spec.replace(vec!["age".into()]);
        assert_eq!(spec.to_sql(&SqliteDialect), "\"age\"");
        spec.replace(Vec::new());
        assert!(spec.is_empty());
        assert_eq!(spec.to_sql(&MySqlDialect), "*");
    }

    #[test]
    fn test_group_spec() {
        let mut spec = GroupSpec::default();
        assert_eq!(spec.to_sql(&MySqlDialect), "");
        spec.replace(vec!["status".into(), "kind".into()]);
        assert_eq!(spec.to_sql(&MySqlDialect), " GROUP BY `status`,`kind`");
        spec.replace(vec!["kind".into()]);
        assert_eq!(spec.to_sql(&SqliteDialect), " GROUP BY \"kind\"");
        spec.replace(Vec::new());
        assert_eq!(spec.to_sql(&MySqlDialect), "");
    }
}
