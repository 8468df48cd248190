//! The lookup compiler.
//!
//! [`FilterCompiler`] turns one ordered batch of `(lookup key, value)` pairs
//! into a single boolean SQL fragment with `?` placeholders plus the
//! arguments for those placeholders, in placeholder order.
//!
//! Terms are joined by their own connector (AND unless the key ends in
//! `__Q`); the first term has no leading keyword. Any failure aborts the
//! batch and nothing partial is returned.
//!
//! # Examples
//!
//! ```
//! use zorm_db::lookups;
//! use zorm_db::query::compiler::FilterCompiler;
//! use zorm_db::query::dialect::MySqlDialect;
//! use zorm_db::value::Value;
//!
//! let expr = FilterCompiler::new(&MySqlDialect)
//!     .compile(&lookups! { "age__gte" => 18, "status__in" => vec!["A", "B"] })
//!     .unwrap();
//! assert_eq!(expr.sql, "`age`>=? AND `status` IN (?,?)");
//! assert_eq!(expr.params, vec![Value::Int(18), Value::from("A"), Value::from("B")]);
//! ```

use super::dialect::Dialect;
use super::lookups::{LookupKey, Lookups};
use crate::value::{Value, ValueShape};
use zorm_core::{ZormError, ZormResult};

/// A compiled SQL fragment and its ordered arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpression {
    /// The SQL text, using `?` placeholders.
    pub sql: String,
    /// One argument per placeholder, in placeholder order.
    pub params: Vec<Value>,
}

impl FilterExpression {
    /// Creates an expression from its parts.
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Returns `true` if there is no SQL text.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Counts the `?` placeholders, skipping any inside quoted identifiers
    /// or string literals.
    pub fn placeholder_count(&self) -> usize {
        let mut quote = None;
        let mut count = 0;
        for c in self.sql.chars() {
            match quote {
                // A doubled quote closes and immediately reopens.
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None if matches!(c, '`' | '"' | '\'') => quote = Some(c),
                None if c == '?' => count += 1,
                None => {}
            }
        }
        count
    }

    /// Splits the expression into `(sql, params)`.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// Lookups that, given a list, compare the column against every element.
const MULTI_MATCH_LOOKUPS: [&str; 4] = ["exact", "exclude", "contains", "icontains"];

/// Lookups that only accept a list.
const LIST_ONLY_LOOKUPS: [&str; 2] = ["in", "between"];

/// Compiles lookup batches for a given dialect.
#[derive(Debug, Clone, Copy)]
pub struct FilterCompiler<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> FilterCompiler<'a> {
    /// Creates a compiler for the given dialect.
    pub const fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Compiles one batch. An empty batch yields an empty expression.
    pub fn compile(&self, lookups: &Lookups) -> ZormResult<FilterExpression> {
        let mut sql = String::new();
        let mut params = Vec::new();

        for (key, value) in lookups.iter() {
            let parsed = LookupKey::parse(key)?;
            let op = self.dialect.operator(&parsed.lookup)?;
            let term = self.compile_term(key, &parsed, op, value, &mut params)?;

            if !sql.is_empty() {
                sql.push(' ');
                sql.push_str(parsed.connector.sql_keyword());
                sql.push(' ');
            }
            sql.push_str(&term);
        }

        if !sql.is_empty() {
            tracing::debug!(sql = %sql, params = params.len(), "compiled filter batch");
        }
        Ok(FilterExpression { sql, params })
    }

    fn compile_term(
        &self,
        key: &str,
        parsed: &LookupKey,
        op: &str,
        value: &Value,
        params: &mut Vec<Value>,
    ) -> ZormResult<String> {
        let column = self.dialect.quote_identifier(&parsed.field);
        let lookup = parsed.lookup.as_str();

        match value {
            Value::List(items) => {
                if items.is_empty() {
                    return Err(ZormError::EmptyCollection {
                        key: key.to_string(),
                    });
                }
                if let Some(bad) = items.iter().find(|v| v.shape() != ValueShape::Scalar) {
                    return Err(ZormError::UnsupportedValue {
                        key: key.to_string(),
                        kind: bad.kind_name().to_string(),
                    });
                }

                let not = if parsed.connector.is_or() { "NOT " } else { "" };
                let term = if MULTI_MATCH_LOOKUPS.contains(&lookup) {
                    let joiner = format!(" {} ", parsed.connector.sql_keyword());
                    let one = comparison(&column, op);
                    format!("({})", vec![one; items.len()].join(&joiner))
                } else if lookup == "in" {
                    format!("{column} {not}{op} ({})", vec!["?"; items.len()].join(","))
                } else if lookup == "between" {
                    if items.len() != 2 {
                        return Err(ZormError::InvalidArity {
                            key: key.to_string(),
                            expected: 2,
                            found: items.len(),
                        });
                    }
                    format!("{column} {not}{op} ? AND ?")
                } else {
                    return Err(ZormError::CollectionNotAllowed {
                        key: key.to_string(),
                        lookup: lookup.to_string(),
                    });
                };

                params.extend(items.iter().cloned());
                Ok(term)
            }
            scalar if scalar.shape() == ValueShape::Scalar => {
                if LIST_ONLY_LOOKUPS.contains(&lookup) {
                    return Err(ZormError::ScalarNotAllowed {
                        key: key.to_string(),
                        lookup: lookup.to_string(),
                    });
                }
                params.push(scalar.clone());
                Ok(comparison(&column, op))
            }
            other => Err(ZormError::UnsupportedValue {
                key: key.to_string(),
                kind: other.kind_name().to_string(),
            }),
        }
    }
}

/// Renders `column op ?`. Symbolic operators are written tight (`` `age`>=? ``),
/// keyword operators get surrounding spaces (`` `name` LIKE ? ``).
fn comparison(column: &str, op: &str) -> String {
    if op.chars().any(char::is_alphabetic) {
        format!("{column} {op} ?")
    } else {
        format!("{column}{op}?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookups;
    use crate::query::dialect::{MySqlDialect, SqliteDialect};

    fn compile(lookups: &Lookups) -> ZormResult<FilterExpression> {
        FilterCompiler::new(&MySqlDialect).compile(lookups)
    }

    #[test]
    fn test_scalar_gte() {
        let expr = compile(&lookups! { "age__gte" => 18 }).unwrap();
        assert_eq!(expr.sql, "`age`>=?");
        assert_eq!(expr.params, vec![Value::Int(18)]);
    }

    #[test]
    fn test_field_only_means_exact() {
        let expr = compile(&lookups! { "name" => "bob" }).unwrap();
        assert_eq!(expr.sql, "`name`=?");
    }

    #[test]
    fn test_keyword_operator_is_spaced() {
        let expr = compile(&lookups! { "name__icontains" => "%bo%" }).unwrap();
        assert_eq!(expr.sql, "`name` LIKE ?");
        let expr = compile(&lookups! { "name__startswith" => "Bo%" }).unwrap();
        assert_eq!(expr.sql, "`name` LIKE BINARY ?");
        // The pattern is bound untouched.
        assert_eq!(expr.params, vec![Value::from("Bo%")]);
    }

    #[test]
    fn test_in_list() {
        let expr = compile(&lookups! { "status__in" => vec!["A", "B", "C"] }).unwrap();
        assert_eq!(expr.sql, "`status` IN (?,?,?)");
        assert_eq!(
            expr.params,
            vec![Value::from("A"), Value::from("B"), Value::from("C")]
        );
    }

    #[test]
    fn test_in_with_or_marker_is_negated() {
        let expr = compile(&lookups! {
            "age__gt" => 1,
            "status__in__Q" => vec!["A", "B"],
        })
        .unwrap();
        assert_eq!(expr.sql, "`age`>? OR `status` NOT IN (?,?)");
        assert_eq!(expr.params.len(), 3);
    }

    #[test]
    fn test_between() {
        let expr = compile(&lookups! { "price__between" => vec![10, 20] }).unwrap();
        assert_eq!(expr.sql, "`price` BETWEEN ? AND ?");
        assert_eq!(expr.params, vec![Value::Int(10), Value::Int(20)]);

        let expr = compile(&lookups! { "price__between__Q" => vec![10, 20] }).unwrap();
        assert_eq!(expr.sql, "`price` NOT BETWEEN ? AND ?");
    }

    #[test]
    fn test_between_requires_two_values() {
        for items in [vec![1], vec![1, 2, 3]] {
            let found = items.len();
            let err = compile(&lookups! { "price__between" => items }).unwrap_err();
            assert!(matches!(
                err,
                ZormError::InvalidArity { expected: 2, found: f, .. } if f == found
            ));
        }
    }

    #[test]
    fn test_multi_value_exact_uses_own_connector() {
        let expr = compile(&lookups! { "tag__Q" => vec!["a", "b", "c"] }).unwrap();
        assert_eq!(expr.sql, "(`tag`=? OR `tag`=? OR `tag`=?)");
        assert_eq!(expr.params.len(), 3);

        let expr = compile(&lookups! { "tag__exclude" => vec!["a", "b"] }).unwrap();
        assert_eq!(expr.sql, "(`tag`!=? AND `tag`!=?)");
    }

    #[test]
    fn test_multi_value_contains() {
        let expr = compile(&lookups! { "name__icontains__Q" => vec!["%a%", "%b%"] }).unwrap();
        assert_eq!(expr.sql, "(`name` LIKE ? OR `name` LIKE ?)");
    }

    #[test]
    fn test_or_marker_joins_terms() {
        let expr = compile(&lookups! {
            "name__exact__Q" => "x",
            "name__exact__Q" => "y",
        })
        .unwrap();
        assert_eq!(expr.sql, "`name`=? OR `name`=?");
        assert_eq!(expr.params, vec![Value::from("x"), Value::from("y")]);
    }

    #[test]
    fn test_mixed_connectors_keep_input_order() {
        let expr = compile(&lookups! {
            "a" => 1,
            "b__lt" => 2,
            "c__Q" => 3,
        })
        .unwrap();
        assert_eq!(expr.sql, "`a`=? AND `b`<? OR `c`=?");
        assert_eq!(expr.params, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_empty_batch() {
        let expr = compile(&Lookups::new()).unwrap();
        assert!(expr.is_empty());
        assert!(expr.params.is_empty());
    }

    #[test]
    fn test_scalar_with_list_only_lookup_fails() {
        let err = compile(&lookups! { "age__in" => 5 }).unwrap_err();
        assert!(matches!(err, ZormError::ScalarNotAllowed { .. }));
        let err = compile(&lookups! { "age__between" => 5 }).unwrap_err();
        assert!(matches!(err, ZormError::ScalarNotAllowed { .. }));
    }

    #[test]
    fn test_empty_list_fails() {
        let err = compile(&lookups! { "age__in" => Vec::<i64>::new() }).unwrap_err();
        assert!(matches!(err, ZormError::EmptyCollection { ref key } if key == "age__in"));
    }

    #[test]
    fn test_list_with_comparison_lookup_fails() {
        let err = compile(&lookups! { "age__gte" => vec![1, 2] }).unwrap_err();
        assert!(matches!(
            err,
            ZormError::CollectionNotAllowed { ref lookup, .. } if lookup == "gte"
        ));
    }

    #[test]
    fn test_unsupported_values_fail() {
        let err = compile(&lookups! { "meta" => serde_json::json!({"a": 1}) }).unwrap_err();
        assert!(matches!(err, ZormError::UnsupportedValue { ref kind, .. } if kind == "json"));

        let err = compile(&lookups! { "deleted_at" => Value::Null }).unwrap_err();
        assert!(matches!(err, ZormError::UnsupportedValue { ref kind, .. } if kind == "null"));

        let nested = Value::List(vec![Value::Int(1), Value::List(vec![Value::Int(2)])]);
        let err = compile(&lookups! { "id__in" => nested }).unwrap_err();
        assert!(matches!(err, ZormError::UnsupportedValue { ref kind, .. } if kind == "list"));
    }

    #[test]
    fn test_unknown_lookup_fails() {
        let err = compile(&lookups! { "age__near" => 1 }).unwrap_err();
        assert!(matches!(err, ZormError::UnknownLookup { .. }));
    }

    #[test]
    fn test_malformed_key_fails() {
        let err = compile(&lookups! { "age" => 1, "name__exact__x" => "y" }).unwrap_err();
        assert!(matches!(err, ZormError::MalformedLookup { .. }));
    }

    #[test]
    fn test_no_partial_output_on_failure() {
        // The first pair is valid; the whole batch still fails.
        let result = compile(&lookups! { "age__gte" => 1, "id__in" => Vec::<i64>::new() });
        assert!(result.is_err());
    }

    #[test]
    fn test_identifiers_are_quoted_and_escaped() {
        let expr = compile(&lookups! { "we`ird" => 1 }).unwrap();
        assert_eq!(expr.sql, "`we``ird`=?");
    }

    #[test]
    fn test_sqlite_dialect_rendering() {
        let expr = FilterCompiler::new(&SqliteDialect)
            .compile(&lookups! { "name__contains" => "%a%", "id__in" => vec![1, 2] })
            .unwrap();
        assert_eq!(expr.sql, "\"name\" LIKE ? AND \"id\" IN (?,?)");
    }

    #[test]
    fn test_placeholder_count_matches_params() {
        let batches = [
            lookups! { "a" => 1 },
            lookups! { "a__in" => vec![1, 2, 3], "b__Q" => "x" },
            lookups! { "p__between" => vec![1, 9], "t__Q" => vec!["x", "y"] },
        ];
        for batch in &batches {
            let expr = compile(batch).unwrap();
            assert_eq!(expr.placeholder_count(), expr.params.len(), "{}", expr.sql);
        }
    }

    #[test]
    fn test_placeholder_count_ignores_quoted_question_marks() {
        let expr = compile(&lookups! { "a?b" => 1, "c``?__in" => vec![2, 3] }).unwrap();
        assert_eq!(expr.sql, "`a?b`=? AND `c````?` IN (?,?)");
        assert_eq!(expr.placeholder_count(), 3);
        assert_eq!(expr.placeholder_count(), expr.params.len());

        let sqlite = FilterCompiler::new(&SqliteDialect)
            .compile(&lookups! { "x?\"y" => "?" })
            .unwrap();
        assert_eq!(sqlite.sql, "\"x?\"\"y\"=?");
        assert_eq!(sqlite.placeholder_count(), 1);

        let raw = FilterExpression::new("note = '?' AND id = ?", vec![Value::Int(1)]);
        assert_eq!(raw.placeholder_count(), 1);
    }

    #[test]
    fn test_compile_is_idempotent() {
        let batch = lookups! { "a__gte" => 1, "b__in__Q" => vec!["x", "y"], "c__Q" => true };
        let first = compile(&batch).unwrap();
        let second = compile(&batch).unwrap();
        assert_eq!(first, second);
    }
}
