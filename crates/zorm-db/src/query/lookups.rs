//! Lookup keys and ordered lookup lists.
//!
//! A lookup key has the form `field[__lookup][__Q]`:
//!
//! | Key | Lookup | Connector |
//! |---|---|---|
//! | `age` | `exact` | AND |
//! | `age__gte` | `gte` | AND |
//! | `name__Q` | `exact` | OR |
//! | `name__icontains__Q` | `icontains` | OR |
//!
//! The connector joins a term to the one before it inside a single filter
//! batch. [`Lookups`] keeps the caller's pair order, so the generated SQL is
//! reproducible.
//!
//! # Examples
//!
//! ```
//! use zorm_db::lookups;
//! use zorm_db::query::lookups::{Connector, LookupKey};
//!
//! let key = LookupKey::parse("name__icontains__Q").unwrap();
//! assert_eq!(key.field, "name");
//! assert_eq!(key.lookup, "icontains");
//! assert_eq!(key.connector, Connector::Or);
//!
//! let pairs = lookups! { "age__gte" => 18, "status__in" => vec!["A", "B"] };
//! assert_eq!(pairs.len(), 2);
//! ```

use crate::value::Value;
use zorm_core::{ZormError, ZormResult};

/// The key separator.
pub const LOOKUP_SEP: &str = "__";

/// The marker that turns a term's connector into OR.
pub const OR_MARKER: &str = "Q";

/// The lookup used when a key names only a field.
pub const DEFAULT_LOOKUP: &str = "exact";

/// The boolean keyword joining a term to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// `AND`.
    And,
    /// `OR`.
    Or,
}

impl Connector {
    /// Returns the SQL keyword.
    pub const fn sql_keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Returns `true` for the OR connector, which also negates `in` and `between`.
    pub const fn is_or(self) -> bool {
        matches!(self, Self::Or)
    }
}

/// A parsed `field[__lookup][__Q]` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    /// The column name.
    pub field: String,
    /// The lookup keyword, `exact` when omitted.
    pub lookup: String,
    /// How the term joins the previous one.
    pub connector: Connector,
}

impl LookupKey {
    /// Parses a lookup key.
    ///
    /// # Errors
    ///
    /// Returns [`ZormError::MalformedLookup`] when the key has more than
    /// three parts, three parts without a trailing `Q`, or an empty part.
    pub fn parse(key: &str) -> ZormResult<Self> {
        let malformed = || ZormError::MalformedLookup {
            key: key.to_string(),
        };

        let parts: Vec<&str> = key.split(LOOKUP_SEP).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(malformed());
        }

        let (lookup, connector) = match parts.as_slice() {
            [_] => (DEFAULT_LOOKUP, Connector::And),
            [_, marker] if *marker == OR_MARKER => (DEFAULT_LOOKUP, Connector::Or),
            [_, lookup] => (*lookup, Connector::And),
            [_, lookup, marker] if *marker == OR_MARKER => (*lookup, Connector::Or),
            _ => return Err(malformed()),
        };

        Ok(Self {
            field: parts[0].to_string(),
            lookup: lookup.to_string(),
            connector,
        })
    }
}

/// An ordered list of `(lookup key, value)` pairs forming one filter batch.
///
/// Duplicate keys are allowed and kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lookups {
    pairs: Vec<(String, Value)>,
}

impl Lookups {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a pair and returns the list for chaining.
    #[must_use]
    pub fn add(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a pair in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates the pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Lookups {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> From<Vec<(K, V)>> for Lookups {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Lookups {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Lookups {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// Builds a [`Lookups`] list from `key => value` pairs of mixed value types.
///
/// ```
/// use zorm_db::lookups;
///
/// let pairs = lookups! {
///     "age__gte" => 18,
///     "name__exact__Q" => "x",
/// };
/// assert_eq!(pairs.len(), 2);
/// ```
#[macro_export]
macro_rules! lookups {
    () => {
        $crate::query::lookups::Lookups::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::query::lookups::Lookups::new()$(.add($key, $value))+
    };
}
