//! SQL dialects: lookup operators and identifier quoting.
//!
//! A [`Dialect`] is the strategy object a [`QuerySet`](super::QuerySet) holds
//! for its whole life. It answers two questions: which operator text a
//! lookup keyword maps to, and how an identifier is quoted. Placeholders are
//! always `?`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use zorm_core::{ZormError, ZormResult};

/// Backend-specific SQL syntax used by the lookup compiler.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the vendor name (e.g. "mysql", "sqlite").
    fn vendor(&self) -> &'static str;

    /// Translates a lookup keyword (`exact`, `gte`, `in`, ...) into operator text.
    ///
    /// # Errors
    ///
    /// Returns [`ZormError::UnknownLookup`] for keywords the dialect does not know.
    fn operator(&self, lookup: &str) -> ZormResult<&'static str>;

    /// Quotes a column or table name.
    fn quote_identifier(&self, name: &str) -> String;
}

/// Wraps `name` in `quote`, doubling any embedded quote character.
fn quote_with(name: &str, quote: char) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push(quote);
    for c in name.chars() {
        if c == quote {
            out.push(quote);
        }
        out.push(c);
    }
    out.push(quote);
    out
}

/// MySQL / MariaDB: backtick identifiers, `LIKE BINARY` for case-sensitive matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn vendor(&self) -> &'static str {
        "mysql"
    }

    fn operator(&self, lookup: &str) -> ZormResult<&'static str> {
        let op = match lookup {
            "exact" => "=",
            "exclude" => "!=",
            "iexact" | "icontains" | "istartswith" | "iendswith" => "LIKE",
            "contains" | "startswith" | "endswith" => "LIKE BINARY",
            "gt" => ">",
            "gte" => ">=",
            "lt" => "<",
            "lte" => "<=",
            "in" => "IN",
            "between" => "BETWEEN",
            _ => {
                return Err(ZormError::UnknownLookup {
                    lookup: lookup.to_string(),
                })
            }
        };
        Ok(op)
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '`')
    }
}

/// SQLite: double-quoted identifiers. SQLite has no `LIKE BINARY`, so the
/// case-sensitive lookups fall back to `LIKE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn vendor(&self) -> &'static str {
        "sqlite"
    }

    fn operator(&self, lookup: &str) -> ZormResult<&'static str> {
        match lookup {
            "contains" | "startswith" | "endswith" => Ok("LIKE"),
            other => MySqlDialect.operator(other),
        }
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '"')
    }
}

/// The supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// MySQL / MariaDB.
    MySql,
    /// SQLite.
    Sqlite,
}

impl Backend {
    /// Resolves an engine name such as `mysql` or `zorm.backends.sqlite`.
    ///
    /// Only the last dotted segment is significant, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ZormError::UnknownBackend`] for unsupported engines.
    pub fn from_engine(engine: &str) -> ZormResult<Self> {
        let name = engine.rsplit('.').next().unwrap_or(engine).trim();
        match name.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            _ => Err(ZormError::UnknownBackend(engine.to_string())),
        }
    }

    /// Returns a shared dialect for this backend.
    pub fn dialect(self) -> Arc<dyn Dialect> {
        match self {
            Self::MySql => Arc::new(MySqlDialect),
            Self::Sqlite => Arc::new(SqliteDialect),
        }
    }
}

impl FromStr for Backend {
    type Err = ZormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_engine(s)
    }
}
