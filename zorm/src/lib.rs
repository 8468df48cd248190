//! # zorm
//!
//! Django-style lookups compiled to parameterized SQL fragments.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `zorm` to get everything, or on the individual crates
//! for finer-grained control.
//!
//! ```
//! use zorm::prelude::*;
//!
//! let mut qs = QuerySet::for_backend(Backend::MySql);
//! qs.filter(lookups! { "age__gte" => 18 }).unwrap();
//! assert_eq!(qs.where_clause().0, " WHERE (`age`>=?)");
//! ```

/// Errors, settings, settings loading, and logging setup.
pub use zorm_core as core;

/// Values, dialects, the lookup compiler, clause builders, and `QuerySet`.
pub use zorm_db as db;

pub use zorm_db::lookups;

// Third-party crates that appear in the public API.
pub use chrono;
pub use serde_json;
pub use tracing;

/// The common imports.
pub mod prelude {
    pub use zorm_core::{Settings, ZormError, ZormResult};
    pub use zorm_db::fields::FieldSet;
    pub use zorm_db::lookups;
    pub use zorm_db::query::statement::{self, Statement};
    pub use zorm_db::query::{Backend, Dialect, Lookups, MySqlDialect, QuerySet, SqliteDialect};
    pub use zorm_db::value::Value;
}
