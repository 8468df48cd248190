//! Lookup compilation and query building.
//!
//! - [`dialect`] - Operator tables and identifier quoting per backend
//! - [`lookups`] - `field__lookup[__Q]` keys and ordered lookup lists
//! - [`compiler`] - Compiles one lookup batch into a parameterized fragment
//! - [`conditions`] - Accumulates include/exclude batches into a WHERE clause
//! - [`clauses`] - ORDER BY, LIMIT, SELECT, and GROUP BY builders
//! - [`queryset`] - The QuerySet facade
//! - [`statement`] - Full SELECT/UPDATE/DELETE/count statements

pub mod clauses;
pub mod compiler;
pub mod conditions;
pub mod dialect;
pub mod lookups;
pub mod queryset;
pub mod statement;

pub use clauses::{Columns, Direction, GroupSpec, LimitSpec, OrderSpec, OrderTerm, SelectSpec};
pub use compiler::{FilterCompiler, FilterExpression};
pub use conditions::{ConditionSet, FilterKind};
pub use dialect::{Backend, Dialect, MySqlDialect, SqliteDialect};
pub use lookups::{Connector, LookupKey, Lookups};
pub use queryset::QuerySet;
pub use statement::Statement;
