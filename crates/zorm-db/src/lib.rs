//! # zorm-db
//!
//! Compiles Django-style `field__lookup` filters into parameterized SQL
//! fragments. Nothing here talks to a database: every output is SQL text
//! with `?` placeholders plus the ordered [`Value`](value::Value) arguments.
//!
//! ## Module Overview
//!
//! - [`value`] - The backend-agnostic [`Value`](value::Value) enum
//! - [`fields`] - Known-column sets used to drop unknown clause columns
//! - [`query`] - Dialects, lookups, the filter compiler, clause builders,
//!   the [`QuerySet`](query::QuerySet) facade, and statement composition

// format_push_string: format! is clearer than write! for SQL generation
// doc_markdown: backtick requirements for documentation items are too strict
// missing_const_for_fn: several builders may grow non-const bodies
// module_name_repetitions: QuerySet in queryset, FilterKind in conditions
#![allow(clippy::format_push_string)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_pass_by_value)]

pub mod fields;
pub mod query;
pub mod value;

pub use fields::FieldSet;
pub use query::{Backend, Dialect, Lookups, QuerySet, Statement};
pub use value::Value;
