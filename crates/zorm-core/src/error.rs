//! Core error types for zorm.
//!
//! Every failure while compiling lookups or rendering statements is reported
//! through [`ZormError`]. Compilation never panics on caller input and never
//! hands back a partial fragment: the first error aborts the whole batch.

use thiserror::Error;

/// The broad class an error belongs to.
///
/// Useful for callers that want to map errors onto their own taxonomy
/// (for instance a 400 response for anything caused by the filter input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The lookup key or keyword itself is malformed.
    Syntax,
    /// The lookup is incompatible with the shape of the value.
    Semantic,
    /// The value kind cannot be bound as a parameter.
    Type,
    /// A collection was empty where at least one element is required.
    EmptyInput,
    /// Settings, backend selection, or file access failed.
    Configuration,
}

/// The primary error type for zorm.
#[derive(Error, Debug)]
pub enum ZormError {
    // ── Syntax ───────────────────────────────────────────────────────

    /// A lookup key does not follow `field[__lookup][__Q]`.
    #[error("Malformed lookup key: [{key}]")]
    MalformedLookup {
        /// The offending key as supplied by the caller.
        key: String,
    },

    /// The lookup keyword has no operator in the active dialect.
    #[error("Unknown lookup: [{lookup}]")]
    UnknownLookup {
        /// The unrecognized keyword.
        lookup: String,
    },

    // ── Semantic ─────────────────────────────────────────────────────

    /// A collection-only lookup (`in`, `between`) was given a scalar.
    #[error("Lookup [{lookup}] must be used with a list for key [{key}]")]
    ScalarNotAllowed {
        /// The lookup key.
        key: String,
        /// The lookup keyword.
        lookup: String,
    },

    /// A scalar-only lookup was given a list.
    #[error("Lookup [{lookup}] does not accept a list for key [{key}]")]
    CollectionNotAllowed {
        /// The lookup key.
        key: String,
        /// The lookup keyword.
        lookup: String,
    },

    /// The list has the wrong number of elements for the lookup.
    #[error("Key [{key}] expects {expected} values, got {found}")]
    InvalidArity {
        /// The lookup key.
        key: String,
        /// How many elements the lookup needs.
        expected: usize,
        /// How many elements were supplied.
        found: usize,
    },

    // ── Type ─────────────────────────────────────────────────────────

    /// The value (or a list element) is of a kind that cannot be bound.
    #[error("Unsupported value type [{kind}] for key [{key}]")]
    UnsupportedValue {
        /// The lookup key.
        key: String,
        /// The kind name of the rejected value.
        kind: String,
    },

    // ── Empty input ──────────────────────────────────────────────────

    /// An empty list was supplied.
    #[error("Empty list for key [{key}]")]
    EmptyCollection {
        /// The lookup key.
        key: String,
    },

    /// An UPDATE was rendered without any column to set.
    #[error("Update has no columns to set")]
    EmptyAssignment,

    // ── Configuration ────────────────────────────────────────────────

    /// The configured database engine has no dialect.
    #[error("Unknown database backend: {0}")]
    UnknownBackend(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ZormError {
    /// Returns the category of this error.
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedLookup { .. } | Self::UnknownLookup { .. } => ErrorCategory::Syntax,
            Self::ScalarNotAllowed { .. }
            | Self::CollectionNotAllowed { .. }
            | Self::InvalidArity { .. } => ErrorCategory::Semantic,
            Self::UnsupportedValue { .. } => ErrorCategory::Type,
            Self::EmptyCollection { .. } | Self::EmptyAssignment => ErrorCategory::EmptyInput,
            Self::UnknownBackend(_) | Self::ConfigurationError(_) | Self::IoError(_) => {
                ErrorCategory::Configuration
            }
        }
    }
}

/// A convenience type alias for `Result<T, ZormError>`.
pub type ZormResult<T> = Result<T, ZormError>;
