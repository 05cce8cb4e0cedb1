// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the subset-scoring engine.
//!
//! Numerical edge cases (empty variable sets, empty datasets, zero-probability
//! states) are not errors: they resolve to `0.0`. Failed validation checks are not
//! errors either; they surface as negative verdicts in a
//! [`ValidationReport`](crate::validation::ValidationReport). What remains is
//! schema lookup, dataset construction and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Convenient `Result` alias used across the crate.
pub type Result<T> = std::result::Result<T, InfoSubsetError>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum InfoSubsetError {
    /// A target or candidate name that is not a column of the dataset.
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// The same column name appears twice in a schema.
    #[error("Duplicate variable in schema: {0}")]
    DuplicateVariable(String),

    /// A row whose width does not match the schema.
    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Number of columns in the schema.
        expected: usize,
        /// Number of values in the row.
        found: usize,
    },

    /// Code matrix width does not match the number of column names.
    #[error("Shape mismatch: expected {expected} columns, found {found}")]
    ShapeMismatch {
        /// Number of column names.
        expected: usize,
        /// Number of columns in the matrix.
        found: usize,
    },

    /// A column whose length differs from the first column.
    #[error("Column `{name}` has {found} values, expected {expected}")]
    ColumnLength {
        /// Column name.
        name: String,
        /// Length of the first column.
        expected: usize,
        /// Length of this column.
        found: usize,
    },

    /// Code matrix could not be shaped.
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// The brute-force search was given more candidates than its configured limit.
    #[error("Search pool of {size} variables exceeds the limit of {limit}")]
    SearchPoolTooLarge {
        /// Number of candidates supplied.
        size: usize,
        /// Configured limit.
        limit: usize,
    },

    /// Configuration loading or validation failure.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds a value outside its admissible range.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file could not be read or written.
    #[error("Cannot access config file {path:?}: {source}")]
    FileRead {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON.
    #[error("Malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
