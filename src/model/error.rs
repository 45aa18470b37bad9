//! Error types for the `urlstate` application shell.
//!
//! The codec and merge operations themselves are total functions and have no
//! error types: malformed query fragments degrade to a partial parse, and
//! merge type conflicts resolve by precedence. Errors exist only at the
//! shell: config file loading, tracing setup, and reading the JSON documents
//! handed to the `merge` subcommand. All variants compose into [`AppError`]
//! via `From`, so the binary propagates with `?` throughout.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error for the `urlstate` binary.
///
/// Everything here is fatal: the CLI prints the message and exits non-zero.
/// Query operations never appear because they cannot fail.
#[derive(Debug, Error)]
pub enum AppError {
    /// Config file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber setup failed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// A JSON document given to the `merge` subcommand was unusable.
    #[error("Merge input error: {0}")]
    MergeInput(#[from] MergeInputError),

    /// I/O failure writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reading the JSON documents for the `merge` subcommand.
///
/// Merge itself is total; these cover getting the two documents into memory.
#[derive(Debug, Error)]
pub enum MergeInputError {
    /// An `@file` argument could not be read.
    #[error("Failed to read {path}: {source}")]
    FileRead {
        /// Path from the `@file` argument.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A document was not valid JSON.
    #[error("Invalid JSON in {role} document: {message}")]
    InvalidJson {
        /// Which argument failed: "primary" or "secondary".
        role: &'static str,
        /// Parser error detail from `serde_json`.
        message: String,
    },
}
