//! Error types for universe generation.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised while reading a name corpus or training chains on it.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid UTF-8 in corpus at line {line}")]
    InvalidUtf8 { line: usize },

    #[error("corpus has no word longer than the prefix length {prefix_length}")]
    NoUsableWords { prefix_length: usize },
}

/// Errors reported by a persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    #[error("duplicate: {0}")]
    Duplicate(String),

    #[error("store error: {0}")]
    Backend(String),
}

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("cannot place {requested} non-overlapping regions: only {placed} fit after {attempts} attempts")]
    InfeasibleRegions {
        placed: usize,
        requested: usize,
        attempts: usize,
    },

    #[error("no unused name after {attempts} attempts ({used} names already taken)")]
    NamesExhausted { attempts: usize, used: usize },

    #[error("name generator produced an empty name")]
    EmptyName,

    #[error("no place at ({x}, {y}) for wormhole endpoint")]
    UnknownEndpoint { x: i64, y: i64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}
