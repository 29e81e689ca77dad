//! Error types for the colony crate.
//!
//! Graph editing and the colony step never fail; they report no-ops through
//! `bool` / `Option`. Errors are reserved for persistence, configuration,
//! and the one logic error of the engine: a walker whose visited sequence
//! crosses a pair of towns with no path between them.

use thiserror::Error;

use crate::models::TownId;

/// Result type alias using [`AcoError`].
pub type Result<T> = std::result::Result<T, AcoError>;

/// Unified error type for colony operations.
#[derive(Debug, Error)]
pub enum AcoError {
    /// A walker moved between two towns that no path connects.
    #[error("broken trip: no path between {from} and {to}")]
    BrokenTrip { from: TownId, to: TownId },

    /// A persisted line could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A persisted path line references a town index that does not exist.
    #[error("line {line}: town index {index} out of range")]
    TownIndex { line: usize, index: usize },

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON decoding of a configuration failed.
    #[error("configuration error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a persisted canvas failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
