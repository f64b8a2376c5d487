//! Crate-level error types.
//!
//! [`TickerboardError`] covers the few things that can fail outside the
//! core store: configuration, terminal and file I/O, and seed-file contents.
//! The store and simulator themselves never fail.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TickerboardError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum TickerboardError {
    /// An environment variable held a value that could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal, log file or seed file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// A seed file parsed but holds assets the board cannot use.
    #[error("invalid seed data: {0}")]
    InvalidSeed(String),

    /// A seed file could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
