//! Error types for the snapshot pipeline
//!
//! Uses thiserror for ergonomic error definitions.
//! A failed fetch never panics; the cycle logs it and waits for the next tick.

use thiserror::Error;

/// Errors raised while fetching or decoding one snapshot.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-2xx response. `message` is the `error` field of the body when the
    /// producer supplied one, otherwise the HTTP status line.
    #[error("server error ({status}): {message}")]
    Http { status: u16, message: String },

    /// Transport-level failure (connect, timeout, TLS, ...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Body was not valid JSON at all. Missing fields inside valid JSON are
    /// NOT an error; the schema defaults them.
    #[error("undecodable snapshot body: {0}")]
    Decode(#[from] serde_json::Error),
}
