//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// News lookup rejected before reaching the backend (e.g. no city).
    #[error("News lookup failed: {0}")]
    News(String),

    /// Discussion fetch failed outside the HTTP exchange (bad topic, aborted task).
    #[error("Discussion fetch failed: {0}")]
    Discussion(String),

    /// Connection refused, DNS, timeout: the request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-2xx status.
    #[error("Backend error {status}: {body}")]
    Backend { status: u16, body: String },

    /// Response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Input(String),
}
