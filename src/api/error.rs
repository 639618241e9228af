//! Error types for the API layer.

use thiserror::Error;

/// Error type for transport-level HTTP failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// Includes DNS resolution failures, connection refused, and other
    /// network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out at the transport level.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// Indicates a configuration error rather than a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for resource-level API failures.
///
/// Every variant is fatal for the run: the tool performs no retries, and
/// each pipeline stage depends on the data from the previous one.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection, transport timeout, bad URL).
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The per-call deadline expired before a response arrived.
    #[error("Call to {url} timed out after {seconds}s")]
    Timeout {
        /// The URL that was being fetched
        url: String,
        /// The configured deadline in whole seconds
        seconds: u64,
    },

    /// The server answered with a non-2xx status.
    #[error("{url} returned {status}{}", body_excerpt(body.as_deref()))]
    Status {
        /// The URL that was requested
        url: String,
        /// The response status code
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },

    /// The response body was not the expected JSON shape.
    #[error("Malformed response from {url}: {reason}")]
    Malformed {
        /// The URL that produced the body
        url: String,
        /// What was wrong with it
        reason: String,
    },

    /// A page came back empty before the collection total was reached.
    ///
    /// Distinguishes "collection exhausted" from "the server stopped
    /// returning elements"; the latter would silently under-report.
    #[error("{endpoint} pagination ended early: got {got} of {total} elements")]
    ShortPage {
        /// The collection endpoint being paginated
        endpoint: String,
        /// Elements accumulated so far
        got: u64,
        /// Total the server advertised
        total: u64,
    },
}

/// Formats an optional response body for the `Status` error message.
fn body_excerpt(body: Option<&str>) -> String {
    match body {
        Some(text) if !text.trim().is_empty() => {
            // Keep error lines readable when the server dumps HTML
            let excerpt: String = text.trim().chars().take(200).collect();
            format!(": {excerpt}")
        }
        _ => String::new(),
    }
}
