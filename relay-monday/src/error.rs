//! Error types for relay-monday.

use thiserror::Error;

/// All errors that can arise from a board-tool call.
#[derive(Debug, Error)]
pub enum MondayError {
    /// The endpoint answered with something other than HTTP 200.
    #[error("monday.com returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// Connection, DNS or TLS failure before any status was received.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    /// The body could not be read or was not the expected JSON shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read response body: {0}")]
    Read(#[from] std::io::Error),

    /// HTTP 200 but the GraphQL layer reported errors.
    #[error("monday.com rejected the request: {}", .messages.join("; "))]
    Api { messages: Vec<String> },
}
