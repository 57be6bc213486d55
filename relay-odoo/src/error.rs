//! Error types for relay-odoo.

use thiserror::Error;

/// All errors that can arise from a CRM call.
#[derive(Debug, Error)]
pub enum OdooError {
    #[error("Odoo returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    #[error("failed to read response body: {0}")]
    Read(#[from] std::io::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with a JSON-RPC `error` member.
    #[error("Odoo error: {message}{}", .detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    Rpc {
        message: String,
        detail: Option<String>,
    },

    /// `authenticate` answered `false`: wrong database, login or password.
    #[error("authentication failed for '{username}' on database '{database}'")]
    AuthenticationFailed { database: String, username: String },
}
