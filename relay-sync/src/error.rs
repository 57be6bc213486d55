//! Error types for relay-sync.

use thiserror::Error;

use relay_monday::MondayError;
use relay_odoo::OdooError;

/// A failure reported by either remote system.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error(transparent)]
    Board(#[from] MondayError),

    #[error(transparent)]
    Crm(#[from] OdooError),
}

/// All errors that can arise from running a procedure.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The board read failed; nothing was written on either side.
    #[error("failed to fetch data from monday.com: {0}")]
    BoardFetch(#[source] MondayError),

    #[error("failed to fetch data from Odoo: {0}")]
    CrmFetch(#[source] OdooError),

    /// A write failed; every earlier intent in the plan was already applied.
    #[error("failed to {intent}: {source}")]
    Apply {
        intent: String,
        #[source]
        source: RemoteError,
    },

    /// The plan cannot be executed as ordered.
    #[error("invalid plan: {0}")]
    Plan(String),
}
