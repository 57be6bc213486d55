//! # relay-monday
//!
//! Blocking client for the monday.com GraphQL API.
//!
//! Every operation is a single POST against one endpoint, authenticated by
//! the API key passed to the call. Responses are decoded into typed values
//! at this boundary; anything other than HTTP 200 is a [`MondayError::Status`].

pub mod client;
pub mod error;
pub mod query;
mod wire;

pub use client::{BoardSummary, ColumnSummary, MondayClient};
pub use error::MondayError;
