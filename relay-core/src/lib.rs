//! relay core library: domain types, settings, credential store, errors.
//!
//! - [`types`]: identifier newtypes, board items, CRM field payloads
//! - [`stage`]: status label → stage table
//! - [`config`]: [`Settings`] load / save / validate
//! - [`credentials`]: [`SecretStore`]
//! - [`error`]: [`ConfigError`], [`CredentialError`]

pub mod config;
pub mod credentials;
pub mod error;
mod fsutil;
pub mod paths;
pub mod stage;
pub mod types;

pub use config::Settings;
pub use credentials::{SecretStore, Secrets};
pub use error::{ConfigError, CredentialError};
pub use stage::{StageEntry, StageTable};
pub use types::{BoardId, BoardItem, ColumnValue, FieldMap, FieldValue, ItemId, RecordId, StageId};
