//! # relay-sync
//!
//! Reconciliation between the board tool and the CRM.
//!
//! Each procedure in [`procedures`] fetches its input through the
//! [`BoardApi`] / [`CrmApi`] ports, hands it to a pure planner that returns
//! an ordered list of [`Intent`]s, and lets [`executor::apply`] issue them,
//! reporting each result through a [`RunContext`] as it happens.
//! [`pipeline::run`] dispatches a [`Procedure`] by name.

pub mod error;
pub mod executor;
pub mod intent;
pub mod pipeline;
pub mod ports;
pub mod procedures;
pub mod record;

pub use error::{RemoteError, SyncError};
pub use executor::{apply, ApplyResult, CreatedId, OnError, Progress, RunContext};
pub use intent::{BoardTarget, Intent};
pub use pipeline::{Procedure, ProcedureReport, Skipped};
pub use ports::{BoardApi, CrmApi, MondayBoard};
