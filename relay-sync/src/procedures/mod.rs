//! The reconciliation procedures.
//!
//! Each module pairs a pure planner (already-fetched input in, intents out)
//! with a `run` that does the reads, calls the planner and hands the plan to
//! [`crate::executor::apply`].

pub mod address_lookup;
pub mod bulk_delete;
pub mod bulk_export;
pub mod field_push;
pub mod selective_create;
pub mod status_sync;

pub use field_push::FieldPushRequest;
pub use status_sync::StatusMatch;
