//! # relay-odoo
//!
//! Blocking client for the Odoo external API.
//!
//! [`OdooClient::authenticate`] turns a login into a [`Uid`];
//! [`OdooClient::session`] wraps the uid and password into an
//! [`OdooSession`], the handle every record operation goes through. Calls
//! use the JSON-RPC endpoint (`<url>/jsonrpc`), which exposes the same
//! `common` and `object` services as the XML-RPC one.

pub mod client;
pub mod domain;
pub mod error;
mod rpc;
pub mod value;

pub use client::{FieldInfo, OdooClient, OdooSession, Uid};
pub use domain::{Condition, Domain, NameFilter, Operator};
pub use error::OdooError;
pub use value::Many2One;
