//! [`OdooClient`] and the authenticated [`OdooSession`] handle.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use relay_core::{FieldMap, RecordId};

use crate::domain::{Domain, NameFilter};
use crate::error::OdooError;
use crate::rpc;

/// Numeric user id returned by `authenticate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid(pub i64);

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Label and type of one model field, from `fields_get`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldInfo {
    #[serde(rename = "string")]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Endpoint and database. Holds no login state.
#[derive(Debug, Clone)]
pub struct OdooClient {
    url: String,
    database: String,
    agent: ureq::Agent,
}

impl OdooClient {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            database: database.into(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// `common.authenticate`; Odoo answers `false` for a bad login.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Uid, OdooError> {
        tracing::debug!(database = %self.database, username, "authenticating");
        let result = self.call(
            "common",
            "authenticate",
            vec![
                json!(self.database),
                json!(username),
                json!(password),
                json!({}),
            ],
        )?;
        match result {
            Value::Number(n) => n.as_i64().map(Uid).ok_or_else(|| OdooError::Rpc {
                message: format!("unexpected uid {n}"),
                detail: None,
            }),
            _ => Err(OdooError::AuthenticationFailed {
                database: self.database.clone(),
                username: username.to_string(),
            }),
        }
    }

    /// Handle for record calls made as `uid`.
    pub fn session(&self, uid: Uid, password: impl Into<String>) -> OdooSession {
        OdooSession {
            client: self.clone(),
            uid,
            password: password.into(),
        }
    }

    /// `authenticate` followed by `session`.
    pub fn login(&self, username: &str, password: &str) -> Result<OdooSession, OdooError> {
        let uid = self.authenticate(username, password)?;
        Ok(self.session(uid, password))
    }

    fn call(&self, service: &str, method: &str, args: Vec<Value>) -> Result<Value, OdooError> {
        let endpoint = format!("{}/jsonrpc", self.url);
        let request = rpc::Request::call(service, method, args);
        let response = match self.agent.post(&endpoint).send_json(&request) {
            Ok(r) => r,
            Err(ureq::Error::Status(code, r)) => {
                return Err(OdooError::Status {
                    code,
                    body: r.into_string().unwrap_or_default(),
                })
            }
            Err(ureq::Error::Transport(t)) => {
                return Err(OdooError::Transport {
                    url: endpoint,
                    source: Box::new(t),
                })
            }
        };

        let code = response.status();
        let text = response.into_string()?;
        if code != 200 {
            return Err(OdooError::Status { code, body: text });
        }

        let body: rpc::Response = serde_json::from_str(&text)?;
        if let Some(err) = body.error {
            let detail = err.data.and_then(|d| match (d.name, d.message) {
                (Some(name), Some(msg)) => Some(format!("{name}: {msg}")),
                (name, msg) => msg.or(name),
            });
            return Err(OdooError::Rpc {
                message: err.message,
                detail,
            });
        }
        Ok(body.result.unwrap_or(Value::Null))
    }
}

/// Authenticated handle: every record operation goes through `execute_kw`
/// with this uid and password. One call per record, no batching.
#[derive(Clone)]
pub struct OdooSession {
    client: OdooClient,
    uid: Uid,
    password: String,
}

impl fmt::Debug for OdooSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdooSession")
            .field("url", &self.client.url)
            .field("database", &self.client.database)
            .field("uid", &self.uid)
            .finish_non_exhaustive()
    }
}

impl OdooSession {
    pub fn uid(&self) -> Uid {
        self.uid
    }

    /// Identifiers of `model` records, optionally narrowed by `filter`.
    pub fn read_ids(
        &self,
        model: &str,
        filter: Option<&NameFilter>,
    ) -> Result<Vec<RecordId>, OdooError> {
        let domain = Domain::from(filter);
        tracing::debug!(model, ?domain, "search");
        let result = self.execute(model, "search", vec![json!(domain)], None)?;
        Ok(serde_json::from_value(result)?)
    }

    /// `search_read` with only `fields` populated, decoded into `T`.
    pub fn read_fields<T: DeserializeOwned>(
        &self,
        model: &str,
        fields: &[String],
        filter: Option<&NameFilter>,
    ) -> Result<Vec<T>, OdooError> {
        let domain = Domain::from(filter);
        tracing::debug!(model, ?fields, ?domain, "search_read");
        let result = self.execute(
            model,
            "search_read",
            vec![json!(domain)],
            Some(json!({ "fields": fields })),
        )?;
        Ok(serde_json::from_value(result)?)
    }

    pub fn create_record(&self, model: &str, fields: &FieldMap) -> Result<RecordId, OdooError> {
        tracing::debug!(model, "create");
        let result = self.execute(model, "create", vec![json!(fields)], None)?;
        Ok(serde_json::from_value(result)?)
    }

    pub fn update_record(
        &self,
        model: &str,
        id: RecordId,
        fields: &FieldMap,
    ) -> Result<bool, OdooError> {
        tracing::debug!(model, %id, "write");
        let result = self.execute(model, "write", vec![json!([id]), json!(fields)], None)?;
        Ok(result.as_bool().unwrap_or(false))
    }

    pub fn delete_record(&self, model: &str, id: RecordId) -> Result<bool, OdooError> {
        tracing::debug!(model, %id, "unlink");
        let result = self.execute(model, "unlink", vec![json!([id])], None)?;
        Ok(result.as_bool().unwrap_or(false))
    }

    /// Field names of `model` with their label and type.
    pub fn fields_get(&self, model: &str) -> Result<BTreeMap<String, FieldInfo>, OdooError> {
        tracing::debug!(model, "fields_get");
        let result = self.execute(
            model,
            "fields_get",
            vec![],
            Some(json!({ "attributes": ["string", "type"] })),
        )?;
        Ok(serde_json::from_value(result)?)
    }

    fn execute(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Option<Value>,
    ) -> Result<Value, OdooError> {
        self.client.call(
            "object",
            "execute_kw",
            vec![
                json!(self.client.database),
                json!(self.uid.0),
                json!(self.password),
                json!(model),
                json!(method),
                Value::Array(args),
                kwargs.unwrap_or_else(|| json!({})),
            ],
        )
    }
}
