//! Odoo's value conventions: empty fields arrive as `false`, relations as
//! `[id, "display name"]`.

use std::fmt;

use relay_core::RecordId;
use serde::{Deserialize, Serialize};

/// A many-to-one relation as returned by `read`/`search_read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Many2One(pub RecordId, pub String);

impl Many2One {
    pub fn id(&self) -> RecordId {
        self.0
    }

    pub fn display_name(&self) -> &str {
        &self.1
    }
}

impl fmt::Display for Many2One {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.1.fmt(f)
    }
}

/// `deserialize_with` helper mapping `false`/`null` to `None`.
///
/// ```ignore
/// #[serde(default, deserialize_with = "relay_odoo::value::falsy")]
/// work_email: Option<String>,
/// ```
pub fn falsy<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    use serde::de::Error;
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::Bool(false) | serde_json::Value::Null => Ok(None),
        other => T::deserialize(other).map(Some).map_err(D::Error::custom),
    }
}
