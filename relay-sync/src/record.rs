//! Loosely-shaped CRM rows for procedures whose field list is configurable.
//!
//! Rows are decoded at the client boundary into [`CrmRow`]; values are only
//! ever turned into display text here, never forwarded as write payloads.

use serde::Deserialize;
use serde_json::{Map, Value};

use relay_core::RecordId;

/// One `search_read` row: the record id plus the requested fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrmRow {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CrmRow {
    /// Display text of `field`; empty when absent or unset.
    pub fn text(&self, field: &str) -> String {
        self.fields.get(field).map(field_text).unwrap_or_default()
    }
}

/// Odoo value → display text.
///
/// `false`/`null` are empty, relations `[id, "name"]` show the name.
pub fn field_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".into(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => match items.as_slice() {
            [Value::Number(_), Value::String(name)] => name.clone(),
            _ => items.iter().map(field_text).collect::<Vec<_>>().join(", "),
        },
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_renders_odoo_conventions() {
        let row: CrmRow = serde_json::from_value(json!({
            "id": 7,
            "name": "Andy",
            "work_email": false,
            "job_id": [3, "Developer"],
            "private_zip": 1000,
            "category_ids": [1, 2, 3]
        }))
        .unwrap();
        assert_eq!(row.id, RecordId(7));
        assert_eq!(row.text("name"), "Andy");
        assert_eq!(row.text("work_email"), "");
        assert_eq!(row.text("job_id"), "Developer");
        assert_eq!(row.text("private_zip"), "1000");
        assert_eq!(row.text("category_ids"), "1, 2, 3");
        assert_eq!(row.text("missing"), "");
    }
}
