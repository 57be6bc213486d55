//! Domain types shared by the board client, the CRM client and the
//! reconciliation procedures.
//!
//! Identifiers are newtypes so a board item id can never be handed to a CRM
//! call by accident. Everything here is ephemeral: fetched per call, never
//! cached between runs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier of a board on the work-management side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(pub u64);

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for BoardId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifier of a single item (row) on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for ItemId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifier of a CRM record within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for RecordId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

/// Recruitment stage identifier on the CRM side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(pub i64);

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for StageId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

// ---------------------------------------------------------------------------
// Board side
// ---------------------------------------------------------------------------

/// The text of one column on a board item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnValue {
    pub id: String,
    /// `None` when the column is empty on the board.
    #[serde(default)]
    pub text: Option<String>,
}

/// A board item with the columns that were requested alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub column_values: Vec<ColumnValue>,
}

impl BoardItem {
    /// Convenience constructor for an item without column values.
    pub fn named(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            column_values: vec![],
        }
    }

    /// Text of the first requested column, if the board returned one.
    pub fn first_column_text(&self) -> Option<&str> {
        self.column_values.first().and_then(|c| c.text.as_deref())
    }
}

// ---------------------------------------------------------------------------
// CRM side
// ---------------------------------------------------------------------------

/// A scalar field value written to the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => b.fmt(f),
            FieldValue::Int(i) => i.fmt(f),
            FieldValue::Float(x) => x.fmt(f),
            FieldValue::Text(s) => s.fmt(f),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<StageId> for FieldValue {
    fn from(v: StageId) -> Self {
        Self::Int(v.0)
    }
}

/// Field name → value payload for a CRM create or update.
///
/// Ordered so two payloads built from the same inputs compare and print
/// identically.
pub type FieldMap = BTreeMap<String, FieldValue>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(BoardId::from(5990805927).to_string(), "5990805927");
        assert_eq!(ItemId::from(42).to_string(), "42");
        assert_eq!(RecordId::from(-1).to_string(), "-1");
        assert_eq!(StageId::from(3).to_string(), "3");
    }

    #[test]
    fn first_column_text_handles_missing_and_empty_columns() {
        let mut item = BoardItem::named(1, "Ana");
        assert_eq!(item.first_column_text(), None);

        item.column_values.push(ColumnValue {
            id: "status".into(),
            text: None,
        });
        assert_eq!(item.first_column_text(), None);

        item.column_values[0].text = Some("New".into());
        assert_eq!(item.first_column_text(), Some("New"));
    }

    #[test]
    fn field_value_serializes_untagged() {
        let mut fields = FieldMap::new();
        fields.insert("partner_name".into(), "Ana".into());
        fields.insert("stage_id".into(), StageId(1).into());
        fields.insert("active".into(), true.into());
        let json = serde_yaml::to_string(&fields).expect("serialize");
        assert!(json.contains("partner_name: Ana"));
        assert!(json.contains("stage_id: 1"));
        assert!(json.contains("active: true"));
    }
}
