//! Response shapes as monday.com sends them.

use relay_core::ColumnValue;
use serde::{Deserialize, Deserializer};

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
    /// Older API versions report failures here instead of `errors`.
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Boards<T> {
    pub boards: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsBoard {
    pub items_page: ItemsPage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsPage {
    pub items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Item {
    #[serde(deserialize_with = "flexible_id")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub column_values: Vec<ColumnValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ColumnsBoard {
    pub columns: Vec<Column>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Column {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BoardRow {
    #[serde(deserialize_with = "flexible_id")]
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Created {
    #[serde(deserialize_with = "flexible_id")]
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateBoard {
    pub create_board: Created,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateItem {
    pub create_item: Created,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteItem {
    pub delete_item: Created,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangeColumnValue {
    pub change_simple_column_value: Created,
}

/// monday.com serialises `ID` scalars as strings; accept numbers too.
fn flexible_id<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }
    match Raw::deserialize(d)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_decode_from_strings_and_numbers() {
        let a: Created = serde_json::from_str(r#"{"id":"6076917957"}"#).unwrap();
        let b: Created = serde_json::from_str(r#"{"id":6076917957}"#).unwrap();
        assert_eq!(a.id, 6076917957);
        assert_eq!(b.id, 6076917957);
    }

    #[test]
    fn non_numeric_id_is_a_decode_error() {
        assert!(serde_json::from_str::<Created>(r#"{"id":"abc"}"#).is_err());
    }

    #[test]
    fn items_page_tolerates_missing_column_values() {
        let body = r#"{"boards":[{"items_page":{"items":[{"id":"1","name":"Chaves"}]}}]}"#;
        let data: Boards<ItemsBoard> = serde_json::from_str(body).unwrap();
        let item = &data.boards[0].items_page.items[0];
        assert_eq!(item.name, "Chaves");
        assert!(item.column_values.is_empty());
    }
}
