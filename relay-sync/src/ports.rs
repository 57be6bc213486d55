//! The two seams between the procedures and the outside world.
//!
//! [`MondayBoard`] and [`relay_odoo::OdooSession`] are the production
//! implementations; tests substitute recording fakes.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use relay_core::{BoardId, BoardItem, FieldMap, ItemId, RecordId};
use relay_monday::{MondayClient, MondayError};
use relay_odoo::{NameFilter, OdooError, OdooSession};

/// Board-tool operations the procedures need.
pub trait BoardApi {
    fn read_items_and_names(&self, board: BoardId) -> Result<Vec<BoardItem>, MondayError>;

    fn read_items_with_column(
        &self,
        board: BoardId,
        column: &str,
    ) -> Result<Vec<BoardItem>, MondayError>;

    fn create_board(&self, name: &str) -> Result<BoardId, MondayError>;

    fn create_item(
        &self,
        board: BoardId,
        name: &str,
        column_values: &BTreeMap<String, String>,
    ) -> Result<ItemId, MondayError>;

    fn delete_item(&self, item: ItemId) -> Result<ItemId, MondayError>;

    fn change_column_value(
        &self,
        board: BoardId,
        item: ItemId,
        column: &str,
        value: &str,
    ) -> Result<ItemId, MondayError>;
}

/// CRM operations the procedures need.
pub trait CrmApi {
    fn read_ids(&self, model: &str, filter: Option<&NameFilter>)
        -> Result<Vec<RecordId>, OdooError>;

    fn read_fields<T: DeserializeOwned>(
        &self,
        model: &str,
        fields: &[String],
        filter: Option<&NameFilter>,
    ) -> Result<Vec<T>, OdooError>;

    fn create_record(&self, model: &str, fields: &FieldMap) -> Result<RecordId, OdooError>;

    fn update_record(&self, model: &str, id: RecordId, fields: &FieldMap)
        -> Result<bool, OdooError>;

    fn delete_record(&self, model: &str, id: RecordId) -> Result<bool, OdooError>;
}

/// A [`MondayClient`] paired with the API key every call needs.
#[derive(Debug, Clone, Copy)]
pub struct MondayBoard<'a> {
    pub client: &'a MondayClient,
    pub api_key: &'a str,
}

impl<'a> MondayBoard<'a> {
    pub fn new(client: &'a MondayClient, api_key: &'a str) -> Self {
        Self { client, api_key }
    }
}

impl BoardApi for MondayBoard<'_> {
    fn read_items_and_names(&self, board: BoardId) -> Result<Vec<BoardItem>, MondayError> {
        self.client.read_items_and_names(self.api_key, board)
    }

    fn read_items_with_column(
        &self,
        board: BoardId,
        column: &str,
    ) -> Result<Vec<BoardItem>, MondayError> {
        self.client.read_items_with_column(self.api_key, board, column)
    }

    fn create_board(&self, name: &str) -> Result<BoardId, MondayError> {
        self.client.create_board(self.api_key, name)
    }

    fn create_item(
        &self,
        board: BoardId,
        name: &str,
        column_values: &BTreeMap<String, String>,
    ) -> Result<ItemId, MondayError> {
        let values: serde_json::Map<String, serde_json::Value> = column_values
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        self.client
            .create_item(self.api_key, board, name, Some(&values))
    }

    fn delete_item(&self, item: ItemId) -> Result<ItemId, MondayError> {
        self.client.delete_item(self.api_key, item)
    }

    fn change_column_value(
        &self,
        board: BoardId,
        item: ItemId,
        column: &str,
        value: &str,
    ) -> Result<ItemId, MondayError> {
        self.client
            .change_column_value(self.api_key, board, item, column, value)
    }
}

impl CrmApi for OdooSession {
    fn read_ids(
        &self,
        model: &str,
        filter: Option<&NameFilter>,
    ) -> Result<Vec<RecordId>, OdooError> {
        OdooSession::read_ids(self, model, filter)
    }

    fn read_fields<T: DeserializeOwned>(
        &self,
        model: &str,
        fields: &[String],
        filter: Option<&NameFilter>,
    ) -> Result<Vec<T>, OdooError> {
        OdooSession::read_fields(self, model, fields, filter)
    }

    fn create_record(&self, model: &str, fields: &FieldMap) -> Result<RecordId, OdooError> {
        OdooSession::create_record(self, model, fields)
    }

    fn update_record(
        &self,
        model: &str,
        id: RecordId,
        fields: &FieldMap,
    ) -> Result<bool, OdooError> {
        OdooSession::update_record(self, model, id, fields)
    }

    fn delete_record(&self, model: &str, id: RecordId) -> Result<bool, OdooError> {
        OdooSession::delete_record(self, model, id)
    }
}
