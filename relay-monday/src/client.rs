//! [`MondayClient`]: one method per board-tool operation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use relay_core::{BoardId, BoardItem, ItemId};

use crate::error::MondayError;
use crate::query;
use crate::wire;

/// A board as listed by [`MondayClient::list_boards`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSummary {
    pub id: BoardId,
    pub name: String,
}

/// A column as listed by [`MondayClient::board_columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub id: String,
    pub title: String,
}

/// Stateless apart from the endpoint URL and the connection pool.
#[derive(Debug, Clone)]
pub struct MondayClient {
    api_url: String,
    agent: ureq::Agent,
}

impl MondayClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn list_boards(&self, api_key: &str) -> Result<Vec<BoardSummary>, MondayError> {
        tracing::debug!("listing boards");
        let data: wire::Boards<wire::BoardRow> = self.post(api_key, query::LIST_BOARDS, json!({}))?;
        Ok(data
            .boards
            .into_iter()
            .map(|b| BoardSummary {
                id: BoardId(b.id),
                name: b.name,
            })
            .collect())
    }

    pub fn board_columns(
        &self,
        api_key: &str,
        board: BoardId,
    ) -> Result<Vec<ColumnSummary>, MondayError> {
        tracing::debug!(%board, "listing board columns");
        let data: wire::Boards<wire::ColumnsBoard> = self.post(
            api_key,
            query::BOARD_COLUMNS,
            json!({ "board": [board.to_string()] }),
        )?;
        Ok(data
            .boards
            .into_iter()
            .flat_map(|b| b.columns)
            .map(|c| ColumnSummary {
                id: c.id,
                title: c.title,
            })
            .collect())
    }

    /// Identifiers and names of every item on `board` (first page only).
    pub fn read_items_and_names(
        &self,
        api_key: &str,
        board: BoardId,
    ) -> Result<Vec<BoardItem>, MondayError> {
        tracing::debug!(%board, "reading item names");
        let data: wire::Boards<wire::ItemsBoard> = self.post(
            api_key,
            query::ITEMS_AND_NAMES,
            json!({ "board": [board.to_string()] }),
        )?;
        Ok(flatten_items(data))
    }

    /// Items of `board` with the text of `column` in `column_values`.
    pub fn read_items_with_column(
        &self,
        api_key: &str,
        board: BoardId,
        column: &str,
    ) -> Result<Vec<BoardItem>, MondayError> {
        tracing::debug!(%board, column, "reading items with column");
        let data: wire::Boards<wire::ItemsBoard> = self.post(
            api_key,
            query::ITEMS_WITH_COLUMN,
            json!({ "board": [board.to_string()], "column": [column] }),
        )?;
        Ok(flatten_items(data))
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    pub fn create_board(&self, api_key: &str, name: &str) -> Result<BoardId, MondayError> {
        tracing::debug!(name, "creating board");
        let data: wire::CreateBoard =
            self.post(api_key, query::CREATE_BOARD, json!({ "name": name }))?;
        Ok(BoardId(data.create_board.id))
    }

    /// Create an item, optionally filling columns (`column id → value`).
    pub fn create_item(
        &self,
        api_key: &str,
        board: BoardId,
        name: &str,
        column_values: Option<&Map<String, Value>>,
    ) -> Result<ItemId, MondayError> {
        tracing::debug!(%board, name, "creating item");
        // The `JSON` scalar expects the column map as an encoded string.
        let values = match column_values {
            Some(map) if !map.is_empty() => Value::String(serde_json::to_string(map)?),
            _ => Value::Null,
        };
        let data: wire::CreateItem = self.post(
            api_key,
            query::CREATE_ITEM,
            json!({ "board": board.to_string(), "name": name, "values": values }),
        )?;
        Ok(ItemId(data.create_item.id))
    }

    pub fn delete_item(&self, api_key: &str, item: ItemId) -> Result<ItemId, MondayError> {
        tracing::debug!(%item, "deleting item");
        let data: wire::DeleteItem =
            self.post(api_key, query::DELETE_ITEM, json!({ "item": item.to_string() }))?;
        Ok(ItemId(data.delete_item.id))
    }

    pub fn change_column_value(
        &self,
        api_key: &str,
        board: BoardId,
        item: ItemId,
        column: &str,
        value: &str,
    ) -> Result<ItemId, MondayError> {
        tracing::debug!(%board, %item, column, "changing column value");
        let data: wire::ChangeColumnValue = self.post(
            api_key,
            query::CHANGE_COLUMN_VALUE,
            json!({
                "board": board.to_string(),
                "item": item.to_string(),
                "column": column,
                "value": value,
            }),
        )?;
        Ok(ItemId(data.change_simple_column_value.id))
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    fn post<T: DeserializeOwned>(
        &self,
        api_key: &str,
        query: &str,
        variables: impl Serialize,
    ) -> Result<T, MondayError> {
        let body = json!({ "query": query, "variables": variables });
        let response = match self
            .agent
            .post(&self.api_url)
            .set("Authorization", api_key)
            .set("Content-Type", "application/json")
            .send_json(body)
        {
            Ok(r) => r,
            Err(ureq::Error::Status(code, r)) => {
                return Err(MondayError::Status {
                    code,
                    body: r.into_string().unwrap_or_default(),
                })
            }
            Err(ureq::Error::Transport(t)) => {
                return Err(MondayError::Transport {
                    url: self.api_url.clone(),
                    source: Box::new(t),
                })
            }
        };

        let code = response.status();
        let text = response.into_string()?;
        if code != 200 {
            return Err(MondayError::Status { code, body: text });
        }

        let envelope: wire::Envelope<T> = serde_json::from_str(&text)?;
        let mut messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        messages.extend(envelope.error_message);
        if !messages.is_empty() {
            return Err(MondayError::Api { messages });
        }
        envelope.data.ok_or_else(|| MondayError::Api {
            messages: vec!["response carried no data".into()],
        })
    }
}

fn flatten_items(data: wire::Boards<wire::ItemsBoard>) -> Vec<BoardItem> {
    data.boards
        .into_iter()
        .flat_map(|b| b.items_page.items)
        .map(|i| BoardItem {
            id: ItemId(i.id),
            name: i.name,
            column_values: i.column_values,
        })
        .collect()
}
