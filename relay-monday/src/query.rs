//! GraphQL documents sent by [`MondayClient`](crate::MondayClient).
//!
//! All caller-supplied values travel as variables; nothing is spliced into
//! the document text.

pub const LIST_BOARDS: &str = "query { boards { id name } }";

pub const BOARD_COLUMNS: &str =
    "query ($board: [ID!]) { boards (ids: $board) { columns { id title } } }";

pub const ITEMS_AND_NAMES: &str =
    "query ($board: [ID!]) { boards (ids: $board) { items_page { items { id name } } } }";

pub const ITEMS_WITH_COLUMN: &str = "query ($board: [ID!], $column: [String!]) { \
     boards (ids: $board) { items_page { items { id name \
     column_values (ids: $column) { id text } } } } }";

pub const CREATE_BOARD: &str =
    "mutation ($name: String!) { create_board (board_name: $name, board_kind: public) { id } }";

pub const CREATE_ITEM: &str = "mutation ($board: ID!, $name: String!, $values: JSON) { \
     create_item (board_id: $board, item_name: $name, column_values: $values) { id } }";

pub const DELETE_ITEM: &str = "mutation ($item: ID!) { delete_item (item_id: $item) { id } }";

pub const CHANGE_COLUMN_VALUE: &str =
    "mutation ($board: ID!, $item: ID!, $column: String!, $value: String) { \
     change_simple_column_value (board_id: $board, item_id: $item, column_id: $column, value: $value) { id } }";
