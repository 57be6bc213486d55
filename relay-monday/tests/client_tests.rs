//! MondayClient request construction and response handling against a local
//! stand-in server.

use mockito::Matcher;
use relay_core::{BoardId, ItemId};
use relay_monday::{MondayClient, MondayError};
use serde_json::json;

const KEY: &str = "test-api-key";

fn client(server: &mockito::Server) -> MondayClient {
    MondayClient::new(server.url())
}

// ---------------------------------------------------------------------------
// 1. Reads
// ---------------------------------------------------------------------------

#[test]
fn read_items_and_names_sends_key_and_board_variable() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/")
        .match_header("authorization", KEY)
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({ "variables": { "board": ["5990805927"] } })))
        .with_status(200)
        .with_body(
            json!({ "data": { "boards": [ { "items_page": { "items": [
                { "id": "11", "name": "Chaves" },
                { "id": "12", "name": "Bob" }
            ] } } ] } })
            .to_string(),
        )
        .create();

    let items = client(&server)
        .read_items_and_names(KEY, BoardId(5990805927))
        .expect("read");

    mock.assert();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, ItemId(11));
    assert_eq!(items[0].name, "Chaves");
    assert_eq!(items[1].name, "Bob");
}

#[test]
fn read_items_with_column_returns_column_text() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "variables": { "column": ["status"] } })))
        .with_status(200)
        .with_body(
            json!({ "data": { "boards": [ { "items_page": { "items": [
                { "id": "1", "name": "Ana", "column_values": [ { "id": "status", "text": "New" } ] },
                { "id": "2", "name": "Rui", "column_values": [ { "id": "status", "text": null } ] },
                { "id": "3", "name": "Eve", "column_values": [] }
            ] } } ] } })
            .to_string(),
        )
        .create();

    let items = client(&server)
        .read_items_with_column(KEY, BoardId(1), "status")
        .expect("read");

    mock.assert();
    assert_eq!(items[0].first_column_text(), Some("New"));
    assert_eq!(items[1].first_column_text(), None);
    assert_eq!(items[2].first_column_text(), None);
}

#[test]
fn board_columns_lists_ids_and_titles() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(
            json!({ "data": { "boards": [ { "columns": [
                { "id": "name", "title": "Name" },
                { "id": "status", "title": "Status" }
            ] } ] } })
            .to_string(),
        )
        .create();

    let columns = client(&server).board_columns(KEY, BoardId(9)).expect("columns");
    let ids: Vec<_> = columns.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["name", "status"]);
}

// ---------------------------------------------------------------------------
// 2. Writes
// ---------------------------------------------------------------------------

#[test]
fn create_board_passes_name_as_variable() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(
            json!({ "variables": { "name": "Employees \"from\" Odoo" } }),
        ))
        .with_status(200)
        .with_body(r#"{"data":{"create_board":{"id":"777"}}}"#)
        .create();

    let id = client(&server)
        .create_board(KEY, "Employees \"from\" Odoo")
        .expect("create");

    mock.assert();
    assert_eq!(id, BoardId(777));
}

#[test]
fn create_item_encodes_column_values_as_json_string() {
    let mut server = mockito::Server::new();
    let mut values = serde_json::Map::new();
    values.insert("email".into(), json!("andy@example.com"));
    let encoded = serde_json::to_string(&values).unwrap();

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "variables": {
            "board": "777", "name": "Andy", "values": encoded
        } })))
        .with_status(200)
        .with_body(r#"{"data":{"create_item":{"id":"901"}}}"#)
        .create();

    let id = client(&server)
        .create_item(KEY, BoardId(777), "Andy", Some(&values))
        .expect("create");

    mock.assert();
    assert_eq!(id, ItemId(901));
}

#[test]
fn create_item_without_values_sends_null() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "variables": { "values": null } })))
        .with_status(200)
        .with_body(r#"{"data":{"create_item":{"id":"5"}}}"#)
        .create();

    client(&server)
        .create_item(KEY, BoardId(1), "Andy", None)
        .expect("create");
    mock.assert();
}

#[test]
fn delete_item_returns_deleted_id() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "variables": { "item": "6076917957" } })))
        .with_status(200)
        .with_body(r#"{"data":{"delete_item":{"id":"6076917957"}}}"#)
        .create();

    let id = client(&server).delete_item(KEY, ItemId(6076917957)).expect("delete");
    mock.assert();
    assert_eq!(id, ItemId(6076917957));
}

// ---------------------------------------------------------------------------
// 3. Failures
// ---------------------------------------------------------------------------

#[test]
fn non_200_status_is_reported_with_code() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/")
        .with_status(401)
        .with_body("Not Authenticated")
        .create();

    let err = client(&server)
        .read_items_and_names(KEY, BoardId(1))
        .unwrap_err();
    assert!(matches!(err, MondayError::Status { code: 401, .. }), "got: {err}");
    assert!(err.to_string().contains("Not Authenticated"));
}

#[test]
fn graphql_errors_surface_as_api_error() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{"data":null,"errors":[{"message":"Board not found"}]}"#)
        .create();

    let err = client(&server).create_board(KEY, "x").unwrap_err();
    match err {
        MondayError::Api { messages } => assert_eq!(messages, ["Board not found"]),
        other => panic!("expected Api error, got {other}"),
    }
}

#[test]
fn malformed_body_is_a_decode_error() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{"data":{"boards":"nope"}}"#)
        .create();

    let err = client(&server).read_items_and_names(KEY, BoardId(1)).unwrap_err();
    assert!(matches!(err, MondayError::Decode(_)), "got: {err}");
}

#[test]
fn unreachable_endpoint_is_a_transport_error() {
    let client = MondayClient::new("http://127.0.0.1:9");
    let err = client.list_boards(KEY).unwrap_err();
    assert!(matches!(err, MondayError::Transport { .. }), "got: {err}");
}
