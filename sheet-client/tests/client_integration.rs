// sheet-client/tests/client_integration.rs
// 集成测试 - against an httpmock endpoint

use httpmock::prelude::*;
use serde_json::json;
use sheet_client::{ClientConfig, ClientError, RecordDraft, RecordStatus, RemoteStore, SheetClient};

const EXEC_PATH: &str = "/macros/s/test/exec";

fn client_for(server: &MockServer) -> SheetClient {
    ClientConfig::new(server.url(EXEC_PATH))
        .with_timeout(5)
        .build_client()
        .unwrap()
}

fn ann_json() -> serde_json::Value {
    json!({
        "id": "1",
        "name": "Ann",
        "role": "Eng",
        "department": "R&D",
        "email": "a@x.com",
        "status": "Active"
    })
}

#[tokio::test]
async fn test_list_preserves_remote_order() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path(EXEC_PATH).query_param("action", "read");
        then.status(200).json_body(json!({
            "status": "success",
            "data": [
                ann_json(),
                { "id": "2", "name": "Bo", "role": "PM", "department": "Ops", "email": "b@x.com", "status": "On Leave" },
                { "id": "3", "name": "Cy", "role": "QA", "department": "R&D", "email": "c@x.com", "status": "Inactive" }
            ]
        }));
    });

    let records = client_for(&server).list().await.unwrap();

    mock.assert();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert_eq!(records[1].status, RecordStatus::OnLeave);
}

#[tokio::test]
async fn test_list_drops_rows_without_id_and_duplicates() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(EXEC_PATH);
        then.status(200).json_body(json!({
            "status": "success",
            "data": [
                ann_json(),
                { "id": "", "name": "", "role": "", "department": "", "email": "", "status": "" },
                { "id": "1", "name": "Ann copy", "role": "Eng", "department": "R&D", "email": "a2@x.com", "status": "Active" }
            ]
        }));
    });

    let records = client_for(&server).list().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Ann");
}

#[tokio::test]
async fn test_list_accepts_hand_typed_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(EXEC_PATH);
        then.status(200).json_body(json!({
            "status": "success",
            "data": [
                { "id": "7", "name": "Bo", "role": "PM", "department": "Ops", "email": "b@x.com", "status": "on leave" }
            ]
        }));
    });

    let records = client_for(&server).list().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, RecordStatus::OnLeave);
}

#[tokio::test]
async fn test_list_skips_row_with_unknown_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(EXEC_PATH);
        then.status(200).json_body(json!({
            "status": "success",
            "data": [
                ann_json(),
                { "id": "2", "name": "Cy", "role": "Ops", "department": "IT", "email": "c@x.com", "status": "Retired" }
            ]
        }));
    });

    let records = client_for(&server).list().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "1");
}

#[tokio::test]
async fn test_list_reports_endpoint_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(EXEC_PATH);
        then.status(200)
            .json_body(json!({ "status": "error", "message": "Sheet created. Please retry." }));
    });

    let err = client_for(&server).list().await.unwrap_err();

    assert!(err.is_remote());
    assert_eq!(err.to_string(), "Sheet created. Please retry.");
}

#[tokio::test]
async fn test_list_success_without_data_is_invalid() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(EXEC_PATH);
        then.status(200).json_body(json!({ "status": "success" }));
    });

    let err = client_for(&server).list().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_list_non_json_body_is_transport_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(EXEC_PATH);
        then.status(200)
            .header("content-type", "text/html")
            .body("<html>Sign in</html>");
    });

    let err = client_for(&server).list().await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_non_2xx_with_unparseable_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(EXEC_PATH);
        then.status(502).body("Bad Gateway");
    });

    let err = client_for(&server).list().await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.to_string().contains("502"), "unexpected message: {err}");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on the discard port
    let client = ClientConfig::new("http://127.0.0.1:9/exec")
        .with_timeout(2)
        .build_client()
        .unwrap();

    let err = client.list().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_create_sends_plain_text_body_and_returns_minted_id() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(EXEC_PATH)
            .header("content-type", "text/plain;charset=utf-8")
            .json_body(json!({
                "action": "create",
                "data": { "name": "Bo", "role": "PM", "department": "Ops", "email": "b@x.com", "status": "Active" }
            }));
        then.status(200).json_body(json!({
            "status": "success",
            "data": { "id": "99", "name": "Bo", "role": "PM", "department": "Ops", "email": "b@x.com", "status": "Active" }
        }));
    });

    let draft = RecordDraft::new("Bo", "PM", "Ops", "b@x.com", RecordStatus::Active);
    let record = client_for(&server).create(&draft).await.unwrap();

    mock.assert();
    assert_eq!(record.id, "99");
    assert_eq!(record.to_draft(), draft);
}

#[tokio::test]
async fn test_create_without_id_is_invalid() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(EXEC_PATH);
        then.status(200).json_body(json!({
            "status": "success",
            "data": { "name": "Bo", "role": "PM", "department": "Ops", "email": "b@x.com", "status": "Active" }
        }));
    });

    let draft = RecordDraft::new("Bo", "PM", "Ops", "b@x.com", RecordStatus::Active);
    let err = client_for(&server).create(&draft).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_update_surfaces_id_not_found() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(EXEC_PATH)
            .body_includes("\"action\":\"update\"");
        then.status(200)
            .json_body(json!({ "status": "error", "message": "ID not found" }));
    });

    let record = RecordDraft::new("Ann", "Eng", "R&D", "a@x.com", RecordStatus::Active)
        .into_record("missing");
    let err = client_for(&server).update(&record).await.unwrap_err();

    mock.assert();
    assert!(matches!(&err, ClientError::Remote(m) if m == "ID not found"));
}

#[tokio::test]
async fn test_update_returns_endpoint_record() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(EXEC_PATH).json_body(json!({
            "action": "update",
            "data": { "id": "1", "name": "Ann", "role": "Lead", "department": "R&D", "email": "a@x.com", "status": "Active" }
        }));
        then.status(200).json_body(json!({
            "status": "success",
            "data": { "id": "1", "name": "Ann", "role": "Lead", "department": "R&D", "email": "a@x.com", "status": "Active" }
        }));
    });

    let record = RecordDraft::new("Ann", "Lead", "R&D", "a@x.com", RecordStatus::Active)
        .into_record("1");
    let updated = client_for(&server).update(&record).await.unwrap();
    assert_eq!(updated, record);
}

#[tokio::test]
async fn test_delete_success_and_not_found() {
    let server = MockServer::start();
    let ok = server.mock(|when, then| {
        when.method(POST)
            .path(EXEC_PATH)
            .json_body(json!({ "action": "delete", "id": "1" }));
        then.status(200)
            .json_body(json!({ "status": "success", "message": "Deleted" }));
    });
    let missing = server.mock(|when, then| {
        when.method(POST)
            .path(EXEC_PATH)
            .json_body(json!({ "action": "delete", "id": "2" }));
        then.status(200)
            .json_body(json!({ "status": "error", "message": "ID not found" }));
    });

    let client = client_for(&server);
    client.delete("1").await.unwrap();
    let err = client.delete("2").await.unwrap_err();

    ok.assert();
    missing.assert();
    assert!(err.is_remote());
}

#[tokio::test]
async fn test_failed_create_is_not_retried() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(EXEC_PATH);
        then.status(500).body("lock timeout");
    });

    let draft = RecordDraft::new("Bo", "PM", "Ops", "b@x.com", RecordStatus::Active);
    let err = client_for(&server).create(&draft).await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(mock.calls(), 1);
}
