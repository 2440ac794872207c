//! Router-level integration tests
//!
//! Exercises the HTTP surface end to end against the mock POS client,
//! with a scripted chat backend so no network is involved.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use board_server::cache::TableCache;
use board_server::clients::{MockPosClient, PosClient, TokenManager};
use board_server::core::{Config, ServerState, build_router};
use board_server::services::ChatBackend;
use board_server::utils::AppResult;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Chat backend that replays canned replies in order
#[derive(Debug)]
struct ScriptedChat {
    replies: Mutex<Vec<String>>,
}

impl ScriptedChat {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().rev().map(|r| r.to_string()).collect()),
        }
    }
}

#[async_trait]
impl ChatBackend for ScriptedChat {
    async fn complete(&self, _prompt: &str) -> AppResult<String> {
        let mut replies = self.replies.lock().unwrap();
        Ok(replies.pop().unwrap_or_default())
    }
}

fn test_config(message_dir: &str) -> Config {
    Config {
        http_port: 0,
        app_mode: "dev".to_string(),
        language: "pt-br".to_string(),
        frontend_allowed_origins: vec!["http://localhost:3000".to_string()],
        pos_service_url: "http://localhost:8005".to_string(),
        auth_server_url: "http://localhost:8005".to_string(),
        groq_api_key: None,
        groq_model_name: "test-model".to_string(),
        message_dir: message_dir.to_string(),
        log_level: "info".to_string(),
        log_dir: None,
    }
}

fn test_state(message_dir: &str, chat: Arc<dyn ChatBackend>) -> ServerState {
    let config = test_config(message_dir);
    let tokens = TokenManager::new(true, config.auth_server_url.clone());
    let pos: Arc<dyn PosClient> = Arc::new(MockPosClient::new(tokens.clone()));
    ServerState {
        config,
        cache: TableCache::new(),
        pos,
        chat,
        tokens,
    }
}

async fn get_json(state: ServerState, uri: &str) -> (StatusCode, Value) {
    let app = build_router(state);
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn tables_list_reports_all_mock_tables() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path().to_str().unwrap(), Arc::new(ScriptedChat::new(&[])));

    let (status, body) = get_json(state, "/tables").await;
    assert_eq!(status, StatusCode::OK);

    let summary = &body["summary"];
    assert_eq!(summary["total"], 99);
    let open = summary["open"].as_u64().unwrap();
    let closing = summary["closing"].as_u64().unwrap();
    let free = summary["free"].as_u64().unwrap();
    assert_eq!(open + closing + free, 99);

    assert_eq!(body["tables"].as_array().unwrap().len(), 99);
    assert!(body.get("pagination").is_none());
    assert!(body.get("wire_trace").is_none());
}

#[tokio::test]
async fn tables_list_pagination_slices_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path().to_str().unwrap(), Arc::new(ScriptedChat::new(&[])));

    let (status, body) = get_json(state, "/tables?page=2&page_size=40").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["tables"].as_array().unwrap().len(), 40);
    let pagination = &body["pagination"];
    assert_eq!(pagination["page"], 2);
    assert_eq!(pagination["total_items"], 99);
    assert_eq!(pagination["total_pages"], 3);
    assert_eq!(pagination["start_index"], 41);
    assert_eq!(pagination["end_index"], 80);
    assert_eq!(pagination["has_previous"], true);
    assert_eq!(pagination["has_next"], true);
}

#[tokio::test]
async fn lone_pagination_parameter_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path().to_str().unwrap(), Arc::new(ScriptedChat::new(&[])));

    let (status, body) = get_json(state, "/tables?page=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn unknown_table_id_is_a_404() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path().to_str().unwrap(), Arc::new(ScriptedChat::new(&[])));

    let (status, body) = get_json(state, "/tables/0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn auth_validate_reports_mock_authentication() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path().to_str().unwrap(), Arc::new(ScriptedChat::new(&[])));

    let (status, body) = get_json(state, "/auth/validate").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_authenticated"], true);
    assert!(body["response_time"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn frontend_tables_include_the_wire_trace() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path().to_str().unwrap(), Arc::new(ScriptedChat::new(&[])));

    let (status, body) = get_json(state, "/frontend/tables").await;
    assert_eq!(status, StatusCode::OK);
    let trace = &body["wire_trace"];
    assert!(trace["request"]["raw"].as_str().unwrap().starts_with("GETDATALIST"));
    assert!(trace["request"]["hex"].is_string());
}

#[tokio::test]
async fn cache_reset_endpoint_reports_success() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path().to_str().unwrap(), Arc::new(ScriptedChat::new(&[])));

    let app = build_router(state);
    let response = app
        .oneshot(
            Request::post("/frontend/cache/reset")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "Cache cleared");
}

#[tokio::test]
async fn message_endpoint_runs_the_full_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let extraction = r#"{
        "numero_comanda": 0,
        "pedidos": [
            {"nome_prato": "Pizza Margherita", "quantidade": 2, "preco_unitario": 30.0}
        ]
    }"#;
    let chat = Arc::new(ScriptedChat::new(&[extraction, "Mensagem aprimorada."]));
    let state = test_state(dir.path().to_str().unwrap(), chat);

    let (status, body) = get_json(state, "/tables/7/message").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Mensagem processada com sucesso");
    assert_eq!(body["message"], "Mensagem aprimorada.");

    let details = &body["details"];
    // comanda number 0 from the model falls back to the table id
    assert_eq!(details["numero_comanda"], 7);
    assert!((details["valor_total_bruto"].as_f64().unwrap() - 60.0).abs() < 1e-9);
    assert!((details["valor_taxa_servico"].as_f64().unwrap() - 6.0).abs() < 1e-9);

    let persisted = std::fs::read_to_string(dir.path().join("comanda_7.txt")).unwrap();
    assert_eq!(persisted, "Mensagem aprimorada.");
}

#[tokio::test]
async fn prebill_then_close_updates_the_table_status() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path().to_str().unwrap(), Arc::new(ScriptedChat::new(&[])));
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(Request::get("/tables/3/payment").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::get("/tables/3/close").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "Table closed successfully");
}
