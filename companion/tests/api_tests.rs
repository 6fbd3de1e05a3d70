mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use common::{temp_backend, test_config, FlakyStore, ScriptedModel};
use companion::api::{create_router, AppState};
use companion::config::Config;
use companion::db::DatabaseBackend;
use companion::llm::{ChatCompletion, CompletionOptions, LlmProvider};

fn app(config: Config, db: Arc<dyn DatabaseBackend>, model: Arc<dyn ChatCompletion>) -> Router {
    let state = AppState::with_chat_model(config, db, model, CompletionOptions::default());
    create_router(state)
}

async fn app_with_model(model: Arc<dyn ChatCompletion>) -> (TempDir, Router) {
    let (dir, backend) = temp_backend().await;
    (dir, app(test_config("file:unused.db"), backend, model))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_root_and_health() {
    let (_dir, app) = app_with_model(ScriptedModel::replying(&[])).await;

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "Browsing Companion AI Service");
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy", "database": "ok" }));
}

#[tokio::test]
async fn test_health_reports_store_sync_failure_and_model() {
    let (_dir, backend) = temp_backend().await;
    let store = FlakyStore::new(backend);
    let mut config = test_config("file:unused.db");
    config.llm = Some(companion::config::LlmConfig {
        model: "azure/shop-gpt".to_string(),
        api_key: Some("key".to_string()),
        base_url: Some("https://example.openai.azure.com".to_string()),
        api_version: companion::config::DEFAULT_AZURE_API_VERSION.to_string(),
        timeout_secs: 5,
        temperature: 0.7,
        max_tokens: 800,
    });
    let router = app(config, store.clone(), ScriptedModel::replying(&[]));

    let (_, body) = send(&router, get("/health")).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["llm_model"], "azure/shop-gpt");

    store.fail_sync.store(true, Ordering::SeqCst);
    let (status, body) = send(&router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "error");
}

#[tokio::test]
async fn test_process_chat_returns_reply_and_filters() {
    let reply = "Here are our best deals.\n\n```filters\n{\"has_discount\": true, \"min_discount\": 15, \"category\": \"empty\"}\n```";
    let model = ScriptedModel::replying(&[reply]);
    let (_dir, app) = app_with_model(model.clone()).await;

    let (status, body) = send(
        &app,
        post_json(
            "/process-chat",
            json!({
                "user_id": "shopper-1",
                "message": "Any discounts?",
                "dom_snapshot": {
                    "visible_products": [{ "id": "shoe-001", "name": "Trail Runner", "price": 99.0, "discount": 20 }],
                    "above_fold_products": [],
                    "below_fold_products": []
                }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Here are our best deals.");
    assert_eq!(
        body["filters"],
        json!({ "has_discount": true, "min_discount": 15.0 })
    );
    assert!(uuid::Uuid::parse_str(body["session_id"].as_str().unwrap()).is_ok());
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));

    let system = &model.last_call()[0].content;
    assert!(system.contains("1. Trail Runner (ID: shoe-001) | Price: $99.00 | Discount: 20% off"));
    assert!(system.contains("🔍 VISIBLE PRODUCTS (currently on screen):"));
    assert!(!system.contains("ABOVE THE FOLD"));
}

#[tokio::test]
async fn test_process_chat_omits_filters_without_block() {
    let (_dir, app) = app_with_model(ScriptedModel::replying(&["Just browsing? 😊"])).await;

    let (status, body) = send(
        &app,
        post_json(
            "/process-chat",
            json!({ "user_id": "shopper-1", "message": "hi", "session_id": "sess-api" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Just browsing? 😊");
    assert_eq!(body["session_id"], "sess-api");
    assert!(body.get("filters").is_none());

    let (status, body) = send(&app, get("/history/sess-api")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], "sess-api");
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "hi");
    assert_eq!(messages[0]["userId"], "shopper-1");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], "Just browsing? 😊");
}

#[tokio::test]
async fn test_process_chat_rejects_missing_and_empty_fields() {
    let model = ScriptedModel::replying(&[]);
    let (_dir, app) = app_with_model(model.clone()).await;

    let (status, body) = send(
        &app,
        post_json("/process-chat", json!({ "user_id": "shopper-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Missing required field: message");

    let (status, body) = send(
        &app,
        post_json("/process-chat", json!({ "user_id": "", "message": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("user_id cannot be empty"));

    let (status, body) = send(
        &app,
        post_json("/process-chat", json!({ "user_id": "shopper-1", "message": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("message cannot be empty"));

    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn test_process_chat_rejects_out_of_range_snapshot_values() {
    let model = ScriptedModel::replying(&[]);
    let (_dir, app) = app_with_model(model.clone()).await;

    let (status, body) = send(
        &app,
        post_json(
            "/process-chat",
            json!({
                "user_id": "shopper-1",
                "message": "hi",
                "dom_snapshot": { "visible_products": [{ "id": "shoe-002", "discount": 140 }] }
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("discount must be between 0 and 100"));

    let (status, body) = send(
        &app,
        post_json(
            "/process-chat",
            json!({
                "user_id": "shopper-1",
                "message": "hi",
                "dom_snapshot": { "below_fold_products": [{ "id": "shoe-003", "price": -5 }] }
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("price cannot be negative"));

    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn test_model_failure_maps_to_500_detail() {
    let (_dir, app) = app_with_model(ScriptedModel::failing("deployment not found")).await;

    let (status, body) = send(
        &app,
        post_json(
            "/process-chat",
            json!({ "user_id": "shopper-1", "message": "hi" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Error calling language model:"));
    assert!(detail.contains("deployment not found"));
}

#[tokio::test]
async fn test_unconfigured_model_maps_to_500() {
    let (_dir, backend) = temp_backend().await;
    let state = AppState::new(test_config("file:unused.db"), backend, LlmProvider::new(None));
    let app = create_router(state);

    let (status, body) = send(
        &app,
        post_json(
            "/process-chat",
            json!({ "user_id": "shopper-1", "message": "hi" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Error calling language model:"));
}

#[tokio::test]
async fn test_preferences_default_then_replace() {
    let (_dir, app) = app_with_model(ScriptedModel::replying(&[])).await;

    let (status, body) = send(&app, get("/preferences/shopper-9")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": "shopper-9",
            "userId": "shopper-9",
            "is_b2b": false,
            "preferred_categories": [],
            "hidden_categories": []
        })
    );

    let (status, body) = send(
        &app,
        post_json(
            "/preferences/shopper-9",
            json!({ "is_b2b": true, "preferred_categories": ["work", "outdoor"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_b2b"], true);
    assert_eq!(body["preferred_categories"], json!(["work", "outdoor"]));
    assert_eq!(body["hidden_categories"], json!([]));

    // Whole-record replacement: omitted fields reset
    let (status, _) = send(
        &app,
        post_json(
            "/preferences/shopper-9",
            json!({ "hidden_categories": ["formal"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/preferences/shopper-9")).await;
    assert_eq!(body["is_b2b"], false);
    assert_eq!(body["preferred_categories"], json!([]));
    assert_eq!(body["hidden_categories"], json!(["formal"]));
}

#[tokio::test]
async fn test_analyze_preferences_placeholder() {
    let (_dir, app) = app_with_model(ScriptedModel::replying(&[])).await;

    let (status, body) = send(
        &app,
        post_json("/analyze-preferences", json!({ "clicks": ["shoe-001"] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Preference analysis not yet implemented",
            "suggestions": []
        })
    );
}

#[tokio::test]
async fn test_history_of_unknown_session_is_empty() {
    let (_dir, app) = app_with_model(ScriptedModel::replying(&[])).await;

    let (status, body) = send(&app, get("/history/never-seen")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "session_id": "never-seen", "messages": [] }));
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let (_dir, app) = app_with_model(ScriptedModel::replying(&[])).await;

    let (status, body) = send(&app, get("/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/process-chat"));
    assert!(paths.contains_key("/preferences/{user_id}"));
    assert!(paths.contains_key("/history/{session_id}"));
}
