use classroom_chatbot::config::AppConfig;
use classroom_chatbot::message::{ChatResponse, ExportResponse};
use classroom_chatbot::routes::create_router;
use classroom_chatbot::services::chatbot::ResponseSelector;
use classroom_chatbot::services::random::FixedRandom;
use classroom_chatbot::services::replies;
use classroom_chatbot::services::session_config::Personality;
use classroom_chatbot::state::AppState;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

const ADMIN_KEY: &str = "test-admin-key";

fn app_with(config: AppConfig) -> Router {
    create_router(Arc::new(AppState::new(config)))
}

fn app() -> Router {
    app_with(AppConfig {
        admin_api_key: ADMIN_KEY.to_string(),
        ..AppConfig::default()
    })
}

fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn chat(app: &Router, session_id: Option<&str>, message: &str) -> ChatResponse {
    let body = serde_json::json!({ "session_id": session_id, "message": message }).to_string();
    let (status, value) = send(app, json_request("POST", "/chat", body)).await;
    assert_eq!(status, StatusCode::OK, "{value}");
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_chat_endpoint() {
    let app = app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/chat",
            r#"{"message": "hello", "session_id": null}"#.to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let app = app();
    let (status, value) = send(
        &app,
        json_request("POST", "/chat", r#"{"message": "   ", "session_id": null}"#.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "Message cannot be empty");
}

#[tokio::test]
async fn test_greeting_then_material() {
    let app = app();
    let first = chat(&app, None, "hi, can you help with math?").await;
    assert_eq!(first.intent, "Greeting");

    let second = chat(&app, Some(&first.session_id), "create a worksheet on fractions").await;
    assert_eq!(second.session_id, first.session_id);
    assert_eq!(second.intent, "Material");
    assert!(second.reply.starts_with("# Mathematics Worksheet: Fractions"));

    let (status, session) = send(
        &app,
        Request::get(format!("/sessions/{}", first.session_id)).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let history = session["history"].as_array().unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0]["role"], "user");
    assert_eq!(history[0]["text"], "hi, can you help with math?");
    assert_eq!(history[3]["role"], "assistant");
    assert_eq!(session["config"]["gradeLevel"], "Grade 4");
}

#[tokio::test]
async fn test_config_update_changes_replies() {
    let app = app();
    let session_id = chat(&app, None, "hello").await.session_id;

    let (status, config) = send(
        &app,
        json_request(
            "PUT",
            &format!("/sessions/{session_id}/config"),
            r#"{"role": "student", "studyMode": "quizMe", "gradeLevel": "Grade 8"}"#.to_string(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["role"], "student");
    assert_eq!(config["studyMode"], "quizMe");
    assert_eq!(config["subject"], "Mathematics");

    let reply = chat(&app, Some(&session_id), "study volcanoes").await;
    assert_eq!(reply.intent, "StudySession");
    assert!(reply.reply.starts_with("# Quiz Me: Volcanoes"));
}

#[tokio::test]
async fn test_invalid_selection_is_rejected() {
    let app = app();
    let session_id = chat(&app, None, "hello").await.session_id;

    let (status, value) = send(
        &app,
        json_request(
            "PUT",
            &format!("/sessions/{session_id}/config"),
            r#"{"personality": "grumpy"}"#.to_string(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "'grumpy' is not a valid personality");

    let (status, _) = send(
        &app,
        json_request("PUT", "/sessions/nope/config", "{}".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_material_is_unsupported() {
    let app = app();
    let session_id = chat(&app, None, "hello").await.session_id;
    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/sessions/{session_id}/config"),
            r#"{"materialType": "project"}"#.to_string(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let reply = chat(&app, Some(&session_id), "create a project on bridges").await;
    assert_eq!(reply.intent, "UnsupportedMaterial");
    assert!(reply.reply.contains("isn't supported"));
}

#[tokio::test]
async fn test_reset_command_integration() {
    let app = app();
    let session_id = chat(&app, None, "worksheet on soil").await.session_id;

    let reply = chat(&app, Some(&session_id), "reset").await;
    assert_eq!(reply.intent, "Reset");
    assert!(reply.reply.contains("reset"));

    let (_, session) = send(
        &app,
        Request::get(format!("/sessions/{session_id}")).body(Body::empty()).unwrap(),
    )
    .await;
    assert!(session["history"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_clear_history_endpoint() {
    let app = app();
    let session_id = chat(&app, None, "hello").await.session_id;

    let request = Request::delete(format!("/sessions/{session_id}/history"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let request = Request::delete("/sessions/unknown/history").body(Body::empty()).unwrap();
    let (status, value) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["error"], "Session unknown not found");
}

#[tokio::test]
async fn test_options_endpoint() {
    let app = app();
    let (status, options) = send(&app, Request::get("/options").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(options["grade_levels"].as_array().unwrap().len(), 9);
    assert_eq!(options["tiers"][1]["value"], "upperPrimary");
    assert_eq!(options["defaults"]["materialType"], "worksheet");
    let project = options["material_types"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["value"] == "project")
        .unwrap();
    assert_eq!(project["supported"], false);
}

#[tokio::test]
async fn test_metrics_require_admin_key() {
    let app = app();
    chat(&app, None, "hello").await;
    chat(&app, None, "create a quiz on plants").await;

    let (status, _) = send(&app, Request::get("/admin/metrics").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::get("/admin/metrics")
        .header("x-admin-key", ADMIN_KEY)
        .body(Body::empty())
        .unwrap();
    let (status, metrics) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["intent_usage"]["Greeting"], 1);
    assert_eq!(metrics["intent_usage"]["Material"], 1);
    assert_eq!(metrics["material_usage"]["quiz"], 1);
    assert_eq!(metrics["replies"], 2);
    assert_eq!(metrics["role_usage"]["teacher"], 2);
}

#[tokio::test]
async fn test_export_transcript() {
    let export_dir = std::env::temp_dir().join(format!("exports-{}", uuid::Uuid::new_v4()));
    let app = app_with(AppConfig {
        export_dir: export_dir.clone(),
        ..AppConfig::default()
    });
    let session_id = chat(&app, None, "create a worksheet on fractions").await.session_id;

    let (status, value) = send(
        &app,
        Request::get(format!("/sessions/{session_id}/export")).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let export: ExportResponse = serde_json::from_value(value).unwrap();
    assert_eq!(export.url, format!("/exports/{session_id}.pdf"));
    assert!(export_dir.join(format!("{session_id}.pdf")).exists());

    let (status, _) = send(
        &app,
        Request::get("/sessions/missing/export").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    std::fs::remove_dir_all(export_dir).ok();
}

#[tokio::test]
async fn test_foreign_session_ids_cannot_escape_export_dir() {
    let root = std::env::temp_dir().join(format!("exports-{}", uuid::Uuid::new_v4()));
    let export_dir = root.join("exports");
    let app = app_with(AppConfig {
        export_dir: export_dir.clone(),
        ..AppConfig::default()
    });

    let reply = chat(&app, Some("../escaped"), "create a worksheet on fractions").await;
    assert_ne!(reply.session_id, "../escaped");
    assert!(uuid::Uuid::parse_str(&reply.session_id).is_ok());

    let (status, _) = send(
        &app,
        Request::get("/sessions/..%2Fescaped/export").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!root.join("escaped.pdf").exists());

    let (status, value) = send(
        &app,
        Request::get(format!("/sessions/{}/export", reply.session_id)).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["url"], format!("/exports/{}.pdf", reply.session_id));
    assert!(export_dir.join(format!("{}.pdf", reply.session_id)).exists());

    std::fs::remove_dir_all(root).ok();
}

#[tokio::test]
async fn test_fixed_random_gives_exact_replies() {
    let state = AppState::with_selector(
        AppConfig::default(),
        ResponseSelector::with_random(Arc::new(FixedRandom(2))),
    );
    let app = create_router(Arc::new(state));

    let greeting = chat(&app, None, "hey there").await;
    assert_eq!(greeting.reply, replies::greetings(Personality::Friendly)[2]);

    let fallback = chat(&app, Some(&greeting.session_id), "tell me a joke").await;
    assert_eq!(fallback.intent, "Fallback");
    assert_eq!(fallback.reply, replies::fallbacks(Personality::Friendly)[2]);
}
