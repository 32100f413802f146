//! Server Startup Tests
//!
//! Exercises the HTTP surface through `tower::ServiceExt::oneshot` without
//! binding a socket: page, health, greeting, generation, rendering,
//! narration control and PDF export.

mod fixtures;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use fixtures::{CountingGenerator, test_config};
use neura::core::llm::TextGenerator;
use neura::core::tts::{AudioBroadcast, SilentSynthesizer};
use neura::{AppState, routes};

fn app_with(generator: Option<Arc<dyn TextGenerator>>, auto_play: bool) -> Router {
    let mut config = test_config();
    config.narration_auto_play = auto_play;
    let state = AppState::from_parts(
        config,
        generator,
        Arc::new(SilentSynthesizer::new()),
        AudioBroadcast::new(),
    );
    routes::create_app_router().with_state(state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Test that the server boots with no API keys at all
#[tokio::test]
async fn test_minimal_config_boot() {
    let state = AppState::new(test_config()).unwrap();
    assert!(state.generator.is_none());
    assert_eq!(state.narration.synthesizer_name(), "silent");

    let app = routes::create_app_router().with_state(state);
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["synthesizer"], "silent");
    assert_eq!(body["synthesizer_info"]["provider"], "silent");
    assert_eq!(body["narration"], "idle");
    assert_eq!(body["generator"], Value::Null);
}

#[tokio::test]
async fn test_index_page_is_served() {
    let response = app_with(None, false).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/api/narration/audio"));
    assert!(html.contains("id=\"greeting-close\""));
}

#[tokio::test]
async fn test_greeting_uses_caller_hour() {
    let app = app_with(None, false);

    let response = app.clone().oneshot(get("/api/greeting?hour=8")).await.unwrap();
    assert_eq!(json_body(response).await["greeting"], "Good Morning!");

    let response = app.clone().oneshot(get("/api/greeting?hour=15")).await.unwrap();
    assert_eq!(json_body(response).await["greeting"], "Good Afternoon!");

    let response = app.clone().oneshot(get("/api/greeting?hour=21")).await.unwrap();
    assert_eq!(json_body(response).await["greeting"], "Good Evening!");

    let response = app.oneshot(get("/api/greeting")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_prompt_makes_no_generator_call() {
    let generator = CountingGenerator::new("unused");
    let app = app_with(Some(generator.clone()), true);

    for prompt in ["", "   \n\t"] {
        let response = app
            .clone()
            .oneshot(post_json("/api/generate", json!({ "prompt": prompt })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Please enter a prompt.");
    }

    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_prompt_reaches_generator_untrimmed() {
    let generator = CountingGenerator::new("ok");
    let app = app_with(Some(generator.clone()), false);
    let prompt = "    let x = 1;\nWhat does this do?\n";

    let response = app
        .oneshot(post_json("/api/generate", json!({ "prompt": prompt })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(generator.last_prompt().await.as_deref(), Some(prompt));
}

#[tokio::test]
async fn test_generate_without_key_is_bad_gateway() {
    let response = app_with(None, true)
        .oneshot(post_json("/api/generate", json!({ "prompt": "hello" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn test_generate_renders_and_starts_narration() {
    let generator = CountingGenerator::new("Hello **world** <script>alert(1)</script>");
    let app = app_with(Some(generator.clone()), true);

    let response = app
        .clone()
        .oneshot(post_json("/api/generate", json!({ "prompt": "Say hello" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(generator.calls(), 1);

    let body = json_body(response).await;
    assert_eq!(body["text"], "Hello **world** <script>alert(1)</script>");
    assert_eq!(
        body["html"],
        "Hello <b>world</b> &lt;script&gt;alert(1)&lt;/script&gt;"
    );
    assert_eq!(body["narration"]["state"], "speaking");
    assert_eq!(body["narration"]["chunks_total"], 1);

    let response = app.oneshot(get("/api/narration")).await.unwrap();
    assert_eq!(json_body(response).await["state"], "speaking");
}

#[tokio::test]
async fn test_generate_without_auto_play_leaves_narration_idle() {
    let app = app_with(Some(CountingGenerator::new("text")), false);

    let response = app
        .clone()
        .oneshot(post_json("/api/generate", json!({ "prompt": "p" })))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert!(body.get("narration").is_none());

    let response = app.oneshot(get("/api/narration")).await.unwrap();
    assert_eq!(json_body(response).await["state"], "idle");
}

#[tokio::test]
async fn test_render_endpoint() {
    let response = app_with(None, false)
        .oneshot(post_json("/api/render", json!({ "text": "* item\n\n\n\n**done**" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["html"],
        "&#8226; item\n\n<b>done</b>"
    );
}

#[tokio::test]
async fn test_narration_toggle_pause_and_stop() {
    let app = app_with(None, false);
    let text = "A sentence long enough to keep the silent synthesizer busy for a while.";

    let response = app
        .clone()
        .oneshot(post_json("/api/narration/toggle", json!({ "text": text })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["state"], "speaking");
    assert_eq!(body["cursor"], 0);

    let response = app
        .clone()
        .oneshot(post_json("/api/narration/toggle", json!({ "text": text })))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["state"], "paused");

    let response = app
        .clone()
        .oneshot(post_json("/api/narration/stop", json!({})))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["state"], "idle");
    assert_eq!(body["session_id"], Value::Null);
}

#[tokio::test]
async fn test_export_pdf() {
    let response = app_with(None, false)
        .oneshot(post_json(
            "/api/export/pdf",
            json!({ "text": "```\n**Title**\n\n\n\nBody text" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Neura.pdf\""
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_export_empty_text_is_rejected() {
    let response = app_with(None, false)
        .oneshot(post_json("/api/export/pdf", json!({ "text": "  " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No text to download.");
}
