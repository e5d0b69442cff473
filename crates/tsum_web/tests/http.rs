use std::sync::Arc;

use serde_json::{json, Value};
use tokio::net::TcpListener;

use tsum_inference::{create_loader, Config, ModelRegistry, Summarizer};
use tsum_web::{create_app, AppState};

async fn spawn_server() -> String {
    let config = Config::default();
    let registry = Arc::new(ModelRegistry::new(create_loader(), config.cache_capacity));
    let summarizer = Summarizer::new(registry.clone(), &config);
    let app = create_app(AppState::new(summarizer, registry)).await;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test(flavor = "multi_thread")]
async fn summarize_happy_path() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/summarize"))
        .json(&json!({
            "text": "The quick brown fox jumps over the lazy dog. It was a sunny day.",
            "model_name": "bart",
            "max_length": 130,
            "min_length": 30
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(!body["summary"].as_str().unwrap().is_empty());
    assert!(body.get("error").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn optional_fields_take_defaults() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/summarize"))
        .json(&json!({ "text": "Just the text field. Nothing else." }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["summary"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_text_returns_unprocessable() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/summarize"))
        .json(&json!({ "text": "   " }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Empty text input");
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_model_returns_unprocessable() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/summarize"))
        .json(&json!({ "text": "Some text.", "model_name": "pegasus" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("pegasus"));
}

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_ok() {
    let base = spawn_server().await;

    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test(flavor = "multi_thread")]
async fn models_lists_both_kinds_and_tracks_loading() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{base}/models"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let models = body.as_array().unwrap();
    assert_eq!(models.len(), 2);
    let bart = models.iter().find(|m| m["name"] == "bart").unwrap();
    assert_eq!(bart["default"], true);
    assert_eq!(bart["loaded"], false);
    let t5 = models.iter().find(|m| m["name"] == "t5").unwrap();
    assert_eq!(t5["task_prefix"], "summarize: ");

    client
        .post(format!("{base}/summarize"))
        .json(&json!({ "text": "Warm the cache." }))
        .send()
        .await
        .unwrap();

    let body: Value = client
        .get(format!("{base}/models"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let bart = body
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["name"] == "bart")
        .unwrap()
        .clone();
    assert_eq!(bart["loaded"], true);
}
