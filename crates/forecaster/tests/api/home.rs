use crate::helpers::{body_text, spawn_degraded, spawn_from_dir, FIXTURE_MODELS};

#[tokio::test]
async fn index_serves_prediction_form() {
    let test_app = spawn_from_dir(FIXTURE_MODELS);

    let response = test_app.get("/").await;

    assert!(response.status().is_success());
    let html = body_text(response).await;
    assert!(html.contains("Temperature Forecaster"));
    assert!(html.contains("id=\"predictForm\""));
    assert!(!html.contains("failed to load"));
}

#[tokio::test]
async fn index_warns_when_model_is_unavailable() {
    let test_app = spawn_degraded("Failed to read models/model.json");

    let html = body_text(test_app.get("/").await).await;

    assert!(html.contains("failed to load"));
}

#[tokio::test]
async fn static_script_is_served() {
    let test_app = spawn_degraded("not needed");

    let response = test_app.get("/static/predict.js").await;

    assert!(response.status().is_success());
    assert!(body_text(response).await.contains("/predict"));
}

#[tokio::test]
async fn api_docs_are_served() {
    let test_app = spawn_degraded("not needed");

    let response = test_app.get("/docs").await;

    assert!(response.status().is_success());
}
