use crate::helpers::{
    body_json, form_payload, spawn_app, spawn_degraded, spawn_from_dir, MockModel,
    MockPipeline, FIXTURE_MODELS,
};
use axum::{body::Body, http::Request};
use forecaster::{artifacts::Error, Season};
use hyper::{header, Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn full_request_returns_rounded_prediction() {
    let mut pipeline = MockPipeline::new();
    pipeline
        .expect_transform()
        .withf(|record| {
            record.month == 5
                && record.hour == 12
                && record.season == Season::Summer
                && record.day_length_hours == Some(12.0)
                && record.day_progress == Some(0.5)
                && record.precip_flag == 0
        })
        .times(1)
        .returning(|_| Ok(vec![vec![0.25, -1.0, 3.5]]));

    let mut model = MockModel::new();
    model
        .expect_predict()
        .withf(|input| input == &vec![vec![0.25, -1.0, 3.5]])
        .times(1)
        .returning(|_| Ok(vec![vec![27.456]]));

    let test_app = spawn_app(pipeline, model);
    let response = test_app
        .post_json("/predict", form_payload().to_string())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["predicted_temperature"], 27.46);
    assert_eq!(body["input_date"], "2024-05-01 12:00:00");
}

#[tokio::test]
async fn datetime_local_separator_is_accepted() {
    let mut pipeline = MockPipeline::new();
    pipeline
        .expect_transform()
        .withf(|record| record.day == 9 && record.month == 11 && record.hour == 7)
        .times(1)
        .returning(|_| Ok(vec![vec![1.0]]));
    let mut model = MockModel::new();
    model
        .expect_predict()
        .times(1)
        .returning(|_| Ok(vec![vec![19.0]]));

    let mut payload = form_payload();
    payload["date_time"] = json!("2024-11-09T07:45");

    let response = spawn_app(pipeline, model)
        .post_json("/predict", payload.to_string())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["input_date"], "2024-11-09 07:45:00");
    assert_eq!(body["predicted_temperature"], 19.0);
}

#[tokio::test]
async fn zoned_iso_timestamp_uses_its_wall_clock() {
    let mut pipeline = MockPipeline::new();
    pipeline
        .expect_transform()
        .withf(|record| record.day == 9 && record.month == 11 && record.hour == 7)
        .times(1)
        .returning(|_| Ok(vec![vec![1.0]]));
    let mut model = MockModel::new();
    model
        .expect_predict()
        .times(1)
        .returning(|_| Ok(vec![vec![19.0]]));

    let mut payload = form_payload();
    payload["date_time"] = json!("2024-11-09T07:45:00.000Z");

    let response = spawn_app(pipeline, model)
        .post_json("/predict", payload.to_string())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["input_date"], "2024-11-09 07:45:00");
}

#[tokio::test]
async fn unreadable_sun_times_still_predict() {
    let mut pipeline = MockPipeline::new();
    pipeline
        .expect_transform()
        .withf(|record| record.day_length_hours.is_none() && record.day_progress.is_none())
        .times(1)
        .returning(|_| Ok(vec![vec![1.0]]));
    let mut model = MockModel::new();
    model
        .expect_predict()
        .times(1)
        .returning(|_| Ok(vec![vec![22.1]]));

    let mut payload = form_payload();
    payload["sunrise"] = json!("dawn");
    payload["sunset"] = json!("");

    let response = spawn_app(pipeline, model)
        .post_json("/predict", payload.to_string())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "success");
}

#[tokio::test]
async fn missing_numeric_field_is_an_error_response() {
    let mut pipeline = MockPipeline::new();
    pipeline.expect_transform().never();
    let mut model = MockModel::new();
    model.expect_predict().never();

    let mut payload = form_payload();
    payload.as_object_mut().unwrap().remove("humidity");

    let response = spawn_app(pipeline, model)
        .post_json("/predict", payload.to_string())
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("humidity"));
    assert!(body.get("status").is_none());
}

#[tokio::test]
async fn malformed_json_is_an_error_response() {
    let mut pipeline = MockPipeline::new();
    pipeline.expect_transform().never();
    let mut model = MockModel::new();
    model.expect_predict().never();

    let response = spawn_app(pipeline, model)
        .post_json("/predict", "{\"date_time\": ".to_string())
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn unparsable_date_is_an_error_response() {
    let mut pipeline = MockPipeline::new();
    pipeline.expect_transform().never();
    let mut model = MockModel::new();
    model.expect_predict().never();

    let mut payload = form_payload();
    payload["date_time"] = json!("next tuesday");

    let response = spawn_app(pipeline, model)
        .post_json("/predict", payload.to_string())
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("next tuesday"));
}

#[tokio::test]
async fn pipeline_failure_is_an_error_response() {
    let mut pipeline = MockPipeline::new();
    pipeline
        .expect_transform()
        .times(1)
        .returning(|_| Err(Error::UnknownColumn("visibility".to_string())));
    let mut model = MockModel::new();
    model.expect_predict().never();

    let response = spawn_app(pipeline, model)
        .post_json("/predict", form_payload().to_string())
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("visibility"));
}

#[tokio::test]
async fn model_failure_is_an_error_response() {
    let mut pipeline = MockPipeline::new();
    pipeline
        .expect_transform()
        .times(1)
        .returning(|_| Ok(vec![vec![1.0, 2.0]]));
    let mut model = MockModel::new();
    model
        .expect_predict()
        .times(1)
        .returning(|_| Err(Error::Shape("model expects 3 inputs per row, got 2".to_string())));

    let response = spawn_app(pipeline, model)
        .post_json("/predict", form_payload().to_string())
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("3 inputs"));
}

#[tokio::test]
async fn degraded_server_reports_load_failure_per_request() {
    let test_app = spawn_degraded("Failed to read models/model.json");

    let response = test_app
        .post_json("/predict", form_payload().to_string())
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("not loaded"));
    assert!(error.contains("model.json"));
}

#[tokio::test]
async fn missing_model_directory_leaves_server_running() {
    let test_app = spawn_from_dir("/nonexistent/models");

    let home = test_app.get("/").await;
    assert!(home.status().is_success());

    let response = test_app
        .post_json("/predict", form_payload().to_string())
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn predicts_with_artifacts_loaded_from_disk() {
    let test_app = spawn_from_dir(FIXTURE_MODELS);

    let response = test_app
        .post_json("/predict", form_payload().to_string())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // 25 + 5*0.8 - 2*0.6 + 1*(-0.2) - 1.5*(-1) + 2 (summer)
    assert_eq!(body["predicted_temperature"], 31.1);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin_and_header() {
    let mut pipeline = MockPipeline::new();
    pipeline.expect_transform().never();
    let mut model = MockModel::new();
    model.expect_predict().never();
    let test_app = spawn_app(pipeline, model);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/predict")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            "content-type, x-requested-with, authorization",
        )
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "*"
    );
}
