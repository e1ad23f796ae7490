use axum::{
    body::{to_bytes, Body},
    http::Request,
    response::Response,
    Router,
};
use forecaster::{
    app,
    artifacts::{Error, FeatureMetadata},
    build_app_state, AppState, ArtifactStatus, FeaturePipeline, FeatureRecord, Matrix,
    ModelArtifacts, Regressor,
};
use hyper::{header, Method};
use mockall::mock;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

mock! {
    pub Pipeline {}
    impl FeaturePipeline for Pipeline {
        fn transform(&self, record: &FeatureRecord) -> Result<Matrix, Error>;
    }
}

mock! {
    pub Model {}
    impl Regressor for Model {
        fn predict(&self, input: &Matrix) -> Result<Matrix, Error>;
    }
}

pub const FIXTURE_MODELS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/models");
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    pub async fn post_json(&self, uri: &str, body: String) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "text/html")
            .body(Body::empty())
            .unwrap();

        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.")
    }
}

pub fn spawn_app(pipeline: MockPipeline, model: MockModel) -> TestApp {
    let artifacts = ModelArtifacts::new(
        FeatureMetadata::default(),
        Arc::new(pipeline),
        Arc::new(model),
    );
    spawn_with(ArtifactStatus::Loaded(artifacts))
}

pub fn spawn_degraded(reason: &str) -> TestApp {
    spawn_with(ArtifactStatus::Unavailable(reason.to_string()))
}

pub fn spawn_from_dir(model_dir: &str) -> TestApp {
    TestApp {
        app: app(build_app_state(STATIC_DIR.to_string(), model_dir)),
    }
}

fn spawn_with(artifacts: ArtifactStatus) -> TestApp {
    TestApp {
        app: app(AppState {
            static_dir: STATIC_DIR.to_string(),
            artifacts,
        }),
    }
}

pub async fn body_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// A complete form submission for noon on 1 May 2024, twelve hours of daylight.
pub fn form_payload() -> Value {
    serde_json::json!({
        "date_time": "2024-05-01 12:00",
        "DewPointC": "14",
        "humidity": "62",
        "cloudcover": "20",
        "uvIndex": "6",
        "sunHour": "11.6",
        "precipMM": "0",
        "pressure": "1009",
        "windspeedKmph": "9",
        "sunrise": "06:00",
        "sunset": "18:00"
    })
}
