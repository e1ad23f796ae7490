use crate::{index_handler, predict, routes, ModelArtifacts};
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use hyper::Method;
use log::{error, info};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Artifacts are loaded once; a failed load leaves the server up and every
/// prediction reports the reason.
#[derive(Clone)]
pub enum ArtifactStatus {
    Loaded(ModelArtifacts),
    Unavailable(String),
}

impl ArtifactStatus {
    pub fn loaded(&self) -> Result<&ModelArtifacts, &str> {
        match self {
            ArtifactStatus::Loaded(artifacts) => Ok(artifacts),
            ArtifactStatus::Unavailable(reason) => Err(reason),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ArtifactStatus::Loaded(_))
    }
}

#[derive(Clone)]
pub struct AppState {
    pub static_dir: String,
    pub artifacts: ArtifactStatus,
}

#[derive(OpenApi)]
#[openapi(
    paths(routes::predict::predict),
    components(
        schemas(
            routes::predict::PredictionRequest,
            routes::predict::PredictionResponse,
            routes::predict::ErrorResponse,
        )
    ),
    tags(
        (name = "temperature forecaster api", description = "predicts air temperature from a single weather observation")
    )
)]
struct ApiDoc;

pub fn build_app_state(static_dir: String, model_dir: &str) -> AppState {
    let artifacts = match ModelArtifacts::load(model_dir) {
        Ok(artifacts) => {
            info!("Artifacts loaded successfully from {}", model_dir);
            ArtifactStatus::Loaded(artifacts)
        }
        Err(e) => {
            error!("Error loading artifacts from {}: {}", model_dir, e);
            ArtifactStatus::Unavailable(e.to_string())
        }
    };

    AppState {
        static_dir,
        artifacts,
    }
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let serve_static = ServeDir::new(&app_state.static_dir);
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/predict", post(predict))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .nest_service("/static", serve_static)
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, {} code: {}, time: {}", path, response.status().as_str(), response_time);

    response
}
