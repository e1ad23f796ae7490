use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, error};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    artifacts,
    features::{self, format_timestamp, parse_date_time, to_twelve_hour, transform, Observation},
    AppState,
};

/// Body of `POST /predict`, as posted by the HTML form.
///
/// Numbers may arrive as JSON numbers or as strings. `sunrise` and `sunset`
/// are 24-hour `HH:MM` strings; the keys must be present but may be `null`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PredictionRequest {
    /// `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM` or day-first `DD/MM/YYYY HH:MM`
    pub date_time: String,
    #[serde(rename = "DewPointC")]
    #[schema(value_type = f64)]
    pub dew_point_c: FormNumber,
    #[schema(value_type = f64)]
    pub humidity: FormNumber,
    #[serde(rename = "cloudcover")]
    #[schema(value_type = f64)]
    pub cloud_cover: FormNumber,
    #[serde(rename = "uvIndex")]
    #[schema(value_type = i64)]
    pub uv_index: FormNumber,
    #[serde(rename = "sunHour")]
    #[schema(value_type = f64)]
    pub sun_hour: FormNumber,
    #[serde(rename = "precipMM")]
    #[schema(value_type = f64)]
    pub precip_mm: FormNumber,
    #[schema(value_type = f64)]
    pub pressure: FormNumber,
    #[serde(rename = "windspeedKmph")]
    #[schema(value_type = f64)]
    pub wind_speed_kmph: FormNumber,
    #[serde(deserialize_with = "nullable_text")]
    #[schema(value_type = Option<String>, example = "06:15")]
    pub sunrise: Option<String>,
    #[serde(deserialize_with = "nullable_text")]
    #[schema(value_type = Option<String>, example = "18:40")]
    pub sunset: Option<String>,
}

/// A number as sent by a form: either a JSON number or its text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FormNumber {
    Number(serde_json::Number),
    Text(String),
}

impl FormNumber {
    pub fn to_f64(&self, field: &'static str) -> Result<f64, PredictError> {
        match self {
            FormNumber::Number(n) => n.as_f64(),
            FormNumber::Text(s) => s.trim().parse().ok(),
        }
        .ok_or_else(|| self.not_a_number(field))
    }

    /// Whole numbers; JSON floats are truncated, numeric strings must be integers.
    pub fn to_i64(&self, field: &'static str) -> Result<i64, PredictError> {
        match self {
            FormNumber::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            }),
            FormNumber::Text(s) => s.trim().parse().ok(),
        }
        .ok_or_else(|| self.not_a_number(field))
    }

    fn not_a_number(&self, field: &'static str) -> PredictError {
        let value = match self {
            FormNumber::Number(n) => n.to_string(),
            FormNumber::Text(s) => s.clone(),
        };
        PredictError::NotANumber { field, value }
    }
}

/// Strings pass through, `null` is `None`, anything else keeps its JSON text.
fn nullable_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl PredictionRequest {
    /// Coerce the form fields and normalize sunrise/sunset to 12-hour clock strings.
    pub fn into_observation(self) -> Result<Observation, PredictError> {
        Ok(Observation {
            timestamp: parse_date_time(&self.date_time)?,
            dew_point_c: self.dew_point_c.to_f64("DewPointC")?,
            humidity: self.humidity.to_f64("humidity")?,
            cloud_cover: self.cloud_cover.to_f64("cloudcover")?,
            uv_index: self.uv_index.to_i64("uvIndex")?,
            sun_hour: self.sun_hour.to_f64("sunHour")?,
            precip_mm: self.precip_mm.to_f64("precipMM")?,
            pressure: self.pressure.to_f64("pressure")?,
            wind_speed_kmph: self.wind_speed_kmph.to_f64("windspeedKmph")?,
            sunrise: to_twelve_hour(self.sunrise.as_deref()),
            sunset: to_twelve_hour(self.sunset.as_deref()),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictionResponse {
    /// Always `"success"`
    pub status: String,
    /// Degrees Celsius, rounded to two decimals
    pub predicted_temperature: f64,
    /// The parsed `date_time`, as `YYYY-MM-DD HH:MM:SS`
    pub input_date: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum PredictError {
    #[error("Invalid request body: {0}")]
    Body(String),
    #[error("Field '{field}' must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },
    #[error(transparent)]
    Features(#[from] features::Error),
    #[error("Model artifacts are not loaded: {0}")]
    Unavailable(String),
    #[error("Prediction failed: {0}")]
    Artifacts(#[from] artifacts::Error),
    #[error("Model produced a non-finite prediction: {0}")]
    NonFinite(f64),
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictionRequest,
    responses(
        (status = OK, description = "Predicted temperature for the observation", body = PredictionResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Malformed request or failed prediction", body = ErrorResponse)
    ))]
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, PredictError> {
    run_prediction(&state, payload).map(Json).map_err(|e| {
        error!("error during prediction: {}", e);
        e
    })
}

fn run_prediction(
    state: &AppState,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<PredictionResponse, PredictError> {
    let Json(request) = payload.map_err(|e| PredictError::Body(e.body_text()))?;
    let observation = request.into_observation()?;
    let input_date = format_timestamp(observation.timestamp)?;

    let artifacts = state
        .artifacts
        .loaded()
        .map_err(|reason| PredictError::Unavailable(reason.to_string()))?;
    let record = transform(&observation);
    debug!("features for {}: {:?}", input_date, record);

    let predicted = artifacts.predict(&record)?;
    if !predicted.is_finite() {
        return Err(PredictError::NonFinite(predicted));
    }

    Ok(PredictionResponse {
        status: "success".to_string(),
        predicted_temperature: round_to_hundredths(predicted),
        input_date,
    })
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
