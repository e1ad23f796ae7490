//! Model artifacts loaded once at start-up
//!
//! The preprocessing pipeline and the regressor sit behind the
//! [`FeaturePipeline`] and [`Regressor`] traits; the JSON-backed
//! [`ColumnPipeline`] and [`DenseNetwork`] are what [`ModelArtifacts::load`]
//! reads from the model directory.

mod metadata;
mod network;
mod pipeline;

use std::{path::Path, sync::Arc};

use log::{info, warn};
use serde::de::DeserializeOwned;
use temp_forecaster_core::read_file;

use crate::features::FeatureRecord;

pub use metadata::FeatureMetadata;
pub use network::{Activation, DenseLayer, DenseNetwork};
pub use pipeline::{CategoricalColumn, ColumnPipeline, NumericColumn};

pub const METADATA_FILE: &str = "feature_metadata.json";
pub const PIPELINE_FILE: &str = "preprocess.json";
pub const MODEL_FILE: &str = "model.json";

/// Row-major numeric matrix passed between pipeline and model.
pub type Matrix = Vec<Vec<f64>>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Invalid artifact: {0}")]
    Invalid(String),
    #[error("Feature record has no column named '{0}'")]
    UnknownColumn(String),
    #[error("Column '{0}' is undefined and has no imputation value")]
    Undefined(String),
    #[error("Shape mismatch: {0}")]
    Shape(String),
}

/// Fitted scaling/encoding step: one feature record in, one numeric row out.
pub trait FeaturePipeline: Send + Sync {
    fn transform(&self, record: &FeatureRecord) -> Result<Matrix, Error>;
}

/// Trained model: numeric rows in, one output row per input row.
pub trait Regressor: Send + Sync {
    fn predict(&self, input: &Matrix) -> Result<Matrix, Error>;
}

#[derive(Clone)]
pub struct ModelArtifacts {
    pub metadata: FeatureMetadata,
    pub pipeline: Arc<dyn FeaturePipeline>,
    pub model: Arc<dyn Regressor>,
}

impl ModelArtifacts {
    pub fn new(
        metadata: FeatureMetadata,
        pipeline: Arc<dyn FeaturePipeline>,
        model: Arc<dyn Regressor>,
    ) -> Self {
        Self {
            metadata,
            pipeline,
            model,
        }
    }

    /// Read and cross-check the metadata, pipeline and model in `model_dir`.
    pub fn load(model_dir: &str) -> Result<Self, Error> {
        let dir = Path::new(model_dir);
        let metadata: FeatureMetadata = read_json(&dir.join(METADATA_FILE))?;
        let pipeline: ColumnPipeline = read_json(&dir.join(PIPELINE_FILE))?;
        let model: DenseNetwork = read_json(&dir.join(MODEL_FILE))?;

        pipeline.validate()?;
        model.validate()?;
        if pipeline.output_width() != model.input_width() {
            return Err(Error::Invalid(format!(
                "pipeline produces {} values per row but the model expects {}",
                pipeline.output_width(),
                model.input_width()
            )));
        }

        let consumed = pipeline.columns();
        for column in metadata.columns() {
            if !consumed.contains(&column) {
                warn!(
                    "metadata lists column '{}' which the pipeline does not consume",
                    column
                );
            }
        }

        info!(
            "loaded pipeline with {} input columns and {} outputs, model with {} layers",
            consumed.len(),
            pipeline.output_width(),
            model.layers.len()
        );
        if let Some(target) = &metadata.target {
            info!("model target: {}", target);
        }

        Ok(Self::new(metadata, Arc::new(pipeline), Arc::new(model)))
    }

    /// Run one record through the pipeline and the model and return the
    /// first output of the first row.
    pub fn predict(&self, record: &FeatureRecord) -> Result<f64, Error> {
        let processed = self.pipeline.transform(record)?;
        let prediction = self.model.predict(&processed)?;

        prediction
            .first()
            .and_then(|row| row.first())
            .copied()
            .ok_or_else(|| Error::Shape("model returned an empty prediction".to_string()))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let display = path.display().to_string();
    let content = read_file(path).map_err(|source| Error::Read {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::Parse {
        path: display,
        source,
    })
}
