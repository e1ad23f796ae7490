pub mod artifacts;
pub mod features;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use artifacts::{FeaturePipeline, Matrix, ModelArtifacts, Regressor};
pub use features::{transform, FeatureRecord, Observation, Season};
pub use routes::*;
pub use startup::*;
pub use utils::*;
