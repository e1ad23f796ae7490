use serde::Deserialize;

/// Description of the columns the model was trained on.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FeatureMetadata {
    #[serde(default)]
    pub numeric_features: Vec<String>,
    #[serde(default)]
    pub categorical_features: Vec<String>,
    #[serde(default)]
    pub target: Option<String>,
}

impl FeatureMetadata {
    pub fn columns(&self) -> Vec<&str> {
        self.numeric_features
            .iter()
            .chain(self.categorical_features.iter())
            .map(String::as_str)
            .collect()
    }
}
