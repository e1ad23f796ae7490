use serde::Deserialize;

use super::{Error, FeaturePipeline, Matrix};
use crate::features::{ColumnValue, FeatureRecord, CATEGORICAL_COLUMNS, NUMERIC_COLUMNS};

/// A fitted column transformer: median-imputed, standard-scaled numeric
/// columns followed by one-hot encoded categorical columns.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ColumnPipeline {
    #[serde(default)]
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NumericColumn {
    pub column: String,
    /// Substituted when the value is undefined
    #[serde(default)]
    pub impute: Option<f64>,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CategoricalColumn {
    pub column: String,
    pub categories: Vec<String>,
}

fn unit_scale() -> f64 {
    1.0
}

impl NumericColumn {
    fn encode(&self, value: f64) -> Result<f64, Error> {
        let value = if value.is_nan() {
            self.impute
                .ok_or_else(|| Error::Undefined(self.column.clone()))?
        } else {
            value
        };
        // a zero variance column was fitted with scale 1
        let scale = if self.scale == 0.0 { 1.0 } else { self.scale };
        Ok((value - self.mean) / scale)
    }
}

impl CategoricalColumn {
    /// Unknown labels encode as all zeros.
    fn encode(&self, label: &str, row: &mut Vec<f64>) {
        row.extend(
            self.categories
                .iter()
                .map(|category| if category == label { 1.0 } else { 0.0 }),
        );
    }
}

impl ColumnPipeline {
    pub fn output_width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    pub fn columns(&self) -> Vec<&str> {
        self.numeric
            .iter()
            .map(|c| c.column.as_str())
            .chain(self.categorical.iter().map(|c| c.column.as_str()))
            .collect()
    }

    /// Every column must be one a feature record produces, of the right kind.
    pub fn validate(&self) -> Result<(), Error> {
        if self.output_width() == 0 {
            return Err(Error::Invalid("pipeline has no columns".to_string()));
        }
        for numeric in &self.numeric {
            if !NUMERIC_COLUMNS.contains(&numeric.column.as_str()) {
                return Err(Error::Invalid(format!(
                    "'{}' is not a numeric feature column",
                    numeric.column
                )));
            }
            if !numeric.mean.is_finite() || !numeric.scale.is_finite() {
                return Err(Error::Invalid(format!(
                    "column '{}' has a non-finite mean or scale",
                    numeric.column
                )));
            }
        }
        for categorical in &self.categorical {
            if !CATEGORICAL_COLUMNS.contains(&categorical.column.as_str()) {
                return Err(Error::Invalid(format!(
                    "'{}' is not a categorical feature column",
                    categorical.column
                )));
            }
            if categorical.categories.is_empty() {
                return Err(Error::Invalid(format!(
                    "categorical column '{}' has no categories",
                    categorical.column
                )));
            }
        }
        Ok(())
    }
}

impl FeaturePipeline for ColumnPipeline {
    fn transform(&self, record: &FeatureRecord) -> Result<Matrix, Error> {
        let mut row = Vec::with_capacity(self.output_width());

        for numeric in &self.numeric {
            match record.column(&numeric.column) {
                Some(ColumnValue::Numeric(value)) => row.push(numeric.encode(value)?),
                Some(ColumnValue::Categorical(_)) => {
                    return Err(Error::Invalid(format!(
                        "column '{}' is categorical, expected a number",
                        numeric.column
                    )))
                }
                None => return Err(Error::UnknownColumn(numeric.column.clone())),
            }
        }

        for categorical in &self.categorical {
            match record.column(&categorical.column) {
                Some(ColumnValue::Categorical(label)) => categorical.encode(label, &mut row),
                Some(ColumnValue::Numeric(_)) => {
                    return Err(Error::Invalid(format!(
                        "column '{}' is numeric, expected a label",
                        categorical.column
                    )))
                }
                None => return Err(Error::UnknownColumn(categorical.column.clone())),
            }
        }

        Ok(vec![row])
    }
}
