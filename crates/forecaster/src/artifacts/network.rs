use serde::Deserialize;

use super::{Error, Matrix, Regressor};

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
        }
    }
}

/// Fully connected layer, `weights[input][output]`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    fn input_width(&self) -> usize {
        self.weights.len()
    }

    fn output_width(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut out = self.bias.clone();
        for (x, row) in input.iter().zip(&self.weights) {
            for (acc, w) in out.iter_mut().zip(row) {
                *acc += x * w;
            }
        }
        out.into_iter().map(|v| self.activation.apply(v)).collect()
    }
}

/// Feed-forward regression network.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DenseNetwork {
    pub layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    pub fn input_width(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::input_width)
    }

    pub fn output_width(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::output_width)
    }

    /// Layer shapes must chain and every weight row must match its bias.
    pub fn validate(&self) -> Result<(), Error> {
        if self.layers.is_empty() {
            return Err(Error::Invalid("model has no layers".to_string()));
        }
        let mut expected_input = self.input_width();
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.input_width() == 0 || layer.output_width() == 0 {
                return Err(Error::Invalid(format!("layer {} is empty", i)));
            }
            if layer.input_width() != expected_input {
                return Err(Error::Invalid(format!(
                    "layer {} takes {} inputs but the previous layer produces {}",
                    i,
                    layer.input_width(),
                    expected_input
                )));
            }
            if let Some(row) = layer
                .weights
                .iter()
                .position(|row| row.len() != layer.output_width())
            {
                return Err(Error::Invalid(format!(
                    "layer {} weight row {} has {} values, expected {}",
                    i,
                    row,
                    layer.weights[row].len(),
                    layer.output_width()
                )));
            }
            expected_input = layer.output_width();
        }
        Ok(())
    }
}

impl Regressor for DenseNetwork {
    fn predict(&self, input: &Matrix) -> Result<Matrix, Error> {
        let width = self.input_width();
        input
            .iter()
            .map(|row| {
                if row.len() != width {
                    return Err(Error::Shape(format!(
                        "model expects {} inputs per row, got {}",
                        width,
                        row.len()
                    )));
                }
                Ok(self
                    .layers
                    .iter()
                    .fold(row.clone(), |values, layer| layer.forward(&values)))
            })
            .collect()
    }
}
