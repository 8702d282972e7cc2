//! Standard scaler + logistic regression backend
//!
//! Reference [`RiskModel`] implementation for artifacts exported as plain
//! coefficients.

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::scorer::{ModelError, RiskModel};

/// Standardization parameters from training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Logistic regression weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone)]
pub struct LinearRiskModel {
    name: String,
    mean: Array1<f64>,
    scale: Array1<f64>,
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearRiskModel {
    /// All parameter vectors must share one length
    pub fn new(name: impl Into<String>, scaler: ScalerParams, model: LogisticParams) -> Result<Self, ModelError> {
        let n = model.coefficients.len();
        if n == 0 {
            return Err(ModelError("model has no coefficients".to_string()));
        }
        if scaler.mean.len() != n || scaler.scale.len() != n {
            return Err(ModelError(format!(
                "scaler has {} means and {} scales, model has {} coefficients",
                scaler.mean.len(),
                scaler.scale.len(),
                n
            )));
        }

        let all_finite = scaler.mean.iter()
            .chain(&scaler.scale)
            .chain(&model.coefficients)
            .chain(std::iter::once(&model.intercept))
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ModelError("non-finite parameter".to_string()));
        }

        // Constant columns were fitted with zero variance
        let scale = scaler.scale.iter()
            .map(|&s| if s == 0.0 { 1.0 } else { s })
            .collect::<Array1<f64>>();

        Ok(Self {
            name: name.into(),
            mean: Array1::from(scaler.mean),
            scale,
            coefficients: Array1::from(model.coefficients),
            intercept: model.intercept,
        })
    }

    fn check_len(&self, len: usize) -> Result<(), ModelError> {
        if len != self.coefficients.len() {
            return Err(ModelError(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                len
            )));
        }
        Ok(())
    }
}

impl RiskModel for LinearRiskModel {
    fn expected_features(&self) -> usize {
        self.coefficients.len()
    }

    fn normalize(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        self.check_len(features.len())?;
        if features.iter().any(|v| !v.is_finite()) {
            return Err(ModelError("non-finite feature value".to_string()));
        }

        let x = ArrayView1::from(features);
        Ok(((&x - &self.mean) / &self.scale).to_vec())
    }

    fn estimate_positive_probability(&self, normalized: &[f64]) -> Result<f64, ModelError> {
        self.check_len(normalized.len())?;

        let z = ArrayView1::from(normalized).dot(&self.coefficients) + self.intercept;
        Ok(sigmoid(z))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
