//! Risk Scorer - Delegation to the model artifact
//!
//! The core only knows two operations on a model: normalize a vector, then
//! estimate the probability of the positive ("churns") class. Anything that
//! implements [`RiskModel`] can be plugged in.

use crate::logic::error::{ChurnError, ChurnResult};
use crate::logic::features::FeatureVector;
use super::artifact::Artifact;
use super::threshold::RiskScore;

/// Error raised by a model backend when it rejects its input
#[derive(Debug, Clone, PartialEq)]
pub struct ModelError(pub String);

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModelError: {}", self.0)
    }
}

impl std::error::Error for ModelError {}

// ============================================================================
// RISK MODEL TRAIT
// ============================================================================

/// Capability interface for scaler + classifier backends.
///
/// Implementations are shared read-only across requests.
pub trait RiskModel: Send + Sync {
    /// Input length the artifact was trained with
    fn expected_features(&self) -> usize;

    /// Apply the training-time scaler
    fn normalize(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;

    /// Probability of the positive class for an already normalized vector
    fn estimate_positive_probability(&self, normalized: &[f64]) -> Result<f64, ModelError>;

    /// Name for logs and status
    fn name(&self) -> &str {
        "risk-model"
    }
}

/// Score a vector: normalize, then estimate.
///
/// A vector stamped with another layout is a `LayoutMismatch` and never
/// reaches the model. Any rejection by the backend, and any output that is
/// not a probability, is an `ArtifactMismatch`. Lengths are never truncated
/// or padded.
pub fn score(vector: &FeatureVector, artifact: &Artifact) -> ChurnResult<RiskScore> {
    vector.validate(artifact.metadata.feature_version, artifact.metadata.layout_hash)?;

    let model = artifact.model.as_ref();
    let expected = model.expected_features();
    if vector.len() != expected {
        return Err(ChurnError::ArtifactMismatch(format!(
            "vector has {} features, model '{}' expects {}",
            vector.len(),
            model.name(),
            expected
        )));
    }

    let normalized = model
        .normalize(vector.as_slice())
        .map_err(|e| ChurnError::ArtifactMismatch(format!("scaler rejected vector: {}", e.0)))?;

    let probability = model
        .estimate_positive_probability(&normalized)
        .map_err(|e| ChurnError::ArtifactMismatch(format!("model rejected vector: {}", e.0)))?;

    RiskScore::new(probability).ok_or_else(|| {
        ChurnError::ArtifactMismatch(format!("model returned {} which is not a probability", probability))
    })
}
