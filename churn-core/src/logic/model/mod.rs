//! Model Module - Scoring and decision
//!
//! The artifact (scaler, classifier, threshold) stays opaque behind
//! `RiskModel`; swapping backends does not touch the encoding side.

pub mod scorer;
pub mod linear;
pub mod artifact;
pub mod threshold;

// Re-export common types
pub use scorer::{score, ModelError, RiskModel};
pub use linear::{LinearRiskModel, LogisticParams, ScalerParams};
pub use artifact::{load_artifact, Artifact, ArtifactBundle, ArtifactError, ArtifactMetadata};
pub use threshold::{decide, Decision, RiskScore, Threshold, ThresholdConfig};
