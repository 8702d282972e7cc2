//! Model Artifact - scaler, classifier and threshold bundle
//!
//! Loaded once at process start and shared read-only afterwards.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::logic::features::layout::compute_layout_hash;
use crate::logic::features::FeatureSchema;
use super::linear::{LinearRiskModel, LogisticParams, ScalerParams};
use super::scorer::RiskModel;
use super::threshold::{Threshold, ThresholdConfig};

/// Bundle format understood by [`load_artifact`]
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse Error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid threshold {0}: must be strictly between 0 and 1")]
    InvalidThreshold(f64),

    #[error("Artifact trained on features {actual:?}, schema expects {expected:?}")]
    LayoutMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

// ============================================================================
// FILE FORMAT
// ============================================================================

/// On-disk bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub format_version: u32,
    pub model_name: String,
    /// Feature names in training order
    pub feature_names: Vec<String>,
    #[serde(flatten)]
    pub threshold: ThresholdConfig,
    pub scaler: ScalerParams,
    pub model: LogisticParams,
}

/// Where and when an artifact came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub source: String,
    pub model_name: String,
    /// SHA-256 of the raw bundle bytes, hex encoded
    pub checksum: String,
    /// Layout the model was trained on
    pub feature_version: u8,
    pub layout_hash: u32,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// LOADED ARTIFACT
// ============================================================================

/// Scaler + model behind the capability trait, plus the validated threshold
#[derive(Clone)]
pub struct Artifact {
    pub model: Arc<dyn RiskModel>,
    pub threshold: Threshold,
    pub metadata: ArtifactMetadata,
}

impl Artifact {
    /// Wrap an arbitrary backend trained on `schema`
    pub fn new(
        model: Arc<dyn RiskModel>,
        threshold: Threshold,
        schema: &FeatureSchema,
        source: impl Into<String>,
    ) -> Self {
        let metadata = ArtifactMetadata {
            source: source.into(),
            model_name: model.name().to_string(),
            checksum: String::new(),
            feature_version: schema.version,
            layout_hash: schema.layout_hash(),
            loaded_at: Utc::now(),
        };
        Self { model, threshold, metadata }
    }

    /// Parse and validate a bundle against a schema
    pub fn from_bytes(bytes: &[u8], schema: &FeatureSchema, source: &str) -> Result<Self, ArtifactError> {
        let bundle: ArtifactBundle = serde_json::from_slice(bytes)?;

        if bundle.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactError::InvalidModel(format!(
                "unsupported format version {} (expected {})",
                bundle.format_version, ARTIFACT_FORMAT_VERSION
            )));
        }

        let expected = schema.feature_names();
        if bundle.feature_names.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Err(ArtifactError::LayoutMismatch {
                expected: expected.iter().map(|s| s.to_string()).collect(),
                actual: bundle.feature_names,
            });
        }

        let threshold = bundle.threshold.validate()?;

        let model = LinearRiskModel::new(bundle.model_name.clone(), bundle.scaler, bundle.model)
            .map_err(|e| ArtifactError::InvalidModel(e.0))?;

        if model.expected_features() != schema.len() {
            return Err(ArtifactError::InvalidModel(format!(
                "model expects {} features, schema has {}",
                model.expected_features(),
                schema.len()
            )));
        }

        let metadata = ArtifactMetadata {
            source: source.to_string(),
            model_name: bundle.model_name,
            checksum: checksum(bytes),
            feature_version: schema.version,
            layout_hash: compute_layout_hash(schema.version, bundle.feature_names.iter().map(String::as_str)),
            loaded_at: Utc::now(),
        };

        Ok(Self {
            model: Arc::new(model),
            threshold,
            metadata,
        })
    }

    pub fn expected_features(&self) -> usize {
        self.model.expected_features()
    }

    pub fn layout_hash(&self) -> u32 {
        self.metadata.layout_hash
    }
}

impl std::fmt::Debug for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifact")
            .field("model", &self.model.name())
            .field("threshold", &self.threshold)
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Load artifact from a JSON file
pub fn load_artifact(path: &Path, schema: &FeatureSchema) -> Result<Artifact, ArtifactError> {
    log::info!("Loading model artifact from: {}", path.display());

    let bytes = std::fs::read(path)?;
    let artifact = Artifact::from_bytes(&bytes, schema, &path.display().to_string())?;

    log::info!(
        "Artifact '{}' loaded (sha256: {}, threshold: {})",
        artifact.metadata.model_name,
        artifact.metadata.checksum,
        artifact.threshold.value()
    );

    Ok(artifact)
}

fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::logic::features::FEATURE_COUNT;

    /// A valid bundle for the churn layout
    pub(crate) fn sample_bundle() -> ArtifactBundle {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[4] = -1.2; // tenure
        coefficients[7] = 0.6; // internet_service
        coefficients[14] = -0.9; // contract
        coefficients[17] = 0.8; // monthly_charges

        let mut mean = vec![0.5; FEATURE_COUNT];
        mean[4] = 32.0;
        mean[17] = 65.0;

        let mut scale = vec![0.5; FEATURE_COUNT];
        scale[4] = 24.0;
        scale[17] = 30.0;

        ArtifactBundle {
            format_version: ARTIFACT_FORMAT_VERSION,
            model_name: "churn-logreg".to_string(),
            feature_names: FeatureSchema::churn_v1()
                .feature_names()
                .into_iter()
                .map(String::from)
                .collect(),
            threshold: ThresholdConfig::new(0.35),
            scaler: ScalerParams { mean, scale },
            model: LogisticParams { coefficients, intercept: -0.4 },
        }
    }

    pub(crate) fn sample_bytes() -> Vec<u8> {
        serde_json::to_vec_pretty(&sample_bundle()).expect("bundle serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{sample_bundle, sample_bytes};
    use super::*;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("churn_model.json");
        std::fs::write(&path, sample_bytes()).unwrap();

        let schema = FeatureSchema::churn_v1();
        let artifact = load_artifact(&path, &schema).unwrap();

        assert_eq!(artifact.threshold.value(), 0.35);
        assert_eq!(artifact.expected_features(), schema.len());
        assert_eq!(artifact.metadata.model_name, "churn-logreg");
        assert_eq!(artifact.metadata.checksum.len(), 64);
        assert_eq!(artifact.metadata.checksum, checksum(&sample_bytes()));
        assert_eq!(artifact.layout_hash(), schema.layout_hash());
        assert_eq!(artifact.metadata.feature_version, schema.version);
    }

    #[test]
    fn test_demo_artifact_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/churn_model.json");
        let artifact = load_artifact(&path, &FeatureSchema::churn_v1()).unwrap();

        assert_eq!(artifact.metadata.model_name, "churn-logreg-demo");
        assert_eq!(artifact.threshold.value(), 0.35);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_artifact(&dir.path().join("absent.json"), &FeatureSchema::churn_v1());
        assert!(matches!(result, Err(ArtifactError::Io(_))));
    }

    #[test]
    fn test_threshold_is_validated_at_load() {
        let schema = FeatureSchema::churn_v1();
        for bad in [0.0, 1.0, -0.1, 2.0] {
            let mut bundle = sample_bundle();
            bundle.threshold = ThresholdConfig::new(bad);
            let bytes = serde_json::to_vec(&bundle).unwrap();
            assert!(matches!(
                Artifact::from_bytes(&bytes, &schema, "test"),
                Err(ArtifactError::InvalidThreshold(_))
            ));
        }
    }

    #[test]
    fn test_reordered_feature_names_rejected() {
        let mut bundle = sample_bundle();
        bundle.feature_names.swap(0, 1);
        let bytes = serde_json::to_vec(&bundle).unwrap();

        assert!(matches!(
            Artifact::from_bytes(&bytes, &FeatureSchema::churn_v1(), "test"),
            Err(ArtifactError::LayoutMismatch { .. })
        ));
    }

    #[test]
    fn test_short_model_rejected() {
        let mut bundle = sample_bundle();
        bundle.model.coefficients.pop();
        let bytes = serde_json::to_vec(&bundle).unwrap();

        assert!(matches!(
            Artifact::from_bytes(&bytes, &FeatureSchema::churn_v1(), "test"),
            Err(ArtifactError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_threshold_is_top_level_field() {
        let json: serde_json::Value = serde_json::from_slice(&sample_bytes()).unwrap();
        assert_eq!(json["threshold"], 0.35);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            Artifact::from_bytes(b"not json", &FeatureSchema::churn_v1(), "test"),
            Err(ArtifactError::Parse(_))
        ));
    }
}
