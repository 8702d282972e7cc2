//! Evaluation pipeline
//!
//! Profile → FeatureVector → RiskScore → Decision, one pure pass per request.
//! The evaluator owns the schema and the artifact and never mutates them, so a
//! single instance can serve concurrent requests without locking.

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::logic::error::{ChurnError, ChurnResult};
use crate::logic::features::{assemble, EmployeeProfile, FeatureSchema, RawProfile};
use crate::logic::model::{decide, load_artifact, score, Artifact, ArtifactError, Decision, RiskScore};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Result of scoring one profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub score: RiskScore,
    pub decision: Decision,
    pub threshold: f64,
}

impl Evaluation {
    pub fn probability_label(&self) -> String {
        self.score.percent_label()
    }

    pub fn headline(&self) -> &'static str {
        self.decision.headline()
    }
}

/// Engine status for health checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub checksum: String,
    pub threshold: Option<f64>,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub loaded_at: Option<DateTime<Utc>>,
}

// ============================================================================
// EVALUATOR
// ============================================================================

#[derive(Debug, Clone)]
pub struct Evaluator {
    schema: FeatureSchema,
    artifact: Artifact,
}

impl Evaluator {
    /// Pair a schema with an artifact.
    ///
    /// A length disagreement here means the artifact was trained on another
    /// layout; it is fatal and reported as `ArtifactMismatch`. Same length but
    /// another order is a `LayoutMismatch`.
    pub fn new(schema: FeatureSchema, artifact: Artifact) -> ChurnResult<Self> {
        if artifact.expected_features() != schema.len() {
            return Err(ChurnError::ArtifactMismatch(format!(
                "schema v{} has {} attributes, artifact '{}' expects {}",
                schema.version,
                schema.len(),
                artifact.metadata.model_name,
                artifact.expected_features()
            )));
        }

        schema.validate_layout(artifact.metadata.feature_version, artifact.layout_hash())?;

        Ok(Self { schema, artifact })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Score a complete profile
    pub fn evaluate(&self, profile: &EmployeeProfile) -> ChurnResult<Evaluation> {
        let start_time = Instant::now();

        let vector = assemble(&self.schema, profile)?;
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Feature vector: {}", vector.to_log_entry(&self.schema));
        }

        let risk = score(&vector, &self.artifact)?;
        let decision = decide(risk, self.artifact.threshold);

        log::debug!(
            "Evaluated profile: score={:.4} decision={} threshold={} ({}us)",
            risk.value(),
            decision,
            self.artifact.threshold.value(),
            start_time.elapsed().as_micros()
        );

        Ok(Evaluation {
            score: risk,
            decision,
            threshold: self.artifact.threshold.value(),
        })
    }

    /// Build the profile from a raw map, then score it
    pub fn evaluate_raw(&self, raw: RawProfile) -> ChurnResult<Evaluation> {
        let profile = EmployeeProfile::from_raw(&self.schema, raw)?;
        self.evaluate(&profile)
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            model_loaded: true,
            model_name: self.artifact.metadata.model_name.clone(),
            checksum: self.artifact.metadata.checksum.clone(),
            threshold: Some(self.artifact.threshold.value()),
            feature_version: self.schema.version,
            layout_hash: self.schema.layout_hash(),
            loaded_at: Some(self.artifact.metadata.loaded_at),
        }
    }
}

// ============================================================================
// PROCESS-WIDE STATE
// ============================================================================

/// Loaded once, read-only afterwards
static EVALUATOR: OnceCell<Evaluator> = OnceCell::new();

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Pipeline(#[from] ChurnError),

    #[error("Evaluator already initialized")]
    AlreadyInitialized,
}

/// Load the artifact at `path` for the churn layout and install it
pub fn init(path: &Path) -> Result<&'static Evaluator, InitError> {
    let schema = FeatureSchema::churn_v1();
    let artifact = load_artifact(path, &schema)?;
    install(Evaluator::new(schema, artifact)?)
}

/// Install an evaluator as the process-wide instance. Only the first call wins.
pub fn install(evaluator: Evaluator) -> Result<&'static Evaluator, InitError> {
    EVALUATOR
        .set(evaluator)
        .map_err(|_| InitError::AlreadyInitialized)?;

    log::info!("Evaluator installed");
    EVALUATOR.get().ok_or(InitError::AlreadyInitialized)
}

pub fn is_loaded() -> bool {
    EVALUATOR.get().is_some()
}

fn loaded() -> ChurnResult<&'static Evaluator> {
    EVALUATOR.get().ok_or(ChurnError::NotLoaded)
}

/// Score a profile with the process-wide evaluator
pub fn evaluate(profile: &EmployeeProfile) -> ChurnResult<Evaluation> {
    loaded()?.evaluate(profile)
}

/// Score a raw map with the process-wide evaluator
pub fn evaluate_raw(raw: RawProfile) -> ChurnResult<Evaluation> {
    loaded()?.evaluate_raw(raw)
}

pub fn status() -> EngineStatus {
    match EVALUATOR.get() {
        Some(evaluator) => evaluator.status(),
        None => {
            let schema = FeatureSchema::churn_v1();
            EngineStatus {
                model_loaded: false,
                model_name: "None".to_string(),
                checksum: String::new(),
                threshold: None,
                feature_version: schema.version,
                layout_hash: schema.layout_hash(),
                loaded_at: None,
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
