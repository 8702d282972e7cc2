//! Threshold Configuration & Decision Policy
//!
//! The cutoff comes from the artifact, calibrated at training time. It is
//! validated once at load and never changes afterwards.

use serde::{Deserialize, Serialize};

use super::artifact::ArtifactError;

/// Threshold Configuration as stored in the artifact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Calibrated cutoff, strictly between 0 and 1
    pub threshold: f64,
}

impl ThresholdConfig {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn validate(&self) -> Result<Threshold, ArtifactError> {
        Threshold::new(self.threshold)
    }
}

/// Validated decision threshold in (0, 1)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Threshold(f64);

impl Threshold {
    /// Reject values <= 0, >= 1 and non-finite values
    pub fn new(value: f64) -> Result<Self, ArtifactError> {
        if value.is_finite() && value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(ArtifactError::InvalidThreshold(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<ThresholdConfig> for Threshold {
    type Error = ArtifactError;

    fn try_from(config: ThresholdConfig) -> Result<Self, Self::Error> {
        config.validate()
    }
}

/// Churn probability in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RiskScore(f64);

impl RiskScore {
    /// `None` when the value is not a probability
    pub fn new(value: f64) -> Option<Self> {
        if (0.0..=1.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Percentage with one decimal, e.g. `"73.4%"`
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.0 * 100.0)
    }
}

/// Binary risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    LowRisk,
    HighRisk,
}

impl Decision {
    pub fn is_high_risk(&self) -> bool {
        matches!(self, Decision::HighRisk)
    }

    /// One-line message for display
    pub fn headline(&self) -> &'static str {
        match self {
            Decision::HighRisk => "High Risk — Immediate retention action recommended",
            Decision::LowRisk => "Low Risk — Employee likely to stay",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::LowRisk => write!(f, "low_risk"),
            Decision::HighRisk => write!(f, "high_risk"),
        }
    }
}

/// `HighRisk` iff `score >= threshold`. Inclusive at the boundary.
pub fn decide(score: RiskScore, threshold: Threshold) -> Decision {
    if score.0 >= threshold.0 {
        Decision::HighRisk
    } else {
        Decision::LowRisk
    }
}
