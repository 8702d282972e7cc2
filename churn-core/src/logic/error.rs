//! Pipeline errors
//!
//! Every variant is a caller or configuration error. None is transient and
//! none is retried: the pipeline stops at the first one.

use thiserror::Error;

pub type ChurnResult<T> = Result<T, ChurnError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChurnError {
    /// Name is not part of the schema
    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    /// Profile is missing a required attribute
    #[error("Missing attribute '{name}'")]
    MissingAttribute { name: String },

    /// Label outside the attribute's vocabulary
    #[error("Unknown label '{label}' for attribute '{attribute}' (expected one of: {expected})")]
    UnknownLabel {
        attribute: String,
        label: String,
        expected: String,
    },

    /// Numeric value outside the attribute's domain
    #[error("Value {value} for attribute '{attribute}' violates its domain: must be {constraint}")]
    DomainViolation {
        attribute: String,
        value: String,
        constraint: &'static str,
    },

    /// Schema and loaded artifact disagree
    #[error("Artifact mismatch: {0}")]
    ArtifactMismatch(String),

    #[error("Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), got v{actual_version} (hash: {actual_hash:08x})")]
    LayoutMismatch {
        expected_version: u8,
        expected_hash: u32,
        actual_version: u8,
        actual_hash: u32,
    },

    /// No evaluator installed in this process
    #[error("No model artifact loaded")]
    NotLoaded,
}

impl ChurnError {
    /// Errors caused by the submitted profile rather than the deployment
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ChurnError::UnknownAttribute { .. }
                | ChurnError::MissingAttribute { .. }
                | ChurnError::UnknownLabel { .. }
                | ChurnError::DomainViolation { .. }
        )
    }
}
