//! Feature Vector - Core data structure for model input
//!
//! **Versioned feature vector with layout validation**
//!
//! Carries the schema version and layout hash it was assembled against so a
//! vector can never be fed to a model trained on a different layout unnoticed.

use serde::{Deserialize, Serialize};

use super::layout::FeatureSchema;
use crate::logic::error::{ChurnError, ChurnResult};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Encoded values in schema order
    values: Vec<f64>,
}

impl FeatureVector {
    /// Create from encoded values in the schema's order
    pub(crate) fn from_values(schema: &FeatureSchema, values: Vec<f64>) -> Self {
        Self {
            version: schema.version,
            layout_hash: schema.layout_hash(),
            values,
        }
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, schema: &FeatureSchema, name: &str) -> Option<f64> {
        schema.feature_index(name).and_then(|i| self.get(i))
    }

    /// Validate that this vector was assembled for the given layout
    pub fn validate(&self, expected_version: u8, expected_hash: u32) -> ChurnResult<()> {
        if self.version != expected_version || self.layout_hash != expected_hash {
            return Err(ChurnError::LayoutMismatch {
                expected_version,
                expected_hash,
                actual_version: self.version,
                actual_hash: self.layout_hash,
            });
        }
        Ok(())
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self, schema: &FeatureSchema) -> serde_json::Value {
        let named: serde_json::Map<String, serde_json::Value> = schema
            .feature_names()
            .into_iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
            .collect();

        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": named,
        })
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

// ============================================================================
// TESTS
// ============================================================================
