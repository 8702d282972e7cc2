//! Attribute Encoder
//!
//! Maps a raw attribute value to its numeric code using the schema tables.
//! No coercion, no defaults: anything outside the declared vocabulary or
//! domain is rejected.

use super::layout::{AttributeDef, AttributeKind, FeatureSchema};
use super::profile::AttributeValue;
use crate::logic::error::{ChurnError, ChurnResult};

/// Encodes values against one schema.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    schema: &'a FeatureSchema,
}

impl<'a> Encoder<'a> {
    pub fn new(schema: &'a FeatureSchema) -> Self {
        Self { schema }
    }

    /// Encode the value of a named attribute
    pub fn encode(&self, attribute: &str, value: &AttributeValue) -> ChurnResult<f64> {
        let def = self
            .schema
            .attribute(attribute)
            .ok_or_else(|| ChurnError::UnknownAttribute { name: attribute.to_string() })?;

        encode_attribute(def, value)
    }
}

/// Encode a value against a single attribute definition.
pub fn encode_attribute(def: &AttributeDef, value: &AttributeValue) -> ChurnResult<f64> {
    match (&def.kind, value) {
        (AttributeKind::Binary { affirmative, negative }, AttributeValue::Label(label)) => {
            if label == affirmative {
                Ok(1.0)
            } else if label == negative {
                Ok(0.0)
            } else {
                Err(unknown_label(def, label))
            }
        }

        (AttributeKind::Categorical { vocabulary }, AttributeValue::Label(label)) => vocabulary
            .iter()
            .find(|entry| &entry.label == label)
            .map(|entry| entry.code)
            .ok_or_else(|| unknown_label(def, label)),

        (AttributeKind::Numeric { domain }, AttributeValue::Number(n)) => {
            if domain.admits(*n) {
                Ok(*n)
            } else {
                Err(ChurnError::DomainViolation {
                    attribute: def.name.clone(),
                    value: n.to_string(),
                    constraint: domain.describe(),
                })
            }
        }

        // A number where a label is expected is just another unknown label
        (AttributeKind::Binary { .. } | AttributeKind::Categorical { .. }, AttributeValue::Number(n)) => {
            Err(unknown_label(def, &n.to_string()))
        }

        (AttributeKind::Numeric { domain }, AttributeValue::Label(label)) => {
            Err(ChurnError::DomainViolation {
                attribute: def.name.clone(),
                value: format!("'{}'", label),
                constraint: domain.describe(),
            })
        }
    }
}

fn unknown_label(def: &AttributeDef, label: &str) -> ChurnError {
    ChurnError::UnknownLabel {
        attribute: def.name.clone(),
        label: label.to_string(),
        expected: def.labels().join(", "),
    }
}
