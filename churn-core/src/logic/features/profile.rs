//! Employee Profile - Raw attribute values for one scoring request

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layout::FeatureSchema;
use crate::logic::error::{ChurnError, ChurnResult};

/// A raw attribute value as entered: a label or a number.
///
/// Which one is valid depends on the attribute's kind in the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Label(String),
}

impl AttributeValue {
    pub fn label(value: impl Into<String>) -> Self {
        AttributeValue::Label(value.into())
    }

    pub fn number(value: impl Into<f64>) -> Self {
        AttributeValue::Number(value.into())
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Label(l) => write!(f, "{}", l),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Label(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Label(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        AttributeValue::Number(value as f64)
    }
}

/// Unvalidated profile as received from a form or a JSON body
pub type RawProfile = BTreeMap<String, AttributeValue>;

/// Complete profile: exactly one value per schema attribute, in schema order.
///
/// Built fresh per request and immutable afterwards. Only values are checked
/// for presence here; vocabulary and domain checks happen during encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeProfile {
    entries: Vec<(String, AttributeValue)>,
}

impl EmployeeProfile {
    /// Build from a raw map. Rejects extras and missing attributes.
    pub fn from_raw(schema: &FeatureSchema, mut raw: RawProfile) -> ChurnResult<Self> {
        if let Some(extra) = raw.keys().find(|k| schema.attribute(k).is_none()) {
            return Err(ChurnError::UnknownAttribute { name: extra.clone() });
        }

        let mut entries = Vec::with_capacity(schema.len());
        for def in schema.iter() {
            let value = raw
                .remove(&def.name)
                .ok_or_else(|| ChurnError::MissingAttribute { name: def.name.clone() })?;
            entries.push((def.name.clone(), value));
        }

        Ok(Self { entries })
    }

    pub fn builder() -> ProfileBuilder {
        ProfileBuilder::new()
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Entries in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating an EmployeeProfile with named setters
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    raw: RawProfile,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set attribute by name dynamically
    pub fn set(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.raw.insert(name.to_string(), value.into());
        self
    }

    pub fn label(self, name: &str, label: &str) -> Self {
        self.set(name, AttributeValue::label(label))
    }

    pub fn number(self, name: &str, value: f64) -> Self {
        self.set(name, AttributeValue::Number(value))
    }

    pub fn build(self, schema: &FeatureSchema) -> ChurnResult<EmployeeProfile> {
        EmployeeProfile::from_raw(schema, self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::tests::sample_raw_profile;

    #[test]
    fn test_from_raw_orders_by_schema() {
        let schema = FeatureSchema::churn_v1();
        let profile = EmployeeProfile::from_raw(&schema, sample_raw_profile()).unwrap();

        let names: Vec<&str> = profile.iter().map(|(n, _)| n).collect();
        assert_eq!(names, schema.feature_names());
        assert_eq!(profile.get("tenure"), Some(&AttributeValue::Number(1.0)));
    }

    #[test]
    fn test_missing_attribute() {
        let schema = FeatureSchema::churn_v1();
        let mut raw = sample_raw_profile();
        raw.remove("payment_method");

        let err = EmployeeProfile::from_raw(&schema, raw).unwrap_err();
        assert_eq!(err, ChurnError::MissingAttribute { name: "payment_method".to_string() });
    }

    #[test]
    fn test_extra_attribute() {
        let schema = FeatureSchema::churn_v1();
        let mut raw = sample_raw_profile();
        raw.insert("salary".to_string(), AttributeValue::Number(1000.0));

        let err = EmployeeProfile::from_raw(&schema, raw).unwrap_err();
        assert_eq!(err, ChurnError::UnknownAttribute { name: "salary".to_string() });
    }

    #[test]
    fn test_deserialize_untagged_values() {
        let raw: RawProfile = serde_json::from_str(r#"{"tenure": 12, "gender": "Female"}"#).unwrap();
        assert_eq!(raw["tenure"], AttributeValue::Number(12.0));
        assert_eq!(raw["gender"], AttributeValue::label("Female"));
    }
}
