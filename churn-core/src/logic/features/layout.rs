//! Feature Layout - Declarative Attribute Schema
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add attribute → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove attribute → increment FEATURE_VERSION
//! 4. Change a label/code table → increment FEATURE_VERSION
//!
//! The order and the code tables below must match the encoding the model
//! artifact was trained with. Codes are a fixed external contract: they are
//! not derived from form option order.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::logic::error::{ChurnError, ChurnResult};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

/// Number of attributes in the churn layout
/// IMPORTANT: Must match `FeatureSchema::churn_v1().len()`!
pub const FEATURE_COUNT: usize = 18;

// ============================================================================
// ATTRIBUTE DEFINITIONS
// ============================================================================

/// A label and the numeric code it encodes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCode {
    pub label: String,
    pub code: f64,
}

impl LabelCode {
    pub fn new(label: impl Into<String>, code: f64) -> Self {
        Self { label: label.into(), code }
    }
}

/// Domain constraint on a passthrough numeric attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericDomain {
    /// Whole units, >= 0 (e.g. tenure in months)
    NonNegativeInteger,
    /// Any finite amount >= 0 (e.g. a currency amount)
    NonNegativeReal,
}

impl NumericDomain {
    pub fn describe(&self) -> &'static str {
        match self {
            NumericDomain::NonNegativeInteger => "a non-negative whole number",
            NumericDomain::NonNegativeReal => "a non-negative finite number",
        }
    }

    pub fn admits(&self, value: f64) -> bool {
        if !value.is_finite() || value < 0.0 {
            return false;
        }
        match self {
            NumericDomain::NonNegativeInteger => value.fract() == 0.0,
            NumericDomain::NonNegativeReal => true,
        }
    }
}

/// How an attribute is represented and encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeKind {
    /// Two states; `affirmative` encodes to 1, `negative` to 0
    Binary { affirmative: String, negative: String },
    /// Closed vocabulary with an explicit ordinal table
    Categorical { vocabulary: Vec<LabelCode> },
    /// Passes through unchanged after the domain check
    Numeric { domain: NumericDomain },
}

/// One entry of the schema: name + kind, position given by its index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    pub name: String,
    #[serde(flatten)]
    pub kind: AttributeKind,
}

impl AttributeDef {
    pub fn binary(name: &str, affirmative: &str, negative: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: AttributeKind::Binary {
                affirmative: affirmative.to_string(),
                negative: negative.to_string(),
            },
        }
    }

    /// Binary attribute answered with Yes/No
    pub fn yes_no(name: &str) -> Self {
        Self::binary(name, "Yes", "No")
    }

    pub fn categorical(name: &str, table: &[(&str, f64)]) -> Self {
        Self {
            name: name.to_string(),
            kind: AttributeKind::Categorical {
                vocabulary: table.iter().map(|(l, c)| LabelCode::new(*l, *c)).collect(),
            },
        }
    }

    pub fn numeric(name: &str, domain: NumericDomain) -> Self {
        Self {
            name: name.to_string(),
            kind: AttributeKind::Numeric { domain },
        }
    }

    /// Accepted labels, empty for numeric attributes
    pub fn labels(&self) -> Vec<&str> {
        match &self.kind {
            AttributeKind::Binary { affirmative, negative } => {
                vec![negative.as_str(), affirmative.as_str()]
            }
            AttributeKind::Categorical { vocabulary } => {
                vocabulary.iter().map(|lc| lc.label.as_str()).collect()
            }
            AttributeKind::Numeric { .. } => Vec::new(),
        }
    }
}

// ============================================================================
// FEATURE SCHEMA (Authoritative source)
// ============================================================================

/// Ordered attribute definitions.
///
/// The index of an attribute in `attributes` is its position in the
/// [`FeatureVector`](super::vector::FeatureVector). This ordering is a hard
/// contract with the model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: u8,
    pub attributes: Vec<AttributeDef>,
}

impl FeatureSchema {
    pub fn new(version: u8, attributes: Vec<AttributeDef>) -> Self {
        Self { version, attributes }
    }

    /// The churn layout, version 1.
    pub fn churn_v1() -> Self {
        use NumericDomain::*;

        Self::new(FEATURE_VERSION, vec![
            // === Personal (0-3) ===
            AttributeDef::binary("gender", "Male", "Female"),        // 0
            AttributeDef::yes_no("senior_citizen"),                  // 1
            AttributeDef::yes_no("partner"),                         // 2
            AttributeDef::yes_no("dependents"),                      // 3

            // === Account (4) ===
            AttributeDef::numeric("tenure", NonNegativeInteger),     // 4: months

            // === Services (5-13) ===
            AttributeDef::yes_no("phone_service"),                   // 5
            AttributeDef::yes_no("multiple_lines"),                  // 6
            AttributeDef::categorical("internet_service", &[         // 7
                ("DSL", 0.0),
                ("Fiber Optic", 1.0),
                ("No", 2.0),
            ]),
            AttributeDef::yes_no("online_security"),                 // 8
            AttributeDef::yes_no("online_backup"),                   // 9
            AttributeDef::yes_no("device_protection"),               // 10
            AttributeDef::yes_no("tech_support"),                    // 11
            AttributeDef::yes_no("streaming_tv"),                    // 12
            AttributeDef::yes_no("streaming_movies"),                // 13

            // === Billing (14-17) ===
            AttributeDef::categorical("contract", &[                 // 14
                ("Month-to-month", 0.0),
                ("Long Term", 1.0),
            ]),
            AttributeDef::yes_no("paperless_billing"),               // 15
            AttributeDef::categorical("payment_method", &[           // 16
                ("Electronic Check", 0.0),
                ("Other", 1.0),
            ]),
            AttributeDef::numeric("monthly_charges", NonNegativeReal), // 17: currency
        ])
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeDef> {
        self.attributes.iter()
    }

    /// Attribute names in canonical order
    pub fn feature_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Get attribute definition by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Get attribute index by name (O(n) but attributes are few)
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    /// Get attribute name by index
    pub fn feature_name(&self, index: usize) -> Option<&str> {
        self.attributes.get(index).map(|a| a.name.as_str())
    }

    // ========================================================================
    // LAYOUT HASH
    // ========================================================================

    /// CRC32 over the version byte and the ordered names.
    /// Used to detect layout mismatches at runtime
    pub fn layout_hash(&self) -> u32 {
        compute_layout_hash(self.version, self.feature_names())
    }

    pub fn layout_info(&self) -> LayoutInfo {
        LayoutInfo {
            version: self.version,
            hash: self.layout_hash(),
            feature_count: self.len(),
            feature_names: self.attributes.iter().map(|a| a.name.clone()).collect(),
        }
    }

    /// Validate that incoming data matches this layout
    pub fn validate_layout(&self, incoming_version: u8, incoming_hash: u32) -> ChurnResult<()> {
        let current_hash = self.layout_hash();

        if incoming_version != self.version || incoming_hash != current_hash {
            return Err(ChurnError::LayoutMismatch {
                expected_version: self.version,
                expected_hash: current_hash,
                actual_version: incoming_version,
                actual_hash: incoming_hash,
            });
        }

        Ok(())
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::churn_v1()
    }
}

/// Hash a layout from its version and ordered names.
pub fn compute_layout_hash<'a>(version: u8, names: impl IntoIterator<Item = &'a str>) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[version]);

    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl Default for LayoutInfo {
    fn default() -> Self {
        FeatureSchema::churn_v1().layout_info()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        let schema = FeatureSchema::churn_v1();
        assert_eq!(schema.len(), FEATURE_COUNT);
        assert_eq!(schema.version, FEATURE_VERSION);
    }

    #[test]
    fn test_canonical_order() {
        let schema = FeatureSchema::churn_v1();
        assert_eq!(schema.feature_names(), vec![
            "gender", "senior_citizen", "partner", "dependents", "tenure",
            "phone_service", "multiple_lines", "internet_service",
            "online_security", "online_backup", "device_protection",
            "tech_support", "streaming_tv", "streaming_movies", "contract",
            "paperless_billing", "payment_method", "monthly_charges",
        ]);
    }

    #[test]
    fn test_layout_hash_consistency() {
        let schema = FeatureSchema::churn_v1();
        assert_eq!(schema.layout_hash(), FeatureSchema::churn_v1().layout_hash());
        assert_ne!(schema.layout_hash(), 0);
    }

    #[test]
    fn test_layout_hash_detects_reorder() {
        let schema = FeatureSchema::churn_v1();
        let mut swapped = schema.clone();
        swapped.attributes.swap(7, 14);
        assert_ne!(schema.layout_hash(), swapped.layout_hash());
    }

    #[test]
    fn test_validate_layout() {
        let schema = FeatureSchema::churn_v1();
        assert!(schema.validate_layout(FEATURE_VERSION, schema.layout_hash()).is_ok());
        assert!(schema.validate_layout(FEATURE_VERSION + 1, schema.layout_hash()).is_err());

        match schema.validate_layout(FEATURE_VERSION, !schema.layout_hash()) {
            Err(ChurnError::LayoutMismatch { expected_hash, actual_hash, .. }) => {
                assert_eq!(expected_hash, schema.layout_hash());
                assert_ne!(actual_hash, expected_hash);
            }
            other => panic!("Expected LayoutMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_feature_index() {
        let schema = FeatureSchema::churn_v1();
        assert_eq!(schema.feature_index("gender"), Some(0));
        assert_eq!(schema.feature_index("internet_service"), Some(7));
        assert_eq!(schema.feature_index("contract"), Some(14));
        assert_eq!(schema.feature_index("monthly_charges"), Some(17));
        assert_eq!(schema.feature_index("salary"), None);
        assert_eq!(schema.feature_name(4), Some("tenure"));
        assert_eq!(schema.feature_name(100), None);
    }

    #[test]
    fn test_numeric_domain() {
        assert!(NumericDomain::NonNegativeInteger.admits(0.0));
        assert!(NumericDomain::NonNegativeInteger.admits(72.0));
        assert!(!NumericDomain::NonNegativeInteger.admits(1.5));
        assert!(!NumericDomain::NonNegativeInteger.admits(-1.0));
        assert!(NumericDomain::NonNegativeReal.admits(70.25));
        assert!(!NumericDomain::NonNegativeReal.admits(f64::NAN));
        assert!(!NumericDomain::NonNegativeReal.admits(f64::INFINITY));
    }

    #[test]
    fn test_layout_info_serializes() {
        let info = LayoutInfo::default();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["feature_count"], FEATURE_COUNT);
        assert_eq!(json["feature_names"][16], "payment_method");
    }

    #[test]
    fn test_schema_serializes_kind_tag() {
        let schema = FeatureSchema::churn_v1();
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["attributes"][0]["kind"], "binary");
        assert_eq!(json["attributes"][0]["affirmative"], "Male");
        assert_eq!(json["attributes"][4]["domain"], "non_negative_integer");
        assert_eq!(json["attributes"][7]["vocabulary"][1]["label"], "Fiber Optic");
    }
}
