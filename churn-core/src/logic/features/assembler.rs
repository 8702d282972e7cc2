//! Feature Vector Assembler
//!
//! Walks the schema in canonical order and encodes one value per attribute.

use super::encoder::encode_attribute;
use super::layout::FeatureSchema;
use super::profile::EmployeeProfile;
use super::vector::FeatureVector;
use crate::logic::error::{ChurnError, ChurnResult};

/// Assemble the model input for a profile.
///
/// Pure: same profile, same vector. Stops at the first attribute that cannot
/// be encoded and never returns a partial vector.
pub fn assemble(schema: &FeatureSchema, profile: &EmployeeProfile) -> ChurnResult<FeatureVector> {
    let mut values = Vec::with_capacity(schema.len());

    for def in schema.iter() {
        let value = profile
            .get(&def.name)
            .ok_or_else(|| ChurnError::MissingAttribute { name: def.name.clone() })?;
        values.push(encode_attribute(def, value)?);
    }

    Ok(FeatureVector::from_values(schema, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::{AttributeDef, NumericDomain};
    use crate::logic::features::profile::AttributeValue;
    use crate::logic::features::tests::sample_profile;

    #[test]
    fn test_deterministic() {
        let schema = FeatureSchema::churn_v1();
        let profile = sample_profile(&schema);

        let first = assemble(&schema, &profile).unwrap();
        let second = assemble(&schema, &profile).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), schema.len());
    }

    #[test]
    fn test_first_failure_wins() {
        let schema = FeatureSchema::churn_v1();
        let profile = EmployeeProfile::builder()
            .label("gender", "Male")
            .label("senior_citizen", "No")
            .label("partner", "No")
            .label("dependents", "No")
            .number("tenure", -3.0)
            .label("phone_service", "Yes")
            .label("multiple_lines", "No")
            .label("internet_service", "Satellite")
            .label("online_security", "No")
            .label("online_backup", "No")
            .label("device_protection", "No")
            .label("tech_support", "No")
            .label("streaming_tv", "No")
            .label("streaming_movies", "No")
            .label("contract", "Month-to-month")
            .label("paperless_billing", "Yes")
            .label("payment_method", "Electronic Check")
            .number("monthly_charges", 70.0)
            .build(&schema)
            .unwrap();

        // tenure (index 4) fails before internet_service (index 7)
        match assemble(&schema, &profile) {
            Err(ChurnError::DomainViolation { attribute, .. }) => assert_eq!(attribute, "tenure"),
            other => panic!("Expected DomainViolation on tenure, got {:?}", other),
        }
    }

    #[test]
    fn test_profile_from_other_schema() {
        let small = FeatureSchema::new(1, vec![AttributeDef::numeric("tenure", NumericDomain::NonNegativeInteger)]);
        let profile = EmployeeProfile::builder()
            .set("tenure", AttributeValue::Number(3.0))
            .build(&small)
            .unwrap();

        let schema = FeatureSchema::churn_v1();
        assert_eq!(
            assemble(&schema, &profile),
            Err(ChurnError::MissingAttribute { name: "gender".to_string() })
        );
    }
}
