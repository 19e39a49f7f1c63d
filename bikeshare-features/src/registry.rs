//! Built-in feature schema for the Seoul bike-sharing demand dataset.
//!
//! The schema is constructed on first access and shared read-only for the
//! rest of the process. The free functions here are the contract the
//! preprocessing pipeline reads; schemas loaded through [`crate::config`]
//! expose the same accessors as methods on [`FeatureSchema`].

use crate::error::Result;
use crate::schema::{BucketSpec, FeatureSchema, SchemaConfig};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Columns with string values that are converted to indices.
pub const CATEGORICAL_FEATURE_KEYS: &[&str] = &["Functioning Day", "Holiday", "Seasons"];

/// Columns treated as continuous inputs.
pub const NUMERIC_FEATURE_KEYS: &[&str] = &[
    "Humidity(%)",
    "Rainfall(mm)",
    "Snowfall (cm)",
    "Solar Radiation (MJ/m2)",
    "Temperature(°C)",
    "Visibility (10m)",
    "Wind speed (m/s)",
];

/// Columns grouped into buckets, with the bucket count used to encode each.
pub const BUCKET_FEATURES: &[(&str, u32)] = &[("Hour", 4)];

/// Column the model predicts.
pub const LABEL_KEY: &str = "Rented Bike Count";

static BIKE_SHARING: LazyLock<FeatureSchema> = LazyLock::new(|| {
    FeatureSchema::try_from(builtin_config()).expect("built-in feature schema is always valid")
});

/// The built-in schema in its serialized shape. Used as the lowest configuration layer.
pub fn builtin_config() -> SchemaConfig {
    SchemaConfig {
        label: LABEL_KEY.to_string(),
        categorical: CATEGORICAL_FEATURE_KEYS.iter().map(|s| s.to_string()).collect(),
        numeric: NUMERIC_FEATURE_KEYS.iter().map(|s| s.to_string()).collect(),
        bucketed: BUCKET_FEATURES
            .iter()
            .map(|(name, buckets)| BucketSpec::new(name, *buckets))
            .collect(),
    }
}

/// Process-wide built-in schema.
pub fn bike_sharing() -> &'static FeatureSchema {
    &BIKE_SHARING
}

pub fn categorical_features() -> &'static BTreeSet<String> {
    bike_sharing().categorical_features()
}

pub fn numeric_features() -> &'static BTreeSet<String> {
    bike_sharing().numeric_features()
}

pub fn bucketed_features() -> &'static BTreeSet<String> {
    bike_sharing().bucketed_features()
}

/// Bucket count for a bucketed feature of the built-in schema.
pub fn bucket_count(feature: &str) -> Result<u32> {
    bike_sharing().bucket_count(feature)
}

pub fn label() -> &'static str {
    bike_sharing().label()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;

    #[test]
    fn test_builtin_config_is_valid() {
        assert!(FeatureSchema::try_from(builtin_config()).is_ok());
    }

    #[test]
    fn test_categorical_features() {
        let expected: BTreeSet<String> = ["Functioning Day", "Holiday", "Seasons"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(categorical_features(), &expected);
    }

    #[test]
    fn test_numeric_features() {
        assert_eq!(numeric_features().len(), 7);
        assert!(numeric_features().contains("Temperature(°C)"));
        assert!(numeric_features().contains("Snowfall (cm)"));
    }

    #[test]
    fn test_bucket_count() {
        assert_eq!(bucket_count("Hour").unwrap(), 4);
        assert!(matches!(
            bucket_count("NotAFeature"),
            Err(SchemaError::UnknownFeature(name)) if name == "NotAFeature"
        ));
    }

    #[test]
    fn test_label() {
        assert_eq!(label(), "Rented Bike Count");
    }

    #[test]
    fn test_shared_instance() {
        assert!(std::ptr::eq(bike_sharing(), bike_sharing()));
    }
}
