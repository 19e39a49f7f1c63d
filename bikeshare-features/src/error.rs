//! Error types for the bikeshare-features crate.

use crate::schema::FeatureKind;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while building, loading or querying a feature schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    #[error("Empty feature name in {0} features")]
    EmptyName(FeatureKind),

    #[error("Duplicate {kind} feature: {name}")]
    Duplicate { name: String, kind: FeatureKind },

    #[error("Bucketed feature '{0}' must have at least one bucket")]
    ZeroBuckets(String),

    #[error("Feature '{name}' is declared as both {first} and {second}")]
    Overlap {
        name: String,
        first: FeatureKind,
        second: FeatureKind,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl SchemaError {
    pub fn unknown_feature(name: impl Into<String>) -> Self {
        Self::UnknownFeature(name.into())
    }

    /// Whether this error comes from a schema that breaks a structural invariant,
    /// as opposed to a lookup or I/O failure.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(
            self,
            Self::EmptyName(_) | Self::Duplicate { .. } | Self::ZeroBuckets(_) | Self::Overlap { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_feature_message() {
        let err = SchemaError::unknown_feature("NotAFeature");
        assert_eq!(err.to_string(), "Unknown feature: NotAFeature");
        assert!(!err.is_invalid_schema());
    }

    #[test]
    fn test_overlap_message() {
        let err = SchemaError::Overlap {
            name: "Hour".into(),
            first: FeatureKind::Numeric,
            second: FeatureKind::Bucketed,
        };
        assert_eq!(
            err.to_string(),
            "Feature 'Hour' is declared as both numeric and bucketed"
        );
        assert!(err.is_invalid_schema());
    }
}
