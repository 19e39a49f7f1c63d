//! Encoding plan handed to the preprocessing pipeline.
//!
//! The plan only describes which encoding each column receives and the name
//! of the column it produces. Computing vocabularies, z-scores or bucket
//! boundaries is the pipeline's job.

use crate::error::{Result, SchemaError};
use crate::naming::transformed_name;
use crate::schema::{FeatureKind, FeatureSchema};
use serde::{Deserialize, Serialize};

/// Encoding applied to a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Encoding {
    /// Map string values to integer indices through a computed vocabulary.
    Vocabulary,
    /// Scale to zero mean and unit variance.
    ZScore,
    /// Discretize into `num_buckets` quantile ranges.
    Bucketize { num_buckets: u32 },
    /// Copy the column unchanged.
    Passthrough,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Vocabulary => "vocabulary",
            Encoding::ZScore => "z_score",
            Encoding::Bucketize { .. } => "bucketize",
            Encoding::Passthrough => "passthrough",
        }
    }
}

/// One column of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformStep {
    pub input: String,
    pub output: String,
    pub kind: FeatureKind,
    pub encoding: Encoding,
}

/// Ordered list of steps covering every input feature and the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformPlan {
    pub steps: Vec<TransformStep>,
}

impl TransformPlan {
    /// Build the plan for `schema`: categorical, numeric and bucketed features
    /// in that order, followed by the label.
    pub fn for_schema(schema: &FeatureSchema) -> Result<Self> {
        let mut steps = Vec::with_capacity(schema.input_feature_count() + 1);
        for (name, kind) in schema.features() {
            let encoding = match kind {
                FeatureKind::Categorical => Encoding::Vocabulary,
                FeatureKind::Numeric => Encoding::ZScore,
                FeatureKind::Bucketed => Encoding::Bucketize {
                    num_buckets: schema.bucket_count(name)?,
                },
                FeatureKind::Label => Encoding::Passthrough,
            };
            steps.push(TransformStep::new(name, kind, encoding));
        }
        steps.push(TransformStep::new(
            schema.label(),
            FeatureKind::Label,
            Encoding::Passthrough,
        ));
        tracing::debug!(steps = steps.len(), "Built transform plan");
        Ok(Self { steps })
    }

    pub fn step(&self, input: &str) -> Result<&TransformStep> {
        self.steps
            .iter()
            .find(|s| s.input == input)
            .ok_or_else(|| SchemaError::unknown_feature(input))
    }

    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.output.as_str())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl TransformStep {
    fn new(input: &str, kind: FeatureKind, encoding: Encoding) -> Self {
        Self {
            input: input.to_string(),
            output: transformed_name(input),
            kind,
            encoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::bike_sharing;

    #[test]
    fn test_plan_covers_every_column() {
        let plan = TransformPlan::for_schema(bike_sharing()).unwrap();
        assert_eq!(plan.len(), 12);
        assert_eq!(plan.steps[0].input, "Functioning Day");
        assert_eq!(plan.steps[11].input, "Rented Bike Count");
        assert_eq!(plan.steps[11].encoding, Encoding::Passthrough);
    }

    #[test]
    fn test_plan_encodings() {
        let plan = TransformPlan::for_schema(bike_sharing()).unwrap();
        assert_eq!(plan.step("Seasons").unwrap().encoding, Encoding::Vocabulary);
        assert_eq!(plan.step("Rainfall(mm)").unwrap().encoding, Encoding::ZScore);
        assert_eq!(
            plan.step("Hour").unwrap().encoding,
            Encoding::Bucketize { num_buckets: 4 }
        );
        assert!(plan.step("Date").is_err());
    }

    #[test]
    fn test_plan_outputs_use_suffix() {
        let plan = TransformPlan::for_schema(bike_sharing()).unwrap();
        assert!(plan.output_names().all(|name| name.ends_with("_xf")));
        assert_eq!(plan.step("Hour").unwrap().output, "Hour_xf");
    }

    #[test]
    fn test_encoding_serde_tag() {
        let json = serde_json::to_value(Encoding::Bucketize { num_buckets: 4 }).unwrap();
        assert_eq!(json["type"], "bucketize");
        assert_eq!(json["num_buckets"], 4);
    }
}
