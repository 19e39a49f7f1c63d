//! Feature schema definition and validation.
//!
//! A [`FeatureSchema`] can only be obtained through [`FeatureSchema::try_from`]
//! on a [`SchemaConfig`], so every schema value in the process satisfies the
//! structural invariants: non-empty names, no duplicates, pairwise-disjoint
//! feature kinds, a label outside every input set, and a positive bucket count
//! for each bucketed feature.

use crate::error::{Result, SchemaError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// How a column participates in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Categorical,
    Numeric,
    Bucketed,
    Label,
}

impl FeatureKind {
    /// Kinds that are fed to the model as inputs, in declaration order.
    pub const INPUTS: [FeatureKind; 3] = [
        FeatureKind::Categorical,
        FeatureKind::Numeric,
        FeatureKind::Bucketed,
    ];

    pub fn is_input(self) -> bool {
        !matches!(self, FeatureKind::Label)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureKind::Categorical => "categorical",
            FeatureKind::Numeric => "numeric",
            FeatureKind::Bucketed => "bucketed",
            FeatureKind::Label => "label",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A bucketed feature together with the number of buckets it is split into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSpec {
    pub name: String,
    pub buckets: u32,
}

impl BucketSpec {
    pub fn new(name: &str, buckets: u32) -> Self {
        Self {
            name: name.to_string(),
            buckets,
        }
    }
}

/// Serialized shape of a schema, as written in `schema.toml`.
///
/// This type is unvalidated; convert it into a [`FeatureSchema`] to check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Target column the model predicts.
    pub label: String,
    /// Columns whose string values are mapped to indices.
    #[serde(default)]
    pub categorical: Vec<String>,
    /// Continuous-valued columns.
    #[serde(default)]
    pub numeric: Vec<String>,
    /// Columns discretized into a fixed number of buckets.
    #[serde(default)]
    pub bucketed: Vec<BucketSpec>,
}

/// Validated, immutable feature schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemaConfig", into = "SchemaConfig")]
pub struct FeatureSchema {
    categorical: BTreeSet<String>,
    numeric: BTreeSet<String>,
    bucketed: BTreeSet<String>,
    bucket_counts: BTreeMap<String, u32>,
    label: String,
}

impl FeatureSchema {
    pub fn categorical_features(&self) -> &BTreeSet<String> {
        &self.categorical
    }

    pub fn numeric_features(&self) -> &BTreeSet<String> {
        &self.numeric
    }

    pub fn bucketed_features(&self) -> &BTreeSet<String> {
        &self.bucketed
    }

    /// Bucket count per bucketed feature. Keys always equal [`Self::bucketed_features`].
    pub fn bucket_counts(&self) -> &BTreeMap<String, u32> {
        &self.bucket_counts
    }

    /// Number of buckets configured for `feature`.
    ///
    /// Fails with [`SchemaError::UnknownFeature`] when `feature` is not bucketed,
    /// including when it is a known feature of another kind.
    pub fn bucket_count(&self, feature: &str) -> Result<u32> {
        self.bucket_counts
            .get(feature)
            .copied()
            .ok_or_else(|| SchemaError::unknown_feature(feature))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The set of input features of the given kind. Returns `None` for [`FeatureKind::Label`].
    pub fn features_of(&self, kind: FeatureKind) -> Option<&BTreeSet<String>> {
        match kind {
            FeatureKind::Categorical => Some(&self.categorical),
            FeatureKind::Numeric => Some(&self.numeric),
            FeatureKind::Bucketed => Some(&self.bucketed),
            FeatureKind::Label => None,
        }
    }

    /// Classify a column name, including the label.
    pub fn kind_of(&self, name: &str) -> Option<FeatureKind> {
        if name == self.label {
            return Some(FeatureKind::Label);
        }
        FeatureKind::INPUTS.into_iter().find(|kind| {
            self.features_of(*kind)
                .is_some_and(|set| set.contains(name))
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kind_of(name).is_some()
    }

    /// All input features with their kind: categorical, then numeric, then bucketed.
    pub fn features(&self) -> impl Iterator<Item = (&str, FeatureKind)> + '_ {
        FeatureKind::INPUTS.into_iter().flat_map(move |kind| {
            self.features_of(kind)
                .into_iter()
                .flatten()
                .map(move |name| (name.as_str(), kind))
        })
    }

    /// Number of declared input features. The label is not counted.
    pub fn input_feature_count(&self) -> usize {
        self.categorical.len() + self.numeric.len() + self.bucketed.len()
    }
}

impl TryFrom<SchemaConfig> for FeatureSchema {
    type Error = SchemaError;

    fn try_from(config: SchemaConfig) -> Result<Self> {
        if config.label.is_empty() {
            return Err(SchemaError::EmptyName(FeatureKind::Label));
        }
        let categorical = collect_names(config.categorical, FeatureKind::Categorical)?;
        let numeric = collect_names(config.numeric, FeatureKind::Numeric)?;

        let mut bucket_counts = BTreeMap::new();
        for spec in config.bucketed {
            if spec.name.is_empty() {
                return Err(SchemaError::EmptyName(FeatureKind::Bucketed));
            }
            if spec.buckets == 0 {
                return Err(SchemaError::ZeroBuckets(spec.name));
            }
            if bucket_counts.contains_key(&spec.name) {
                return Err(SchemaError::Duplicate {
                    name: spec.name,
                    kind: FeatureKind::Bucketed,
                });
            }
            bucket_counts.insert(spec.name, spec.buckets);
        }
        let bucketed: BTreeSet<String> = bucket_counts.keys().cloned().collect();

        check_disjoint(&[
            (FeatureKind::Categorical, &categorical),
            (FeatureKind::Numeric, &numeric),
            (FeatureKind::Bucketed, &bucketed),
            (FeatureKind::Label, &BTreeSet::from([config.label.clone()])),
        ])?;

        Ok(Self {
            categorical,
            numeric,
            bucketed,
            bucket_counts,
            label: config.label,
        })
    }
}

impl From<FeatureSchema> for SchemaConfig {
    fn from(schema: FeatureSchema) -> Self {
        Self {
            label: schema.label,
            categorical: schema.categorical.into_iter().collect(),
            numeric: schema.numeric.into_iter().collect(),
            bucketed: schema
                .bucket_counts
                .into_iter()
                .map(|(name, buckets)| BucketSpec { name, buckets })
                .collect(),
        }
    }
}

fn collect_names(names: Vec<String>, kind: FeatureKind) -> Result<BTreeSet<String>> {
    let mut set = BTreeSet::new();
    for name in names {
        if name.is_empty() {
            return Err(SchemaError::EmptyName(kind));
        }
        if set.contains(&name) {
            return Err(SchemaError::Duplicate { name, kind });
        }
        set.insert(name);
    }
    Ok(set)
}

fn check_disjoint(groups: &[(FeatureKind, &BTreeSet<String>)]) -> Result<()> {
    let mut owner: BTreeMap<&str, FeatureKind> = BTreeMap::new();
    for (kind, names) in groups {
        for name in names.iter() {
            if let Some(first) = owner.insert(name.as_str(), *kind) {
                return Err(SchemaError::Overlap {
                    name: name.clone(),
                    first,
                    second: *kind,
                });
            }
        }
    }
    Ok(())
}
