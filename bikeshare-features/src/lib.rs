//! # bikeshare-features
//!
//! Feature schema registry for the bike-sharing demand pipeline. Declares
//! which columns are categorical, numeric or bucketed, how many buckets each
//! bucketed column gets, which column is the label, and how transformed
//! columns are named.
//!
//! The crate-root functions read the built-in schema:
//!
//! ```
//! assert_eq!(bikeshare_features::label(), "Rented Bike Count");
//! assert_eq!(bikeshare_features::bucket_count("Hour").unwrap(), 4);
//! assert_eq!(bikeshare_features::transformed_name("Hour"), "Hour_xf");
//! ```

pub mod config;
pub mod error;
pub mod naming;
pub mod plan;
pub mod registry;
pub mod schema;

pub use config::{load_schema, write_schema};
pub use error::{Result, SchemaError};
pub use naming::{TRANSFORMED_SUFFIX, is_transformed_name, original_name, transformed_name};
pub use plan::{Encoding, TransformPlan, TransformStep};
pub use registry::{
    bike_sharing, bucket_count, bucketed_features, categorical_features, label, numeric_features,
};
pub use schema::{BucketSpec, FeatureKind, FeatureSchema, SchemaConfig};
