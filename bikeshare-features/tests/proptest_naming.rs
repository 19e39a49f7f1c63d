//! Property-based tests for the transformed-name convention.

use proptest::prelude::*;

use bikeshare_features::{TRANSFORMED_SUFFIX, is_transformed_name, original_name, transformed_name};

proptest! {
    #[test]
    fn transformed_name_appends_suffix(key in ".*") {
        prop_assert_eq!(transformed_name(&key), format!("{}_xf", key));
    }

    #[test]
    fn transformed_name_keeps_original_prefix(key in ".*") {
        let name = transformed_name(&key);
        prop_assert!(name.starts_with(&key));
        prop_assert_eq!(name.len(), key.len() + TRANSFORMED_SUFFIX.len());
        prop_assert!(is_transformed_name(&name));
    }

    #[test]
    fn original_name_inverts_transformed_name(key in ".*") {
        let name = transformed_name(&key);
        prop_assert_eq!(original_name(&name), Some(key.as_str()));
    }
}
