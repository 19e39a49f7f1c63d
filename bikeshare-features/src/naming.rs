//! Naming convention for transformed columns.

/// Suffix appended to a column name once the pipeline has transformed it.
pub const TRANSFORMED_SUFFIX: &str = "_xf";

/// Name of the transformed version of `key`: `key` followed by [`TRANSFORMED_SUFFIX`].
pub fn transformed_name(key: &str) -> String {
    format!("{key}{TRANSFORMED_SUFFIX}")
}

/// Recover the original column name from a transformed one.
///
/// Strips exactly one trailing suffix, so `"a_xf_xf"` maps back to `"a_xf"`.
pub fn original_name(name: &str) -> Option<&str> {
    name.strip_suffix(TRANSFORMED_SUFFIX)
}

pub fn is_transformed_name(name: &str) -> bool {
    name.ends_with(TRANSFORMED_SUFFIX)
}
