//! Layered loading of feature schema overrides.
//!
//! Uses `figment`: built-in schema -> user config file -> workspace config file
//! -> explicit file -> environment. The user file lives at
//! `~/.config/bikeshare/schema.toml` (platform equivalent), the workspace file
//! at `.bikeshare/schema.toml`.
//!
//! Later layers replace whole fields; a file that sets `numeric` replaces the
//! full numeric list rather than appending to it.
//!
//! Environment values are parsed as typed values, so a name that reads as a
//! number or boolean must be double-quoted to stay a string:
//! `BIKESHARE_SCHEMA_LABEL='"2024"'`. Arrays use brackets:
//! `BIKESHARE_SCHEMA_NUMERIC='[Temperature(°C), "2024"]'`.

use crate::error::Result;
use crate::registry::builtin_config;
use crate::schema::{FeatureSchema, SchemaConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `BIKESHARE_SCHEMA_LABEL`.
pub const ENV_PREFIX: &str = "BIKESHARE_SCHEMA_";

const CONFIG_DIR: &str = ".bikeshare";
const CONFIG_FILE: &str = "schema.toml";

/// Path of the user-level schema file, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "bikeshare", "bikeshare")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Path of the workspace-level schema file.
pub fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Config files that [`load_schema`] would merge, lowest priority first.
///
/// Missing user and workspace files are omitted. An explicit file is always
/// listed so that a missing one is reported instead of silently ignored.
pub fn config_sources(workspace: Option<&Path>, explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    if let Some(user) = user_config_path() {
        if user.exists() {
            sources.push(user);
        }
    }
    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            sources.push(ws_config);
        }
    }
    if let Some(path) = explicit {
        sources.push(path.to_path_buf());
    }
    sources
}

/// Load and validate the effective feature schema.
///
/// Priority (highest to lowest):
/// 1. Environment variables prefixed with [`ENV_PREFIX`]
/// 2. `explicit` file
/// 3. Workspace config (`<workspace>/.bikeshare/schema.toml`)
/// 4. User config
/// 5. Built-in bike-sharing schema
pub fn load_schema(workspace: Option<&Path>, explicit: Option<&Path>) -> Result<FeatureSchema> {
    let mut figment = Figment::from(Serialized::defaults(builtin_config()));

    for path in config_sources(workspace, explicit) {
        if !path.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file not found: {}", path.display()),
            )
            .into());
        }
        tracing::debug!(path = %path.display(), "Merging schema config");
        figment = figment.merge(Toml::file(&path));
    }

    // BIKESHARE_SCHEMA_LABEL, BIKESHARE_SCHEMA_NUMERIC="[a, b]", etc.
    // Numeric-looking names need quotes: BIKESHARE_SCHEMA_LABEL='"2024"'.
    figment = figment.merge(Env::prefixed(ENV_PREFIX));

    let config: SchemaConfig = figment.extract().map_err(Box::new)?;
    match FeatureSchema::try_from(config) {
        Ok(schema) => {
            tracing::info!(
                label = schema.label(),
                inputs = schema.input_feature_count(),
                "Loaded feature schema"
            );
            Ok(schema)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rejected feature schema");
            Err(e)
        }
    }
}

/// Write `schema` as TOML to `path` (atomic write), creating parent directories.
pub fn write_schema(path: &Path, schema: &FeatureSchema) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(schema)?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, &content)?;
    std::fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "Wrote feature schema");
    Ok(())
}
