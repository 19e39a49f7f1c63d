//! CLI subcommand handlers.

use crate::Commands;
use crate::OutputFormat;
use anyhow::Context;
use bikeshare_features::config::{config_sources, workspace_config_path};
use bikeshare_features::{
    Encoding, FeatureSchema, TransformPlan, bike_sharing, load_schema, transformed_name,
    write_schema,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Handle a CLI subcommand.
pub fn handle_command(
    command: Commands,
    workspace: &Path,
    config: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    tracing::debug!(?command, workspace = %workspace.display(), "Running command");
    match command {
        Commands::Show { format } => {
            let schema = load(workspace, config)?;
            println!("{}", render_schema(&schema, format)?);
            Ok(())
        }
        Commands::Validate => {
            println!("{}", validate_report(workspace, config, quiet)?);
            Ok(())
        }
        Commands::Name { keys } => {
            for key in &keys {
                println!("{}", transformed_name(key));
            }
            Ok(())
        }
        Commands::Buckets { feature } => {
            let schema = load(workspace, config)?;
            println!("{}", schema.bucket_count(&feature)?);
            Ok(())
        }
        Commands::Plan { format } => {
            let schema = load(workspace, config)?;
            let plan = TransformPlan::for_schema(&schema)?;
            println!("{}", render_plan(&plan, format)?);
            Ok(())
        }
        Commands::Init { force } => handle_init(workspace, force),
    }
}

/// Resolve the `--workspace` argument.
///
/// A workspace named on the command line must exist; without one the current
/// directory is used.
pub fn resolve_workspace(arg: Option<&Path>) -> anyhow::Result<PathBuf> {
    match arg {
        Some(path) => path
            .canonicalize()
            .with_context(|| format!("workspace not found: {}", path.display())),
        None => Ok(std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))),
    }
}

fn load(workspace: &Path, config: Option<&Path>) -> anyhow::Result<FeatureSchema> {
    load_schema(Some(workspace), config)
        .map_err(|e| anyhow::anyhow!("Failed to load feature schema: {}", e))
}

/// Validation output: merged sources (unless `quiet`) followed by the summary line.
fn validate_report(
    workspace: &Path,
    config: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<String> {
    let sources = config_sources(Some(workspace), config);
    let schema = load(workspace, config)?;
    let mut out = String::new();
    if !quiet {
        if sources.is_empty() {
            writeln!(out, "Using built-in schema")?;
        }
        for source in &sources {
            writeln!(out, "Merged {}", source.display())?;
        }
    }
    out.push_str(&summary(&schema));
    Ok(out)
}

fn handle_init(workspace: &Path, force: bool) -> anyhow::Result<()> {
    anyhow::ensure!(
        workspace.is_dir(),
        "workspace not found: {}",
        workspace.display()
    );
    let path = workspace_config_path(workspace);
    if path.exists() && !force {
        println!("Schema file already exists at: {}", path.display());
        return Ok(());
    }
    write_schema(&path, bike_sharing())?;
    println!("Created schema file at: {}", path.display());
    Ok(())
}

fn summary(schema: &FeatureSchema) -> String {
    format!(
        "Schema OK: {} categorical, {} numeric, {} bucketed, label '{}'",
        schema.categorical_features().len(),
        schema.numeric_features().len(),
        schema.bucketed_features().len(),
        schema.label()
    )
}

fn render_schema(schema: &FeatureSchema, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(schema)?),
        OutputFormat::Toml => Ok(toml::to_string_pretty(schema)?),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "Label: {}", schema.label())?;
            for (name, kind) in schema.features() {
                match schema.bucket_count(name) {
                    Ok(buckets) => writeln!(out, "  {kind:<12} {name} ({buckets} buckets)")?,
                    Err(_) => writeln!(out, "  {kind:<12} {name}")?,
                }
            }
            Ok(out.trim_end().to_string())
        }
    }
}

fn render_plan(plan: &TransformPlan, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
        OutputFormat::Toml => Ok(toml::to_string_pretty(plan)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for step in &plan.steps {
                let encoding = match &step.encoding {
                    Encoding::Bucketize { num_buckets } => format!("bucketize({num_buckets})"),
                    other => other.as_str().to_string(),
                };
                writeln!(out, "{} -> {} [{}]", step.input, step.output, encoding)?;
            }
            Ok(out.trim_end().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary() {
        assert_eq!(
            summary(bike_sharing()),
            "Schema OK: 3 categorical, 7 numeric, 1 bucketed, label 'Rented Bike Count'"
        );
    }

    #[test]
    fn test_render_schema_text() {
        let text = render_schema(bike_sharing(), OutputFormat::Text).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Label: Rented Bike Count"));
        assert!(text.contains("bucketed     Hour (4 buckets)"));
        assert_eq!(text.lines().count(), 12);
    }

    #[test]
    fn test_render_schema_json() {
        let json = render_schema(bike_sharing(), OutputFormat::Json).unwrap();
        let parsed: FeatureSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed, bike_sharing());
    }

    #[test]
    fn test_render_plan_text() {
        let plan = TransformPlan::for_schema(bike_sharing()).unwrap();
        let text = render_plan(&plan, OutputFormat::Text).unwrap();
        assert!(text.contains("Hour -> Hour_xf [bucketize(4)]"));
        assert!(text.contains("Seasons -> Seasons_xf [vocabulary]"));
        assert!(text.ends_with("Rented Bike Count -> Rented Bike Count_xf [passthrough]"));
    }

    fn isolate(jail: &mut Jail) -> PathBuf {
        jail.clear_env();
        let dir = jail.directory().to_path_buf();
        jail.set_env("HOME", dir.display());
        jail.set_env("XDG_CONFIG_HOME", dir.join("config").display());
        dir
    }

    #[test]
    fn test_init_does_not_overwrite() {
        Jail::expect_with(|jail| {
            let dir = isolate(jail);
            let path = workspace_config_path(&dir);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "label = \"Custom\"\n").unwrap();

            handle_init(&dir, false).unwrap();
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "label = \"Custom\"\n");

            handle_init(&dir, true).unwrap();
            let schema = load(&dir, None).unwrap();
            assert_eq!(&schema, bike_sharing());
            Ok(())
        });
    }

    #[test]
    fn test_init_rejects_missing_workspace() {
        Jail::expect_with(|jail| {
            let dir = isolate(jail);
            let missing = dir.join("does-not-exist");

            let err = resolve_workspace(Some(&missing)).unwrap_err();
            assert!(err.to_string().contains("workspace not found"));

            assert!(handle_init(&missing, false).is_err());
            assert!(!missing.exists());
            assert!(!workspace_config_path(&dir).exists());
            Ok(())
        });
    }

    #[test]
    fn test_resolve_workspace_defaults_to_cwd() {
        Jail::expect_with(|jail| {
            let dir = isolate(jail);
            assert_eq!(resolve_workspace(None).unwrap(), dir);
            assert_eq!(resolve_workspace(Some(&dir)).unwrap(), dir);
            Ok(())
        });
    }

    #[test]
    fn test_validate_report_quiet() {
        Jail::expect_with(|jail| {
            let dir = isolate(jail);
            let explicit = dir.join("override.toml");
            std::fs::write(&explicit, "label = \"Rented Bike Count\"\n").unwrap();

            let loud = validate_report(&dir, Some(&explicit), false).unwrap();
            assert_eq!(loud.lines().count(), 2);
            assert!(loud.starts_with("Merged "));

            let quiet = validate_report(&dir, Some(&explicit), true).unwrap();
            assert_eq!(quiet, summary(bike_sharing()));
            Ok(())
        });
    }
}
