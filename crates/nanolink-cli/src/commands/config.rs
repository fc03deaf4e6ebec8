//! Configuration management commands.

use anyhow::{Context, Result};
use nanolink_config::{ConfigLoader, NanolinkConfig};
use std::path::Path;

/// Loads the effective configuration.
///
/// An explicit `--config` file replaces the layered lookup entirely.
pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<NanolinkConfig> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "loading explicit config file");
        let mut config = NanolinkConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        let base = path.parent().unwrap_or(project_dir);
        config.resolve_paths(base);
        return Ok(config);
    }

    ConfigLoader::new()
        .with_project_dir(project_dir)
        .load()
        .context("Failed to load configuration")
}

/// Show current configuration.
pub fn show(config: &NanolinkConfig) -> Result<()> {
    let toml_str = config.to_toml()?;
    println!("{toml_str}");
    Ok(())
}
