//! Configuration loading and management

use anyhow::{Context, Result};
use infra_namer_domain::{ProjectScope, ProjectSettings};
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "./infra-namer.toml";

/// Loaded configuration plus where it came from
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub project: ProjectSettings,
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Environment variables use the `INFRA_NAMER__` prefix, e.g.
    /// `INFRA_NAMER__ENVIRONMENT=prod`.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
        let path = config_path.unwrap_or(&default_path);

        let mut source = None;
        if path.exists() {
            builder = builder.add_source(config::File::from(path));
            source = Some(path.to_path_buf());
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(config::Environment::with_prefix("INFRA_NAMER").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        let project: ProjectSettings = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(Self { project, source })
    }

    /// Validate into the immutable project scope
    pub fn project_scope(&self) -> Result<ProjectScope> {
        ProjectScope::try_from(self.project.clone()).context("Invalid project configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# infra-namer configuration

account_id = "123456789012"
region_name = "us-east-1"
enterprise = "aje"
project_name = "datalake"
# dev, test or prod (case-insensitive)
environment = "dev"
author = "Data Team"
separator = "-"

# Settings for the selected environment only; when this table is present it
# must contain an entry for the configured environment.
[app_config.dev]
retention_days = 7

[app_config.prod]
retention_days = 90
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infra_namer_domain::Environment;
    use tempfile::TempDir;

    #[test]
    fn test_example_config_is_valid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("infra-namer.toml");
        std::fs::write(&path, AppConfig::example_toml()).unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        let scope = config.project_scope().unwrap();

        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert_eq!(scope.environment(), Environment::Dev);
        assert_eq!(scope.separator(), "-");
        assert_eq!(scope.app_setting("retention_days"), Some(&serde_json::json!(7)));
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/infra-namer.toml")));
        assert!(result.is_err());
    }
}
