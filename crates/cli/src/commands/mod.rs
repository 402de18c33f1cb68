//! Subcommand implementations

pub mod config;
pub mod doctor;
pub mod name;
pub mod permissions;
pub mod plan;
pub mod services;
pub mod tags;

use anyhow::Result;
use infra_namer_domain::usecases::ResourcePlanner;
use std::path::PathBuf;

use crate::config::AppConfig;

/// Load configuration and build a planner bound to the validated scope
pub(crate) fn load_planner(config_path: Option<PathBuf>) -> Result<ResourcePlanner> {
    let config = AppConfig::load(config_path.as_deref())?;
    let scope = config.project_scope()?;

    tracing::debug!(
        source = ?config.source,
        environment = %scope.environment(),
        project = scope.project_name(),
        "Loaded project scope"
    );

    Ok(ResourcePlanner::new(scope))
}
