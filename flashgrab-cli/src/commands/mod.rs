//! CLI command implementations.

pub mod artifacts;
pub mod config;
pub mod extract;

use anyhow::Result;
use flashgrab_store::{ExtractionService, Settings, default_settings_path};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::Cli;

/// Error for an artifact name that matches no file.
#[derive(Debug, Error)]
#[error("No artifact named {0}")]
pub struct NotFound(pub String);

/// Path of the settings file in effect.
pub fn settings_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(default_settings_path)
}

/// Loads settings and applies command-line overrides.
pub async fn load_settings(cli: &Cli) -> Result<Settings> {
    let path = settings_path(cli);
    let mut settings = Settings::load(&path).await?;

    if let Some(dir) = &cli.dir {
        settings.artifacts_dir = Some(dir.clone());
    }
    if let Some(max) = cli.max_files {
        settings.max_artifacts = max;
    }
    settings.validate()?;

    debug!(settings = ?settings, "Effective settings");
    Ok(settings)
}

/// Builds an HTTP-backed service from the effective settings.
pub async fn service(cli: &Cli) -> Result<ExtractionService> {
    Ok(ExtractionService::new(load_settings(cli).await?)?)
}
