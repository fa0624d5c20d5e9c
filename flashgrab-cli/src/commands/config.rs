//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use flashgrab_store::{Settings, default_artifacts_dir, default_config_dir};
use tracing::info;

use super::{load_settings, settings_path};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Write a settings file with the default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Init { force } => init_config(*force, cli).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli).await?;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_settings(&settings));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&settings)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_file = settings_path(cli);
    let artifacts_dir = cli.dir.clone().unwrap_or_else(default_artifacts_dir);

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_file.display());
            println!("Artifacts dir: {}", artifacts_dir.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_file.display().to_string(),
                "artifacts_dir": artifacts_dir.display().to_string(),
            });
            println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?);
        }
    }

    Ok(())
}

async fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = settings_path(cli);

    if tokio::fs::try_exists(&path).await? && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Settings::default().save(&path).await?;
    info!(path = %path.display(), "Settings initialized");
    if !cli.quiet {
        println!("Wrote default settings to {}", path.display());
    }

    Ok(())
}
