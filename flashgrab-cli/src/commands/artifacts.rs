//! Artifact commands - list, delete, resolve and sweep spreadsheets.

use anyhow::Result;
use flashgrab_store::DeleteOutcome;

use super::{NotFound, service};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Lists stored artifacts.
pub async fn list(cli: &Cli) -> Result<()> {
    let service = service(cli).await?;
    let artifacts = service.list_artifacts().await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_artifacts(&artifacts, service.store().dir()));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_artifacts(&artifacts)?);
        }
    }

    Ok(())
}

/// Deletes one artifact.
pub async fn delete(name: &str, cli: &Cli) -> Result<()> {
    let service = service(cli).await?;
    let outcome = service.delete_artifact(name).await?;

    match cli.format {
        OutputFormat::Text => {
            if outcome == DeleteOutcome::NotFound {
                return Err(NotFound(name.to_string()).into());
            }
            if !cli.quiet {
                println!("{}", TextFormatter::new(!cli.no_color).format_deleted(name));
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_deleted(name, outcome)?);
        }
    }

    Ok(())
}

/// Prints the full path of an artifact.
pub async fn path(name: &str, cli: &Cli) -> Result<()> {
    let service = service(cli).await?;
    let path = service
        .artifact_path(name)
        .await?
        .ok_or_else(|| NotFound(name.to_string()))?;

    match cli.format {
        OutputFormat::Text => println!("{}", path.display()),
        OutputFormat::Json => {
            let value = serde_json::json!({ "name": name, "path": path.display().to_string() });
            println!("{}", JsonFormatter::new(cli.pretty).format(&value)?);
        }
    }

    Ok(())
}

/// Removes expired artifacts and enforces the cap.
pub async fn sweep(cli: &Cli) -> Result<()> {
    let service = service(cli).await?;
    let report = service.sweep().await?;

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", TextFormatter::new(!cli.no_color).format_sweep(&report));
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_sweep(&report)?);
        }
    }

    Ok(())
}
