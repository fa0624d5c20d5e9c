//! Artifact store.
//!
//! Artifacts are plain `.xlsx` files in one directory; the directory listing
//! is the source of truth. The store keeps at most `max` of them (newest
//! first by creation time) and deletes each one when its lifetime runs out.

use chrono::{DateTime, Local, TimeDelta};
use flashgrab_core::ArtifactInfo;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::error::StoreError;
use crate::expiry::{ExpiryHandle, schedule_expiry};
use crate::persistence::remove_if_exists;

/// Extension of spreadsheet artifacts.
pub const ARTIFACT_EXTENSION: &str = ".xlsx";

/// Result of an explicit delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The file existed and was removed.
    Deleted,
    /// There was no such artifact.
    NotFound,
}

/// Directory-backed store of spreadsheet artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a store over `dir`. The directory is not created here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the artifacts.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Rejects names that could escape the directory or are not artifacts.
    pub fn validate_name(name: &str) -> Result<(), StoreError> {
        let stem_len = name.len().saturating_sub(ARTIFACT_EXTENSION.len());
        if stem_len == 0
            || !name.ends_with(ARTIFACT_EXTENSION)
            || name.contains(['/', '\\'])
            || name.contains("..")
        {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    /// Resolves `name` to a path inside the store directory.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        Self::validate_name(name)?;
        Ok(self.dir.join(name))
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Returns metadata for an artifact that was just written at `path`.
    pub async fn register(&self, path: &Path) -> Result<ArtifactInfo, StoreError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StoreError::InvalidName(path.display().to_string()))?;
        Self::validate_name(name)?;

        let metadata = tokio::fs::metadata(path).await?;
        let info = info_from(name, &metadata);
        info!(name = %info.name, size = info.size_bytes, "Artifact registered");
        Ok(info)
    }

    /// Returns metadata for `name`, or `None` if there is no such artifact.
    pub async fn get(&self, name: &str) -> Result<Option<ArtifactInfo>, StoreError> {
        let path = self.path_for(name)?;
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok(Some(info_from(name, &metadata))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all artifacts, newest first.
    ///
    /// A missing directory is an empty store. Files that disappear while
    /// the directory is being scanned are skipped.
    pub async fn list_with_metadata(&self) -> Result<Vec<ArtifactInfo>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut artifacts = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if Self::validate_name(name).is_err() {
                continue;
            }
            match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => artifacts.push(info_from(name, &metadata)),
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        artifacts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(artifacts)
    }

    // ========================================================================
    // Retention
    // ========================================================================

    /// Deletes every artifact beyond the `max` newest. Returns evicted names.
    ///
    /// Calling it again without new artifacts deletes nothing.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub async fn enforce_cap(&self, max: usize) -> Result<Vec<String>, StoreError> {
        let artifacts = self.list_with_metadata().await?;
        let mut evicted = Vec::new();

        for artifact in artifacts.into_iter().skip(max) {
            if remove_if_exists(&self.dir.join(&artifact.name)).await? {
                info!(name = %artifact.name, "Evicted artifact over cap");
            }
            evicted.push(artifact.name);
        }

        if !evicted.is_empty() {
            debug!(count = evicted.len(), "Cap enforced");
        }
        Ok(evicted)
    }

    /// Deletes artifacts created more than `age` ago. Returns their names.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub async fn expire_older_than(&self, age: Duration) -> Result<Vec<String>, StoreError> {
        let Some(cutoff) = TimeDelta::from_std(age)
            .ok()
            .and_then(|age| Local::now().checked_sub_signed(age))
        else {
            return Ok(Vec::new());
        };

        let mut expired = Vec::new();
        for artifact in self.list_with_metadata().await? {
            if artifact.created_at >= cutoff {
                continue;
            }
            if remove_if_exists(&self.dir.join(&artifact.name)).await? {
                info!(name = %artifact.name, "Expired stale artifact");
            }
            expired.push(artifact.name);
        }
        Ok(expired)
    }

    /// Schedules deletion of `name` after `delay`.
    pub fn schedule_expiry(&self, name: &str, delay: Duration) -> Result<ExpiryHandle, StoreError> {
        Ok(schedule_expiry(self.path_for(name)?, delay))
    }

    /// Deletes `name` immediately.
    pub async fn delete_now(&self, name: &str) -> Result<DeleteOutcome, StoreError> {
        let path = self.path_for(name)?;
        if remove_if_exists(&path).await? {
            info!(name, "Artifact deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            debug!(name, "Delete requested for missing artifact");
            Ok(DeleteOutcome::NotFound)
        }
    }
}

/// Builds artifact info, using the modification time where the platform
/// has no creation time.
fn info_from(name: &str, metadata: &Metadata) -> ArtifactInfo {
    let created_at = metadata
        .created()
        .or_else(|_| metadata.modified())
        .map_or_else(|_| Local::now(), DateTime::<Local>::from);
    ArtifactInfo::new(name, created_at, metadata.len())
}

// ============================================================================
// Tests
// ============================================================================
