//! Extraction service.
//!
//! The entry point for whatever front end drives Flashgrab: give it a URL
//! and it returns a finished spreadsheet, or one error saying why not.
//!
//! A run goes through these stages, in one task:
//!
//! 1. Name the intermediate log and the artifact from the URL
//! 2. Walk the pages, appending each page's records to the log
//! 3. Parse the log and write the workbook
//! 4. Drop the log, start the expiry timer and enforce the cap
//!
//! A URL with no flashcards still yields an artifact holding only the
//! header row.

use flashgrab_core::{ArtifactInfo, sibling_name, unique_filename};
use flashgrab_fetch::{
    ExtractPipeline, FetchContext, FetchError, PageSource, PaginationDriver, PaginationSummary,
    StopReason, parse_source_url,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::artifacts::{ARTIFACT_EXTENSION, ArtifactStore, DeleteOutcome};
use crate::error::{ExtractionError, StoreError};
use crate::expiry::{ExpiryHandle, schedule_expiry};
use crate::intermediate::{LOG_EXTENSION, LogWriter, read_log};
use crate::persistence::{ensure_dir, remove_if_exists};
use crate::settings::Settings;
use crate::sheet::write_workbook;

// ============================================================================
// Reports
// ============================================================================

/// A finished extraction.
#[derive(Debug)]
pub struct ExtractionReport {
    /// Artifact file name.
    pub name: String,
    /// Full path of the artifact.
    pub path: PathBuf,
    /// Rows written to the spreadsheet.
    pub records: usize,
    /// Pages requested, including the one that ended the run.
    pub pages: u32,
    /// Why pagination stopped.
    pub stop: StopReason,
    /// Artifact metadata at registration time.
    pub info: ArtifactInfo,
    /// Pending deletion of the artifact.
    pub expiry: ExpiryHandle,
}

/// What a sweep removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// Artifacts past their lifetime.
    pub expired: Vec<String>,
    /// Artifacts over the cap.
    pub evicted: Vec<String>,
}

impl SweepReport {
    /// Total number of files removed.
    pub fn removed(&self) -> usize {
        self.expired.len() + self.evicted.len()
    }
}

// ============================================================================
// Extraction Service
// ============================================================================

/// Runs extractions and manages the resulting artifacts.
pub struct ExtractionService {
    settings: Settings,
    store: ArtifactStore,
    context: FetchContext,
    pipeline: Arc<ExtractPipeline>,
}

impl ExtractionService {
    /// Creates a service that fetches pages over HTTP.
    pub fn new(settings: Settings) -> Result<Self, ExtractionError> {
        settings.validate()?;
        let context = FetchContext::with_settings(settings.fetch_settings())?;
        Ok(Self::from_parts(settings, context))
    }

    /// Creates a service that reads pages from `source`.
    pub fn with_source(
        settings: Settings,
        source: Arc<dyn PageSource>,
    ) -> Result<Self, ExtractionError> {
        settings.validate()?;
        let context = FetchContext::builder()
            .source(source)
            .settings(settings.fetch_settings())
            .build()?;
        Ok(Self::from_parts(settings, context))
    }

    fn from_parts(settings: Settings, context: FetchContext) -> Self {
        Self {
            store: ArtifactStore::new(settings.artifacts_dir()),
            settings,
            context,
            pipeline: Arc::new(ExtractPipeline::standard()),
        }
    }

    /// The active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The artifact store.
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    // ========================================================================
    // Extraction
    // ========================================================================

    /// Extracts every flashcard reachable from `url` into a new artifact.
    ///
    /// On failure the intermediate log and any partial artifact are removed.
    /// Once the workbook is written, a failed cap enforcement is logged and
    /// the run still succeeds.
    #[instrument(skip(self))]
    pub async fn run_extraction(&self, url: &str) -> Result<ExtractionReport, ExtractionError> {
        let start = Instant::now();
        let source = parse_source_url(url).map_err(|e| match e {
            FetchError::InvalidUrl(reason) => ExtractionError::InvalidUrl(reason),
            other => ExtractionError::Fetch(other),
        })?;

        ensure_dir(self.store.dir()).await?;

        let log_name = unique_filename(source.as_str(), LOG_EXTENSION);
        let name = sibling_name(&log_name, ARTIFACT_EXTENSION);
        let log_path = self.store.dir().join(&log_name);
        let path = self.store.path_for(&name)?;
        debug!(log = %log_name, artifact = %name, "Picked file names");

        let result = self.build_artifact(&source, &log_path, &path).await;
        discard(&log_path).await;

        let (summary, records) = match result {
            Ok(done) => done,
            Err(e) => {
                discard(&path).await;
                warn!(error = %e, "Extraction failed");
                return Err(e);
            }
        };

        let expiry = schedule_expiry(path.clone(), self.settings.expiry());
        let info = match self.store.register(&path).await {
            Ok(info) => info,
            Err(e) => {
                expiry.cancel();
                discard(&path).await;
                warn!(error = %e, "Artifact registration failed");
                return Err(e.into());
            }
        };
        enforce_cap_logged(&self.store, self.settings.max_artifacts).await;

        info!(
            artifact = %name,
            records,
            pages = summary.pages_fetched,
            duration = ?start.elapsed(),
            "Extraction finished"
        );

        Ok(ExtractionReport {
            name,
            path,
            records,
            pages: summary.pages_fetched,
            stop: summary.stop,
            info,
            expiry,
        })
    }

    async fn build_artifact(
        &self,
        source: &Url,
        log_path: &Path,
        artifact_path: &Path,
    ) -> Result<(PaginationSummary, usize), ExtractionError> {
        let mut writer = LogWriter::create(log_path).await?;
        let driver = PaginationDriver::new(&self.context, Arc::clone(&self.pipeline));
        let summary = driver.run(source, &mut writer).await?;

        if summary.total_records == 0 {
            info!(url = %source, "No flashcards found, writing header-only sheet");
        }

        let records = read_log(log_path).await?;
        if records.len() != summary.total_records {
            warn!(
                extracted = summary.total_records,
                parsed = records.len(),
                "Some log blocks could not be parsed"
            );
        }

        let row_count = records.len();
        let target = artifact_path.to_path_buf();
        tokio::task::spawn_blocking(move || write_workbook(&target, &records))
            .await
            .map_err(|e| StoreError::Io(std::io::Error::other(e)))??;

        Ok((summary, row_count))
    }

    // ========================================================================
    // Artifact Management
    // ========================================================================

    /// Lists current artifacts, newest first, after enforcing the cap.
    pub async fn list_artifacts(&self) -> Result<Vec<ArtifactInfo>, StoreError> {
        self.store.enforce_cap(self.settings.max_artifacts).await?;
        self.store.list_with_metadata().await
    }

    /// Deletes an artifact now.
    pub async fn delete_artifact(&self, name: &str) -> Result<DeleteOutcome, StoreError> {
        self.store.delete_now(name).await
    }

    /// Resolves `name` to the path of an existing artifact.
    pub async fn artifact_path(&self, name: &str) -> Result<Option<PathBuf>, StoreError> {
        Ok(self
            .store
            .get(name)
            .await?
            .map(|info| self.store.dir().join(info.name)))
    }

    /// Removes artifacts past their lifetime, then enforces the cap.
    ///
    /// Covers artifacts whose expiry timer died with an earlier process.
    pub async fn sweep(&self) -> Result<SweepReport, StoreError> {
        let expired = self
            .store
            .expire_older_than(self.settings.expiry())
            .await?;
        let evicted = self.store.enforce_cap(self.settings.max_artifacts).await?;
        Ok(SweepReport { expired, evicted })
    }
}

impl std::fmt::Debug for ExtractionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionService")
            .field("settings", &self.settings)
            .field("store", &self.store)
            .field("strategies", &self.pipeline.len())
            .finish_non_exhaustive()
    }
}

/// Enforces the cap, logging a failure instead of returning it.
async fn enforce_cap_logged(store: &ArtifactStore, max: usize) -> Vec<String> {
    match store.enforce_cap(max).await {
        Ok(evicted) => evicted,
        Err(e) => {
            warn!(dir = %store.dir().display(), error = %e, "Failed to enforce artifact cap");
            Vec::new()
        }
    }
}

/// Best-effort removal of a run's temporary or partial file.
async fn discard(path: &Path) {
    if let Err(e) = remove_if_exists(path).await {
        warn!(path = %path.display(), error = %e, "Failed to remove file");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cap_failure_is_logged_not_returned() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("artifacts");
        std::fs::write(&not_a_dir, b"plain file").unwrap();
        let store = ArtifactStore::new(&not_a_dir);

        assert!(store.enforce_cap(1).await.is_err());
        assert!(enforce_cap_logged(&store, 1).await.is_empty());
    }

    #[tokio::test]
    async fn test_cap_logged_returns_evicted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["old.xlsx", "new.xlsx"] {
            std::fs::write(dir.path().join(name), b"PK").unwrap();
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        let store = ArtifactStore::new(dir.path());

        assert_eq!(enforce_cap_logged(&store, 1).await, vec!["old.xlsx"]);
    }
}
