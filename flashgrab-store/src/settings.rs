//! User settings.
//!
//! Settings live in `<config dir>/flashgrab/settings.json`. Every field has
//! a default, so a partial or missing file is fine.

use flashgrab_fetch::FetchSettings;
use flashgrab_fetch::context::{DEFAULT_FETCH_TIMEOUT, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_artifacts_dir, default_settings_path, load_json, save_json};

/// Default number of artifacts kept on disk.
pub const DEFAULT_MAX_ARTIFACTS: usize = 10;

/// Default artifact lifetime: one day.
pub const DEFAULT_EXPIRY_SECS: u64 = 86_400;

// ============================================================================
// Settings
// ============================================================================

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where artifacts are written. `None` uses the platform data directory.
    pub artifacts_dir: Option<PathBuf>,

    /// Maximum number of artifacts kept; older ones are evicted.
    pub max_artifacts: usize,

    /// Seconds an artifact lives before it is deleted.
    pub expiry_secs: u64,

    /// Per-request timeout in seconds.
    pub fetch_timeout_secs: u64,

    /// User agent sent with page requests.
    pub user_agent: String,

    /// Extra attempts for a page whose fetch failed. Zero disables retries.
    pub page_retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            artifacts_dir: None,
            max_artifacts: DEFAULT_MAX_ARTIFACTS,
            expiry_secs: DEFAULT_EXPIRY_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_retries: 0,
        }
    }
}

impl Settings {
    /// Loads settings from the default path.
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(&default_settings_path()).await
    }

    /// Loads settings from `path`.
    ///
    /// A missing file yields defaults. A file that cannot be parsed is
    /// logged and also yields defaults.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        if !tokio::fs::try_exists(path).await? {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(Self::default());
        }

        info!(path = %path.display(), "Loading settings");
        match load_json::<Self>(path).await {
            Ok(settings) => {
                settings.validate()?;
                Ok(settings)
            }
            Err(StoreError::Serialization(e)) => {
                warn!(error = %e, "Failed to parse settings, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves settings to `path`.
    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        self.validate()?;
        save_json(path, self).await?;
        info!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Checks that the numeric limits are usable.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.max_artifacts == 0 {
            return Err(StoreError::Config("max_artifacts must be at least 1".into()));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(StoreError::Config(
                "fetch_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Derived Values
    // ========================================================================

    /// Returns the artifact directory, falling back to the platform default.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.artifacts_dir
            .clone()
            .unwrap_or_else(default_artifacts_dir)
    }

    /// Returns the artifact lifetime.
    pub fn expiry(&self) -> Duration {
        Duration::from_secs(self.expiry_secs)
    }

    /// Builds the fetch settings for a run.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings::default()
            .with_timeout(Duration::from_secs(self.fetch_timeout_secs))
            .with_user_agent(self.user_agent.clone())
            .with_page_retries(self.page_retries)
    }
}

// ============================================================================
// Tests
// ============================================================================
