//! Delayed artifact deletion.
//!
//! Each artifact gets its own timer task on the tokio runtime. When the
//! timer fires the file is removed; a file that is already gone (evicted or
//! deleted by hand) is not an error.

use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::persistence::remove_if_exists;

/// Handle to a pending expiry timer.
///
/// Dropping the handle does not cancel the timer.
#[derive(Debug)]
pub struct ExpiryHandle {
    path: PathBuf,
    task: JoinHandle<()>,
}

impl ExpiryHandle {
    /// The file this timer will delete.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Cancels the timer. Has no effect once the file has been deleted.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Returns true once the timer has fired or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the timer to fire (or for the cancellation to land).
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}

/// Spawns a task that deletes `path` after `delay`.
///
/// Must be called from within a tokio runtime.
pub fn schedule_expiry(path: PathBuf, delay: Duration) -> ExpiryHandle {
    debug!(path = %path.display(), delay = ?delay, "Scheduling artifact expiry");

    let task_path = path.clone();
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        match remove_if_exists(&task_path).await {
            Ok(true) => info!(path = %task_path.display(), "Artifact expired"),
            Ok(false) => debug!(path = %task_path.display(), "Expired artifact already gone"),
            Err(e) => warn!(path = %task_path.display(), error = %e, "Failed to expire artifact"),
        }
    });

    ExpiryHandle { path, task }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_expiry_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.xlsx");
        tokio::fs::write(&path, b"PK").await.unwrap();

        let handle = schedule_expiry(path.clone(), Duration::from_millis(20));
        assert!(path.exists());
        handle.wait().await;

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_expiry_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-written.xlsx");

        let handle = schedule_expiry(path.clone(), Duration::from_millis(1));
        handle.wait().await;

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_cancel_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.xlsx");
        tokio::fs::write(&path, b"PK").await.unwrap();

        let handle = schedule_expiry(path.clone(), Duration::from_secs(60));
        handle.cancel();
        handle.wait().await;

        assert!(path.exists());
    }
}
