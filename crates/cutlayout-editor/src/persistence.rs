//! Persistence boundary for edited layouts.
//!
//! The editor hands a committed working copy to a [`PersistenceGateway`] and
//! treats any failure as "edits remain local". Two gateways are provided:
//! [`MemoryGateway`] keeps the edited layout in process, and [`FileGateway`]
//! stores it as JSON next to a save timestamp.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cutlayout_core::{Layout, LayoutError, LayoutPayload};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Errors reported by a persistence gateway.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The backing store refused or lost the request.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A stored layout could not be read back.
    #[error("Stored layout is invalid: {0}")]
    InvalidStored(#[from] LayoutError),

    /// I/O error during persistence.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON error during persistence.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for persistence operations.
pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

/// Storage for the edited layout of one job.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Overwrites the stored edited layout.
    async fn save(&self, layout: &Layout) -> PersistenceResult<()>;

    /// Deletes the stored edited layout. Succeeds when nothing is stored.
    async fn reset(&self) -> PersistenceResult<()>;
}

/// In-process gateway.
///
/// Failures can be injected with [`MemoryGateway::fail_next_saves`] and
/// [`MemoryGateway::fail_next_resets`].
#[derive(Debug, Default)]
pub struct MemoryGateway {
    stored: Mutex<Option<LayoutPayload>>,
    failing_saves: AtomicUsize,
    failing_resets: AtomicUsize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored edited layout, in wire form.
    pub fn stored(&self) -> Option<LayoutPayload> {
        self.lock().clone()
    }

    /// Makes the next `count` saves fail.
    pub fn fail_next_saves(&self, count: usize) {
        self.failing_saves.store(count, Ordering::SeqCst);
    }

    /// Makes the next `count` resets fail.
    pub fn fail_next_resets(&self, count: usize) {
        self.failing_resets.store(count, Ordering::SeqCst);
    }

    fn lock(&self) -> MutexGuard<'_, Option<LayoutPayload>> {
        // A poisoned lock still holds a whole payload; writes are single assignments.
        self.stored.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn save(&self, layout: &Layout) -> PersistenceResult<()> {
        if Self::take_failure(&self.failing_saves) {
            return Err(PersistenceError::Unavailable("injected save failure".into()));
        }
        *self.lock() = Some(layout.to_payload());
        Ok(())
    }

    async fn reset(&self) -> PersistenceResult<()> {
        if Self::take_failure(&self.failing_resets) {
            return Err(PersistenceError::Unavailable("injected reset failure".into()));
        }
        *self.lock() = None;
        Ok(())
    }
}

/// On-disk form written by [`FileGateway`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLayout {
    pub saved_at: DateTime<Utc>,
    pub layout: LayoutPayload,
}

/// Stores the edited layout as a JSON file.
///
/// Saves go through a sibling temporary file and a rename, so a failed save
/// never leaves a truncated file behind.
#[derive(Debug, Clone)]
pub struct FileGateway {
    path: PathBuf,
}

impl FileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored envelope, or `None` when nothing has been saved.
    pub async fn load(&self) -> PersistenceResult<Option<SavedLayout>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PersistenceGateway for FileGateway {
    async fn save(&self, layout: &Layout) -> PersistenceResult<()> {
        let envelope = SavedLayout {
            saved_at: Utc::now(),
            layout: layout.to_payload(),
        };
        let json = serde_json::to_string_pretty(&envelope)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        tracing::debug!(path = %self.path.display(), "edited layout written");
        Ok(())
    }

    async fn reset(&self) -> PersistenceResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
