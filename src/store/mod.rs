//! Capture store
//!
//! Persists envelope and photo bytes to addressable files and keeps the
//! capture history in SQLite. File writes hand back scoped handles: dropping
//! an unpersisted handle removes its file, which is how a failed sibling
//! write releases the one that succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::db::{Database, DbError};
use crate::models::EstimateCapture;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("capture storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("no capture recorded for session {0}")]
    UnknownSession(Uuid),
}

/// Scoped handle to a written capture file
///
/// The file is removed when the handle drops, unless `persist` was called.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
    kept: bool,
}

impl TempFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the file on disk and return its path
    pub fn persist(mut self) -> PathBuf {
        self.kept = true;
        self.path.clone()
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if !self.kept {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to release capture file"
                );
            }
        }
    }
}

/// File and history storage for captures
#[derive(Clone)]
pub struct CaptureStore {
    data_dir: PathBuf,
    db: Database,
}

impl CaptureStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed
    pub fn open(data_dir: impl Into<PathBuf>, db: Database) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir, db })
    }

    /// Write bytes to a fresh file and return its scoped handle
    pub fn write_temporary(&self, bytes: &[u8], extension: &str) -> Result<TempFile, StoreError> {
        let path = self
            .data_dir
            .join(format!("{}.{}", Uuid::new_v4(), extension));
        fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), len = bytes.len(), "wrote capture file");
        Ok(TempFile { path, kept: false })
    }

    /// Append a capture to the history
    pub fn save_capture(&self, capture: &EstimateCapture) -> Result<(), StoreError> {
        self.db
            .with_conn(|conn| EstimateCapture::insert(conn, capture))?;
        Ok(())
    }

    /// The whole capture history, newest first
    pub fn get_all_captures(&self) -> Result<Vec<EstimateCapture>, StoreError> {
        Ok(self.db.with_conn(EstimateCapture::list_all)?)
    }

    /// Look up one capture by session id
    pub fn get_capture(&self, session_id: Uuid) -> Result<Option<EstimateCapture>, StoreError> {
        Ok(self
            .db
            .with_conn(|conn| EstimateCapture::get_by_session(conn, session_id))?)
    }

    /// Update a capture keyed by session identity
    pub fn update_capture(&self, capture: &EstimateCapture) -> Result<(), StoreError> {
        let affected = self
            .db
            .with_conn(|conn| EstimateCapture::update(conn, capture))?;
        if affected == 0 {
            return Err(StoreError::UnknownSession(capture.session_id));
        }
        Ok(())
    }

    /// Flip a capture's `is_submitted` flag in one atomic UPDATE
    pub fn mark_submitted(&self, session_id: Uuid) -> Result<(), StoreError> {
        let affected = self
            .db
            .with_conn(|conn| EstimateCapture::mark_submitted(conn, session_id))?;
        if affected == 0 {
            return Err(StoreError::UnknownSession(session_id));
        }
        tracing::debug!(%session_id, "capture marked submitted");
        Ok(())
    }
}
