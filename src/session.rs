//! Capture/submit session orchestration
//!
//! Joins the packaging pipeline, the store and the backend client behind a
//! busy-guard: at most one capture or submission runs at a time, and a call
//! arriving while one is in flight fails fast with `Busy` instead of
//! queueing. There is no timeout and no cancellation; every operation runs
//! to completion or error.
//!
//! Submissions are not deduplicated by session id: re-submitting an already
//! submitted capture goes back to the backend.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::backend::{BackendError, NutritionEstimationClient};
use crate::capture::{package_capture, CaptureError, RawCapture};
use crate::models::{EstimateCapture, SessionRecognitionResult};
use crate::store::{CaptureStore, StoreError};

/// Session error types
#[derive(Debug, Error)]
pub enum SessionError {
    /// A capture or submission is already in flight
    #[error("a capture or submission is already in progress")]
    Busy,

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Busy-guarded capture and submission cycle
pub struct EstimateSession {
    store: CaptureStore,
    client: NutritionEstimationClient,
    token: String,
    busy: AtomicBool,
}

impl EstimateSession {
    pub fn new(store: CaptureStore, client: NutritionEstimationClient, token: String) -> Self {
        Self {
            store,
            client,
            token,
            busy: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &CaptureStore {
        &self.store
    }

    /// Package and persist one capture
    pub fn capture(
        &self,
        raw: RawCapture<'_>,
        initial_weight: f64,
    ) -> Result<EstimateCapture, SessionError> {
        let _guard = self.begin()?;
        Ok(package_capture(&self.store, raw, initial_weight)?)
    }

    /// Submit a persisted capture and mark it submitted on success
    pub async fn submit(
        &self,
        capture: &EstimateCapture,
    ) -> Result<SessionRecognitionResult, SessionError> {
        let _guard = self.begin()?;
        let result = self
            .client
            .submit(
                &self.token,
                &capture.session_id.to_string(),
                &capture.json_path,
                &capture.photo_path,
            )
            .await?;
        self.store.mark_submitted(capture.session_id)?;
        tracing::info!(session_id = %capture.session_id, entities = result.results.len(), "capture submitted");
        Ok(result)
    }

    fn begin(&self) -> Result<BusyGuard<'_>, SessionError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(SessionError::Busy);
        }
        Ok(BusyGuard(&self.busy))
    }
}

/// Clears the busy flag when the guarded operation finishes, error included
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
