//! Capture packaging pipeline
//!
//! Joins the pure conversions with the store: depth conversion and image
//! cropping run first (nothing is written if either fails), then the envelope
//! and JPEG are written as two independent scoped files. The capture is
//! complete only when both writes and the history insert succeed; a failure
//! anywhere releases every file written so far.

use image::DynamicImage;
use thiserror::Error;

use crate::models::{CameraCalibration, CaptureEnvelope, CropRect, DeviceAttitude, EstimateCapture};
use crate::store::{CaptureStore, StoreError};

use super::{crop, depth, GeometryError};

/// Capture pipeline error types
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("failed to encode cropped image: {0}")]
    ImageEncode(#[from] image::ImageError),

    #[error("failed to serialize capture envelope: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Raw inputs of one capture, as delivered by the camera session
#[derive(Debug)]
pub struct RawCapture<'a> {
    pub photo: &'a DynamicImage,
    /// Row-major inverse-depth buffer
    pub disparity: &'a [f32],
    pub disparity_width: usize,
    pub disparity_height: usize,
    pub calibration: CameraCalibration,
    pub attitude: DeviceAttitude,
    /// The one rect applied to both photo and disparity buffer
    pub crop_rect: CropRect,
}

/// Convert, serialize and persist one capture
///
/// Returns the saved, not-yet-submitted history record on success.
pub fn package_capture(
    store: &CaptureStore,
    raw: RawCapture<'_>,
    initial_weight: f64,
) -> Result<EstimateCapture, CaptureError> {
    // Pure geometry first; any failure here aborts before I/O.
    let depth_grid = depth::convert(
        raw.disparity,
        raw.disparity_width,
        raw.disparity_height,
        &raw.crop_rect,
    )?;
    let cropped = crop::crop(raw.photo, &raw.crop_rect)?;

    let envelope = CaptureEnvelope::new(raw.calibration, raw.attitude, raw.crop_rect, depth_grid);
    let envelope_bytes = envelope.to_json_bytes()?;
    let photo_bytes = crop::encode_jpeg(&cropped)?;

    // Two independent writes joined by a barrier: if the second fails, the
    // first handle drops and its file is removed before the error returns.
    let envelope_file = store.write_temporary(&envelope_bytes, "json")?;
    let photo_file = store.write_temporary(&photo_bytes, "jpg")?;

    let capture = EstimateCapture::new(
        envelope_file.path().to_path_buf(),
        photo_file.path().to_path_buf(),
        initial_weight,
    );
    store.save_capture(&capture)?;

    envelope_file.persist();
    photo_file.persist();
    tracing::info!(session_id = %capture.session_id, "capture packaged");
    Ok(capture)
}
