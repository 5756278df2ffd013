//! Capture envelope
//!
//! The peripheral data bundle uploaded alongside the photo of one capture:
//! camera calibration, device attitude, the crop rect and the cropped depth
//! grid. Immutable once serialized; identical inputs serialize identically.

use serde::{Deserialize, Serialize};

use super::{CameraCalibration, CropRect, DepthGrid, DeviceAttitude};

/// Serializable peripheral bundle for one capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureEnvelope {
    pub calibration_data: CameraCalibration,
    pub device_attitude: DeviceAttitude,
    pub crop_rect: CropRect,
    pub depth_data: DepthGrid,
}

impl CaptureEnvelope {
    pub fn new(
        calibration: CameraCalibration,
        attitude: DeviceAttitude,
        crop_rect: CropRect,
        depth_data: DepthGrid,
    ) -> Self {
        Self {
            calibration_data: calibration,
            device_attitude: attitude,
            crop_rect,
            depth_data,
        }
    }

    /// Serialize to pretty-printed JSON bytes
    ///
    /// Deterministic: field order is fixed by the struct definitions, so two
    /// envelopes built from identical inputs produce identical bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}
