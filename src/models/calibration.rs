//! Camera calibration snapshot
//!
//! Immutable copy of the calibration the camera reported at capture time.
//! Field names match the capture envelope wire schema.

use serde::{Deserialize, Serialize};

/// Camera calibration data captured alongside a photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraCalibration {
    /// 3x3 intrinsic matrix, row major
    pub intrinsic_matrix: [[f32; 3]; 3],
    /// Physical pixel size
    pub pixel_size: f32,
    /// Width and height the intrinsic matrix refers to
    pub intrinsic_matrix_reference_dimensions: [f32; 2],
    /// Lens distortion center, x and y
    pub lens_distortion_center: [f32; 2],
}
