//! Data models
//!
//! Capture telemetry, the serializable envelope, the persisted capture
//! history record, and the decoded recognition results.

mod attitude;
mod calibration;
mod crop_rect;
mod depth_grid;
mod envelope;
mod estimate_capture;
mod recognition;

pub use attitude::DeviceAttitude;
pub use calibration::CameraCalibration;
pub use crop_rect::{CropRect, PixelBounds, RectPoint, RectSize};
pub use depth_grid::DepthGrid;
pub use envelope::CaptureEnvelope;
pub use estimate_capture::EstimateCapture;
pub use recognition::{Candidate, RecognizedEntity, SessionRecognitionResult};
