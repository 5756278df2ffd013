//! Device attitude at capture instant

use serde::{Deserialize, Serialize};

/// Device orientation angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceAttitude {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}
