//! Camera view read by locomotion
//!
//! Camera control lives with the host; locomotion only ever reads the yaw.

use stride_core::Transform;

/// Read-only view of a camera's heading
pub trait CameraView {
    /// World yaw of the camera in degrees
    fn yaw_degrees(&self) -> f32;
}

impl CameraView for Transform {
    fn yaw_degrees(&self) -> f32 {
        Transform::yaw_degrees(self)
    }
}
