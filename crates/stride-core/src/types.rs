//! Core types used throughout Stride

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::yaw_rotation;

/// Transform component representing position and rotation.
///
/// Characters face local +Z; a yaw of 90 degrees turns them toward +X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a transform at `position` turned `degrees` around the vertical axis
    pub fn from_position_yaw(position: Vec3, degrees: f32) -> Self {
        Self::from_position_rotation(position, yaw_rotation(degrees))
    }

    /// Get the forward direction (positive Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Heading around the vertical axis in degrees, in (-180, 180]
    pub fn yaw_degrees(&self) -> f32 {
        let (yaw, _pitch, _roll) = self.rotation.to_euler(EulerRot::YXZ);
        yaw.to_degrees()
    }

    /// Translate by the given offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Turn by `degrees` around the vertical axis
    pub fn rotate_yaw(&mut self, degrees: f32) {
        self.rotation = yaw_rotation(degrees) * self.rotation;
    }
}
