//! Movement configuration and constants

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Vertical velocity held while grounded, keeping the capsule pressed into the floor
pub const GROUNDED_VERTICAL_VELOCITY: f32 = -2.0;

/// Raw input shorter than this counts as no input
pub const MIN_INPUT_MAGNITUDE: f32 = 0.1;

/// Movement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Horizontal speed in units per second
    pub move_speed: f32,
    /// Maximum turn rate in degrees per second
    pub rotation_speed: f32,
    /// Downward acceleration in units per second squared (negative)
    pub gravity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rotation_speed: 500.0,
            gravity: -20.0,
        }
    }
}

impl MovementConfig {
    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.move_speed.is_finite() || self.move_speed < 0.0 {
            return Err(ConfigError::InvalidMoveSpeed(self.move_speed));
        }
        if !self.rotation_speed.is_finite() || self.rotation_speed < 0.0 {
            return Err(ConfigError::InvalidRotationSpeed(self.rotation_speed));
        }
        if !self.gravity.is_finite() || self.gravity > 0.0 {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        Ok(())
    }

    /// Furthest the character may travel horizontally in `dt`
    pub fn max_step(&self, dt: f32) -> f32 {
        self.move_speed * dt
    }

    /// Largest turn in degrees allowed in `dt`
    pub fn max_turn(&self, dt: f32) -> f32 {
        self.rotation_speed * dt
    }
}
