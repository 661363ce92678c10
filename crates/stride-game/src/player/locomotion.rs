//! Per-frame third-person locomotion
//!
//! Turns two raw input axes and a camera yaw into a horizontal move, a
//! gravity move and a new facing, applied through any [`Mover`].

use glam::{Quat, Vec3};
use stride_core::{rotate_towards, yaw_rotation, Mover};
use tracing::trace;

use crate::error::ConfigError;

use super::movement::{MovementConfig, GROUNDED_VERTICAL_VELOCITY, MIN_INPUT_MAGNITUDE};

/// Everything locomotion reads from the outside world for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Raw horizontal axis in [-1, 1]
    pub horizontal: f32,
    /// Raw vertical axis in [-1, 1]
    pub vertical: f32,
    /// Camera yaw in degrees
    pub camera_yaw: f32,
    /// Elapsed time in seconds
    pub dt: f32,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionStep {
    /// Horizontal displacement requested from the mover (zero when idle)
    pub horizontal: Vec3,
    /// Vertical displacement requested from the mover
    pub vertical: Vec3,
    /// Yaw the character turned toward, if there was input
    pub target_yaw: Option<f32>,
    /// Grounded state reported by the final move
    pub grounded: bool,
}

/// Camera-relative walking with simple gravity
#[derive(Debug, Clone)]
pub struct LocomotionUpdater {
    config: MovementConfig,
    vertical_velocity: f32,
}

impl LocomotionUpdater {
    /// Create an updater after validating its configuration
    pub fn new(config: MovementConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            vertical_velocity: 0.0,
        })
    }

    /// Current configuration
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Replace the configuration (live tuning). Invalid configs are rejected untouched.
    pub fn set_config(&mut self, config: MovementConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Vertical velocity carried between frames
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Forget accumulated vertical velocity (spawns, teleports)
    pub fn reset(&mut self) {
        self.vertical_velocity = 0.0;
    }

    /// Run one frame.
    ///
    /// Grounded is whatever the mover reported at the end of the previous
    /// frame. The horizontal and vertical displacements are two separate
    /// mover calls, horizontal first.
    pub fn tick<M: Mover + ?Sized>(
        &mut self,
        mover: &mut M,
        facing: &mut Quat,
        input: &FrameInput,
    ) -> LocomotionStep {
        let dt = if input.dt.is_finite() { input.dt.max(0.0) } else { 0.0 };

        if mover.is_grounded() && self.vertical_velocity < 0.0 {
            self.vertical_velocity = GROUNDED_VERTICAL_VELOCITY;
        }
        self.vertical_velocity += self.config.gravity * dt;

        let raw = Vec3::new(input.horizontal, 0.0, input.vertical);
        let mut horizontal = Vec3::ZERO;
        let mut target_yaw = None;

        // NaN axes fail this comparison and count as no input; so does a
        // non-finite camera yaw, which would leave the facing NaN for good
        if raw.length() >= MIN_INPUT_MAGNITUDE && input.camera_yaw.is_finite() {
            let direction = raw.normalize();
            let yaw = direction.x.atan2(direction.z).to_degrees() + input.camera_yaw;
            let target = yaw_rotation(yaw);

            *facing = rotate_towards(*facing, target, self.config.max_turn(dt));

            let move_dir = target * Vec3::Z;
            horizontal = move_dir.normalize() * self.config.max_step(dt);
            mover.move_by(horizontal);
            target_yaw = Some(yaw);
        }

        let vertical = Vec3::new(0.0, self.vertical_velocity * dt, 0.0);
        let grounded = mover.move_by(vertical);

        trace!(
            ?horizontal,
            vertical_velocity = self.vertical_velocity,
            grounded,
            "Locomotion tick"
        );

        LocomotionStep {
            horizontal,
            vertical,
            target_yaw,
            grounded,
        }
    }
}
