//! Player controller tying input, camera and physics to locomotion

use glam::{Quat, Vec3};
use stride_core::Transform;
use stride_physics::{CharacterController, CharacterControllerConfig, PhysicsWorld};
use tracing::{debug, info};

use crate::camera::CameraView;
use crate::error::ConfigError;
use crate::input::{CursorLock, InputAxis, InputHandler, InputState};

use super::locomotion::{FrameInput, LocomotionStep, LocomotionUpdater};
use super::MovementConfig;

/// Third-person player: a physics capsule steered by camera-relative input
pub struct PlayerController<C = Transform> {
    /// Physics character controller
    pub character: CharacterController,
    /// World position and facing of the character
    pub transform: Transform,
    /// Locomotion state (vertical velocity lives here)
    locomotion: LocomotionUpdater,
    /// Camera movement is oriented against
    camera: C,
}

impl<C: CameraView> PlayerController<C> {
    /// Start assembling a player controller
    pub fn builder() -> PlayerControllerBuilder<C> {
        PlayerControllerBuilder::default()
    }

    /// Lock and hide the cursor for mouse-driven camera play
    pub fn start(&mut self, input: &mut InputHandler, cursor: &(impl CursorLock + ?Sized)) {
        input.capture_cursor(cursor);
        info!("Player controller started");
    }

    /// Spawn the player in the world at a position
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.character.spawn(physics, position);
        self.transform.position = position;
        self.locomotion.reset();
    }

    /// Teleport the player to a position, dropping any fall speed
    pub fn teleport(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.character.set_position(physics, position);
        self.transform.position = position;
        self.locomotion.reset();
        debug!(?position, "Player teleported");
    }

    /// Run one frame of locomotion
    pub fn update(
        &mut self,
        physics: &mut PhysicsWorld,
        input: &InputState,
        dt: f32,
    ) -> LocomotionStep {
        let frame = FrameInput {
            horizontal: input.axis_raw(InputAxis::Horizontal),
            vertical: input.axis_raw(InputAxis::Vertical),
            camera_yaw: self.camera.yaw_degrees(),
            dt,
        };

        let mut mover = self.character.mover(physics, dt);
        let step = self
            .locomotion
            .tick(&mut mover, &mut self.transform.rotation, &frame);

        self.transform.position = self.character.position;
        step
    }

    /// Get the player's current position (feet)
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Get the player's facing
    pub fn facing(&self) -> Quat {
        self.transform.rotation
    }

    /// Get the player's eye position
    pub fn eye_position(&self) -> Vec3 {
        self.character.eye_position()
    }

    /// Check if the player is grounded
    pub fn is_grounded(&self) -> bool {
        self.character.is_grounded()
    }

    /// Vertical velocity carried between frames
    pub fn vertical_velocity(&self) -> f32 {
        self.locomotion.vertical_velocity()
    }

    /// Current movement configuration
    pub fn movement_config(&self) -> &MovementConfig {
        self.locomotion.config()
    }

    /// Retune movement while running
    pub fn set_movement_config(&mut self, config: MovementConfig) -> Result<(), ConfigError> {
        self.locomotion.set_config(config)
    }

    /// The bound camera
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Mutable access to the bound camera, for the host to move it between frames
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// Bind a different camera
    pub fn set_camera(&mut self, camera: C) {
        self.camera = camera;
    }
}

/// Builder for [`PlayerController`]; a camera must be bound before building
pub struct PlayerControllerBuilder<C = Transform> {
    movement: MovementConfig,
    character: CharacterControllerConfig,
    camera: Option<C>,
}

impl<C> Default for PlayerControllerBuilder<C> {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            character: CharacterControllerConfig::default(),
            camera: None,
        }
    }
}

impl<C: CameraView> PlayerControllerBuilder<C> {
    /// Movement tuning
    pub fn movement(mut self, config: MovementConfig) -> Self {
        self.movement = config;
        self
    }

    /// Capsule and collision tuning
    pub fn character(mut self, config: CharacterControllerConfig) -> Self {
        self.character = config;
        self
    }

    /// Camera that movement is oriented against
    pub fn camera(mut self, camera: C) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Validate the configuration and build the controller
    pub fn build(self) -> Result<PlayerController<C>, ConfigError> {
        let camera = self.camera.ok_or(ConfigError::MissingCamera)?;

        validate_character(&self.character)?;

        let locomotion = LocomotionUpdater::new(self.movement)?;

        Ok(PlayerController {
            character: CharacterController::with_config(self.character),
            transform: Transform::default(),
            locomotion,
            camera,
        })
    }
}

/// Reject capsules rapier would silently reshape and non-finite collision tuning
fn validate_character(config: &CharacterControllerConfig) -> Result<(), ConfigError> {
    let CharacterControllerConfig { height, radius, .. } = *config;
    if !(radius.is_finite() && height.is_finite()) || radius <= 0.0 || height <= 2.0 * radius {
        return Err(ConfigError::InvalidCapsule { height, radius });
    }

    let tuning = [
        ("max_slope_angle", config.max_slope_angle),
        ("step_height", config.step_height),
        ("skin_width", config.skin_width),
        ("ground_snap_distance", config.ground_snap_distance),
    ];
    for (field, value) in tuning {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidCharacterSetting { field, value });
        }
    }
    Ok(())
}
