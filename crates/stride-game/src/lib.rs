//! Stride Game - Third-person locomotion and the systems around it
//!
//! Provides input axes, the camera view locomotion reads, and the player
//! controller that ties them to the physics character.

pub mod camera;
pub mod error;
pub mod input;
pub mod player;

pub use camera::CameraView;
pub use error::ConfigError;
pub use input::{CursorLock, InputAction, InputAxis, InputBindings, InputHandler, InputState};
pub use player::{
    FrameInput, LocomotionStep, LocomotionUpdater, MovementConfig, PlayerController,
    PlayerControllerBuilder,
};
