//! Player controller module
//!
//! Provides third-person locomotion with physics integration.

mod controller;
mod locomotion;
mod movement;

pub use controller::{PlayerController, PlayerControllerBuilder};
pub use locomotion::{FrameInput, LocomotionStep, LocomotionUpdater};
pub use movement::{MovementConfig, GROUNDED_VERTICAL_VELOCITY, MIN_INPUT_MAGNITUDE};
