//! Stride Core - Core types and utilities for character locomotion
//!
//! This crate provides the foundational types shared by the other crates:
//! - Mathematical primitives (re-exported from glam)
//! - Transform component for entity positioning and facing
//! - Frame time tracking
//! - The `Mover` capability implemented by collision backends

pub mod math;
pub mod mover;
pub mod time;
pub mod types;

pub use glam::{Quat, Vec3};
pub use math::{rotate_towards, yaw_rotation};
pub use mover::Mover;
pub use time::{GameTime, TimeConfig};
pub use types::Transform;
