//! Character controller using rapier3d's kinematic character controller

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};
use stride_core::Mover;
use tracing::debug;

use crate::PhysicsWorld;

/// Character controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterControllerConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
    /// Maximum slope angle in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Step height for climbing stairs (default: 0.25m)
    pub step_height: f32,
    /// Skin width for collision detection (default: 0.02m)
    pub skin_width: f32,
    /// Whether to snap to ground when walking down slopes
    pub snap_to_ground: bool,
    /// Maximum ground snap distance
    pub ground_snap_distance: f32,
}

impl Default for CharacterControllerConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.4,
            max_slope_angle: 45.0,
            step_height: 0.25,
            skin_width: 0.02,
            snap_to_ground: true,
            ground_snap_distance: 0.2,
        }
    }
}

/// Capsule character that moves through the world with collision.
///
/// `position` is the bottom of the capsule (the character's feet).
pub struct CharacterController {
    /// Configuration
    pub config: CharacterControllerConfig,
    /// Current position (feet)
    pub position: Vec3,
    /// Whether the last move ended on the ground
    pub grounded: bool,
    /// The collider handle for this character
    pub collider_handle: Option<ColliderHandle>,
    /// Rapier's kinematic character controller
    controller: KinematicCharacterController,
}

impl CharacterController {
    /// Create a new character controller with default config
    pub fn new() -> Self {
        Self::with_config(CharacterControllerConfig::default())
    }

    /// Create a new character controller with custom config
    pub fn with_config(config: CharacterControllerConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: true,
        });
        controller.snap_to_ground = if config.snap_to_ground {
            Some(CharacterLength::Absolute(config.ground_snap_distance))
        } else {
            None
        };
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            config,
            position: Vec3::ZERO,
            grounded: false,
            collider_handle: None,
            controller,
        }
    }

    /// Spawn the character in the physics world
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) -> ColliderHandle {
        if let Some(previous) = self.collider_handle.take() {
            physics.remove_collider(previous);
        }

        self.position = position;
        self.grounded = false;

        let half_height = (self.config.height - 2.0 * self.config.radius) / 2.0;
        let center = self.center_position();
        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), self.config.radius)
            .translation(vector![center.x, center.y, center.z])
            .friction(0.0) // Smooth sliding against walls
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        debug!(?position, "Spawned character capsule");
        handle
    }

    /// Move the character with collision detection.
    ///
    /// Returns the grounded state after the move. Unspawned characters stay put.
    pub fn move_character(
        &mut self,
        physics: &mut PhysicsWorld,
        desired_translation: Vec3,
        dt: f32,
    ) -> bool {
        let Some(collider_handle) = self.collider_handle else {
            return false;
        };

        let Some(collider) = physics.collider_set.get(collider_handle) else {
            return false;
        };

        let shape = collider.shape();
        let center = self.center_position();
        let current_pos = Isometry::translation(center.x, center.y, center.z);

        let movement = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            physics.query_pipeline(),
            shape,
            &current_pos,
            vector![desired_translation.x, desired_translation.y, desired_translation.z],
            QueryFilter::default().exclude_collider(collider_handle),
            |_| {},
        );

        if movement.grounded != self.grounded {
            debug!(grounded = movement.grounded, "Character grounded state changed");
        }
        self.grounded = movement.grounded;

        let effective = movement.translation;
        self.position += Vec3::new(effective.x, effective.y, effective.z);

        let center = self.center_position();
        if let Some(collider) = physics.collider_set.get_mut(collider_handle) {
            collider.set_translation(vector![center.x, center.y, center.z]);
        }

        self.grounded
    }

    /// Borrow this character and the world as a `Mover` for one frame
    pub fn mover<'a>(&'a mut self, physics: &'a mut PhysicsWorld, dt: f32) -> PhysicsMover<'a> {
        PhysicsMover {
            character: self,
            physics,
            dt,
        }
    }

    /// Set the character's position directly (teleport)
    pub fn set_position(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.position = position;
        self.grounded = false;

        let center = self.center_position();
        if let Some(handle) = self.collider_handle {
            if let Some(collider) = physics.collider_set.get_mut(handle) {
                collider.set_translation(vector![center.x, center.y, center.z]);
            }
        }
    }

    /// Get the eye position (top of capsule)
    pub fn eye_position(&self) -> Vec3 {
        Vec3::new(
            self.position.x,
            self.position.y + self.config.height - 0.1, // Slightly below top
            self.position.z,
        )
    }

    /// Get the center position (middle of capsule)
    pub fn center_position(&self) -> Vec3 {
        Vec3::new(
            self.position.x,
            self.position.y + self.config.height / 2.0,
            self.position.z,
        )
    }

    /// Check if standing on ground
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new()
    }
}

/// A character paired with the world it moves through, valid for one frame
pub struct PhysicsMover<'a> {
    character: &'a mut CharacterController,
    physics: &'a mut PhysicsWorld,
    dt: f32,
}

impl Mover for PhysicsMover<'_> {
    fn move_by(&mut self, displacement: Vec3) -> bool {
        self.character
            .move_character(self.physics, displacement, self.dt)
    }

    fn is_grounded(&self) -> bool {
        self.character.is_grounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_ground() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        world.update_queries();
        world
    }

    #[test]
    fn test_character_controller_config() {
        let config = CharacterControllerConfig::default();
        assert_eq!(config.height, 1.8);
        assert_eq!(config.radius, 0.4);
        assert_eq!(config.max_slope_angle, 45.0);
    }

    #[test]
    fn test_character_eye_position() {
        let controller = CharacterController::new();
        let eye = controller.eye_position();
        assert!(eye.y > 0.0);
        assert!(eye.y < controller.config.height);
    }

    #[test]
    fn test_unspawned_move_is_noop() {
        let mut world = PhysicsWorld::new();
        let mut controller = CharacterController::new();

        let grounded = controller.move_character(&mut world, Vec3::X, 1.0 / 60.0);
        assert!(!grounded);
        assert_eq!(controller.position, Vec3::ZERO);
    }

    #[test]
    fn test_ground_blocks_downward_move() {
        let mut world = world_with_ground();
        let mut controller = CharacterController::new();
        controller.spawn(&mut world, Vec3::new(0.0, 0.5, 0.0));

        for _ in 0..30 {
            controller.move_character(&mut world, Vec3::new(0.0, -0.2, 0.0), 1.0 / 60.0);
        }

        assert!(controller.position.y > -0.05);
        assert!(controller.position.y < 0.2);
    }

    #[test]
    fn test_free_horizontal_move() {
        let mut world = world_with_ground();
        let mut controller = CharacterController::new();
        controller.spawn(&mut world, Vec3::new(0.0, 1.0, 0.0));

        controller.move_character(&mut world, Vec3::new(0.5, 0.0, 0.0), 1.0 / 60.0);
        assert!((controller.position.x - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_mover_reports_controller_state() {
        let mut world = world_with_ground();
        let mut controller = CharacterController::new();
        controller.spawn(&mut world, Vec3::new(0.0, 2.0, 0.0));

        let mut mover = controller.mover(&mut world, 1.0 / 60.0);
        let grounded = mover.move_by(Vec3::new(0.0, -0.1, 0.0));
        assert_eq!(grounded, mover.is_grounded());
        assert!(!grounded);
        assert!((controller.position.y - 1.9).abs() < 0.05);
    }

    #[test]
    fn test_respawn_replaces_collider() {
        let mut world = world_with_ground();
        let mut controller = CharacterController::new();
        let first = controller.spawn(&mut world, Vec3::ZERO);
        let second = controller.spawn(&mut world, Vec3::new(3.0, 0.0, 0.0));

        assert!(world.get_collider(first).is_none());
        assert!(world.get_collider(second).is_some());
    }
}
