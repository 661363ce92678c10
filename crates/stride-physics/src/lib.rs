//! Stride Physics - Collision queries using rapier3d
//!
//! Holds the static collision geometry characters walk on and the kinematic
//! capsule controller that moves through it.

mod character_controller;

pub use character_controller::{CharacterController, CharacterControllerConfig, PhysicsMover};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;

/// Collision world containing the static geometry characters move against
pub struct PhysicsWorld {
    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,

    /// Island manager (needed for removals)
    island_manager: IslandManager,
    /// Query pipeline for ray and shape casts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create an empty collision world
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Refresh the query pipeline after colliders were added, moved or removed
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Query pipeline used by shape casts
    pub fn query_pipeline(&self) -> &QueryPipeline {
        &self.query_pipeline
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set
            .remove(handle, &mut self.island_manager, &mut self.rigid_body_set, true);
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Cast a ray and return the first hit with its distance
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, f32)> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_distance,
            true,
            filter,
        )
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
