//! Collision-aware mover capability

use glam::Vec3;

/// Something that can displace a character subject to collision.
///
/// Implementations resolve collisions however they like; the reported
/// grounded state is authoritative and is what locomotion reads at the start
/// of the next frame.
pub trait Mover {
    /// Move by `displacement`, returning whether the character is grounded afterwards
    fn move_by(&mut self, displacement: Vec3) -> bool;

    /// Grounded state reported by the most recent move
    fn is_grounded(&self) -> bool;
}
