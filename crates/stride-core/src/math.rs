//! Angular helpers for yaw-only character facing

use glam::Quat;

/// Build a rotation of `degrees` around the vertical (Y) axis
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_y(degrees.to_radians())
}

/// Rotate `from` toward `to` by at most `max_degrees`.
///
/// Advances by exactly `min(remaining, max_degrees)` and never overshoots.
/// A negative step is treated as zero.
pub fn rotate_towards(from: Quat, to: Quat, max_degrees: f32) -> Quat {
    let remaining = from.angle_between(to).to_degrees();
    if remaining <= f32::EPSILON {
        return to;
    }

    let step = max_degrees.max(0.0);
    if step == 0.0 {
        return from;
    }
    if step >= remaining {
        return to;
    }

    from.slerp(to, step / remaining)
}
