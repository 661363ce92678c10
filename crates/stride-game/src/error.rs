/// Errors raised while assembling locomotion from its configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("move speed must be finite and non-negative, got {0}")]
    InvalidMoveSpeed(f32),

    #[error("rotation speed must be finite and non-negative, got {0}")]
    InvalidRotationSpeed(f32),

    #[error("gravity must be finite and pull downward (<= 0), got {0}")]
    InvalidGravity(f32),

    #[error("capsule needs radius > 0 and height > 2 * radius, got {height} x {radius}")]
    InvalidCapsule { height: f32, radius: f32 },

    #[error("character {field} must be finite and non-negative, got {value}")]
    InvalidCharacterSetting { field: &'static str, value: f32 },

    #[error("no camera bound; locomotion needs a camera to orient movement")]
    MissingCamera,
}
