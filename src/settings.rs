//! Simulation settings with persistence
//!
//! Settings are read from `~/.config/stride/settings.toml` unless a path is given.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stride_core::TimeConfig;
use stride_game::MovementConfig;
use stride_physics::CharacterControllerConfig;
use tracing::{info, warn};

/// All settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub movement: MovementConfig,
    pub character: CharacterControllerConfig,
    pub simulation: SimulationSettings,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stride"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from a specific file, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&dir.join("settings.toml"))
    }

    /// Save settings to a specific file, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Headless run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of frames to simulate
    pub frames: u32,
    /// Raw seconds fed to the clock each frame
    pub timestep: f32,
    /// Time scale multiplier
    pub time_scale: f32,
    /// Largest delta a single frame may see
    pub max_delta_time: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frames: 600,
            timestep: 1.0 / 60.0,
            time_scale: 1.0,
            max_delta_time: 0.25,
        }
    }
}

impl SimulationSettings {
    /// Clock configuration for these settings
    pub fn time_config(&self) -> TimeConfig {
        TimeConfig {
            time_scale: self.time_scale,
            max_delta_time: self.max_delta_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: GameSettings = toml::from_str(
            r#"
            [movement]
            move_speed = 7.5

            [simulation]
            frames = 120
            "#,
        )
        .unwrap();

        assert_eq!(settings.movement.move_speed, 7.5);
        assert_eq!(settings.movement.rotation_speed, 500.0);
        assert_eq!(settings.movement.gravity, -20.0);
        assert_eq!(settings.character.height, 1.8);
        assert_eq!(settings.simulation.frames, 120);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("stride-settings-{}", std::process::id()));
        let path = dir.join("settings.toml");

        let mut settings = GameSettings::default();
        settings.movement.gravity = -9.81;
        settings.simulation.frames = 42;
        settings.save_to(&path).unwrap();

        let loaded = GameSettings::load_from(&path);
        assert_eq!(loaded.movement, settings.movement);
        assert_eq!(loaded.simulation.frames, 42);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_or_broken_file_uses_defaults() {
        let missing = GameSettings::load_from(Path::new("/nonexistent/stride/settings.toml"));
        assert_eq!(missing.movement, MovementConfig::default());

        let dir = std::env::temp_dir().join(format!("stride-broken-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        fs::write(&path, "movement = [not toml").unwrap();

        let broken = GameSettings::load_from(&path);
        assert_eq!(broken.movement, MovementConfig::default());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_time_config_mapping() {
        let simulation = SimulationSettings {
            time_scale: 0.5,
            max_delta_time: 0.1,
            ..Default::default()
        };
        let config = simulation.time_config();
        assert_eq!(config.time_scale, 0.5);
        assert_eq!(config.max_delta_time, 0.1);
    }
}
