//! Game settings
//!
//! Uses RON (Rusty Object Notation) for a human-readable settings file.
//! Every field has a default, so the file may list only what it overrides.
//! A missing file is not an error: the defaults are used.

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};

/// Default settings file, looked up in the working directory
pub const SETTINGS_PATH: &str = "settings.ron";

/// Error type for settings loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    /// A value that parses but cannot be used
    Invalid { field: &'static str, value: f32 },
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::Invalid { field, value } => {
                write!(f, "Invalid value for {}: {} (must be positive)", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Window creation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: i32,
    pub height: i32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Red Veil".to_string(),
            width: 1600,
            height: 900,
        }
    }
}

/// Physics and gameplay tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Downward acceleration for dynamic objects (units/s²)
    pub gravity: f32,
    /// Vertical velocity set on jump (negative is up)
    pub jump_impulse: f32,
    /// Horizontal acceleration/deceleration of the player (units/s²)
    pub player_acceleration: f32,
    /// Horizontal speed cap of the player (units/s)
    pub player_max_speed: f32,
    /// Horizontal bullet speed (units/s)
    pub bullet_speed: f32,
    /// Seconds before a held fire key shoots again
    pub weapon_cooldown: f32,
    /// Upper bound on a single simulation step (seconds)
    pub max_frame_time: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: 500.0,
            jump_impulse: -200.0,
            player_acceleration: 300.0,
            player_max_speed: 100.0,
            bullet_speed: 200.0,
            weapon_cooldown: 0.5,
            max_frame_time: 0.05,
        }
    }
}

impl PhysicsSettings {
    /// Clamp a wall-clock frame time to a safe simulation step
    pub fn clamp_delta(&self, delta_time: f32) -> f32 {
        // Total for any bound; f32::clamp panics when max < min
        delta_time.min(self.max_frame_time).max(0.0)
    }
}

/// All settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub physics: PhysicsSettings,
    /// How far outside the camera view a bullet may travel before removal
    pub bullet_despawn_margin: f32,
    /// Show the player state overlay at startup
    pub show_debug_overlay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            physics: PhysicsSettings::default(),
            bullet_despawn_margin: 64.0,
            show_debug_overlay: false,
        }
    }
}

impl Settings {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;
        let positive = [
            ("physics.gravity", physics.gravity),
            ("physics.player_acceleration", physics.player_acceleration),
            ("physics.player_max_speed", physics.player_max_speed),
            ("physics.bullet_speed", physics.bullet_speed),
            ("physics.weapon_cooldown", physics.weapon_cooldown),
            ("physics.max_frame_time", physics.max_frame_time),
            ("bullet_despawn_margin", self.bullet_despawn_margin),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        // Negative is up
        if !physics.jump_impulse.is_finite() || physics.jump_impulse >= 0.0 {
            return Err(ConfigError::Invalid {
                field: "physics.jump_impulse",
                value: physics.jump_impulse,
            });
        }
        Ok(())
    }
}

/// Parse and validate settings from a RON string
pub fn parse_settings(source: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = ron::from_str(source)?;
    settings.validate()?;
    Ok(settings)
}

/// Load settings from a file. Returns defaults if the file does not exist.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let contents = fs::read_to_string(path)?;
    parse_settings(&contents)
}
