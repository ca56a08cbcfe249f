//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Window width in logical pixels
    pub width: f64,
    /// Window height in logical pixels
    pub height: f64,
    pub fullscreen: bool,
    pub resizable: bool,
    /// Whether the window has a title bar and borders
    pub decorated: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Moving Box".to_string(),
            width: 800.0,
            height: 600.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
            vsync: true,
        }
    }
}

/// Box tuning, in logical pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovingBoxConfig {
    /// Half of the box edge length at startup
    pub initial_half_size: f32,
    pub min_half_size: f32,
    pub max_half_size: f32,
    /// Half-size change per click or scroll notch
    pub resize_step: f32,
    /// Distance moved per fixed step while an arrow key is held
    pub speed: f32,
    /// Fixed movement steps per second
    pub tick_rate: f32,
}

impl Default for MovingBoxConfig {
    fn default() -> Self {
        Self {
            initial_half_size: 25.0,
            min_half_size: 5.0,
            max_half_size: 100.0,
            resize_step: 5.0,
            speed: 5.0,
            tick_rate: 60.0,
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives, used when RUST_LOG is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub moving_box: MovingBoxConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// A configuration that loaded but cannot run the game
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("window size must be positive, got {width}x{height}")]
    WindowSize { width: f64, height: f64 },

    #[error("min_half_size ({min}) must be positive and not exceed max_half_size ({max})")]
    SizeLimits { min: f32, max: f32 },

    #[error("initial_half_size ({initial}) must lie within [{min}, {max}]")]
    InitialSize { initial: f32, min: f32, max: f32 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. config/{profile}.toml
    /// 2. Environment variables with prefix APP_ (e.g., APP_MOVING_BOX__SPEED=8)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config_dir = Self::find_config_dir().unwrap_or_else(|| PathBuf::from("config"));
        Self::load_from(&config_dir, profile)
    }

    /// Loads a profile from an explicit config directory
    pub fn load_from(config_dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let profile_path = config_dir.join(profile);

        let config = Config::builder()
            .add_source(File::from(profile_path.as_path()).required(false))
            // Use __ as separator for nested fields (e.g., APP_WINDOW__WIDTH)
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Built-in settings for a profile, ignoring files and environment
    pub fn with_defaults(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            window: WindowConfig::default(),
            moving_box: MovingBoxConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Checks that the loaded values describe a playable game
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let window = &self.window;
        if window.width <= 0.0 || window.height <= 0.0 {
            return Err(ConfigValidationError::WindowSize {
                width: window.width,
                height: window.height,
            });
        }

        let b = &self.moving_box;
        if b.min_half_size <= 0.0 || b.min_half_size > b.max_half_size {
            return Err(ConfigValidationError::SizeLimits {
                min: b.min_half_size,
                max: b.max_half_size,
            });
        }
        if !(b.min_half_size..=b.max_half_size).contains(&b.initial_half_size) {
            return Err(ConfigValidationError::InitialSize {
                initial: b.initial_half_size,
                min: b.min_half_size,
                max: b.max_half_size,
            });
        }

        for (field, value) in [
            ("resize_step", b.resize_step),
            ("speed", b.speed),
            ("tick_rate", b.tick_rate),
        ] {
            if value <= 0.0 {
                return Err(ConfigValidationError::NotPositive { field, value });
            }
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self::with_defaults("release"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn defaults() -> AppConfig {
        AppConfig::with_defaults("test")
    }

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(defaults().validate(), Ok(()));
    }

    #[test]
    fn test_load_profile_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("custom.toml"),
            r#"
            [window]
            title = "Custom"
            width = 1024.0

            [moving_box]
            speed = 8.0
            "#,
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path(), "custom").unwrap();
        assert_eq!(config.profile, "custom");
        assert_eq!(config.window.title, "Custom");
        assert_eq!(config.window.width, 1024.0);
        // Unset fields fall back to defaults
        assert_eq!(config.window.height, 600.0);
        assert_eq!(config.moving_box.speed, 8.0);
        assert_eq!(config.moving_box.max_half_size, 100.0);
    }

    #[test]
    fn test_missing_profile_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path(), "nowhere").unwrap();
        assert_eq!(config.profile, "nowhere");
        assert_eq!(config.moving_box, MovingBoxConfig::default());
    }

    #[test]
    fn test_shipped_profiles_are_valid() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
        for profile in ["debug", "release"] {
            let config = AppConfig::load_from(&dir, profile).unwrap();
            assert_eq!(config.validate(), Ok(()), "profile {profile}");
        }
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let mut config = defaults();
        config.moving_box.min_half_size = 50.0;
        config.moving_box.max_half_size = 10.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::SizeLimits { .. })
        ));

        let mut config = defaults();
        config.moving_box.initial_half_size = 200.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InitialSize { .. })
        ));

        let mut config = defaults();
        config.moving_box.tick_rate = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::NotPositive {
                field: "tick_rate",
                value: 0.0
            })
        );

        let mut config = defaults();
        config.window.height = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::WindowSize { .. })
        ));
    }
}
