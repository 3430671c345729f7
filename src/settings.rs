//! Runtime settings for the native runner
//!
//! Loaded from an optional JSON file; every field has a default, so an empty
//! object (or no file at all) is a valid configuration.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_SCREEN_HEIGHT, MIN_SCREEN_WIDTH};
use crate::error::ConfigError;
use crate::sim::Viewport;

/// Ten minutes at 60 frames per second
pub const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 10;
pub const DEFAULT_LOG_INTERVAL: u64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub viewport: Viewport,
    /// Fixed run seed. Absent means derive one from the clock.
    pub seed: Option<u64>,
    /// Let the idle AI play
    pub autopilot: bool,
    /// Stop the headless run after this many frames
    pub max_frames: u64,
    /// Frames between trace-level state snapshots (0 disables them)
    pub log_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            seed: None,
            autopilot: true,
            max_frames: DEFAULT_MAX_FRAMES,
            log_interval: DEFAULT_LOG_INTERVAL,
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// The level layout needs room for the platform height band
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Viewport { width, height } = self.viewport;
        if !width.is_finite() || !height.is_finite() {
            return Err(ConfigError::Invalid("viewport must be finite".into()));
        }
        if width < MIN_SCREEN_WIDTH || height < MIN_SCREEN_HEIGHT {
            return Err(ConfigError::Invalid(format!(
                "viewport {}x{} is smaller than {}x{}",
                width, height, MIN_SCREEN_WIDTH, MIN_SCREEN_HEIGHT
            )));
        }
        if self.max_frames == 0 {
            return Err(ConfigError::Invalid("max_frames must be positive".into()));
        }
        Ok(())
    }

    /// Configured seed, or one taken from the clock
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.autopilot);
        assert_eq!(settings.viewport, Viewport::default());
    }

    #[test]
    fn test_partial_override() {
        let settings =
            Settings::from_json(r#"{"seed": 42, "viewport": {"width": 1024, "height": 768}}"#)
                .unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.effective_seed(), 42);
        assert_eq!(settings.viewport.width, 1024.0);
        assert_eq!(settings.max_frames, DEFAULT_MAX_FRAMES);
    }

    #[test]
    fn test_rejects_tiny_viewport() {
        let err = Settings::from_json(r#"{"viewport": {"width": 100, "height": 600}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
