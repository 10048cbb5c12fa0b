//! Application Configuration Module
//! Optional JSON settings for the window and PNG export.

use crate::exercises::ExerciseId;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Settings file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "minima_explorer.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("initial_exercise must be between 1 and 5, got {0}")]
    InvalidExercise(u8),
    #[error("Window size must be positive and finite, got {0}x{1}")]
    InvalidWindowSize(f32, f32),
    #[error("Export size must be non-zero, got {0}x{1}")]
    InvalidExportSize(u32, u32),
}

/// User-tunable settings; every field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Exercise shown at startup (1-5)
    pub initial_exercise: u8,
    pub export_width: u32,
    pub export_height: u32,
    /// Open exported PNGs with the system viewer
    pub open_after_export: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1200.0,
            window_height: 800.0,
            initial_exercise: 1,
            export_width: 1200,
            export_height: 900,
            open_after_export: false,
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` if it exists, falling back to defaults on any problem.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded configuration");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring invalid configuration");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ExerciseId::try_from(self.initial_exercise)
            .map_err(|_| ConfigError::InvalidExercise(self.initial_exercise))?;
        let usable = |side: f32| side.is_finite() && side > 0.0;
        if !usable(self.window_width) || !usable(self.window_height) {
            return Err(ConfigError::InvalidWindowSize(
                self.window_width,
                self.window_height,
            ));
        }
        if self.export_width == 0 || self.export_height == 0 {
            return Err(ConfigError::InvalidExportSize(
                self.export_width,
                self.export_height,
            ));
        }
        Ok(())
    }

    /// Startup exercise; validated configs always resolve.
    pub fn initial_exercise(&self) -> ExerciseId {
        ExerciseId::try_from(self.initial_exercise).unwrap_or(ExerciseId::One)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config =
            AppConfig::from_json(r#"{ "initial_exercise": 4, "open_after_export": true }"#).unwrap();
        assert_eq!(config.initial_exercise(), ExerciseId::Four);
        assert!(config.open_after_export);
        assert_eq!(config.export_width, 1200);
    }

    #[test]
    fn out_of_range_exercise_is_rejected() {
        assert!(matches!(
            AppConfig::from_json(r#"{ "initial_exercise": 9 }"#),
            Err(ConfigError::InvalidExercise(9))
        ));
    }

    #[test]
    fn zero_export_size_is_rejected() {
        assert!(matches!(
            AppConfig::from_json(r#"{ "export_height": 0 }"#),
            Err(ConfigError::InvalidExportSize(1200, 0))
        ));
    }

    #[test]
    fn non_positive_window_size_is_rejected() {
        assert!(matches!(
            AppConfig::from_json(r#"{ "window_width": -300.0 }"#),
            Err(ConfigError::InvalidWindowSize(w, h)) if w == -300.0 && h == 800.0
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{ "window_height": 0 }"#),
            Err(ConfigError::InvalidWindowSize(_, h)) if h == 0.0
        ));
    }

    #[test]
    fn non_finite_window_size_is_rejected() {
        let config = AppConfig {
            window_width: f32::NAN,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWindowSize(w, _)) if w.is_nan()
        ));
        let config = AppConfig {
            window_height: f32::INFINITY,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_json("{ initial_exercise"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_or_default(Path::new("does/not/exist/minima_explorer.json"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "minima_explorer_invalid_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "initial_exercise": 0 }"#).unwrap();
        let config = AppConfig::load_or_default(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
