//! Configuration and settings management for LayerKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Machine settings (build plate dimensions)
//! - Reader settings (nominal line widths, extruder colors)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use layerkit_core::{BuildPlate, Rgba};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the configuration file inside the config directory
const CONFIG_FILE_NAME: &str = "config.toml";

/// Name of the application config directory
const APP_DIR_NAME: &str = "layerkit";

/// Machine preference settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSettings {
    /// Build plate width along X in mm
    pub build_plate_width: f64,
    /// Build plate depth along Y in mm
    pub build_plate_depth: f64,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            build_plate_width: 200.0,
            build_plate_depth: 200.0,
        }
    }
}

impl BuildPlate for MachineSettings {
    fn build_plate_size(&self) -> (f64, f64) {
        (self.build_plate_width, self.build_plate_depth)
    }
}

/// G-code reader settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderSettings {
    /// Nominal width of extruded lines in mm
    pub extrusion_width: f32,
    /// Width used to draw travel and retraction moves in mm
    pub travel_width: f32,
    /// Nominal thickness of every line in mm
    pub layer_thickness: f32,
    /// Color per extruder index
    pub extruder_colors: Vec<Rgba>,
}

impl ReaderSettings {
    /// Number of entries in the default color table
    pub const DEFAULT_COLOR_SLOTS: usize = 10;

    /// Default extruder color table: two configured entries, the rest zeroed
    pub fn default_colors() -> Vec<Rgba> {
        let mut colors = vec![[0.0; 4]; Self::DEFAULT_COLOR_SLOTS];
        colors[0] = [0.0, 0.7, 0.9, 1.0];
        colors[1] = [0.7, 0.9, 0.0, 1.0];
        colors
    }
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            extrusion_width: 0.4,
            travel_width: 0.2,
            layer_thickness: 0.2,
            extruder_colors: Self::default_colors(),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Machine preferences
    #[serde(default)]
    pub machine: MachineSettings,
    /// Reader preferences
    #[serde(default)]
    pub reader: ReaderSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform-specific location of the config file
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        debug!("Saved config to {}", path.display());

        Ok(())
    }

    /// Validate all sections
    pub fn validate(&self) -> SettingsResult<()> {
        require_positive("machine.build_plate_width", self.machine.build_plate_width)?;
        require_positive("machine.build_plate_depth", self.machine.build_plate_depth)?;
        require_positive("reader.extrusion_width", f64::from(self.reader.extrusion_width))?;
        require_positive("reader.travel_width", f64::from(self.reader.travel_width))?;
        require_positive("reader.layer_thickness", f64::from(self.reader.layer_thickness))?;

        if self.reader.extruder_colors.is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "reader.extruder_colors".to_string(),
                reason: "at least one color is required".to_string(),
            });
        }

        Ok(())
    }
}

fn require_positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::InvalidSetting {
            key: key.to_string(),
            reason: format!("must be positive, got {}", value),
        })
    }
}

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.machine.build_plate_size(), (200.0, 200.0));
        assert_eq!(config.reader.extruder_colors.len(), 10);
        assert_eq!(config.reader.extruder_colors[0], [0.0, 0.7, 0.9, 1.0]);
        assert_eq!(config.reader.extruder_colors[2], [0.0; 4]);
    }

    #[test]
    fn test_validate_rejects_non_positive_plate() {
        let mut config = Config::new();
        config.machine.build_plate_depth = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("machine.build_plate_depth"));
    }

    #[test]
    fn test_validate_rejects_empty_colors() {
        let mut config = Config::new();
        config.reader.extruder_colors.clear();
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = ConfigFormat::from_path(Path::new("settings.yaml")).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(ref ext)) if ext == "yaml"
        ));
    }
}
