//! Configuration and settings management for the stage editor
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats; the default location is a platform-specific config
//! directory.

use crate::error::{SettingsError, SettingsResult};
use rangekit_core::constants::{
    DEFAULT_DIAGRAM_HEIGHT, DEFAULT_DIAGRAM_WIDTH, DEFAULT_GRID_SIZE, DEFAULT_HANDLE_RADIUS,
    DEFAULT_HISTORY_LIMIT, DEFAULT_HIT_TOLERANCE, DEFAULT_UNITS_PER_MEASURE,
};
use rangekit_core::units::MeasurementSystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stage editor preferences
///
/// Seeds the transient editor state (grid, snapping, ruler) and the
/// defaults used when a fresh diagram is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Grid spacing in diagram units
    pub grid_size: f64,
    /// Draw the grid on startup
    pub show_grid: bool,
    /// Snap placed and dragged points to the grid
    pub snap_to_grid: bool,
    /// Show the ruler on startup
    pub show_ruler: bool,
    /// Pointer slop for hit testing, in diagram units
    pub hit_tolerance: f64,
    /// Radius of control-point handles
    pub handle_radius: f64,
    /// Width of a new diagram
    pub default_width: f64,
    /// Height of a new diagram
    pub default_height: f64,
    /// Maximum number of undo steps
    pub history_limit: usize,
    /// Unit system for measurement labels
    pub measurement_system: MeasurementSystem,
    /// Diagram units per foot or metre
    pub units_per_measure: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            show_grid: true,
            snap_to_grid: true,
            show_ruler: false,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            handle_radius: DEFAULT_HANDLE_RADIUS,
            default_width: DEFAULT_DIAGRAM_WIDTH,
            default_height: DEFAULT_DIAGRAM_HEIGHT,
            history_limit: DEFAULT_HISTORY_LIMIT,
            measurement_system: MeasurementSystem::default(),
            units_per_measure: DEFAULT_UNITS_PER_MEASURE,
        }
    }
}

enum ConfigFormat {
    Json,
    Toml,
}

fn format_for(path: &Path) -> SettingsResult<ConfigFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl EditorSettings {
    /// Default settings file location (`<config dir>/rangekit/settings.toml`).
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rangekit").join("settings.toml"))
    }

    /// Load settings from a JSON or TOML file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let settings: Self = match format_for(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        tracing::info!(path = %path.display(), "Loaded editor settings");
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_for(path)? {
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

        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        fn positive(key: &str, value: f64) -> SettingsResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::invalid(key, format!("must be positive, got {}", value)))
            }
        }

        positive("grid_size", self.grid_size)?;
        positive("handle_radius", self.handle_radius)?;
        positive("default_width", self.default_width)?;
        positive("default_height", self.default_height)?;
        positive("units_per_measure", self.units_per_measure)?;

        if !self.hit_tolerance.is_finite() || self.hit_tolerance < 0.0 {
            return Err(SettingsError::invalid(
                "hit_tolerance",
                format!("must be zero or positive, got {}", self.hit_tolerance),
            ));
        }

        if self.history_limit == 0 {
            return Err(SettingsError::invalid("history_limit", "must be at least 1"));
        }

        Ok(())
    }
}
