//! Rock surface presets
//!
//! A preset holds a value for each public property of the filter. Presets
//! are stored as TOML (the default) or JSON, chosen by file extension.
//! Missing fields fall back to the filter's defaults.

use crate::error::{Result, RockSurfaceError};
use crate::graph::value::ParamValue;
use crate::rock_surface::properties;
use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk format of a preset file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetFormat {
    Toml,
    Json,
}

impl PresetFormat {
    /// Pick the format from a path's extension; anything but `.json` is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PresetFormat::Json,
            _ => PresetFormat::Toml,
        }
    }
}

/// Values of every public property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RockSurfaceConfig {
    /// Noise scale
    pub scale: f64,
    /// Noise seed; drawn at random when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    /// Light angle in degrees
    pub azimuth: f64,
    /// Light elevation in degrees
    pub elevation: f64,
    /// Emboss depth
    pub depth: i64,
    /// Paint color
    pub value: Color,
    /// Enable the Mantiuk06 tone map
    pub switchm6: bool,
    /// Tone map layer opacity
    pub tonemap: f64,
    /// Soft light difference of gaussians opacity
    pub sldog: f64,
}

impl Default for RockSurfaceConfig {
    fn default() -> Self {
        Self {
            scale: 0.122,
            seed: None,
            azimuth: 35.0,
            elevation: 30.0,
            depth: 6,
            value: Color::ROCK_TAN,
            switchm6: true,
            tonemap: 0.3,
            sldog: 0.5,
        }
    }
}

impl RockSurfaceConfig {
    /// Property values in declaration order. The seed is omitted when unset.
    pub fn values(&self) -> Vec<(&'static str, ParamValue)> {
        let mut values = vec![(properties::SCALE, ParamValue::Double(self.scale))];
        if let Some(seed) = self.seed {
            values.push((properties::SEED, ParamValue::Int(seed)));
        }
        values.extend([
            (properties::AZIMUTH, ParamValue::Double(self.azimuth)),
            (properties::ELEVATION, ParamValue::Double(self.elevation)),
            (properties::DEPTH, ParamValue::Int(self.depth)),
            (properties::VALUE, ParamValue::Color(self.value)),
            (properties::SWITCH_M6, ParamValue::Bool(self.switchm6)),
            (properties::TONEMAP, ParamValue::Double(self.tonemap)),
            (properties::SLDOG, ParamValue::Double(self.sldog)),
        ]);
        values
    }

    /// Parse a TOML preset
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| RockSurfaceError::Config(format!("Failed to parse TOML preset: {}", e)))
    }

    /// Parse a JSON preset
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| RockSurfaceError::Config(format!("Failed to parse JSON preset: {}", e)))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RockSurfaceError::Serialization(format!("Failed to serialize preset: {}", e)))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RockSurfaceError::Serialization(format!("Failed to serialize preset: {}", e)))
    }

    /// Load a preset file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RockSurfaceError::Config(format!("Failed to read preset {:?}: {}", path, e))
        })?;

        let config = match PresetFormat::from_path(path) {
            PresetFormat::Toml => Self::from_toml_str(&content),
            PresetFormat::Json => Self::from_json_str(&content),
        }
        .map_err(|e| e.with_context(format!("{:?}", path)))?;

        tracing::info!("Loaded preset from {:?}", path);
        Ok(config)
    }

    /// Load a preset file, returning defaults if any error occurs
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Using default preset: {}", e);
            Self::default()
        })
    }

    /// Save a preset file to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                RockSurfaceError::Config(format!("Failed to create preset directory: {}", e))
            })?;
        }

        let content = match PresetFormat::from_path(path) {
            PresetFormat::Toml => self.to_toml_string()?,
            PresetFormat::Json => self.to_json_string()?,
        };

        std::fs::write(path, content).map_err(|e| {
            RockSurfaceError::Config(format!("Failed to write preset {:?}: {}", path, e))
        })
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_property_table() {
        let config = RockSurfaceConfig::default();
        for (name, value) in config.values() {
            let spec = properties::spec(name).unwrap();
            assert_eq!(spec.default, value, "{}", name);
        }
    }

    #[test]
    fn test_values_skip_unset_seed() {
        let mut config = RockSurfaceConfig::default();
        assert!(config.values().iter().all(|(n, _)| *n != properties::SEED));

        config.seed = Some(42);
        assert!(config
            .values()
            .contains(&(properties::SEED, ParamValue::Int(42))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = RockSurfaceConfig::from_toml_str("depth = 12\nvalue = \"#102030\"\n").unwrap();
        assert_eq!(config.depth, 12);
        assert_eq!(config.value, Color::rgb(0x10, 0x20, 0x30));
        assert!(config.switchm6);
        assert_eq!(config.scale, 0.122);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_bad_color_is_config_error() {
        let err = RockSurfaceConfig::from_toml_str("value = \"tan\"").unwrap_err();
        assert!(matches!(err, RockSurfaceError::Config(_)));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(PresetFormat::from_path(Path::new("a.json")), PresetFormat::Json);
        assert_eq!(PresetFormat::from_path(Path::new("a.JSON")), PresetFormat::Json);
        assert_eq!(PresetFormat::from_path(Path::new("a.toml")), PresetFormat::Toml);
        assert_eq!(PresetFormat::from_path(Path::new("preset")), PresetFormat::Toml);
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rock.toml");

        let config = RockSurfaceConfig {
            seed: Some(7),
            switchm6: false,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = RockSurfaceConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            RockSurfaceConfig::load(&path),
            Err(RockSurfaceError::Config(_))
        ));
        assert_eq!(
            RockSurfaceConfig::load_or_default(&path),
            RockSurfaceConfig::default()
        );
    }
}
