//! Conversion settings.
//!
//! Configuration is organized into sections:
//! - Conversion (curve flattening scale, simplification tolerance)
//! - Text (font size, font file)
//! - Optimizer (rounding and segment clean-up of SVG input)
//!
//! Files are JSON or TOML, chosen by extension.

use crate::error::{ConfigError, ConfigResult, SettingsResult};
use plotkit_svg::{ConverterOptions, OptimizerSettings, TextOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory name under the platform config directory.
pub const APP_DIR: &str = "plotkit";

/// Default config file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Curve and simplification settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Flattening scale for SVG curves; the deviation bound is `1 / curve_scale`.
    pub curve_scale: f64,
    /// Douglas-Peucker tolerance for each pen-down run.
    pub simplify_tolerance: f64,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            curve_scale: 2.0,
            simplify_tolerance: 0.0,
        }
    }
}

/// Text rendering defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    pub font_size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_file: Option<PathBuf>,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            font_file: None,
        }
    }
}

/// Complete PlotKit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub conversion: ConversionSettings,
    pub text: TextSettings,
    pub optimizer: OptimizerSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<platform config dir>/plotkit/config.toml`.
    pub fn default_path() -> ConfigResult<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform("no configuration directory".to_string())
        })?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, else the default file when it exists, else
    /// the defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Ok(default) if default.exists() => Self::load_from_file(&default),
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let conversion = &self.conversion;
        if !(conversion.curve_scale.is_finite() && conversion.curve_scale > 0.0) {
            return Err(ConfigError::out_of_range(
                "conversion.curve_scale",
                conversion.curve_scale,
            ));
        }
        if !(conversion.simplify_tolerance.is_finite() && conversion.simplify_tolerance >= 0.0) {
            return Err(ConfigError::out_of_range(
                "conversion.simplify_tolerance",
                conversion.simplify_tolerance,
            ));
        }

        if !(self.text.font_size.is_finite() && self.text.font_size > 0.0) {
            return Err(ConfigError::out_of_range("text.font_size", self.text.font_size));
        }

        if let Some(precision) = self.optimizer.float_precision {
            if precision > plotkit_svg::shapes::MAX_FLOAT_PRECISION {
                return Err(ConfigError::out_of_range(
                    "optimizer.float_precision",
                    precision,
                ));
            }
        }

        Ok(())
    }

    /// Options for [`plotkit_svg::ArtworkConverter`].
    pub fn converter_options(&self) -> ConverterOptions {
        ConverterOptions {
            simplify_tolerance: self.conversion.simplify_tolerance,
            optimizer: self.optimizer,
        }
    }

    /// Options for [`plotkit_svg::ArtworkConverter::from_text`].
    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            font_size: self.text.font_size,
            font_file: self.text.font_file.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
