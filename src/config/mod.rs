//! Configuration file support for vblackboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/vblackboard/config.toml`, and the localized menu/save strings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod strings;
pub mod types;

pub use strings::{AcceleratorTable, MenuLabel, SaveMessages, Strings, StringsError};
pub use types::{
    FontConfig, PenConfig, SaveConfig, SaveFormat, ScreenConfig, SlidesConfig, StringsConfig,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::draw::color::{DEFAULT_INK, palette_index_by_name};
use crate::draw::geometry::MAX_LINE_WIDTH;
use crate::draw::{FontDescriptor, Pen};

/// Errors raised while locating or parsing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not find config directory")]
    NoConfigDir,
    #[error("failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("font family '{0}' is not installed")]
    FontUnavailable(String),
}

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [screen]
/// open_in_window = false
///
/// [pen]
/// default_color = "blue"
/// eraser_size = 5
///
/// [save]
/// directory = "~/Pictures"
/// format = "png"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub screen: ScreenConfig,

    #[serde(default)]
    pub font: FontConfig,

    #[serde(default)]
    pub pen: PenConfig,

    #[serde(default)]
    pub slides: SlidesConfig,

    #[serde(default)]
    pub save: SaveConfig,

    #[serde(default)]
    pub strings: StringsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    fn validate_and_clamp(&mut self) {
        if self.screen.width < 160 {
            log::warn!("Invalid screen width {}, using 160", self.screen.width);
            self.screen.width = 160;
        }
        if self.screen.height < 160 {
            log::warn!("Invalid screen height {}, using 160", self.screen.height);
            self.screen.height = 160;
        }

        if !(6.0..=48.0).contains(&self.font.size) {
            log::warn!(
                "Invalid font size {:.1}, clamping to 6.0-48.0 range",
                self.font.size
            );
            self.font.size = self.font.size.clamp(6.0, 48.0);
        }

        let valid_weight = matches!(
            self.font.weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        );
        if !valid_weight {
            log::warn!(
                "Invalid font weight '{}', falling back to 'bold'",
                self.font.weight
            );
            self.font.weight = "bold".to_string();
        }

        if !(1..=32).contains(&self.pen.eraser_size) {
            log::warn!(
                "Invalid eraser_size {}, clamping to 1-32 range",
                self.pen.eraser_size
            );
            self.pen.eraser_size = self.pen.eraser_size.clamp(1, 32);
        }

        if !(1..=MAX_LINE_WIDTH).contains(&self.pen.default_width) {
            log::warn!(
                "Invalid default_width {}, clamping to 1-{} range",
                self.pen.default_width,
                MAX_LINE_WIDTH
            );
            self.pen.default_width = self.pen.default_width.clamp(1, MAX_LINE_WIDTH);
        }

        if palette_index_by_name(&self.pen.default_color).is_none() {
            log::warn!(
                "Unknown color '{}', falling back to 'black'",
                self.pen.default_color
            );
            self.pen.default_color = "black".to_string();
        }
    }

    /// Returns the directory holding the configuration and strings files.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        Ok(dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("vblackboard"))
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/vblackboard/config.toml`.
    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `path`, or returns defaults if it does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config = toml::from_str(&config_str).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Initial pen built from the `[pen]` section.
    pub fn initial_pen(&self) -> Pen {
        let ink = palette_index_by_name(&self.pen.default_color).unwrap_or(DEFAULT_INK);
        Pen::new(self.pen.default_width, ink, self.pen.eraser_size)
    }

    pub fn font_descriptor(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.font.family.clone(),
            self.font.weight.clone(),
            self.font.size,
        )
    }

    /// Directory saved blackboards go to, with `~` expanded.
    pub fn save_directory(&self) -> PathBuf {
        crate::util::expand_tilde(&self.save.directory)
    }

    /// Loads the localized strings: the configured file if any, then
    /// `strings.toml` next to the config file, then the built-in defaults.
    pub fn load_strings(&self) -> Result<Strings, StringsError> {
        if let Some(file) = &self.strings.file {
            let path = crate::util::expand_tilde(&file.to_string_lossy());
            return Strings::load_from(&path);
        }
        if let Ok(dir) = Self::config_dir() {
            let candidate = dir.join("strings.toml");
            if candidate.exists() {
                return Strings::load_from(&candidate);
            }
        }
        debug!("Using built-in strings");
        Ok(Strings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::PenMode;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.screen.open_in_window);
        assert_eq!((config.screen.width, config.screen.height), (1024, 576));
        assert_eq!(config.save.format, SaveFormat::Pnm);
    }

    #[test]
    fn values_out_of_range_are_clamped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[screen]
width = 20

[pen]
eraser_size = 100
default_width = 0
default_color = "mauve"

[font]
size = 200.0
weight = "wobbly"

[save]
format = "png"
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.screen.width, 160);
        assert_eq!(config.screen.height, 576);
        assert_eq!(config.pen.eraser_size, 32);
        assert_eq!(config.pen.default_width, 1);
        assert_eq!(config.pen.default_color, "black");
        assert_eq!(config.font.size, 48.0);
        assert_eq!(config.font.weight, "bold");
        assert_eq!(config.save.format, SaveFormat::Png);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[screen\nwidth = ").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn initial_pen_uses_pen_section() {
        let mut config = Config::default();
        config.pen.default_color = "Orange".to_string();
        config.pen.default_width = 5;
        let pen = config.initial_pen();
        assert_eq!(pen.ink, 7);
        assert_eq!(pen.stroke_width, 5);
        assert_eq!(pen.eraser_size, 3);
        assert_eq!(pen.mode, PenMode::Drawing);
        assert!(!pen.tracing);
    }

    #[test]
    fn configured_strings_file_must_exist() {
        let mut config = Config::default();
        config.strings.file = Some(PathBuf::from("/nonexistent/vblackboard/strings.toml"));
        assert!(matches!(
            config.load_strings(),
            Err(StringsError::Read { .. })
        ));
    }
}
