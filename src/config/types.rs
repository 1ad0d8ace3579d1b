//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Screen/window settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenConfig {
    /// Open as a window of `width × height` instead of covering the output
    #[serde(default = "default_open_in_window")]
    pub open_in_window: bool,

    /// Window width in pixels (minimum 160)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Window height in pixels (minimum 160)
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            open_in_window: default_open_in_window(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Font used for the menu strip and dialogs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FontConfig {
    /// Font family name (e.g., "Sans", "Monospace", "DejaVu Sans")
    #[serde(default = "default_font_family")]
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light")
    #[serde(default = "default_font_weight")]
    pub weight: String,

    /// Point size (valid range: 6.0 - 48.0)
    #[serde(default = "default_font_size")]
    pub size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: default_font_family(),
            weight: default_font_weight(),
            size: default_font_size(),
        }
    }
}

/// Initial pen characteristics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PenConfig {
    /// Eraser half-size; the eraser square is twice this (valid range: 1 - 32)
    #[serde(default = "default_eraser_size")]
    pub eraser_size: u32,

    /// Initial stroke width (valid range: 1 - 8)
    #[serde(default = "default_stroke_width")]
    pub default_width: u32,

    /// Initial ink: red, green, blue, black, white, paleblue, yellow, orange
    #[serde(default = "default_color")]
    pub default_color: String,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            eraser_size: default_eraser_size(),
            default_width: default_stroke_width(),
            default_color: default_color(),
        }
    }
}

/// Slide presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SlidesConfig {
    /// Image shown over the whole screen until the first key or click
    #[serde(default)]
    pub splash: Option<PathBuf>,
}

/// Output format for saved blackboards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SaveFormat {
    /// Binary portable pixmap (P6)
    #[default]
    Pnm,
    Png,
}

/// Where and how blackboards are saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveConfig {
    /// Directory for `saved_NN` files (supports ~ for home directory)
    #[serde(default = "default_save_directory")]
    pub directory: String,

    #[serde(default)]
    pub format: SaveFormat,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            directory: default_save_directory(),
            format: SaveFormat::default(),
        }
    }
}

/// Localization settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StringsConfig {
    /// Menu/save strings file; built-in English strings when absent
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_open_in_window() -> bool {
    true
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    576
}

fn default_font_family() -> String {
    "Monospace".to_string()
}

fn default_font_weight() -> String {
    "bold".to_string()
}

fn default_font_size() -> f64 {
    12.0
}

fn default_eraser_size() -> u32 {
    3
}

fn default_stroke_width() -> u32 {
    2
}

fn default_color() -> String {
    "black".to_string()
}

fn default_save_directory() -> String {
    ".".to_string()
}
