//! Eight-bit RGB color type and the fixed ink palette.

/// Represents an opaque color with 8-bit components.
///
/// # Examples
///
/// ```
/// use vblackboard::draw::Color;
/// let red = Color::rgb(255, 0, 0);
/// assert_eq!(red, vblackboard::draw::RED);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
}

impl Color {
    /// Creates a new color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the components scaled to 0.0..=1.0, as Cairo expects them.
    pub fn to_unit_rgb(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Predefined red color
pub const RED: Color = Color::rgb(255, 0, 0);

/// Predefined green color
pub const GREEN: Color = Color::rgb(0, 255, 0);

/// Predefined blue color
pub const BLUE: Color = Color::rgb(0, 0, 255);

/// Predefined black color
pub const BLACK: Color = Color::rgb(0, 0, 0);

/// Predefined white color
pub const WHITE: Color = Color::rgb(255, 255, 255);

/// Predefined pale blue color
pub const PALE_BLUE: Color = Color::rgb(128, 128, 255);

/// Predefined yellow color
pub const YELLOW: Color = Color::rgb(255, 255, 0);

/// Predefined orange color
pub const ORANGE: Color = Color::rgb(255, 140, 0);

/// Color used for the canvas background and by the eraser.
pub const BACKGROUND: Color = WHITE;

// ============================================================================
// Ink Palette
// ============================================================================

/// Selectable ink colors, in the order they appear in the line-characteristics panel.
pub const PALETTE: [Color; 8] = [RED, GREEN, BLUE, BLACK, WHITE, PALE_BLUE, YELLOW, ORANGE];

/// Names accepted for [`PALETTE`] entries in configuration files.
pub const PALETTE_NAMES: [&str; 8] = [
    "red", "green", "blue", "black", "white", "paleblue", "yellow", "orange",
];

/// Palette index of black, the initial ink.
pub const DEFAULT_INK: usize = 3;

/// Returns the palette color at `index`, falling back to the default ink.
pub fn palette_color(index: usize) -> Color {
    PALETTE.get(index).copied().unwrap_or(PALETTE[DEFAULT_INK])
}

/// Looks up a palette entry by name (case-insensitive, `-`/`_`/space ignored).
pub fn palette_index_by_name(name: &str) -> Option<usize> {
    let normalized: String = name
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect();
    PALETTE_NAMES.iter().position(|entry| *entry == normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_names_resolve_to_matching_colors() {
        assert_eq!(palette_index_by_name("Black"), Some(DEFAULT_INK));
        assert_eq!(palette_index_by_name("pale_blue"), Some(5));
        assert_eq!(palette_color(5), PALE_BLUE);
        assert_eq!(palette_index_by_name("magenta"), None);
    }

    #[test]
    fn out_of_range_index_falls_back_to_default_ink() {
        assert_eq!(palette_color(42), BLACK);
    }
}
