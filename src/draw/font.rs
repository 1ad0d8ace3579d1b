//! Font descriptor and the text renderer used for menu labels and dialogs.

use cairo::{Context, Format, ImageSurface};
use pango::prelude::*;

use super::{Color, PixelBuffer};

/// Font configuration for text rendering.
///
/// Describes which font to use, including family name, weight and size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "DejaVu Sans")
    /// Reference installed system fonts by name
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light")
    pub weight: String,

    /// Point size
    pub size: f64,
}

impl FontDescriptor {
    pub fn new(family: String, weight: String, size: f64) -> Self {
        Self {
            family,
            weight,
            size,
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Weight Size"
    /// Example: "Monospace Bold 12"
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}", self.size.round() as i32));

        parts.join(" ")
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Monospace".to_string(),
            weight: "bold".to_string(),
            size: 12.0,
        }
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Renders single-line strings straight into a pixel buffer.
pub trait TextRenderer {
    /// Pixel size (`width`, `height`) the text occupies.
    fn measure(&self, text: &str) -> (i32, i32);

    /// Draws `text` with its top-left corner at (`x`, `y`). Glyph pixels are
    /// written fully opaque in `color`. Returns the advance width.
    fn draw(&self, target: &mut PixelBuffer, x: i32, y: i32, text: &str, color: Color) -> i32;
}

/// Whether a font family with this name is installed.
pub fn font_family_available(family: &str) -> bool {
    let font_map = pangocairo::FontMap::default();
    font_map
        .list_families()
        .iter()
        .any(|f| f.name().eq_ignore_ascii_case(family))
}

/// Pango/Cairo backed [`TextRenderer`].
pub struct PangoText {
    description: pango::FontDescription,
}

impl PangoText {
    pub fn new(font: &FontDescriptor) -> Self {
        let description = pango::FontDescription::from_string(&font.to_pango_string());
        log::debug!("Using font '{}'", font.to_pango_string());
        Self { description }
    }

    fn layout(&self, ctx: &Context, text: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(ctx);
        layout.set_font_description(Some(&self.description));
        layout.set_text(text);
        layout
    }
}

impl TextRenderer for PangoText {
    fn measure(&self, text: &str) -> (i32, i32) {
        let Ok(surface) = ImageSurface::create(Format::ARgb32, 1, 1) else {
            return (0, 0);
        };
        let Ok(ctx) = Context::new(&surface) else {
            return (0, 0);
        };
        self.layout(&ctx, text).pixel_size()
    }

    fn draw(&self, target: &mut PixelBuffer, x: i32, y: i32, text: &str, color: Color) -> i32 {
        let (width, height) = self.measure(text);
        if width <= 0 || height <= 0 {
            return 0;
        }
        let Ok(mut surface) = ImageSurface::create(Format::ARgb32, width, height) else {
            log::warn!("Failed to allocate text surface {}x{}", width, height);
            return width;
        };
        {
            let Ok(ctx) = Context::new(&surface) else {
                return width;
            };
            ctx.set_source_rgba(1.0, 1.0, 1.0, 1.0);
            let layout = self.layout(&ctx, text);
            pangocairo::functions::show_layout(&ctx, &layout);
        }
        surface.flush();

        let stride = surface.stride() as usize;
        let Ok(data) = surface.data() else {
            return width;
        };
        for row in 0..height as usize {
            for col in 0..width as usize {
                let start = row * stride + col * 4;
                let Some(bytes) = data.get(start..start + 4) else {
                    continue;
                };
                let argb = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                let (px, py) = (x + col as i32, y + row as i32);
                if argb >> 24 >= 128 && px >= 0 && py >= 0 {
                    target.set_pixel(py as usize, px as usize, color);
                }
            }
        }
        width
    }
}
