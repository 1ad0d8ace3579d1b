//! Pixel-level drawing primitives.
//!
//! This module defines the core rendering types of the blackboard:
//! - [`Color`] and the fixed ink palette
//! - [`PixelBuffer`]/[`PixelFormat`]: bounds-checked pixel storage
//! - [`LayerStore`]: the visible and trace layers plus merge
//! - [`draw_segment`]: the stroke rasterizer
//! - [`TextRenderer`]: Pango-based label rendering

pub mod buffer;
pub mod color;
pub mod dirty;
pub mod font;
pub mod geometry;
pub mod layers;
pub mod pen;
pub mod pixel;
pub mod raster;

pub use buffer::PixelBuffer;
pub use color::Color;
pub use dirty::DirtyTracker;
pub use font::{FontDescriptor, PangoText, TextRenderer};
pub use geometry::{PaletteGeometry, ScreenGeometry};
pub use layers::{Layer, LayerStore};
pub use pen::{Pen, PenMode};
pub use pixel::{BackgroundSignature, FormatError, PixelFormat};
pub use raster::{MIN_LINE_DISTANCE, draw_segment};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PALE_BLUE, RED, WHITE, YELLOW};
