//! Pen state: drawing mode, tracing flag and stroke characteristics.

use super::Color;
use super::color::{BACKGROUND, DEFAULT_INK, palette_color};
use super::geometry::MAX_LINE_WIDTH;

/// Whether strokes lay down ink or erase it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenMode {
    Drawing,
    Erasing,
}

/// Current pen settings and stroke progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pen {
    pub mode: PenMode,
    /// True while the primary button is held on the canvas.
    pub tracing: bool,
    /// Screen position the next segment starts from.
    pub last_point: (i32, i32),
    /// Ink stroke width, `1..=MAX_LINE_WIDTH`.
    pub stroke_width: u32,
    /// Index into the ink palette.
    pub ink: usize,
    /// Configured eraser size; the eraser square is twice this.
    pub eraser_size: u32,
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(2, DEFAULT_INK, 3)
    }
}

impl Pen {
    pub fn new(stroke_width: u32, ink: usize, eraser_size: u32) -> Self {
        Self {
            mode: PenMode::Drawing,
            tracing: false,
            last_point: (0, 0),
            stroke_width: stroke_width.clamp(1, MAX_LINE_WIDTH),
            ink,
            eraser_size: eraser_size.max(1),
        }
    }

    /// Side of the square stamped at each step.
    pub fn active_size(&self) -> u32 {
        match self.mode {
            PenMode::Drawing => self.stroke_width,
            PenMode::Erasing => self.eraser_size * 2,
        }
    }

    /// Color stamped at each step.
    pub fn active_color(&self) -> Color {
        match self.mode {
            PenMode::Drawing => palette_color(self.ink),
            PenMode::Erasing => BACKGROUND,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            PenMode::Drawing => PenMode::Erasing,
            PenMode::Erasing => PenMode::Drawing,
        };
    }
}
