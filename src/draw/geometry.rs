//! Screen partitioning and the fixed layout of the line-characteristics panel.

use crate::util::{Rect, rect};

use super::color::PALETTE;

/// Upper bound on the menu strip height in pixels.
pub const MAX_MENU_HEIGHT: i32 = 20;

/// Widest stroke selectable from the panel.
pub const MAX_LINE_WIDTH: u32 = 8;

/// Width/height of the whole screen and the height of the menu strip on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub width: i32,
    pub height: i32,
    pub menu_height: i32,
}

impl ScreenGeometry {
    /// Derives the geometry for a screen. Returns `None` when the screen is too
    /// small to hold a menu strip above a non-empty canvas.
    pub fn new(width: i32, height: i32) -> Option<Self> {
        let menu_height = (height / 10).min(MAX_MENU_HEIGHT);
        if width <= menu_height || menu_height <= 0 || menu_height >= height {
            return None;
        }
        Some(Self {
            width,
            height,
            menu_height,
        })
    }

    /// Height of the drawable area below the menu.
    pub fn canvas_height(&self) -> i32 {
        self.height - self.menu_height
    }

    /// The drawable area in screen coordinates.
    pub fn canvas_rect(&self) -> Rect {
        rect(0, self.menu_height, self.width, self.canvas_height())
    }

    /// The menu strip in screen coordinates.
    pub fn menu_rect(&self) -> Rect {
        rect(0, 0, self.width, self.menu_height)
    }

    /// Whether a screen row belongs to the canvas. Row `menu_height` itself is
    /// still part of the strip for hit-testing purposes.
    pub fn in_canvas(&self, y: i32) -> bool {
        y > self.menu_height
    }

    /// The whole screen.
    pub fn screen_rect(&self) -> Rect {
        rect(0, 0, self.width, self.height)
    }
}

/// Rectangles of the modal line-characteristics panel.
///
/// Colors sit in a two-column grid on the left, stroke widths in a column on
/// the right and the OK button under the color grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteGeometry {
    pub panel: Rect,
    pub ok: Rect,
    pub colors: [Rect; PALETTE.len()],
    pub widths: [Rect; MAX_LINE_WIDTH as usize],
    pub samples: [Rect; MAX_LINE_WIDTH as usize],
    square: i32,
}

impl PaletteGeometry {
    pub fn new(screen: &ScreenGeometry) -> Self {
        let square = screen.width / 24;
        let x_off = 2 * square;
        let y_off = (2 * square).max(screen.menu_height + 20);
        let rows = (PALETTE.len() as i32 + 1) / 2;
        let row_step = MAX_LINE_WIDTH as i32 + 18;
        // Tall enough for both the color column (plus OK) and every width row.
        let color_column = rows * square + (square as f32 * 1.2) as i32;
        let width_column = square / 4 + 2 + MAX_LINE_WIDTH as i32 * row_step;
        let panel_height = color_column.max(width_column);

        let colors = std::array::from_fn(|i| {
            let i = i as i32;
            rect(
                x_off + (i % 2) * square + 3,
                y_off + (i / 2) * square + 3,
                square - 6,
                square - 6,
            )
        });
        let widths = std::array::from_fn(|i| {
            rect(
                x_off + 2 * square + 4,
                y_off + square / 4 + row_step * i as i32 + 2,
                2 * square - 6,
                row_step,
            )
        });
        let samples = std::array::from_fn(|i| {
            let i = i as i32;
            rect(
                x_off + 2 * square + 6,
                y_off + square / 4 + row_step * i + row_step / 2 - (i + 1) / 2,
                2 * square - 10,
                i + 1,
            )
        });

        Self {
            panel: rect(x_off, y_off, 4 * square, panel_height),
            ok: rect(
                x_off + 2,
                y_off + (PALETTE.len() as i32 / 2) * square + 4,
                2 * square - 4,
                square,
            ),
            colors,
            widths,
            samples,
            square,
        }
    }

    /// Side of one color cell.
    pub fn square(&self) -> i32 {
        self.square
    }

    /// Outline drawn around the selected color.
    pub fn color_marker(&self, index: usize) -> Rect {
        let i = index as i32;
        rect(
            self.panel.x + (i % 2) * self.square,
            self.panel.y + (i / 2) * self.square,
            self.square,
            self.square,
        )
    }

    /// Outline drawn around the selected width (1-based).
    pub fn width_marker(&self, width: u32) -> Rect {
        let row = width.saturating_sub(1) as i32;
        let step = MAX_LINE_WIDTH as i32 + 18;
        rect(
            self.panel.x + 2 * self.square + 4,
            self.panel.y + self.square / 4 + step * row + 2,
            2 * self.square - 6,
            step,
        )
    }

    /// Index of the color cell under (`x`, `y`).
    pub fn color_at(&self, x: i32, y: i32) -> Option<usize> {
        self.colors.iter().position(|r| r.contains(x, y))
    }

    /// Stroke width (1-based) whose row is under (`x`, `y`).
    pub fn width_at(&self, x: i32, y: i32) -> Option<u32> {
        self.widths
            .iter()
            .position(|r| r.contains(x, y))
            .map(|i| i as u32 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_height_is_capped() {
        let g = ScreenGeometry::new(1024, 576).unwrap();
        assert_eq!(g.menu_height, 20);
        let small = ScreenGeometry::new(320, 150).unwrap();
        assert_eq!(small.menu_height, 15);
        assert_eq!(small.canvas_height(), 135);
    }

    #[test]
    fn degenerate_screens_are_rejected() {
        assert!(ScreenGeometry::new(100, 5).is_none());
        assert!(ScreenGeometry::new(10, 200).is_none());
    }

    #[test]
    fn palette_layout_for_default_resolution() {
        let screen = ScreenGeometry::new(1024, 576).unwrap();
        let p = PaletteGeometry::new(&screen);
        assert_eq!(p.square(), 42);
        assert_eq!(p.panel, Rect::new(84, 84, 168, 220).unwrap());
        assert_eq!(p.colors[0], Rect::new(87, 87, 36, 36).unwrap());
        assert_eq!(p.colors[3], Rect::new(129, 129, 36, 36).unwrap());
        assert_eq!(p.ok, Rect::new(86, 256, 80, 42).unwrap());
        assert_eq!(p.widths[0], Rect::new(172, 96, 78, 26).unwrap());
        assert_eq!(p.samples[1].height, 2);
    }

    #[test]
    fn hit_lookup_uses_cell_rectangles() {
        let screen = ScreenGeometry::new(1024, 576).unwrap();
        let p = PaletteGeometry::new(&screen);
        assert_eq!(p.color_at(90, 90), Some(0));
        assert_eq!(p.color_at(130, 90), Some(1));
        // Gap between cells.
        assert_eq!(p.color_at(124, 90), None);
        assert_eq!(p.width_at(200, 97), Some(1));
        assert_eq!(p.width_at(200, 122), Some(2));
        assert_eq!(p.width_marker(2), p.widths[1]);
    }

    #[test]
    fn width_rows_stay_inside_panel_on_small_screens() {
        for (width, height) in [(1024, 576), (800, 600), (640, 480)] {
            let p = PaletteGeometry::new(&ScreenGeometry::new(width, height).unwrap());
            for row in p.widths.iter().chain(p.colors.iter()).chain([&p.ok]) {
                assert_eq!(row.intersect(&p.panel), Some(*row), "{width}x{height}");
            }
            assert!(p.panel.bottom() <= height);
        }
    }
}
