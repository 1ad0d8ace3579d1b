//! Modal selection of ink color and stroke width.

use crate::draw::color::{BLACK, PALETTE};
use crate::draw::PaletteGeometry;

use super::core::{Blackboard, Modal};

/// Result of a press while the panel is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteOutcome {
    /// The OK button was pressed; the selection should be applied.
    Confirmed,
    /// The selection changed and the panel needs repainting.
    Changed,
    /// Outside the panel, or on a gap between cells.
    Ignored,
}

/// Selection held by the open panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteSelector {
    pub ink: usize,
    pub width: u32,
}

impl PaletteSelector {
    pub fn new(ink: usize, width: u32) -> Self {
        Self { ink, width }
    }

    /// Applies a press. The panel is checked first, then OK, then the color
    /// cells, then the width rows.
    pub fn press(&mut self, geometry: &PaletteGeometry, x: i32, y: i32) -> PaletteOutcome {
        if !geometry.panel.contains(x, y) {
            return PaletteOutcome::Ignored;
        }
        if geometry.ok.contains(x, y) {
            return PaletteOutcome::Confirmed;
        }
        if let Some(ink) = geometry.color_at(x, y) {
            self.ink = ink;
            return PaletteOutcome::Changed;
        }
        if let Some(width) = geometry.width_at(x, y) {
            self.width = width;
            return PaletteOutcome::Changed;
        }
        PaletteOutcome::Ignored
    }
}

impl Blackboard {
    /// Opens the line-characteristics panel over the canvas.
    pub(crate) fn open_palette(&mut self) {
        self.modal = Some(Modal::Palette(PaletteSelector::new(
            self.pen.ink,
            self.pen.stroke_width,
        )));
        self.paint_palette();
    }

    /// Paints the panel with the current selection outlined.
    pub(crate) fn paint_palette(&mut self) {
        let Some(Modal::Palette(selector)) = self.modal else {
            return;
        };
        let geometry = &self.palette;
        let visible = self.layers.visible_mut();

        Self::outlined_rect(visible, geometry.panel);
        Self::outlined_rect(visible, geometry.color_marker(selector.ink));
        Self::outlined_rect(visible, geometry.width_marker(selector.width));
        for (cell, color) in geometry.colors.iter().zip(PALETTE) {
            visible.fill_rect(*cell, color);
        }
        for sample in &geometry.samples {
            visible.fill_rect(*sample, BLACK);
        }
        Self::outlined_rect(visible, geometry.ok);

        let (tw, th) = self.text.measure("OK");
        let ok = geometry.ok;
        self.text.draw(
            visible,
            ok.x + ok.width / 2 - tw / 2,
            ok.y + ok.height / 2 - th / 2,
            "OK",
            BLACK,
        );

        let panel = geometry.panel;
        self.mark_damage(panel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::ScreenGeometry;

    fn geometry() -> PaletteGeometry {
        PaletteGeometry::new(&ScreenGeometry::new(1024, 576).unwrap())
    }

    #[test]
    fn presses_outside_panel_are_ignored() {
        let mut selector = PaletteSelector::new(3, 2);
        assert_eq!(selector.press(&geometry(), 600, 400), PaletteOutcome::Ignored);
        assert_eq!(selector, PaletteSelector::new(3, 2));
    }

    #[test]
    fn color_and_width_cells_update_selection() {
        let g = geometry();
        let mut selector = PaletteSelector::new(3, 2);
        let cell = g.colors[6];
        assert_eq!(selector.press(&g, cell.x + 1, cell.y + 1), PaletteOutcome::Changed);
        assert_eq!(selector.ink, 6);
        let row = g.widths[4];
        assert_eq!(selector.press(&g, row.x + 1, row.y + 1), PaletteOutcome::Changed);
        assert_eq!(selector.width, 5);
    }

    #[test]
    fn every_width_row_is_selectable_on_small_screens() {
        for (width, height) in [(800, 600), (640, 480)] {
            let g = PaletteGeometry::new(&ScreenGeometry::new(width, height).unwrap());
            let mut selector = PaletteSelector::new(0, 1);
            for (i, row) in g.widths.iter().enumerate() {
                for y in [row.y, row.bottom() - 1] {
                    assert_eq!(
                        selector.press(&g, row.x + row.width / 2, y),
                        PaletteOutcome::Changed,
                        "{width}x{height} row {i}"
                    );
                    assert_eq!(selector.width, i as u32 + 1);
                }
            }
        }
    }

    #[test]
    fn ok_confirms() {
        let g = geometry();
        let mut selector = PaletteSelector::new(0, 1);
        assert_eq!(
            selector.press(&g, g.ok.x + 2, g.ok.y + 2),
            PaletteOutcome::Confirmed
        );
    }
}
