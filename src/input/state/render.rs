use crate::draw::color::{BACKGROUND, BLACK, GREEN, RED, WHITE};
use crate::draw::{Color, PenMode, PixelBuffer};
use crate::util::{Rect, rect};

use super::core::Blackboard;

impl Blackboard {
    /// Black frame with a background-colored interior one pixel in.
    pub(crate) fn outlined_rect(target: &mut PixelBuffer, area: Rect) {
        target.fill_rect(area, BLACK);
        target.fill_rect(area.inset(1), BACKGROUND);
    }

    /// Color of the mode square: green while drawing, red while erasing.
    pub fn mode_color(&self) -> Color {
        match self.pen.mode {
            PenMode::Drawing => GREEN,
            PenMode::Erasing => RED,
        }
    }

    /// Repaints the whole menu strip: indicator plus one black slice per label.
    pub(crate) fn paint_menu(&mut self) {
        let strip = self.geometry.menu_rect();
        let visible = self.layers.visible_mut();
        visible.fill_rect(strip, WHITE);

        for (slot, label) in self.menu.slots().iter().zip(&self.labels) {
            visible.fill_rect(slot.label, BLACK);
            let y = slot.label.y + 1;
            let mut x = slot.label.x + 3;
            x += self.text.draw(visible, x, y, &label.before, WHITE);
            x += self
                .text
                .draw(visible, x, y, &label.accelerator.to_string(), GREEN);
            self.text.draw(visible, x, y, &label.after, WHITE);
        }

        self.paint_mode_indicator();
        self.mark_damage(strip);
    }

    /// Paints the mode square and, inside it, the tracing indicator.
    pub(crate) fn paint_mode_indicator(&mut self) {
        let mh = self.geometry.menu_height;
        let square = rect(1, 1, mh - 2, mh - 2);
        let color = self.mode_color();
        self.layers.visible_mut().fill_rect(square, color);
        self.paint_tracing_indicator();
        self.mark_damage(square);
    }

    /// Inner square: black while a stroke is in progress, the mode color otherwise.
    pub(crate) fn paint_tracing_indicator(&mut self) {
        let mh = self.geometry.menu_height;
        let inner = rect(mh / 4, mh / 4, mh / 2, mh / 2);
        let color = if self.pen.tracing {
            BLACK
        } else {
            self.mode_color()
        };
        self.layers.visible_mut().fill_rect(inner, color);
        self.mark_damage(inner);
    }
}
