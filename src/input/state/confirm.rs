//! Message box shown after a save attempt.

use crate::draw::color::BLACK;
use crate::draw::ScreenGeometry;
use crate::util::{Rect, rect};

use super::core::{Blackboard, Modal};

/// Size of the OK button.
const OK_SIZE: (i32, i32) = (30, 20);

/// Layout of an open message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmBox {
    pub message: String,
    /// Frame around the message and button.
    pub panel: Rect,
    pub ok: Rect,
}

impl ConfirmBox {
    /// Lays out a box for a message of `text_size` pixels, centered on the canvas.
    pub fn new(message: String, text_size: (i32, i32), geometry: &ScreenGeometry) -> Self {
        let (w, h) = text_size;
        let mh = geometry.menu_height;
        let panel = rect(
            (geometry.width - w - 20) / 2,
            mh + (geometry.height - mh - h - 50) / 2,
            w + 20,
            h + 50,
        );
        let ok = rect(
            (geometry.width - OK_SIZE.0) / 2,
            mh + (geometry.height - mh) / 2 + 7,
            OK_SIZE.0,
            OK_SIZE.1,
        );
        Self { message, panel, ok }
    }
}

impl Blackboard {
    /// Shows `message` in a box that stays until its OK button is pressed.
    pub(crate) fn open_confirm(&mut self, message: String) {
        let size = self.text.measure(&message);
        let dialog = ConfirmBox::new(message, size, &self.geometry);
        let visible = self.layers.visible_mut();

        Self::outlined_rect(visible, dialog.panel);
        self.text.draw(
            visible,
            dialog.panel.x + 10,
            dialog.panel.y + 10,
            &dialog.message,
            BLACK,
        );
        Self::outlined_rect(visible, dialog.ok);
        let (tw, _) = self.text.measure("OK");
        self.text.draw(
            visible,
            (self.geometry.width - tw) / 2,
            dialog.ok.y + 2,
            "OK",
            BLACK,
        );

        let damage = dialog.panel.union(&dialog.ok);
        self.modal = Some(Modal::Confirm(dialog));
        self.mark_damage(damage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_is_centered_on_canvas() {
        let geometry = ScreenGeometry::new(1024, 576).unwrap();
        let dialog = ConfirmBox::new("saved".to_string(), (100, 14), &geometry);
        assert_eq!(dialog.panel, Rect::new(452, 266, 120, 64).unwrap());
        assert_eq!(dialog.ok, Rect::new(497, 305, 30, 20).unwrap());
    }
}
