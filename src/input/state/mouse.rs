use log::{debug, info};

use crate::draw::draw_segment;
use crate::input::events::InputEvent;
use crate::input::router::Click;

use super::core::{Blackboard, Modal};
use super::palette::PaletteOutcome;

impl Blackboard {
    /// Processes a button press outside any modal.
    ///
    /// Presses on the canvas start a stroke at the press position; presses on
    /// the menu strip execute the command under the pointer.
    pub fn on_button_press(&mut self, x: i32, y: i32) {
        match self.menu.route_click(x, y) {
            Click::Canvas => {
                self.pen.tracing = true;
                self.pen.last_point = (x, y);
                self.paint_tracing_indicator();
            }
            Click::Command(command) => self.execute(command),
        }
    }

    /// Extends the current stroke, if any, to (`x`, `y`).
    pub fn on_motion(&mut self, x: i32, y: i32) {
        if !self.pen.tracing {
            return;
        }
        if draw_segment(
            &mut self.layers,
            &mut self.pen,
            x,
            y,
            &mut self.dirty_tracker,
        ) {
            self.needs_redraw = true;
        }
    }

    /// Ends the current stroke.
    pub fn on_button_release(&mut self, _x: i32, _y: i32) {
        if self.pen.tracing {
            self.pen.tracing = false;
            self.paint_tracing_indicator();
        }
    }

    /// Handles an event accepted by the active modal.
    pub(crate) fn on_modal_event(&mut self, event: InputEvent) {
        let Some(modal) = self.modal.take() else {
            return;
        };
        match (modal, event) {
            (Modal::Splash, _) => {
                debug!("Splash dismissed");
                self.paint_menu();
                self.recomposite();
            }
            (Modal::Palette(mut selector), InputEvent::ButtonPress { x, y }) => {
                match selector.press(&self.palette, x, y) {
                    PaletteOutcome::Confirmed => {
                        self.pen.ink = selector.ink;
                        self.pen.stroke_width = selector.width;
                        info!(
                            "Line characteristics: color {}, width {}",
                            selector.ink, selector.width
                        );
                        self.recomposite();
                    }
                    PaletteOutcome::Changed => {
                        self.modal = Some(Modal::Palette(selector));
                        self.paint_palette();
                    }
                    PaletteOutcome::Ignored => {
                        self.modal = Some(Modal::Palette(selector));
                    }
                }
            }
            (Modal::Confirm(dialog), InputEvent::ButtonPress { x, y }) => {
                if dialog.ok.contains(x, y) {
                    self.recomposite();
                } else {
                    self.modal = Some(Modal::Confirm(dialog));
                }
            }
            (modal, _) => self.modal = Some(modal),
        }
    }
}
