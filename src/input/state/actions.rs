use log::{debug, info, warn};

use crate::draw::Layer;
use crate::input::command::{Command, Target};
use crate::input::events::Key;
use crate::input::router::route_key;
use crate::persist::save_canvas;

use super::core::Blackboard;

impl Blackboard {
    /// Processes a key press outside any modal.
    pub fn on_key_press(&mut self, key: Key) {
        let command = route_key(&self.accelerators, key);
        if command != Command::NoOp {
            self.execute(command);
        }
    }

    /// Runs a command. Navigation goes to the slide source; when the page
    /// actually changes the canvas is recomposed with the new page.
    pub fn execute(&mut self, command: Command) {
        debug!("Executing {:?}", command);
        if let (Target::Slides, Some(navigation)) = (command.target(), command.navigation()) {
            if self.slides.navigate(navigation) {
                self.recomposite();
            }
            return;
        }

        match command {
            Command::ToggleMode => {
                self.pen.tracing = false;
                self.pen.toggle_mode();
                info!("Pen mode: {:?}", self.pen.mode);
                self.paint_mode_indicator();
            }
            Command::LineCharacteristics => {
                self.pen.tracing = false;
                self.paint_tracing_indicator();
                self.open_palette();
            }
            Command::EraseAll => {
                info!("Erasing traces and canvas");
                self.layers.clear(Layer::Both);
                let canvas = self.layers.canvas_rect();
                self.mark_damage(canvas);
            }
            Command::EraseSlide => {
                info!("Erasing slide");
                self.layers.clear(Layer::Visible);
                self.layers.merge();
                let canvas = self.layers.canvas_rect();
                self.mark_damage(canvas);
            }
            Command::EraseTraces => {
                info!("Erasing traces");
                self.layers.clear(Layer::Trace);
                self.recomposite();
            }
            Command::Save => self.save_blackboard(),
            Command::Quit => {
                info!("Quit requested");
                self.should_exit = true;
            }
            _ => {}
        }
    }

    /// Writes the canvas to the next `saved_NN` file and reports the outcome
    /// in a message box. The counter only advances on success.
    fn save_blackboard(&mut self) {
        self.pen.tracing = false;
        let path = self.save_target.path(self.writer.extension());
        let top_row = self.geometry.menu_height as usize;
        let result = save_canvas(self.writer.as_ref(), &path, self.layers.visible(), top_row);

        let shown = path.display().to_string();
        let message = match result {
            Ok(()) => {
                info!("Saved blackboard to {}", shown);
                self.save_target.advance();
                self.save_messages.render(true, &shown)
            }
            Err(err) => {
                warn!("Failed to save blackboard to {}: {}", shown, err);
                self.save_messages.render(false, &shown)
            }
        };
        self.open_confirm(message);
    }
}
