mod actions;
mod confirm;
mod core;
mod mouse;
mod palette;
mod render;

pub use confirm::ConfirmBox;
pub use core::{Blackboard, Collaborators, Modal};
pub use palette::{PaletteOutcome, PaletteSelector};
