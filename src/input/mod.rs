//! Input handling and the blackboard state machine.
//!
//! This module translates backend keyboard and pointer events into commands,
//! hit-tests the menu strip and owns the [`Blackboard`] that executes them.

pub mod command;
pub mod events;
pub mod router;
pub mod state;

// Re-export commonly used types at module level
pub use command::{Command, MENU_COMMANDS, Target};
pub use events::{InputEvent, Key};
pub use router::{Click, MenuLayout, MenuSlot, route_key};
pub use state::{Blackboard, Collaborators, Modal};
