//! Commands the blackboard understands and who executes them.

use crate::slides::Navigation;

/// A user-level command, produced by menu clicks and key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Switch between drawing and erasing.
    ToggleMode,
    /// Open the color/width panel.
    LineCharacteristics,
    Next,
    Previous,
    /// Clear every trace and the canvas.
    EraseAll,
    /// Clear the canvas only; traces survive and are merged back.
    EraseSlide,
    /// Clear every trace, then put the slide back.
    EraseTraces,
    Save,
    Quit,
    FastForward,
    FastBackward,
    FirstSlide,
    LastSlide,
    NoOp,
}

/// Which component executes a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Board,
    Slides,
}

/// Menu commands in strip order. Label `i` of the localization file is
/// bound to entry `i`.
pub const MENU_COMMANDS: [Command; 9] = [
    Command::ToggleMode,
    Command::LineCharacteristics,
    Command::Next,
    Command::Previous,
    Command::EraseAll,
    Command::EraseSlide,
    Command::EraseTraces,
    Command::Save,
    Command::Quit,
];

impl Command {
    pub fn target(self) -> Target {
        match self.navigation() {
            Some(_) => Target::Slides,
            None => Target::Board,
        }
    }

    /// The slide navigation this command requests, if any.
    pub fn navigation(self) -> Option<Navigation> {
        match self {
            Command::Next => Some(Navigation::Next),
            Command::Previous => Some(Navigation::Previous),
            Command::FastForward => Some(Navigation::FastForward),
            Command::FastBackward => Some(Navigation::FastBackward),
            Command::FirstSlide => Some(Navigation::First),
            Command::LastSlide => Some(Navigation::Last),
            _ => None,
        }
    }
}
