//! Generic input event types for cross-backend compatibility.

/// Generic key representation for cross-backend compatibility.
///
/// Backend implementations map their native key codes to these generic
/// key values for unified input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Escape,
    /// Unmapped or unrecognized key
    Unknown,
}

/// Pointer and keyboard events delivered to the blackboard, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    ButtonPress { x: i32, y: i32 },
    ButtonRelease { x: i32, y: i32 },
    Motion { x: i32, y: i32 },
    KeyPress(Key),
}
