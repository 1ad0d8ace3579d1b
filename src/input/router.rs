//! Hit-testing of the menu strip and key-to-command routing.

use super::command::{Command, MENU_COMMANDS};
use super::events::Key;
use crate::config::AcceleratorTable;
use crate::draw::ScreenGeometry;
use crate::util::{Rect, rect};

/// Outcome of a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    /// The press landed on the canvas; a stroke starts here.
    Canvas,
    Command(Command),
}

/// One labelled menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSlot {
    /// Area that activates the entry.
    pub hit: Rect,
    /// Area the label is painted in.
    pub label: Rect,
    pub command: Command,
}

/// Partition of the menu strip into the mode indicator and labelled slots.
///
/// Slot `i` covers `x - menu_height` in `[ceil(i·span/N), ceil((i+1)·span/N))`,
/// which is exactly the set of columns where `(x - menu_height)·N / span == i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLayout {
    menu_height: i32,
    indicator: Rect,
    slots: Vec<MenuSlot>,
}

impl MenuLayout {
    pub fn new(geometry: &ScreenGeometry, items: usize) -> Self {
        let mh = geometry.menu_height;
        let count = items.min(MENU_COMMANDS.len());
        let span = geometry.width - mh;
        let n = count.max(1) as i32;
        let slice = span / n;
        let boundary = |i: i32| (i * span + n - 1) / n;

        let slots = MENU_COMMANDS
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, &command)| {
                let i = i as i32;
                let start = boundary(i);
                MenuSlot {
                    hit: rect(mh + start, 0, boundary(i + 1) - start, mh + 1),
                    label: rect(mh + slice * i, 0, slice - 1, mh),
                    command,
                }
            })
            .collect();

        Self {
            menu_height: mh,
            indicator: rect(0, 0, mh, mh),
            slots,
        }
    }

    pub fn slots(&self) -> &[MenuSlot] {
        &self.slots
    }

    /// The square left of the slots that shows the pen mode.
    pub fn indicator(&self) -> Rect {
        self.indicator
    }

    /// Classifies a button press at screen position (`x`, `y`).
    pub fn route_click(&self, x: i32, y: i32) -> Click {
        if y > self.menu_height {
            return Click::Canvas;
        }
        if x < self.menu_height {
            return Click::Command(Command::ToggleMode);
        }
        let command = self
            .slots
            .iter()
            .find(|slot| slot.hit.contains(x, y))
            .map_or(Command::NoOp, |slot| slot.command);
        Click::Command(command)
    }
}

/// Maps a key press to a command: label accelerators first, then the fixed
/// navigation keys.
pub fn route_key(accelerators: &AcceleratorTable, key: Key) -> Command {
    match key {
        Key::Char(c) => accelerators.lookup(c).unwrap_or(Command::NoOp),
        Key::Right => Command::Next,
        Key::Left => Command::Previous,
        Key::PageUp => Command::LastSlide,
        Key::Up => Command::FastForward,
        Key::PageDown => Command::FirstSlide,
        Key::Down => Command::FastBackward,
        Key::Escape | Key::Unknown => Command::NoOp,
    }
}
