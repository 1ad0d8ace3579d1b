use anyhow::Result;

pub mod wayland;

pub use wayland::BoardSetup;

use vblackboard::config::ScreenConfig;

/// Runs the blackboard on a Wayland layer surface until Quit or close.
pub fn run_wayland(setup: BoardSetup, screen: ScreenConfig) -> Result<()> {
    let mut backend = wayland::WaylandBackend::new(setup, screen);
    backend.run()
}
