//! Wayland presentation of the blackboard through wlr-layer-shell.

mod backend;
mod handlers;
mod state;
mod surface;

pub use backend::WaylandBackend;
pub use state::BoardSetup;
