//! Interactive presentation blackboard.
//!
//! The library holds everything except the display glue: the two pixel
//! layers and stroke rasterizer ([`draw`]), the event router and blackboard
//! state machine ([`input`]), configuration and localized strings
//! ([`config`]), slide decks ([`slides`]) and saved-canvas writers
//! ([`persist`]). The `vblackboard` binary drives it from a Wayland surface.

pub mod config;
pub mod draw;
pub mod input;
pub mod persist;
pub mod slides;
pub mod util;

pub use config::Config;
pub use input::Blackboard;
