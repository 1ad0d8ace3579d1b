// Coordinates backend startup/shutdown and drives the event loop while delegating
// presentation & protocol state to `WaylandState` and its handler modules.
use anyhow::{Context, Result};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        WaylandSurface,
        wlr_layer::{Anchor, KeyboardInteractivity, Layer, LayerShell},
    },
    shm::Shm,
};
use wayland_client::{Connection, globals::registry_queue_init};

use super::state::{BoardSetup, WaylandState};
use vblackboard::config::ScreenConfig;

const MAX_RENDER_FAILURES: u32 = 10;

/// Wayland backend state
pub struct WaylandBackend {
    setup: Option<BoardSetup>,
    screen: ScreenConfig,
}

impl WaylandBackend {
    pub fn new(setup: BoardSetup, screen: ScreenConfig) -> Self {
        Self {
            setup: Some(setup),
            screen,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Starting Wayland backend");
        let setup = self
            .setup
            .take()
            .context("Wayland backend already ran")?;

        let conn =
            Connection::connect_to_env().context("Failed to connect to Wayland compositor")?;
        debug!("Connected to Wayland display");

        let (globals, mut event_queue) =
            registry_queue_init(&conn).context("Failed to initialize Wayland registry")?;
        let qh = event_queue.handle();

        let compositor_state =
            CompositorState::bind(&globals, &qh).context("wl_compositor not available")?;
        debug!("Bound compositor");

        let layer_shell =
            LayerShell::bind(&globals, &qh).context("zwlr_layer_shell_v1 not available")?;
        debug!("Bound layer shell");

        let shm = Shm::bind(&globals, &qh).context("wl_shm not available")?;
        debug!("Bound shared memory");

        let output_state = OutputState::new(&globals, &qh);
        let seat_state = SeatState::new(&globals, &qh);
        let registry_state = RegistryState::new(&globals);

        let mut state = WaylandState::new(
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            setup,
        );

        info!("Creating layer shell surface");
        let wl_surface = state.compositor_state.create_surface(&qh);
        let layer_surface = state.layer_shell.create_layer_surface(
            &qh,
            wl_surface,
            Layer::Overlay,
            Some("vblackboard"),
            None,
        );

        if self.screen.open_in_window {
            info!(
                "Opening {}x{} blackboard window",
                self.screen.width, self.screen.height
            );
            layer_surface.set_size(self.screen.width, self.screen.height);
        } else {
            info!("Opening fullscreen blackboard");
            layer_surface.set_anchor(Anchor::all());
            layer_surface.set_size(0, 0);
        }
        layer_surface.set_keyboard_interactivity(KeyboardInteractivity::Exclusive);
        layer_surface.set_exclusive_zone(-1);
        layer_surface.commit();

        state.surface.set_layer_surface(layer_surface);

        let mut consecutive_render_failures = 0u32;

        loop {
            if state.should_exit() {
                info!("Exit requested, breaking event loop");
                break;
            }

            event_queue
                .blocking_dispatch(&mut state)
                .context("Wayland event queue error")?;

            if let Some(err) = state.take_fatal() {
                return Err(err);
            }
            if state.should_exit() {
                info!("Exit requested after dispatch, breaking event loop");
                break;
            }

            // One frame in flight at a time; the frame callback re-arms rendering.
            let can_render = state.surface.is_configured()
                && state.needs_redraw()
                && !state.surface.frame_callback_pending();
            if !can_render {
                continue;
            }

            match state.render(&qh) {
                Ok(()) => {
                    consecutive_render_failures = 0;
                    state.surface.set_frame_callback_pending(true);
                }
                Err(e) => {
                    consecutive_render_failures += 1;
                    warn!(
                        "Rendering error (attempt {}/{}): {}",
                        consecutive_render_failures, MAX_RENDER_FAILURES, e
                    );
                    if consecutive_render_failures >= MAX_RENDER_FAILURES {
                        return Err(e.context(format!(
                            "Too many consecutive render failures ({})",
                            consecutive_render_failures
                        )));
                    }
                }
            }
        }

        info!("Wayland backend exiting");
        Ok(())
    }
}
