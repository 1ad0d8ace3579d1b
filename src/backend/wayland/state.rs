// Holds the live Wayland protocol state shared by the backend loop and the handler
// submodules; owns the blackboard once the surface size is known and presents it.
use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use smithay_client_toolkit::{
    compositor::CompositorState, output::OutputState, registry::RegistryState, seat::SeatState,
    shell::{WaylandSurface, wlr_layer::LayerShell}, shm::Shm,
};
use std::path::PathBuf;
use wayland_client::{
    QueueHandle,
    protocol::{wl_keyboard, wl_pointer, wl_shm},
};

use vblackboard::{
    Blackboard,
    config::Strings,
    draw::{FormatError, Pen, PixelFormat, ScreenGeometry},
    input::{Collaborators, InputEvent},
    util::Rect,
};

use super::surface::SurfaceState;

/// Everything needed to build the blackboard once the compositor has sized
/// the surface.
pub struct BoardSetup {
    pub strings: Strings,
    pub pen: Pen,
    pub save_directory: PathBuf,
    pub collaborators: Collaborators,
}

/// Internal Wayland state shared across modules.
pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) layer_shell: LayerShell,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    // Surface and buffer management
    pub(super) surface: SurfaceState,
    pub(super) keyboard: Option<wl_keyboard::WlKeyboard>,
    pub(super) pointer: Option<wl_pointer::WlPointer>,

    setup: Option<BoardSetup>,
    board: Option<Blackboard>,
    pub(super) closed: bool,
    fatal: Option<anyhow::Error>,
}

impl WaylandState {
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        layer_shell: LayerShell,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        setup: BoardSetup,
    ) -> Self {
        Self {
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            surface: SurfaceState::new(),
            keyboard: None,
            pointer: None,
            setup: Some(setup),
            board: None,
            closed: false,
            fatal: None,
        }
    }

    pub(super) fn should_exit(&self) -> bool {
        self.closed || self.board.as_ref().is_some_and(|board| board.should_exit)
    }

    pub(super) fn needs_redraw(&self) -> bool {
        self.board.as_ref().is_some_and(|board| board.needs_redraw)
    }

    /// Error that must end the event loop, if one occurred in a handler.
    pub(super) fn take_fatal(&mut self) -> Option<anyhow::Error> {
        self.fatal.take()
    }

    /// Forwards an input event to the blackboard; ignored before the first configure.
    pub(super) fn dispatch(&mut self, event: InputEvent) {
        if let Some(board) = self.board.as_mut() {
            board.handle_event(event);
        }
    }

    /// Builds the blackboard for the configured surface size. Later configures
    /// keep the original geometry; the buffer size stays what was first drawn.
    pub(super) fn ensure_board(&mut self) {
        if self.board.is_some() {
            return;
        }
        if let Err(err) = self.create_board() {
            self.fatal = Some(err);
        }
    }

    fn create_board(&mut self) -> Result<()> {
        let (width, height) = self.surface.size();
        let format = select_format(self.shm.formats())?;
        let geometry = ScreenGeometry::new(width as i32, height as i32)
            .with_context(|| format!("Surface {}x{} is too small", width, height))?;
        let setup = self
            .setup
            .take()
            .ok_or_else(|| anyhow!("Blackboard setup already consumed"))?;

        info!(
            "Blackboard {}x{} (menu strip {}px, {:?})",
            geometry.width, geometry.height, geometry.menu_height, format
        );
        let mut board = Blackboard::new(
            geometry,
            format,
            &setup.strings,
            setup.pen,
            setup.save_directory,
            setup.collaborators,
        );
        board.prepare();
        self.surface.set_bytes_per_pixel(format.bytes_per_pixel());
        self.board = Some(board);
        Ok(())
    }

    /// Copies the visible layer into a fresh shm buffer and damages what changed.
    pub(super) fn render(&mut self, qh: &QueueHandle<Self>) -> Result<()> {
        debug!("=== RENDER START ===");
        let board = self.board.as_mut().context("Blackboard not created")?;
        let visible = board.visible();
        let width = visible.width() as i32;
        let height = visible.height() as i32;
        let stride = visible.stride() as i32;
        let format = shm_format(visible.format());

        let (buffer, canvas) = {
            let pool = self.surface.pool(&self.shm, 2)?;
            pool.create_buffer(width, height, stride, format)
                .context("Failed to create buffer")?
        };
        if canvas.len() != visible.data().len() {
            return Err(anyhow!(
                "Buffer holds {} bytes, blackboard has {}",
                canvas.len(),
                visible.data().len()
            ));
        }
        canvas.copy_from_slice(visible.data());

        let wl_surface = self
            .surface
            .layer_surface()
            .context("Layer surface not created")?
            .wl_surface();
        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);

        for rect in resolve_damage_regions(width, height, board.take_dirty_regions()) {
            debug!(
                "Damaging buffer region x={} y={} w={} h={}",
                rect.x, rect.y, rect.width, rect.height
            );
            wl_surface.damage_buffer(rect.x, rect.y, rect.width, rect.height);
        }

        wl_surface.frame(qh, wl_surface.clone());
        wl_surface.commit();
        debug!("=== RENDER COMPLETE ===");
        Ok(())
    }
}

/// Picks the blackboard's pixel layout from the formats the compositor
/// offers, preferring `Argb8888` over `Xrgb8888`.
fn select_format(offered: &[wl_shm::Format]) -> Result<PixelFormat, FormatError> {
    if offered.contains(&wl_shm::Format::Argb8888) {
        Ok(PixelFormat::Argb8888)
    } else if offered.contains(&wl_shm::Format::Xrgb8888) {
        Ok(PixelFormat::Xrgb8888)
    } else {
        Err(FormatError::Unsupported {
            offered: format!("{:?}", offered),
        })
    }
}

fn shm_format(format: PixelFormat) -> wl_shm::Format {
    match format {
        PixelFormat::Argb8888 => wl_shm::Format::Argb8888,
        PixelFormat::Xrgb8888 => wl_shm::Format::Xrgb8888,
    }
}

fn resolve_damage_regions(width: i32, height: i32, mut regions: Vec<Rect>) -> Vec<Rect> {
    regions.retain(Rect::is_valid);

    if regions.is_empty()
        && let Some(full) = Rect::new(0, 0, width, height)
    {
        regions.push(full);
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_is_selected_when_offered() {
        let offered = [wl_shm::Format::Xrgb8888, wl_shm::Format::Argb8888];
        assert_eq!(select_format(&offered).unwrap(), PixelFormat::Argb8888);
    }

    #[test]
    fn xrgb_is_the_fallback() {
        let offered = [wl_shm::Format::Rgb565, wl_shm::Format::Xrgb8888];
        let format = select_format(&offered).unwrap();
        assert_eq!(format, PixelFormat::Xrgb8888);
        assert_eq!(shm_format(format), wl_shm::Format::Xrgb8888);
    }

    #[test]
    fn missing_32bit_formats_are_a_format_error() {
        let err = select_format(&[wl_shm::Format::Rgb565]).unwrap_err();
        assert!(err.to_string().contains("Rgb565"));
    }

    #[test]
    fn resolve_damage_returns_full_when_empty() {
        let regions = resolve_damage_regions(1024, 576, Vec::new());
        assert_eq!(regions, vec![Rect::new(0, 0, 1024, 576).unwrap()]);
    }

    #[test]
    fn resolve_damage_filters_invalid_rects() {
        let regions = resolve_damage_regions(
            800,
            600,
            vec![
                Rect {
                    x: 10,
                    y: 10,
                    width: 50,
                    height: 40,
                },
                Rect {
                    x: 0,
                    y: 0,
                    width: 0,
                    height: 10,
                },
            ],
        );

        assert_eq!(regions, vec![Rect::new(10, 10, 50, 40).unwrap()]);
    }
}
