//! Layer-surface bookkeeping and the shared-memory pool frames are copied into.

use anyhow::{Context, Result};
use log::info;
use smithay_client_toolkit::{
    shell::wlr_layer::LayerSurface,
    shm::{Shm, slot::SlotPool},
};

/// The blackboard's layer surface and the pool its frames live in.
///
/// The size is fixed by the first configure that carries one; the pool is
/// sized for that and the negotiated pixel depth.
pub struct SurfaceState {
    layer_surface: Option<LayerSurface>,
    pool: Option<SlotPool>,
    size: Option<(u32, u32)>,
    bytes_per_pixel: usize,
    frame_callback_pending: bool,
}

impl SurfaceState {
    pub fn new() -> Self {
        Self {
            layer_surface: None,
            pool: None,
            size: None,
            bytes_per_pixel: 4,
            frame_callback_pending: false,
        }
    }

    pub fn set_layer_surface(&mut self, surface: LayerSurface) {
        self.layer_surface = Some(surface);
    }

    pub fn layer_surface(&self) -> Option<&LayerSurface> {
        self.layer_surface.as_ref()
    }

    /// Records the surface size unless one is already set. Returns whether
    /// the size was taken.
    pub fn fix_size(&mut self, width: u32, height: u32) -> bool {
        if self.size.is_some() || width == 0 || height == 0 {
            return false;
        }
        self.size = Some((width, height));
        self.pool = None;
        true
    }

    /// Size in pixels; `(0, 0)` before the first sized configure.
    pub fn size(&self) -> (u32, u32) {
        self.size.unwrap_or((0, 0))
    }

    pub fn is_configured(&self) -> bool {
        self.size.is_some()
    }

    pub fn set_bytes_per_pixel(&mut self, bytes: usize) {
        if self.bytes_per_pixel != bytes {
            self.bytes_per_pixel = bytes;
            self.pool = None;
        }
    }

    pub fn set_frame_callback_pending(&mut self, pending: bool) {
        self.frame_callback_pending = pending;
    }

    pub fn frame_callback_pending(&self) -> bool {
        self.frame_callback_pending
    }

    /// Pool holding `frames` buffers of the current size, created on first use.
    pub fn pool(&mut self, shm: &Shm, frames: usize) -> Result<&mut SlotPool> {
        if self.pool.is_none() {
            let (width, height) = self.size();
            let bytes = width as usize * height as usize * self.bytes_per_pixel * frames;
            info!(
                "Creating SlotPool for {}x{} ({} bytes, {} frames)",
                width, height, bytes, frames
            );
            self.pool = Some(SlotPool::new(bytes, shm).context("Failed to create slot pool")?);
        }
        self.pool.as_mut().context("Slot pool missing after creation")
    }
}
