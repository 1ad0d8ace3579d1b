// Layer-shell configure/close: the first sized configure builds the blackboard.
use log::{debug, info};
use smithay_client_toolkit::shell::wlr_layer::{
    LayerShellHandler, LayerSurface, LayerSurfaceConfigure,
};
use wayland_client::{Connection, QueueHandle};

use super::super::state::WaylandState;

impl LayerShellHandler for WaylandState {
    fn closed(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _layer: &LayerSurface) {
        info!("Layer surface closed by compositor");
        self.closed = true;
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _layer: &LayerSurface,
        configure: LayerSurfaceConfigure,
        _serial: u32,
    ) {
        let (width, height) = configure.new_size;
        debug!("Layer surface configure: {}x{}", width, height);

        if self.surface.fix_size(width, height) {
            info!("Blackboard surface is {}x{}", width, height);
            self.ensure_board();
        } else if !self.surface.is_configured() {
            debug!("Waiting for a configure that carries a size");
        }
    }
}
