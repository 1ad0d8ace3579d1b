// Feeds pointer buttons and motion into the blackboard.
use log::{debug, trace};
use smithay_client_toolkit::seat::pointer::{PointerEvent, PointerEventKind, PointerHandler};
use wayland_client::{Connection, QueueHandle, protocol::wl_pointer};

use vblackboard::input::InputEvent;

use super::super::state::WaylandState;

impl PointerHandler for WaylandState {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _pointer: &wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        for event in events {
            let x = event.position.0 as i32;
            let y = event.position.1 as i32;
            match event.kind {
                PointerEventKind::Enter { .. } => {
                    debug!("Pointer entered at ({}, {})", x, y);
                }
                PointerEventKind::Leave { .. } => {
                    debug!("Pointer left surface");
                }
                PointerEventKind::Motion { .. } => {
                    trace!("Pointer motion ({}, {})", x, y);
                    self.dispatch(InputEvent::Motion { x, y });
                }
                PointerEventKind::Press { button, .. } => {
                    debug!("Button {} pressed at ({}, {})", button, x, y);
                    self.dispatch(InputEvent::ButtonPress { x, y });
                }
                PointerEventKind::Release { button, .. } => {
                    debug!("Button {} released at ({}, {})", button, x, y);
                    self.dispatch(InputEvent::ButtonRelease { x, y });
                }
                PointerEventKind::Axis { .. } => {}
            }
        }
    }
}
