//! Blackboard state and event dispatch.

use log::{debug, trace};
use std::path::PathBuf;

use super::confirm::ConfirmBox;
use super::palette::PaletteSelector;
use crate::config::{AcceleratorTable, MenuLabel, SaveMessages, Strings};
use crate::draw::{
    DirtyTracker, LayerStore, PaletteGeometry, Pen, PixelBuffer, PixelFormat, ScreenGeometry,
    TextRenderer,
};
use crate::input::events::InputEvent;
use crate::input::router::MenuLayout;
use crate::persist::{CanvasWriter, SaveTarget};
use crate::slides::SlideSource;
use crate::util::Rect;

/// Interactions that take over input until dismissed.
///
/// While a modal is open, every event it does not accept is dropped.
#[derive(Debug, Clone)]
pub enum Modal {
    /// Startup image; any key or button dismisses it.
    Splash,
    /// Line-characteristics panel; left only through its OK button.
    Palette(PaletteSelector),
    /// Save result message; left only through its OK button.
    Confirm(ConfirmBox),
}

impl Modal {
    /// Whether this modal consumes `event`.
    pub fn accepts(&self, event: &InputEvent) -> bool {
        match self {
            Modal::Splash => matches!(
                event,
                InputEvent::ButtonPress { .. } | InputEvent::KeyPress(_)
            ),
            Modal::Palette(_) | Modal::Confirm(_) => {
                matches!(event, InputEvent::ButtonPress { .. })
            }
        }
    }
}

/// External services the blackboard drives.
pub struct Collaborators {
    pub slides: Box<dyn SlideSource>,
    pub writer: Box<dyn CanvasWriter>,
    pub text: Box<dyn TextRenderer>,
}

/// The interactive blackboard: layers, pen, menu and modal state.
///
/// The backend feeds it [`InputEvent`]s through [`Blackboard::handle_event`],
/// presents [`Blackboard::visible`] and pushes the rectangles returned by
/// [`Blackboard::take_dirty_regions`] to the screen.
pub struct Blackboard {
    /// Current pen characteristics and stroke progress
    pub pen: Pen,
    /// Set when Quit has been executed
    pub should_exit: bool,
    /// Whether anything was drawn since the last presentation
    pub needs_redraw: bool,
    pub(crate) geometry: ScreenGeometry,
    pub(crate) menu: MenuLayout,
    pub(crate) palette: PaletteGeometry,
    pub(crate) layers: LayerStore,
    pub(crate) labels: Vec<MenuLabel>,
    pub(crate) accelerators: AcceleratorTable,
    pub(crate) save_messages: SaveMessages,
    pub(crate) save_target: SaveTarget,
    pub(crate) modal: Option<Modal>,
    pub(crate) slides: Box<dyn SlideSource>,
    pub(crate) writer: Box<dyn CanvasWriter>,
    pub(crate) text: Box<dyn TextRenderer>,
    pub(crate) dirty_tracker: DirtyTracker,
}

impl Blackboard {
    /// Creates a blackboard for a screen of the given geometry.
    ///
    /// Nothing is painted until [`Blackboard::prepare`] runs.
    pub fn new(
        geometry: ScreenGeometry,
        format: PixelFormat,
        strings: &Strings,
        pen: Pen,
        save_directory: PathBuf,
        collaborators: Collaborators,
    ) -> Self {
        let Collaborators {
            mut slides,
            writer,
            text,
        } = collaborators;
        slides.fit_to(geometry.width, geometry.canvas_height());

        Self {
            pen,
            should_exit: false,
            needs_redraw: false,
            geometry,
            menu: MenuLayout::new(&geometry, strings.labels().len()),
            palette: PaletteGeometry::new(&geometry),
            layers: LayerStore::new(&geometry, format),
            labels: strings.labels().to_vec(),
            accelerators: strings.accelerators().clone(),
            save_messages: strings.save_messages().clone(),
            save_target: SaveTarget::new(save_directory),
            modal: None,
            slides,
            writer,
            text,
            dirty_tracker: DirtyTracker::new(),
        }
    }

    pub fn geometry(&self) -> &ScreenGeometry {
        &self.geometry
    }

    /// The full-screen buffer that is presented.
    pub fn visible(&self) -> &PixelBuffer {
        self.layers.visible()
    }

    /// The ink-only layer below the menu strip.
    pub fn trace(&self) -> &PixelBuffer {
        self.layers.trace()
    }

    pub fn menu(&self) -> &MenuLayout {
        &self.menu
    }

    pub fn palette_geometry(&self) -> &PaletteGeometry {
        &self.palette
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn save_target(&self) -> &SaveTarget {
        &self.save_target
    }

    pub fn slides(&self) -> &dyn SlideSource {
        self.slides.as_ref()
    }

    /// Paints the splash if the slide source has one, otherwise the menu and
    /// the first page.
    pub fn prepare(&mut self) {
        let splash = self.slides.splash();
        if let Some(image) = splash {
            let x = (self.geometry.width - image.width() as i32) / 2;
            let y = (self.geometry.height - image.height() as i32) / 2;
            let screen = self.geometry.screen_rect();
            self.layers.visible_mut().blit(&image, x, y, screen);
            self.modal = Some(Modal::Splash);
            debug!("Showing splash {}x{}", image.width(), image.height());
            self.mark_full_damage();
            return;
        }
        self.paint_menu();
        self.recomposite();
    }

    /// Routes one input event, honoring the active modal's filter.
    pub fn handle_event(&mut self, event: InputEvent) {
        if let Some(modal) = &self.modal {
            if !modal.accepts(&event) {
                trace!("Modal dropped {:?}", event);
                return;
            }
            self.on_modal_event(event);
            return;
        }
        match event {
            InputEvent::ButtonPress { x, y } => self.on_button_press(x, y),
            InputEvent::ButtonRelease { x, y } => self.on_button_release(x, y),
            InputEvent::Motion { x, y } => self.on_motion(x, y),
            InputEvent::KeyPress(key) => self.on_key_press(key),
        }
    }

    /// Redraws the canvas from scratch: clear, current page, then ink.
    pub(crate) fn recomposite(&mut self) {
        let page = self.slides.current_page();
        self.layers.show(None);
        if page.is_some() {
            self.layers.show(page);
        }
        self.layers.merge();
        let canvas = self.layers.canvas_rect();
        self.mark_damage(canvas);
    }

    /// Drains the areas changed since the last call.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        self.needs_redraw = false;
        self.dirty_tracker
            .take_regions(self.geometry.width, self.geometry.height)
    }

    pub(crate) fn mark_damage(&mut self, rect: Rect) {
        self.dirty_tracker.mark_rect(rect);
        self.needs_redraw = true;
    }

    pub(crate) fn mark_full_damage(&mut self) {
        self.dirty_tracker.mark_full();
        self.needs_redraw = true;
    }
}
