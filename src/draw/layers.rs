//! The visible and trace layers, and the merge that composites ink over slides.

use super::color::BACKGROUND;
use super::geometry::ScreenGeometry;
use super::pixel::BackgroundSignature;
use super::{Color, PixelBuffer, PixelFormat};
use crate::util::Rect;

/// Which layer(s) an erase applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Canvas area of the visible layer.
    Visible,
    /// The whole trace layer.
    Trace,
    Both,
}

/// Owns both layers of a blackboard.
///
/// The visible layer covers the full screen. The trace layer covers only the
/// canvas, so trace row `r` corresponds to screen row `r + menu_height`.
#[derive(Debug, Clone)]
pub struct LayerStore {
    visible: PixelBuffer,
    trace: PixelBuffer,
    menu_height: i32,
    signature: BackgroundSignature,
}

impl LayerStore {
    pub fn new(geometry: &ScreenGeometry, format: PixelFormat) -> Self {
        let width = geometry.width as usize;
        let visible = PixelBuffer::filled(width, geometry.height as usize, format, BACKGROUND);
        let trace = PixelBuffer::filled(
            width,
            geometry.canvas_height() as usize,
            format,
            BACKGROUND,
        );
        let signature = BackgroundSignature::capture(trace.pixel(0, 0).unwrap_or_default());
        Self {
            visible,
            trace,
            menu_height: geometry.menu_height,
            signature,
        }
    }

    pub fn visible(&self) -> &PixelBuffer {
        &self.visible
    }

    pub fn visible_mut(&mut self) -> &mut PixelBuffer {
        &mut self.visible
    }

    pub fn trace(&self) -> &PixelBuffer {
        &self.trace
    }

    pub fn signature(&self) -> &BackgroundSignature {
        &self.signature
    }

    /// Canvas area in screen coordinates.
    pub fn canvas_rect(&self) -> Rect {
        crate::util::rect(
            0,
            self.menu_height,
            self.visible.width() as i32,
            self.trace.height() as i32,
        )
    }

    /// Clears the given layer(s) to the background color.
    ///
    /// Clearing the visible layer leaves the menu strip untouched.
    pub fn clear(&mut self, layer: Layer) {
        if matches!(layer, Layer::Visible | Layer::Both) {
            let canvas = self.canvas_rect();
            self.visible.fill_rect(canvas, BACKGROUND);
        }
        if matches!(layer, Layer::Trace | Layer::Both) {
            self.trace.fill(BACKGROUND);
        }
    }

    /// Paints a square of ink into both layers. `square` is in screen
    /// coordinates; only its canvas part is painted. Returns the visible area
    /// that changed.
    pub fn stamp(&mut self, square: Rect, color: Color) -> Option<Rect> {
        self.trace
            .fill_rect(square.translate(0, -self.menu_height), color);
        let canvas = self.canvas_rect();
        self.visible.fill_rect(square.intersect(&canvas)?, color)
    }

    /// Places a slide page centered on the canvas, or clears the canvas when
    /// there is no page. Pages larger than the canvas are pinned to the
    /// top-left corner and clipped.
    pub fn show(&mut self, page: Option<&PixelBuffer>) -> Option<Rect> {
        let Some(page) = page else {
            self.clear(Layer::Visible);
            return Some(self.canvas_rect());
        };
        let (x, y) = self.page_origin(page.width() as i32, page.height() as i32);
        let canvas = self.canvas_rect();
        self.visible.blit(page, x, y, canvas)
    }

    /// Top-left screen position at which a `width × height` page is placed.
    pub fn page_origin(&self, width: i32, height: i32) -> (i32, i32) {
        let screen_width = self.visible.width() as i32;
        let screen_height = self.visible.height() as i32;
        let available = screen_height - self.menu_height - 1;
        let x = if width > screen_width {
            0
        } else {
            (screen_width - width) / 2
        };
        let y = if height > available {
            self.menu_height
        } else {
            self.menu_height + (available - height) / 2
        };
        (x, y)
    }

    /// Copies every non-background trace pixel onto the visible canvas.
    ///
    /// Pixels equal to the background signature are skipped, so merging twice
    /// in a row is the same as merging once.
    pub fn merge(&mut self) {
        let bpp = self.trace.format().bytes_per_pixel();
        let offset = self.menu_height as usize;

        for row in 0..self.trace.height() {
            let Some(src) = self.trace.row(row) else {
                continue;
            };
            let Some(dst) = self.visible.row_mut(row + offset) else {
                continue;
            };
            for (src_px, dst_px) in src.chunks_exact(bpp).zip(dst.chunks_exact_mut(bpp)) {
                if !self.signature.matches(src_px) {
                    dst_px.copy_from_slice(src_px);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED, WHITE};

    #[test]
    fn merge_works_on_xrgb_layers() {
        let geometry = ScreenGeometry::new(64, 48).unwrap();
        let mut layers = LayerStore::new(&geometry, PixelFormat::Xrgb8888);
        layers.stamp(Rect::new(5, 30, 2, 2).unwrap(), RED);
        layers.clear(Layer::Visible);
        layers.merge();
        assert_eq!(layers.visible().color_at(30, 5), Some(RED));
        assert_eq!(layers.visible().color_at(30, 8), Some(WHITE));
    }

    fn store() -> LayerStore {
        let geometry = ScreenGeometry::new(64, 48).unwrap();
        LayerStore::new(&geometry, PixelFormat::Argb8888)
    }

    #[test]
    fn trace_layer_excludes_menu_rows() {
        let layers = store();
        assert_eq!(layers.visible().height(), 48);
        assert_eq!(layers.trace().height(), 44);
        assert_eq!(layers.signature().len(), 4);
    }

    #[test]
    fn stamp_offsets_trace_rows_by_menu_height() {
        let mut layers = store();
        layers.stamp(Rect::new(10, 10, 2, 2).unwrap(), RED);
        assert_eq!(layers.visible().color_at(10, 10), Some(RED));
        assert_eq!(layers.trace().color_at(6, 10), Some(RED));
        assert_eq!(layers.trace().color_at(10, 10), Some(WHITE));
    }

    #[test]
    fn stamp_never_paints_menu_strip() {
        let mut layers = store();
        let changed = layers.stamp(Rect::new(0, 2, 4, 4).unwrap(), RED);
        assert_eq!(changed, Rect::new(0, 4, 4, 2));
        assert_eq!(layers.visible().color_at(3, 0), Some(WHITE));
        assert_eq!(layers.trace().color_at(0, 0), Some(RED));
    }

    #[test]
    fn merge_copies_ink_and_is_idempotent() {
        let mut layers = store();
        layers.stamp(Rect::new(20, 20, 3, 3).unwrap(), BLUE);
        layers.clear(Layer::Visible);
        assert_eq!(layers.visible().color_at(21, 21), Some(WHITE));

        layers.merge();
        let once = layers.visible().clone();
        assert_eq!(once.color_at(21, 21), Some(BLUE));
        layers.merge();
        assert_eq!(layers.visible(), &once);
    }

    #[test]
    fn merge_with_clean_trace_leaves_visible_unchanged() {
        let mut layers = store();
        let page = PixelBuffer::filled(8, 8, PixelFormat::Argb8888, RED);
        layers.show(Some(&page));
        let before = layers.visible().clone();
        layers.merge();
        assert_eq!(layers.visible(), &before);
    }

    #[test]
    fn show_centers_small_pages() {
        let mut layers = store();
        let page = PixelBuffer::filled(10, 10, PixelFormat::Argb8888, RED);
        let area = layers.show(Some(&page)).unwrap();
        // available = 48 - 4 - 1 = 43; y = 4 + (43 - 10) / 2 = 20
        assert_eq!(area, Rect::new(27, 20, 10, 10).unwrap());
    }

    #[test]
    fn show_pins_oversized_pages() {
        let mut layers = store();
        let page = PixelBuffer::filled(100, 100, PixelFormat::Argb8888, RED);
        let area = layers.show(Some(&page)).unwrap();
        assert_eq!(area, layers.canvas_rect());
        assert_eq!(layers.visible().color_at(3, 0), Some(WHITE));
    }

    #[test]
    fn show_without_page_clears_canvas() {
        let mut layers = store();
        layers.stamp(Rect::new(20, 20, 3, 3).unwrap(), BLUE);
        layers.show(None);
        assert_eq!(layers.visible().color_at(21, 21), Some(WHITE));
        assert_eq!(layers.trace().color_at(17, 21), Some(BLUE));
    }
}
