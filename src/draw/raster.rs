//! Segment rasterization into both layers.

use super::dirty::DirtyTracker;
use super::layers::LayerStore;
use super::pen::Pen;
use crate::util::rect;

/// Segments shorter than this (in `|dx| + |dy|`) are dropped.
pub const MIN_LINE_DISTANCE: i32 = 4;

/// Draws from the pen's last point to (`x1`, `y1`) with the active size and
/// color, into both layers.
///
/// Uses integer Bresenham stepping along the major axis; one square is stamped
/// per step, for `max(|dx|, |dy|)` steps, and each stamp is marked dirty.
/// Returns false when the segment was too short, in which case the last point
/// is left where it was so short motions accumulate.
pub fn draw_segment(
    layers: &mut LayerStore,
    pen: &mut Pen,
    x1: i32,
    y1: i32,
    dirty: &mut DirtyTracker,
) -> bool {
    let (x0, y0) = pen.last_point;
    let mut dx = (x1 - x0).abs();
    let mut dy = (y1 - y0).abs();
    if dx + dy < MIN_LINE_DISTANCE {
        return false;
    }

    let mut step_x = if x1 > x0 { 1 } else { -1 };
    let mut step_y = if y1 > y0 { 1 } else { -1 };
    let (mut major, mut minor) = (x0, y0);
    let steep = dy > dx;
    if steep {
        std::mem::swap(&mut major, &mut minor);
        std::mem::swap(&mut dx, &mut dy);
        std::mem::swap(&mut step_x, &mut step_y);
    }

    let size = pen.active_size() as i32;
    let half = size / 2;
    let color = pen.active_color();
    let mut error = 2 * dy - dx;

    for _ in 0..dx {
        let (x, y) = if steep { (minor, major) } else { (major, minor) };
        let square = rect(x - half, y - half, size, size);
        dirty.mark_optional_rect(layers.stamp(square, color));
        while error >= 0 {
            minor += step_y;
            error -= 2 * dx;
        }
        major += step_x;
        error += 2 * dy;
    }

    pen.last_point = (x1, y1);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, WHITE};
    use crate::draw::geometry::ScreenGeometry;
    use crate::draw::PixelFormat;

    fn setup() -> (LayerStore, Pen, DirtyTracker) {
        let geometry = ScreenGeometry::new(200, 150).unwrap();
        (
            LayerStore::new(&geometry, PixelFormat::Argb8888),
            Pen::new(1, 3, 3),
            DirtyTracker::new(),
        )
    }

    #[test]
    fn short_segments_keep_last_point() {
        let (mut layers, mut pen, mut dirty) = setup();
        pen.last_point = (50, 50);
        let before = layers.trace().clone();
        assert!(!draw_segment(&mut layers, &mut pen, 52, 51, &mut dirty));
        assert_eq!(pen.last_point, (50, 50));
        assert_eq!(layers.trace(), &before);
        assert!(!dirty.is_dirty());

        // Accumulated motion eventually crosses the threshold.
        assert!(draw_segment(&mut layers, &mut pen, 53, 51, &mut dirty));
        assert_eq!(pen.last_point, (53, 51));
    }

    #[test]
    fn same_point_is_a_noop() {
        let (mut layers, mut pen, mut dirty) = setup();
        pen.last_point = (40, 40);
        assert!(!draw_segment(&mut layers, &mut pen, 40, 40, &mut dirty));
    }

    #[test]
    fn horizontal_segment_stamps_each_step_but_not_endpoint() {
        let (mut layers, mut pen, mut dirty) = setup();
        pen.last_point = (10, 50);
        assert!(draw_segment(&mut layers, &mut pen, 20, 50, &mut dirty));
        let visible = layers.visible();
        for x in 10..20 {
            assert_eq!(visible.color_at(50, x), Some(BLACK), "x={x}");
        }
        assert_eq!(visible.color_at(50, 20), Some(WHITE));
        // Trace mirrors the canvas, shifted by the menu height.
        assert_eq!(layers.trace().color_at(50 - 15, 12), Some(BLACK));
        assert_eq!(dirty.take_regions(200, 150).len(), 10);
    }

    #[test]
    fn steep_segment_walks_the_y_axis() {
        let (mut layers, mut pen, mut dirty) = setup();
        pen.last_point = (30, 100);
        assert!(draw_segment(&mut layers, &mut pen, 33, 40, &mut dirty));
        let visible = layers.visible();
        let painted_rows = (40..=100)
            .filter(|&y| (29..=34).any(|x| visible.color_at(y, x) == Some(BLACK)))
            .count();
        assert_eq!(painted_rows, 60);
    }

    #[test]
    fn eraser_restores_background() {
        let (mut layers, mut pen, mut dirty) = setup();
        pen.stroke_width = 4;
        pen.last_point = (60, 80);
        draw_segment(&mut layers, &mut pen, 90, 80, &mut dirty);
        assert_eq!(layers.visible().color_at(80, 70), Some(BLACK));

        pen.toggle_mode();
        pen.last_point = (60, 80);
        draw_segment(&mut layers, &mut pen, 90, 80, &mut dirty);
        assert_eq!(layers.visible().color_at(80, 70), Some(WHITE));
        assert_eq!(layers.trace().color_at(80 - 15, 70), Some(WHITE));
    }
}
