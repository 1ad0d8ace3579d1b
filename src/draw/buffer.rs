//! Bounds-checked two-dimensional pixel storage.

use super::{Color, PixelFormat};
use crate::util::Rect;

/// A packed `width × height` pixel grid in a fixed [`PixelFormat`].
///
/// Rows are stored top to bottom with no padding. Every accessor is
/// bounds-checked; out-of-range reads return `None` and writes are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a zero-filled buffer.
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![0; width * height * format.bytes_per_pixel()],
        }
    }

    /// Creates a buffer with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, format: PixelFormat, color: Color) -> Self {
        let mut buffer = Self::new(width, height, format);
        buffer.fill(color);
        buffer
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width * self.format.bytes_per_pixel()
    }

    /// Raw pixel bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Full rectangle covered by the buffer.
    pub fn bounds(&self) -> Rect {
        crate::util::rect(0, 0, self.width as i32, self.height as i32)
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.height && col < self.width {
            Some(row * self.stride() + col * self.format.bytes_per_pixel())
        } else {
            None
        }
    }

    /// Bytes of one row.
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.height {
            return None;
        }
        let stride = self.stride();
        self.data.get(row * stride..(row + 1) * stride)
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> Option<&mut [u8]> {
        if row >= self.height {
            return None;
        }
        let stride = self.stride();
        self.data.get_mut(row * stride..(row + 1) * stride)
    }

    /// Bytes of the pixel at (`row`, `col`).
    pub fn pixel(&self, row: usize, col: usize) -> Option<&[u8]> {
        let start = self.offset(row, col)?;
        self.data.get(start..start + self.format.bytes_per_pixel())
    }

    /// Decoded color of the pixel at (`row`, `col`).
    pub fn color_at(&self, row: usize, col: usize) -> Option<Color> {
        self.pixel(row, col).map(|px| self.format.decode(px))
    }

    /// Writes one pixel; returns false when out of bounds.
    pub fn set_pixel(&mut self, row: usize, col: usize, color: Color) -> bool {
        let bpp = self.format.bytes_per_pixel();
        let encoded = self.format.encode(color);
        match self.offset(row, col) {
            Some(start) => {
                self.data[start..start + bpp].copy_from_slice(encoded.as_slice());
                true
            }
            None => false,
        }
    }

    /// Sets every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        let encoded = self.format.encode(color);
        for px in self.data.chunks_exact_mut(self.format.bytes_per_pixel()) {
            px.copy_from_slice(encoded.as_slice());
        }
    }

    /// Fills `rect` clipped to the buffer. Returns the area actually painted.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> Option<Rect> {
        let clipped = rect.clamp_to_bounds(self.width as i32, self.height as i32)?;
        let bpp = self.format.bytes_per_pixel();
        let encoded = self.format.encode(color);
        let start = clipped.x as usize * bpp;
        let end = clipped.right() as usize * bpp;
        for row in clipped.y..clipped.bottom() {
            if let Some(line) = self.row_mut(row as usize) {
                for px in line[start..end].chunks_exact_mut(bpp) {
                    px.copy_from_slice(encoded.as_slice());
                }
            }
        }
        Some(clipped)
    }

    /// Copies `src` with its top-left corner at (`x`, `y`), clipped to `clip`
    /// and to this buffer. Returns the area written.
    pub fn blit(&mut self, src: &PixelBuffer, x: i32, y: i32, clip: Rect) -> Option<Rect> {
        let placed = crate::util::rect(x, y, src.width as i32, src.height as i32);
        let area = placed
            .intersect(&clip)?
            .clamp_to_bounds(self.width as i32, self.height as i32)?;
        let bpp = self.format.bytes_per_pixel();
        let same_format = src.format == self.format;

        for row in area.y..area.bottom() {
            let src_row = (row - y) as usize;
            let src_col = (area.x - x) as usize;
            let count = area.width as usize;
            let Some(src_line) = src.row(src_row) else {
                continue;
            };
            let src_bpp = src.format.bytes_per_pixel();
            let src_slice = &src_line[src_col * src_bpp..(src_col + count) * src_bpp];
            let format = self.format;
            let Some(dst_line) = self.row_mut(row as usize) else {
                continue;
            };
            let dst_slice = &mut dst_line[area.x as usize * bpp..area.right() as usize * bpp];
            if same_format {
                dst_slice.copy_from_slice(src_slice);
            } else {
                for (dst, src_px) in dst_slice
                    .chunks_exact_mut(bpp)
                    .zip(src_slice.chunks_exact(src_bpp))
                {
                    let color = src.format.decode(src_px);
                    dst.copy_from_slice(format.encode(color).as_slice());
                }
            }
        }
        Some(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};

    #[test]
    fn accessors_reject_out_of_range() {
        let buffer = PixelBuffer::new(4, 3, PixelFormat::Argb8888);
        assert!(buffer.pixel(2, 3).is_some());
        assert!(buffer.pixel(3, 0).is_none());
        assert!(buffer.pixel(0, 4).is_none());
        assert_eq!(buffer.pixel(0, 0).map(<[u8]>::len), Some(4));
        assert!(buffer.row(3).is_none());
    }

    #[test]
    fn fill_rect_clips_to_buffer() {
        let mut buffer = PixelBuffer::filled(10, 10, PixelFormat::Argb8888, WHITE);
        let painted = buffer.fill_rect(Rect::new(-2, 8, 5, 5).unwrap(), RED);
        assert_eq!(painted, Rect::new(0, 8, 3, 2));
        assert_eq!(buffer.color_at(9, 2), Some(RED));
        assert_eq!(buffer.color_at(9, 3), Some(WHITE));
        assert_eq!(buffer.color_at(7, 0), Some(WHITE));
    }

    #[test]
    fn fill_rect_outside_is_noop() {
        let mut buffer = PixelBuffer::filled(4, 4, PixelFormat::Xrgb8888, WHITE);
        let before = buffer.clone();
        assert!(buffer.fill_rect(Rect::new(10, 10, 2, 2).unwrap(), RED).is_none());
        assert_eq!(buffer, before);
    }

    #[test]
    fn blit_converts_between_formats() {
        let src = PixelBuffer::filled(2, 2, PixelFormat::Argb8888, BLACK);
        let mut dst = PixelBuffer::filled(4, 4, PixelFormat::Xrgb8888, WHITE);
        let area = dst.blit(&src, 3, 3, dst.bounds());
        assert_eq!(area, Rect::new(3, 3, 1, 1));
        assert_eq!(dst.color_at(3, 3), Some(BLACK));
        assert_eq!(dst.color_at(2, 2), Some(WHITE));
    }

    #[test]
    fn blit_respects_clip_rect() {
        let src = PixelBuffer::filled(4, 4, PixelFormat::Argb8888, RED);
        let mut dst = PixelBuffer::filled(4, 4, PixelFormat::Argb8888, WHITE);
        dst.blit(&src, 0, 0, Rect::new(0, 2, 4, 2).unwrap());
        assert_eq!(dst.color_at(1, 1), Some(WHITE));
        assert_eq!(dst.color_at(2, 1), Some(RED));
    }
}
