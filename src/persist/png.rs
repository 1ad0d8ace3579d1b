//! PNG output through Cairo's encoder.

use cairo::{Format, ImageSurface};
use std::io::Write;

use super::{CanvasWriter, PersistError};
use crate::draw::PixelBuffer;

#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

fn encode_err(err: impl std::fmt::Display) -> PersistError {
    PersistError::Encode(err.to_string())
}

impl CanvasWriter for PngWriter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn encode(
        &self,
        out: &mut dyn Write,
        canvas: &PixelBuffer,
        top_row: usize,
    ) -> Result<(), PersistError> {
        let width = canvas.width() as i32;
        let height = canvas.height().saturating_sub(top_row) as i32;
        let mut surface = ImageSurface::create(Format::Rgb24, width, height).map_err(encode_err)?;
        let stride = surface.stride() as usize;
        {
            let mut data = surface.data().map_err(encode_err)?;
            let format = canvas.format();
            let bpp = format.bytes_per_pixel();
            for (out_row, row) in (top_row..canvas.height()).enumerate() {
                let Some(pixels) = canvas.row(row) else {
                    continue;
                };
                for (col, px) in pixels.chunks_exact(bpp).enumerate() {
                    let color = format.decode(px);
                    let xrgb = (u32::from(color.r) << 16) | (u32::from(color.g) << 8) | u32::from(color.b);
                    let start = out_row * stride + col * 4;
                    if let Some(dst) = data.get_mut(start..start + 4) {
                        dst.copy_from_slice(&xrgb.to_ne_bytes());
                    }
                }
            }
        }
        surface.mark_dirty();

        let mut stream = out;
        surface.write_to_png(&mut stream).map_err(encode_err)?;
        Ok(())
    }
}
