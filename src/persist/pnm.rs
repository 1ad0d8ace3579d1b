//! Binary portable pixmap (P6) output.

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder, ImageError, Rgb, RgbImage};
use std::io::Write;

use super::{CanvasWriter, PersistError};
use crate::draw::PixelBuffer;
use crate::draw::color::BACKGROUND;

/// Writes 8-bit RGB `P6` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PnmWriter;

/// Rows `top_row..` of `canvas` as an RGB image.
fn canvas_image(canvas: &PixelBuffer, top_row: usize) -> RgbImage {
    let height = canvas.height().saturating_sub(top_row);
    RgbImage::from_fn(canvas.width() as u32, height as u32, |x, y| {
        let color = canvas
            .color_at(top_row + y as usize, x as usize)
            .unwrap_or(BACKGROUND);
        Rgb([color.r, color.g, color.b])
    })
}

impl CanvasWriter for PnmWriter {
    fn extension(&self) -> &'static str {
        "pnm"
    }

    fn encode(
        &self,
        out: &mut dyn Write,
        canvas: &PixelBuffer,
        top_row: usize,
    ) -> Result<(), PersistError> {
        let image = canvas_image(canvas, top_row);
        PnmEncoder::new(out)
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|err| match err {
                ImageError::IoError(io) => PersistError::Io(io),
                other => PersistError::Encode(other.to_string()),
            })
    }
}
