//! Pixel format descriptors and the background signature used by merge.

use thiserror::Error;

use super::Color;

/// Largest pixel size supported by [`PixelFormat`].
pub const MAX_BYTES_PER_PIXEL: usize = 4;

/// The display offers no pixel layout the blackboard can render into.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error(
        "no supported shm pixel format (Argb8888 or Xrgb8888 required, compositor offers {offered})"
    )]
    Unsupported { offered: String },
}

/// Memory layout of a single pixel.
///
/// Layouts follow the `wl_shm` conventions: both formats are stored
/// little-endian, so `Argb8888` lands in memory as `B G R A`. `Xrgb8888`
/// ignores its fourth byte; the blackboard writes it as `0xff` either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Argb8888,
    Xrgb8888,
}

impl PixelFormat {
    /// Number of bytes one pixel occupies.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Argb8888 | PixelFormat::Xrgb8888 => 4,
        }
    }

    /// Encodes an opaque color into its in-memory representation.
    pub fn encode(self, color: Color) -> PixelBytes {
        let bytes = match self {
            PixelFormat::Argb8888 | PixelFormat::Xrgb8888 => [color.b, color.g, color.r, 0xff],
        };
        PixelBytes {
            bytes,
            len: self.bytes_per_pixel(),
        }
    }

    /// Decodes one pixel. `pixel` must hold at least [`Self::bytes_per_pixel`] bytes.
    pub fn decode(self, pixel: &[u8]) -> Color {
        match self {
            PixelFormat::Argb8888 | PixelFormat::Xrgb8888 => Color::rgb(pixel[2], pixel[1], pixel[0]),
        }
    }
}

/// An encoded pixel, exactly `len` bytes long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBytes {
    bytes: [u8; MAX_BYTES_PER_PIXEL],
    len: usize,
}

impl PixelBytes {
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Byte pattern of the trace layer's background pixel.
///
/// Captured once after the trace layer is first cleared. Any trace pixel whose
/// bytes differ from the signature counts as ink during merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundSignature(PixelBytes);

impl BackgroundSignature {
    /// Captures the signature from a pixel's raw bytes.
    pub fn capture(pixel: &[u8]) -> Self {
        let len = pixel.len().min(MAX_BYTES_PER_PIXEL);
        let mut bytes = [0u8; MAX_BYTES_PER_PIXEL];
        bytes[..len].copy_from_slice(&pixel[..len]);
        Self(PixelBytes { bytes, len })
    }

    /// True when `pixel` is byte-for-byte the background.
    pub fn matches(&self, pixel: &[u8]) -> bool {
        self.0.as_slice() == pixel
    }

    pub fn len(&self) -> usize {
        self.0.len
    }

    pub fn is_empty(&self) -> bool {
        self.0.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{ORANGE, PALE_BLUE, WHITE};

    #[test]
    fn argb_is_stored_little_endian() {
        let px = PixelFormat::Argb8888.encode(Color::rgb(1, 2, 3));
        assert_eq!(px.as_slice(), &[3, 2, 1, 0xff]);
        assert_eq!(PixelFormat::Argb8888.decode(px.as_slice()), Color::rgb(1, 2, 3));
    }

    #[test]
    fn xrgb_shares_the_argb_layout() {
        for color in [ORANGE, PALE_BLUE, WHITE] {
            let argb = PixelFormat::Argb8888.encode(color);
            let xrgb = PixelFormat::Xrgb8888.encode(color);
            assert_eq!(xrgb.as_slice().len(), PixelFormat::Xrgb8888.bytes_per_pixel());
            assert_eq!(argb, xrgb);
            assert_eq!(PixelFormat::Xrgb8888.decode(xrgb.as_slice()), color);
        }
        // The padding byte carries no color.
        assert_eq!(PixelFormat::Xrgb8888.decode(&[3, 2, 1, 0]), Color::rgb(1, 2, 3));
    }

    #[test]
    fn signature_compares_every_byte() {
        let sig = BackgroundSignature::capture(&[10, 20, 30]);
        assert_eq!(sig.len(), 3);
        assert!(sig.matches(&[10, 20, 30]));
        // A difference in the last byte must still count as ink.
        assert!(!sig.matches(&[10, 20, 31]));
    }
}
