//! Saving the visible canvas to disk.
//!
//! Saved files are named `saved_NN.<ext>`, with `NN` cycling through 00..99.

mod png;
mod pnm;

pub use png::PngWriter;
pub use pnm::PnmWriter;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SaveFormat;
use crate::draw::PixelBuffer;

/// Number of distinct save slots before names are reused.
pub const SAVE_SLOTS: u32 = 100;

/// Errors that can occur while saving the canvas.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("file save failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("nothing to save: canvas starts at row {top_row} of {height}")]
    EmptyCanvas { top_row: usize, height: usize },
}

/// Encodes an image file from the rows of a pixel buffer.
pub trait CanvasWriter {
    /// File extension, without the dot.
    fn extension(&self) -> &'static str;

    /// Encodes rows `top_row..` of `canvas` into `out`.
    fn encode(
        &self,
        out: &mut dyn Write,
        canvas: &PixelBuffer,
        top_row: usize,
    ) -> Result<(), PersistError>;
}

/// Returns the writer for a configured format.
pub fn writer_for(format: SaveFormat) -> Box<dyn CanvasWriter> {
    match format {
        SaveFormat::Pnm => Box::new(PnmWriter),
        SaveFormat::Png => Box::new(PngWriter),
    }
}

/// Where the next save goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTarget {
    directory: PathBuf,
    counter: u32,
}

impl SaveTarget {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            counter: 0,
        }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Name of the next file, e.g. `saved_07.pnm`.
    pub fn file_name(&self, extension: &str) -> String {
        format!("saved_{:02}.{}", self.counter, extension)
    }

    pub fn path(&self, extension: &str) -> PathBuf {
        self.directory.join(self.file_name(extension))
    }

    /// Moves on to the next slot. Call only after a successful save.
    pub fn advance(&mut self) {
        self.counter = (self.counter + 1) % SAVE_SLOTS;
    }
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<(), PersistError> {
    if !directory.as_os_str().is_empty() && !directory.exists() {
        log::info!("Creating save directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }
    Ok(())
}

/// Sibling of `path` that receives the encoded bytes before the final rename.
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

fn write_partial(
    writer: &dyn CanvasWriter,
    partial: &Path,
    canvas: &PixelBuffer,
    top_row: usize,
) -> Result<(), PersistError> {
    let mut out = BufWriter::new(File::create(partial)?);
    writer.encode(&mut out, canvas, top_row)?;
    out.flush()?;
    Ok(())
}

/// Writes the canvas below `top_row` to `path`, creating its directory first.
///
/// The image is encoded into a `.part` sibling that replaces `path` only once
/// complete, so a failed save leaves any earlier file at `path` intact.
pub fn save_canvas(
    writer: &dyn CanvasWriter,
    path: &Path,
    canvas: &PixelBuffer,
    top_row: usize,
) -> Result<(), PersistError> {
    if top_row >= canvas.height() {
        return Err(PersistError::EmptyCanvas {
            top_row,
            height: canvas.height(),
        });
    }
    if let Some(parent) = path.parent() {
        ensure_directory_exists(parent)?;
    }
    let partial = partial_path(path);
    let written = write_partial(writer, &partial, canvas, top_row)
        .and_then(|()| fs::rename(&partial, path).map_err(PersistError::from));
    if let Err(err) = written {
        if let Err(cleanup) = fs::remove_file(&partial)
            && cleanup.kind() != std::io::ErrorKind::NotFound
        {
            log::warn!("Could not remove {}: {}", partial.display(), cleanup);
        }
        return Err(err);
    }
    log::debug!(
        "Wrote {} ({}x{})",
        path.display(),
        canvas.width(),
        canvas.height() - top_row
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::WHITE;
    use crate::draw::PixelFormat;

    #[test]
    fn names_cycle_through_hundred_slots() {
        let mut target = SaveTarget::new(PathBuf::from("/tmp"));
        assert_eq!(target.file_name("pnm"), "saved_00.pnm");
        for _ in 0..7 {
            target.advance();
        }
        assert_eq!(target.path("png"), PathBuf::from("/tmp/saved_07.png"));
        for _ in 0..93 {
            target.advance();
        }
        assert_eq!(target.counter(), 0);
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("saved_00.pnm");
        let canvas = PixelBuffer::filled(4, 4, PixelFormat::Argb8888, WHITE);
        save_canvas(&PnmWriter, &path, &canvas, 1).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_under_a_regular_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file").unwrap();
        let canvas = PixelBuffer::filled(4, 4, PixelFormat::Argb8888, WHITE);
        let result = save_canvas(&PnmWriter, &blocker.join("saved_00.pnm"), &canvas, 1);
        assert!(matches!(result, Err(PersistError::Io(_))));
    }

    #[test]
    fn empty_canvas_is_rejected() {
        let canvas = PixelBuffer::filled(4, 4, PixelFormat::Argb8888, WHITE);
        let result = save_canvas(&PnmWriter, Path::new("unused.pnm"), &canvas, 4);
        assert!(matches!(result, Err(PersistError::EmptyCanvas { .. })));
    }

    /// Emits part of an image, then fails.
    struct TruncatingWriter;

    impl CanvasWriter for TruncatingWriter {
        fn extension(&self) -> &'static str {
            "pnm"
        }

        fn encode(
            &self,
            out: &mut dyn Write,
            _canvas: &PixelBuffer,
            _top_row: usize,
        ) -> Result<(), PersistError> {
            out.write_all(b"P6\n")?;
            Err(PersistError::Encode("encoder gave up".to_string()))
        }
    }

    #[test]
    fn failed_encode_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved_00.pnm");
        fs::write(&path, "previous save").unwrap();
        let canvas = PixelBuffer::filled(4, 4, PixelFormat::Argb8888, WHITE);

        let result = save_canvas(&TruncatingWriter, &path, &canvas, 1);
        assert!(matches!(result, Err(PersistError::Encode(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous save");
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn failed_encode_leaves_no_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved_00.pnm");
        let canvas = PixelBuffer::filled(4, 4, PixelFormat::Argb8888, WHITE);

        assert!(save_canvas(&TruncatingWriter, &path, &canvas, 1).is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn successful_save_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved_00.pnm");
        fs::write(&path, "previous save").unwrap();
        let canvas = PixelBuffer::filled(4, 4, PixelFormat::Argb8888, WHITE);

        save_canvas(&PnmWriter, &path, &canvas, 1).unwrap();
        assert!(fs::read(&path).unwrap().starts_with(b"P6"));
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn writer_for_matches_format() {
        assert_eq!(writer_for(SaveFormat::Pnm).extension(), "pnm");
        assert_eq!(writer_for(SaveFormat::Png).extension(), "png");
    }
}
