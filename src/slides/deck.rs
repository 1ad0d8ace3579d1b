//! PNG-backed slide documents.

use cairo::{Context, Format, ImageSurface};
use log::{debug, info, warn};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use super::{Navigation, PageCursor, SlideError, SlideSource, render_splash};
use crate::draw::{Color, PixelBuffer, PixelFormat};

/// Largest `(width, height)` with the aspect ratio of `image` that fits in
/// `bounds`. Both sides are at least one pixel.
pub fn fit_within(image: (i32, i32), bounds: (i32, i32)) -> (i32, i32) {
    let (iw, ih) = (image.0.max(1) as f64, image.1.max(1) as f64);
    let aspect = iw / ih;
    let mut width = bounds.0;
    let mut height = (f64::from(width) / aspect) as i32;
    if height > bounds.1 {
        height = bounds.1;
        width = (f64::from(height) * aspect) as i32;
    }
    (width.max(1), height.max(1))
}

/// A presentation made of PNG images.
///
/// The document is either one PNG file or a directory whose `.png` files,
/// sorted by name, are the pages.
pub struct ImageDeck {
    pages: Vec<PathBuf>,
    splash: Option<PathBuf>,
    cursor: PageCursor,
    bounds: (i32, i32),
    rendered: Option<(usize, PixelBuffer)>,
}

impl ImageDeck {
    /// Opens a document. The first page is decoded up front so a broken
    /// document is reported before the blackboard starts.
    pub fn open(document: &Path, splash: Option<PathBuf>) -> Result<Self, SlideError> {
        let pages = if document.is_dir() {
            list_pages(document)?
        } else {
            File::open(document).map_err(|source| SlideError::Io {
                path: document.to_path_buf(),
                source,
            })?;
            vec![document.to_path_buf()]
        };

        let Some(first) = pages.first() else {
            return Err(SlideError::NoPages(document.to_path_buf()));
        };
        decode_png(first)?;

        info!("Opened {} with {} page(s)", document.display(), pages.len());
        let mut deck = Self::empty(splash);
        deck.cursor = PageCursor::new(pages.len());
        deck.pages = pages;
        Ok(deck)
    }

    /// A deck without pages, optionally with a splash image.
    pub fn empty(splash: Option<PathBuf>) -> Self {
        Self {
            pages: Vec::new(),
            splash,
            cursor: PageCursor::default(),
            bounds: (1, 1),
            rendered: None,
        }
    }

    fn render(&self, path: &Path) -> Result<PixelBuffer, SlideError> {
        render_png(path, self.bounds)
    }
}

impl SlideSource for ImageDeck {
    fn current_page(&mut self) -> Option<&PixelBuffer> {
        let index = self.cursor.current();
        let cached = matches!(&self.rendered, Some((i, _)) if *i == index);
        if !cached {
            let path = self.pages.get(index)?;
            match self.render(path) {
                Ok(page) => {
                    debug!("Rendered page {} ({}x{})", index + 1, page.width(), page.height());
                    self.rendered = Some((index, page));
                }
                Err(err) => {
                    warn!("Page {} could not be shown: {}", index + 1, err);
                    self.rendered = None;
                    return None;
                }
            }
        }
        self.rendered.as_ref().map(|(_, page)| page)
    }

    fn splash(&mut self) -> Option<PixelBuffer> {
        render_splash(self.splash.take()?, self.bounds)
    }

    fn navigate(&mut self, navigation: Navigation) -> bool {
        let moved = self.cursor.apply(navigation);
        if moved {
            info!(
                "Slide {}/{} ({:?})",
                self.cursor.current() + 1,
                self.cursor.count(),
                navigation
            );
        }
        moved
    }

    fn page_count(&self) -> usize {
        self.cursor.count()
    }

    fn current_index(&self) -> usize {
        self.cursor.current()
    }

    fn fit_to(&mut self, width: i32, height: i32) {
        if self.bounds != (width, height) {
            self.bounds = (width.max(1), height.max(1));
            self.rendered = None;
        }
    }
}

fn list_pages(dir: &Path) -> Result<Vec<PathBuf>, SlideError> {
    let io_err = |source| SlideError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut pages: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(io_err)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
        })
        .collect();
    pages.sort();
    Ok(pages)
}

pub(super) fn decode_png(path: &Path) -> Result<ImageSurface, SlideError> {
    let mut file = File::open(path).map_err(|source| SlideError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ImageSurface::create_from_png(&mut file).map_err(|err| SlideError::Decode {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

pub(super) fn render_err(err: impl std::fmt::Display) -> SlideError {
    SlideError::Render(err.to_string())
}

/// Decodes the PNG at `path` and scales it to fit `bounds`.
pub(super) fn render_png(path: &Path, bounds: (i32, i32)) -> Result<PixelBuffer, SlideError> {
    let source = decode_png(path)?;
    let (width, height) = fit_within((source.width(), source.height()), bounds);
    paint_page(width, height, |ctx| {
        ctx.scale(
            f64::from(width) / f64::from(source.width().max(1)),
            f64::from(height) / f64::from(source.height().max(1)),
        );
        ctx.set_source_surface(&source, 0.0, 0.0).map_err(render_err)?;
        ctx.paint().map_err(render_err)
    })
}

/// Runs `draw` on a white `width × height` page and converts the result.
pub(super) fn paint_page(
    width: i32,
    height: i32,
    draw: impl FnOnce(&Context) -> Result<(), SlideError>,
) -> Result<PixelBuffer, SlideError> {
    let mut target = ImageSurface::create(Format::ARgb32, width, height).map_err(render_err)?;
    {
        let ctx = Context::new(&target).map_err(render_err)?;
        ctx.set_source_rgb(1.0, 1.0, 1.0);
        ctx.paint().map_err(render_err)?;
        draw(&ctx)?;
    }
    target.flush();

    let stride = target.stride() as usize;
    let data = target.data().map_err(render_err)?;
    let mut page = PixelBuffer::new(width as usize, height as usize, PixelFormat::Argb8888);
    for row in 0..height as usize {
        for col in 0..width as usize {
            let start = row * stride + col * 4;
            let Some(px) = data.get(start..start + 4) else {
                continue;
            };
            let argb = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
            let color = Color::rgb((argb >> 16) as u8, (argb >> 8) as u8, argb as u8);
            page.set_pixel(row, col, color);
        }
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: i32, height: i32, rgb: (f64, f64, f64)) {
        let surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
        {
            let ctx = Context::new(&surface).unwrap();
            ctx.set_source_rgb(rgb.0, rgb.1, rgb.2);
            ctx.paint().unwrap();
        }
        let mut file = File::create(path).unwrap();
        surface.write_to_png(&mut file).unwrap();
    }

    #[test]
    fn fit_within_preserves_aspect() {
        assert_eq!(fit_within((200, 100), (100, 100)), (100, 50));
        assert_eq!(fit_within((100, 200), (100, 100)), (50, 100));
        assert_eq!(fit_within((4000, 3000), (1024, 556)), (741, 556));
    }

    #[test]
    fn directory_pages_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("b.png"), 8, 4, (0.0, 0.0, 1.0));
        write_png(&dir.path().join("a.png"), 8, 4, (1.0, 0.0, 0.0));
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut deck = ImageDeck::open(dir.path(), None).unwrap();
        deck.fit_to(16, 16);
        assert_eq!(deck.page_count(), 2);

        let first = deck.current_page().unwrap();
        assert_eq!((first.width(), first.height()), (16, 8));
        assert_eq!(first.color_at(3, 3), Some(Color::rgb(255, 0, 0)));

        assert!(deck.navigate(Navigation::Next));
        let second = deck.current_page().unwrap();
        assert_eq!(second.color_at(3, 3), Some(Color::rgb(0, 0, 255)));
        assert!(!deck.navigate(Navigation::Next));
    }

    #[test]
    fn empty_directory_has_no_pages() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ImageDeck::open(dir.path(), None),
            Err(SlideError::NoPages(_))
        ));
    }

    #[test]
    fn missing_or_invalid_documents_fail() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ImageDeck::open(&dir.path().join("absent.png"), None),
            Err(SlideError::Io { .. })
        ));
        let bogus = dir.path().join("bogus.png");
        fs::write(&bogus, "not a png").unwrap();
        assert!(matches!(
            ImageDeck::open(&bogus, None),
            Err(SlideError::Decode { .. })
        ));
    }

    #[test]
    fn splash_is_handed_out_once() {
        let dir = tempfile::tempdir().unwrap();
        let splash = dir.path().join("splash.png");
        write_png(&splash, 10, 10, (0.0, 1.0, 0.0));
        let mut deck = ImageDeck::empty(Some(splash));
        deck.fit_to(20, 20);
        let image = deck.splash().unwrap();
        assert_eq!((image.width(), image.height()), (20, 20));
        assert!(deck.splash().is_none());
        assert!(deck.current_page().is_none());
    }
}
