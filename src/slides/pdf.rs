//! PDF slide documents rendered through poppler.

use cairo::glib;
use log::{debug, info, warn};
use poppler::{Document, Page};
use std::fs;
use std::path::{Path, PathBuf};

use super::deck::{paint_page, render_err};
use super::{Navigation, PageCursor, SlideError, SlideSource, fit_within, render_splash};
use crate::draw::PixelBuffer;

/// A presentation backed by a PDF file; one slide per PDF page.
pub struct PdfDeck {
    document: Document,
    splash: Option<PathBuf>,
    cursor: PageCursor,
    bounds: (i32, i32),
    rendered: Option<(usize, PixelBuffer)>,
}

impl PdfDeck {
    /// Opens a PDF. A document without pages is an error.
    pub fn open(path: &Path, splash: Option<PathBuf>) -> Result<Self, SlideError> {
        let document = load_document(path)?;
        let count = usize::try_from(document.n_pages()).unwrap_or(0);
        if count == 0 {
            return Err(SlideError::NoPages(path.to_path_buf()));
        }

        info!("Opened {} with {} page(s)", path.display(), count);
        Ok(Self {
            document,
            splash,
            cursor: PageCursor::new(count),
            bounds: (1, 1),
            rendered: None,
        })
    }

    fn render(&self, index: usize) -> Result<PixelBuffer, SlideError> {
        let page = i32::try_from(index)
            .ok()
            .and_then(|i| self.document.page(i))
            .ok_or_else(|| SlideError::Render(format!("page {} is missing", index + 1)))?;
        render_page(&page, self.bounds)
    }
}

impl SlideSource for PdfDeck {
    fn current_page(&mut self) -> Option<&PixelBuffer> {
        let index = self.cursor.current();
        let cached = matches!(&self.rendered, Some((i, _)) if *i == index);
        if !cached {
            match self.render(index) {
                Ok(page) => {
                    debug!("Rendered PDF page {} ({}x{})", index + 1, page.width(), page.height());
                    self.rendered = Some((index, page));
                }
                Err(err) => {
                    warn!("PDF page {} could not be shown: {}", index + 1, err);
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

fn load_document(path: &Path) -> Result<Document, SlideError> {
    let absolute = fs::canonicalize(path).map_err(|source| SlideError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decode_err = |err: glib::Error| SlideError::Decode {
        path: path.to_path_buf(),
        reason: err.to_string(),
    };
    let uri = glib::filename_to_uri(&absolute, None).map_err(decode_err)?;
    Document::from_file(&uri, None).map_err(decode_err)
}

/// Scales a PDF page onto a white page that fits `bounds`.
fn render_page(page: &Page, bounds: (i32, i32)) -> Result<PixelBuffer, SlideError> {
    let (page_width, page_height) = page.size();
    if page_width <= 0.0 || page_height <= 0.0 {
        return Err(render_err(format!(
            "page has no area ({}x{})",
            page_width, page_height
        )));
    }
    let (width, height) = fit_within(
        (page_width.ceil() as i32, page_height.ceil() as i32),
        bounds,
    );
    paint_page(width, height, |ctx| {
        ctx.scale(f64::from(width) / page_width, f64::from(height) / page_height);
        page.render(ctx);
        Ok(())
    })
}

/// First page of the PDF at `path`, fitted to `bounds`.
pub(super) fn render_first_page(path: &Path, bounds: (i32, i32)) -> Result<PixelBuffer, SlideError> {
    let document = load_document(path)?;
    let page = document
        .page(0)
        .ok_or_else(|| SlideError::NoPages(path.to_path_buf()))?;
    render_page(&page, bounds)
}
