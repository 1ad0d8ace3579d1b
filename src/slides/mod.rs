//! Slide documents shown underneath the ink.
//!
//! The blackboard only talks to a [`SlideSource`]. [`PdfDeck`] presents PDF
//! documents through poppler; [`ImageDeck`] presents a PNG file or a
//! directory of PNG pages.

mod deck;
mod pdf;

pub use deck::{ImageDeck, fit_within};
pub use pdf::PdfDeck;

use log::warn;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::draw::PixelBuffer;

/// Pages skipped by a fast-forward or fast-backward jump.
pub const PAGE_JUMP: usize = 10;

/// Errors raised while opening or rendering a slide document.
#[derive(Debug, Error)]
pub enum SlideError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} contains no pages")]
    NoPages(PathBuf),
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("failed to render page: {0}")]
    Render(String),
}

/// Navigation requests routed to the slide source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    FastForward,
    FastBackward,
    First,
    Last,
}

/// Supplies the pages of a presentation.
pub trait SlideSource {
    /// Image of the current page, sized to fit the canvas; `None` when there is
    /// nothing to show.
    fn current_page(&mut self) -> Option<&PixelBuffer>;

    /// Image shown before the first page, if any.
    fn splash(&mut self) -> Option<PixelBuffer>;

    /// Moves to another page. Returns true only if the page changed.
    fn navigate(&mut self, navigation: Navigation) -> bool;

    fn page_count(&self) -> usize;

    fn current_index(&self) -> usize;

    /// Informs the source of the canvas size pages must fit in.
    fn fit_to(&mut self, _width: i32, _height: i32) {}
}

/// True when `path` names a PDF document.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Opens `document` with the deck matching its extension: PDF files go to
/// [`PdfDeck`], anything else to [`ImageDeck`].
pub fn open_document(
    document: &Path,
    splash: Option<PathBuf>,
) -> Result<Box<dyn SlideSource>, SlideError> {
    if is_pdf(document) {
        Ok(Box::new(PdfDeck::open(document, splash)?))
    } else {
        Ok(Box::new(ImageDeck::open(document, splash)?))
    }
}

/// Renders a splash image (a PDF's first page or a PNG) to fit `bounds`.
/// Failures are logged and yield no splash.
pub(crate) fn render_splash(path: PathBuf, bounds: (i32, i32)) -> Option<PixelBuffer> {
    let rendered = if is_pdf(&path) {
        pdf::render_first_page(&path, bounds)
    } else {
        deck::render_png(&path, bounds)
    };
    match rendered {
        Ok(image) => Some(image),
        Err(err) => {
            warn!("Splash image {} skipped: {}", path.display(), err);
            None
        }
    }
}

/// Index of the current page within a document of `count` pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageCursor {
    current: usize,
    count: usize,
}

impl PageCursor {
    pub fn new(count: usize) -> Self {
        Self { current: 0, count }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Applies a navigation request. Returns false when already at the
    /// relevant end (or the document is empty).
    pub fn apply(&mut self, navigation: Navigation) -> bool {
        if self.count == 0 {
            return false;
        }
        let last = self.count - 1;
        let target = match navigation {
            Navigation::Next => (self.current < last).then(|| self.current + 1),
            Navigation::Previous => (self.current > 0).then(|| self.current - 1),
            Navigation::FastForward => {
                (self.current < last).then(|| (self.current + PAGE_JUMP).min(last))
            }
            Navigation::FastBackward => {
                (self.current > 0).then(|| self.current.saturating_sub(PAGE_JUMP))
            }
            Navigation::First => (self.current != 0).then_some(0),
            Navigation::Last => (self.current != last).then_some(last),
        };
        match target {
            Some(page) => {
                self.current = page;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_previous_stop_at_ends() {
        let mut cursor = PageCursor::new(3);
        assert!(!cursor.apply(Navigation::Previous));
        assert!(cursor.apply(Navigation::Next));
        assert!(cursor.apply(Navigation::Next));
        assert!(!cursor.apply(Navigation::Next));
        assert_eq!(cursor.current(), 2);
        assert!(cursor.apply(Navigation::Previous));
        assert_eq!(cursor.current(), 1);
    }

    #[test]
    fn fast_jumps_clamp_to_ends() {
        let mut cursor = PageCursor::new(15);
        assert!(cursor.apply(Navigation::FastForward));
        assert_eq!(cursor.current(), 10);
        assert!(cursor.apply(Navigation::FastForward));
        assert_eq!(cursor.current(), 14);
        assert!(!cursor.apply(Navigation::FastForward));
        assert!(cursor.apply(Navigation::FastBackward));
        assert_eq!(cursor.current(), 4);
        assert!(cursor.apply(Navigation::FastBackward));
        assert_eq!(cursor.current(), 0);
        assert!(!cursor.apply(Navigation::FastBackward));
    }

    #[test]
    fn first_and_last_report_no_change_when_already_there() {
        let mut cursor = PageCursor::new(4);
        assert!(!cursor.apply(Navigation::First));
        assert!(cursor.apply(Navigation::Last));
        assert_eq!(cursor.current(), 3);
        assert!(!cursor.apply(Navigation::Last));
        assert!(cursor.apply(Navigation::First));
    }

    #[test]
    fn documents_are_told_apart_by_extension() {
        assert!(is_pdf(Path::new("talk.pdf")));
        assert!(is_pdf(Path::new("/slides/TALK.PDF")));
        assert!(!is_pdf(Path::new("talk.png")));
        assert!(!is_pdf(Path::new("slides")));
    }

    #[test]
    fn missing_documents_fail_for_either_deck() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["absent.pdf", "absent.png"] {
            assert!(matches!(
                open_document(&dir.path().join(name), None),
                Err(SlideError::Io { .. })
            ));
        }
    }

    #[test]
    fn empty_document_never_moves() {
        let mut cursor = PageCursor::new(0);
        for nav in [Navigation::Next, Navigation::Last, Navigation::FastForward] {
            assert!(!cursor.apply(nav));
        }
        let mut none = ImageDeck::empty(None);
        assert!(none.current_page().is_none());
        assert!(!none.navigate(Navigation::Next));
    }
}
