//! Dirty region tracking for incremental presentation.
//!
//! Collects axis-aligned rectangles that need to be pushed to the compositor
//! between frames.

use crate::util::Rect;

/// Regions kept individually before they collapse into one bounding box.
pub const MAX_DIRTY_REGIONS: usize = 64;

/// Tracks dirty rectangles accumulated between renders.
///
/// Storage is reserved up front, so marking never allocates.
#[derive(Debug)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self {
            regions: Vec::with_capacity(MAX_DIRTY_REGIONS),
            force_full: false,
        }
    }

    /// Marks the entire surface as dirty. Clears any accumulated rectangles.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.regions.clear();
    }

    /// Adds a dirty rectangle if the tracker is not already full.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() || self.force_full {
            return;
        }
        if self.regions.len() == MAX_DIRTY_REGIONS {
            let merged = self
                .regions
                .drain(..)
                .fold(rect, |acc, region| acc.union(&region));
            self.regions.push(merged);
            return;
        }
        self.regions.push(rect);
    }

    /// Adds a dirty rectangle when present.
    pub fn mark_optional_rect(&mut self, rect: Option<Rect>) {
        if let Some(rect) = rect {
            self.mark_rect(rect);
        }
    }

    /// Whether anything is waiting to be presented.
    pub fn is_dirty(&self) -> bool {
        self.force_full || !self.regions.is_empty()
    }

    /// Drains the dirty regions gathered so far.
    ///
    /// When the full surface is marked, returns a single rectangle covering the
    /// entire surface; otherwise returns accumulated rectangles.
    pub fn take_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        if self.force_full {
            self.force_full = false;
            self.regions.clear();
            return Rect::new(0, 0, width, height).into_iter().collect();
        }
        self.regions.drain(..).collect()
    }
}
