//! Geometry and path helpers shared by the engine, the persistence layer and the backend.
//!
//! This module provides:
//! - [`Rect`], the axis-aligned rectangle used for hit-testing, clipping and damage
//! - Tilde expansion for user-supplied paths

use std::path::PathBuf;

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle in pixel coordinates.
///
/// `x`/`y` are the top-left corner; the rectangle covers `x..x + width` and
/// `y..y + height` (half-open). Rectangles with a non-positive side are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the point lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns the overlapping part of two rectangles, if any.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        Rect::from_min_max(
            self.x.max(other.x),
            self.y.max(other.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Returns the smallest rectangle covering both inputs.
    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        Rect {
            x: min_x,
            y: min_y,
            width: self.right().max(other.right()) - min_x,
            height: self.bottom().max(other.bottom()) - min_y,
        }
    }

    /// Shrinks the rectangle evenly on all sides by `amount`.
    pub fn inset(&self, amount: i32) -> Rect {
        Rect {
            x: self.x + amount,
            y: self.y + amount,
            width: self.width - amount * 2,
            height: self.height - amount * 2,
        }
    }

    /// Moves the rectangle by the given offsets.
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Clamps the rectangle to `0..width` × `0..height`.
    pub fn clamp_to_bounds(&self, width: i32, height: i32) -> Option<Rect> {
        self.intersect(&Rect {
            x: 0,
            y: 0,
            width,
            height,
        })
    }
}

/// Shorthand for a rectangle literal whose sides may be non-positive (empty).
pub(crate) const fn rect(x: i32, y: i32, width: i32, height: i32) -> Rect {
    Rect {
        x,
        y,
        width,
        height,
    }
}

// ============================================================================
// Paths
// ============================================================================

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_rectangles() {
        assert!(Rect::new(0, 0, 0, 10).is_none());
        assert!(Rect::new(0, 0, 10, -1).is_none());
        assert!(Rect::new(3, 4, 1, 1).is_some());
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10, 10, 5, 5).unwrap();
        assert!(r.contains(10, 10));
        assert!(r.contains(14, 14));
        assert!(!r.contains(15, 10));
        assert!(!r.contains(10, 15));
    }

    #[test]
    fn intersect_clips_and_detects_disjoint() {
        let a = Rect::new(0, 0, 10, 10).unwrap();
        let b = Rect::new(5, 5, 10, 10).unwrap();
        assert_eq!(a.intersect(&b), Rect::new(5, 5, 5, 5));
        let c = Rect::new(20, 20, 2, 2).unwrap();
        assert!(a.intersect(&c).is_none());
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0, 0, 2, 2).unwrap();
        let b = Rect::new(10, 5, 2, 2).unwrap();
        assert_eq!(a.union(&b), Rect::new(0, 0, 12, 7).unwrap());
    }

    #[test]
    fn clamp_to_bounds_trims_negative_origin() {
        let r = Rect::new(-3, -3, 6, 6).unwrap();
        assert_eq!(r.clamp_to_bounds(100, 100), Rect::new(0, 0, 3, 3));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }
}
