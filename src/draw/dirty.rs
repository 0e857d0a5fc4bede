//! Dirty region tracking for the live preview.
//!
//! Collects axis-aligned pixel rectangles that the host needs to repaint
//! between frames.

use crate::util::Rect;

/// Above this many pending rectangles they are merged into their union.
const MAX_REGIONS: usize = 64;

/// Tracks dirty rectangles accumulated between repaints.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
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
        self.regions.push(rect);
        if self.regions.len() > MAX_REGIONS {
            let merged = self.regions.iter().copied().reduce(Rect::union);
            self.regions.clear();
            self.regions.extend(merged);
        }
    }

    /// Adds a dirty rectangle when present.
    pub fn mark_optional_rect(&mut self, rect: Option<Rect>) {
        if let Some(rect) = rect {
            self.mark_rect(rect);
        }
    }

    pub fn is_clean(&self) -> bool {
        !self.force_full && self.regions.is_empty()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_rect_records_rectangles() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_optional_rect(Rect::new(0, 0, 10, 10));
        tracker.mark_optional_rect(None);

        let rects = tracker.take_regions(100, 100);
        assert_eq!(rects.len(), 1);
        assert!(tracker.is_clean());
    }

    #[test]
    fn mark_full_takes_precedence() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_optional_rect(Rect::new(5, 5, 10, 10));
        tracker.mark_full();
        tracker.mark_optional_rect(Rect::new(20, 20, 15, 15));

        let rects = tracker.take_regions(200, 100);
        assert_eq!(rects, vec![Rect::new(0, 0, 200, 100).unwrap()]);
    }

    #[test]
    fn many_regions_collapse_into_union() {
        let mut tracker = DirtyTracker::new();
        for i in 0..=MAX_REGIONS as i32 {
            tracker.mark_optional_rect(Rect::new(i, i, 2, 2));
        }
        let rects = tracker.take_regions(500, 500);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].x, 0);
        assert_eq!(rects[0].width, MAX_REGIONS as i32 + 2);
    }
}
