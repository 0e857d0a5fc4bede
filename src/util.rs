//! Utility functions for color names and pixel-space rectangles.
//!
//! This module provides:
//! - Name-to-color mapping for the configuration file
//! - Integer rectangles used for preview damage tracking

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse ink and background colors.
///
/// # Supported Names (case-insensitive)
/// - "black", "blue" (ballpoint ink), "white", "transparent"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "black" => Some(BLACK),
        "blue" | "ink-blue" => Some(INK_BLUE),
        "white" => Some(WHITE),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Smallest integer rectangle covering the floating-point bounds.
    ///
    /// Degenerate bounds grow to one pixel so a dot still produces damage.
    pub fn covering(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Self> {
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return None;
        }
        let min_x = min_x.floor() as i32;
        let min_y = min_y.floor() as i32;
        let max_x = (max_x.ceil() as i32).max(min_x + 1);
        let max_y = (max_y.ceil() as i32).max(min_y + 1);
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Returns a rectangle that covers both input rectangles.
    pub fn union(self, other: Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);
        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Clips the rectangle to `[0, width) × [0, height)`.
    pub fn clamp_to_bounds(self, width: i32, height: i32) -> Option<Rect> {
        let max_x = (self.x + self.width).clamp(0, width);
        let max_y = (self.y + self.height).clamp(0, height);
        let x = self.x.clamp(0, width);
        let y = self.y.clamp(0, height);
        Rect::from_min_max(x, y, max_x, max_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
