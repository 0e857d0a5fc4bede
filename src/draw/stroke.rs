//! Stroke definitions for captured signatures.

use super::color::Color;
use super::point::Point;
use crate::util::Rect;

/// Pen attributes a stroke is drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    /// Ink color
    pub color: Color,
    /// Line thickness in canvas units
    pub width: f64,
    /// Smoothing blend factor (0.5 = true midpoint)
    pub smoothing: f64,
}

/// One continuous pointer-down-to-pointer-up gesture.
///
/// A stroke always holds at least one point; a one-point stroke is a tap and
/// renders as a dot. The stroke keeps the pen it was drawn with so replays
/// reproduce the live preview regardless of later pen changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    pen: Pen,
}

impl Stroke {
    /// Starts a stroke at `first`.
    pub fn new(first: Point, pen: Pen) -> Self {
        Self {
            points: vec![first],
            pen,
        }
    }

    /// Builds a stroke from recorded samples; `None` when `points` is empty.
    pub fn from_points(points: Vec<Point>, pen: Pen) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points, pen })
        }
    }

    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Most recent sample.
    pub fn last(&self) -> Point {
        // Invariant: never empty.
        self.points[self.points.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; strokes cannot be empty. Present for API symmetry.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_dot(&self) -> bool {
        self.points.len() == 1
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// Returns the axis-aligned bounding box in canvas units, expanded to
    /// cover the stroke width.
    ///
    /// The smoothed curve never leaves the hull of the raw samples, so the
    /// raw extent is sufficient.
    pub fn bounding_box(&self, scale: f64) -> Option<Rect> {
        bounding_box_for_points(&self.points, self.pen.width, scale)
    }
}

pub(crate) fn bounding_box_for_points(points: &[Point], width: f64, scale: f64) -> Option<Rect> {
    let first = points.first()?;
    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;

    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let padding = (width / 2.0).max(0.5) + 1.0;
    Rect::covering(
        (min_x - padding) * scale,
        (min_y - padding) * scale,
        (max_x + padding) * scale,
        (max_y + padding) * scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLACK;

    fn pen(width: f64) -> Pen {
        Pen {
            color: BLACK,
            width,
            smoothing: 0.5,
        }
    }

    #[test]
    fn stroke_cannot_be_empty() {
        assert!(Stroke::from_points(Vec::new(), pen(2.0)).is_none());
        let stroke = Stroke::new(Point::new(1.0, 2.0), pen(2.0));
        assert!(stroke.is_dot());
        assert_eq!(stroke.last(), Point::new(1.0, 2.0));
    }

    #[test]
    fn bounding_box_expands_with_width() {
        let mut stroke = Stroke::new(Point::new(10.0, 20.0), pen(6.0));
        stroke.push(Point::new(30.0, 40.0));

        let rect = stroke.bounding_box(1.0).expect("stroke should have bounds");
        assert_eq!(rect.x, 6);
        assert_eq!(rect.y, 16);
        assert_eq!(rect.width, 28);
        assert_eq!(rect.height, 28);
    }

    #[test]
    fn bounding_box_scales() {
        let stroke = Stroke::new(Point::new(10.0, 10.0), pen(2.0));
        let one = stroke.bounding_box(1.0).unwrap();
        let two = stroke.bounding_box(2.0).unwrap();
        assert_eq!(two.width, one.width * 2);
        assert_eq!(two.x, one.x * 2);
    }
}
