//! Canvas-local points and the fixed canvas they live on.

/// A sample in canvas-local, device-independent coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Blends two samples: `factor * self + (1 - factor) * other`.
    pub fn blend(self, other: Point, factor: f64) -> Point {
        Point {
            x: factor * self.x + (1.0 - factor) * other.x,
            y: factor * self.y + (1.0 - factor) * other.y,
        }
    }

    pub fn scaled(self, scale: f64) -> Point {
        Point {
            x: self.x * scale,
            y: self.y * scale,
        }
    }

    /// Linear interpolation towards `other` (`t = 0` is `self`).
    pub(crate) fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// Fixed logical drawing area. All points are expressed in this space and it
/// is the reference frame for export scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamps a point into `[0, width] × [0, height]`.
    ///
    /// Non-finite coordinates collapse to the origin edge so that a single
    /// bad sample from the host cannot poison the smoother.
    pub fn clamp(&self, point: Point) -> Point {
        let clamp_axis = |value: f64, max: f64| {
            if value.is_finite() {
                value.clamp(0.0, max)
            } else {
                0.0
            }
        };
        Point {
            x: clamp_axis(point.x, self.width),
            y: clamp_axis(point.y, self.height),
        }
    }

    /// Raster size in pixels for the given scale factor (never below 1×1).
    pub fn pixel_size(&self, scale: f64) -> (i32, i32) {
        let w = (self.width * scale).round().max(1.0);
        let h = (self.height * scale).round().max(1.0);
        (w as i32, h as i32)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(400.0, 200.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_at_half_is_midpoint() {
        let mid = Point::new(10.0, 10.0).blend(Point::new(50.0, 30.0), 0.5);
        assert_eq!(mid, Point::new(30.0, 20.0));
    }

    #[test]
    fn blend_weights_first_point() {
        let p = Point::new(0.0, 0.0).blend(Point::new(10.0, 0.0), 0.75);
        assert!((p.x - 2.5).abs() < 1e-9);
    }

    #[test]
    fn clamp_keeps_points_inside_canvas() {
        let canvas = Canvas::new(100.0, 50.0);
        assert_eq!(canvas.clamp(Point::new(-5.0, 70.0)), Point::new(0.0, 50.0));
        assert_eq!(canvas.clamp(Point::new(20.0, 20.0)), Point::new(20.0, 20.0));
        assert_eq!(canvas.clamp(Point::new(f64::NAN, 10.0)), Point::new(0.0, 10.0));
    }

    #[test]
    fn pixel_size_rounds_and_never_collapses() {
        let canvas = Canvas::new(100.0, 50.0);
        assert_eq!(canvas.pixel_size(3.0), (300, 150));
        assert_eq!(canvas.pixel_size(1.006), (101, 50));
        assert_eq!(canvas.pixel_size(0.001), (1, 1));
    }
}
