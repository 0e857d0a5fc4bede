//! Midpoint quadratic smoothing for live freehand strokes.
//!
//! Every new raw sample produces exactly one drawable segment without any
//! look-ahead: the curve runs from the previous midpoint, uses the previous
//! raw sample as the Bézier control point, and ends at the new midpoint.
//! Sharp direction changes get slightly rounded off in exchange for zero
//! added latency.

use super::point::Point;
use crate::util::Rect;

/// Blend weight used when none is configured (true midpoint).
pub const DEFAULT_SMOOTHING: f64 = 0.5;

/// A drawable piece of a smoothed stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    /// A tap without movement, drawn as a filled round dot.
    Dot { at: Point },
    /// Straight join (first segment of a stroke and the closing tail).
    Line { from: Point, to: Point },
    /// Quadratic Bézier between two midpoints.
    Quad { from: Point, ctrl: Point, to: Point },
}

impl Segment {
    pub fn start(&self) -> Point {
        match *self {
            Segment::Dot { at } => at,
            Segment::Line { from, .. } | Segment::Quad { from, .. } => from,
        }
    }

    pub fn end(&self) -> Point {
        match *self {
            Segment::Dot { at } => at,
            Segment::Line { to, .. } | Segment::Quad { to, .. } => to,
        }
    }

    /// Same segment with every coordinate multiplied by `scale`.
    pub fn scaled(self, scale: f64) -> Segment {
        match self {
            Segment::Dot { at } => Segment::Dot {
                at: at.scaled(scale),
            },
            Segment::Line { from, to } => Segment::Line {
                from: from.scaled(scale),
                to: to.scaled(scale),
            },
            Segment::Quad { from, ctrl, to } => Segment::Quad {
                from: from.scaled(scale),
                ctrl: ctrl.scaled(scale),
                to: to.scaled(scale),
            },
        }
    }

    /// Pixel bounds of the segment when stroked with `width`.
    ///
    /// A quadratic lies inside the hull of its control points, so the hull
    /// plus half the width is a safe damage rectangle.
    pub fn bounds(&self, width: f64) -> Option<Rect> {
        let (points, count): ([Point; 3], usize) = match *self {
            Segment::Dot { at } => ([at, at, at], 1),
            Segment::Line { from, to } => ([from, to, to], 2),
            Segment::Quad { from, ctrl, to } => ([from, ctrl, to], 3),
        };
        let pad = (width / 2.0).max(0.5) + 1.0;
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in &points[..count] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Rect::covering(min_x - pad, min_y - pad, max_x + pad, max_y + pad)
    }

    /// Appends the segment to the current Cairo path.
    ///
    /// Cairo only has cubic curves; a quadratic is raised to the exactly
    /// equivalent cubic. Dots add nothing here, see [`Segment::fill_dot`].
    pub(crate) fn append_to_path(&self, ctx: &cairo::Context) {
        match *self {
            Segment::Dot { .. } => {}
            Segment::Line { to, .. } => ctx.line_to(to.x, to.y),
            Segment::Quad { from, ctrl, to } => {
                let c1 = from.lerp(ctrl, 2.0 / 3.0);
                let c2 = to.lerp(ctrl, 2.0 / 3.0);
                ctx.curve_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y);
            }
        }
    }

    /// Fills a round dot of diameter `width` at the segment start.
    pub(crate) fn fill_dot(&self, ctx: &cairo::Context, width: f64) {
        let at = self.start();
        ctx.new_sub_path();
        ctx.arc(at.x, at.y, width / 2.0, 0.0, std::f64::consts::PI * 2.0);
        let _ = ctx.fill();
    }
}

/// Incremental smoother for one stroke at a time.
#[derive(Clone, Debug)]
pub struct Smoother {
    factor: f64,
    last_raw: Option<Point>,
    last_mid: Option<Point>,
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING)
    }
}

impl Smoother {
    /// Creates a smoother; the factor is clamped into `[0, 1]`.
    pub fn new(factor: f64) -> Self {
        let factor = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            DEFAULT_SMOOTHING
        };
        Self {
            factor,
            last_raw: None,
            last_mid: None,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Starts a new stroke at `p`, forgetting any previous state.
    pub fn begin(&mut self, p: Point) -> Segment {
        self.last_raw = Some(p);
        self.last_mid = None;
        Segment::Dot { at: p }
    }

    /// Feeds the next raw sample and returns the segment to draw for it.
    ///
    /// Returns `None` if no stroke has been started.
    pub fn advance(&mut self, p1: Point) -> Option<Segment> {
        let p0 = self.last_raw?;
        let mid = p0.blend(p1, self.factor);
        let segment = match self.last_mid {
            None => Segment::Line { from: p0, to: mid },
            Some(prev_mid) => Segment::Quad {
                from: prev_mid,
                ctrl: p0,
                to: mid,
            },
        };
        self.last_mid = Some(mid);
        self.last_raw = Some(p1);
        Some(segment)
    }

    /// Ends the stroke, returning the tail from the last midpoint to the
    /// last raw sample. Single-sample strokes have no tail.
    pub fn finish(&mut self) -> Option<Segment> {
        let tail = match (self.last_mid, self.last_raw) {
            (Some(from), Some(to)) => Some(Segment::Line { from, to }),
            _ => None,
        };
        self.last_raw = None;
        self.last_mid = None;
        tail
    }
}

/// Replays the smoother over a complete stroke.
///
/// A single point yields one [`Segment::Dot`]; longer strokes yield a
/// connected chain of lines and quads (each segment starts where the
/// previous one ended). An empty slice yields nothing.
pub fn smooth_points(points: &[Point], factor: f64) -> Vec<Segment> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut smoother = Smoother::new(factor);
    let dot = smoother.begin(first);
    if rest.is_empty() {
        return vec![dot];
    }

    let mut segments = Vec::with_capacity(rest.len() + 1);
    segments.extend(rest.iter().filter_map(|&p| smoother.advance(p)));
    segments.extend(smoother.finish());
    segments
}
