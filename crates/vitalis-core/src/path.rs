//! Vector path data with SVG `d` serialization and polyline flattening.
//!
//! Paths are built with chained commands and rendered either by handing the
//! SVG string to a vector backend or by flattening into polygons for
//! [`Canvas::fill_polygon`](crate::Canvas::fill_polygon).

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::fmt;

/// Direction an arc travels on screen (y down). Maps to the SVG sweep flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sweep {
    /// Sweep flag `1`
    Clockwise,
    /// Sweep flag `0`
    CounterClockwise,
}

impl Sweep {
    const fn flag(self) -> u8 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => 0,
        }
    }
}

/// One path command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Start a new subpath
    MoveTo(Point),
    /// Straight line
    LineTo(Point),
    /// Quadratic Bézier
    QuadTo {
        /// Control point
        ctrl: Point,
        /// End point
        to: Point,
    },
    /// Circular arc, always the short way round (SVG large-arc flag 0)
    ArcTo {
        /// Circle radius
        radius: f32,
        /// Travel direction
        sweep: Sweep,
        /// End point
        to: Point,
    },
    /// Close the current subpath
    Close,
}

/// An ordered list of path segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    segments: Vec<PathSegment>,
}

impl PathData {
    /// Create an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a subpath at (x, y).
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(Point::new(x, y)));
        self
    }

    /// Line to (x, y).
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.segments.push(PathSegment::LineTo(Point::new(x, y)));
        self
    }

    /// Quadratic curve through control (cx, cy) to (x, y).
    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> &mut Self {
        self.segments.push(PathSegment::QuadTo {
            ctrl: Point::new(cx, cy),
            to: Point::new(x, y),
        });
        self
    }

    /// Circular arc of `radius` to (x, y).
    pub fn arc_to(&mut self, radius: f32, sweep: Sweep, x: f32, y: f32) -> &mut Self {
        self.segments.push(PathSegment::ArcTo {
            radius,
            sweep,
            to: Point::new(x, y),
        });
        self
    }

    /// Close the current subpath.
    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// The recorded segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the path starts with a move and ends closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.segments.first(), Some(PathSegment::MoveTo(_)))
            && matches!(self.segments.last(), Some(PathSegment::Close))
    }

    /// Translated copy.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        self.map_points(|p| p.translate(dx, dy), 1.0)
    }

    /// Scaled copy. Arc radii scale by `sx`, so arcs stay circular only
    /// under uniform scaling.
    #[must_use]
    pub fn scale(&self, sx: f32, sy: f32) -> Self {
        self.map_points(|p| Point::new(p.x * sx, p.y * sy), sx.abs())
    }

    fn map_points(&self, f: impl Fn(Point) -> Point, radius_factor: f32) -> Self {
        let segments = self
            .segments
            .iter()
            .map(|seg| match *seg {
                PathSegment::MoveTo(p) => PathSegment::MoveTo(f(p)),
                PathSegment::LineTo(p) => PathSegment::LineTo(f(p)),
                PathSegment::QuadTo { ctrl, to } => PathSegment::QuadTo {
                    ctrl: f(ctrl),
                    to: f(to),
                },
                PathSegment::ArcTo { radius, sweep, to } => PathSegment::ArcTo {
                    radius: radius * radius_factor,
                    sweep,
                    to: f(to),
                },
                PathSegment::Close => PathSegment::Close,
            })
            .collect();
        Self { segments }
    }

    /// Approximate the path with polylines, one per subpath.
    ///
    /// `tolerance` is the maximum distance between a curve and its chords.
    #[must_use]
    pub fn flatten(&self, tolerance: f32) -> Vec<Vec<Point>> {
        let tolerance = if tolerance.is_finite() && tolerance > 0.0 {
            tolerance
        } else {
            0.25
        };
        let mut polylines: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        let mut start = Point::ORIGIN;
        let mut pen = Point::ORIGIN;

        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(p) => {
                    if current.len() > 1 {
                        polylines.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                    start = p;
                    pen = p;
                }
                PathSegment::LineTo(p) => {
                    current.push(p);
                    pen = p;
                }
                PathSegment::QuadTo { ctrl, to } => {
                    flatten_quad(pen, ctrl, to, tolerance, &mut current);
                    pen = to;
                }
                PathSegment::ArcTo { radius, sweep, to } => {
                    flatten_arc(pen, to, radius, sweep, tolerance, &mut current);
                    pen = to;
                }
                PathSegment::Close => {
                    pen = start;
                }
            }
        }
        if current.len() > 1 {
            polylines.push(current);
        }
        polylines
    }

    /// Bounding box of the flattened path.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let polylines = self.flatten(0.25);
        let mut points = polylines.iter().flatten();
        let first = points.next()?;
        let (mut min, mut max) = (*first, *first);
        for p in points {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

fn flatten_quad(from: Point, ctrl: Point, to: Point, tolerance: f32, out: &mut Vec<Point>) {
    // Deviation of a quadratic from its chord is |p0 - 2c + p1| / 4 and
    // shrinks with the square of the subdivision count.
    let dd = Point::new(
        2.0f32.mul_add(-ctrl.x, from.x + to.x),
        2.0f32.mul_add(-ctrl.y, from.y + to.y),
    );
    let deviation = dd.x.hypot(dd.y) / 4.0;
    let steps = ((deviation / tolerance).sqrt().ceil() as usize).clamp(1, 256);
    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        let mt = 1.0 - t;
        out.push(Point::new(
            (t * t).mul_add(to.x, (mt * mt).mul_add(from.x, 2.0 * mt * t * ctrl.x)),
            (t * t).mul_add(to.y, (mt * mt).mul_add(from.y, 2.0 * mt * t * ctrl.y)),
        ));
    }
}

fn flatten_arc(
    from: Point,
    to: Point,
    radius: f32,
    sweep: Sweep,
    tolerance: f32,
    out: &mut Vec<Point>,
) {
    let chord = to - from;
    let len = chord.x.hypot(chord.y);
    if len <= f32::EPSILON || radius <= f32::EPSILON {
        out.push(to);
        return;
    }
    // SVG scales the radius up when the endpoints are too far apart.
    let radius = radius.max(len / 2.0);
    let mid = from.lerp(&to, 0.5);
    let h = (radius * radius - len * len / 4.0).max(0.0).sqrt();
    let normal = Point::new(-chord.y / len, chord.x / len);
    let side = match sweep {
        Sweep::Clockwise => h,
        Sweep::CounterClockwise => -h,
    };
    let center = Point::new(normal.x.mul_add(side, mid.x), normal.y.mul_add(side, mid.y));

    let a0 = (from.y - center.y).atan2(from.x - center.x);
    let a1 = (to.y - center.y).atan2(to.x - center.x);
    let mut delta = a1 - a0;
    match sweep {
        Sweep::Clockwise => {
            while delta <= 0.0 {
                delta += TAU;
            }
            while delta > TAU {
                delta -= TAU;
            }
        }
        Sweep::CounterClockwise => {
            while delta >= 0.0 {
                delta -= TAU;
            }
            while delta < -TAU {
                delta += TAU;
            }
        }
    }

    let tolerance = tolerance.min(radius * 0.5);
    let max_step = 2.0 * (1.0 - tolerance / radius).acos();
    let steps = ((delta.abs() / max_step).ceil() as usize).clamp(1, 512);
    for i in 1..steps {
        let angle = (delta * i as f32).mul_add(1.0 / steps as f32, a0);
        out.push(Point::new(
            radius.mul_add(angle.cos(), center.x),
            radius.mul_add(angle.sin(), center.y),
        ));
    }
    out.push(to);
}

fn fmt_num(v: f32) -> f32 {
    // Avoid printing "-0".
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match *seg {
                PathSegment::MoveTo(p) => write!(f, "M{} {}", fmt_num(p.x), fmt_num(p.y))?,
                PathSegment::LineTo(p) => write!(f, "L{} {}", fmt_num(p.x), fmt_num(p.y))?,
                PathSegment::QuadTo { ctrl, to } => write!(
                    f,
                    "Q{} {} {} {}",
                    fmt_num(ctrl.x),
                    fmt_num(ctrl.y),
                    fmt_num(to.x),
                    fmt_num(to.y)
                )?,
                PathSegment::ArcTo { radius, sweep, to } => write!(
                    f,
                    "A{r} {r} 0 0 {} {} {}",
                    sweep.flag(),
                    fmt_num(to.x),
                    fmt_num(to.y),
                    r = fmt_num(radius)
                )?,
                PathSegment::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Builder / Display
    // =========================================================================

    #[test]
    fn test_path_display_svg() {
        let mut path = PathData::new();
        path.move_to(0.0, 10.0)
            .line_to(0.0, 4.0)
            .arc_to(4.0, Sweep::Clockwise, 4.0, 0.0)
            .quad_to(8.0, -2.0, 12.5, 0.0)
            .close();
        assert_eq!(path.to_string(), "M0 10 L0 4 A4 4 0 0 1 4 0 Q8 -2 12.5 0 Z");
        assert!(path.is_closed());
    }

    #[test]
    fn test_path_empty() {
        let path = PathData::new();
        assert!(path.is_empty());
        assert!(!path.is_closed());
        assert_eq!(path.to_string(), "");
        assert!(path.bounds().is_none());
        assert!(path.flatten(0.5).is_empty());
    }

    #[test]
    fn test_path_translate_and_scale() {
        let mut path = PathData::new();
        path.move_to(1.0, 2.0).arc_to(2.0, Sweep::Clockwise, 3.0, 4.0);
        let moved = path.translate(10.0, 0.0);
        assert_eq!(moved.segments()[0], PathSegment::MoveTo(Point::new(11.0, 2.0)));
        let scaled = path.scale(2.0, 2.0);
        match scaled.segments()[1] {
            PathSegment::ArcTo { radius, to, .. } => {
                assert_eq!(radius, 4.0);
                assert_eq!(to, Point::new(6.0, 8.0));
            }
            _ => panic!("Expected ArcTo"),
        }
    }

    // =========================================================================
    // Flattening
    // =========================================================================

    #[test]
    fn test_flatten_counter_clockwise_semicircle_dips_down() {
        let mut path = PathData::new();
        path.move_to(0.0, 0.0)
            .arc_to(10.0, Sweep::CounterClockwise, 20.0, 0.0);
        let lines = path.flatten(0.1);
        assert_eq!(lines.len(), 1);
        let deepest = lines[0]
            .iter()
            .copied()
            .fold(f32::MIN, |acc, p| acc.max(p.y));
        assert!((deepest - 10.0).abs() < 0.1, "deepest = {deepest}");
        for p in &lines[0] {
            assert!((p.distance(&Point::new(10.0, 0.0)) - 10.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_flatten_clockwise_semicircle_rises() {
        let mut path = PathData::new();
        path.move_to(0.0, 0.0).arc_to(10.0, Sweep::Clockwise, 20.0, 0.0);
        let lines = path.flatten(0.1);
        let highest = lines[0].iter().fold(f32::MAX, |acc, p| acc.min(p.y));
        assert!((highest + 10.0).abs() < 0.1);
    }

    #[test]
    fn test_flatten_quarter_arc_corner() {
        let mut path = PathData::new();
        path.move_to(0.0, 16.0).arc_to(16.0, Sweep::Clockwise, 16.0, 0.0);
        let lines = path.flatten(0.05);
        for p in &lines[0] {
            assert!((p.distance(&Point::new(16.0, 16.0)) - 16.0).abs() < 0.01);
            assert!(p.x <= 16.0 + 1e-3 && p.y <= 16.0 + 1e-3);
        }
        assert_eq!(*lines[0].last().unwrap(), Point::new(16.0, 0.0));
    }

    #[test]
    fn test_flatten_quad_hits_endpoints() {
        let mut path = PathData::new();
        path.move_to(0.0, 50.0).quad_to(125.0, 10.0, 250.0, 50.0);
        let lines = path.flatten(0.5);
        assert_eq!(lines[0][0], Point::new(0.0, 50.0));
        assert_eq!(*lines[0].last().unwrap(), Point::new(250.0, 50.0));
        assert!(lines[0].len() > 3);
    }

    #[test]
    fn test_flatten_splits_subpaths() {
        let mut path = PathData::new();
        path.move_to(0.0, 0.0)
            .line_to(1.0, 0.0)
            .close()
            .move_to(5.0, 5.0)
            .line_to(6.0, 5.0);
        assert_eq!(path.flatten(1.0).len(), 2);
    }

    #[test]
    fn test_bounds() {
        let mut path = PathData::new();
        path.move_to(-2.0, 1.0).line_to(8.0, 5.0).line_to(3.0, -4.0).close();
        let b = path.bounds().unwrap();
        assert_eq!(b, Rect::new(-2.0, -4.0, 10.0, 9.0));
    }
}
