//! Polygon and segment clipping.
//!
//! Polygons are clipped with Sutherland–Hodgman passes against half-planes
//! described by a linear function `f`: a point `p` is kept when
//! `f(p) >= 0`. Because every clip boundary used by partitioning is a
//! straight line, two passes cut a polygon down to a band.

use oddity_core::{
    geometry::{Bounds, Point, Segment},
    polygon::Polygon,
};

use crate::catalog::CircleSpec;

const EPSILON: f64 = 1e-9;

/// Clips `polygon` to the half-plane `f(p) >= 0`.
///
/// `f` must be affine in `p`; the crossing point of an edge is found by
/// linear interpolation of `f` along it.
///
/// # Examples
///
/// ```
/// # use oddity_core::{geometry::Point, polygon::Polygon};
/// # use oddity::clip::clip_half_plane;
/// let square = Polygon::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(0.0, 10.0),
/// ]);
/// let left = clip_half_plane(&square, |p| 4.0 - p.x());
/// assert_eq!(left.area(), 40.0);
/// ```
pub fn clip_half_plane(polygon: &Polygon, f: impl Fn(Point) -> f64) -> Polygon {
    let vertices = polygon.vertices();
    let n = vertices.len();
    let mut output = Vec::with_capacity(n + 2);

    for i in 0..n {
        let current = vertices[i];
        let previous = vertices[(i + n - 1) % n];
        let f_current = f(current);
        let f_previous = f(previous);
        let current_inside = f_current >= -EPSILON;
        let previous_inside = f_previous >= -EPSILON;

        if current_inside {
            if !previous_inside {
                output.push(crossing(previous, current, f_previous, f_current));
            }
            output.push(current);
        } else if previous_inside {
            output.push(crossing(previous, current, f_previous, f_current));
        }
    }

    Polygon::new(output)
}

fn crossing(a: Point, b: Point, fa: f64, fb: f64) -> Point {
    let denominator = fa - fb;
    if denominator.abs() < EPSILON {
        return a.midpoint(b);
    }
    a.lerp(b, (fa / denominator).clamp(0.0, 1.0))
}

/// The linear quantity a band partition slices along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandAxis {
    /// `y`
    Y,
    /// `x`
    X,
    /// `x + y`
    Sum,
    /// `x - y`
    Diff,
}

impl BandAxis {
    pub fn value(self, p: Point) -> f64 {
        match self {
            Self::Y => p.y(),
            Self::X => p.x(),
            Self::Sum => p.x() + p.y(),
            Self::Diff => p.x() - p.y(),
        }
    }

    /// First and last axis value over `bounds`, in the order sections run.
    ///
    /// Backslash bands start from the top-right corner, so the `Diff` range
    /// runs from its maximum down to its minimum.
    pub fn range(self, bounds: Bounds) -> (f64, f64) {
        match self {
            Self::Y => (bounds.min_y(), bounds.max_y()),
            Self::X => (bounds.min_x(), bounds.max_x()),
            Self::Sum => (bounds.min_x() + bounds.min_y(), bounds.max_x() + bounds.max_y()),
            Self::Diff => (bounds.max_x() - bounds.min_y(), bounds.min_x() - bounds.max_y()),
        }
    }

    /// A segment along the level line `value(p) == level`, long enough to
    /// cross the whole canvas
    pub fn level_line(self, level: f64) -> Segment {
        const REACH: f64 = 300.0;
        match self {
            Self::Y => Segment::new(Point::new(-REACH, level), Point::new(REACH, level)),
            Self::X => Segment::new(Point::new(level, -REACH), Point::new(level, REACH)),
            Self::Sum => Segment::new(
                Point::new(level + REACH, -REACH),
                Point::new(level - REACH, REACH),
            ),
            Self::Diff => Segment::new(
                Point::new(level - REACH, -REACH),
                Point::new(level + REACH, REACH),
            ),
        }
    }
}

/// Clips `polygon` to the band between `lo` and `hi` along `axis`, in
/// either order.
pub fn clip_band(polygon: &Polygon, axis: BandAxis, lo: f64, hi: f64) -> Polygon {
    let (lo, hi) = (lo.min(hi), lo.max(hi));
    let above = clip_half_plane(polygon, |p| axis.value(p) - lo);
    clip_half_plane(&above, |p| hi - axis.value(p))
}

/// Clips `segment` to the half-plane `f(p) >= 0`.
pub fn clip_segment_half_plane(segment: Segment, f: impl Fn(Point) -> f64) -> Option<Segment> {
    let (a, b) = (segment.start(), segment.end());
    let (fa, fb) = (f(a), f(b));
    match (fa >= -EPSILON, fb >= -EPSILON) {
        (true, true) => Some(segment),
        (false, false) => None,
        (true, false) => Some(Segment::new(a, crossing(a, b, fa, fb))),
        (false, true) => Some(Segment::new(crossing(a, b, fa, fb), b)),
    }
}

/// Clips `segment` to the closed disk of `circle`.
///
/// Returns `None` when the segment misses the disk or only touches it.
pub fn clip_segment_to_circle(segment: Segment, circle: CircleSpec) -> Option<Segment> {
    let start = segment.start();
    let d = segment.end().sub_point(start);
    let f = start.sub_point(circle.center());
    let a = d.dot(d);
    let r = circle.radius();

    if a < EPSILON * EPSILON {
        return (f.dot(f) <= r * r + EPSILON).then_some(segment);
    }

    let b = d.dot(f);
    let c = f.dot(f) - r * r;
    let discriminant = b * b - a * c;
    if discriminant < EPSILON {
        return None;
    }

    let root = discriminant.sqrt();
    let t_lo = ((-b - root) / a).max(0.0);
    let t_hi = ((-b + root) / a).min(1.0);
    if t_lo >= t_hi - EPSILON {
        return None;
    }
    Some(Segment::new(start.lerp(segment.end(), t_lo), start.lerp(segment.end(), t_hi)))
}

/// Clips `segment` to `bounds` (Liang–Barsky).
pub fn clip_segment_to_bounds(segment: Segment, bounds: Bounds) -> Option<Segment> {
    let start = segment.start();
    let d = segment.end().sub_point(start);
    let mut t_lo = 0.0_f64;
    let mut t_hi = 1.0_f64;

    let checks = [
        (-d.x(), start.x() - bounds.min_x()),
        (d.x(), bounds.max_x() - start.x()),
        (-d.y(), start.y() - bounds.min_y()),
        (d.y(), bounds.max_y() - start.y()),
    ];
    for (p, q) in checks {
        if p.abs() < EPSILON {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t_lo = t_lo.max(t);
        } else {
            t_hi = t_hi.min(t);
        }
    }

    if t_lo > t_hi {
        return None;
    }
    Some(Segment::new(start.lerp(segment.end(), t_lo), start.lerp(segment.end(), t_hi)))
}
