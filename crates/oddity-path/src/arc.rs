//! Elliptical arc conversion from endpoint to center parameterization.

use std::f64::consts::TAU;

use oddity_core::geometry::Point;

use crate::command::ArcSegment;

/// An elliptical arc in center form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCenter {
    center: Point,
    rx: f64,
    ry: f64,
    /// Ellipse x-axis rotation in radians
    phi: f64,
    start_angle: f64,
    /// Signed sweep in radians; positive is clockwise on screen
    sweep_angle: f64,
}

impl ArcCenter {
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radii after out-of-range correction
    pub fn radii(&self) -> (f64, f64) {
        (self.rx, self.ry)
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn sweep_angle(&self) -> f64 {
        self.sweep_angle
    }

    /// Point on the ellipse at parametric `angle`
    pub fn point_at(&self, angle: f64) -> Point {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_a, cos_a) = angle.sin_cos();
        let x = self.rx * cos_a;
        let y = self.ry * sin_a;
        Point::new(
            self.center.x() + cos_phi * x - sin_phi * y,
            self.center.y() + sin_phi * x + cos_phi * y,
        )
    }

    /// `samples` points evenly spaced along the arc, excluding the start point
    pub fn sample(&self, samples: usize) -> Vec<Point> {
        (1..=samples)
            .map(|i| {
                let t = i as f64 / samples as f64;
                self.point_at(self.start_angle + self.sweep_angle * t)
            })
            .collect()
    }
}

/// Signed angle from `u` to `v`
fn vector_angle(u: Point, v: Point) -> f64 {
    u.cross(v).atan2(u.dot(v))
}

/// Converts an arc from `start` to `arc.end` into center form.
///
/// Radii too small to span the endpoints are scaled up uniformly. Returns
/// `None` for degenerate arcs (a zero radius or coincident endpoints), which
/// callers draw as a straight line.
///
/// # Examples
///
/// ```
/// # use oddity_core::geometry::Point;
/// # use oddity_path::{ArcSegment, endpoint_to_center};
/// let arc = ArcSegment {
///     rx: 35.0,
///     ry: 35.0,
///     x_axis_rotation: 0.0,
///     large_arc: false,
///     sweep: true,
///     end: Point::new(50.0, 85.0),
/// };
/// let center = endpoint_to_center(Point::new(50.0, 15.0), &arc).unwrap();
/// assert!((center.center().x() - 50.0).abs() < 1e-9);
/// assert!((center.center().y() - 50.0).abs() < 1e-9);
/// ```
pub fn endpoint_to_center(start: Point, arc: &ArcSegment) -> Option<ArcCenter> {
    let mut rx = arc.rx.abs();
    let mut ry = arc.ry.abs();
    if rx == 0.0 || ry == 0.0 || start == arc.end {
        return None;
    }

    let phi = arc.x_axis_rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let dx2 = (start.x() - arc.end.x()) / 2.0;
    let dy2 = (start.y() - arc.end.y()) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let root = lambda.sqrt();
        rx *= root;
        ry *= root;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let numerator = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
    let denominator = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let sign = if arc.large_arc != arc.sweep { 1.0 } else { -1.0 };
    let coefficient = sign * (numerator / denominator).max(0.0).sqrt();

    let cxp = coefficient * rx * y1p / ry;
    let cyp = -coefficient * ry * x1p / rx;

    let mid = start.midpoint(arc.end);
    let center = Point::new(
        cos_phi * cxp - sin_phi * cyp + mid.x(),
        sin_phi * cxp + cos_phi * cyp + mid.y(),
    );

    let u = Point::new((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = Point::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let start_angle = vector_angle(Point::new(1.0, 0.0), u);
    let mut sweep_angle = vector_angle(u, v) % TAU;
    if !arc.sweep && sweep_angle > 0.0 {
        sweep_angle -= TAU;
    } else if arc.sweep && sweep_angle < 0.0 {
        sweep_angle += TAU;
    }

    Some(ArcCenter {
        center,
        rx,
        ry,
        phi,
        start_angle,
        sweep_angle,
    })
}
