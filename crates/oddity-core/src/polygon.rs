//! Simple polygons over canvas points.
//!
//! [`Polygon`] is the vertex-list representation shared by the shape catalog,
//! the clipping engine and the placement interior tests. Polygons are implicitly
//! closed: the last vertex connects back to the first.
//!
//! Orientation is measured with the shoelace formula in the y-down canvas, so
//! a polygon listed clockwise on screen has a positive signed area. This is the
//! counter-clockwise orientation of the usual y-up convention and is what
//! [`Polygon::ensure_ccw`] normalizes to.

use std::fmt::Write as _;

use crate::geometry::{Bounds, Point, Segment};

/// An implicitly closed polygon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Signed shoelace area; positive for the canonical orientation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity_core::{geometry::Point, polygon::Polygon};
    /// let square = Polygon::new(vec![
    ///     Point::new(0.0, 0.0),
    ///     Point::new(10.0, 0.0),
    ///     Point::new(10.0, 10.0),
    ///     Point::new(0.0, 10.0),
    /// ]);
    /// assert_eq!(square.signed_area(), 100.0);
    /// ```
    pub fn signed_area(&self) -> f64 {
        self.edges()
            .map(|edge| edge.start().cross(edge.end()))
            .sum::<f64>()
            / 2.0
    }

    /// Absolute enclosed area
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Returns the polygon with vertices reordered to positive orientation
    pub fn ensure_ccw(mut self) -> Self {
        if self.signed_area() < 0.0 {
            self.vertices.reverse();
        }
        self
    }

    /// Area-weighted centroid.
    ///
    /// Degenerate polygons (near-zero area) fall back to the vertex average,
    /// and an empty polygon yields `None`.
    pub fn centroid(&self) -> Option<Point> {
        if self.vertices.is_empty() {
            return None;
        }
        let area = self.signed_area();
        if area.abs() < 1e-9 {
            let sum = self
                .vertices
                .iter()
                .fold(Point::default(), |acc, &p| acc.add_point(p));
            return Some(sum.scale(1.0 / self.vertices.len() as f64));
        }
        let (cx, cy) = self.edges().fold((0.0, 0.0), |(cx, cy), edge| {
            let (a, b) = (edge.start(), edge.end());
            let w = a.cross(b);
            (cx + (a.x() + b.x()) * w, cy + (a.y() + b.y()) * w)
        });
        Some(Point::new(cx / (6.0 * area), cy / (6.0 * area)))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.vertices.iter().copied())
    }

    /// Iterates the closing edges `v[i] -> v[i + 1]`, wrapping at the end
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Half-plane test valid for convex polygons of either orientation
    pub fn contains_convex(&self, p: Point) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let mut sign = 0.0_f64;
        for edge in self.edges() {
            let turn = edge
                .end()
                .sub_point(edge.start())
                .cross(p.sub_point(edge.start()));
            if turn.abs() < 1e-12 {
                continue;
            }
            if sign == 0.0 {
                sign = turn.signum();
            } else if turn.signum() != sign {
                return false;
            }
        }
        true
    }

    /// Even-odd ray casting test, valid for any simple polygon
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;
        for edge in self.edges() {
            let (a, b) = (edge.start(), edge.end());
            if (a.y() > p.y()) != (b.y() > p.y()) {
                let x_cross = a.x() + (p.y() - a.y()) * (b.x() - a.x()) / (b.y() - a.y());
                if p.x() < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Distance from `p` to the nearest edge, `f64::INFINITY` for an empty polygon
    pub fn min_edge_distance(&self, p: Point) -> f64 {
        self.edges()
            .map(|edge| edge.distance_to(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Largest distance from `center` to any vertex
    pub fn max_radius(&self, center: Point) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.distance(center))
            .fold(0.0, f64::max)
    }

    /// Returns a copy scaled by `factor` about `center`
    pub fn scaled_about(&self, center: Point, factor: f64) -> Self {
        Self::new(
            self.vertices
                .iter()
                .map(|v| v.scale_about(center, factor))
                .collect(),
        )
    }

    /// Returns a copy with `f` applied to every vertex
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        Self::new(self.vertices.iter().map(|&v| f(v)).collect())
    }

    /// Serializes as closed path data: `M x y L x y ... Z` with two decimals.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity_core::{geometry::Point, polygon::Polygon};
    /// let tri = Polygon::new(vec![
    ///     Point::new(0.0, 0.0),
    ///     Point::new(10.0, 0.0),
    ///     Point::new(5.0, 8.5),
    /// ]);
    /// assert_eq!(tri.to_path_data(), "M 0.00 0.00 L 10.00 0.00 L 5.00 8.50 Z");
    /// ```
    pub fn to_path_data(&self) -> String {
        let mut out = String::new();
        for (i, v) in self.vertices.iter().enumerate() {
            let cmd = if i == 0 { "M" } else { " L" };
            let _ = write!(out, "{cmd} {:.2} {:.2}", v.x(), v.y());
        }
        if !self.vertices.is_empty() {
            out.push_str(" Z");
        }
        out
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Regular-ish convex polygons around the canvas centre.
    fn convex_polygon_strategy() -> impl Strategy<Value = Polygon> {
        (3usize..12, 5.0f64..45.0, 0.0f64..std::f64::consts::TAU).prop_map(|(n, r, phase)| {
            (0..n)
                .map(|k| {
                    let angle = phase + k as f64 * std::f64::consts::TAU / n as f64;
                    Point::canvas_center().polar(r, angle)
                })
                .collect()
        })
    }

    fn factor_strategy() -> impl Strategy<Value = f64> {
        0.1f64..3.0
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Scaling about any point multiplies the area by the squared factor.
    fn check_scaled_area(poly: Polygon, factor: f64) -> Result<(), TestCaseError> {
        let scaled = poly.scaled_about(Point::new(13.0, 71.0), factor);
        prop_assert!(approx_eq!(
            f64,
            scaled.area(),
            poly.area() * factor * factor,
            epsilon = 1e-6
        ));
        Ok(())
    }

    /// For convex polygons the convex and ray-casting tests agree on the centroid.
    fn check_centroid_inside(poly: Polygon) -> Result<(), TestCaseError> {
        let c = poly.centroid().expect("non-empty");
        prop_assert!(poly.contains_convex(c));
        prop_assert!(poly.contains(c));
        Ok(())
    }

    /// Normalizing orientation never changes the absolute area.
    fn check_ensure_ccw_preserves_area(poly: Polygon) -> Result<(), TestCaseError> {
        let area = poly.area();
        let normalized = poly.ensure_ccw();
        prop_assert!(normalized.signed_area() >= 0.0);
        prop_assert!(approx_eq!(f64, normalized.area(), area, epsilon = 1e-9));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn scaled_area(poly in convex_polygon_strategy(), factor in factor_strategy()) {
            check_scaled_area(poly, factor)?;
        }

        #[test]
        fn centroid_inside(poly in convex_polygon_strategy()) {
            check_centroid_inside(poly)?;
        }

        #[test]
        fn ensure_ccw_preserves_area(poly in convex_polygon_strategy()) {
            check_ensure_ccw_preserves_area(poly)?;
        }
    }
}
