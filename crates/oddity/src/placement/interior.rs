//! Interior tests and candidate sampling for scatter placement.

use rand::{Rng, rngs::StdRng, seq::IndexedRandom};

use oddity_core::{
    geometry::{Bounds, Point},
    polygon::Polygon,
};

use crate::catalog::{CROSS_INNER, CROSS_OUTER, CircleSpec, ShapeGeometry, ShapeKind};

/// Minimum clearance from the cross outline, whatever the motif size
const CROSS_EDGE_MARGIN: f64 = 6.25;

/// Minimum clearance from a triangle's edges; its corners are sharp
const TRIANGLE_EDGE_MARGIN: f64 = 7.0;

/// A region candidate centres are drawn from and tested against.
///
/// The edge margin is part of the interior: `contains` only accepts points
/// that keep at least that clearance from the boundary.
pub trait Interior {
    /// Whether a centre at `p` keeps its motif inside the region
    fn contains(&self, p: Point) -> bool;

    /// Draws a candidate centre, or `None` when the region is too small to
    /// hold any centre at all
    fn sample(&self, rng: &mut StdRng) -> Option<Point>;
}

fn sample_in(bounds: Bounds, rng: &mut StdRng) -> Option<Point> {
    if bounds.is_empty() {
        return None;
    }
    Some(Point::new(
        rng.random_range(bounds.min_x()..=bounds.max_x()),
        rng.random_range(bounds.min_y()..=bounds.max_y()),
    ))
}

/// The whole canvas inset by a margin.
#[derive(Debug, Clone, Copy)]
pub struct CanvasInterior {
    bounds: Bounds,
}

impl CanvasInterior {
    pub fn new(margin: f64) -> Self {
        Self {
            bounds: Bounds::canvas().inset(margin),
        }
    }
}

impl Interior for CanvasInterior {
    fn contains(&self, p: Point) -> bool {
        !self.bounds.is_empty() && self.bounds.contains(p)
    }

    fn sample(&self, rng: &mut StdRng) -> Option<Point> {
        sample_in(self.bounds, rng)
    }
}

#[derive(Debug, Clone)]
enum Boundary {
    Circle(CircleSpec),
    /// Upper half of the circle above `base`
    Semicircle { circle: CircleSpec, base: f64 },
    Cross(Polygon),
    Polygon { polygon: Polygon, convex: bool },
}

/// The inside of a container shape inset by a margin.
#[derive(Debug, Clone)]
pub struct ContainerInterior {
    boundary: Boundary,
    margin: f64,
    sampling: Vec<Bounds>,
}

impl ContainerInterior {
    /// Builds the interior of `shape` keeping `margin` from its edges.
    pub fn new(shape: &ShapeGeometry, margin: f64) -> Self {
        let kind = shape.kind();
        let bounds = shape.bounds();
        let (boundary, margin, sampling) = match (kind, shape.circle()) {
            (ShapeKind::Semicircle, Some(circle)) => {
                let base = circle.center().y();
                let sampling = Bounds::new(
                    bounds.min_x() + margin,
                    bounds.min_y() + margin,
                    bounds.max_x() - margin,
                    base - margin,
                );
                (Boundary::Semicircle { circle, base }, margin, vec![sampling])
            }
            (_, Some(circle)) => (Boundary::Circle(circle), margin, vec![bounds.inset(margin)]),
            (ShapeKind::Cross, None) => {
                let margin = margin.max(CROSS_EDGE_MARGIN);
                (
                    Boundary::Cross(shape.vertices().clone()),
                    margin,
                    cross_sampling(margin),
                )
            }
            (_, None) => {
                let margin = if kind == ShapeKind::Triangle {
                    margin.max(TRIANGLE_EDGE_MARGIN)
                } else {
                    margin
                };
                let boundary = Boundary::Polygon {
                    polygon: shape.vertices().clone(),
                    convex: kind.is_convex(),
                };
                (boundary, margin, vec![bounds.inset(margin)])
            }
        };
        let sampling = sampling.into_iter().filter(|b| !b.is_empty()).collect();
        Self {
            boundary,
            margin,
            sampling,
        }
    }

    /// The effective edge margin
    pub fn margin(&self) -> f64 {
        self.margin
    }
}

/// The two bars of the cross inset by `margin`
fn cross_sampling(margin: f64) -> Vec<Bounds> {
    let (lo, hi) = CROSS_OUTER;
    let (inner_lo, inner_hi) = CROSS_INNER;
    vec![
        Bounds::new(inner_lo, lo, inner_hi, hi).inset(margin),
        Bounds::new(lo, inner_lo, hi, inner_hi).inset(margin),
    ]
}

fn in_cross(p: Point) -> bool {
    let (lo, hi) = CROSS_OUTER;
    let (inner_lo, inner_hi) = CROSS_INNER;
    let within = |v: f64, a: f64, b: f64| (a..=b).contains(&v);
    (within(p.x(), inner_lo, inner_hi) && within(p.y(), lo, hi))
        || (within(p.y(), inner_lo, inner_hi) && within(p.x(), lo, hi))
}

impl Interior for ContainerInterior {
    fn contains(&self, p: Point) -> bool {
        let margin = self.margin;
        match &self.boundary {
            Boundary::Circle(circle) => p.distance(circle.center()) <= circle.radius() - margin,
            Boundary::Semicircle { circle, base } => {
                p.distance(circle.center()) <= circle.radius() - margin
                    && p.y() >= base - circle.radius() + margin
                    && p.y() <= base - margin
            }
            Boundary::Cross(polygon) => in_cross(p) && polygon.min_edge_distance(p) >= margin,
            Boundary::Polygon { polygon, convex } => {
                let inside = if *convex {
                    polygon.contains_convex(p)
                } else {
                    polygon.contains(p)
                };
                inside && polygon.min_edge_distance(p) >= margin
            }
        }
    }

    fn sample(&self, rng: &mut StdRng) -> Option<Point> {
        let bounds = *self.sampling.choose(rng)?;
        sample_in(bounds, rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::{catalog::geometry, symbol::SymbolLibrary};

    fn interior(kind: ShapeKind, margin: f64) -> ContainerInterior {
        let symbols = SymbolLibrary::builtin().unwrap();
        ContainerInterior::new(&geometry(kind, &symbols).unwrap(), margin)
    }

    #[test]
    fn test_canvas_interior() {
        let canvas = CanvasInterior::new(10.0);
        assert!(canvas.contains(Point::new(10.0, 90.0)));
        assert!(!canvas.contains(Point::new(5.0, 50.0)));
        assert!(CanvasInterior::new(60.0).sample(&mut StdRng::seed_from_u64(1)).is_none());
    }

    #[test]
    fn test_circle_interior() {
        let circle = interior(ShapeKind::Circle, 5.0);
        assert!(circle.contains(Point::new(50.0, 20.0)));
        assert!(!circle.contains(Point::new(50.0, 18.0)));
    }

    #[test]
    fn test_semicircle_interior() {
        let semi = interior(ShapeKind::Semicircle, 4.0);
        assert!(semi.contains(Point::new(50.0, 60.0)));
        assert!(!semi.contains(Point::new(50.0, 66.0)));
        assert!(!semi.contains(Point::new(50.0, 70.0)));
    }

    #[test]
    fn test_cross_interior() {
        let cross = interior(ShapeKind::Cross, 1.0);
        assert_eq!(cross.margin(), CROSS_EDGE_MARGIN);
        assert!(cross.contains(Point::new(50.0, 50.0)));
        assert!(cross.contains(Point::new(50.0, 22.0)));
        // The empty corner of the bounding box
        assert!(!cross.contains(Point::new(25.0, 25.0)));
        // Too close to the end of an arm
        assert!(!cross.contains(Point::new(50.0, 17.0)));
    }

    #[test]
    fn test_triangle_margin_floor() {
        let triangle = interior(ShapeKind::Triangle, 2.0);
        assert_eq!(triangle.margin(), TRIANGLE_EDGE_MARGIN);
    }

    #[test]
    fn test_concave_polygon_uses_ray_casting() {
        let arrow = interior(ShapeKind::Arrow, 2.0);
        assert!(arrow.contains(Point::new(25.0, 50.0)));
        // Inside the bounding box, outside the arrow
        assert!(!arrow.contains(Point::new(25.0, 18.0)));
    }

    #[test]
    fn test_samples_stay_in_sampling_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in ShapeKind::ALL {
            let interior = interior(kind, 3.0);
            let bounds = Bounds::canvas();
            for _ in 0..50 {
                let p = interior.sample(&mut rng).unwrap();
                assert!(bounds.contains(p), "{kind}: {p:?}");
            }
        }
    }

    #[test]
    fn test_cross_samples_hit_interior() {
        let cross = interior(ShapeKind::Cross, 3.0);
        let mut rng = StdRng::seed_from_u64(3);
        let hits = (0..200)
            .filter_map(|_| cross.sample(&mut rng))
            .filter(|&p| cross.contains(p))
            .count();
        assert!(hits > 150);
    }
}
