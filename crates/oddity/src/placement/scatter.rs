//! Rejection-sampled scatter placement.

use log::{debug, trace};
use rand::rngs::StdRng;

use oddity_core::geometry::Point;

use super::interior::Interior;
use crate::error::OddityError;

/// Extra clearance kept between a motif and the edge it sits against
const EDGE_PADDING: f64 = 1.0;

/// Shrink applied to motifs scattered inside a container shape
const CONTAINER_SHRINK: f64 = 0.55;

/// Motif scale and spacing of a scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterSizing {
    scale: f64,
    margin: f64,
    min_distance: f64,
}

impl ScatterSizing {
    /// Sizing for motifs drawn at `scale`.
    ///
    /// The margin keeps half a motif plus a little padding from the edge and
    /// no two centres come closer than one motif width.
    pub fn from_scale(scale: f64) -> Self {
        Self {
            scale,
            margin: 50.0 * scale + EDGE_PADDING,
            min_distance: 100.0 * scale,
        }
    }

    /// Sizing derived from the number of motifs.
    ///
    /// # Arguments
    ///
    /// * `count` - Effective motif count; diagrams sharing a count share a motif size.
    /// * `in_container` - Whether the motifs sit inside a container shape.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity::placement::ScatterSizing;
    /// let sizing = ScatterSizing::for_count(4, false);
    /// assert!((sizing.scale() - 0.33).abs() < 1e-12);
    /// assert!((sizing.min_distance() - 33.0).abs() < 1e-9);
    /// ```
    pub fn for_count(count: usize, in_container: bool) -> Self {
        let n = count.max(1) as f64;
        let mut scale = 0.99 / (1.0 + n.sqrt());
        if in_container {
            scale *= CONTAINER_SHRINK;
        }
        Self::from_scale(scale)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }
}

/// How long a scatter may keep drawing candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptLimit {
    /// Each point gets this many candidates
    PerPoint(usize),
    /// The whole scatter gets this many candidates
    Total(usize),
}

/// Places `count` centres inside `interior`, pairwise at least
/// `min_distance` apart.
///
/// # Errors
///
/// Returns [`OddityError::PlacementExhausted`] when the attempt limit runs
/// out before every centre is placed; a partial result is never returned.
pub fn scatter(
    count: usize,
    min_distance: f64,
    interior: &dyn Interior,
    limit: AttemptLimit,
    rng: &mut StdRng,
) -> Result<Vec<Point>, OddityError> {
    let mut points: Vec<Point> = Vec::with_capacity(count);
    let mut attempts = 0;
    let mut since_last = 0;

    while points.len() < count {
        let exhausted = match limit {
            AttemptLimit::PerPoint(cap) => since_last >= cap,
            AttemptLimit::Total(cap) => attempts >= cap,
        };
        let candidate = if exhausted { None } else { interior.sample(rng) };
        let Some(candidate) = candidate else {
            debug!(requested = count, placed = points.len(), attempts; "Scatter exhausted");
            return Err(OddityError::PlacementExhausted {
                requested: count,
                placed: points.len(),
                attempts,
            });
        };
        attempts += 1;
        since_last += 1;

        if interior.contains(candidate) && points.iter().all(|p| p.distance(candidate) >= min_distance)
        {
            trace!(x = candidate.x(), y = candidate.y(), attempts; "Accepted scatter point");
            points.push(candidate);
            since_last = 0;
        }
    }

    debug!(count, attempts; "Scatter placed");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use rand::SeedableRng;

    use super::*;
    use crate::{
        catalog::{ShapeKind, geometry},
        placement::interior::{CanvasInterior, ContainerInterior},
        symbol::SymbolLibrary,
    };

    #[test]
    fn test_sizing_for_count() {
        let sizing = ScatterSizing::for_count(9, true);
        assert!(approx_eq!(f64, sizing.scale(), 0.99 / 4.0 * 0.55, epsilon = 1e-12));
        assert!(approx_eq!(f64, sizing.margin(), 50.0 * sizing.scale() + 1.0, epsilon = 1e-12));
        assert_eq!(ScatterSizing::for_count(0, false), ScatterSizing::for_count(1, false));
    }

    #[test]
    fn test_free_scatter_is_deterministic() {
        let sizing = ScatterSizing::for_count(5, false);
        let interior = CanvasInterior::new(sizing.margin());
        let run = |seed| {
            scatter(
                5,
                sizing.min_distance(),
                &interior,
                AttemptLimit::PerPoint(2000),
                &mut StdRng::seed_from_u64(seed),
            )
            .unwrap()
        };
        assert_eq!(run(11), run(11));
        assert_ne!(run(11), run(12));
    }

    #[test]
    fn test_container_scatter_respects_interior() {
        let symbols = SymbolLibrary::builtin().unwrap();
        let sizing = ScatterSizing::for_count(6, true);
        let shape = geometry(ShapeKind::Hexagon, &symbols).unwrap();
        let interior = ContainerInterior::new(&shape, sizing.margin());
        let points = scatter(
            6,
            sizing.min_distance(),
            &interior,
            AttemptLimit::Total(12000),
            &mut StdRng::seed_from_u64(5),
        )
        .unwrap();
        assert_eq!(points.len(), 6);
        for p in &points {
            assert!(interior.contains(*p));
        }
    }

    #[test]
    fn test_infeasible_scatter_is_exhausted() {
        let symbols = SymbolLibrary::builtin().unwrap();
        let shape = geometry(ShapeKind::Circle, &symbols).unwrap();
        let sizing = ScatterSizing::from_scale(0.2);
        let interior = ContainerInterior::new(&shape, sizing.margin());
        let err = scatter(
            20,
            sizing.min_distance(),
            &interior,
            AttemptLimit::Total(500),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        match err {
            OddityError::PlacementExhausted {
                requested,
                placed,
                attempts,
            } => {
                assert_eq!(requested, 20);
                assert!(placed < 20);
                assert_eq!(attempts, 500);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_count() {
        let points = scatter(
            0,
            10.0,
            &CanvasInterior::new(5.0),
            AttemptLimit::PerPoint(1),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();
        assert!(points.is_empty());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use rand::SeedableRng;

    use super::*;
    use crate::{
        catalog::{ShapeKind, geometry},
        placement::interior::ContainerInterior,
        symbol::SymbolLibrary,
    };

    // ===================
    // Property Test Functions
    // ===================

    /// A roomy circle always takes every motif, spaced and inside the margin.
    fn check_circle_scatter(count: usize, seed: u64) -> Result<(), TestCaseError> {
        let shape = geometry(ShapeKind::Circle, &SymbolLibrary::default()).unwrap();
        let sizing = ScatterSizing::for_count(count, true);
        let interior = ContainerInterior::new(&shape, sizing.margin());
        let points = scatter(
            count,
            sizing.min_distance(),
            &interior,
            AttemptLimit::Total(12000),
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();

        prop_assert_eq!(points.len(), count);
        let radius = shape.circle().unwrap().radius();
        for (i, p) in points.iter().enumerate() {
            prop_assert!(p.distance(Point::new(50.0, 50.0)) <= radius - sizing.margin() + 1e-9);
            for q in &points[i + 1..] {
                prop_assert!(p.distance(*q) >= sizing.min_distance());
            }
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn circle_scatter(count in 1usize..6, seed in any::<u64>()) {
            check_circle_scatter(count, seed)?;
        }
    }
}
