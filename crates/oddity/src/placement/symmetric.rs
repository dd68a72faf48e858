//! Scatter placement mirrored about an axis.

use std::{f64::consts::SQRT_2, fmt, str::FromStr};

use log::debug;
use rand::{Rng, rngs::StdRng};

use oddity_core::geometry::Point;

use super::interior::Interior;
use crate::error::OddityError;

/// Mirror axis of a symmetric scatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymmetryAxis {
    /// `x = 50`
    Vertical,
    /// `y = 50`
    Horizontal,
    /// `x = y`
    DiagonalSlash,
    /// `x + y = 100`
    DiagonalBackslash,
}

impl SymmetryAxis {
    pub const ALL: [SymmetryAxis; 4] = [
        Self::Vertical,
        Self::Horizontal,
        Self::DiagonalSlash,
        Self::DiagonalBackslash,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::DiagonalSlash => "diagonal_slash",
            Self::DiagonalBackslash => "diagonal_backslash",
        }
    }

    /// Reflection of `p` across the axis
    pub fn mirror(self, p: Point) -> Point {
        match self {
            Self::Vertical => Point::new(100.0 - p.x(), p.y()),
            Self::Horizontal => Point::new(p.x(), 100.0 - p.y()),
            Self::DiagonalSlash => Point::new(p.y(), p.x()),
            Self::DiagonalBackslash => Point::new(100.0 - p.y(), 100.0 - p.x()),
        }
    }

    /// Distance from `p` to the axis
    pub fn distance(self, p: Point) -> f64 {
        match self {
            Self::Vertical => (p.x() - 50.0).abs(),
            Self::Horizontal => (p.y() - 50.0).abs(),
            Self::DiagonalSlash => (p.x() - p.y()).abs() / SQRT_2,
            Self::DiagonalBackslash => (p.x() + p.y() - 100.0).abs() / SQRT_2,
        }
    }

    /// Whether `p` lies in the half pairs are drawn from
    fn in_canonical_half(self, p: Point) -> bool {
        match self {
            Self::Vertical => p.x() <= 50.0,
            Self::Horizontal => p.y() <= 50.0,
            Self::DiagonalSlash => p.x() <= p.y(),
            Self::DiagonalBackslash => p.x() + p.y() <= 100.0,
        }
    }

    /// The point on the axis at parameter `t` in `0..=100`
    fn on_axis(self, t: f64) -> Point {
        match self {
            Self::Vertical => Point::new(50.0, t),
            Self::Horizontal => Point::new(t, 50.0),
            Self::DiagonalSlash => Point::new(t, t),
            Self::DiagonalBackslash => Point::new(t, 100.0 - t),
        }
    }
}

impl fmt::Display for SymmetryAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymmetryAxis {
    type Err = OddityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|axis| axis.name() == normalized)
            .ok_or_else(|| OddityError::configuration(format!("unknown symmetry axis `{s}`")))
    }
}

/// Places `count` centres as mirror pairs about `axis`.
///
/// An odd count first places one centre on the axis itself. Pairs are then
/// drawn in the canonical half and accepted together.
///
/// # Arguments
///
/// * `pair_attempts` - Candidates allowed for all pairs together.
/// * `axis_attempts` - Candidates allowed for the centre on the axis.
///
/// # Errors
///
/// Returns [`OddityError::PlacementExhausted`] when either budget runs out.
pub fn symmetric_scatter(
    count: usize,
    min_distance: f64,
    axis: SymmetryAxis,
    interior: &dyn Interior,
    pair_attempts: usize,
    axis_attempts: usize,
    rng: &mut StdRng,
) -> Result<Vec<Point>, OddityError> {
    let pairs = count / 2;
    let mut points: Vec<Point> = Vec::with_capacity(count);
    let mut attempts = 0;
    let exhausted = |placed: usize, attempts: usize| OddityError::PlacementExhausted {
        requested: count,
        placed,
        attempts,
    };
    let clear = |points: &[Point], p: Point| points.iter().all(|q| q.distance(p) >= min_distance);

    if count % 2 == 1 {
        let mut axis_tries = 0;
        loop {
            if axis_tries >= axis_attempts {
                return Err(exhausted(0, axis_tries));
            }
            axis_tries += 1;
            let p = axis.on_axis(rng.random_range(0.0..=100.0));
            if interior.contains(p) {
                points.push(p);
                break;
            }
        }
        attempts += axis_tries;
    }

    let target = points.len() + pairs * 2;
    let mut pair_tries = 0;
    while points.len() < target {
        if pair_tries >= pair_attempts {
            debug!(requested = count, placed = points.len(), axis = axis.name(); "Symmetric scatter exhausted");
            return Err(exhausted(points.len(), attempts));
        }
        let Some(sample) = interior.sample(rng) else {
            return Err(exhausted(points.len(), attempts));
        };
        pair_tries += 1;
        attempts += 1;

        let p = if axis.in_canonical_half(sample) {
            sample
        } else {
            axis.mirror(sample)
        };
        let twin = axis.mirror(p);
        if axis.distance(p) >= min_distance / 2.0
            && interior.contains(p)
            && interior.contains(twin)
            && clear(&points, p)
            && clear(&points, twin)
        {
            points.push(p);
            points.push(twin);
        }
    }

    debug!(count, attempts, axis = axis.name(); "Symmetric scatter placed");
    Ok(points)
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;
    use rand::SeedableRng;

    use super::*;
    use crate::placement::{interior::CanvasInterior, scatter::ScatterSizing};

    // ===================
    // Strategies
    // ===================

    fn axis_strategy() -> impl Strategy<Value = SymmetryAxis> {
        proptest::sample::select(SymmetryAxis::ALL.to_vec())
    }

    // ===================
    // Property Test Functions
    // ===================

    /// An even symmetric scatter is its own mirror image.
    fn check_even_scatter_is_mirror_image(
        pairs: usize,
        axis: SymmetryAxis,
        seed: u64,
    ) -> Result<(), TestCaseError> {
        let count = pairs * 2;
        let sizing = ScatterSizing::for_count(9, false);
        let points = symmetric_scatter(
            count,
            sizing.min_distance(),
            axis,
            &CanvasInterior::new(sizing.margin()),
            6000,
            2000,
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();

        prop_assert_eq!(points.len(), count);
        for p in &points {
            let image = axis.mirror(*p);
            let has_image = points.iter().any(|q| {
                approx_eq!(f64, q.x(), image.x(), epsilon = 1e-9)
                    && approx_eq!(f64, q.y(), image.y(), epsilon = 1e-9)
            });
            prop_assert!(has_image);
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn even_scatter_is_mirror_image(
            pairs in 1usize..3,
            axis in axis_strategy(),
            seed in any::<u64>(),
        ) {
            check_even_scatter_is_mirror_image(pairs, axis, seed)?;
        }
    }
}
