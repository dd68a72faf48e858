//! Placement of child fragments inside a parent canvas.
//!
//! Every placement operation works in the parent's local `0..100` canvas and
//! produces [`Placement`]s: a centre plus the uniform scale the child's own
//! `0..100` canvas is drawn at. All randomness comes from the caller's seeded
//! [`StdRng`](rand::rngs::StdRng), so identical inputs always produce
//! identical positions.
//!
//! # Overview
//!
//! - [`scatter`] - Rejection-sampled positions with a minimum spacing
//! - [`symmetric_scatter`] - Mirrored pairs about a [`SymmetryAxis`]
//! - [`stack`] - Overlapping children advancing along a [`StackDirection`]
//! - [`rect_grid`], [`triangular`], [`circle_loop`], [`polygon_loop`] -
//!   Array arrangements with their mesh helpers
//!
//! Scatter placements test candidates against an [`Interior`]: the whole
//! canvas for a free scatter, or a container shape for motifs scattered
//! inside it.

mod array;
mod interior;
mod scatter;
mod stack;
mod symmetric;

pub use array::{
    LoopArrangement, LoopPositions, circle_loop, polygon_loop, rect_grid, rect_mesh, triangular,
    triangular_mesh, triangular_rows,
};
pub use interior::{CanvasInterior, ContainerInterior, Interior};
pub use scatter::{AttemptLimit, ScatterSizing, scatter};
pub use stack::{StackDirection, stack};
pub use symmetric::{SymmetryAxis, symmetric_scatter};

use oddity_core::geometry::Point;

/// A resolved position of one child in its parent's canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    center: Point,
    scale: f64,
}

impl Placement {
    pub fn new(center: Point, scale: f64) -> Self {
        Self { center, scale }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Same centre at a different scale
    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// SVG transform mapping the child's canvas onto this placement.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity::placement::Placement;
    /// # use oddity_core::geometry::Point;
    /// let placement = Placement::new(Point::new(25.0, 75.0), 0.5);
    /// assert_eq!(
    ///     placement.transform(),
    ///     "translate(25.00, 75.00) scale(0.5000) translate(-50, -50)"
    /// );
    /// ```
    pub fn transform(&self) -> String {
        format!(
            "translate({:.2}, {:.2}) scale({:.4}) translate(-50, -50)",
            self.center.x(),
            self.center.y(),
            self.scale
        )
    }
}

/// Shifts `points` so the centre of their bounding box is the canvas centre.
fn recenter(points: &mut [Point]) {
    let Some(bounds) = oddity_core::geometry::Bounds::from_points(points.iter().copied()) else {
        return;
    };
    let offset = Point::canvas_center().sub_point(bounds.center());
    for p in points.iter_mut() {
        *p = p.add_point(offset);
    }
}
