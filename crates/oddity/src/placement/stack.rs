//! Overlapping stacks.

use std::{fmt, str::FromStr};

use oddity_core::geometry::Point;

use super::{Placement, recenter};
use crate::error::OddityError;

/// Nominal size of one stacked child in canvas units
const STACK_SIZE: f64 = 100.0 * 0.28;

/// Fraction of a child covered by the next one
const STACK_OVERLAP: f64 = 0.52;

/// Sideways drift of each child, as a fraction of its size
const STACK_DRIFT: f64 = 0.2;

/// Largest scale a stacked child is drawn at
const MAX_DRAW_SCALE: f64 = 0.28 * 1.6;

/// Direction a stack grows in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl StackDirection {
    pub const ALL: [StackDirection; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Offset from one child to the next
    fn step(self) -> Point {
        let advance = STACK_SIZE * (1.0 - STACK_OVERLAP);
        let drift = STACK_SIZE * STACK_DRIFT;
        match self {
            Self::Up => Point::new(drift, -advance),
            Self::Down => Point::new(drift, advance),
            Self::Right => Point::new(advance, drift),
            Self::Left => Point::new(-advance, drift),
        }
    }
}

impl fmt::Display for StackDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StackDirection {
    type Err = OddityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|direction| direction.name() == normalized)
            .ok_or_else(|| OddityError::configuration(format!("unknown direction `{s}`")))
    }
}

/// Places `count` overlapping children along `direction`.
///
/// The stack is centred on the canvas and every child is drawn at the
/// largest scale that keeps all of them on the canvas, capped at a fixed
/// maximum.
///
/// # Examples
///
/// ```
/// # use oddity::placement::{StackDirection, stack};
/// let placements = stack(3, StackDirection::Up);
/// assert_eq!(placements.len(), 3);
/// // Later children sit higher up
/// assert!(placements[2].center().y() < placements[0].center().y());
/// ```
pub fn stack(count: usize, direction: StackDirection) -> Vec<Placement> {
    let step = direction.step();
    let mut centers: Vec<Point> = (0..count)
        .map(|i| Point::canvas_center().add_point(step.scale(i as f64)))
        .collect();
    recenter(&mut centers);

    let fit = centers
        .iter()
        .map(|c| c.x().min(100.0 - c.x()).min(c.y()).min(100.0 - c.y()) / 50.0)
        .fold(f64::INFINITY, f64::min);
    let scale = MAX_DRAW_SCALE.min(fit);

    centers
        .into_iter()
        .map(|center| Placement::new(center, scale))
        .collect()
}
