//! Geometric primitives for shape outlines and placement.
//!
//! Every diagram fragment is drawn in a local square canvas spanning
//! `0..100` on both axes. Nested fragments are mapped into their parent's
//! canvas with a translate/scale transform, so all geometry in this module
//! works in those local units.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned bounding box
//! - [`Segment`] - A straight line between two points
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y        (100,100)
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **Y-axis**: Increases downward, matching SVG

/// Side length of the local canvas every fragment is drawn in.
pub const CANVAS_SIZE: f64 = 100.0;

/// Centre coordinate of the local canvas on both axes.
pub const CANVAS_CENTER: f64 = 50.0;

/// A 2D point in canvas coordinate space.
///
/// # Examples
///
/// ```
/// # use oddity_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(30.0, 40.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 20.0);
/// assert_eq!(mid.y(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the centre of the local canvas, `(50, 50)`
    pub fn canvas_center() -> Self {
        Self::new(CANVAS_CENTER, CANVAS_CENTER)
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`
    pub fn lerp(self, other: Point, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        self.sub_point(other).hypot()
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Scales this point about `center` by `factor`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity_core::geometry::Point;
    /// let p = Point::new(60.0, 50.0);
    /// let scaled = p.scale_about(Point::canvas_center(), 2.0);
    /// assert_eq!(scaled, Point::new(70.0, 50.0));
    /// ```
    pub fn scale_about(self, center: Point, factor: f64) -> Self {
        center.add_point(self.sub_point(center).scale(factor))
    }

    /// Rotates this point about `center` by `radians` (clockwise on screen, since Y points down)
    pub fn rotate_about(self, center: Point, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        let d = self.sub_point(center);
        Self {
            x: center.x + d.x * cos - d.y * sin,
            y: center.y + d.x * sin + d.y * cos,
        }
    }

    /// Point on the circle of `radius` around `self` at `angle` radians
    pub fn polar(self, radius: f64, angle: f64) -> Self {
        Self {
            x: self.x + radius * angle.cos(),
            y: self.y + radius * angle.sin(),
        }
    }

    /// 2D cross product (z component) of the vectors `self` and `other`
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Dot product of the vectors `self` and `other`
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Represents an axis-aligned bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds from explicit minimum and maximum coordinates
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds of the whole local canvas, `(0, 0)..(100, 100)`
    pub fn canvas() -> Self {
        Self::new(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE)
    }

    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity_core::geometry::{Bounds, Point};
    /// let points = [Point::new(10.0, 40.0), Point::new(30.0, 20.0)];
    /// let bounds = Bounds::from_points(points).unwrap();
    /// assert_eq!(bounds.min_x(), 10.0);
    /// assert_eq!(bounds.max_y(), 40.0);
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let start = Self::new(first.x, first.y, first.x, first.y);
        Some(iter.fold(start, |acc, p| Self {
            min_x: acc.min_x.min(p.x),
            min_y: acc.min_y.min(p.y),
            max_x: acc.max_x.max(p.x),
            max_y: acc.max_y.max(p.y),
        }))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Returns true when `p` lies inside or on the edge of the bounds
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Merges two bounds to create a larger bounds that contains both
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Shrinks the bounds by `amount` on every side.
    ///
    /// A negative amount grows the bounds. The result may be inverted
    /// (`min > max`) when the inset exceeds half the size; callers that sample
    /// from the result must check [`Bounds::is_empty`].
    pub fn inset(&self, amount: f64) -> Self {
        Self {
            min_x: self.min_x + amount,
            min_y: self.min_y + amount,
            max_x: self.max_x - amount,
            max_y: self.max_y - amount,
        }
    }

    /// Returns true when the bounds enclose no area
    pub fn is_empty(self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Returns the four corners clockwise on screen, starting top-left
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

/// A straight line segment between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn start(self) -> Point {
        self.start
    }

    pub fn end(self) -> Point {
        self.end
    }

    /// Euclidean length of the segment
    pub fn length(self) -> f64 {
        self.start.distance(self.end)
    }

    /// Manhattan length, used to discard degenerate clipped segments
    pub fn manhattan_length(self) -> f64 {
        (self.end.x - self.start.x).abs() + (self.end.y - self.start.y).abs()
    }

    /// Shortest distance from `p` to any point on this segment.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity_core::geometry::{Point, Segment};
    /// let segment = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    /// assert_eq!(segment.distance_to(Point::new(5.0, 3.0)), 3.0);
    /// assert_eq!(segment.distance_to(Point::new(14.0, 3.0)), 5.0);
    /// ```
    pub fn distance_to(self, p: Point) -> f64 {
        let d = self.end.sub_point(self.start);
        let len_sq = d.dot(d);
        if len_sq == 0.0 {
            return p.distance(self.start);
        }
        let t = (p.sub_point(self.start).dot(d) / len_sq).clamp(0.0, 1.0);
        p.distance(self.start.lerp(self.end, t))
    }

    /// Applies `f` to both endpoints
    pub fn map(self, f: impl Fn(Point) -> Point) -> Self {
        Self {
            start: f(self.start),
            end: f(self.end),
        }
    }
}
