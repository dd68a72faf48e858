//! Polyline approximation of path data.

use oddity_core::geometry::Point;

use crate::{
    arc::endpoint_to_center,
    command::{PathCommand, PathData},
};

/// Subdivision counts used when flattening curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenOptions {
    pub cubic_steps: usize,
    pub quad_steps: usize,
    pub arc_samples: usize,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            cubic_steps: 4,
            quad_steps: 3,
            arc_samples: 8,
        }
    }
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    p0.scale(mt * mt * mt)
        .add_point(p1.scale(3.0 * mt * mt * t))
        .add_point(p2.scale(3.0 * mt * t * t))
        .add_point(p3.scale(t * t * t))
}

fn quad_point(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    p0.scale(mt * mt)
        .add_point(p1.scale(2.0 * mt * t))
        .add_point(p2.scale(t * t))
}

impl PathData {
    /// Flattens the path into a single point list.
    ///
    /// Every command contributes its end point; curves contribute their
    /// intermediate samples first. `Z` appends the current subpath's start
    /// point. Degenerate arcs are drawn as straight lines.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity_path::{FlattenOptions, PathData};
    /// let path: PathData = "M 0 0 Q 5 10 10 0".parse().unwrap();
    /// let points = path.flatten(&FlattenOptions::default());
    /// // Move-to plus three quadratic samples
    /// assert_eq!(points.len(), 4);
    /// ```
    pub fn flatten(&self, options: &FlattenOptions) -> Vec<Point> {
        let mut points = Vec::new();
        let mut current = Point::default();
        let mut subpath_start = Point::default();

        for command in self.commands() {
            match *command {
                PathCommand::MoveTo(p) => {
                    points.push(p);
                    current = p;
                    subpath_start = p;
                }
                PathCommand::LineTo(p) => {
                    points.push(p);
                    current = p;
                }
                PathCommand::HorizontalTo(x) => {
                    current = Point::new(x, current.y());
                    points.push(current);
                }
                PathCommand::VerticalTo(y) => {
                    current = Point::new(current.x(), y);
                    points.push(current);
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    let steps = options.cubic_steps.max(1);
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        points.push(cubic_point(current, control1, control2, end, t));
                    }
                    current = end;
                }
                PathCommand::QuadTo { control, end } => {
                    let steps = options.quad_steps.max(1);
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        points.push(quad_point(current, control, end, t));
                    }
                    current = end;
                }
                PathCommand::ArcTo(arc) => {
                    match endpoint_to_center(current, &arc) {
                        Some(center) => points.extend(center.sample(options.arc_samples.max(1))),
                        None => points.push(arc.end),
                    }
                    current = arc.end;
                }
                PathCommand::Close => {
                    points.push(subpath_start);
                    current = subpath_start;
                }
            }
        }

        points
    }
}
