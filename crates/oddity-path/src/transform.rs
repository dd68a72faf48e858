//! Affine rewriting of path data.
//!
//! Scaling keeps every command kind (axis-aligned commands stay
//! axis-aligned). Rotation turns `H`/`V` into `L`, since the rotated
//! segment is generally no longer axis-aligned, and advances arc x-axis
//! rotations by the same angle.

use oddity_core::geometry::Point;

use crate::command::{ArcSegment, PathCommand, PathData};

impl PathData {
    /// Returns the path scaled by `factor` about `center`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity_core::geometry::Point;
    /// # use oddity_path::PathData;
    /// let path: PathData = "M 36 15 H 64 V 36 Z".parse().unwrap();
    /// let scaled = path.scale_about(Point::new(50.0, 50.0), 0.5);
    /// assert_eq!(scaled.to_string(), "M 43.00 32.50 H 57.00 V 43.00 Z");
    /// ```
    pub fn scale_about(&self, center: Point, factor: f64) -> Self {
        let scale = |p: Point| p.scale_about(center, factor);
        let commands = self
            .commands()
            .iter()
            .map(|command| match *command {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(scale(p)),
                PathCommand::LineTo(p) => PathCommand::LineTo(scale(p)),
                PathCommand::HorizontalTo(x) => {
                    PathCommand::HorizontalTo(center.x() + (x - center.x()) * factor)
                }
                PathCommand::VerticalTo(y) => {
                    PathCommand::VerticalTo(center.y() + (y - center.y()) * factor)
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => PathCommand::CubicTo {
                    control1: scale(control1),
                    control2: scale(control2),
                    end: scale(end),
                },
                PathCommand::QuadTo { control, end } => PathCommand::QuadTo {
                    control: scale(control),
                    end: scale(end),
                },
                PathCommand::ArcTo(arc) => PathCommand::ArcTo(ArcSegment {
                    rx: arc.rx * factor.abs(),
                    ry: arc.ry * factor.abs(),
                    end: scale(arc.end),
                    ..arc
                }),
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Self::new(commands)
    }

    /// Returns the path rotated by `degrees` about `center`.
    ///
    /// Positive angles rotate clockwise on screen, matching SVG's
    /// `rotate(a cx cy)` transform.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity_core::geometry::Point;
    /// # use oddity_path::PathData;
    /// let path: PathData = "M 50 10 H 60".parse().unwrap();
    /// let rotated = path.rotate_about(Point::new(50.0, 50.0), 90.0);
    /// assert_eq!(rotated.to_string(), "M 90.00 50.00 L 90.00 60.00");
    /// ```
    pub fn rotate_about(&self, center: Point, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        let rotate = |p: Point| p.rotate_about(center, radians);

        let mut current = Point::default();
        let mut subpath_start = Point::default();
        let mut commands = Vec::with_capacity(self.commands().len());

        for command in self.commands() {
            let rewritten = match *command {
                PathCommand::MoveTo(p) => {
                    current = p;
                    subpath_start = p;
                    PathCommand::MoveTo(rotate(p))
                }
                PathCommand::LineTo(p) => {
                    current = p;
                    PathCommand::LineTo(rotate(p))
                }
                PathCommand::HorizontalTo(x) => {
                    current = Point::new(x, current.y());
                    PathCommand::LineTo(rotate(current))
                }
                PathCommand::VerticalTo(y) => {
                    current = Point::new(current.x(), y);
                    PathCommand::LineTo(rotate(current))
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    current = end;
                    PathCommand::CubicTo {
                        control1: rotate(control1),
                        control2: rotate(control2),
                        end: rotate(end),
                    }
                }
                PathCommand::QuadTo { control, end } => {
                    current = end;
                    PathCommand::QuadTo {
                        control: rotate(control),
                        end: rotate(end),
                    }
                }
                PathCommand::ArcTo(arc) => {
                    current = arc.end;
                    PathCommand::ArcTo(ArcSegment {
                        x_axis_rotation: arc.x_axis_rotation + degrees,
                        end: rotate(arc.end),
                        ..arc
                    })
                }
                PathCommand::Close => {
                    current = subpath_start;
                    PathCommand::Close
                }
            };
            commands.push(rewritten);
        }

        Self::new(commands)
    }
}
