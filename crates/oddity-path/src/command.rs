//! Typed path commands and their serialization.

use std::{fmt, str::FromStr};

use oddity_core::geometry::Point;

use crate::{error::PathError, parser};

/// Parameters of an elliptical arc command, in endpoint form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse x-axis, in degrees
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub end: Point,
}

/// One absolute path command.
///
/// Implicit repetition is resolved at parse time: extra coordinate pairs after
/// a `M` become [`PathCommand::LineTo`], and repeated argument groups of any
/// other command become repeated commands of the same kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    HorizontalTo(f64),
    VerticalTo(f64),
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    QuadTo {
        control: Point,
        end: Point,
    },
    ArcTo(ArcSegment),
    Close,
}

impl PathCommand {
    /// Upper-case command letter
    pub fn letter(&self) -> char {
        match self {
            Self::MoveTo(_) => 'M',
            Self::LineTo(_) => 'L',
            Self::HorizontalTo(_) => 'H',
            Self::VerticalTo(_) => 'V',
            Self::CubicTo { .. } => 'C',
            Self::QuadTo { .. } => 'Q',
            Self::ArcTo(_) => 'A',
            Self::Close => 'Z',
        }
    }
}

/// A parsed path: an ordered list of absolute commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Builds `M p0 L p1 ... [Z]` from a point list.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity_core::geometry::Point;
    /// # use oddity_path::PathData;
    /// let points = [Point::new(0.0, 0.0), Point::new(10.0, 5.0)];
    /// let path = PathData::from_points(&points, false);
    /// assert_eq!(path.to_string(), "M 0.00 0.00 L 10.00 5.00");
    /// ```
    pub fn from_points(points: &[Point], close: bool) -> Self {
        let mut commands: Vec<PathCommand> = points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                if i == 0 {
                    PathCommand::MoveTo(p)
                } else {
                    PathCommand::LineTo(p)
                }
            })
            .collect();
        if close && !commands.is_empty() {
            commands.push(PathCommand::Close);
        }
        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromStr for PathData {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}

/// Serializes with two-decimal coordinates and integer arc flags
impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match command {
                PathCommand::MoveTo(p) => write!(f, "M {:.2} {:.2}", p.x(), p.y())?,
                PathCommand::LineTo(p) => write!(f, "L {:.2} {:.2}", p.x(), p.y())?,
                PathCommand::HorizontalTo(x) => write!(f, "H {x:.2}")?,
                PathCommand::VerticalTo(y) => write!(f, "V {y:.2}")?,
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => write!(
                    f,
                    "C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
                    control1.x(),
                    control1.y(),
                    control2.x(),
                    control2.y(),
                    end.x(),
                    end.y()
                )?,
                PathCommand::QuadTo { control, end } => write!(
                    f,
                    "Q {:.2} {:.2} {:.2} {:.2}",
                    control.x(),
                    control.y(),
                    end.x(),
                    end.y()
                )?,
                PathCommand::ArcTo(arc) => write!(
                    f,
                    "A {:.2} {:.2} {:.2} {} {} {:.2} {:.2}",
                    arc.rx,
                    arc.ry,
                    arc.x_axis_rotation,
                    u8::from(arc.large_arc),
                    u8::from(arc.sweep),
                    arc.end.x(),
                    arc.end.y()
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}
