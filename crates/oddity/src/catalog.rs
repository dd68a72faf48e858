//! The closed vocabulary of shapes and their canonical geometry.
//!
//! Every shape is drawn in the local `0..100` canvas. [`geometry`] returns a
//! [`ShapeGeometry`] for a [`ShapeKind`]: the polygon vertices used by
//! clipping and placement (empty for true circles), the outline path that is
//! actually drawn, optional explicit stroke segments, and the bounding box
//! that partitioning maps section percentages onto.
//!
//! Symbol shapes are resolved through a [`SymbolLibrary`].

use std::{
    f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI, TAU},
    fmt,
    str::FromStr,
};

use oddity_core::{
    geometry::{Bounds, Point, Segment, Size},
    polygon::Polygon,
};
use oddity_path::{ArcSegment, PathCommand, PathData};

use crate::{error::OddityError, symbol::SymbolLibrary};

/// Shape keys accepted in diagram descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Circle,
    Triangle,
    Square,
    Pentagon,
    Hexagon,
    Heptagon,
    Octagon,
    RightAngledTriangle,
    Rectangle,
    Semicircle,
    Cross,
    Arrow,
    Plus,
    Times,
    Club,
    Heart,
    Diamond,
    Spade,
    Star,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 19] = [
        Self::Circle,
        Self::Triangle,
        Self::Square,
        Self::Pentagon,
        Self::Hexagon,
        Self::Heptagon,
        Self::Octagon,
        Self::RightAngledTriangle,
        Self::Rectangle,
        Self::Semicircle,
        Self::Cross,
        Self::Arrow,
        Self::Plus,
        Self::Times,
        Self::Club,
        Self::Heart,
        Self::Diamond,
        Self::Spade,
        Self::Star,
    ];

    pub const SYMBOLS: [ShapeKind; 7] = [
        Self::Plus,
        Self::Times,
        Self::Club,
        Self::Heart,
        Self::Diamond,
        Self::Spade,
        Self::Star,
    ];

    /// Key used in descriptions and symbol file names
    pub fn key(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Square => "square",
            Self::Pentagon => "pentagon",
            Self::Hexagon => "hexagon",
            Self::Heptagon => "heptagon",
            Self::Octagon => "octagon",
            Self::RightAngledTriangle => "right_angled_triangle",
            Self::Rectangle => "rectangle",
            Self::Semicircle => "semicircle",
            Self::Cross => "cross",
            Self::Arrow => "arrow",
            Self::Plus => "plus",
            Self::Times => "times",
            Self::Club => "club",
            Self::Heart => "heart",
            Self::Diamond => "diamond",
            Self::Spade => "spade",
            Self::Star => "star",
        }
    }

    /// Number of sides of a regular polygon, including the square
    pub fn regular_sides(self) -> Option<usize> {
        match self {
            Self::Triangle => Some(3),
            Self::Square => Some(4),
            Self::Pentagon => Some(5),
            Self::Hexagon => Some(6),
            Self::Heptagon => Some(7),
            Self::Octagon => Some(8),
            _ => None,
        }
    }

    /// Shapes whose outline is a true circular arc
    pub fn is_curved(self) -> bool {
        matches!(self, Self::Circle | Self::Semicircle)
    }

    pub fn is_symbol(self) -> bool {
        Self::SYMBOLS.contains(&self)
    }

    /// Polygons that admit the cheaper convex interior test
    pub fn is_convex(self) -> bool {
        self.regular_sides().is_some() || matches!(self, Self::RightAngledTriangle | Self::Rectangle)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ShapeKind {
    type Err = OddityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized == "right_angle_triangle" {
            return Ok(Self::RightAngledTriangle);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == normalized)
            .ok_or_else(|| OddityError::configuration(format!("unknown shape key `{s}`")))
    }
}

/// Radius, centre height and phase of a regular polygon outline.
#[derive(Debug, Clone, Copy)]
struct RegularSpec {
    sides: usize,
    radius: f64,
    center_y: f64,
    phase: f64,
}

const fn regular(sides: usize, radius: f64, center_y: f64, phase: f64) -> RegularSpec {
    RegularSpec {
        sides,
        radius,
        center_y,
        phase,
    }
}

fn regular_spec(kind: ShapeKind) -> Option<RegularSpec> {
    match kind {
        ShapeKind::Triangle => Some(regular(3, 47.0, 62.5, 0.0)),
        ShapeKind::Pentagon => Some(regular(5, 38.0, 50.0, 0.0)),
        ShapeKind::Hexagon => Some(regular(6, 40.0, 50.0, PI / 6.0)),
        ShapeKind::Heptagon => Some(regular(7, 40.0, 50.0, 0.0)),
        ShapeKind::Octagon => Some(regular(8, 40.0, 50.0, PI / 8.0)),
        _ => None,
    }
}

const CIRCLE_RADIUS: f64 = 35.0;
const SEMICIRCLE_RADIUS: f64 = 42.0;
const SEMICIRCLE_BASE_Y: f64 = 67.5;
const RIGHT_TRIANGLE_MARGIN: f64 = 8.0;

/// Inner and outer coordinates of the cross arms
pub(crate) const CROSS_OUTER: (f64, f64) = (15.0, 85.0);
pub(crate) const CROSS_INNER: (f64, f64) = (36.0, 64.0);

/// The circle a curved shape is cut from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSpec {
    center: Point,
    radius: f64,
}

impl CircleSpec {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Polygon of `n` evenly spaced points starting at north
    pub fn to_polygon(&self, n: usize) -> Polygon {
        (0..n)
            .map(|k| {
                self.center
                    .polar(self.radius, -FRAC_PI_2 + TAU * k as f64 / n as f64)
            })
            .collect()
    }
}

/// Canonical geometry of one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGeometry {
    kind: ShapeKind,
    vertices: Polygon,
    outline: PathData,
    stroke_segments: Option<Vec<Segment>>,
    bounds: Bounds,
    circle: Option<CircleSpec>,
}

impl ShapeGeometry {
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Polygon vertices in positive orientation; empty for circle and semicircle
    pub fn vertices(&self) -> &Polygon {
        &self.vertices
    }

    /// The outline that is drawn and used as the shape's clip path
    pub fn outline(&self) -> &PathData {
        &self.outline
    }

    /// Explicit outline strokes drawn instead of stroking the outline path
    pub fn stroke_segments(&self) -> Option<&[Segment]> {
        self.stroke_segments.as_deref()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The enclosing circle of a curved shape
    pub fn circle(&self) -> Option<CircleSpec> {
        self.circle
    }

    /// Whether the outline must be filled with the even-odd rule
    pub fn is_even_odd(&self) -> bool {
        self.kind == ShapeKind::Cross
    }

    /// Area centroid of the vertices, or the bounding box centre when there
    /// are none
    pub fn centroid(&self) -> Point {
        self.vertices
            .centroid()
            .unwrap_or_else(|| self.bounds.center())
    }
}

/// Returns the canonical geometry of `kind`.
///
/// # Errors
///
/// Returns [`OddityError::Configuration`] when a symbol outline is missing
/// from `symbols`.
///
/// # Examples
///
/// ```
/// # use oddity::catalog::{ShapeKind, geometry};
/// # use oddity::symbol::SymbolLibrary;
/// let symbols = SymbolLibrary::builtin().unwrap();
/// let square = geometry(ShapeKind::Square, &symbols).unwrap();
/// assert_eq!(square.vertices().len(), 4);
/// assert_eq!(square.bounds().min_x(), 17.0);
/// ```
pub fn geometry(kind: ShapeKind, symbols: &SymbolLibrary) -> Result<ShapeGeometry, OddityError> {
    if let Some(geometry) = builtin_geometry(kind) {
        return Ok(geometry);
    }
    let symbol = symbols
        .outline(kind)
        .ok_or_else(|| OddityError::configuration(format!("no outline loaded for symbol `{kind}`")))?;
    let vertices = symbol.vertices().clone().ensure_ccw();
    let bounds = vertices.bounds().ok_or_else(|| {
        OddityError::configuration(format!("outline of symbol `{kind}` has no points"))
    })?;
    Ok(ShapeGeometry {
        kind,
        vertices,
        outline: symbol.display().clone(),
        stroke_segments: None,
        bounds,
        circle: None,
    })
}

/// Geometry of the shapes that need no symbol outline; `None` for symbols.
fn builtin_geometry(kind: ShapeKind) -> Option<ShapeGeometry> {
    if let Some(spec) = regular_spec(kind) {
        let center = Point::new(50.0, spec.center_y);
        let vertices = (0..spec.sides)
            .map(|k| {
                center.polar(
                    spec.radius,
                    -FRAC_PI_2 + spec.phase + TAU * k as f64 / spec.sides as f64,
                )
            })
            .collect();
        return Some(polygonal(kind, vertices));
    }
    let geometry = match kind {
        ShapeKind::Circle => {
            let center = Point::new(50.0, 50.0);
            let top = Point::new(50.0, 50.0 - CIRCLE_RADIUS);
            let bottom = Point::new(50.0, 50.0 + CIRCLE_RADIUS);
            let outline = PathData::new(vec![
                PathCommand::MoveTo(top),
                circular_arc(CIRCLE_RADIUS, false, bottom),
                circular_arc(CIRCLE_RADIUS, false, top),
                PathCommand::Close,
            ]);
            curved(
                kind,
                outline,
                Bounds::new_from_center(center, Size::new(2.0 * CIRCLE_RADIUS, 2.0 * CIRCLE_RADIUS)),
                CircleSpec::new(center, CIRCLE_RADIUS),
            )
        }
        ShapeKind::Semicircle => {
            let center = Point::new(50.0, SEMICIRCLE_BASE_Y);
            let left = Point::new(50.0 - SEMICIRCLE_RADIUS, SEMICIRCLE_BASE_Y);
            let right = Point::new(50.0 + SEMICIRCLE_RADIUS, SEMICIRCLE_BASE_Y);
            let outline = PathData::new(vec![
                PathCommand::MoveTo(left),
                circular_arc(SEMICIRCLE_RADIUS, false, right),
                PathCommand::Close,
            ]);
            curved(
                kind,
                outline,
                Bounds::new(
                    left.x(),
                    SEMICIRCLE_BASE_Y - SEMICIRCLE_RADIUS,
                    right.x(),
                    SEMICIRCLE_BASE_Y,
                ),
                CircleSpec::new(center, SEMICIRCLE_RADIUS),
            )
        }
        ShapeKind::Square => polygonal(
            kind,
            vec![
                Point::new(17.0, 17.0),
                Point::new(83.0, 17.0),
                Point::new(83.0, 83.0),
                Point::new(17.0, 83.0),
            ],
        ),
        ShapeKind::Rectangle => polygonal(
            kind,
            vec![
                Point::new(15.0, 28.125),
                Point::new(85.0, 28.125),
                Point::new(85.0, 71.875),
                Point::new(15.0, 71.875),
            ],
        ),
        ShapeKind::RightAngledTriangle => {
            let m = RIGHT_TRIANGLE_MARGIN;
            let pull = 2.0 * FRAC_1_SQRT_2;
            polygonal(
                kind,
                vec![
                    Point::new(m, 100.0 - m),
                    Point::new(m + pull, m + pull),
                    Point::new(100.0 - m - pull, 100.0 - m - pull),
                ],
            )
        }
        ShapeKind::Arrow => polygonal(
            kind,
            vec![
                Point::new(15.0, 25.0),
                Point::new(35.0, 25.0),
                Point::new(35.0, 15.0),
                Point::new(85.0, 50.0),
                Point::new(35.0, 85.0),
                Point::new(35.0, 75.0),
                Point::new(15.0, 75.0),
            ],
        ),
        ShapeKind::Cross => cross_geometry(),
        _ => return None,
    };
    Some(geometry)
}

fn circular_arc(radius: f64, large_arc: bool, end: Point) -> PathCommand {
    PathCommand::ArcTo(ArcSegment {
        rx: radius,
        ry: radius,
        x_axis_rotation: 0.0,
        large_arc,
        sweep: true,
        end,
    })
}

fn curved(kind: ShapeKind, outline: PathData, bounds: Bounds, circle: CircleSpec) -> ShapeGeometry {
    ShapeGeometry {
        kind,
        vertices: Polygon::default(),
        outline,
        stroke_segments: None,
        bounds,
        circle: Some(circle),
    }
}

fn polygonal(kind: ShapeKind, vertices: Vec<Point>) -> ShapeGeometry {
    let outline = PathData::from_points(&vertices, true);
    let vertices = Polygon::new(vertices).ensure_ccw();
    let bounds = vertices.bounds().unwrap_or_else(Bounds::canvas);
    ShapeGeometry {
        kind,
        vertices,
        outline,
        stroke_segments: None,
        bounds,
        circle: None,
    }
}

/// The cross is filled from one even-odd path and stroked as twelve
/// separate segments, so the outline never reads as a square.
fn cross_geometry() -> ShapeGeometry {
    let (lo, hi) = CROSS_OUTER;
    let (inner_lo, inner_hi) = CROSS_INNER;
    let outline = PathData::new(vec![
        PathCommand::MoveTo(Point::new(inner_lo, lo)),
        PathCommand::HorizontalTo(inner_hi),
        PathCommand::VerticalTo(inner_lo),
        PathCommand::HorizontalTo(hi),
        PathCommand::VerticalTo(inner_hi),
        PathCommand::HorizontalTo(inner_hi),
        PathCommand::VerticalTo(hi),
        PathCommand::HorizontalTo(inner_lo),
        PathCommand::VerticalTo(inner_hi),
        PathCommand::HorizontalTo(lo),
        PathCommand::VerticalTo(inner_lo),
        PathCommand::HorizontalTo(inner_lo),
        PathCommand::Close,
    ]);
    let vertices = Polygon::new(vec![
        Point::new(inner_lo, lo),
        Point::new(inner_hi, lo),
        Point::new(inner_hi, inner_lo),
        Point::new(hi, inner_lo),
        Point::new(hi, inner_hi),
        Point::new(inner_hi, inner_hi),
        Point::new(inner_hi, hi),
        Point::new(inner_lo, hi),
        Point::new(inner_lo, inner_hi),
        Point::new(lo, inner_hi),
        Point::new(lo, inner_lo),
        Point::new(inner_lo, inner_lo),
    ]);
    let stroke_segments = vertices.edges().collect();
    let bounds = Bounds::new(lo, lo, hi, hi);
    ShapeGeometry {
        kind: ShapeKind::Cross,
        vertices: vertices.ensure_ccw(),
        outline,
        stroke_segments: Some(stroke_segments),
        bounds,
        circle: None,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    fn all_geometries() -> Vec<ShapeGeometry> {
        let symbols = SymbolLibrary::builtin().unwrap();
        ShapeKind::ALL
            .iter()
            .map(|&kind| geometry(kind, &symbols).unwrap())
            .collect()
    }

    #[test]
    fn test_key_round_trip() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.key().parse::<ShapeKind>().unwrap(), kind);
        }
        assert_eq!(
            "Right_Angle_Triangle".parse::<ShapeKind>().unwrap(),
            ShapeKind::RightAngledTriangle
        );
    }

    #[test]
    fn test_unknown_key() {
        let err = "dodecagon".parse::<ShapeKind>().unwrap_err();
        assert!(matches!(err, OddityError::Configuration(_)));
        assert!(err.to_string().contains("dodecagon"));
    }

    #[test]
    fn test_bounds_contain_vertices() {
        for geometry in all_geometries() {
            let bounds = geometry.bounds();
            for &v in geometry.vertices().vertices() {
                assert!(
                    bounds.contains(v),
                    "{} vertex {v:?} outside {bounds:?}",
                    geometry.kind()
                );
            }
        }
    }

    #[test]
    fn test_vertices_positive_orientation() {
        for geometry in all_geometries() {
            if !geometry.vertices().is_empty() {
                assert!(geometry.vertices().signed_area() > 0.0, "{}", geometry.kind());
            }
        }
    }

    #[test]
    fn test_circle_geometry() {
        let circle = builtin_geometry(ShapeKind::Circle).unwrap();
        assert!(circle.vertices().is_empty());
        assert_eq!(circle.bounds(), Bounds::new(15.0, 15.0, 85.0, 85.0));
        assert_eq!(
            circle.outline().to_string(),
            "M 50.00 15.00 A 35.00 35.00 0.00 0 1 50.00 85.00 A 35.00 35.00 0.00 0 1 50.00 15.00 Z"
        );
    }

    #[test]
    fn test_semicircle_bounds_are_true_extent() {
        let semi = builtin_geometry(ShapeKind::Semicircle).unwrap();
        assert_eq!(semi.bounds(), Bounds::new(8.0, 25.5, 92.0, 67.5));
        assert_eq!(semi.circle().unwrap().radius(), 42.0);
    }

    #[test]
    fn test_square_outline() {
        let square = builtin_geometry(ShapeKind::Square).unwrap();
        assert_eq!(
            square.outline().to_string(),
            "M 17.00 17.00 L 83.00 17.00 L 83.00 83.00 L 17.00 83.00 Z"
        );
    }

    #[test]
    fn test_regular_polygon_table() {
        let triangle = builtin_geometry(ShapeKind::Triangle).unwrap();
        assert_eq!(triangle.vertices().len(), 3);
        let apex = triangle
            .vertices()
            .vertices()
            .iter()
            .copied()
            .fold(Point::new(0.0, 100.0), |a, b| if b.y() < a.y() { b } else { a });
        assert!(approx_eq!(f64, apex.x(), 50.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, apex.y(), 62.5 - 47.0, epsilon = 1e-9));

        let hexagon = builtin_geometry(ShapeKind::Hexagon).unwrap();
        let bounds = hexagon.bounds();
        // Phase pi/6 puts flat edges at top and bottom
        assert!(approx_eq!(f64, bounds.min_y(), 50.0 - 40.0 * (PI / 3.0).sin(), epsilon = 1e-9));

        let pentagon = builtin_geometry(ShapeKind::Pentagon).unwrap();
        assert!(approx_eq!(
            f64,
            pentagon.vertices().max_radius(Point::new(50.0, 50.0)),
            38.0,
            epsilon = 1e-9
        ));
    }

    #[test]
    fn test_right_angled_triangle() {
        let tri = builtin_geometry(ShapeKind::RightAngledTriangle).unwrap();
        assert!(tri.vertices().vertices().contains(&Point::new(8.0, 92.0)));
        let bounds = tri.bounds();
        assert!(approx_eq!(f64, bounds.min_y(), 8.0 + 2.0 * FRAC_1_SQRT_2, epsilon = 1e-9));
    }

    #[test]
    fn test_cross_strokes() {
        let cross = builtin_geometry(ShapeKind::Cross).unwrap();
        assert!(cross.is_even_odd());
        assert_eq!(cross.vertices().len(), 12);
        assert_eq!(cross.stroke_segments().unwrap().len(), 12);
        assert_eq!(
            cross.outline().to_string(),
            "M 36.00 15.00 H 64.00 V 36.00 H 85.00 V 64.00 H 64.00 V 85.00 H 36.00 V 64.00 H 15.00 V 36.00 H 36.00 Z"
        );
    }

    #[test]
    fn test_symbol_geometry_from_library() {
        let symbols = SymbolLibrary::builtin().unwrap();
        let star = geometry(ShapeKind::Star, &symbols).unwrap();
        assert_eq!(star.vertices().len(), 10);
        assert!(star.circle().is_none());
        let empty = SymbolLibrary::default();
        assert!(matches!(
            geometry(ShapeKind::Heart, &empty),
            Err(OddityError::Configuration(_))
        ));
    }

    #[test]
    fn test_kind_classes() {
        assert!(ShapeKind::Square.is_convex());
        assert!(!ShapeKind::Arrow.is_convex());
        assert!(ShapeKind::Semicircle.is_curved());
        assert!(ShapeKind::Club.is_symbol());
        assert_eq!(ShapeKind::Octagon.regular_sides(), Some(8));
        assert_eq!(ShapeKind::Circle.regular_sides(), None);
    }

    #[test]
    fn test_circle_spec_polygon() {
        let polygon = CircleSpec::new(Point::new(50.0, 50.0), 35.0).to_polygon(32);
        assert_eq!(polygon.len(), 32);
        assert!(approx_eq!(f64, polygon.vertices()[0].y(), 15.0, epsilon = 1e-9));
    }
}
