//! Partitioning a shape into shaded sections.
//!
//! [`partition`] cuts a [`ShapeGeometry`] into the fill regions described by
//! a [`PartitionSpec`] and computes the separator geometry drawn between
//! adjacent sections. Every region is drawn by the renderer inside a clip of
//! the shape outline, so regions that only approximate the outline (bands on
//! a circle, quadrants on an arrow) still end exactly at its edge.
//!
//! Three families of partition are supported:
//!
//! - **Linear** bands along `y`, `x`, `x + y` or `x - y`, clipped from the
//!   vertex polygon with Sutherland–Hodgman passes.
//! - **Concentric** rings: similar copies of the outline scaled about its
//!   centre, or annuli for the circle.
//! - **Radial** wedges: arcs for curved shapes, vertex fans for regular
//!   polygons and quadrants for everything else.

use std::{
    f64::consts::{FRAC_PI_2, PI, TAU},
    fmt,
    str::FromStr,
};

use log::debug;

use oddity_core::{
    draw::Shading,
    geometry::{Bounds, Point, Segment},
    polygon::Polygon,
};
use oddity_path::{ArcSegment, PathCommand, PathData};

use crate::{
    catalog::{CircleSpec, ShapeGeometry, ShapeKind},
    clip::{self, BandAxis},
    error::OddityError,
};

const BOUNDARY_EPSILON: f64 = 1e-9;

/// Chords used to draw a circular concentric separator
const RING_SEPARATOR_CHORDS: usize = 32;

/// Diagonal separators shorter than this are dropped
const MIN_SEPARATOR_LENGTH: f64 = 0.1;

/// Axis along which a shape is partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionDirection {
    Horizontal,
    Vertical,
    /// Bands along `x + y`
    DiagonalSlash,
    /// Bands along `x - y`
    DiagonalBackslash,
    Concentric,
    Radial,
}

impl PartitionDirection {
    pub const ALL: [PartitionDirection; 6] = [
        Self::Horizontal,
        Self::Vertical,
        Self::DiagonalSlash,
        Self::DiagonalBackslash,
        Self::Concentric,
        Self::Radial,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::DiagonalSlash => "diagonal_slash",
            Self::DiagonalBackslash => "diagonal_backslash",
            Self::Concentric => "concentric",
            Self::Radial => "radial",
        }
    }

    /// The band axis of a linear direction
    fn band_axis(self) -> Option<BandAxis> {
        match self {
            Self::Horizontal => Some(BandAxis::Y),
            Self::Vertical => Some(BandAxis::X),
            Self::DiagonalSlash => Some(BandAxis::Sum),
            Self::DiagonalBackslash => Some(BandAxis::Diff),
            Self::Concentric | Self::Radial => None,
        }
    }

    fn is_diagonal(self) -> bool {
        matches!(self, Self::DiagonalSlash | Self::DiagonalBackslash)
    }
}

impl fmt::Display for PartitionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PartitionDirection {
    type Err = OddityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|direction| direction.name() == normalized)
            .ok_or_else(|| OddityError::configuration(format!("unknown partition direction `{s}`")))
    }
}

/// How a shape is divided into sections.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionSpec {
    direction: PartitionDirection,
    boundaries: Vec<f64>,
    shadings: Vec<Shading>,
}

impl PartitionSpec {
    /// Creates a partition from explicit percentage boundaries.
    ///
    /// Section shadings cycle when fewer shadings than sections are given.
    ///
    /// # Errors
    ///
    /// Returns [`OddityError::Configuration`] unless the boundaries start at
    /// 0, end at 100 and are strictly increasing.
    pub fn new(
        direction: PartitionDirection,
        boundaries: Vec<f64>,
        shadings: Vec<Shading>,
    ) -> Result<Self, OddityError> {
        if boundaries.len() < 2 {
            return Err(OddityError::configuration(
                "a partition needs at least two boundaries",
            ));
        }
        let first = boundaries[0];
        let last = boundaries[boundaries.len() - 1];
        if first.abs() > BOUNDARY_EPSILON || (last - 100.0).abs() > BOUNDARY_EPSILON {
            return Err(OddityError::configuration(format!(
                "partition boundaries must run from 0 to 100, got {first} to {last}"
            )));
        }
        if boundaries.windows(2).any(|pair| pair[1] - pair[0] <= BOUNDARY_EPSILON) {
            return Err(OddityError::configuration(format!(
                "partition boundaries must be strictly increasing: {boundaries:?}"
            )));
        }
        Ok(Self {
            direction,
            boundaries,
            shadings,
        })
    }

    /// Creates `sections` evenly sized sections.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity::partition::{PartitionDirection, PartitionSpec};
    /// # use oddity_core::draw::Shading;
    /// let spec = PartitionSpec::even(PartitionDirection::Vertical, 4, vec![Shading::None]).unwrap();
    /// assert_eq!(spec.boundaries(), &[0.0, 25.0, 50.0, 75.0, 100.0]);
    /// ```
    pub fn even(
        direction: PartitionDirection,
        sections: usize,
        shadings: Vec<Shading>,
    ) -> Result<Self, OddityError> {
        if sections == 0 {
            return Err(OddityError::configuration("a partition needs at least one section"));
        }
        let boundaries = (0..=sections)
            .map(|i| 100.0 * i as f64 / sections as f64)
            .collect();
        Self::new(direction, boundaries, shadings)
    }

    pub fn direction(&self) -> PartitionDirection {
        self.direction
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn section_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// `(lo, hi)` percentages of every section
    pub fn section_bounds(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.boundaries.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Boundaries strictly between 0 and 100
    fn internal_boundaries(&self) -> &[f64] {
        &self.boundaries[1..self.boundaries.len() - 1]
    }

    /// Shading of section `index`, cycling through the given shadings
    pub fn shading(&self, index: usize) -> Shading {
        if self.shadings.is_empty() {
            return Shading::None;
        }
        self.shadings[index % self.shadings.len()]
    }
}

/// The area covered by one section.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Polygon(Polygon),
    /// The area between two scaled copies of a polygon outline
    Ring { outer: Polygon, inner: Option<Polygon> },
    Path { data: PathData, even_odd: bool },
}

impl Region {
    /// Serialized path data of the region
    pub fn to_path_data(&self) -> String {
        match self {
            Self::Polygon(polygon) => polygon.to_path_data(),
            Self::Ring { outer, inner: None } => outer.to_path_data(),
            Self::Ring {
                outer,
                inner: Some(inner),
            } => format!("{} {}", outer.to_path_data(), inner.to_path_data()),
            Self::Path { data, .. } => data.to_string(),
        }
    }

    /// Whether the region must be filled with the even-odd rule
    pub fn is_even_odd(&self) -> bool {
        match self {
            Self::Polygon(_) => false,
            Self::Ring { inner, .. } => inner.is_some(),
            Self::Path { even_odd, .. } => *even_odd,
        }
    }

    /// Exact area for polygonal regions
    pub fn polygon_area(&self) -> Option<f64> {
        match self {
            Self::Polygon(polygon) => Some(polygon.area()),
            Self::Ring { outer, inner } => {
                Some(outer.area() - inner.as_ref().map_or(0.0, Polygon::area))
            }
            Self::Path { .. } => None,
        }
    }
}

/// One shaded section of a partitioned shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    region: Region,
    shading: Shading,
}

impl Section {
    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn shading(&self) -> Shading {
        self.shading
    }
}

/// A line or curve drawn between adjacent sections.
#[derive(Debug, Clone, PartialEq)]
pub enum Separator {
    Line(Segment),
    Path(PathData),
}

/// Sections and separators of a partitioned shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    sections: Vec<Section>,
    separators: Vec<Separator>,
}

impl Partition {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn separators(&self) -> &[Separator] {
        &self.separators
    }
}

/// Cuts `shape` into the sections described by `spec`.
///
/// # Errors
///
/// Returns [`OddityError::Configuration`] for combinations the engine does
/// not draw: fewer than two sections, a diagonal partition of a curved
/// shape, or a radial section count the shape cannot be divided into.
///
/// # Examples
///
/// ```
/// # use oddity::catalog::{ShapeKind, geometry};
/// # use oddity::partition::{PartitionDirection, PartitionSpec, partition};
/// # use oddity::symbol::SymbolLibrary;
/// # use oddity_core::draw::Shading;
/// let square = geometry(ShapeKind::Square, &SymbolLibrary::default()).unwrap();
/// let spec = PartitionSpec::even(PartitionDirection::Horizontal, 2, vec![Shading::None]).unwrap();
/// let halves = partition(&square, &spec).unwrap();
/// assert_eq!(halves.sections().len(), 2);
/// assert_eq!(halves.separators().len(), 1);
/// ```
pub fn partition(shape: &ShapeGeometry, spec: &PartitionSpec) -> Result<Partition, OddityError> {
    let kind = shape.kind();
    let direction = spec.direction();
    if spec.section_count() < 2 {
        return Err(OddityError::configuration(format!(
            "partitioning {kind} needs at least two sections"
        )));
    }
    debug!(
        shape = kind.key(),
        direction = direction.name(),
        sections = spec.section_count();
        "Partitioning shape"
    );

    let (regions, separators) = match direction.band_axis() {
        Some(axis) => linear(shape, spec, axis)?,
        None if direction == PartitionDirection::Concentric => concentric(shape, spec),
        None => radial(shape, spec)?,
    };

    let sections = regions
        .into_iter()
        .enumerate()
        .map(|(i, region)| Section {
            region,
            shading: spec.shading(i),
        })
        .collect();
    Ok(Partition {
        sections,
        separators,
    })
}

type Parts = (Vec<Region>, Vec<Separator>);

fn linear(shape: &ShapeGeometry, spec: &PartitionSpec, axis: BandAxis) -> Result<Parts, OddityError> {
    let kind = shape.kind();
    let circle = shape.circle();
    if circle.is_some() && spec.direction().is_diagonal() {
        return Err(OddityError::configuration(format!(
            "{} partition is not supported on {kind}",
            spec.direction()
        )));
    }

    let bounds = shape.bounds();
    let (axis_lo, axis_hi) = axis.range(bounds);
    let level = |percent: f64| axis_lo + (axis_hi - axis_lo) * percent / 100.0;

    // Curves and symbols are cut from the whole canvas and clipped by the outline
    let subject = if circle.is_some() || kind.is_symbol() {
        Polygon::new(Bounds::canvas().corners().to_vec())
    } else {
        shape.vertices().clone()
    };
    let regions = spec
        .section_bounds()
        .map(|(lo, hi)| Region::Polygon(clip::clip_band(&subject, axis, level(lo), level(hi))))
        .collect();

    let separators = spec
        .internal_boundaries()
        .iter()
        .filter_map(|&percent| {
            let at = level(percent);
            match (axis, circle) {
                (BandAxis::Y, None) => Some(Segment::new(
                    Point::new(bounds.min_x(), at),
                    Point::new(bounds.max_x(), at),
                )),
                (BandAxis::X, None) => Some(Segment::new(
                    Point::new(at, bounds.min_y()),
                    Point::new(at, bounds.max_y()),
                )),
                (_, Some(circle)) => curved_chord(kind, circle, axis.level_line(at)),
                (_, None) => clip::clip_segment_to_bounds(axis.level_line(at), bounds)
                    .filter(|segment| segment.length() >= MIN_SEPARATOR_LENGTH),
            }
        })
        .map(Separator::Line)
        .collect();

    Ok((regions, separators))
}

/// Chord of a circle, cut at the flat edge for the semicircle
fn curved_chord(kind: ShapeKind, circle: CircleSpec, line: Segment) -> Option<Segment> {
    let chord = clip::clip_segment_to_circle(line, circle)?;
    if kind == ShapeKind::Semicircle {
        let base = circle.center().y();
        return clip::clip_segment_half_plane(chord, |p| base - p.y());
    }
    Some(chord)
}

fn concentric(shape: &ShapeGeometry, spec: &PartitionSpec) -> Parts {
    let internal = spec.internal_boundaries();
    let factor = |percent: f64| percent / 100.0;

    if let Some(circle) = shape.circle().filter(|_| shape.kind() == ShapeKind::Circle) {
        let radius = |percent: f64| circle.radius() * factor(percent);
        let regions = spec
            .section_bounds()
            .map(|(lo, hi)| {
                let mut commands = circle_commands(circle.center(), radius(hi));
                let hollow = lo > BOUNDARY_EPSILON;
                if hollow {
                    commands.extend(circle_commands(circle.center(), radius(lo)));
                }
                Region::Path {
                    data: PathData::new(commands),
                    even_odd: hollow,
                }
            })
            .collect();
        let separators = internal
            .iter()
            .map(|&percent| {
                let ring = CircleSpec::new(circle.center(), radius(percent))
                    .to_polygon(RING_SEPARATOR_CHORDS);
                Separator::Path(PathData::from_points(ring.vertices(), true))
            })
            .collect();
        return (regions, separators);
    }

    if shape.vertices().is_empty() || shape.kind().is_symbol() {
        // Scaled copies of the drawn outline
        let center = match shape.circle() {
            Some(circle) => circle.center(),
            None => shape.bounds().center(),
        };
        let scaled = |percent: f64| shape.outline().scale_about(center, factor(percent));
        let regions = spec
            .section_bounds()
            .map(|(lo, hi)| {
                let mut commands = scaled(hi).commands().to_vec();
                let hollow = lo > BOUNDARY_EPSILON;
                if hollow {
                    commands.extend_from_slice(scaled(lo).commands());
                }
                Region::Path {
                    data: PathData::new(commands),
                    even_odd: hollow,
                }
            })
            .collect();
        let separators = internal
            .iter()
            .map(|&percent| Separator::Path(scaled(percent)))
            .collect();
        return (regions, separators);
    }

    let center = shape.centroid();
    let scaled = |percent: f64| shape.vertices().scaled_about(center, factor(percent));
    let regions = spec
        .section_bounds()
        .map(|(lo, hi)| Region::Ring {
            outer: scaled(hi),
            inner: (lo > BOUNDARY_EPSILON).then(|| scaled(lo)),
        })
        .collect();
    let separators = internal
        .iter()
        .flat_map(|&percent| scaled(percent).edges().collect::<Vec<_>>())
        .map(Separator::Line)
        .collect();
    (regions, separators)
}

fn radial(shape: &ShapeGeometry, spec: &PartitionSpec) -> Result<Parts, OddityError> {
    let kind = shape.kind();
    let sections = spec.section_count();

    if let Some(circle) = shape.circle() {
        // The semicircle's wedges fan across its upper half only
        let (start, span) = match kind {
            ShapeKind::Semicircle => (PI, PI),
            _ => (-FRAC_PI_2, TAU),
        };
        let separator_percents = match kind {
            ShapeKind::Semicircle => spec.internal_boundaries(),
            _ => &spec.boundaries()[..sections],
        };
        return Ok(wedge_parts(spec, circle, start, span, separator_percents));
    }

    if let Some(sides) = kind.regular_sides() {
        if sides % sections != 0 {
            return Err(OddityError::configuration(format!(
                "radial partition of {kind} into {sections} sections: {sections} does not divide {sides} sides"
            )));
        }
        return Ok(vertex_fan(shape, sections));
    }

    if kind == ShapeKind::Star && sections == 5 {
        let center = shape.centroid();
        let circle = CircleSpec::new(center, shape.vertices().max_radius(center));
        return Ok(wedge_parts(
            spec,
            circle,
            -FRAC_PI_2,
            TAU,
            &spec.boundaries()[..sections],
        ));
    }

    if sections != 4 {
        return Err(OddityError::configuration(format!(
            "radial partition of {kind} supports exactly 4 sections, got {sections}"
        )));
    }
    Ok(quadrants(shape.centroid()))
}

/// Wedges of `circle` covering `span` radians from `start`, split at the
/// section percentages
fn wedge_parts(
    spec: &PartitionSpec,
    circle: CircleSpec,
    start: f64,
    span: f64,
    separator_percents: &[f64],
) -> Parts {
    let angle = |percent: f64| start + span * percent / 100.0;
    let regions = spec
        .section_bounds()
        .map(|(lo, hi)| Region::Path {
            data: wedge(circle, angle(lo), angle(hi)),
            even_odd: false,
        })
        .collect();
    let separators = separator_percents
        .iter()
        .map(|&percent| {
            Separator::Line(Segment::new(
                circle.center(),
                circle.center().polar(circle.radius(), angle(percent)),
            ))
        })
        .collect();
    (regions, separators)
}

fn wedge(circle: CircleSpec, from: f64, to: f64) -> PathData {
    let center = circle.center();
    let radius = circle.radius();
    PathData::new(vec![
        PathCommand::MoveTo(center),
        PathCommand::LineTo(center.polar(radius, from)),
        PathCommand::ArcTo(ArcSegment {
            rx: radius,
            ry: radius,
            x_axis_rotation: 0.0,
            large_arc: to - from > PI,
            sweep: true,
            end: center.polar(radius, to),
        }),
        PathCommand::Close,
    ])
}

/// Full circle as two half arcs starting at north
fn circle_commands(center: Point, radius: f64) -> Vec<PathCommand> {
    let top = Point::new(center.x(), center.y() - radius);
    let bottom = Point::new(center.x(), center.y() + radius);
    let arc = |end| {
        PathCommand::ArcTo(ArcSegment {
            rx: radius,
            ry: radius,
            x_axis_rotation: 0.0,
            large_arc: false,
            sweep: true,
            end,
        })
    };
    vec![
        PathCommand::MoveTo(top),
        arc(bottom),
        arc(top),
        PathCommand::Close,
    ]
}

/// Wedges from the centroid of a regular polygon, each covering the same
/// number of consecutive edges
fn vertex_fan(shape: &ShapeGeometry, sections: usize) -> Parts {
    let vertices = shape.vertices().vertices();
    let sides = vertices.len();
    let step = sides / sections;
    let center = shape.centroid();

    let regions = (0..sections)
        .map(|i| {
            let fan = std::iter::once(center)
                .chain((0..=step).map(|k| vertices[(i * step + k) % sides]))
                .collect();
            Region::Polygon(fan)
        })
        .collect();
    let separators = (0..sections)
        .map(|i| Separator::Line(Segment::new(center, vertices[i * step])))
        .collect();
    (regions, separators)
}

/// Four canvas quadrants meeting at `center`, in TL, TR, BR, BL order
fn quadrants(center: Point) -> Parts {
    let (cx, cy) = (center.x(), center.y());
    let quad = |x0: f64, y0: f64, x1: f64, y1: f64| {
        Region::Polygon(Polygon::new(vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]))
    };
    let regions = vec![
        quad(0.0, 0.0, cx, cy),
        quad(cx, 0.0, 100.0, cy),
        quad(cx, cy, 100.0, 100.0),
        quad(0.0, cy, cx, 100.0),
    ];
    let separators = vec![
        Separator::Line(Segment::new(Point::new(cx, 0.0), Point::new(cx, 100.0))),
        Separator::Line(Segment::new(Point::new(0.0, cy), Point::new(100.0, cy))),
    ];
    (regions, separators)
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{catalog::geometry, symbol::SymbolLibrary};

    // ===================
    // Strategies
    // ===================

    fn polygon_kind_strategy() -> impl Strategy<Value = ShapeKind> {
        let kinds: Vec<ShapeKind> = ShapeKind::ALL
            .into_iter()
            .filter(|kind| !kind.is_curved() && !kind.is_symbol())
            .collect();
        proptest::sample::select(kinds)
    }

    fn linear_direction_strategy() -> impl Strategy<Value = PartitionDirection> {
        prop_oneof![
            Just(PartitionDirection::Horizontal),
            Just(PartitionDirection::Vertical),
            Just(PartitionDirection::DiagonalSlash),
            Just(PartitionDirection::DiagonalBackslash),
        ]
    }

    fn boundaries_strategy() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(1.0f64..99.0, 1..5).prop_map(|mut cuts| {
            cuts.sort_by(f64::total_cmp);
            cuts.dedup_by(|a, b| (*a - *b).abs() < 0.5);
            let mut boundaries = vec![0.0];
            boundaries.extend(cuts);
            boundaries.push(100.0);
            boundaries
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Band areas of a linear partition sum to the polygon area.
    fn check_bands_cover_polygon(
        kind: ShapeKind,
        direction: PartitionDirection,
        boundaries: Vec<f64>,
    ) -> Result<(), TestCaseError> {
        let shape = geometry(kind, &SymbolLibrary::default()).unwrap();
        let spec = PartitionSpec::new(direction, boundaries, vec![Shading::None]).unwrap();
        let result = partition(&shape, &spec).unwrap();
        prop_assert_eq!(result.sections().len(), spec.section_count());
        prop_assert!(result.separators().len() < spec.section_count());

        let total: f64 = result
            .sections()
            .iter()
            .map(|s| s.region().polygon_area().unwrap_or(0.0))
            .sum();
        prop_assert!(
            approx_eq!(f64, total, shape.vertices().area(), epsilon = 1e-6),
            "{} {}: {} != {}",
            kind,
            direction,
            total,
            shape.vertices().area()
        );
        Ok(())
    }

    /// Concentric rings of a polygon sum to its area.
    fn check_rings_cover_polygon(kind: ShapeKind, boundaries: Vec<f64>) -> Result<(), TestCaseError> {
        let shape = geometry(kind, &SymbolLibrary::default()).unwrap();
        let spec = PartitionSpec::new(PartitionDirection::Concentric, boundaries, vec![]).unwrap();
        let result = partition(&shape, &spec).unwrap();
        let total: f64 = result
            .sections()
            .iter()
            .map(|s| s.region().polygon_area().unwrap_or(0.0))
            .sum();
        prop_assert!(approx_eq!(f64, total, shape.vertices().area(), epsilon = 1e-6));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn bands_cover_polygon(
            kind in polygon_kind_strategy(),
            direction in linear_direction_strategy(),
            boundaries in boundaries_strategy(),
        ) {
            check_bands_cover_polygon(kind, direction, boundaries)?;
        }

        #[test]
        fn rings_cover_polygon(
            kind in polygon_kind_strategy(),
            boundaries in boundaries_strategy(),
        ) {
            check_rings_cover_polygon(kind, boundaries)?;
        }
    }
}
