//! Symbol outlines loaded from `shape-{key}.svg` files.
//!
//! Each symbol file contributes its first `<path d="...">`, optionally wrapped
//! in a `<g transform="rotate(a cx cy)">`. The rotation is baked into the
//! displayed path so that renderers never have to carry a transform, and the
//! rotated path is flattened into the polygon used for bounds, clipping and
//! placement.

use std::{collections::HashMap, fs, path::Path};

use log::{debug, trace, warn};
use svg::{node::element::tag::Type, parser::Event};

use oddity_core::{geometry::Point, polygon::Polygon};
use oddity_path::{FlattenOptions, PathData};

use crate::{catalog::ShapeKind, config::SymbolConfig, error::OddityError};

const BUILTIN_SOURCES: [(ShapeKind, &str); 7] = [
    (ShapeKind::Plus, include_str!("../assets/symbols/shape-plus.svg")),
    (ShapeKind::Times, include_str!("../assets/symbols/shape-times.svg")),
    (ShapeKind::Club, include_str!("../assets/symbols/shape-club.svg")),
    (ShapeKind::Heart, include_str!("../assets/symbols/shape-heart.svg")),
    (ShapeKind::Diamond, include_str!("../assets/symbols/shape-diamond.svg")),
    (ShapeKind::Spade, include_str!("../assets/symbols/shape-spade.svg")),
    (ShapeKind::Star, include_str!("../assets/symbols/shape-star.svg")),
];

/// A `rotate(a cx cy)` transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    degrees: f64,
    center: Point,
}

impl Rotation {
    pub fn new(degrees: f64, center: Point) -> Self {
        Self { degrees, center }
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn center(&self) -> Point {
        self.center
    }
}

/// One parsed symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolOutline {
    display: PathData,
    vertices: Polygon,
    rotation: Option<Rotation>,
}

impl SymbolOutline {
    /// Parses a symbol SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`OddityError::Configuration`] when the document has no
    /// `<path>` or uses an unsupported transform, and [`OddityError::Path`]
    /// when the path data is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oddity::symbol::SymbolOutline;
    /// let source = r#"<svg viewBox="0 0 100 100">
    ///   <g transform="rotate(90 50 50)"><path d="M 50 10 L 60 20 L 40 20 Z"/></g>
    /// </svg>"#;
    /// let symbol = SymbolOutline::parse(source).unwrap();
    /// assert_eq!(symbol.vertices().len(), 3);
    /// assert_eq!(symbol.display().to_string(), "M 90.00 50.00 L 80.00 60.00 L 80.00 40.00 Z");
    /// ```
    pub fn parse(source: &str) -> Result<Self, OddityError> {
        let mut rotations: Vec<Option<Rotation>> = Vec::new();

        for event in svg::read(source)? {
            match event {
                Event::Tag("g", Type::Start, attributes) => {
                    let rotation = attributes
                        .get("transform")
                        .map(|value| parse_rotation(&value.to_string()))
                        .transpose()?;
                    rotations.push(rotation);
                }
                Event::Tag("g", Type::End, _) => {
                    rotations.pop();
                }
                Event::Tag("path", _, attributes) => {
                    let data = attributes.get("d").ok_or_else(|| {
                        OddityError::configuration("symbol <path> has no `d` attribute")
                    })?;
                    let path: PathData = data.to_string().parse()?;
                    let rotation = rotations.iter().rev().find_map(|rotation| *rotation);
                    return Ok(Self::from_path(path, rotation));
                }
                Event::Error(err) => {
                    return Err(OddityError::configuration(format!(
                        "malformed symbol document: {err}"
                    )));
                }
                _ => {}
            }
        }

        Err(OddityError::configuration("symbol document has no <path>"))
    }

    fn from_path(path: PathData, rotation: Option<Rotation>) -> Self {
        let display = match rotation {
            Some(rotation) => path.rotate_about(rotation.center, rotation.degrees),
            None => path,
        };
        let vertices = outline_polygon(&display);
        Self {
            display,
            vertices,
            rotation,
        }
    }

    /// The drawn outline with any rotation applied
    pub fn display(&self) -> &PathData {
        &self.display
    }

    /// Flattened outline; used for bounds and placement only
    pub fn vertices(&self) -> &Polygon {
        &self.vertices
    }

    /// The rotation recorded in the source file
    pub fn rotation(&self) -> Option<Rotation> {
        self.rotation
    }
}

/// Flattens a closed outline, dropping repeated points and the closing
/// duplicate of the start point.
fn outline_polygon(path: &PathData) -> Polygon {
    let mut points: Vec<Point> = Vec::new();
    for p in path.flatten(&FlattenOptions::default()) {
        if points.last().is_none_or(|last| last.distance(p) > 1e-9) {
            points.push(p);
        }
    }
    if points.len() > 1 && points[0].distance(points[points.len() - 1]) <= 1e-9 {
        points.pop();
    }
    Polygon::new(points)
}

/// Parses `rotate(a)`, `rotate(a cx cy)` or `rotate(a, cx, cy)`.
fn parse_rotation(transform: &str) -> Result<Rotation, OddityError> {
    let unsupported =
        || OddityError::configuration(format!("unsupported symbol transform `{transform}`"));
    let inner = transform
        .trim()
        .strip_prefix("rotate(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(unsupported)?;
    let values = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| unsupported())?;
    match values.as_slice() {
        [degrees] => Ok(Rotation::new(*degrees, Point::default())),
        [degrees, cx, cy] => Ok(Rotation::new(*degrees, Point::new(*cx, *cy))),
        _ => Err(unsupported()),
    }
}

/// The symbol outlines available to the shape catalog.
///
/// Loaded once and shared immutably between renders.
#[derive(Debug, Clone, Default)]
pub struct SymbolLibrary {
    outlines: HashMap<ShapeKind, SymbolOutline>,
}

impl SymbolLibrary {
    /// The outlines compiled into the crate.
    ///
    /// # Errors
    ///
    /// Fails only if a built-in outline is malformed.
    pub fn builtin() -> Result<Self, OddityError> {
        let mut outlines = HashMap::new();
        for (kind, source) in BUILTIN_SOURCES {
            outlines.insert(kind, SymbolOutline::parse(source)?);
        }
        Ok(Self { outlines })
    }

    /// Reads `shape-{key}.svg` for every symbol from `dir`.
    ///
    /// Symbols without a file in `dir` keep their built-in outline.
    ///
    /// # Errors
    ///
    /// Returns [`OddityError::Io`] when a present file cannot be read and a
    /// parse error when it is malformed.
    pub fn from_dir(dir: &Path) -> Result<Self, OddityError> {
        let mut library = Self::builtin()?;
        for kind in ShapeKind::SYMBOLS {
            let file = dir.join(format!("shape-{}.svg", kind.key()));
            if !file.is_file() {
                warn!(symbol = kind.key(), dir:? = dir; "Symbol file missing, using built-in outline");
                continue;
            }
            let source = fs::read_to_string(&file)?;
            let outline = SymbolOutline::parse(&source).map_err(|err| match err {
                OddityError::Configuration(message) => OddityError::configuration(format!(
                    "{}: {message}",
                    file.display()
                )),
                other => other,
            })?;
            trace!(symbol = kind.key(), vertices = outline.vertices().len(); "Loaded symbol");
            library.outlines.insert(kind, outline);
        }
        Ok(library)
    }

    /// Loads the library described by `config`.
    pub fn load(config: &SymbolConfig) -> Result<Self, OddityError> {
        match config.dir() {
            Some(dir) => {
                debug!(dir:? = dir; "Loading symbol outlines");
                Self::from_dir(dir)
            }
            None => Self::builtin(),
        }
    }

    /// Returns the outline of `kind`, if it is a loaded symbol.
    pub fn outline(&self, kind: ShapeKind) -> Option<&SymbolOutline> {
        self.outlines.get(&kind)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_builtin_has_every_symbol() {
        let library = SymbolLibrary::builtin().unwrap();
        for kind in ShapeKind::SYMBOLS {
            let outline = library.outline(kind).unwrap();
            assert!(outline.vertices().len() >= 4, "{kind}");
        }
        assert!(library.outline(ShapeKind::Square).is_none());
    }

    #[test]
    fn test_times_is_rotated_plus() {
        let library = SymbolLibrary::builtin().unwrap();
        let plus = library.outline(ShapeKind::Plus).unwrap();
        let times = library.outline(ShapeKind::Times).unwrap();
        let rotation = times.rotation().unwrap();
        assert_eq!(rotation.degrees(), 45.0);
        assert_eq!(rotation.center(), Point::new(50.0, 50.0));
        assert_eq!(plus.vertices().len(), times.vertices().len());
        for (a, b) in plus.vertices().vertices().iter().zip(times.vertices().vertices()) {
            let rotated = a.rotate_about(Point::new(50.0, 50.0), 45f64.to_radians());
            assert!(approx_eq!(f64, rotated.x(), b.x(), epsilon = 1e-9));
            assert!(approx_eq!(f64, rotated.y(), b.y(), epsilon = 1e-9));
        }
        // Axis commands become line-tos once rotated
        assert!(!times.display().to_string().contains('H'));
    }

    #[test]
    fn test_star_has_ten_points() {
        let library = SymbolLibrary::builtin().unwrap();
        assert_eq!(library.outline(ShapeKind::Star).unwrap().vertices().len(), 10);
    }

    #[test]
    fn test_parse_without_path() {
        let err = SymbolOutline::parse(r#"<svg viewBox="0 0 100 100"><g/></svg>"#).unwrap_err();
        assert!(matches!(err, OddityError::Configuration(_)));
    }

    #[test]
    fn test_parse_bad_path_data() {
        let err = SymbolOutline::parse(r#"<svg><path d="M 10 10 X 5"/></svg>"#).unwrap_err();
        assert!(matches!(err, OddityError::Path(_)));
    }

    #[test]
    fn test_parse_rotation_forms() {
        assert_eq!(
            parse_rotation("rotate(30)").unwrap(),
            Rotation::new(30.0, Point::default())
        );
        assert_eq!(
            parse_rotation(" rotate(45, 50, 50) ").unwrap(),
            Rotation::new(45.0, Point::new(50.0, 50.0))
        );
        assert!(parse_rotation("scale(2)").is_err());
        assert!(parse_rotation("rotate(1 2)").is_err());
    }

    #[test]
    fn test_from_dir_overrides_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("shape-diamond.svg"),
            r#"<svg><path d="M 50 20 L 70 50 L 50 80 L 30 50 Z"/></svg>"#,
        )
        .unwrap();
        let library = SymbolLibrary::from_dir(dir.path()).unwrap();
        let diamond = library.outline(ShapeKind::Diamond).unwrap();
        assert_eq!(diamond.vertices().vertices()[0], Point::new(50.0, 20.0));
        // Missing files keep the built-in outline
        let builtin = SymbolLibrary::builtin().unwrap();
        assert_eq!(library.outline(ShapeKind::Heart), builtin.outline(ShapeKind::Heart));
    }
}
