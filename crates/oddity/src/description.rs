//! TOML diagram descriptions.
//!
//! A description is a TOML document whose root table holds exactly one of
//! `shape`, `scatter`, `stack` or `array`, mirroring [`LayoutNode`]. Nested
//! nodes (stack children, array cells) use the same table form. Parsing
//! goes through the [`crate::layout`] constructors, so a description is
//! held to the same nesting rules as a tree built in code.
//!
//! ```toml
//! [shape]
//! kind = "circle"
//! shading = "light_grey"
//!
//! [shape.scatter]
//! count = 4
//! motif = { kind = "star", shading = "black" }
//! ```

use std::{fmt, str::FromStr};

use log::debug;
use serde::Deserialize;

use oddity_core::draw::{Shading, StrokeStyle};

use crate::{
    catalog::ShapeKind,
    error::OddityError,
    layout::{
        Array, ArrayKind, Cell, LayoutNode, LineStyle, LoopPath, Mesh, MotifSize, Scatter,
        ShapeSpec, Stack,
    },
    partition::{PartitionDirection, PartitionSpec},
    placement::{LoopPositions, StackDirection, SymmetryAxis},
};

/// Parses a TOML description into a layout tree.
///
/// # Errors
///
/// Returns [`OddityError::Configuration`] for malformed TOML, unknown keys
/// or values, and trees the layout constructors reject.
///
/// # Examples
///
/// ```
/// # use oddity::description::parse;
/// let root = parse(
///     r#"
///     [stack]
///     direction = "right"
///     children = [{ shape = { kind = "square" } }, { shape = { kind = "circle" } }]
///     "#,
/// )
/// .unwrap();
/// assert_eq!(root.kind_name(), "stack");
/// ```
pub fn parse(source: &str) -> Result<LayoutNode, OddityError> {
    let description: NodeDescription = toml::from_str(source)
        .map_err(|err| OddityError::configuration(format!("invalid diagram description: {err}")))?;
    let root = description
        .into_node()?
        .ok_or_else(|| OddityError::configuration("description has no shape, scatter, stack or array"))?;
    debug!(root = root.kind_name(); "Description parsed");
    Ok(root)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeDescription {
    shape: Option<ShapeDescription>,
    scatter: Option<ScatterDescription>,
    stack: Option<StackDescription>,
    array: Option<ArrayDescription>,
}

impl NodeDescription {
    /// The node this table describes; `None` for an empty table.
    fn into_node(self) -> Result<Option<LayoutNode>, OddityError> {
        let Self {
            shape,
            scatter,
            stack,
            array,
        } = self;
        let given = [shape.is_some(), scatter.is_some(), stack.is_some(), array.is_some()]
            .into_iter()
            .filter(|&present| present)
            .count();
        if given > 1 {
            return Err(OddityError::configuration(
                "a node has exactly one of shape, scatter, stack or array",
            ));
        }

        let node = if let Some(shape) = shape {
            LayoutNode::Shape(shape.into_spec()?)
        } else if let Some(scatter) = scatter {
            LayoutNode::Scatter(scatter.into_scatter()?)
        } else if let Some(stack) = stack {
            LayoutNode::Stack(stack.into_stack()?)
        } else if let Some(array) = array {
            LayoutNode::Array(array.into_array()?)
        } else {
            return Ok(None);
        };
        Ok(Some(node))
    }

    fn into_required_node(self, context: &str) -> Result<LayoutNode, OddityError> {
        self.into_node()?
            .ok_or_else(|| OddityError::configuration(format!("{context} must not be empty")))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ShapeDescription {
    kind: String,
    shading: Option<String>,
    line: Option<String>,
    opaque: Option<bool>,
    size: Option<String>,
    partition: Option<PartitionDescription>,
    scatter: Option<ScatterDescription>,
}

impl ShapeDescription {
    fn into_spec(self) -> Result<ShapeSpec, OddityError> {
        let mut spec = ShapeSpec::new(self.kind.parse::<ShapeKind>()?);
        if let Some(shading) = &self.shading {
            spec = spec.with_shading(parse_value::<Shading>("shading", shading)?);
        }
        if let Some(line) = &self.line {
            spec = spec.with_stroke_style(parse_value::<StrokeStyle>("line", line)?);
        }
        if let Some(opaque) = self.opaque {
            spec = spec.with_opaque(opaque);
        }
        if let Some(size) = &self.size {
            spec = spec.with_motif_size(size.parse::<MotifSize>()?);
        }
        if let Some(partition) = self.partition {
            spec = spec.with_partition(partition.into_spec()?);
        }
        if let Some(scatter) = self.scatter {
            spec = spec.with_scatter(scatter.into_scatter()?)?;
        }
        Ok(spec)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartitionDescription {
    direction: String,
    sections: Option<usize>,
    boundaries: Option<Vec<f64>>,
    #[serde(default)]
    shadings: Vec<String>,
}

impl PartitionDescription {
    fn into_spec(self) -> Result<PartitionSpec, OddityError> {
        let direction = self.direction.parse::<PartitionDirection>()?;
        let shadings = self
            .shadings
            .iter()
            .map(|shading| parse_value::<Shading>("shading", shading))
            .collect::<Result<Vec<_>, _>>()?;
        match (self.sections, self.boundaries) {
            (Some(sections), None) => PartitionSpec::even(direction, sections, shadings),
            (None, Some(boundaries)) => PartitionSpec::new(direction, boundaries, shadings),
            _ => Err(OddityError::configuration(
                "a partition has exactly one of sections or boundaries",
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScatterDescription {
    /// Repeated `count` times
    motif: Option<Box<ShapeDescription>>,
    count: Option<usize>,
    /// Listed one by one
    #[serde(default)]
    shapes: Vec<ShapeDescription>,
    scale_as_count: Option<usize>,
    symmetry: Option<String>,
}

impl ScatterDescription {
    fn into_scatter(self) -> Result<Scatter, OddityError> {
        let mut scatter = match (self.motif, self.count, self.shapes.is_empty()) {
            (Some(motif), Some(count), true) => Scatter::repeated(motif.into_spec()?, count)?,
            (None, None, false) => Scatter::new(
                self.shapes
                    .into_iter()
                    .map(ShapeDescription::into_spec)
                    .collect::<Result<_, _>>()?,
            )?,
            _ => {
                return Err(OddityError::configuration(
                    "a scatter has either `motif` with `count` or a list of `shapes`",
                ));
            }
        };
        if let Some(count) = self.scale_as_count {
            scatter = scatter.with_scale_as_count(count);
        }
        if let Some(axis) = &self.symmetry {
            scatter = scatter.with_symmetry(axis.parse::<SymmetryAxis>()?);
        }
        Ok(scatter)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StackDescription {
    direction: String,
    children: Vec<NodeDescription>,
}

impl StackDescription {
    fn into_stack(self) -> Result<Stack, OddityError> {
        let direction = self.direction.parse::<StackDirection>()?;
        let children = self
            .children
            .into_iter()
            .map(|child| child.into_required_node("a stack child"))
            .collect::<Result<Vec<_>, _>>()?;
        Stack::new(children, direction)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MeshDescription {
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    full_grid: bool,
}

impl MeshDescription {
    fn into_mesh(self) -> Result<Mesh, OddityError> {
        let style = match &self.style {
            Some(style) => style.parse::<LineStyle>()?,
            None => LineStyle::default(),
        };
        Ok(Mesh::new(style, self.full_grid))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArrayDescription {
    /// `rectangular`, `triangular` or `loop`
    arrangement: String,
    rows: Option<usize>,
    cols: Option<usize>,
    count: Option<usize>,
    direction: Option<String>,
    mesh: Option<MeshDescription>,
    /// `circle` or a straight-edged shape key
    path: Option<String>,
    positions: Option<String>,
    per_edge: Option<usize>,
    draw_path: Option<String>,
    /// Every slot holds this node
    fill: Option<Box<NodeDescription>>,
    /// Slot contents in order; `{}` leaves a slot empty
    #[serde(default)]
    cells: Vec<NodeDescription>,
}

impl ArrayDescription {
    fn into_array(self) -> Result<Array, OddityError> {
        let mesh = self.mesh.map(MeshDescription::into_mesh).transpose()?;
        let kind = match self.arrangement.as_str() {
            "rectangular" | "rect" => ArrayKind::Rect {
                rows: require(self.rows, "rows")?,
                cols: require(self.cols, "cols")?,
                mesh,
            },
            "triangular" => ArrayKind::Triangular {
                count: require(self.count, "count")?,
                direction: match &self.direction {
                    Some(direction) => direction.parse::<StackDirection>()?,
                    None => StackDirection::Up,
                },
                mesh,
            },
            "loop" => {
                let path = match self.path.as_deref().unwrap_or("circle") {
                    "circle" => LoopPath::Circle {
                        count: require(self.count, "count")?,
                    },
                    key => {
                        let positions = match self.positions.as_deref().unwrap_or("vertices") {
                            "vertices" => LoopPositions::Vertices,
                            "edges" => LoopPositions::Edges {
                                per_edge: self.per_edge.unwrap_or(1),
                            },
                            other => {
                                return Err(OddityError::configuration(format!(
                                    "unknown loop positions `{other}`"
                                )));
                            }
                        };
                        LoopPath::polygon(key.parse::<ShapeKind>()?, positions)?
                    }
                };
                let draw_path = self
                    .draw_path
                    .as_deref()
                    .map(str::parse::<LineStyle>)
                    .transpose()?;
                ArrayKind::Loop { path, draw_path }
            }
            other => {
                return Err(OddityError::configuration(format!(
                    "unknown array arrangement `{other}`"
                )));
            }
        };

        match (self.fill, self.cells.is_empty()) {
            (Some(fill), true) => Array::repeated(kind, fill.into_required_node("array fill")?),
            (None, _) => {
                let cells = self
                    .cells
                    .into_iter()
                    .map(|cell| cell.into_node().map(|node| node.map_or(Cell::Empty, Cell::Node)))
                    .collect::<Result<Vec<_>, _>>()?;
                Array::new(kind, cells)
            }
            (Some(_), false) => Err(OddityError::configuration(
                "an array has either `fill` or `cells`, not both",
            )),
        }
    }
}

fn require(value: Option<usize>, field: &str) -> Result<usize, OddityError> {
    value.ok_or_else(|| OddityError::configuration(format!("array is missing `{field}`")))
}

/// Parses a value whose `FromStr` error is a plain message.
fn parse_value<T>(field: &str, value: &str) -> Result<T, OddityError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse()
        .map_err(|err| OddityError::configuration(format!("invalid {field}: {err}")))
}

#[cfg(test)]
mod tests {
    use oddity_core::draw::{HatchDirection, Tone};

    use super::*;

    #[test]
    fn test_shape_with_scatter() {
        let root = parse(
            r#"
            [shape]
            kind = "hexagon"
            line = "dashed"
            shading = "white"
            opaque = false

            [shape.scatter]
            count = 3
            motif = { kind = "heart", size = "small" }
            "#,
        )
        .unwrap();

        let LayoutNode::Shape(shape) = root else {
            panic!("expected a shape");
        };
        assert_eq!(shape.kind(), ShapeKind::Hexagon);
        assert_eq!(shape.stroke_style(), StrokeStyle::Dashed);
        assert!(!shape.opaque());
        let scatter = shape.scatter().unwrap();
        assert_eq!(scatter.len(), 3);
        assert_eq!(scatter.children()[0].motif_size(), Some(MotifSize::Small));
    }

    #[test]
    fn test_partition_sections() {
        let root = parse(
            r#"
            [shape]
            kind = "square"

            [shape.partition]
            direction = "radial"
            sections = 4
            shadings = ["black", "white", "vertical_lines"]
            "#,
        )
        .unwrap();
        let LayoutNode::Shape(shape) = root else {
            panic!("expected a shape");
        };
        let partition = shape.partition().unwrap();
        assert_eq!(partition.direction(), PartitionDirection::Radial);
        assert_eq!(partition.section_count(), 4);
        assert_eq!(partition.shading(2), Shading::Hatch(HatchDirection::Vertical));
        assert_eq!(partition.shading(3), Shading::Tone(Tone::Black));
    }

    #[test]
    fn test_free_symmetric_scatter() {
        let root = parse(
            r#"
            [scatter]
            symmetry = "vertical"
            shapes = [{ kind = "star" }, { kind = "circle", shading = "black" }]
            "#,
        )
        .unwrap();
        let LayoutNode::Scatter(scatter) = root else {
            panic!("expected a scatter");
        };
        assert_eq!(scatter.symmetry(), Some(SymmetryAxis::Vertical));
        assert_eq!(scatter.len(), 2);
    }

    #[test]
    fn test_array_cells_with_gaps() {
        let root = parse(
            r#"
            [array]
            arrangement = "rectangular"
            rows = 2
            cols = 2
            mesh = { style = "bold", full_grid = true }
            cells = [{ shape = { kind = "circle" } }, {}, { shape = { kind = "square" } }]
            "#,
        )
        .unwrap();
        let LayoutNode::Array(array) = root else {
            panic!("expected an array");
        };
        assert_eq!(array.occupied(), vec![true, false, true, false]);
    }

    #[test]
    fn test_loop_array_fill() {
        let root = parse(
            r#"
            [array]
            arrangement = "loop"
            path = "square"
            positions = "edges"
            per_edge = 2
            draw_path = "dotted"
            fill = { shape = { kind = "triangle" } }
            "#,
        )
        .unwrap();
        let LayoutNode::Array(array) = root else {
            panic!("expected an array");
        };
        assert_eq!(array.capacity(), 8);
        assert!(array.cells().iter().all(|cell| cell.node().is_some()));
    }

    #[test]
    fn test_nested_stack() {
        let root = parse(
            r#"
            [stack]
            direction = "down"

            [[stack.children]]
            shape = { kind = "circle" }

            [[stack.children]]
            array = { arrangement = "triangular", count = 3, fill = { shape = { kind = "star" } } }
            "#,
        )
        .unwrap();
        let LayoutNode::Stack(stack) = root else {
            panic!("expected a stack");
        };
        assert_eq!(stack.direction(), StackDirection::Down);
        assert_eq!(stack.children()[1].kind_name(), "array");
    }

    #[test]
    fn test_rejected_descriptions() {
        let cases = [
            ("", "empty root"),
            ("[shape]\nkind = \"blob\"", "unknown shape"),
            ("[shape]\nkind = \"circle\"\ncolour = \"red\"", "unknown field"),
            ("[shape]\nkind = \"circle\"\n[scatter]\ncount = 1", "two roots"),
            ("[stack]\ndirection = \"up\"\nchildren = [{ shape = { kind = \"circle\" } }]", "short stack"),
            ("[scatter]\ncount = 2", "scatter without motif"),
            (
                "[shape]\nkind = \"circle\"\npartition = { direction = \"vertical\", sections = 2 }\n\
                 scatter = { count = 2, motif = { kind = \"star\" } }",
                "partition and scatter",
            ),
            (
                "[array]\narrangement = \"rectangular\"\nrows = 1\ncols = 1\ncells = [{}, {}]",
                "too many cells",
            ),
            ("[array]\narrangement = \"loop\"\npath = \"circle\"", "loop without count"),
            ("[array]\narrangement = \"spiral\"\ncount = 3", "unknown arrangement"),
            ("[shape]\nkind = \"circle\"\nshading = \"plaid\"", "unknown shading"),
        ];
        for (source, case) in cases {
            let err = parse(source).expect_err(case);
            assert!(matches!(err, OddityError::Configuration(_)), "{case}: {err}");
        }
    }
}
