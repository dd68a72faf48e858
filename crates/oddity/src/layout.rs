//! The layout tree of one diagram.
//!
//! A diagram is an owned tree of [`LayoutNode`]s. Leaves are shapes; inner
//! nodes arrange their children as a scatter, a stack or an array. Every
//! constructor checks the nesting rules, so a tree that exists is a tree the
//! renderer can draw:
//!
//! - a [`Scatter`] holds only shapes, and those shapes hold no scatter;
//! - a [`Stack`] has at least two children;
//! - an [`Array`] has no more explicit cells than its arrangement has slots.
//!
//! # Example
//!
//! ```
//! # use oddity::catalog::ShapeKind;
//! # use oddity::layout::{LayoutNode, Scatter, ShapeSpec};
//! let motif = ShapeSpec::new(ShapeKind::Star);
//! let scatter = Scatter::repeated(motif, 5).unwrap();
//! let container = ShapeSpec::new(ShapeKind::Circle).with_scatter(scatter).unwrap();
//! let root = LayoutNode::Shape(container);
//! assert_eq!(root.kind_name(), "shape");
//! ```

use std::{fmt, str::FromStr};

use oddity_core::draw::{Shading, StrokeStyle};

use crate::{
    catalog::{ShapeKind, geometry},
    error::OddityError,
    partition::PartitionSpec,
    placement::{LoopPositions, StackDirection, SymmetryAxis},
    symbol::SymbolLibrary,
};

/// Line style of array meshes and loop paths.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    /// Solid at the bold mesh width
    Bold,
}

impl LineStyle {
    pub const ALL: [LineStyle; 4] = [Self::Solid, Self::Dashed, Self::Dotted, Self::Bold];

    pub fn name(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Bold => "bold",
        }
    }

    /// Dash pattern of the line
    pub fn stroke_style(self) -> StrokeStyle {
        match self {
            Self::Solid | Self::Bold => StrokeStyle::Solid,
            Self::Dashed => StrokeStyle::Dashed,
            Self::Dotted => StrokeStyle::Dotted,
        }
    }

    pub fn is_bold(self) -> bool {
        self == Self::Bold
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineStyle {
    type Err = OddityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.name() == normalized)
            .ok_or_else(|| OddityError::configuration(format!("unknown line style `{s}`")))
    }
}

/// Standard motif sizes, overriding the scale a layout would pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotifSize {
    Small,
    Medium,
    Large,
}

impl MotifSize {
    pub const ALL: [MotifSize; 3] = [Self::Small, Self::Medium, Self::Large];

    pub fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Scale the motif's canvas is drawn at
    pub fn scale(self) -> f64 {
        match self {
            Self::Small => 0.075,
            Self::Medium => 0.125,
            Self::Large => 0.175,
        }
    }
}

impl FromStr for MotifSize {
    type Err = OddityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|size| size.name() == normalized)
            .ok_or_else(|| OddityError::configuration(format!("unknown motif size `{s}`")))
    }
}

/// One shape of the diagram, with its styling and optional contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    kind: ShapeKind,
    stroke_style: StrokeStyle,
    shading: Shading,
    opaque: bool,
    motif_size: Option<MotifSize>,
    partition: Option<PartitionSpec>,
    scatter: Option<Scatter>,
}

impl ShapeSpec {
    /// An unshaded, solid-outlined, opaque shape of `kind`.
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            stroke_style: StrokeStyle::Solid,
            shading: Shading::None,
            opaque: true,
            motif_size: None,
            partition: None,
            scatter: None,
        }
    }

    pub fn with_stroke_style(mut self, stroke_style: StrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    /// Whether `white` shading paints an opaque fill.
    pub fn with_opaque(mut self, opaque: bool) -> Self {
        self.opaque = opaque;
        self
    }

    pub fn with_motif_size(mut self, motif_size: MotifSize) -> Self {
        self.motif_size = Some(motif_size);
        self
    }

    /// Divides the shape into shaded sections; replaces any scatter.
    pub fn with_partition(mut self, partition: PartitionSpec) -> Self {
        self.partition = Some(partition);
        self.scatter = None;
        self
    }

    /// Scatters motifs inside this shape.
    ///
    /// # Errors
    ///
    /// Returns [`OddityError::Configuration`] when the shape is already
    /// partitioned.
    pub fn with_scatter(mut self, scatter: Scatter) -> Result<Self, OddityError> {
        if self.partition.is_some() {
            return Err(OddityError::configuration(format!(
                "shape `{}` cannot hold both a partition and a scatter",
                self.kind
            )));
        }
        self.scatter = Some(scatter);
        Ok(self)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    pub fn shading(&self) -> Shading {
        self.shading
    }

    pub fn opaque(&self) -> bool {
        self.opaque
    }

    pub fn motif_size(&self) -> Option<MotifSize> {
        self.motif_size
    }

    /// Scale fixed by the motif size, if any
    pub fn motif_scale(&self) -> Option<f64> {
        self.motif_size.map(MotifSize::scale)
    }

    pub fn partition(&self) -> Option<&PartitionSpec> {
        self.partition.as_ref()
    }

    pub fn scatter(&self) -> Option<&Scatter> {
        self.scatter.as_ref()
    }
}

/// A bag of shapes placed at random without overlapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    children: Vec<ShapeSpec>,
    scale_as_count: Option<usize>,
    symmetry: Option<SymmetryAxis>,
}

impl Scatter {
    /// A scatter of the given shapes.
    ///
    /// # Errors
    ///
    /// Returns [`OddityError::Configuration`] when `children` is empty or a
    /// child holds a scatter of its own.
    pub fn new(children: Vec<ShapeSpec>) -> Result<Self, OddityError> {
        if children.is_empty() {
            return Err(OddityError::configuration("scatter needs at least one shape"));
        }
        if let Some(nested) = children.iter().find(|child| child.scatter.is_some()) {
            return Err(OddityError::configuration(format!(
                "scattered shape `{}` cannot hold a scatter",
                nested.kind
            )));
        }
        Ok(Self {
            children,
            scale_as_count: None,
            symmetry: None,
        })
    }

    /// `count` copies of `template`.
    pub fn repeated(template: ShapeSpec, count: usize) -> Result<Self, OddityError> {
        Self::new(vec![template; count])
    }

    /// Sizes motifs as if there were `count` of them.
    ///
    /// Diagrams of one question that share this value draw their motifs at
    /// one size whatever their actual counts.
    pub fn with_scale_as_count(mut self, count: usize) -> Self {
        self.scale_as_count = Some(count);
        self
    }

    /// Mirrors the scatter about `axis`.
    pub fn with_symmetry(mut self, axis: SymmetryAxis) -> Self {
        self.symmetry = Some(axis);
        self
    }

    pub fn children(&self) -> &[ShapeSpec] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn scale_as_count(&self) -> Option<usize> {
        self.scale_as_count
    }

    /// Count the motif size is derived from, never below the actual count
    pub fn effective_count(&self) -> usize {
        self.scale_as_count
            .unwrap_or(0)
            .max(self.children.len())
            .max(1)
    }

    pub fn symmetry(&self) -> Option<SymmetryAxis> {
        self.symmetry
    }

    /// Largest fixed motif scale among the children
    pub fn max_motif_scale(&self) -> Option<f64> {
        self.children
            .iter()
            .filter_map(ShapeSpec::motif_scale)
            .reduce(f64::max)
    }
}

/// Overlapping children advancing in one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    children: Vec<LayoutNode>,
    direction: StackDirection,
}

impl Stack {
    /// # Errors
    ///
    /// Returns [`OddityError::Configuration`] for fewer than two children.
    pub fn new(children: Vec<LayoutNode>, direction: StackDirection) -> Result<Self, OddityError> {
        if children.len() < 2 {
            return Err(OddityError::configuration(format!(
                "stack needs at least 2 children, got {}",
                children.len()
            )));
        }
        Ok(Self {
            children,
            direction,
        })
    }

    pub fn children(&self) -> &[LayoutNode] {
        &self.children
    }

    pub fn direction(&self) -> StackDirection {
        self.direction
    }
}

/// Centre-to-centre lines drawn behind an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mesh {
    style: LineStyle,
    full_grid: bool,
}

impl Mesh {
    /// # Arguments
    ///
    /// * `style` - Line style of the mesh.
    /// * `full_grid` - Link empty cells too instead of only occupied ones.
    pub fn new(style: LineStyle, full_grid: bool) -> Self {
        Self { style, full_grid }
    }

    pub fn style(&self) -> LineStyle {
        self.style
    }

    pub fn full_grid(&self) -> bool {
        self.full_grid
    }
}

/// The closed path a loop array follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPath {
    Circle { count: usize },
    Polygon {
        kind: ShapeKind,
        positions: LoopPositions,
    },
}

impl LoopPath {
    /// A loop around the outline of a straight-edged catalogue shape.
    ///
    /// # Errors
    ///
    /// Returns [`OddityError::Configuration`] for curved shapes, symbols and
    /// a zero `per_edge`.
    pub fn polygon(kind: ShapeKind, positions: LoopPositions) -> Result<Self, OddityError> {
        if kind.is_curved() || kind.is_symbol() {
            return Err(OddityError::configuration(format!(
                "loop path must be a straight-edged shape, got `{kind}`"
            )));
        }
        if positions == (LoopPositions::Edges { per_edge: 0 }) {
            return Err(OddityError::configuration("per_edge must be at least 1"));
        }
        Ok(Self::Polygon { kind, positions })
    }

    /// Number of children the loop holds
    pub fn count(&self) -> Result<usize, OddityError> {
        match *self {
            Self::Circle { count } => Ok(count),
            Self::Polygon { kind, positions } => {
                let sides = geometry(kind, &SymbolLibrary::default())?.vertices().len();
                Ok(match positions {
                    LoopPositions::Vertices => sides,
                    LoopPositions::Edges { per_edge } => sides * per_edge,
                })
            }
        }
    }
}

/// Arrangement of an array's slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayKind {
    Rect {
        rows: usize,
        cols: usize,
        mesh: Option<Mesh>,
    },
    Loop {
        path: LoopPath,
        /// Draw the loop path itself behind the children
        draw_path: Option<LineStyle>,
    },
    Triangular {
        count: usize,
        direction: StackDirection,
        mesh: Option<Mesh>,
    },
}

impl ArrayKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rectangular",
            Self::Loop { .. } => "loop",
            Self::Triangular { .. } => "triangular",
        }
    }

    /// Number of slots
    pub fn capacity(&self) -> Result<usize, OddityError> {
        match self {
            Self::Rect { rows, cols, .. } => Ok(rows * cols),
            Self::Loop { path, .. } => path.count(),
            Self::Triangular { count, .. } => Ok(*count),
        }
    }
}

/// One slot of an array.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Reserved slot with nothing drawn
    Empty,
    Node(LayoutNode),
}

impl Cell {
    pub fn node(&self) -> Option<&LayoutNode> {
        match self {
            Self::Empty => None,
            Self::Node(node) => Some(node),
        }
    }
}

/// Children placed in a regular arrangement, one per slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    kind: ArrayKind,
    cells: Vec<Cell>,
}

impl Array {
    /// An array with explicit cells; missing trailing cells stay empty.
    ///
    /// # Errors
    ///
    /// Returns [`OddityError::Configuration`] when the arrangement has no
    /// slots or `cells` has more entries than it has slots.
    pub fn new(kind: ArrayKind, mut cells: Vec<Cell>) -> Result<Self, OddityError> {
        let capacity = kind.capacity()?;
        if capacity == 0 {
            return Err(OddityError::configuration(format!(
                "{} array has no slots",
                kind.name()
            )));
        }
        if cells.len() > capacity {
            return Err(OddityError::configuration(format!(
                "{} array has {capacity} slots but {} cells were given",
                kind.name(),
                cells.len()
            )));
        }
        cells.resize(capacity, Cell::Empty);
        Ok(Self { kind, cells })
    }

    /// Every slot holds a copy of `template`.
    pub fn repeated(kind: ArrayKind, template: LayoutNode) -> Result<Self, OddityError> {
        let capacity = kind.capacity()?;
        Self::new(kind, vec![Cell::Node(template); capacity])
    }

    pub fn kind(&self) -> &ArrayKind {
        &self.kind
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Occupancy of every slot, in slot order
    pub fn occupied(&self) -> Vec<bool> {
        self.cells
            .iter()
            .map(|cell| matches!(cell, Cell::Node(_)))
            .collect()
    }
}

/// A node of the layout tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    Shape(ShapeSpec),
    Scatter(Scatter),
    Stack(Stack),
    Array(Array),
}

impl LayoutNode {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Shape(_) => "shape",
            Self::Scatter(_) => "scatter",
            Self::Stack(_) => "stack",
            Self::Array(_) => "array",
        }
    }

    /// Fixed motif scale of a shape node
    pub fn motif_scale(&self) -> Option<f64> {
        match self {
            Self::Shape(shape) => shape.motif_scale(),
            _ => None,
        }
    }
}

impl From<ShapeSpec> for LayoutNode {
    fn from(shape: ShapeSpec) -> Self {
        Self::Shape(shape)
    }
}

impl From<Scatter> for LayoutNode {
    fn from(scatter: Scatter) -> Self {
        Self::Scatter(scatter)
    }
}

impl From<Stack> for LayoutNode {
    fn from(stack: Stack) -> Self {
        Self::Stack(stack)
    }
}

impl From<Array> for LayoutNode {
    fn from(array: Array) -> Self {
        Self::Array(array)
    }
}
