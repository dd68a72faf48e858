//! SVG rendering of scatters, stacks and arrays.

use log::{debug, trace};
use svg::node::element as svg_element;

use oddity_core::{
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Segment},
};

use super::Svg;
use crate::{
    catalog::{ShapeGeometry, geometry},
    error::OddityError,
    layout::{Array, ArrayKind, Cell, LayoutNode, LineStyle, LoopPath, Scatter, Stack},
    placement::{
        AttemptLimit, CanvasInterior, ContainerInterior, Interior, LoopArrangement, Placement,
        ScatterSizing, circle_loop, polygon_loop, rect_grid, rect_mesh, scatter, stack,
        symmetric_scatter, triangular, triangular_mesh, triangular_rows,
    },
};

/// Scale of scattered shapes without a motif size when their siblings have one
const MIXED_MOTIF_SCALE: f64 = 0.2;

impl Svg {
    /// Renders a scatter, inside `container` when it fills a shape.
    pub(super) fn render_scatter(
        &mut self,
        scatter_spec: &Scatter,
        container: Option<&ShapeGeometry>,
        seed: u64,
    ) -> Result<LayeredOutput, OddityError> {
        let count = scatter_spec.len();
        let (layout_scale, sizing) = Self::scatter_sizing(scatter_spec, container.is_some());

        let interior: Box<dyn Interior> = match container {
            Some(shape) => Box::new(ContainerInterior::new(shape, sizing.margin())),
            None => Box::new(CanvasInterior::new(sizing.margin())),
        };
        let mut rng = Self::rng(seed);
        let centers = match scatter_spec.symmetry() {
            Some(axis) => symmetric_scatter(
                count,
                sizing.min_distance(),
                axis,
                interior.as_ref(),
                self.placement.symmetric_attempts(),
                self.placement.scatter_attempts(),
                &mut rng,
            )?,
            None => {
                let limit = match container {
                    Some(_) => AttemptLimit::Total(self.placement.container_attempts()),
                    None => AttemptLimit::PerPoint(self.placement.scatter_attempts()),
                };
                scatter(count, sizing.min_distance(), interior.as_ref(), limit, &mut rng)?
            }
        };
        debug!(
            count,
            scale = sizing.scale(),
            contained = container.is_some();
            "Scattered shapes"
        );

        let mut output = LayeredOutput::new();
        for (child, center) in scatter_spec.children().iter().zip(centers) {
            let placement = Placement::new(center, child.motif_scale().unwrap_or(layout_scale));
            let fragment = self.render_shape(child, seed)?;
            Self::place(&mut output, placement, fragment);
        }
        Ok(output)
    }

    /// Renders a stack; later children are drawn over earlier ones.
    pub(super) fn render_stack(&mut self, stack_spec: &Stack, seed: u64) -> Result<LayeredOutput, OddityError> {
        let placements = stack(stack_spec.children().len(), stack_spec.direction());
        debug!(
            count = placements.len(),
            direction = stack_spec.direction().name();
            "Stacking children"
        );

        let mut output = LayeredOutput::new();
        for (child, placement) in stack_spec.children().iter().zip(placements) {
            let placement = match child.motif_scale() {
                Some(scale) => placement.with_scale(scale),
                None => placement,
            };
            let fragment = self.render_node(child, seed)?;
            Self::place(&mut output, placement, fragment);
        }
        Ok(output)
    }

    /// Renders an array with its mesh or loop path behind the children.
    pub(super) fn render_array(&mut self, array: &Array, seed: u64) -> Result<LayeredOutput, OddityError> {
        let mut output = LayeredOutput::new();
        let occupied = array.occupied();

        let placements = match *array.kind() {
            ArrayKind::Rect { rows, cols, mesh } => {
                let placements = rect_grid(rows, cols);
                if let Some(mesh) = mesh {
                    let links = rect_mesh(rows, cols, &occupied, mesh.full_grid());
                    self.add_mesh(&mut output, &placements, &links, mesh.style());
                }
                placements
            }
            ArrayKind::Triangular {
                count,
                direction,
                mesh,
            } => {
                let placements = triangular(count, direction);
                if let Some(mesh) = mesh {
                    let links = triangular_mesh(&triangular_rows(count), &occupied, mesh.full_grid());
                    self.add_mesh(&mut output, &placements, &links, mesh.style());
                }
                placements
            }
            ArrayKind::Loop { path, draw_path } => {
                let (arrangement, outline) = self.loop_arrangement(path)?;
                if let Some(style) = draw_path {
                    self.add_loop_path(&mut output, &arrangement, outline.as_ref(), style);
                }
                arrangement.placements().to_vec()
            }
        };
        debug!(
            kind = array.kind().name(),
            slots = placements.len(),
            occupied = occupied.iter().filter(|&&o| o).count();
            "Arranging array"
        );

        for (index, (cell, placement)) in array.cells().iter().zip(placements).enumerate() {
            let Cell::Node(child) = cell else {
                continue;
            };
            let placement = match (child.motif_scale(), self.natural_scale(child)?) {
                (Some(scale), _) => placement.with_scale(scale),
                // Nested content is drawn at min(cell, natural), never larger than the cell
                (None, Some(natural)) => placement.with_scale(placement.scale().min(natural) / natural),
                (None, None) => placement,
            };
            trace!(
                index,
                x = placement.center().x(),
                y = placement.center().y(),
                scale = placement.scale();
                "Placing array cell"
            );
            let fragment = self.render_node(child, seed.wrapping_add(index as u64))?;
            Self::place(&mut output, placement, fragment);
        }
        Ok(output)
    }

    /// Scale a nested layout draws its children at inside its own canvas.
    ///
    /// Plain shapes have none: they fill their canvas.
    fn natural_scale(&self, node: &LayoutNode) -> Result<Option<f64>, OddityError> {
        let scale = match node {
            LayoutNode::Shape(_) => None,
            LayoutNode::Scatter(scatter_spec) => Some(Self::scatter_sizing(scatter_spec, false).1.scale()),
            LayoutNode::Stack(stack_spec) => {
                stack(stack_spec.children().len(), stack_spec.direction())
                    .first()
                    .map(Placement::scale)
            }
            LayoutNode::Array(array) => {
                let first = match *array.kind() {
                    ArrayKind::Rect { rows, cols, .. } => rect_grid(rows, cols).first().copied(),
                    ArrayKind::Triangular { count, direction, .. } => triangular(count, direction).first().copied(),
                    ArrayKind::Loop { path, .. } => self.loop_arrangement(path)?.0.placements().first().copied(),
                };
                first.map(|placement| placement.scale())
            }
        };
        Ok(scale.filter(|&s| s > 0.0))
    }

    /// Layout scale and motif sizing of a scatter.
    ///
    /// When any child carries a motif size, spacing follows the largest one
    /// and unsized children fall back to a fixed scale.
    fn scatter_sizing(scatter_spec: &Scatter, contained: bool) -> (f64, ScatterSizing) {
        if scatter_spec.max_motif_scale().is_some() {
            let largest = scatter_spec
                .children()
                .iter()
                .map(|child| child.motif_scale().unwrap_or(MIXED_MOTIF_SCALE))
                .fold(0.0, f64::max);
            (MIXED_MOTIF_SCALE, ScatterSizing::from_scale(largest))
        } else {
            let sizing = ScatterSizing::for_count(scatter_spec.effective_count(), contained);
            (sizing.scale(), sizing)
        }
    }

    fn loop_arrangement(&self, path: LoopPath) -> Result<(LoopArrangement, Option<ShapeGeometry>), OddityError> {
        Ok(match path {
            LoopPath::Circle { count } => (circle_loop(count), None),
            LoopPath::Polygon { kind, positions } => {
                let shape = geometry(kind, &self.symbols)?;
                (polygon_loop(shape.vertices(), positions), Some(shape))
            }
        })
    }

    fn guide_stroke(&self, style: LineStyle) -> StrokeDefinition {
        let width = if style.is_bold() {
            self.style.bold_mesh_width()
        } else {
            self.style.mesh_width()
        };
        StrokeDefinition::new(self.palette.black(), width).with_style(style.stroke_style())
    }

    /// Lines between the centres of linked cells
    fn add_mesh(&self, output: &mut LayeredOutput, placements: &[Placement], links: &[(usize, usize)], style: LineStyle) {
        let stroke = self.guide_stroke(style);
        let group = links
            .iter()
            .filter_map(|&(a, b)| Some(Segment::new(placements.get(a)?.center(), placements.get(b)?.center())))
            .fold(svg_element::Group::new(), |group, segment| {
                group.add(Self::line(segment, &stroke))
            });
        output.add_to_layer(RenderLayer::Guide, Box::new(group));
    }

    /// The circle or scaled polygon outline a loop follows
    fn add_loop_path(
        &self,
        output: &mut LayeredOutput,
        arrangement: &LoopArrangement,
        outline: Option<&ShapeGeometry>,
        style: LineStyle,
    ) {
        let stroke = self.guide_stroke(style);
        let center = Point::canvas_center();
        match outline {
            Some(shape) => {
                let data = shape.outline().scale_about(center, arrangement.path_scale());
                let path = svg_element::Path::new()
                    .set("d", data.to_string())
                    .set("fill", "none");
                output.add_to_layer(RenderLayer::Guide, Box::new(oddity_core::apply_stroke!(path, &stroke)));
            }
            None => {
                let circle = svg_element::Circle::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("r", super::round2(arrangement.radius()))
                    .set("fill", "none");
                output.add_to_layer(RenderLayer::Guide, Box::new(oddity_core::apply_stroke!(circle, &stroke)));
            }
        }
    }
}
