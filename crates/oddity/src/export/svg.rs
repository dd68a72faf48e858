//! SVG rendering of layout trees.
//!
//! [`Svg`] walks a [`LayoutNode`] tree depth first. Every node renders into
//! its own `0..100` canvas as a [`LayeredOutput`]; a parent places a child by
//! wrapping the child's layer groups in a `<g transform>` that maps the
//! child's canvas onto the child's [`Placement`].
//!
//! Clip path ids are numbered in traversal order and the numbering restarts
//! with every document, so rendering one tree with one seed always produces
//! the same bytes.

mod layout;
mod shape;

use std::sync::Arc;

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};
use svg::{self, node::element as svg_element};

use oddity_core::{
    draw::{LayeredOutput, Palette, RenderLayer, StrokeDefinition},
    geometry::Segment,
};

use crate::{
    config::{AppConfig, PlacementConfig, StyleConfig},
    error::OddityError,
    layout::LayoutNode,
    placement::Placement,
    symbol::SymbolLibrary,
};

/// Renders layout trees to SVG documents.
#[derive(Debug, Clone)]
pub struct Svg {
    style: StyleConfig,
    placement: PlacementConfig,
    palette: Palette,
    symbols: Arc<SymbolLibrary>,
    clip_counter: usize,
}

impl Svg {
    /// Creates a renderer styled by `config` that draws symbols from
    /// `symbols`.
    ///
    /// # Errors
    ///
    /// Returns [`OddityError::Configuration`] when a palette override is not
    /// a valid color.
    pub fn new(config: &AppConfig, symbols: Arc<SymbolLibrary>) -> Result<Self, OddityError> {
        let palette = config.style().palette().map_err(OddityError::Configuration)?;
        Ok(Self {
            style: config.style().clone(),
            placement: *config.placement(),
            palette,
            symbols,
            clip_counter: 0,
        })
    }

    /// Renders `root` into a complete document.
    ///
    /// # Errors
    ///
    /// Returns [`OddityError::Configuration`] for partitions the shape cannot
    /// take and [`OddityError::PlacementExhausted`] when a scatter does not
    /// fit.
    pub fn render_document(&mut self, root: &LayoutNode, seed: u64) -> Result<svg::Document, OddityError> {
        self.clip_counter = 0;
        info!(root = root.kind_name(), seed; "Rendering diagram");

        let output = self.render_node(root, seed)?;
        debug!(nodes = output.len(), clips = self.clip_counter; "Diagram rendered");

        let doc = svg::Document::new()
            .set("viewBox", "0 0 100 100")
            .set("fill", "none")
            .set("stroke", "#000")
            .set("stroke-linecap", "round")
            .set("stroke-linejoin", "round");
        Ok(output.render().into_iter().fold(doc, |doc, node| doc.add(node)))
    }

    /// Renders any node into its own canvas.
    fn render_node(&mut self, node: &LayoutNode, seed: u64) -> Result<LayeredOutput, OddityError> {
        match node {
            LayoutNode::Shape(shape) => self.render_shape(shape, seed),
            LayoutNode::Scatter(scatter) => self.render_scatter(scatter, None, seed),
            LayoutNode::Stack(stack) => self.render_stack(stack, seed),
            LayoutNode::Array(array) => self.render_array(array, seed),
        }
    }

    /// Adds `child` to the content layer of `output` at `placement`.
    fn place(output: &mut LayeredOutput, placement: Placement, child: LayeredOutput) {
        let group = child
            .render()
            .into_iter()
            .fold(
                svg_element::Group::new().set("transform", placement.transform()),
                |group, node| group.add(node),
            );
        output.add_to_layer(RenderLayer::Content, Box::new(group));
    }

    /// Next document-unique clip path id
    fn next_clip_id(&mut self) -> String {
        self.clip_counter += 1;
        format!("clip-{}", self.clip_counter)
    }

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn line(segment: Segment, stroke: &StrokeDefinition) -> svg_element::Line {
        let line = svg_element::Line::new()
            .set("x1", round2(segment.start().x()))
            .set("y1", round2(segment.start().y()))
            .set("x2", round2(segment.end().x()))
            .set("y2", round2(segment.end().y()));
        oddity_core::apply_stroke!(line, stroke)
    }
}

/// Rounds a coordinate to two decimals for output
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::ShapeKind,
        layout::{Scatter, ShapeSpec},
    };

    fn renderer() -> Svg {
        Svg::new(
            &AppConfig::default(),
            Arc::new(SymbolLibrary::builtin().unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn test_document_root_attributes() {
        let doc = renderer()
            .render_document(&ShapeSpec::new(ShapeKind::Square).into(), 0)
            .unwrap()
            .to_string();
        assert!(doc.contains(r#"viewBox="0 0 100 100""#));
        assert!(doc.contains(r##"stroke="#000""##));
        assert!(doc.contains(r#"stroke-linecap="round""#));
        assert!(doc.contains(r#"stroke-linejoin="round""#));
    }

    #[test]
    fn test_clip_ids_restart_per_document() {
        let mut svg = renderer();
        let shape = ShapeSpec::new(ShapeKind::Hexagon)
            .with_shading("diagonal_slash".parse().unwrap())
            .into();
        let first = svg.render_document(&shape, 0).unwrap().to_string();
        let second = svg.render_document(&shape, 0).unwrap().to_string();
        assert_eq!(first, second);
        assert!(first.contains(r#"id="clip-1""#));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let scatter = Scatter::repeated(ShapeSpec::new(ShapeKind::Star), 6).unwrap();
        let node = LayoutNode::Scatter(scatter);
        let a = renderer().render_document(&node, 42).unwrap().to_string();
        let b = renderer().render_document(&node, 42).unwrap().to_string();
        let c = renderer().render_document(&node, 43).unwrap().to_string();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_palette_is_configuration_error() {
        let config: AppConfig = toml::from_str(
            r#"
            [style.palette]
            grey = "nope"
            "#,
        )
        .unwrap();
        let err = Svg::new(&config, Arc::new(SymbolLibrary::default())).unwrap_err();
        assert!(matches!(err, OddityError::Configuration(_)));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(-0.004), -0.0);
    }
}
