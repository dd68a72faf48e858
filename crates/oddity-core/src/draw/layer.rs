//! Layer-based rendering for diagram fragments.
//!
//! A fragment (a shape, an array cell, a scatter motif) pushes its SVG nodes
//! into a [`LayeredOutput`] tagged with a [`RenderLayer`]. On render the nodes
//! are stable-sorted by layer and emitted as one `<g data-layer="...">` group
//! per layer, so a shape's clipped section fills always sit under its outline
//! and separators regardless of emission order.
//!
//! # Example
//!
//! ```
//! # use oddity_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::Path;
//!
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Outline, Box::new(Path::new()));
//! output.add_to_layer(RenderLayer::Section, Box::new(Path::new()));
//!
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Mesh lines and loop paths drawn behind array content
    Guide,
    /// Clip definitions and the unfilled outline underlay
    Base,
    /// Clipped section fills and hatching
    Section,
    /// The shape outline stroke
    Outline,
    /// Partition separator lines
    Separator,
    /// Nested fragments placed inside this one
    Content,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Guide => "guide",
            Self::Base => "base",
            Self::Section => "section",
            Self::Outline => "outline",
            Self::Separator => "separator",
            Self::Content => "content",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    ///
    /// Nodes within one layer keep the order in which they were added.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes across all layers
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer. Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable: preserves insertion order inside a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Line, Rectangle};

    use super::*;

    #[test]
    fn test_layered_output_new() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert_eq!(output.len(), 0);
    }

    #[test]
    fn test_layered_output_merge() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Section, Box::new(Rectangle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));

        output1.merge(output2);
        assert_eq!(output1.len(), 2);
        assert_eq!(output1.render().len(), 2);
    }

    #[test]
    fn test_layered_output_render_orders_layers() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Separator, Box::new(Line::new()));
        output.add_to_layer(RenderLayer::Guide, Box::new(Line::new()));
        output.add_to_layer(RenderLayer::Section, Box::new(Rectangle::new()));

        let rendered: Vec<String> = output.render().iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains(r#"data-layer="guide""#));
        assert!(rendered[1].contains(r#"data-layer="section""#));
        assert!(rendered[2].contains(r#"data-layer="separator""#));
    }

    #[test]
    fn test_layered_output_merge_same_layer() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));

        output1.merge(output2);

        assert_eq!(output1.render().len(), 1);
    }
}
