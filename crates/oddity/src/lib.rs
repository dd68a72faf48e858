//! Oddity - procedural "odd one out" diagrams.
//!
//! A diagram is a container shape drawn from a small geometric vocabulary,
//! optionally partitioned into shaded sections and filled with scattered,
//! stacked or arrayed motifs. Rendering is deterministic: one layout tree and
//! one seed always produce the same SVG.
//!
//! The [`validation`] engine is independent of rendering. It decides which
//! parameter values each answer option receives so that exactly one option
//! is the odd one out.

pub mod catalog;
pub mod clip;
pub mod config;
pub mod description;
pub mod hatch;
pub mod layout;
pub mod partition;
pub mod placement;
pub mod symbol;
pub mod validation;

mod error;
mod export;

pub use oddity_core::{color, draw, geometry, polygon};

pub use error::OddityError;

use std::sync::Arc;

use log::{debug, info, trace};

use config::AppConfig;
use export::svg::Svg;
use layout::LayoutNode;
use symbol::SymbolLibrary;

/// Builder for parsing and rendering Oddity diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use oddity::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"
///     [shape]
///     kind = "circle"
///     shading = "grey"
/// "#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Parse the description into a layout tree
/// let diagram = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Render the tree with a seed
/// let svg = builder.render_svg(&diagram, 7)
///     .expect("Failed to render");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
    symbols: Option<Arc<SymbolLibrary>>,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Symbol, placement and style settings
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            symbols: None,
        }
    }

    /// Use an already loaded symbol library instead of the one named in the
    /// configuration.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    ///
    /// use oddity::{DiagramBuilder, symbol::SymbolLibrary};
    ///
    /// let symbols = Arc::new(SymbolLibrary::builtin().expect("Built-in symbols"));
    /// let builder = DiagramBuilder::default().with_symbols(symbols);
    /// ```
    pub fn with_symbols(mut self, symbols: Arc<SymbolLibrary>) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML diagram description into a layout tree.
    ///
    /// # Arguments
    ///
    /// * `source` - Description source, see [`description`]
    ///
    /// # Errors
    ///
    /// Returns `OddityError::Configuration` for malformed descriptions and
    /// trees that break the layout nesting rules.
    pub fn parse(&self, source: &str) -> Result<LayoutNode, OddityError> {
        info!("Parsing diagram description");
        let diagram = description::parse(source)?;
        trace!(diagram:?; "Parsed layout tree");
        Ok(diagram)
    }

    /// Render a layout tree to an SVG string.
    ///
    /// # Arguments
    ///
    /// * `diagram` - The layout tree to render
    /// * `seed` - Seed of every random choice made while placing motifs
    ///
    /// # Errors
    ///
    /// Returns `OddityError` when symbol outlines cannot be loaded, when a
    /// shape cannot take its partition, or when motifs cannot be placed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use oddity::{
    ///     DiagramBuilder,
    ///     catalog::ShapeKind,
    ///     layout::{LayoutNode, Scatter, ShapeSpec},
    /// };
    ///
    /// let scatter = Scatter::repeated(ShapeSpec::new(ShapeKind::Star), 4)
    ///     .expect("Valid scatter");
    /// let diagram = LayoutNode::Scatter(scatter);
    ///
    /// let svg = DiagramBuilder::default()
    ///     .render_svg(&diagram, 42)
    ///     .expect("Failed to render diagram");
    ///
    /// println!("{}", svg);
    /// ```
    pub fn render_svg(&self, diagram: &LayoutNode, seed: u64) -> Result<String, OddityError> {
        let symbols = match &self.symbols {
            Some(symbols) => Arc::clone(symbols),
            None => {
                debug!("Loading symbol library");
                Arc::new(SymbolLibrary::load(self.config.symbols())?)
            }
        };

        let mut exporter = Svg::new(&self.config, symbols)?;
        let document = exporter.render_document(diagram, seed)?;

        info!("SVG rendered successfully");
        Ok(document.to_string())
    }
}
