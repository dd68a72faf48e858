//! Stroke and line-style definitions.
//!
//! # Overview
//!
//! Exported types:
//! - [`StrokeDefinition`]: Color, width and dash style for outlines, separators and guide lines
//! - [`StrokeStyle`]: Enum defining line patterns (solid, dashed, dotted)
//! - [`apply_stroke!`](crate::apply_stroke!): Macro for applying stroke attributes to SVG elements
//!
//! # Applying to SVG Elements
//!
//! ```
//! use oddity_core::draw::StrokeDefinition;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::outline(2.0);
//! let line = svg_element::Line::new().set("x1", 0).set("y1", 0);
//!
//! let line = oddity_core::apply_stroke!(line, &stroke);
//! ```
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke` | `"#000000"` |
//! | `width` | `stroke-width` | `2` |
//! | `style` | `stroke-dasharray` | `"8 4"`, `"2 4"` |

use std::str::FromStr;

use crate::color::Color;

// =============================================================================
// Type Definitions
// =============================================================================

/// Defines the dash pattern of a stroke.
///
/// # SVG Mapping
///
/// - `Solid`: No dasharray attribute
/// - `Dashed`: "8 4"
/// - `Dotted`: "2 4"
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line (8 unit dash, 4 unit gap)
    Dashed,
    /// Dotted line (2 unit dot, 4 unit gap)
    Dotted,
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Err(format!(
                "invalid stroke style `{s}`, valid values: solid, dashed, dotted"
            )),
        }
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("8 4"),
            Self::Dotted => Some("2 4"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

/// A stroke definition for rendering lines and outlines.
///
/// # Examples
///
/// ```
/// use oddity_core::draw::{StrokeDefinition, StrokeStyle};
///
/// let mut stroke = StrokeDefinition::outline(2.0);
/// stroke.set_style(StrokeStyle::Dashed);
/// assert_eq!(stroke.style().to_svg_value(), Some("8 4"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f64,
    style: StrokeStyle,
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::outline(2.0)
    }
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color and width, solid style
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Solid black stroke of `width`, the default for every outline
    pub fn outline(width: f64) -> Self {
        Self::new(Color::default(), width)
    }

    /// Returns a copy with the given style
    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Sets the stroke style.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Sets the stroke width.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }
}

// =============================================================================
// Macros
// =============================================================================

/// Applies stroke color, width and dash pattern to an SVG element.
///
/// Line caps and joins are inherited from the document root, which sets both
/// to `round`.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_hex())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
