//! Drawing definitions shared by every diagram fragment.
//!
//! Fragments render into a [`LayeredOutput`], which orders guide lines, fills,
//! outlines, separators and nested content independently of the order in which
//! they were produced.
mod layer;
mod shading;
mod stroke;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use shading::{FillPaint, HatchDirection, Palette, Shading, Tone};
pub use stroke::{StrokeDefinition, StrokeStyle};
