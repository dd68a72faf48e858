//! Export of layout trees into output documents.
//!
//! This is the last stage of the Oddity pipeline:
//!
//! ```text
//! Description (TOML)
//!     ↓ description
//! LayoutNode tree
//!     ↓ catalog / partition / placement
//! Layered SVG fragments
//!     ↓ export (this module)
//! SVG document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::Svg`]

/// SVG export backend.
pub mod svg;
