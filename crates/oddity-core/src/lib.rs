//! Oddity Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Oddity diagram
//! engine and its path parser. It includes:
//!
//! - **Geometry**: Points, bounds and segments in the local 0–100 canvas ([`geometry`] module)
//! - **Polygons**: Area, centroid, orientation and containment tests ([`polygon::Polygon`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Draw**: Stroke, shading and render-layer definitions ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod polygon;
