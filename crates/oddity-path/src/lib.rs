//! Path mini-language for shape outlines.
//!
//! Shape outlines (catalog shapes and externally authored symbol files) are
//! described with a subset of SVG path data: absolute `M L H V C Q A Z`
//! commands, comma or whitespace separated, with implicit command repetition.
//! This crate parses that subset into typed [`PathCommand`]s, flattens curves
//! and elliptical arcs to polylines for geometric tests, and rewrites paths
//! under scaling and rotation.
//!
//! # Example
//!
//! ```
//! use oddity_core::geometry::Point;
//! use oddity_path::{FlattenOptions, PathData};
//!
//! let path: PathData = "M 10 10 L 90 10 L 50 80 Z".parse().unwrap();
//! let points = path.flatten(&FlattenOptions::default());
//! assert_eq!(points.len(), 4);
//!
//! let half = path.scale_about(Point::new(50.0, 50.0), 0.5);
//! assert_eq!(half.to_string(), "M 30.00 30.00 L 70.00 30.00 L 50.00 65.00 Z");
//! ```

mod arc;
mod command;
mod error;
mod flatten;
mod parser;
mod transform;

pub use arc::{ArcCenter, endpoint_to_center};
pub use command::{ArcSegment, PathCommand, PathData};
pub use error::PathError;
pub use flatten::FlattenOptions;
pub use parser::parse;
