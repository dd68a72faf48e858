//! Configuration types for Oddity diagram rendering.
//!
//! This module provides configuration structures that control where symbol
//! outlines are read from, how hard the placement engine searches, and how
//! strokes and fills are styled. All types implement [`serde::Deserialize`]
//! for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`SymbolConfig`] - Location of the `shape-{key}.svg` symbol outlines.
//! - [`PlacementConfig`] - Attempt caps for the rejection-sampling loops.
//! - [`StyleConfig`] - Stroke widths and palette overrides.
//!
//! # Example
//!
//! ```
//! # use oddity::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.placement().container_attempts(), 12000);
//! assert!(config.style().palette().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use oddity_core::{color::Color, draw::Palette};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Symbol outline section.
    #[serde(default)]
    symbols: SymbolConfig,

    /// Placement search section.
    #[serde(default)]
    placement: PlacementConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `symbols` - Where symbol outlines are loaded from.
    /// * `placement` - Attempt caps for placement.
    /// * `style` - Stroke widths and colors.
    pub fn new(symbols: SymbolConfig, placement: PlacementConfig, style: StyleConfig) -> Self {
        Self {
            symbols,
            placement,
            style,
        }
    }

    /// Returns the symbol configuration.
    pub fn symbols(&self) -> &SymbolConfig {
        &self.symbols
    }

    /// Returns the placement configuration.
    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Location of symbol outline files.
///
/// When no directory is configured the outlines compiled into the crate are
/// used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SymbolConfig {
    #[serde(default)]
    dir: Option<PathBuf>,
}

impl SymbolConfig {
    /// Creates a symbol configuration reading from `dir`.
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    /// Returns the configured symbol directory, if any.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

/// Attempt caps for the placement engine's search loops.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    scatter_attempts: usize,
    symmetric_attempts: usize,
    container_attempts: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            scatter_attempts: 2000,
            symmetric_attempts: 6000,
            container_attempts: 12000,
        }
    }
}

impl PlacementConfig {
    /// Creates a new [`PlacementConfig`].
    ///
    /// # Arguments
    ///
    /// * `scatter_attempts` - Attempts per point for a free scatter.
    /// * `symmetric_attempts` - Total attempts for a symmetric scatter.
    /// * `container_attempts` - Total attempts for a scatter inside a shape.
    pub fn new(scatter_attempts: usize, symmetric_attempts: usize, container_attempts: usize) -> Self {
        Self {
            scatter_attempts,
            symmetric_attempts,
            container_attempts,
        }
    }

    /// Attempts allowed for each point of a free scatter.
    pub fn scatter_attempts(&self) -> usize {
        self.scatter_attempts
    }

    /// Attempts allowed for a whole symmetric scatter.
    pub fn symmetric_attempts(&self) -> usize {
        self.symmetric_attempts
    }

    /// Attempts allowed for a whole scatter inside a container shape.
    pub fn container_attempts(&self) -> usize {
        self.container_attempts
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Shape outline stroke width.
    outline_width: f64,
    /// Partition separator stroke width.
    separator_width: f64,
    /// Hatch line stroke width.
    hatch_width: f64,
    /// Array mesh and loop path stroke width.
    mesh_width: f64,
    /// Stroke width of `bold` mesh lines.
    bold_mesh_width: f64,
    /// Color overrides for the named shadings.
    palette: PaletteConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            outline_width: 2.0,
            separator_width: 0.8,
            hatch_width: 0.8,
            mesh_width: 2.0,
            bold_mesh_width: 3.0,
            palette: PaletteConfig::default(),
        }
    }
}

impl StyleConfig {
    pub fn outline_width(&self) -> f64 {
        self.outline_width
    }

    pub fn separator_width(&self) -> f64 {
        self.separator_width
    }

    pub fn hatch_width(&self) -> f64 {
        self.hatch_width
    }

    pub fn mesh_width(&self) -> f64 {
        self.mesh_width
    }

    pub fn bold_mesh_width(&self) -> f64 {
        self.bold_mesh_width
    }

    /// Returns the [`Palette`] with any configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured color string cannot be parsed into
    /// a valid [`Color`].
    pub fn palette(&self) -> Result<Palette, String> {
        let defaults = Palette::default();
        let pick = |value: &Option<String>, name: &str, fallback: Color| {
            value
                .as_deref()
                .map(Color::new)
                .transpose()
                .map(|color| color.unwrap_or(fallback))
                .map_err(|err| format!("Invalid {name} color in config: {err}"))
        };
        Ok(Palette::new(
            pick(&self.palette.black, "black", defaults.black())?,
            pick(&self.palette.grey, "grey", defaults.grey())?,
            pick(&self.palette.light_grey, "light_grey", defaults.light_grey())?,
            pick(&self.palette.white, "white", defaults.white())?,
        ))
    }
}

/// Palette overrides as CSS color strings.
#[derive(Debug, Clone, Default, Deserialize)]
struct PaletteConfig {
    #[serde(default)]
    black: Option<String>,
    #[serde(default)]
    grey: Option<String>,
    #[serde(default)]
    light_grey: Option<String>,
    #[serde(default)]
    white: Option<String>,
}
