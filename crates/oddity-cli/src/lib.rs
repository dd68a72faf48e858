//! The `oddity` command: one TOML description in, one SVG out.
//!
//! The binary in `main.rs` only sets up logging and reports errors; [`run`]
//! does the work so integration tests can drive it without a process.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use oddity::{DiagramBuilder, OddityError};

/// Renders `args.input` with `args.seed` and writes the SVG to `args.output`.
///
/// The output file is only written once rendering has succeeded, so a failed
/// run never leaves a partial SVG behind.
///
/// # Errors
///
/// Returns `OddityError::Io` when the description cannot be read or the SVG
/// cannot be written, and whatever settings loading, description parsing or
/// rendering reports otherwise.
pub fn run(args: &Args) -> Result<(), OddityError> {
    info!(
        input = args.input,
        output = args.output,
        seed = args.seed;
        "Rendering diagram"
    );

    let builder = DiagramBuilder::new(config::load_config(args.config.as_ref())?);

    let source = fs::read_to_string(&args.input)?;
    let diagram = builder.parse(&source)?;
    debug!(root = diagram.kind_name(); "Description parsed");

    let svg = builder.render_svg(&diagram, args.seed)?;
    fs::write(&args.output, &svg)?;

    info!(output = args.output, bytes = svg.len(); "Diagram written");
    Ok(())
}
