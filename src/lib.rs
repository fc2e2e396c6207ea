//! # PlotKit
//!
//! Converts vector artwork into point streams for pen plotters:
//! - SVG documents (paths and basic shapes)
//! - Raw SVG path data
//! - Text rendered from system or user-supplied fonts
//!
//! Output is a flat list of pen-up / pen-down points with every curve
//! flattened and every drawn run simplified.
//!
//! ## Architecture
//!
//! PlotKit is organized as a workspace with multiple crates:
//!
//! 1. **plotkit-core** - Point-stream types, curve flattening, simplification, bounds
//! 2. **plotkit-svg** - Path normalization, shape extraction, fonts, the converter
//! 3. **plotkit-settings** - Conversion settings files
//! 4. **plotkit** - Command-line binary that integrates all crates

pub use plotkit_core::{
    bounding_box, simplify, BoundingBox, Coordinate, MalformedPathError, PathCommand, PlotError,
    PlotResult, PlotterPoint, ResourceLoadError, DEFAULT_SCALE,
};

pub use plotkit_svg::{
    build_point_stream, clean, sanitize, ArtworkConverter, ConverterOptions, FontHandle,
    OptimizerSettings, TextOptions,
};

pub use plotkit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so stdout stays free for point-stream output. The
/// `RUST_LOG` environment variable adds filter directives.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
