//! # PlotKit SVG
//!
//! Turns SVG documents, raw path data and text into pen-plotter point
//! streams.
//!
//! The pipeline runs in fixed stages:
//!
//! 1. **Shapes**: drawable elements are extracted and converted to path data
//! 2. **Sanitize**: path data is normalized to absolute move/line/cubic
//!    commands
//! 3. **Points**: commands become pen-up / pen-down points, with cubics
//!    flattened
//! 4. **Clean**: each pen-down run is simplified on its own
//!
//! [`ArtworkConverter`] wires the stages together. Text goes through the
//! [`font`] module instead of shape extraction.

pub mod clean;
pub mod converter;
pub mod font;
pub mod points;
pub mod sanitize;
pub mod shapes;

pub use clean::clean;
pub use converter::{ArtworkConverter, ConverterOptions, TextOptions};
pub use font::FontHandle;
pub use points::build_point_stream;
pub use sanitize::sanitize;
pub use shapes::{OptimizerSettings, ShapeOptimizer};
