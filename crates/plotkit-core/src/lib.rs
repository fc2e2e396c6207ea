//! # PlotKit Core
//!
//! Geometry shared by the PlotKit conversion pipeline:
//!
//! - **Types**: coordinates, normalized path commands, pen-up/pen-down points
//!   and bounding boxes
//! - **Bezier**: adaptive flattening of cubic curves with a bounded deviation
//! - **Simplify**: Douglas-Peucker reduction of pen-down runs
//! - **Bounds**: axis-aligned extents of the drawn part of a point stream
//! - **Errors**: the error taxonomy used across the workspace

pub mod bbox;
pub mod bezier;
pub mod error;
pub mod simplify;
pub mod types;

pub use bbox::bounding_box;
pub use bezier::{flatten_cubic, tolerance_for_scale, CubicBezier, DEFAULT_SCALE, MAX_DEPTH};
pub use error::{
    MalformedPathError, PathResult, PlotError, PlotResult, ResourceLoadError, ResourceResult,
};
pub use simplify::simplify;
pub use types::{BoundingBox, Coordinate, PathCommand, PlotterPoint};
