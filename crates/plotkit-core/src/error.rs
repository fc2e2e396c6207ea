//! Error types for the PlotKit conversion pipeline.
//!
//! Path data problems and resource loading problems are kept apart so callers
//! can tell "this artwork is broken" from "this file or font could not be read".

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a single artwork or text conversion.
#[derive(Error, Debug)]
pub enum PlotError {
    /// The path data could not be normalized.
    #[error("Malformed path: {0}")]
    MalformedPath(#[from] MalformedPathError),

    /// A file or font needed for the conversion could not be loaded.
    #[error("Resource load failed: {0}")]
    ResourceLoad(#[from] ResourceLoadError),
}

/// Errors in SVG path data.
///
/// Offsets are byte offsets into the path data, or the command index when the
/// error is raised on already normalized commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedPathError {
    /// A drawing command appeared before any move established a position.
    #[error("'{command}' at offset {offset} has no current position")]
    UndefinedCurrentPosition { command: char, offset: usize },

    /// A command letter outside the SVG path grammar.
    #[error("Unrecognized command '{command}' at offset {offset}")]
    UnrecognizedCommand { command: char, offset: usize },

    /// A command ran out of arguments.
    #[error("'{command}' at offset {offset} is missing arguments")]
    MissingArguments { command: char, offset: usize },

    /// A token that should have been a number or flag.
    #[error("Invalid number at offset {offset}")]
    InvalidNumber { offset: usize },

    /// A command produced an infinite or NaN coordinate.
    #[error("'{command}' at offset {offset} produced a non-finite coordinate")]
    NonFiniteCoordinate { command: char, offset: usize },
}

/// Errors loading the inputs of a conversion.
#[derive(Error, Debug)]
pub enum ResourceLoadError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but is not a usable font.
    #[error("Invalid font file: {}", path.display())]
    InvalidFont { path: PathBuf },

    /// No default font face could be found on this system.
    #[error("No default font available")]
    NoDefaultFont,

    /// The SVG document could not be interpreted.
    #[error("Invalid SVG: {reason}")]
    InvalidSvg { reason: String },
}

/// Result type alias for conversions.
pub type PlotResult<T> = Result<T, PlotError>;

/// Result type alias for path normalization.
pub type PathResult<T> = Result<T, MalformedPathError>;

/// Result type alias for resource loading.
pub type ResourceResult<T> = Result<T, ResourceLoadError>;
