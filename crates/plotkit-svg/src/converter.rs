//! Source adapters: SVG documents, raw path data and text to point streams.

use crate::clean::clean;
use crate::font::FontHandle;
use crate::points::build_point_stream;
use crate::sanitize::sanitize;
use crate::shapes::{OptimizerSettings, ShapeOptimizer};
use plotkit_core::{
    bounding_box, BoundingBox, PathCommand, PlotResult, PlotterPoint, ResourceLoadError,
    DEFAULT_SCALE,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options shared by every conversion of an [`ArtworkConverter`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterOptions {
    /// Simplification tolerance applied to each pen-down run.
    pub simplify_tolerance: f64,
    pub optimizer: OptimizerSettings,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            simplify_tolerance: 0.0,
            optimizer: OptimizerSettings::default(),
        }
    }
}

/// Text rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    pub font_size: f64,
    /// Font file to render with. `None` uses the system default face.
    pub font_file: Option<PathBuf>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            font_file: None,
        }
    }
}

/// Converts artwork into cleaned pen-up / pen-down point streams.
///
/// Holds only immutable options, so one converter can serve concurrent
/// callers.
#[derive(Debug, Clone, Default)]
pub struct ArtworkConverter {
    options: ConverterOptions,
    optimizer: ShapeOptimizer,
}

#[allow(clippy::wrong_self_convention)]
impl ArtworkConverter {
    pub fn new(options: ConverterOptions) -> Self {
        Self {
            options,
            optimizer: ShapeOptimizer::new(options.optimizer),
        }
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Reads and converts an SVG file. See [`ArtworkConverter::from_svg_str`].
    pub fn from_file(&self, path: impl AsRef<Path>, scale: f64) -> PlotResult<Vec<PlotterPoint>> {
        let path = path.as_ref();
        let svg = fs::read_to_string(path).map_err(|source| ResourceLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Converting {} at scale {}", path.display(), scale);
        self.from_svg_str(&svg, scale)
    }

    /// Converts every drawable element of an SVG document.
    ///
    /// Each element's path data is normalized on its own, so relative
    /// coordinates never carry over from one element to the next.
    pub fn from_svg_str(&self, svg: &str, scale: f64) -> PlotResult<Vec<PlotterPoint>> {
        let mut commands: Vec<PathCommand> = Vec::new();
        for data in self.optimizer.extract_path_data(svg)? {
            commands.extend(sanitize(&data)?);
        }
        let commands = self.optimizer.optimize(commands);
        self.finish(&commands, scale)
    }

    /// Converts raw path data without shape extraction or optimization.
    pub fn from_path_data(&self, data: &str, scale: f64) -> PlotResult<Vec<PlotterPoint>> {
        let commands = sanitize(data)?;
        self.finish(&commands, scale)
    }

    /// Renders `text` with `(x, y)` as the baseline origin and converts the
    /// glyph outlines at [`DEFAULT_SCALE`].
    pub fn from_text(
        &self,
        text: &str,
        x: f64,
        y: f64,
        options: &TextOptions,
    ) -> PlotResult<Vec<PlotterPoint>> {
        let font = match &options.font_file {
            Some(path) => FontHandle::load(path)?,
            None => FontHandle::system_default()?,
        };
        let data = font.path_for(text, x, y, options.font_size);
        let commands = sanitize(&data)?;
        self.finish(&commands, DEFAULT_SCALE)
    }

    /// Bounds of the drawn part of a point stream.
    pub fn aabb(points: &[PlotterPoint]) -> Option<BoundingBox> {
        bounding_box(points)
    }

    fn finish(&self, commands: &[PathCommand], scale: f64) -> PlotResult<Vec<PlotterPoint>> {
        let points = build_point_stream(commands, scale)?;
        let cleaned = clean(&points, self.options.simplify_tolerance);
        debug!(
            "{} commands -> {} points -> {} after cleaning",
            commands.len(),
            points.len(),
            cleaned.len()
        );
        Ok(cleaned)
    }
}
