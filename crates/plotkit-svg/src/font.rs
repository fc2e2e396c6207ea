//! Glyph outlines as SVG path data.
//!
//! The default face is looked up once per process among the system fonts.
//! Font files are cached by canonical path, so repeated text conversions with
//! the same file only read it once.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use plotkit_core::{ResourceLoadError, ResourceResult};
use rusttype::{point, Font, OutlineBuilder, Point, Scale};
use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, info, warn};

/// A loaded font face, cheap to clone.
#[derive(Clone)]
pub struct FontHandle {
    font: Arc<Font<'static>>,
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("glyph_count", &self.font.glyph_count())
            .finish()
    }
}

impl FontHandle {
    fn new(font: Font<'static>) -> Self {
        Self {
            font: Arc::new(font),
        }
    }

    /// Loads a TrueType or OpenType file, reusing an earlier load of the same
    /// file.
    pub fn load(path: impl AsRef<Path>) -> ResourceResult<Self> {
        let path = path.as_ref();
        let canonical = path.canonicalize().map_err(|source| ResourceLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(handle) = font_cache()
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(&canonical)
        {
            return Ok(handle.clone());
        }

        let bytes = fs::read(&canonical).map_err(|source| ResourceLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Font::try_from_vec(bytes).ok_or_else(|| ResourceLoadError::InvalidFont {
            path: path.to_path_buf(),
        })?;
        let handle = Self::new(font);

        info!("Loaded font {}", canonical.display());
        font_cache()
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(canonical, handle.clone());
        Ok(handle)
    }

    /// The process-wide default face: the system sans-serif face, or any
    /// installed face when no sans-serif is registered.
    pub fn system_default() -> ResourceResult<Self> {
        static DEFAULT: OnceLock<Option<FontHandle>> = OnceLock::new();
        DEFAULT
            .get_or_init(|| {
                let font = load_default_from_system().map(Self::new);
                if font.is_none() {
                    warn!("No usable system font found");
                }
                font
            })
            .clone()
            .ok_or(ResourceLoadError::NoDefaultFont)
    }

    /// Renders `text` as SVG path data with `(x, y)` on the baseline of the
    /// first glyph. `font_size` is the em size in output units; y grows
    /// downward.
    ///
    /// Returns an empty string for empty text or a non-positive size.
    pub fn path_for(&self, text: &str, x: f64, y: f64, font_size: f64) -> String {
        if text.is_empty() {
            return String::new();
        }
        if !(font_size.is_finite() && font_size > 0.0) {
            warn!("Invalid font size {}, rendering nothing", font_size);
            return String::new();
        }

        let scale = Scale::uniform(self.pixel_height(font_size as f32));
        let mut builder = PathDataBuilder::default();
        for glyph in self.font.layout(text, scale, point(x as f32, y as f32)) {
            // Outlines are relative to the glyph origin on the baseline.
            builder.origin = glyph.position();
            glyph.unpositioned().build_outline(&mut builder);
        }

        debug!(
            "Rendered {} chars into {} bytes of path data",
            text.chars().count(),
            builder.path.len()
        );
        builder.path
    }

    /// Converts an em size to the ascent-to-descent height `Scale` expects.
    fn pixel_height(&self, em_size: f32) -> f32 {
        let units_per_em = f32::from(self.font.units_per_em());
        if units_per_em <= 0.0 {
            return em_size;
        }
        let metrics = self.font.v_metrics_unscaled();
        em_size * (metrics.ascent - metrics.descent) / units_per_em
    }
}

fn font_cache() -> &'static Mutex<HashMap<PathBuf, FontHandle>> {
    static CACHE: OnceLock<Mutex<HashMap<PathBuf, FontHandle>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn load_default_from_system() -> Option<Font<'static>> {
    let mut db = Database::new();
    db.load_system_fonts();

    let families = [Family::SansSerif];
    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|face| face.id))?;
    let face = db.face(id)?;
    debug!("Default font face: {:?}", face.families);

    let bytes = match &face.source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => fs::read(path).ok()?,
        fontdb::Source::Binary(bytes) => bytes.as_ref().as_ref().to_vec(),
    };
    Font::try_from_vec_and_index(bytes, face.index)
}

/// Collects glyph outlines as absolute SVG path commands, shifted by the
/// origin of the glyph being outlined.
#[derive(Debug)]
struct PathDataBuilder {
    path: String,
    origin: Point<f32>,
}

impl Default for PathDataBuilder {
    fn default() -> Self {
        Self {
            path: String::new(),
            origin: point(0.0, 0.0),
        }
    }
}

impl PathDataBuilder {
    fn at(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin.x + x, self.origin.y + y)
    }
}

impl OutlineBuilder for PathDataBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.at(x, y);
        let _ = write!(self.path, "M{} {} ", x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.at(x, y);
        let _ = write!(self.path, "L{} {} ", x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.at(x1, y1);
        let (x, y) = self.at(x, y);
        let _ = write!(self.path, "Q{} {} {} {} ", x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.at(x1, y1);
        let (x2, y2) = self.at(x2, y2);
        let (x, y) = self.at(x, y);
        let _ = write!(self.path, "C{} {} {} {} {} {} ", x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.path.push_str("Z ");
    }
}
