//! Shape extraction and path post-processing for SVG documents.
//!
//! [`ShapeOptimizer::extract_path_data`] finds every drawable element in a
//! document and converts it to path data: `path`, `rect` (with rounded
//! corners), `circle`, `ellipse`, `line`, `polyline` and `polygon`. Content of
//! non-rendered containers such as `<defs>` is skipped.
//!
//! [`ShapeOptimizer::optimize`] runs on the normalized commands and applies
//! the numeric settings of [`OptimizerSettings`].

use plotkit_core::{Coordinate, CubicBezier, PathCommand, ResourceLoadError, ResourceResult};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Geometry-affecting optimizer options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerSettings {
    /// Replace curves that are straight within the precision by lines.
    pub straight_curves: bool,
    /// Decimal places kept on every coordinate. `None` disables rounding and
    /// is written as `false`, which TOML can store.
    #[serde(
        serialize_with = "serialize_precision",
        deserialize_with = "deserialize_precision"
    )]
    pub float_precision: Option<u32>,
    /// Drop segments that do not move the pen.
    pub remove_useless: bool,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            straight_curves: false,
            float_precision: Some(3),
            remove_useless: true,
        }
    }
}

/// Maximum `float_precision` accepted; more digits than an `f64` holds.
pub const MAX_FLOAT_PRECISION: u32 = 15;

#[derive(Deserialize)]
#[serde(untagged)]
enum PrecisionRepr {
    Digits(u32),
    Enabled(bool),
}

fn serialize_precision<S>(precision: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match precision {
        Some(digits) => serializer.serialize_u32(*digits),
        None => serializer.serialize_bool(false),
    }
}

fn deserialize_precision<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<PrecisionRepr>::deserialize(deserializer)? {
        Some(PrecisionRepr::Digits(digits)) => Ok(Some(digits)),
        Some(PrecisionRepr::Enabled(false)) | None => Ok(None),
        Some(PrecisionRepr::Enabled(true)) => Err(serde::de::Error::custom(
            "float_precision must be a digit count or false",
        )),
    }
}

/// Extracts and post-processes SVG geometry.
#[derive(Debug, Clone, Default)]
pub struct ShapeOptimizer {
    settings: OptimizerSettings,
}

impl ShapeOptimizer {
    pub fn new(settings: OptimizerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &OptimizerSettings {
        &self.settings
    }

    /// Returns the path data of every drawable element, in document order.
    ///
    /// Fails with [`ResourceLoadError::InvalidSvg`] when the text has no
    /// `<svg>` element. Elements with missing or degenerate geometry are
    /// skipped.
    pub fn extract_path_data(&self, svg: &str) -> ResourceResult<Vec<String>> {
        if !svg.contains("<svg") {
            return Err(ResourceLoadError::InvalidSvg {
                reason: "missing <svg> element".to_string(),
            });
        }

        let without_comments = comment_regex().replace_all(svg, "");
        let visible = hidden_container_regex().replace_all(&without_comments, "");

        for name in transformed_containers(&visible) {
            warn!(
                "Ignoring transform on <{}>, its children are converted untransformed",
                name
            );
        }

        let mut data = Vec::new();
        for caps in element_regex().captures_iter(&visible) {
            let name = &caps[1];
            let attrs = parse_attributes(&caps[2]);

            if attrs.contains_key("transform") {
                warn!("Ignoring transform on <{}>, converting untransformed", name);
            }

            match shape_to_path_data(name, &attrs) {
                Some(d) => data.push(d),
                None => debug!("Skipping <{}> without drawable geometry", name),
            }
        }

        debug!("Extracted {} drawable elements", data.len());
        Ok(data)
    }

    /// Applies rounding, straight-curve conversion and useless-segment removal
    /// to normalized commands.
    pub fn optimize(&self, commands: Vec<PathCommand>) -> Vec<PathCommand> {
        let precision = self.settings.float_precision.map(|p| p.min(MAX_FLOAT_PRECISION));
        let straight_tolerance = precision.map_or(1e-3, |p| 10f64.powi(-(p as i32)));

        let mut out = Vec::with_capacity(commands.len());
        let mut current: Option<Coordinate> = None;

        for command in commands {
            let mut command = match precision {
                Some(p) => command.map_coordinates(|c| round_coordinate(c, p)),
                None => command,
            };

            if let (true, Some(from), PathCommand::CubicCurveTo { c1, c2, end }) =
                (self.settings.straight_curves, current, command)
            {
                if CubicBezier::new(from, c1, c2, end).is_flat(straight_tolerance) {
                    command = PathCommand::LineTo { from, to: end };
                }
            }

            if self.settings.remove_useless && is_useless(&command, current) {
                continue;
            }

            current = Some(command.end_point());
            out.push(command);
        }

        out
    }
}

fn is_useless(command: &PathCommand, current: Option<Coordinate>) -> bool {
    match *command {
        PathCommand::MoveTo(_) => false,
        PathCommand::LineTo { from, to } => from == to,
        PathCommand::CubicCurveTo { c1, c2, end } => {
            current.is_some_and(|start| start == c1 && c1 == c2 && c2 == end)
        }
    }
}

fn round_coordinate(c: Coordinate, precision: u32) -> Coordinate {
    let factor = 10f64.powi(precision as i32);
    // Adding 0.0 turns -0.0 into 0.0.
    let round = |v: f64| (v * factor).round() / factor + 0.0;
    Coordinate::new(round(c.x), round(c.y))
}

fn comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("invalid comment regex"))
}

fn hidden_container_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let names = ["defs", "clipPath", "mask", "marker", "pattern", "symbol"];
        let alternatives: Vec<String> = names
            .iter()
            .map(|n| format!(r"<{n}\b[^>]*/>|<{n}\b.*?</{n}\s*>"))
            .collect();
        Regex::new(&format!("(?s){}", alternatives.join("|")))
            .expect("invalid container regex")
    })
}

fn element_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<(path|rect|circle|ellipse|line|polyline|polygon)\b([^>]*)>")
            .expect("invalid element regex")
    })
}

fn container_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<(svg|g|a|switch|use)\b([^>]*)>").expect("invalid container regex")
    })
}

/// Names of grouping elements that carry a `transform` attribute.
fn transformed_containers(svg: &str) -> Vec<String> {
    container_regex()
        .captures_iter(svg)
        .filter(|caps| parse_attributes(&caps[2]).contains_key("transform"))
        .map(|caps| caps[1].to_string())
        .collect()
}

fn attribute_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("invalid attribute regex")
    })
}

fn length_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)")
            .expect("invalid length regex")
    })
}

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("invalid number regex")
    })
}

fn parse_attributes(raw: &str) -> HashMap<String, String> {
    attribute_regex()
        .captures_iter(raw)
        .map(|caps| {
            let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            (caps[1].to_string(), value.to_string())
        })
        .collect()
}

/// Reads the leading number of a length such as `10`, `2.5mm` or `-3e2px`.
fn parse_length(value: &str) -> Option<f64> {
    let caps = length_regex().captures(value)?;
    caps[1].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn length(attrs: &HashMap<String, String>, name: &str) -> Option<f64> {
    attrs.get(name).and_then(|v| parse_length(v))
}

fn shape_to_path_data(name: &str, attrs: &HashMap<String, String>) -> Option<String> {
    match name {
        "path" => attrs
            .get("d")
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        "rect" => rect_path(attrs),
        "circle" => {
            let r = length(attrs, "r")?;
            ellipse_path(
                length(attrs, "cx").unwrap_or(0.0),
                length(attrs, "cy").unwrap_or(0.0),
                r,
                r,
            )
        }
        "ellipse" => ellipse_path(
            length(attrs, "cx").unwrap_or(0.0),
            length(attrs, "cy").unwrap_or(0.0),
            length(attrs, "rx")?,
            length(attrs, "ry")?,
        ),
        "line" => Some(format!(
            "M{} {} L{} {}",
            length(attrs, "x1").unwrap_or(0.0),
            length(attrs, "y1").unwrap_or(0.0),
            length(attrs, "x2").unwrap_or(0.0),
            length(attrs, "y2").unwrap_or(0.0),
        )),
        "polyline" => points_path(attrs.get("points")?, false),
        "polygon" => points_path(attrs.get("points")?, true),
        _ => None,
    }
}

fn rect_path(attrs: &HashMap<String, String>) -> Option<String> {
    let x = length(attrs, "x").unwrap_or(0.0);
    let y = length(attrs, "y").unwrap_or(0.0);
    let w = length(attrs, "width")?;
    let h = length(attrs, "height")?;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }

    // A single given radius applies to both axes.
    let (rx, ry) = match (length(attrs, "rx"), length(attrs, "ry")) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0.0, 0.0),
    };
    let rx = rx.max(0.0).min(w / 2.0);
    let ry = ry.max(0.0).min(h / 2.0);

    if rx == 0.0 || ry == 0.0 {
        return Some(format!("M{x} {y} H{} V{} H{x} Z", x + w, y + h));
    }

    let mut d = String::new();
    let _ = write!(d, "M{} {y} H{}", x + rx, x + w - rx);
    let _ = write!(d, " A{rx} {ry} 0 0 1 {} {}", x + w, y + ry);
    let _ = write!(d, " V{}", y + h - ry);
    let _ = write!(d, " A{rx} {ry} 0 0 1 {} {}", x + w - rx, y + h);
    let _ = write!(d, " H{}", x + rx);
    let _ = write!(d, " A{rx} {ry} 0 0 1 {x} {}", y + h - ry);
    let _ = write!(d, " V{}", y + ry);
    let _ = write!(d, " A{rx} {ry} 0 0 1 {} {y} Z", x + rx);
    Some(d)
}

fn ellipse_path(cx: f64, cy: f64, rx: f64, ry: f64) -> Option<String> {
    if rx <= 0.0 || ry <= 0.0 {
        return None;
    }
    Some(format!(
        "M{} {cy} A{rx} {ry} 0 1 0 {} {cy} A{rx} {ry} 0 1 0 {} {cy} Z",
        cx + rx,
        cx - rx,
        cx + rx
    ))
}

/// Builds path data from a `points` list. A trailing odd number is ignored.
fn points_path(points: &str, close: bool) -> Option<String> {
    let numbers: Vec<f64> = number_regex()
        .find_iter(points)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    let mut pairs = numbers.chunks_exact(2);

    let first = pairs.next()?;
    let mut d = format!("M{} {}", first[0], first[1]);
    for pair in pairs {
        let _ = write!(d, " L{} {}", pair[0], pair[1]);
    }
    if close {
        d.push_str(" Z");
    }
    Some(d)
}
