//! Adaptive cubic Bezier flattening.
//!
//! Curves are split at `t = 0.5` with de Casteljau until every piece is flat
//! enough to be drawn as a straight segment. A piece counts as flat when both
//! inner control points lie within the tolerance of the piece's chord. The
//! curve never leaves its control polygon's convex hull, so the chord is then
//! within the tolerance of the true curve as well.

use crate::types::Coordinate;
use tracing::{debug, warn};

/// Scale used when the caller has no preference.
pub const DEFAULT_SCALE: f64 = 2.0;

/// Deviation allowed at `scale == 1.0`, in artwork units.
pub const PATH_DISTANCE_EPSILON: f64 = 1.0;

/// Subdivision depth cap. Bounds the output at `2^MAX_DEPTH` points per curve.
pub const MAX_DEPTH: u32 = 12;

/// Converts a flattening `scale` into a distance tolerance.
///
/// Larger scales give smaller tolerances and therefore more points. Scales
/// that are not strictly positive and finite fall back to [`DEFAULT_SCALE`].
pub fn tolerance_for_scale(scale: f64) -> f64 {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        warn!("Invalid flattening scale {}, using {}", scale, DEFAULT_SCALE);
        DEFAULT_SCALE
    };
    PATH_DISTANCE_EPSILON / scale
}

/// A cubic Bezier segment in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub start: Coordinate,
    pub c1: Coordinate,
    pub c2: Coordinate,
    pub end: Coordinate,
}

impl CubicBezier {
    pub fn new(start: Coordinate, c1: Coordinate, c2: Coordinate, end: Coordinate) -> Self {
        Self { start, c1, c2, end }
    }

    /// Evaluates the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Coordinate {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Coordinate::new(
            a * self.start.x + b * self.c1.x + c * self.c2.x + d * self.end.x,
            a * self.start.y + b * self.c1.y + c * self.c2.y + d * self.end.y,
        )
    }

    /// Splits the curve at its parameter midpoint.
    pub fn split(&self) -> (CubicBezier, CubicBezier) {
        let p12 = self.start.midpoint(self.c1);
        let p23 = self.c1.midpoint(self.c2);
        let p34 = self.c2.midpoint(self.end);
        let p123 = p12.midpoint(p23);
        let p234 = p23.midpoint(p34);
        let mid = p123.midpoint(p234);

        (
            CubicBezier::new(self.start, p12, p123, mid),
            CubicBezier::new(mid, p234, p34, self.end),
        )
    }

    /// Whether both control points are within `tolerance` of the chord.
    ///
    /// Returns false for non-finite input so that such curves run into the
    /// depth cap instead of being accepted.
    pub fn is_flat(&self, tolerance: f64) -> bool {
        let tol_sq = tolerance * tolerance;
        self.c1.segment_distance_squared(self.start, self.end) <= tol_sq
            && self.c2.segment_distance_squared(self.start, self.end) <= tol_sq
    }

    /// Flattens the curve into line segment endpoints.
    ///
    /// The start point is not included: it is the caller's current position.
    /// The last point is always exactly `end`. A curve that is already flat
    /// comes back as the single point `[end]`.
    pub fn flatten(&self, scale: f64) -> Vec<Coordinate> {
        let tolerance = tolerance_for_scale(scale);
        let mut points = Vec::new();
        let mut capped = false;
        self.subdivide(tolerance, 0, &mut points, &mut capped);

        if capped {
            debug!(
                "Curve {} -> {} hit subdivision depth {}, emitted {} points",
                self.start,
                self.end,
                MAX_DEPTH,
                points.len()
            );
        }
        points
    }

    fn subdivide(&self, tolerance: f64, depth: u32, out: &mut Vec<Coordinate>, capped: &mut bool) {
        if self.is_flat(tolerance) {
            out.push(self.end);
            return;
        }
        if depth >= MAX_DEPTH {
            *capped = true;
            out.push(self.end);
            return;
        }

        let (left, right) = self.split();
        left.subdivide(tolerance, depth + 1, out, capped);
        right.subdivide(tolerance, depth + 1, out, capped);
    }
}

/// Flattens the cubic `start, c1, c2, end`. See [`CubicBezier::flatten`].
pub fn flatten_cubic(
    start: Coordinate,
    c1: Coordinate,
    c2: Coordinate,
    end: Coordinate,
    scale: f64,
) -> Vec<Coordinate> {
    CubicBezier::new(start, c1, c2, end).flatten(scale)
}
