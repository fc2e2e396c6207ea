//! Point-stream data model.
//!
//! Everything in here is a small `Copy` value. A conversion builds these,
//! hands them to the caller and keeps nothing behind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the artwork's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Midpoint between `self` and `other`.
    pub fn midpoint(&self, other: Coordinate) -> Coordinate {
        Coordinate::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance_squared(&self, other: Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: Coordinate) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance from `self` to the segment `a`-`b`.
    ///
    /// Falls back to point distance when the segment has zero length.
    pub fn segment_distance_squared(&self, a: Coordinate, b: Coordinate) -> f64 {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return self.distance_squared(a);
        }

        let t = ((self.x - a.x) * dx + (self.y - a.y) * dy) / len_sq;
        let t = t.clamp(0.0, 1.0);
        self.distance_squared(Coordinate::new(a.x + t * dx, a.y + t * dy))
    }

    pub fn segment_distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        self.segment_distance_squared(a, b).sqrt()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A normalized path command. All coordinates are absolute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Starts a new subpath.
    MoveTo(Coordinate),
    /// A straight segment. `from` is always the current position.
    LineTo { from: Coordinate, to: Coordinate },
    /// A cubic curve starting at the current position.
    CubicCurveTo {
        c1: Coordinate,
        c2: Coordinate,
        end: Coordinate,
    },
}

impl PathCommand {
    /// The position the pen ends up at after this command.
    pub fn end_point(&self) -> Coordinate {
        match *self {
            PathCommand::MoveTo(p) => p,
            PathCommand::LineTo { to, .. } => to,
            PathCommand::CubicCurveTo { end, .. } => end,
        }
    }

    /// Applies `f` to every coordinate of the command.
    pub fn map_coordinates<F>(self, mut f: F) -> Self
    where
        F: FnMut(Coordinate) -> Coordinate,
    {
        match self {
            PathCommand::MoveTo(p) => PathCommand::MoveTo(f(p)),
            PathCommand::LineTo { from, to } => PathCommand::LineTo {
                from: f(from),
                to: f(to),
            },
            PathCommand::CubicCurveTo { c1, c2, end } => PathCommand::CubicCurveTo {
                c1: f(c1),
                c2: f(c2),
                end: f(end),
            },
        }
    }
}

/// One entry of the plotter point stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlotterPoint {
    /// Travel to this position without drawing; starts a subpath.
    PenUp(Coordinate),
    /// Draw to this position.
    PenDown(Coordinate),
}

impl PlotterPoint {
    pub fn coordinate(&self) -> Coordinate {
        match *self {
            PlotterPoint::PenUp(p) | PlotterPoint::PenDown(p) => p,
        }
    }

    pub fn is_pen_up(&self) -> bool {
        matches!(self, PlotterPoint::PenUp(_))
    }

    pub fn is_pen_down(&self) -> bool {
        matches!(self, PlotterPoint::PenDown(_))
    }
}

/// Axis-aligned extents of the drawn geometry in a point stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub origin_x: f64,
    pub origin_y: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Builds a box from its minimum and maximum corners.
    pub fn from_extents(min: Coordinate, max: Coordinate) -> Self {
        let width = (max.x - min.x).abs();
        let height = (max.y - min.y).abs();
        Self {
            origin_x: min.x,
            origin_y: min.y,
            center_x: min.x + width / 2.0,
            center_y: min.y + height / 2.0,
            width,
            height,
        }
    }

    pub fn min(&self) -> Coordinate {
        Coordinate::new(self.origin_x, self.origin_y)
    }

    pub fn max(&self) -> Coordinate {
        Coordinate::new(self.origin_x + self.width, self.origin_y + self.height)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.center_x, self.center_y)
    }

    /// Whether `p` lies inside the box, edges included.
    pub fn contains(&self, p: Coordinate) -> bool {
        let max = self.max();
        p.x >= self.origin_x && p.x <= max.x && p.y >= self.origin_y && p.y <= max.y
    }
}
