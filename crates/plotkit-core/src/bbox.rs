//! Bounds of the drawn geometry in a point stream.

use crate::types::{BoundingBox, Coordinate, PlotterPoint};

/// Computes the axis-aligned box around every `PenDown` point.
///
/// `PenUp` markers are travel moves and do not count. Returns `None` when the
/// stream draws nothing. Minimum and maximum are tracked independently on each
/// axis, so the very first point seeds both.
pub fn bounding_box(points: &[PlotterPoint]) -> Option<BoundingBox> {
    let mut drawn = points.iter().filter_map(|p| match p {
        PlotterPoint::PenDown(c) => Some(*c),
        PlotterPoint::PenUp(_) => None,
    });

    let first = drawn.next()?;
    let (min, max) = drawn.fold((first, first), |(min, max), p| {
        (
            Coordinate::new(
                if p.x < min.x { p.x } else { min.x },
                if p.y < min.y { p.y } else { min.y },
            ),
            Coordinate::new(
                if p.x > max.x { p.x } else { max.x },
                if p.y > max.y { p.y } else { max.y },
            ),
        )
    });

    Some(BoundingBox::from_extents(min, max))
}
