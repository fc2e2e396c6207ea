//! Per-subpath simplification of point streams.

use plotkit_core::{simplify, Coordinate, PlotterPoint};

/// Simplifies every pen-down run of `points` independently.
///
/// `PenUp` markers are kept in place, including ones with no drawing after
/// them. Runs are split at each `PenUp` so simplification never bridges a
/// travel move.
pub fn clean(points: &[PlotterPoint], tolerance: f64) -> Vec<PlotterPoint> {
    let mut cleaned = Vec::with_capacity(points.len());
    let mut run: Vec<Coordinate> = Vec::new();

    for point in points {
        match *point {
            PlotterPoint::PenUp(_) => {
                flush(&mut run, tolerance, &mut cleaned);
                cleaned.push(*point);
            }
            PlotterPoint::PenDown(p) => run.push(p),
        }
    }
    flush(&mut run, tolerance, &mut cleaned);

    cleaned
}

fn flush(run: &mut Vec<Coordinate>, tolerance: f64, out: &mut Vec<PlotterPoint>) {
    if run.is_empty() {
        return;
    }
    out.extend(
        simplify(run, tolerance)
            .into_iter()
            .map(PlotterPoint::PenDown),
    );
    run.clear();
}
