//! Douglas-Peucker polyline simplification.

use crate::types::Coordinate;

/// Reduces `points` to the subset needed to stay within `tolerance`.
///
/// The first and last points are always kept. A point is kept only when its
/// distance to the chord of the span it was considered in is strictly greater
/// than `tolerance`, so with a tolerance of `0.0` only exactly collinear and
/// duplicate points are removed. Negative tolerances are treated as `0.0`.
///
/// Split points do not depend on the tolerance, which makes the retained set
/// shrink monotonically as the tolerance grows.
pub fn simplify(points: &[Coordinate], tolerance: f64) -> Vec<Coordinate> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let tol_sq = tolerance.max(0.0).powi(2);
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut spans = vec![(0usize, last)];
    while let Some((first, last)) = spans.pop() {
        if last <= first + 1 {
            continue;
        }

        let mut max_dist_sq = tol_sq;
        let mut split = None;
        for (i, p) in points.iter().enumerate().take(last).skip(first + 1) {
            let dist_sq = p.segment_distance_squared(points[first], points[last]);
            if dist_sq > max_dist_sq {
                max_dist_sq = dist_sq;
                split = Some(i);
            }
        }

        if let Some(i) = split {
            keep[i] = true;
            spans.push((first, i));
            spans.push((i, last));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}
