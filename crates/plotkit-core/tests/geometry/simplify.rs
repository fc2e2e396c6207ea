use plotkit_core::{simplify, Coordinate};
use proptest::prelude::*;

fn polyline() -> impl Strategy<Value = Vec<Coordinate>> {
    prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 0..60)
        .prop_map(|raw| raw.into_iter().map(Coordinate::from).collect())
}

/// Indices of `kept` inside `input`, or `None` if it is not a subsequence.
fn subsequence_indices(input: &[Coordinate], kept: &[Coordinate]) -> Option<Vec<usize>> {
    let mut indices = Vec::with_capacity(kept.len());
    let mut cursor = 0;
    for k in kept {
        let offset = input[cursor..].iter().position(|p| p == k)?;
        indices.push(cursor + offset);
        cursor += offset + 1;
    }
    Some(indices)
}

proptest! {
    #[test]
    fn prop_keeps_endpoints_and_is_subsequence(points in polyline()) {
        let kept = simplify(&points, 0.0);

        prop_assert_eq!(kept.first(), points.first());
        prop_assert_eq!(kept.last(), points.last());
        prop_assert!(subsequence_indices(&points, &kept).is_some());
    }

    #[test]
    fn prop_monotone_in_tolerance(points in polyline(), t1 in 0.0f64..50.0, delta in 0.0f64..50.0) {
        let fine = simplify(&points, t1);
        let coarse = simplify(&points, t1 + delta);
        prop_assert!(coarse.len() <= fine.len());
    }

    #[test]
    fn prop_idempotent_at_zero_tolerance(points in polyline()) {
        let once = simplify(&points, 0.0);
        let twice = simplify(&once, 0.0);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_discarded_points_within_tolerance(points in polyline(), tolerance in 0.0f64..100.0) {
        let kept = simplify(&points, tolerance);
        let indices = subsequence_indices(&points, &kept).expect("subsequence");

        for pair in indices.windows(2) {
            let (a, b) = (points[pair[0]], points[pair[1]]);
            for p in &points[pair[0] + 1..pair[1]] {
                prop_assert!(p.segment_distance(a, b) <= tolerance + 1e-9);
            }
        }
    }
}
