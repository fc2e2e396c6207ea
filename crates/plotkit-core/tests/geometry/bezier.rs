use plotkit_core::{flatten_cubic, tolerance_for_scale, Coordinate, CubicBezier, MAX_DEPTH};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-100.0f64..100.0, -100.0f64..100.0).prop_map(Coordinate::from)
}

#[test]
fn test_arch_keeps_shape_after_cleaning() {
    let start = Coordinate::new(0.0, 0.0);
    let points = flatten_cubic(
        start,
        Coordinate::new(0.0, 10.0),
        Coordinate::new(10.0, 10.0),
        Coordinate::new(10.0, 0.0),
        2.0,
    );

    let mut run = vec![start];
    run.extend(points);
    let cleaned = plotkit_core::simplify(&run, 0.0);

    assert!(cleaned.len() > 2);
    assert_eq!(*cleaned.last().unwrap(), Coordinate::new(10.0, 0.0));
}

proptest! {
    #[test]
    fn prop_flatten_ends_at_end(
        start in coordinate(),
        c1 in coordinate(),
        c2 in coordinate(),
        end in coordinate(),
        scale in 0.1f64..10.0,
    ) {
        let points = flatten_cubic(start, c1, c2, end, scale);
        prop_assert!(!points.is_empty());
        prop_assert!(points.len() <= 1 << MAX_DEPTH);
        prop_assert_eq!(*points.last().unwrap(), end);
    }

    #[test]
    fn prop_flatten_within_deviation_bound(
        start in coordinate(),
        c1 in coordinate(),
        c2 in coordinate(),
        end in coordinate(),
        scale in 0.1f64..10.0,
    ) {
        let curve = CubicBezier::new(start, c1, c2, end);
        let mut polyline = vec![start];
        polyline.extend(curve.flatten(scale));
        let tolerance = tolerance_for_scale(scale);

        for i in 0..=200 {
            let sample = curve.point_at(i as f64 / 200.0);
            let nearest = polyline
                .windows(2)
                .map(|w| sample.segment_distance(w[0], w[1]))
                .fold(f64::INFINITY, f64::min);
            prop_assert!(nearest <= tolerance + 1e-6, "deviation {} > {}", nearest, tolerance);
        }
    }
}
