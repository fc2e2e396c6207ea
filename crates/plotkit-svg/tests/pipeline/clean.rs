use plotkit_core::{Coordinate, PlotterPoint};
use plotkit_svg::clean;
use proptest::prelude::*;

fn stream() -> impl Strategy<Value = Vec<PlotterPoint>> {
    prop::collection::vec(
        (prop::bool::weighted(0.2), -50i32..50, -50i32..50),
        0..60,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(pen_up, x, y)| {
                // Integer grid so collinear and duplicate points actually occur.
                let c = Coordinate::new(f64::from(x), f64::from(y));
                if pen_up {
                    PlotterPoint::PenUp(c)
                } else {
                    PlotterPoint::PenDown(c)
                }
            })
            .collect()
    })
}

#[test]
fn test_clean_empty() {
    assert!(clean(&[], 0.0).is_empty());
    assert!(clean(&[], 5.0).is_empty());
}

proptest! {
    #[test]
    fn prop_clean_is_idempotent_at_zero(points in stream()) {
        let once = clean(&points, 0.0);
        prop_assert_eq!(clean(&once, 0.0), once);
    }

    #[test]
    fn prop_clean_keeps_every_pen_up(points in stream(), tolerance in 0.0f64..10.0) {
        let ups: Vec<_> = points.iter().filter(|p| p.is_pen_up()).copied().collect();
        let cleaned = clean(&points, tolerance);
        let cleaned_ups: Vec<_> = cleaned.iter().filter(|p| p.is_pen_up()).copied().collect();
        prop_assert_eq!(ups, cleaned_ups);
        prop_assert!(cleaned.len() <= points.len());
    }
}
