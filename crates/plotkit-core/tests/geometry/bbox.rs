use plotkit_core::{bounding_box, Coordinate, PlotterPoint};
use proptest::prelude::*;

fn stream() -> impl Strategy<Value = Vec<PlotterPoint>> {
    prop::collection::vec(
        (any::<bool>(), -1000.0f64..1000.0, -1000.0f64..1000.0),
        0..80,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(pen_up, x, y)| {
                let c = Coordinate::new(x, y);
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
fn test_rectangle_bounds() {
    let rect = [
        PlotterPoint::PenUp(Coordinate::new(0.0, 0.0)),
        PlotterPoint::PenDown(Coordinate::new(0.0, 0.0)),
        PlotterPoint::PenDown(Coordinate::new(10.0, 0.0)),
        PlotterPoint::PenDown(Coordinate::new(10.0, 10.0)),
        PlotterPoint::PenDown(Coordinate::new(0.0, 10.0)),
        PlotterPoint::PenDown(Coordinate::new(0.0, 0.0)),
    ];

    let bb = bounding_box(&rect).expect("rectangle has bounds");
    assert_eq!(bb.origin_x, 0.0);
    assert_eq!(bb.origin_y, 0.0);
    assert_eq!(bb.width, 10.0);
    assert_eq!(bb.height, 10.0);
    assert_eq!(bb.center_x, 5.0);
    assert_eq!(bb.center_y, 5.0);
}

proptest! {
    #[test]
    fn prop_box_contains_every_drawn_point(points in stream()) {
        let drawn: Vec<Coordinate> = points
            .iter()
            .filter(|p| p.is_pen_down())
            .map(|p| p.coordinate())
            .collect();

        match bounding_box(&points) {
            None => prop_assert!(drawn.is_empty()),
            Some(bb) => {
                let eps = 1e-9;
                let max = bb.max();
                for p in drawn {
                    prop_assert!(p.x >= bb.origin_x && p.y >= bb.origin_y);
                    prop_assert!(p.x <= max.x + eps && p.y <= max.y + eps);
                }
                prop_assert!(bb.width >= 0.0 && bb.height >= 0.0);
            }
        }
    }
}
