use plotkit_core::{Coordinate, PlotterPoint};
use plotkit_svg::{ArtworkConverter, ConverterOptions, OptimizerSettings};

fn convert(svg: &str) -> Vec<PlotterPoint> {
    ArtworkConverter::default().from_svg_str(svg, 2.0).unwrap()
}

fn pen_ups(points: &[PlotterPoint]) -> usize {
    points.iter().filter(|p| p.is_pen_up()).count()
}

#[test]
fn test_circle_stays_on_radius() {
    let points = convert(r#"<svg><circle cx="50" cy="50" r="20"/></svg>"#);
    assert_eq!(pen_ups(&points), 1);
    assert_eq!(points[0], PlotterPoint::PenUp(Coordinate::new(70.0, 50.0)));
    assert_eq!(points.last().unwrap().coordinate(), Coordinate::new(70.0, 50.0));

    let center = Coordinate::new(50.0, 50.0);
    for p in &points {
        let r = p.coordinate().distance(center);
        // Chords cut inside the circle by at most the flattening tolerance.
        assert!((19.4..=20.01).contains(&r), "radius {}", r);
    }

    let bb = ArtworkConverter::aabb(&points).unwrap();
    assert!((bb.center_x - 50.0).abs() < 0.5);
    assert!((bb.width - 40.0).abs() < 1.0);
}

#[test]
fn test_ellipse_bounds() {
    let points = convert(r#"<svg><ellipse cx="0" cy="0" rx="30" ry="10"/></svg>"#);
    let bb = ArtworkConverter::aabb(&points).unwrap();
    assert!((bb.width - 60.0).abs() < 1.0);
    assert!((bb.height - 20.0).abs() < 1.0);
}

#[test]
fn test_rounded_rect_stays_inside_outline() {
    let points = convert(r#"<svg><rect x="0" y="0" width="20" height="10" rx="3"/></svg>"#);
    let bb = ArtworkConverter::aabb(&points).unwrap();
    assert!((bb.width - 20.0).abs() < 1e-9);
    assert!((bb.height - 10.0).abs() < 1e-9);
    // Corners are cut off.
    assert!(points
        .iter()
        .all(|p| p.coordinate() != Coordinate::new(0.0, 0.0)));
}

#[test]
fn test_lines_polylines_and_polygons() {
    let points = convert(
        r#"<svg>
            <line x1="0" y1="0" x2="10" y2="0"/>
            <polyline points="0,5 5,10 10,5"/>
            <polygon points="20,0 30,0 25,8"/>
        </svg>"#,
    );
    assert_eq!(pen_ups(&points), 3);
    let drawn = points.iter().filter(|p| p.is_pen_down()).count();
    assert_eq!(drawn, 2 + 3 + 4);

    let bb = ArtworkConverter::aabb(&points).unwrap();
    assert_eq!(bb.min(), Coordinate::new(0.0, 0.0));
    assert_eq!(bb.max(), Coordinate::new(30.0, 10.0));
}

#[test]
fn test_elements_in_document_order() {
    let points = convert(
        r#"<svg>
            <path d="M100 100 L110 100"/>
            <g><rect x="1" y="1" width="2" height="2"/></g>
        </svg>"#,
    );
    assert_eq!(points[0], PlotterPoint::PenUp(Coordinate::new(100.0, 100.0)));
    assert_eq!(points[3], PlotterPoint::PenUp(Coordinate::new(1.0, 1.0)));
}

#[test]
fn test_coordinates_are_rounded() {
    let points = convert(r#"<svg><path d="M0.00049 0 L1.23456 0"/></svg>"#);
    assert_eq!(
        points,
        vec![
            PlotterPoint::PenUp(Coordinate::new(0.0, 0.0)),
            PlotterPoint::PenDown(Coordinate::new(0.0, 0.0)),
            PlotterPoint::PenDown(Coordinate::new(1.235, 0.0)),
        ]
    );

    let exact = ArtworkConverter::new(ConverterOptions {
        optimizer: OptimizerSettings {
            float_precision: None,
            ..OptimizerSettings::default()
        },
        ..ConverterOptions::default()
    });
    let points = exact
        .from_svg_str(r#"<svg><path d="M0 0 L1.23456 0"/></svg>"#, 2.0)
        .unwrap();
    assert_eq!(points[2].coordinate(), Coordinate::new(1.23456, 0.0));
}

#[test]
fn test_empty_document_has_no_points() {
    assert!(convert("<svg></svg>").is_empty());
}
