use plotkit_core::{Coordinate, PlotError, PlotterPoint, ResourceLoadError};
use plotkit_svg::ArtworkConverter;
use std::io::Write;

fn up(x: f64, y: f64) -> PlotterPoint {
    PlotterPoint::PenUp(Coordinate::new(x, y))
}

fn down(x: f64, y: f64) -> PlotterPoint {
    PlotterPoint::PenDown(Coordinate::new(x, y))
}

const RECT_PATH: &str = "M0,0 L10,0 L10,10 L0,10 L0,0";

#[test]
fn test_rectangle_path_round_trip() {
    let points = ArtworkConverter::default()
        .from_path_data(RECT_PATH, 2.0)
        .unwrap();
    assert_eq!(
        points,
        vec![
            up(0.0, 0.0),
            down(0.0, 0.0),
            down(10.0, 0.0),
            down(10.0, 10.0),
            down(0.0, 10.0),
            down(0.0, 0.0),
        ]
    );

    let bb = ArtworkConverter::aabb(&points).unwrap();
    assert_eq!((bb.origin_x, bb.origin_y), (0.0, 0.0));
    assert_eq!((bb.width, bb.height), (10.0, 10.0));
    assert_eq!((bb.center_x, bb.center_y), (5.0, 5.0));
}

#[test]
fn test_rect_element_matches_rectangle_path() {
    let converter = ArtworkConverter::default();
    let from_svg = converter
        .from_svg_str(r#"<svg><rect width="10" height="10"/></svg>"#, 2.0)
        .unwrap();
    let from_path = converter.from_path_data(RECT_PATH, 2.0).unwrap();
    assert_eq!(from_svg, from_path);
}

#[test]
fn test_moves_only_have_no_bounds() {
    let points = ArtworkConverter::default()
        .from_path_data("M0 0 M5 5", 2.0)
        .unwrap();
    assert_eq!(points, vec![up(0.0, 0.0), up(5.0, 5.0)]);
    assert!(ArtworkConverter::aabb(&points).is_none());
}

#[test]
fn test_arch_curve_is_flattened() {
    let points = ArtworkConverter::default()
        .from_path_data("M0 0 C0 10 10 10 10 0", 2.0)
        .unwrap();
    assert!(points.len() > 3);
    assert_eq!(points[0], up(0.0, 0.0));
    assert_eq!(*points.last().unwrap(), down(10.0, 0.0));

    let bb = ArtworkConverter::aabb(&points).unwrap();
    // The curve peaks at 7.5 and the flattening stays within 0.5 of it.
    assert!(bb.height <= 7.5 + 1e-9);
    assert!(bb.height >= 7.0);
}

#[test]
fn test_subpaths_stay_separate() {
    let points = ArtworkConverter::default()
        .from_path_data("M0 0 L10 0 M0 5 L10 5", 2.0)
        .unwrap();
    assert_eq!(
        points,
        vec![
            up(0.0, 0.0),
            down(0.0, 0.0),
            down(10.0, 0.0),
            up(0.0, 5.0),
            down(0.0, 5.0),
            down(10.0, 5.0),
        ]
    );
}

#[test]
fn test_from_file() {
    let mut file = tempfile::Builder::new().suffix(".svg").tempfile().unwrap();
    write!(
        file,
        r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" width="20mm" height="20mm">
  <line x1="0" y1="0" x2="20" y2="20"/>
</svg>"#
    )
    .unwrap();

    let points = ArtworkConverter::default()
        .from_file(file.path(), 2.0)
        .unwrap();
    assert_eq!(points, vec![up(0.0, 0.0), down(0.0, 0.0), down(20.0, 20.0)]);
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.svg");
    let err = ArtworkConverter::default()
        .from_file(&missing, 2.0)
        .unwrap_err();

    assert!(matches!(
        err,
        PlotError::ResourceLoad(ResourceLoadError::Io { .. })
    ));
    assert!(err.to_string().contains("missing.svg"));
}

#[test]
fn test_broken_path_in_document_aborts() {
    let err = ArtworkConverter::default()
        .from_svg_str(r#"<svg><path d="M0 0 L1 1"/><path d="L5 5"/></svg>"#, 2.0)
        .unwrap_err();
    assert!(matches!(err, PlotError::MalformedPath(_)));
}
