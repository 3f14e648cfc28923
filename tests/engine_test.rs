//! End-to-end engine tests: submission through frame rendering.

use approx::assert_relative_eq;
use gridgraph::prelude::*;
use gridgraph::Error;
use proptest::prelude::*;

#[test]
fn test_circle_renders_two_symmetric_arcs() {
    let mut engine = GraphEngine::new();
    engine.submit_equation("x^2 + y^2 = 4").unwrap();
    let frame = engine.render_frame().unwrap();

    assert_eq!(frame.curves.len(), 1);
    let curve = &frame.curves[0];
    assert_eq!(curve.label, "x^2 + y^2 = 4");
    // Two branches, each a single unbroken arc.
    assert_eq!(curve.segments.len(), 2);

    // Every traced point must satisfy the relation once mapped back to
    // graph coordinates.
    let mapper = GridMapper::new(engine.camera(), engine.config());
    for segment in &curve.segments {
        for point in segment {
            let (gx, gy) = mapper.to_cartesian(point.x, point.y);
            assert_relative_eq!(gx * gx + gy * gy, 4.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_hyperbola_splits_at_the_pole() {
    let mut engine = GraphEngine::new();
    engine.submit_equation("x * y = 1").unwrap();
    let frame = engine.render_frame().unwrap();

    let curve = &frame.curves[0];
    // 125 samples over [-11, 11] land on x = 0 exactly; the pole
    // splits the branch into two runs.
    assert_eq!(curve.segments.len(), 2);
    for segment in &curve.segments {
        for point in segment {
            assert!(point.y.abs() <= 10_000.0);
            assert!(point.x.is_finite());
        }
    }
}

#[test]
fn test_malformed_relations_surface_typed_errors() {
    let mut engine = GraphEngine::new();
    assert!(matches!(
        engine.submit_equation("y == x"),
        Err(Error::MalformedEquation { .. })
    ));
    assert!(matches!(
        engine.submit_equation(""),
        Err(Error::MalformedEquation { .. })
    ));
    assert!(matches!(
        engine.submit_equation("banana(x) = y"),
        Err(Error::MalformedEquation { .. })
    ));
    assert_eq!(engine.equations().count(), 0);
}

#[test]
fn test_unsolvable_relation_renders_no_curve() {
    let mut engine = GraphEngine::new();
    let id = engine.submit_equation("sin(y) = x").unwrap();
    let frame = engine.render_frame().unwrap();
    assert_eq!(frame.curves.len(), 1);
    assert!(frame.curves[0].segments.is_empty());
    assert_eq!(engine.equation(id).unwrap().source(), "sin(y) = x");
}

#[test]
fn test_delete_and_toggle_change_the_frame() {
    let mut engine = GraphEngine::new();
    let line = engine.submit_equation("y = x").unwrap();
    let parabola = engine.submit_equation("y = x^2").unwrap();

    engine.toggle_visibility(line);
    let frame = engine.render_frame().unwrap();
    assert_eq!(frame.curves.len(), 1);
    assert_eq!(frame.curves[0].id, parabola);

    engine.delete_equation(parabola);
    engine.toggle_visibility(line);
    let frame = engine.render_frame().unwrap();
    assert_eq!(frame.curves.len(), 1);
    assert_eq!(frame.curves[0].id, line);
}

#[test]
fn test_zoom_and_pan_move_the_view() {
    let mut engine = GraphEngine::new();
    engine.zoom(ZoomDirection::Out);
    assert_relative_eq!(engine.camera().width, 22.0);

    engine.zoom(ZoomDirection::In);
    engine.zoom(ZoomDirection::In);
    assert_relative_eq!(engine.camera().width, 22.0 * 0.81);

    // Dragging the pointer right moves the view window left.
    engine.pan_pixels(70.0, 0.0);
    assert!(engine.camera().center_x < 0.0);
}

#[test]
fn test_markers_follow_the_camera() {
    let mut engine = GraphEngine::new();
    engine.pan_pixels(-350.0, 0.0);
    let frame = engine.render_frame().unwrap();

    // The view is now [0, 20]; every marker is a multiple of 2 and 0
    // is reported like any other marker.
    assert_relative_eq!(frame.x_markers.interval, 2.0);
    assert!(frame.x_markers.values.contains(&0.0));
    for value in &frame.x_markers.values {
        assert_relative_eq!(value % 2.0, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_density_is_shared_across_curves() {
    let mut engine = GraphEngine::new();
    engine.submit_equation("y = x").unwrap();
    let solo = engine.render_frame().unwrap().curves[0].point_count();
    assert_eq!(solo, 125);

    engine.submit_equation("y = x + 1").unwrap();
    let frame = engine.render_frame().unwrap();
    let per_curve = frame.curves[0].point_count();
    assert!(per_curve < solo);
    assert_eq!(frame.curves[1].point_count(), per_curve);
}

#[test]
fn test_records_round_trip_through_the_engine() {
    let record = GraphRecord::new("y = sqrt(x)", "half parabola");
    let json = serde_json::to_string(&record).unwrap();
    let loaded: GraphRecord = serde_json::from_str(&json).unwrap();

    let mut engine = GraphEngine::new();
    let id = engine.submit_equation(&loaded.equation).unwrap();
    assert_eq!(engine.equation(id).unwrap().source(), "y = sqrt(x)");
}

proptest! {
    #[test]
    fn prop_screen_cartesian_round_trip(
        center_x in -100.0_f64..100.0,
        center_y in -100.0_f64..100.0,
        width in 0.1_f64..1000.0,
        height in 0.1_f64..1000.0,
        px in 0.0_f64..700.0,
        py in 0.0_f64..600.0,
    ) {
        let camera = Camera::new(center_x, center_y, width, height).unwrap();
        let mapper = GridMapper::new(&camera, &GridConfig::default());
        let (gx, gy) = mapper.to_cartesian(px, py);
        let (back_x, back_y) = mapper.to_screen(gx, gy);
        prop_assert!((back_x - px).abs() < 1e-6);
        prop_assert!((back_y - py).abs() < 1e-6);
    }

    #[test]
    fn prop_markers_cover_any_view(
        center in -1000.0_f64..1000.0,
        span in 0.001_f64..10_000.0,
    ) {
        let min = center - span / 2.0;
        let max = center + span / 2.0;
        let markers = gridgraph::markers::plan_markers(min, max, 10).unwrap();
        prop_assert!(markers.values.first().copied().unwrap_or(f64::MAX) <= min + 1e-9);
        prop_assert!(markers.values.last().copied().unwrap_or(f64::MIN) >= max - 1e-9);
        // Between 2 and 21 markers for a target of 10.
        prop_assert!((2..=21).contains(&markers.values.len()));
    }
}
