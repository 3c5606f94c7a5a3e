use rangekit_designer::canvas::{Canvas, Modifiers, Tool};
use rangekit_designer::geometry::{Bounds, Point};
use rangekit_designer::viewport::Viewport;

#[test]
fn test_viewport_creation() {
    let vp = Viewport::new(1200.0, 800.0);
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan(), Point::ZERO);
    assert_eq!(vp.to_string(), "Zoom: 1.00x | Pan: (0.0, 0.0)");
}

#[test]
fn test_pixel_world_round_trip() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_zoom(2.0);
    vp.set_pan(Point::new(30.0, -10.0));

    let world = vp.pixel_to_world(Point::new(230.0, 190.0));
    assert_eq!(world, Point::new(100.0, 100.0));
    assert_eq!(vp.world_to_pixel(world), Point::new(230.0, 190.0));
}

#[test]
fn test_y_axis_points_down() {
    let vp = Viewport::new(1200.0, 800.0);
    let near = vp.world_to_pixel(Point::new(0.0, 0.0));
    let far = vp.world_to_pixel(Point::new(0.0, 100.0));
    assert!(far.y > near.y);
}

#[test]
fn test_zoom_clamped() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_zoom(1000.0);
    assert_eq!(vp.zoom(), 50.0);
    vp.set_zoom(0.0001);
    assert_eq!(vp.zoom(), 0.1);
    vp.set_zoom(f64::NAN);
    assert_eq!(vp.zoom(), 0.1);
}

#[test]
fn test_zoom_at_keeps_point_fixed() {
    let mut vp = Viewport::new(1200.0, 800.0);
    let pixel = Point::new(300.0, 200.0);
    let before = vp.pixel_to_world(pixel);
    vp.zoom_at(pixel, 2.5);
    let after = vp.pixel_to_world(pixel);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
    assert_eq!(vp.zoom(), 2.5);
}

#[test]
fn test_fit_to_bounds_centers_content() {
    let mut vp = Viewport::new(1000.0, 500.0);
    vp.fit_to_bounds(Bounds::new(Point::ZERO, Point::new(800.0, 600.0)), 0.0);

    assert!((vp.zoom() - 500.0 / 600.0).abs() < 1e-9);
    let center = vp.world_to_pixel(Point::new(400.0, 300.0));
    assert!((center.x - 500.0).abs() < 1e-9);
    assert!((center.y - 250.0).abs() < 1e-9);
}

#[test]
fn test_fit_to_bounds_ignores_empty() {
    let mut vp = Viewport::new(1000.0, 500.0);
    vp.fit_to_bounds(Bounds::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0)), 0.05);
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan(), Point::ZERO);
}

#[test]
fn test_pan_tool_moves_viewport_only() {
    let mut canvas = Canvas::new();
    canvas.add_element(rangekit_designer::ElementType::HardCover, Point::new(100.0, 100.0));
    let before = canvas.export_diagram();
    canvas.set_tool(Tool::Pan);

    canvas.pointer_down(Point::new(100.0, 100.0), Modifiers::NONE);
    canvas.pointer_move(Point::new(150.0, 130.0), Modifiers::NONE);
    canvas.pointer_up(Point::new(160.0, 140.0), Modifiers::NONE);

    assert_eq!(canvas.viewport().pan(), Point::new(60.0, 40.0));
    assert_eq!(canvas.export_diagram(), before);
}

#[test]
fn test_pointer_events_respect_zoom() {
    let mut canvas = Canvas::new();
    canvas.zoom_at(Point::ZERO, 2.0);
    canvas.set_tool(Tool::Place(rangekit_designer::ElementType::StartPosition));

    canvas.pointer_down(Point::new(200.0, 120.0), Modifiers::NONE);

    assert_eq!(canvas.elements()[0].position, Point::new(100.0, 60.0));
    assert_eq!(canvas.tool(), Tool::Select);
}

#[test]
fn test_fit_diagram_shows_whole_range() {
    let mut canvas = Canvas::new();
    canvas.fit_diagram();
    let visible = canvas.viewport().visible_bounds();
    assert!(visible.contains(Point::ZERO));
    assert!(visible.contains(Point::new(800.0, 600.0)));
}
