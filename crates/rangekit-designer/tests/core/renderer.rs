use rangekit_designer::model::{
    Cover, ElementKind, FaultLine, LineStyle, SteelShape, SteelTarget, StageElement, Wall,
};
use rangekit_designer::renderer::{
    on_drag, on_handle_drag, render, render_with, HitRegion, InteractionState, Primitive,
    FAULT_LINE_DASH, HIGHLIGHT,
};
use rangekit_designer::{Bounds, Point};

const IDLE: InteractionState = InteractionState {
    selected: false,
    hovered: false,
    dragging: false,
};
const SELECTED: InteractionState = InteractionState {
    selected: true,
    hovered: false,
    dragging: false,
};

fn wall(start: Point, end: Point) -> StageElement {
    StageElement::new(ElementKind::Wall(Wall::new(start, end)), start)
}

#[test]
fn test_zero_length_wall_is_finite() {
    let element = wall(Point::new(50.0, 50.0), Point::new(50.0, 50.0));
    for state in [IDLE, SELECTED] {
        let output = render(&element, state);
        assert!(output.is_finite());
        assert!(output.hit_region.contains(Point::new(52.0, 50.0), 0.0));
        assert!(!output.hit_region.contains(Point::new(70.0, 50.0), 0.0));
    }
}

#[test]
fn test_wall_hit_region_excludes_grain() {
    let element = wall(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
    let output = render(&element, IDLE);
    assert!(output.hit_region.contains(Point::new(50.0, 4.0), 0.0));
    assert!(!output.hit_region.contains(Point::new(50.0, 8.0), 0.0));
    assert_eq!(output.primitives.len(), 2);
    assert!(output.handles.is_empty());
}

#[test]
fn test_selected_wall_exposes_endpoint_handles() {
    let element = wall(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
    let output = render_with(&element, SELECTED, 8.0);
    assert_eq!(output.handles.len(), 2);
    assert_eq!(output.handles[1].center, Point::new(100.0, 0.0));
    assert_eq!(output.handles[1].radius, 8.0);
}

#[test]
fn test_wall_drag_preserves_length() {
    let element = wall(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
    let dragged = on_drag(&element, Point::new(5.0, 5.0));
    match &dragged.kind {
        ElementKind::Wall(w) => {
            assert_eq!(w.start_point, Point::new(5.0, 5.0));
            assert_eq!(w.end_point, Point::new(105.0, 5.0));
            assert_eq!(w.length(), 100.0);
        }
        other => panic!("unexpected kind {:?}", other),
    }
    assert_eq!(dragged.position, element.position);
}

#[test]
fn test_handle_drag_moves_single_point() {
    let points = vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(100.0, 0.0)];
    let element = StageElement::new(ElementKind::FaultLine(FaultLine::new(points)), Point::ZERO);
    let dragged = on_handle_drag(&element, 1, Point::new(50.0, 30.0));
    assert_eq!(
        dragged.control_points(),
        vec![Point::new(0.0, 0.0), Point::new(50.0, 30.0), Point::new(100.0, 0.0)]
    );

    let mut locked = element.clone();
    locked.locked = true;
    assert_eq!(on_handle_drag(&locked, 1, Point::new(50.0, 30.0)), locked);
}

#[test]
fn test_dashed_fault_line() {
    let mut line = FaultLine::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    line.style = LineStyle::Dashed;
    let element = StageElement::new(ElementKind::FaultLine(line), Point::ZERO);
    let output = render(&element, IDLE);
    assert_eq!(output.primitives[0].style().dash, FAULT_LINE_DASH.to_vec());
    assert!(output.hit_region.contains(Point::new(50.0, 2.0), 1.0));
}

#[test]
fn test_selected_cover_highlights() {
    let element = StageElement::new(ElementKind::HardCover(Cover::default()), Point::new(100.0, 100.0));
    let idle = render(&element, IDLE);
    let selected = render(&element, SELECTED);
    assert_ne!(idle.primitives[0].style().stroke, Some(HIGHLIGHT));
    assert_eq!(selected.primitives[0].style().stroke, Some(HIGHLIGHT));
    assert!(selected.primitives[0].style().glow.is_some());
}

#[test]
fn test_rotated_cover_hit_region() {
    let mut element = StageElement::new(ElementKind::SoftCover(Cover::default()), Point::ZERO);
    assert!(render(&element, IDLE).hit_region.contains(Point::new(35.0, 0.0), 0.0));
    element.rotation = 90.0;
    let region = render(&element, IDLE).hit_region;
    assert!(!region.contains(Point::new(35.0, 0.0), 0.0));
    assert!(region.contains(Point::new(0.0, 35.0), 0.0));
}

#[test]
fn test_must_fall_badge() {
    let plate = SteelTarget {
        shape: SteelShape::Plate,
        must_fall: true,
    };
    let element = StageElement::new(ElementKind::SteelTarget(plate), Point::ZERO);
    let output = render(&element, IDLE);
    assert!(matches!(output.hit_region, HitRegion::Circle { radius, .. } if radius == 20.0));
    assert!(output
        .primitives
        .iter()
        .any(|p| matches!(p, Primitive::Text { text, .. } if text == "MF")));
}

#[test]
fn test_hit_region_rect_overlap() {
    let plate = SteelTarget {
        shape: SteelShape::Plate,
        must_fall: false,
    };
    let element = StageElement::new(ElementKind::SteelTarget(plate), Point::ZERO);
    let region = render(&element, IDLE).hit_region;
    // Bounding-box corner of the circle, outside the disc itself.
    assert!(!region.intersects_rect(&Bounds::new(Point::new(16.0, 16.0), Point::new(30.0, 30.0))));
    assert!(region.intersects_rect(&Bounds::new(Point::new(10.0, 10.0), Point::new(30.0, 30.0))));

    let mut cover = StageElement::new(ElementKind::HardCover(Cover::default()), Point::ZERO);
    cover.rotation = 45.0;
    let region = render(&cover, IDLE).hit_region;
    assert!(region.intersects_rect(&Bounds::new(Point::new(-2.0, -2.0), Point::new(2.0, 2.0))));
    assert!(region.intersects_rect(&Bounds::new(Point::new(-500.0, -500.0), Point::new(500.0, 500.0))));
    assert!(!region.intersects_rect(&Bounds::new(Point::new(300.0, 300.0), Point::new(310.0, 310.0))));
}
