use rangekit_designer::canvas::{Canvas, InputState, Modifiers};
use rangekit_designer::element_store::ElementStore;
use rangekit_designer::model::{
    ElementId, ElementKind, ElementType, FaultLine, StageElement, StartPosition,
};
use rangekit_designer::serialization::StageDiagram;
use rangekit_designer::selection_manager::SelectionManager;
use rangekit_designer::Point;

fn store_with(ids: &[&str]) -> ElementStore {
    let mut store = ElementStore::new();
    for id in ids {
        store.insert_fresh(StageElement::with_id(
            (*id).into(),
            ElementKind::StartPosition(StartPosition::default()),
            Point::ZERO,
        ));
    }
    store
}

#[test]
fn test_select_id_replaces_and_toggles() {
    let mut store = store_with(&["a", "b"]);
    let mut selection = SelectionManager::new();

    assert!(selection.select_id(&mut store, &"a".into(), false));
    assert!(selection.select_id(&mut store, &"b".into(), true));
    assert_eq!(selection.len(), 2);
    assert_eq!(selection.primary().map(|id| id.as_str()), Some("b"));

    assert!(selection.select_id(&mut store, &"a".into(), true));
    assert_eq!(selection.selected_ids(), &[ElementId::from("b")]);
    assert!(!store.get(&"a".into()).unwrap().selected);
    assert!(store.get(&"b".into()).unwrap().selected);
}

#[test]
fn test_select_unknown_id_is_ignored() {
    let mut store = store_with(&["a"]);
    let mut selection = SelectionManager::new();
    selection.select_id(&mut store, &"a".into(), false);

    assert!(!selection.select_id(&mut store, &"zzz".into(), false));
    assert_eq!(selection.selected_ids(), &[ElementId::from("a")]);
}

#[test]
fn test_retain_live_prunes() {
    let mut store = store_with(&["a", "b"]);
    let mut selection = SelectionManager::new();
    selection.select_all(&mut store);
    store.remove_all(&[ElementId::from("a")]);

    assert!(selection.retain_live(&mut store));
    assert_eq!(selection.selected_ids(), &[ElementId::from("b")]);
    assert!(!selection.retain_live(&mut store));
}

#[test]
fn test_click_selects_topmost() {
    let mut canvas = Canvas::new();
    let bottom = canvas
        .add_element(ElementType::HardCover, Point::new(100.0, 100.0))
        .id
        .clone();
    let top = canvas
        .add_element(ElementType::SoftCover, Point::new(100.0, 100.0))
        .id
        .clone();
    canvas.clear_selection();

    canvas.pointer_down(Point::new(100.0, 100.0), Modifiers::NONE);
    canvas.pointer_up(Point::new(100.0, 100.0), Modifiers::NONE);

    assert_eq!(canvas.selected_ids(), &[top]);
    assert!(!canvas.element(&bottom).unwrap().selected);
}

#[test]
fn test_shift_click_toggles() {
    let mut canvas = Canvas::new();
    let a = canvas
        .add_element(ElementType::HardCover, Point::new(100.0, 100.0))
        .id
        .clone();
    let b = canvas
        .add_element(ElementType::HardCover, Point::new(300.0, 100.0))
        .id
        .clone();

    canvas.pointer_down(Point::new(100.0, 100.0), Modifiers::SHIFT);
    canvas.pointer_up(Point::new(100.0, 100.0), Modifiers::SHIFT);
    assert_eq!(canvas.selected_ids(), &[b.clone(), a.clone()]);

    canvas.pointer_down(Point::new(300.0, 100.0), Modifiers::SHIFT);
    canvas.pointer_up(Point::new(300.0, 100.0), Modifiers::SHIFT);
    assert_eq!(canvas.selected_ids(), &[a]);
}

#[test]
fn test_click_on_empty_canvas_clears_selection() {
    let mut canvas = Canvas::new();
    canvas.add_element(ElementType::HardCover, Point::new(100.0, 100.0));

    canvas.pointer_down(Point::new(500.0, 500.0), Modifiers::NONE);
    canvas.pointer_up(Point::new(500.0, 500.0), Modifiers::NONE);

    assert!(canvas.selected_ids().is_empty());
}

#[test]
fn test_rubber_band_selects_intersecting() {
    let mut canvas = Canvas::new();
    let inside = canvas
        .add_element(ElementType::HardCover, Point::new(100.0, 100.0))
        .id
        .clone();
    let partial = canvas
        .add_element(ElementType::HardCover, Point::new(220.0, 100.0))
        .id
        .clone();
    let outside = canvas
        .add_element(ElementType::HardCover, Point::new(500.0, 400.0))
        .id
        .clone();

    canvas.pointer_down(Point::new(40.0, 40.0), Modifiers::NONE);
    canvas.pointer_move(Point::new(120.0, 120.0), Modifiers::NONE);
    canvas.pointer_move(Point::new(200.0, 160.0), Modifiers::NONE);
    canvas.pointer_up(Point::new(200.0, 160.0), Modifiers::NONE);

    assert_eq!(canvas.selected_ids(), &[inside, partial]);
    assert!(!canvas.element(&outside).unwrap().selected);
}

#[test]
fn test_selection_subset_after_undo() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Text, Point::ZERO).id.clone();
    assert_eq!(canvas.selected_ids(), &[id]);

    canvas.undo();
    assert!(canvas.selected_ids().is_empty());
}

#[test]
fn test_pointer_leave_cancels_rubber_band() {
    let mut canvas = Canvas::new();
    let a = canvas
        .add_element(ElementType::HardCover, Point::new(400.0, 400.0))
        .id
        .clone();
    canvas.add_element(ElementType::HardCover, Point::new(100.0, 100.0));
    canvas.select_element(&a, false);

    canvas.pointer_down(Point::new(40.0, 40.0), Modifiers::NONE);
    canvas.pointer_move(Point::new(200.0, 160.0), Modifiers::NONE);
    canvas.pointer_leave();
    assert!(matches!(canvas.input_state(), InputState::Idle));

    canvas.pointer_up(Point::new(200.0, 160.0), Modifiers::NONE);
    assert_eq!(canvas.selected_ids(), &[a]);
}

#[test]
fn test_rubber_band_ignores_empty_corner_of_diagonal_line() {
    let line = StageElement::with_id(
        "diagonal".into(),
        ElementKind::FaultLine(FaultLine::new(vec![
            Point::new(0.0, 0.0),
            Point::new(400.0, 400.0),
        ])),
        Point::ZERO,
    );
    let mut canvas = Canvas::new();
    canvas
        .import_diagram(StageDiagram {
            elements: vec![line],
            ..StageDiagram::default()
        })
        .unwrap();

    canvas.pointer_down(Point::new(300.0, 20.0), Modifiers::NONE);
    canvas.pointer_up(Point::new(380.0, 80.0), Modifiers::NONE);
    assert!(canvas.selected_ids().is_empty());

    canvas.pointer_down(Point::new(180.0, 220.0), Modifiers::NONE);
    canvas.pointer_up(Point::new(260.0, 240.0), Modifiers::NONE);
    assert_eq!(canvas.selected_ids(), &[ElementId::from("diagonal")]);
}
