use rangekit_designer::canvas::{Canvas, Modifiers};
use rangekit_designer::history::History;
use rangekit_designer::model::ElementType;
use rangekit_designer::Point;

#[test]
fn test_history_limit_minimum_one() {
    let mut history: History<u32> = History::new(0);
    assert_eq!(history.limit(), 1);
    history.record(1);
    history.record(2);
    assert_eq!(history.undo_len(), 1);
}

#[test]
fn test_drag_gesture_is_single_undo_step() {
    let mut canvas = Canvas::new();
    let id = canvas
        .add_element(ElementType::HardCover, Point::new(100.0, 100.0))
        .id
        .clone();

    canvas.pointer_down(Point::new(100.0, 100.0), Modifiers::NONE);
    for step in 1..=5 {
        let x = 100.0 + step as f64 * 20.0;
        canvas.pointer_move(Point::new(x, 100.0), Modifiers::NONE);
    }
    canvas.pointer_up(Point::new(200.0, 100.0), Modifiers::NONE);
    assert_eq!(canvas.element(&id).unwrap().position, Point::new(200.0, 100.0));

    assert!(canvas.undo());
    assert_eq!(canvas.element(&id).unwrap().position, Point::new(100.0, 100.0));
    assert!(canvas.undo());
    assert_eq!(canvas.element_count(), 0);
    assert!(!canvas.can_undo());
}

#[test]
fn test_click_without_move_records_nothing() {
    let mut canvas = Canvas::new();
    canvas.add_element(ElementType::HardCover, Point::new(100.0, 100.0));

    canvas.pointer_down(Point::new(100.0, 100.0), Modifiers::NONE);
    canvas.pointer_up(Point::new(100.0, 100.0), Modifiers::NONE);

    assert!(canvas.undo());
    assert!(!canvas.can_undo());
}

#[test]
fn test_new_edit_clears_redo() {
    let mut canvas = Canvas::new();
    canvas.add_element(ElementType::Text, Point::ZERO);
    canvas.undo();
    assert!(canvas.can_redo());

    canvas.add_element(ElementType::Text, Point::ZERO);
    assert!(!canvas.can_redo());
}

#[test]
fn test_undo_after_delete_restores_element() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Wall, Point::ZERO).id.clone();
    canvas.delete_selected();
    assert!(canvas.selected_ids().is_empty());

    canvas.undo();
    assert!(canvas.element(&id).is_some());
    assert!(canvas.selected_ids().is_empty());
}
