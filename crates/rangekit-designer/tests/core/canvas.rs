use rangekit_designer::canvas::{Canvas, EditorEvent, ElementPatch, Tool};
use rangekit_designer::model::{
    Cover, ElementKind, ElementType, IdpaTarget, SteelShape, SteelTarget,
};
use rangekit_designer::serialization::{Dimensions, StageDiagram};
use rangekit_designer::Point;
use rangekit_settings::EditorSettings;

fn wall_points(canvas: &Canvas, index: usize) -> (Point, Point) {
    match &canvas.elements()[index].kind {
        ElementKind::Wall(w) => (w.start_point, w.end_point),
        other => panic!("expected wall, got {:?}", other),
    }
}

#[test]
fn test_place_steel_plate() {
    let mut canvas = Canvas::new();
    let id = canvas
        .add_element(ElementType::SteelTarget, Point::new(100.0, 100.0))
        .id
        .clone();

    let plate = ElementKind::SteelTarget(SteelTarget {
        shape: SteelShape::Plate,
        ..SteelTarget::default()
    });
    assert!(canvas.update_element(&id, ElementPatch::new().kind(plate)));

    let element = canvas.element(&id).unwrap();
    assert_eq!(element.position, Point::new(100.0, 100.0));
    assert!(element.selected);
    match &element.kind {
        ElementKind::SteelTarget(t) => {
            assert_eq!(t.shape, SteelShape::Plate);
            assert!(!t.must_fall);
        }
        other => panic!("unexpected kind {:?}", other),
    }
    assert_eq!(canvas.selected_ids(), &[id]);
    assert_eq!(canvas.export_diagram().elements.len(), 1);
}

#[test]
fn test_add_element_snaps_to_grid() {
    let mut canvas = Canvas::new();
    let snapped = canvas
        .add_element(ElementType::HardCover, Point::new(107.0, 93.0))
        .position;
    assert_eq!(snapped, Point::new(100.0, 100.0));

    canvas.set_snap_to_grid(false);
    let free = canvas
        .add_element(ElementType::HardCover, Point::new(107.0, 93.0))
        .position;
    assert_eq!(free, Point::new(107.0, 93.0));
}

#[test]
fn test_add_element_selects_exclusively_on_top() {
    let mut canvas = Canvas::new();
    let first = canvas.add_element(ElementType::Text, Point::ZERO).id.clone();
    let second = canvas
        .add_element(ElementType::Text, Point::new(40.0, 0.0))
        .id
        .clone();

    assert_eq!(canvas.selected_ids(), &[second.clone()]);
    assert!(!canvas.element(&first).unwrap().selected);
    assert_eq!(canvas.elements().last().unwrap().id, second);
}

#[test]
fn test_idpa_target_numbers_increment() {
    let mut canvas = Canvas::new();
    canvas.add_element(ElementType::IdpaTarget, Point::new(0.0, 0.0));
    let second = canvas
        .add_element(ElementType::IdpaTarget, Point::new(100.0, 0.0))
        .clone();
    match second.kind {
        ElementKind::IdpaTarget(IdpaTarget { target_number, .. }) => assert_eq!(target_number, 2),
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn test_wall_drag_keeps_anchor() {
    let mut canvas = Canvas::new();
    canvas.add_element(ElementType::Wall, Point::new(0.0, 0.0));
    assert_eq!(wall_points(&canvas, 0), (Point::new(0.0, 0.0), Point::new(100.0, 0.0)));

    assert!(canvas.move_selected(Point::new(5.0, 5.0)));

    assert_eq!(wall_points(&canvas, 0), (Point::new(5.0, 5.0), Point::new(105.0, 5.0)));
    assert_eq!(canvas.elements()[0].position, Point::new(0.0, 0.0));
}

#[test]
fn test_update_unknown_id_is_noop() {
    let mut canvas = Canvas::new();
    canvas.add_element(ElementType::Text, Point::ZERO);
    canvas.take_events();

    let ghost = "missing".into();
    assert!(!canvas.update_element(&ghost, ElementPatch::new().rotation(45.0)));
    assert!(!canvas.delete_element(&ghost));
    assert!(canvas.take_events().is_empty());
}

#[test]
fn test_update_rejects_invalid_properties() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::SoftCover, Point::ZERO).id.clone();
    let bad = ElementKind::SoftCover(Cover {
        width: -5.0,
        height: 40.0,
    });

    assert!(!canvas.update_element(&id, ElementPatch::new().kind(bad)));
    assert_eq!(
        canvas.element(&id).unwrap().kind,
        ElementKind::SoftCover(Cover::default())
    );
}

#[test]
fn test_update_position_moves_line_points() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Wall, Point::ZERO).id.clone();
    assert!(canvas.update_element(&id, ElementPatch::new().position(Point::new(20.0, 40.0))));
    assert_eq!(wall_points(&canvas, 0), (Point::new(20.0, 40.0), Point::new(120.0, 40.0)));
    assert_eq!(canvas.elements()[0].position, Point::ZERO);
}

#[test]
fn test_delete_prunes_selection() {
    let mut canvas = Canvas::new();
    let a = canvas.add_element(ElementType::Text, Point::ZERO).id.clone();
    let b = canvas
        .add_element(ElementType::Text, Point::new(100.0, 0.0))
        .id
        .clone();
    canvas.select_element(&a, true);
    assert_eq!(canvas.selected_ids().len(), 2);

    assert!(canvas.delete_element(&a));
    assert_eq!(canvas.selected_ids(), &[b.clone()]);

    assert_eq!(canvas.delete_selected(), 1);
    assert!(canvas.selected_ids().is_empty());
    assert_eq!(canvas.element_count(), 0);
}

#[test]
fn test_move_selected_skips_locked() {
    let mut canvas = Canvas::new();
    let locked = canvas.add_element(ElementType::Text, Point::ZERO).id.clone();
    canvas.update_element(&locked, ElementPatch::new().locked(true));
    let free = canvas
        .add_element(ElementType::Text, Point::new(100.0, 0.0))
        .id
        .clone();
    canvas.select_all();

    assert!(canvas.move_selected(Point::new(20.0, 0.0)));
    assert_eq!(canvas.element(&locked).unwrap().position, Point::ZERO);
    assert_eq!(canvas.element(&free).unwrap().position, Point::new(120.0, 0.0));
}

#[test]
fn test_set_tool_discards_pending_shape() {
    let mut canvas = Canvas::new();
    canvas.set_tool(Tool::Place(ElementType::FaultLine));
    canvas.pointer_down(Point::new(0.0, 0.0), Default::default());
    canvas.pointer_up(Point::new(0.0, 0.0), Default::default());
    assert!(canvas.pending_shape().is_some());

    canvas.set_tool(Tool::Select);
    assert!(canvas.pending_shape().is_none());
    assert_eq!(canvas.element_count(), 0);
}

#[test]
fn test_undo_redo_add() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Wall, Point::ZERO).id.clone();
    assert!(canvas.can_undo());

    assert!(canvas.undo());
    assert_eq!(canvas.element_count(), 0);
    assert!(canvas.selected_ids().is_empty());

    assert!(canvas.redo());
    assert!(canvas.element(&id).is_some());
    assert!(!canvas.redo());
}

#[test]
fn test_undo_restores_moved_position() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Text, Point::ZERO).id.clone();
    canvas.move_selected(Point::new(40.0, 20.0));
    canvas.undo();
    assert_eq!(canvas.element(&id).unwrap().position, Point::ZERO);
    assert!(canvas.element(&id).unwrap().selected);
}

#[test]
fn test_failed_import_leaves_state() {
    let mut canvas = Canvas::new();
    canvas.add_element(ElementType::Text, Point::ZERO);

    let mut bad = StageDiagram::new(800.0, 600.0);
    bad.dimensions = Dimensions {
        width: 0.0,
        height: 600.0,
    };
    assert!(canvas.import_diagram(bad).is_err());
    assert_eq!(canvas.element_count(), 1);
    assert!(canvas.can_undo());
}

#[test]
fn test_import_clears_selection_and_history() {
    let mut canvas = Canvas::new();
    canvas.add_element(ElementType::Text, Point::ZERO);
    let exported = canvas.export_diagram();

    canvas.import_diagram(exported).unwrap();
    assert!(canvas.selected_ids().is_empty());
    assert!(!canvas.can_undo());
    assert!(canvas.elements().iter().all(|e| !e.selected));
}

#[test]
fn test_load_none_starts_empty() {
    let mut canvas = Canvas::new();
    canvas.add_element(ElementType::Text, Point::ZERO);
    canvas.load(None).unwrap();
    assert_eq!(canvas.element_count(), 0);
    assert_eq!(canvas.dimensions(), Dimensions::default());
}

#[test]
fn test_load_none_after_import_uses_default_dimensions() {
    let mut canvas = Canvas::new();
    canvas
        .import_diagram(StageDiagram {
            dimensions: Dimensions {
                width: 2000.0,
                height: 1500.0,
            },
            ..StageDiagram::default()
        })
        .unwrap();
    assert_eq!(canvas.dimensions().width, 2000.0);

    canvas.load(None).unwrap();
    assert_eq!(canvas.dimensions(), Dimensions::default());

    let settings = EditorSettings {
        default_width: 1200.0,
        default_height: 900.0,
        ..EditorSettings::default()
    };
    let mut canvas = Canvas::with_settings(&settings);
    canvas
        .import_diagram(StageDiagram {
            dimensions: Dimensions {
                width: 300.0,
                height: 300.0,
            },
            ..StageDiagram::default()
        })
        .unwrap();
    canvas.load(None).unwrap();
    assert_eq!(
        canvas.dimensions(),
        Dimensions {
            width: 1200.0,
            height: 900.0
        }
    );
}

#[test]
fn test_rotate_selected() {
    let mut canvas = Canvas::new();
    let target = canvas.add_element(ElementType::HardCover, Point::ZERO).id.clone();
    assert!(canvas.rotate_selected(270.0));
    assert!(canvas.rotate_selected(180.0));
    assert_eq!(canvas.element(&target).unwrap().rotation, 90.0);

    let wall = canvas.add_element(ElementType::Wall, Point::ZERO).id.clone();
    assert!(canvas.rotate_selected(90.0));
    let element = canvas.element(&wall).unwrap();
    assert_eq!(element.rotation, 0.0);
    let points = element.control_points();
    assert!((points[0].x - 50.0).abs() < 1e-9);
    assert!((points[1].x - 50.0).abs() < 1e-9);
    assert!((points[0].distance_to(&points[1]) - 100.0).abs() < 1e-9);
}

#[test]
fn test_control_point_edits() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::FaultLine, Point::ZERO).id.clone();

    assert!(canvas.insert_control_point(&id, 0, Point::new(52.0, 38.0)));
    assert_eq!(canvas.element(&id).unwrap().control_points()[1], Point::new(60.0, 40.0));

    assert!(canvas.remove_control_point(&id, 1));
    assert_eq!(canvas.element(&id).unwrap().control_points().len(), 2);
    assert!(!canvas.remove_control_point(&id, 0));

    assert!(canvas.move_control_point(&id, 1, Point::new(200.0, 0.0)));
    assert_eq!(
        canvas.element(&id).unwrap().control_points(),
        vec![Point::ZERO, Point::new(200.0, 0.0)]
    );
}

#[test]
fn test_locked_element_refuses_control_point_edit() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Wall, Point::ZERO).id.clone();
    canvas.update_element(&id, ElementPatch::new().locked(true));
    assert!(!canvas.move_control_point(&id, 0, Point::new(40.0, 40.0)));
    assert!(!canvas.rotate_selected(90.0));
}

#[test]
fn test_z_order() {
    let mut canvas = Canvas::new();
    let a = canvas.add_element(ElementType::Text, Point::ZERO).id.clone();
    let b = canvas.add_element(ElementType::Text, Point::ZERO).id.clone();

    assert!(canvas.bring_to_front(&a));
    assert_eq!(canvas.elements()[1].id, a);
    assert!(!canvas.bring_to_front(&a));

    assert!(canvas.send_to_back(&a));
    assert_eq!(canvas.elements()[0].id, a);
    assert_eq!(canvas.elements()[1].id, b);
}

#[test]
fn test_duplicate_selected() {
    let mut canvas = Canvas::new();
    let original = canvas.add_element(ElementType::Wall, Point::ZERO).id.clone();
    let copies = canvas.duplicate_selected(Point::new(20.0, 20.0));

    assert_eq!(copies.len(), 1);
    assert_ne!(copies[0], original);
    assert_eq!(canvas.selected_ids(), copies.as_slice());
    assert_eq!(
        canvas.element(&copies[0]).unwrap().control_points(),
        vec![Point::new(20.0, 20.0), Point::new(120.0, 20.0)]
    );
    assert!(!canvas.element(&original).unwrap().selected);
}

#[test]
fn test_events_queue() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Text, Point::ZERO).id.clone();
    canvas.set_tool(Tool::Pan);

    let events = canvas.take_events();
    assert_eq!(
        events,
        vec![
            EditorEvent::ElementAdded(id.clone()),
            EditorEvent::SelectionChanged(vec![id]),
            EditorEvent::ToolChanged(Tool::Pan),
        ]
    );
    assert!(canvas.take_events().is_empty());
}

#[test]
fn test_designer_state_snapshot() {
    let mut canvas = Canvas::new();
    let id = canvas.add_element(ElementType::Text, Point::ZERO).id.clone();
    canvas.set_show_ruler(true);
    canvas.zoom_in();

    let state = canvas.designer_state();
    assert_eq!(state.selected_tool, Tool::Select);
    assert_eq!(state.selected_elements, vec![id]);
    assert!((state.zoom - 1.2).abs() < 1e-9);
    assert!(state.show_grid);
    assert!(state.snap_to_grid);
    assert!(state.show_ruler);
}

#[test]
fn test_snap_to_grid_if_enabled() {
    let mut canvas = Canvas::new();
    assert_eq!(
        canvas.snap_to_grid_if_enabled(Point::new(29.0, -31.0)),
        Point::new(20.0, -40.0)
    );
    canvas.set_grid_size(25.0);
    assert_eq!(
        canvas.snap_to_grid_if_enabled(Point::new(37.6, 12.4)),
        Point::new(50.0, 0.0)
    );
    canvas.set_grid_size(-1.0);
    assert_eq!(canvas.grid_size(), 25.0);
}
