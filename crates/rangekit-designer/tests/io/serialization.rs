use rangekit_core::DiagramError;
use rangekit_designer::canvas::Canvas;
use rangekit_designer::model::{ElementKind, ElementType, SteelShape};
use rangekit_designer::serialization::StageDiagram;
use rangekit_designer::Point;
use serde_json::{json, Value};

fn sample_document() -> Value {
    json!({
        "elements": [
            {
                "id": "t1",
                "type": "idpa-target",
                "position": { "x": 100, "y": 100 },
                "rotation": 15,
                "properties": {
                    "targetNumber": 1,
                    "isThreat": true,
                    "hardCoverZones": ["head"],
                    "requiredHits": 2
                }
            },
            {
                "id": "s1",
                "type": "steel-target",
                "position": { "x": 200, "y": 100 },
                "rotation": 0,
                "properties": { "shape": "mini-popper", "mustFall": true }
            },
            {
                "id": "w1",
                "type": "wall",
                "position": { "x": 0, "y": 0 },
                "rotation": 0,
                "locked": true,
                "properties": {
                    "startPoint": { "x": 0, "y": 0 },
                    "endPoint": { "x": 100, "y": 0 },
                    "thickness": 10
                }
            },
            {
                "id": "f1",
                "type": "fault-line",
                "position": { "x": 0, "y": 200 },
                "rotation": 0,
                "properties": {
                    "points": [{ "x": 0, "y": 200 }, { "x": 100, "y": 200 }, { "x": 100, "y": 300 }],
                    "style": "dashed"
                }
            }
        ],
        "dimensions": { "width": 800, "height": 600 },
        "gridConfig": { "size": 20, "visible": false }
    })
}

fn import(value: &Value) -> Result<Canvas, DiagramError> {
    let mut canvas = Canvas::new();
    canvas.import_json(value)?;
    Ok(canvas)
}

#[test]
fn test_import_document() {
    let canvas = import(&sample_document()).unwrap();
    assert_eq!(canvas.element_count(), 4);
    assert_eq!(canvas.elements()[0].rotation, 15.0);
    assert!(canvas.elements()[2].locked);
    assert!(!canvas.designer_state().show_grid);

    match &canvas.elements()[1].kind {
        ElementKind::SteelTarget(t) => {
            assert_eq!(t.shape, SteelShape::MiniPopper);
            assert!(t.must_fall);
        }
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn test_round_trip_is_idempotent() {
    let canvas = import(&sample_document()).unwrap();
    let first = canvas.export_diagram();

    let mut reloaded = Canvas::new();
    reloaded.import_diagram(first.clone()).unwrap();
    let second = reloaded.export_diagram();

    assert_eq!(first, second);
    assert_eq!(first.to_json_value(), second.to_json_value());
}

#[test]
fn test_export_omits_selected_and_default_lock() {
    let mut canvas = Canvas::new();
    canvas.add_element(ElementType::Text, Point::ZERO);
    let value = canvas.export_diagram().to_json_value();
    let element = &value["elements"][0];

    assert!(element.get("selected").is_none());
    assert!(element.get("locked").is_none());
    assert_eq!(element["type"], "text");
    assert_eq!(element["properties"]["fontSize"], 16.0);
    assert_eq!(value["gridConfig"], json!({ "size": 20.0, "visible": true }));
}

#[test]
fn test_unknown_type_passes_through() {
    let mut doc = sample_document();
    let custom = json!({
        "id": "x1",
        "type": "barrel-stack",
        "position": { "x": 300.0, "y": 300.0 },
        "rotation": 0.0,
        "properties": { "width": 30, "height": 30, "stacked": 3 },
        "vendorNote": "keep me"
    });
    doc["elements"].as_array_mut().unwrap().push(custom.clone());

    let mut canvas = import(&doc).unwrap();
    assert_eq!(canvas.elements()[4].type_name(), "barrel-stack");
    assert!(canvas.elements()[4].element_type().is_none());

    let exported = canvas.export_diagram().to_json_value();
    assert_eq!(exported["elements"][4], custom);

    let id = canvas.elements()[4].id.clone();
    canvas.select_element(&id, false);
    canvas.move_selected(Point::new(20.0, 0.0));
    let moved = canvas.export_diagram().to_json_value();
    assert_eq!(moved["elements"][4]["position"], json!({ "x": 320.0, "y": 300.0 }));
    assert_eq!(moved["elements"][4]["vendorNote"], "keep me");
    assert_eq!(moved["elements"][4]["properties"]["stacked"], 3);
}

#[test]
fn test_reject_non_object_root() {
    let err = StageDiagram::from_json_value(&json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, DiagramError::NotAnObject { ref field } if field == "document"));
}

#[test]
fn test_reject_missing_elements() {
    let err = StageDiagram::from_json_value(&json!({ "dimensions": { "width": 1, "height": 1 } }))
        .unwrap_err();
    assert!(matches!(err, DiagramError::MissingField { ref field } if field == "elements"));
}

#[test]
fn test_reject_non_positive_dimensions() {
    let mut doc = sample_document();
    doc["dimensions"]["height"] = json!(0);
    let err = StageDiagram::from_json_value(&doc).unwrap_err();
    assert!(matches!(err, DiagramError::InvalidDimensions { height, .. } if height == 0.0));

    doc["dimensions"] = json!("big");
    let err = StageDiagram::from_json_value(&doc).unwrap_err();
    assert!(matches!(err, DiagramError::NotAnObject { ref field } if field == "dimensions"));
}

#[test]
fn test_reject_bad_grid_size() {
    let mut doc = sample_document();
    doc["gridConfig"]["size"] = json!(-5);
    let err = StageDiagram::from_json_value(&doc).unwrap_err();
    assert!(matches!(err, DiagramError::InvalidField { ref field, .. } if field == "gridConfig.size"));
}

#[test]
fn test_reject_short_fault_line() {
    let mut doc = sample_document();
    doc["elements"][3]["properties"]["points"] = json!([{ "x": 0, "y": 0 }]);
    let err = StageDiagram::from_json_value(&doc).unwrap_err();
    assert!(matches!(err, DiagramError::InvalidElement { index: 3, .. }));
}

#[test]
fn test_reject_duplicate_ids() {
    let mut doc = sample_document();
    doc["elements"][1]["id"] = json!("t1");
    let err = StageDiagram::from_json_value(&doc).unwrap_err();
    assert!(matches!(err, DiagramError::DuplicateId { ref id } if id == "t1"));
}

#[test]
fn test_reject_known_type_with_bad_properties() {
    let mut doc = sample_document();
    doc["elements"][1]["properties"]["shape"] = json!("anvil");
    let err = StageDiagram::from_json_value(&doc).unwrap_err();
    assert!(matches!(err, DiagramError::InvalidElement { index: 1, .. }));

    let mut doc = sample_document();
    doc["elements"][0]
        .as_object_mut()
        .unwrap()
        .remove("properties");
    let err = StageDiagram::from_json_value(&doc).unwrap_err();
    assert!(matches!(err, DiagramError::InvalidElement { index: 0, .. }));
}

#[test]
fn test_reject_element_without_id() {
    let mut doc = sample_document();
    doc["elements"][2]["id"] = json!("");
    let err = StageDiagram::from_json_value(&doc).unwrap_err();
    assert!(matches!(err, DiagramError::InvalidElement { index: 2, .. }));
}

#[test]
fn test_rejected_import_keeps_canvas() {
    let mut canvas = import(&sample_document()).unwrap();
    let mut bad = sample_document();
    bad["elements"][2]["properties"]["thickness"] = json!(0);

    assert!(canvas.import_json(&bad).is_err());
    assert_eq!(canvas.element_count(), 4);
}

#[test]
fn test_serde_round_trip() {
    let diagram = StageDiagram::from_json_value(&sample_document()).unwrap();
    let text = serde_json::to_string(&diagram).unwrap();
    let parsed: StageDiagram = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, diagram);
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stage.json");

    let diagram = StageDiagram::from_json_value(&sample_document()).unwrap();
    diagram.save_to_file(&path).unwrap();
    let loaded = StageDiagram::load_from_file(&path).unwrap();
    assert_eq!(loaded, diagram);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(StageDiagram::load_from_file(dir.path().join("absent.json")).is_err());
}

#[test]
fn test_file_round_trip_keeps_unsnapped_coordinates() {
    let mut canvas = Canvas::new();
    canvas.set_snap_to_grid(false);
    for i in 0..200 {
        let x = 0.1 + i as f64 * 1.3377;
        let y = (i as f64 / 3.0).sqrt() * 17.29;
        canvas.add_element(ElementType::SteelTarget, Point::new(x, y));
    }
    canvas.add_element(ElementType::Wall, Point::new(1.0 / 3.0, 2.0 / 7.0));
    let diagram = canvas.export_diagram();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unsnapped.json");
    diagram.save_to_file(&path).unwrap();
    let loaded = StageDiagram::load_from_file(&path).unwrap();

    assert_eq!(loaded, diagram);
}

#[test]
fn test_load_errors_keep_their_cause() {
    let dir = tempfile::tempdir().unwrap();

    let err = StageDiagram::load_from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, rangekit_core::Error::Io(_)));

    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{ "elements": [], "dimensions": { "width": -1, "height": 10 } }"#)
        .unwrap();
    let err = StageDiagram::load_from_file(&path).unwrap_err();
    assert!(err.is_diagram_error());
    assert!(matches!(
        err,
        rangekit_core::Error::Diagram(DiagramError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_every_known_type_exports_its_properties() {
    let mut canvas = Canvas::new();
    for element_type in ElementType::ALL {
        canvas.add_element(element_type, Point::new(100.0, 100.0));
    }

    let value = canvas.export_diagram().to_json_value();
    let elements = value["elements"].as_array().unwrap();
    assert_eq!(elements.len(), ElementType::ALL.len());
    for element in elements {
        let properties = element["properties"].as_object().unwrap();
        assert!(!properties.is_empty(), "empty properties for {}", element["type"]);
    }
}
