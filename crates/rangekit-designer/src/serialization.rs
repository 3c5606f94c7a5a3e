//! Stage-diagram document (de)serialization.
//!
//! The persisted form is a JSON object graph:
//!
//! ```json
//! {
//!   "elements": [ { "id": "...", "type": "wall", "position": {"x":0,"y":0},
//!                   "rotation": 0, "properties": { ... } } ],
//!   "dimensions": { "width": 800, "height": 600 },
//!   "gridConfig": { "size": 20, "visible": true }
//! }
//! ```
//!
//! Import validates the whole document before anything is built, and reports
//! the first offending field. Elements with an unrecognised `type` are kept
//! verbatim and written back on export. The `selected` flag is never written.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use crate::geometry::Point;
use crate::model::{ElementId, ElementKind, ElementType, OpaqueElement, StageElement};
use rangekit_core::constants::{DEFAULT_DIAGRAM_HEIGHT, DEFAULT_DIAGRAM_WIDTH};
use rangekit_core::{DiagramError, Result};

/// Size of the range in diagram units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_DIAGRAM_WIDTH,
            height: DEFAULT_DIAGRAM_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub size: f64,
    pub visible: bool,
}

/// The persisted aggregate: elements in z-order, range size, grid settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StageDiagram {
    pub elements: Vec<StageElement>,
    pub dimensions: Dimensions,
    pub grid_config: Option<GridConfig>,
}

impl StageDiagram {
    /// Empty diagram of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            dimensions: Dimensions { width, height },
            grid_config: None,
        }
    }

    /// Checks an in-memory diagram against the same rules import applies.
    pub fn validate(&self) -> std::result::Result<(), DiagramError> {
        validate_dimensions(self.dimensions.width, self.dimensions.height)?;
        if let Some(grid) = &self.grid_config {
            validate_grid_size(grid.size)?;
        }
        let mut seen = HashSet::new();
        for (index, element) in self.elements.iter().enumerate() {
            element
                .validate()
                .map_err(|reason| DiagramError::invalid_element(index, reason))?;
            if !seen.insert(element.id.as_str()) {
                return Err(DiagramError::DuplicateId {
                    id: element.id.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parses and validates a document.
    pub fn from_json_value(value: &Value) -> std::result::Result<Self, DiagramError> {
        let root = value.as_object().ok_or_else(|| DiagramError::NotAnObject {
            field: "document".to_string(),
        })?;

        let raw_elements = root
            .get("elements")
            .ok_or_else(|| missing("elements"))?
            .as_array()
            .ok_or_else(|| DiagramError::invalid_field("elements", "must be an array"))?;

        let dimensions = parse_dimensions(root.get("dimensions"))?;
        let grid_config = match root.get("gridConfig") {
            None | Some(Value::Null) => None,
            Some(value) => Some(parse_grid_config(value)?),
        };

        let mut elements = Vec::with_capacity(raw_elements.len());
        let mut seen = HashSet::new();
        for (index, raw) in raw_elements.iter().enumerate() {
            let element = element_from_json(index, raw)?;
            if !seen.insert(element.id.clone()) {
                return Err(DiagramError::DuplicateId {
                    id: element.id.to_string(),
                });
            }
            elements.push(element);
        }

        Ok(Self {
            elements,
            dimensions,
            grid_config,
        })
    }

    pub fn from_json_str(s: &str) -> std::result::Result<Self, DiagramError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_json_value(&value)
    }

    pub fn to_json_value(&self) -> Value {
        let mut root = Map::new();
        root.insert(
            "elements".to_string(),
            Value::Array(self.elements.iter().map(element_to_json).collect()),
        );
        root.insert(
            "dimensions".to_string(),
            json!({ "width": self.dimensions.width, "height": self.dimensions.height }),
        );
        if let Some(grid) = &self.grid_config {
            root.insert(
                "gridConfig".to_string(),
                json!({ "size": grid.size, "visible": grid.visible }),
            );
        }
        Value::Object(root)
    }

    /// Save the diagram as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_json_value())?;
        std::fs::write(path.as_ref(), json)?;

        tracing::info!(
            path = %path.as_ref().display(),
            elements = self.elements.len(),
            "Saved stage diagram"
        );
        Ok(())
    }

    /// Load and validate a diagram file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;

        let diagram = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            elements = diagram.elements.len(),
            "Loaded stage diagram"
        );

        Ok(diagram)
    }
}

impl Serialize for StageDiagram {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StageDiagram {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json_value(&value).map_err(D::Error::custom)
    }
}

fn missing(field: &str) -> DiagramError {
    DiagramError::MissingField {
        field: field.to_string(),
    }
}

fn validate_dimensions(width: f64, height: f64) -> std::result::Result<(), DiagramError> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(DiagramError::InvalidDimensions { width, height })
    }
}

fn validate_grid_size(size: f64) -> std::result::Result<(), DiagramError> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(DiagramError::invalid_field(
            "gridConfig.size",
            format!("must be positive, got {}", size),
        ))
    }
}

fn number_field(obj: &Map<String, Value>, key: &str, path: &str) -> std::result::Result<f64, DiagramError> {
    obj.get(key)
        .ok_or_else(|| missing(path))?
        .as_f64()
        .ok_or_else(|| DiagramError::invalid_field(path, "must be a number"))
}

fn parse_dimensions(value: Option<&Value>) -> std::result::Result<Dimensions, DiagramError> {
    let obj = value
        .ok_or_else(|| missing("dimensions"))?
        .as_object()
        .ok_or_else(|| DiagramError::NotAnObject {
            field: "dimensions".to_string(),
        })?;
    let width = number_field(obj, "width", "dimensions.width")?;
    let height = number_field(obj, "height", "dimensions.height")?;
    validate_dimensions(width, height)?;
    Ok(Dimensions { width, height })
}

fn parse_grid_config(value: &Value) -> std::result::Result<GridConfig, DiagramError> {
    let obj = value.as_object().ok_or_else(|| DiagramError::NotAnObject {
        field: "gridConfig".to_string(),
    })?;
    let size = number_field(obj, "size", "gridConfig.size")?;
    validate_grid_size(size)?;
    let visible = match obj.get("visible") {
        None => true,
        Some(v) => v
            .as_bool()
            .ok_or_else(|| DiagramError::invalid_field("gridConfig.visible", "must be a boolean"))?,
    };
    Ok(GridConfig { size, visible })
}

fn element_from_json(index: usize, value: &Value) -> std::result::Result<StageElement, DiagramError> {
    let invalid = |reason: String| DiagramError::invalid_element(index, reason);

    let obj = value
        .as_object()
        .ok_or_else(|| invalid("element is not an object".to_string()))?;

    let type_name = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("missing string 'type'".to_string()))?;

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid("missing non-empty string 'id'".to_string()))?;

    let position: Point = match obj.get("position") {
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| invalid(format!("invalid 'position': {}", e)))?,
        None => return Err(invalid("missing 'position'".to_string())),
    };

    let rotation = match obj.get("rotation") {
        None | Some(Value::Null) => 0.0,
        Some(v) => v
            .as_f64()
            .ok_or_else(|| invalid("'rotation' must be a number".to_string()))?,
    };

    let locked = match obj.get("locked") {
        None | Some(Value::Null) => false,
        Some(v) => v
            .as_bool()
            .ok_or_else(|| invalid("'locked' must be a boolean".to_string()))?,
    };

    let kind = match ElementType::from_str(type_name) {
        Ok(_) => {
            let properties = obj
                .get("properties")
                .filter(|p| p.is_object())
                .ok_or_else(|| invalid(format!("{} requires a 'properties' object", type_name)))?;
            serde_json::from_value::<ElementKind>(json!({
                "type": type_name,
                "properties": properties,
            }))
            .map_err(|e| invalid(format!("{}: {}", type_name, e)))?
        }
        Err(_) => {
            tracing::debug!(index, type_name, "Keeping element of unknown type");
            ElementKind::Opaque(OpaqueElement::new(type_name, obj.clone()))
        }
    };

    let element = StageElement {
        id: ElementId::from(id),
        position,
        rotation,
        selected: false,
        locked,
        kind,
    };
    element.validate().map_err(invalid)?;
    Ok(element)
}

/// Serializes one element. Opaque elements are written from their original
/// object with the live `id`, `position`, `rotation` and `locked` applied.
pub fn element_to_json(element: &StageElement) -> Value {
    let position = json!({ "x": element.position.x, "y": element.position.y });

    let mut obj = match &element.kind {
        ElementKind::Opaque(opaque) => {
            let mut obj = opaque.raw.clone();
            obj.remove("selected");
            obj.insert("type".to_string(), Value::String(opaque.type_name.clone()));
            if obj.contains_key("locked") {
                obj.insert("locked".to_string(), Value::Bool(element.locked));
            }
            obj
        }
        kind => {
            let mut obj = Map::new();
            obj.insert("type".to_string(), Value::String(kind.type_name().to_string()));
            let properties = match serde_json::to_value(kind) {
                Ok(mut tagged) => tagged.get_mut("properties").map(Value::take),
                Err(err) => {
                    tracing::warn!(id = %element.id, error = %err, "Failed to serialize element properties");
                    None
                }
            }
            .unwrap_or_else(|| Value::Object(Map::new()));
            obj.insert("properties".to_string(), properties);
            obj
        }
    };

    obj.insert("id".to_string(), Value::String(element.id.to_string()));
    obj.insert("position".to_string(), position);
    obj.insert("rotation".to_string(), json!(element.rotation));
    if element.locked {
        obj.insert("locked".to_string(), Value::Bool(true));
    }
    Value::Object(obj)
}
