use serde_json::{Map, Value};

/// An element whose `type` this editor does not recognise.
///
/// The complete source object is kept so it can be written back unchanged;
/// only `id`, `position` and `rotation` are refreshed from the live element.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueElement {
    pub type_name: String,
    pub raw: Map<String, Value>,
}

impl OpaqueElement {
    pub fn new(type_name: impl Into<String>, raw: Map<String, Value>) -> Self {
        Self {
            type_name: type_name.into(),
            raw,
        }
    }

    /// Placeholder footprint used for rendering and hit testing.
    ///
    /// Honours numeric `properties.width`/`properties.height` when present.
    pub fn footprint(&self) -> (f64, f64) {
        let props = self.raw.get("properties").and_then(Value::as_object);
        let dim = |key: &str| {
            props
                .and_then(|p| p.get(key))
                .and_then(Value::as_f64)
                .filter(|v| v.is_finite() && *v > 0.0)
        };
        (
            dim("width").unwrap_or(OPAQUE_SIZE),
            dim("height").unwrap_or(OPAQUE_SIZE),
        )
    }
}

const OPAQUE_SIZE: f64 = 40.0;
