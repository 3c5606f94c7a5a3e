use serde::{Deserialize, Serialize};

use super::validate_positive;

/// Rectangular hard or soft cover, centred on the element position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    pub width: f64,
    pub height: f64,
}

impl Default for Cover {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 40.0,
        }
    }
}

impl Cover {
    pub fn validate(&self) -> Result<(), String> {
        validate_positive(self.width, "width")?;
        validate_positive(self.height, "height")
    }
}
