use serde::{Deserialize, Serialize};

use super::validate_positive;

/// See-through-proof barrier, centred on the element position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionBarrier {
    pub width: f64,
    pub height: f64,
}

impl Default for VisionBarrier {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 20.0,
        }
    }
}

impl VisionBarrier {
    pub fn validate(&self) -> Result<(), String> {
        validate_positive(self.width, "width")?;
        validate_positive(self.height, "height")
    }
}
