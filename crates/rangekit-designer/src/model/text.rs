use serde::{Deserialize, Serialize};

use super::validate_positive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Free text annotation, anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLabel {
    pub text: String,
    pub font_size: f64,
    #[serde(default)]
    pub font_weight: FontWeight,
}

impl Default for TextLabel {
    fn default() -> Self {
        Self {
            text: "Text".to_string(),
            font_size: 16.0,
            font_weight: FontWeight::Normal,
        }
    }
}

impl TextLabel {
    /// Rough box size; glyph metrics are left to the host.
    pub fn approximate_size(&self) -> (f64, f64) {
        let scale = match self.font_weight {
            FontWeight::Normal => 0.6,
            FontWeight::Bold => 0.65,
        };
        let chars = self.text.chars().count().max(1) as f64;
        (chars * self.font_size * scale, self.font_size * 1.2)
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_positive(self.font_size, "fontSize")
    }
}
