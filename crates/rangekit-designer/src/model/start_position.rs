use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartVariant {
    #[default]
    Box,
    Feet,
    Point,
}

/// Where the shooter starts the stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StartPosition {
    pub variant: StartVariant,
}
