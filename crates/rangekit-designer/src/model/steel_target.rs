use serde::{Deserialize, Serialize};

/// Silhouette of a reactive steel target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SteelShape {
    #[default]
    Popper,
    Plate,
    MiniPopper,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteelTarget {
    pub shape: SteelShape,
    /// The target must fall to score.
    #[serde(default)]
    pub must_fall: bool,
}
