use serde::{Deserialize, Serialize};

use super::validate_points;
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// Polyline the shooter may not cross.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultLine {
    pub points: Vec<Point>,
    #[serde(default)]
    pub style: LineStyle,
}

impl FaultLine {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            style: LineStyle::Solid,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_points(&self.points, "fault-line")
    }
}
