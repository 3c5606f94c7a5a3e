use serde::{Deserialize, Serialize};

use super::validate_points;
use crate::geometry::Point;

/// Shooter movement path with an optional label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementArrow {
    pub points: Vec<Point>,
    #[serde(default)]
    pub label: String,
}

impl MovementArrow {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            label: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_points(&self.points, "movement-arrow")
    }
}
