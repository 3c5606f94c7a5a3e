use serde::{Deserialize, Serialize};

use super::validate_positive;
use crate::geometry::{distance, Point};

pub const DEFAULT_WALL_THICKNESS: f64 = 10.0;

/// Straight wall between two absolute points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub start_point: Point,
    pub end_point: Point,
    pub thickness: f64,
}

impl Wall {
    pub fn new(start_point: Point, end_point: Point) -> Self {
        Self {
            start_point,
            end_point,
            thickness: DEFAULT_WALL_THICKNESS,
        }
    }

    pub fn length(&self) -> f64 {
        distance(self.start_point, self.end_point)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.start_point.is_finite() || !self.end_point.is_finite() {
            return Err("wall has a non-finite endpoint".to_string());
        }
        validate_positive(self.thickness, "thickness")
    }
}
