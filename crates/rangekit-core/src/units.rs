//! Unit conversion utilities
//!
//! Diagram space is unitless; a configurable scale maps diagram units onto
//! feet (imperial) or metres (metric) for ruler and measurement labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Feet
    #[default]
    Imperial,
    /// Metres
    Metric,
}

impl MeasurementSystem {
    /// Suffix appended to formatted lengths.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Imperial => "ft",
            Self::Metric => "m",
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imperial => write!(f, "Imperial"),
            Self::Metric => write!(f, "Metric"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "imperial" | "ft" | "feet" => Ok(Self::Imperial),
            "metric" | "m" | "meters" | "metres" => Ok(Self::Metric),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Converts a diagram-space length into real-world units.
///
/// A non-positive scale yields the raw diagram length.
fn to_real_length(diagram_units: f64, units_per_measure: f64) -> f64 {
    if units_per_measure > 0.0 {
        diagram_units / units_per_measure
    } else {
        diagram_units
    }
}

/// Format a diagram-space length for display
///
/// * `diagram_units` - Length in diagram units
/// * `units_per_measure` - Diagram units per foot or metre
/// * `system` - Target measurement system
pub fn format_length(diagram_units: f64, units_per_measure: f64, system: MeasurementSystem) -> String {
    let value = to_real_length(diagram_units, units_per_measure);
    format!("{:.2} {}", value, system.suffix())
}
