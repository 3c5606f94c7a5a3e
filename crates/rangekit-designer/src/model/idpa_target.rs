use serde::{Deserialize, Serialize};

/// Scoring zone of an IDPA cardboard target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetZone {
    Head,
    Body,
    Lower,
}

/// IDPA cardboard target. The fields are scoring metadata carried through
/// the diagram untouched by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpaTarget {
    pub target_number: u32,
    pub is_threat: bool,
    /// Zones covered by hard cover; never repeats a zone.
    #[serde(default)]
    pub hard_cover_zones: Vec<TargetZone>,
    pub required_hits: u32,
}

impl Default for IdpaTarget {
    fn default() -> Self {
        Self {
            target_number: 1,
            is_threat: true,
            hard_cover_zones: Vec::new(),
            required_hits: 2,
        }
    }
}

impl IdpaTarget {
    pub fn validate(&self) -> Result<(), String> {
        for (i, zone) in self.hard_cover_zones.iter().enumerate() {
            if self.hard_cover_zones[..i].contains(zone) {
                return Err(format!("hardCoverZones repeats {:?}", zone));
            }
        }
        Ok(())
    }
}
