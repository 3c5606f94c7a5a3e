//! # RangeKit
//!
//! A stage-diagram editor for practical shooting courses of fire. Stage
//! designers place targets, cover, walls, fault lines, start positions and
//! movement arrows on a scaled canvas, then save the layout as JSON.
//!
//! ## Architecture
//!
//! RangeKit is organized as a workspace with multiple crates:
//!
//! 1. **rangekit-core** - Error taxonomy, constants, measurement units
//! 2. **rangekit-settings** - Editor configuration and persistence
//! 3. **rangekit-designer** - Element model, renderers, canvas controller, document format
//! 4. **rangekit** - Logging bootstrap and the `rangekit` inspection binary

use std::collections::BTreeMap;
use std::fmt;

pub use rangekit_designer as designer;

pub use rangekit_core::{format_length, DiagramError, Error, MeasurementSystem, Result};
pub use rangekit_designer::{
    Bounds, Canvas, Dimensions, EditorEvent, ElementId, ElementKind, ElementType, Point,
    StageDiagram, StageElement, Tool,
};
pub use rangekit_settings::{EditorSettings, SettingsError, SettingsResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Installs a `tracing` registry with an env filter (`info` unless `RUST_LOG`
/// says otherwise) and a console formatter. A second call leaves the first
/// subscriber in place.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialized");
    }

    Ok(())
}

/// Overview of a loaded diagram, as printed by the `rangekit` binary.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramSummary {
    pub dimensions: Dimensions,
    /// Element count keyed by wire type name. Unknown types are included.
    pub counts: BTreeMap<String, usize>,
    pub opaque: usize,
    pub bounds: Option<Bounds>,
}

impl DiagramSummary {
    pub fn from_canvas(canvas: &Canvas) -> Self {
        let mut counts = BTreeMap::new();
        let mut opaque = 0;
        for element in canvas.elements() {
            *counts.entry(element.type_name().to_string()).or_insert(0) += 1;
            if element.element_type().is_none() {
                opaque += 1;
            }
        }

        Self {
            dimensions: canvas.dimensions(),
            counts,
            opaque,
            bounds: canvas.content_bounds(),
        }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl fmt::Display for DiagramSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Dimensions: {} x {}",
            self.dimensions.width, self.dimensions.height
        )?;
        writeln!(f, "Elements: {}", self.total())?;
        for (name, count) in &self.counts {
            writeln!(f, "  {:<16} {}", name, count)?;
        }
        writeln!(f, "Opaque: {}", self.opaque)?;
        match &self.bounds {
            Some(b) => write!(
                f,
                "Bounds: ({:.1}, {:.1}) - ({:.1}, {:.1})",
                b.min.x, b.min.y, b.max.x, b.max.y
            ),
            None => write!(f, "Bounds: empty"),
        }
    }
}
