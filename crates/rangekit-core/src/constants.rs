//! Editor-wide constants.

/// Width of a freshly created diagram, in diagram units.
pub const DEFAULT_DIAGRAM_WIDTH: f64 = 800.0;

/// Height of a freshly created diagram, in diagram units.
pub const DEFAULT_DIAGRAM_HEIGHT: f64 = 600.0;

/// Default grid spacing in diagram units.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Pointer slop used by hit testing, in diagram units.
pub const DEFAULT_HIT_TOLERANCE: f64 = 4.0;

/// Radius of the draggable control-point handles.
pub const DEFAULT_HANDLE_RADIUS: f64 = 6.0;

/// Maximum number of undo snapshots kept by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Diagram units per foot (imperial) or per metre (metric).
pub const DEFAULT_UNITS_PER_MEASURE: f64 = 20.0;

/// Zoom limits shared by the viewport.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 50.0;

/// Multiplier applied by a single zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 1.2;

/// Fraction of the view reserved on each edge when fitting content.
pub const VIEW_PADDING: f64 = 0.05;

/// Below this length a segment is treated as a single point.
pub const GEOMETRY_EPSILON: f64 = 1e-9;
