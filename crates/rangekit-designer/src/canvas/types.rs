//! Canvas type definitions: Tool, Modifiers, InputState, EditorEvent,
//! DesignerState, ElementPatch, CanvasSnapshot.

use std::fmt;

use crate::element_store::ElementStore;
use crate::geometry::Point;
use crate::model::{ElementId, ElementKind, ElementType};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Drag to move the viewport.
    Pan,
    /// Drag to measure a distance.
    Measure,
    /// Place elements of the given type.
    Place(ElementType),
}

impl Tool {
    /// Whether this tool builds its element point by point.
    #[must_use]
    pub fn is_multi_point(self) -> bool {
        matches!(self, Self::Place(t) if t.is_multi_point())
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Select => f.write_str("select"),
            Tool::Pan => f.write_str("pan"),
            Tool::Measure => f.write_str("measure"),
            Tool::Place(t) => write!(f, "{}", t),
        }
    }
}

/// Keyboard modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Shift, Ctrl or Cmd extends the selection instead of replacing it.
    pub fn additive(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The viewport is being dragged.
    Panning {
        /// Screen position of the previous pointer event.
        last_screen: Point,
    },
    /// The selected elements are being moved.
    DraggingElements {
        /// Diagram position where the drag started.
        start_world: Point,
        /// Snapped translation applied so far.
        applied: Point,
        /// State before the drag, recorded as one undo step on release.
        before: CanvasSnapshot,
    },
    /// A single control point is being moved.
    DraggingHandle {
        id: ElementId,
        index: usize,
        moved: bool,
        before: CanvasSnapshot,
    },
    /// Band selection from `origin` to `current`.
    RubberBand {
        origin: Point,
        current: Point,
        additive: bool,
    },
    /// Measurement ruler from `origin` to `current`.
    Measuring { origin: Point, current: Point },
}

/// Multi-point element being drawn click by click.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingShape {
    pub element_type: ElementType,
    pub points: Vec<Point>,
}

/// Notifications queued for the host, drained with `Canvas::take_events`.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ElementAdded(ElementId),
    ElementUpdated(ElementId),
    ElementDeleted(ElementId),
    SelectionChanged(Vec<ElementId>),
    ToolChanged(Tool),
    ViewportChanged { zoom: f64, pan: Point },
    DiagramLoaded { element_count: usize },
}

/// Read-only snapshot of the transient editor state for host UI.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignerState {
    pub selected_tool: Tool,
    pub selected_elements: Vec<ElementId>,
    pub zoom: f64,
    pub pan: Point,
    pub show_grid: bool,
    pub snap_to_grid: bool,
    pub show_ruler: bool,
}

/// Partial replacement applied by `Canvas::update_element`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub position: Option<Point>,
    pub rotation: Option<f64>,
    pub locked: Option<bool>,
    pub kind: Option<ElementKind>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.rotation.is_none()
            && self.locked.is_none()
            && self.kind.is_none()
    }
}

/// Snapshot of canvas state for undo/redo
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSnapshot {
    pub(crate) store: ElementStore,
}
