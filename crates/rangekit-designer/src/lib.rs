//! # RangeKit Designer
//!
//! This crate provides the stage-diagram editor: a 2D surface on which
//! match designers lay out a shooting stage (targets, steel, cover, walls,
//! fault lines, start positions, movement arrows and labels) and persist it
//! as a JSON document.
//!
//! ## Core Components
//!
//! ### Model
//! - **Geometry**: Points, vectors, segments and bounds in diagram space
//! - **Elements**: One tagged variant per placeable object, plus an opaque
//!   variant that carries unknown element types through unchanged
//!
//! ### Rendering
//! - **Renderers**: Pure functions from element + interaction state to
//!   drawable primitives, a hit region and control handles
//!
//! ### Editing
//! - **Canvas**: Owns elements, selection, tool, viewport and grid; turns
//!   pointer gestures into model mutations
//! - **History/Undo-Redo**: Snapshot history, one step per committed edit
//! - **Serialization**: Validated import and lossless export
//!
//! ## Architecture
//!
//! ```text
//! Canvas (editor controller)
//!   ├── ElementStore (z-ordered elements)
//!   ├── SelectionManager
//!   ├── Viewport (zoom/pan)
//!   └── History (undo/redo)
//!
//! Renderer (element -> primitives + hit region)
//!   └── Geometry
//!
//! Serialization (StageDiagram <-> JSON)
//! ```
//!
//! ## Usage
//!
//! ```
//! use rangekit_designer::{Canvas, ElementType, Point};
//!
//! let mut canvas = Canvas::new();
//! let id = canvas
//!     .add_element(ElementType::SteelTarget, Point::new(100.0, 100.0))
//!     .id
//!     .clone();
//! assert_eq!(canvas.selected_ids(), &[id]);
//!
//! let diagram = canvas.export_diagram();
//! assert_eq!(diagram.elements.len(), 1);
//! ```

pub mod canvas;
pub mod element_store;
pub mod geometry;
pub mod history;
pub mod model;
pub mod renderer;
pub mod selection_manager;
pub mod serialization;
pub mod viewport;

pub use canvas::{
    Canvas, CanvasSnapshot, DesignerState, EditorEvent, ElementPatch, InputState, Modifiers,
    PendingShape, Tool,
};
pub use element_store::ElementStore;
pub use geometry::{Bounds, Point};
pub use history::History;
pub use model::{
    settle_anchor_drag, Cover, ElementId, ElementKind, ElementType, FaultLine, FontWeight,
    IdpaTarget, LineStyle, MovementArrow, OpaqueElement, StageElement, StartPosition,
    StartVariant, SteelShape, SteelTarget, TargetZone, TextLabel, VisionBarrier, Wall,
};
pub use renderer::{
    element_bounds, on_drag, on_handle_drag, render, render_with, ElementRenderer, HitRegion,
    InteractionState, Primitive, RenderOutput,
};
pub use selection_manager::SelectionManager;
pub use serialization::{Dimensions, GridConfig, StageDiagram};
pub use viewport::Viewport;

pub use rangekit_core::{DiagramError, MeasurementSystem};
