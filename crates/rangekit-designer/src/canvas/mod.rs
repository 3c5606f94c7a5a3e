//! Editor controller for a stage diagram.
//!
//! The [`Canvas`] exclusively owns the element collection, selection set,
//! active tool, viewport and grid settings. Hosts mutate the diagram only
//! through its operations or by feeding it pointer events; renderers read
//! the resulting model.

mod gestures;
mod operations;
mod render;
mod types;

pub use types::{
    CanvasSnapshot, DesignerState, EditorEvent, ElementPatch, InputState, Modifiers,
    PendingShape, Tool,
};

use crate::element_store::ElementStore;
use crate::geometry::Point;
use crate::history::History;
use crate::model::{ElementId, ElementKind, ElementType, StageElement};
use crate::renderer::{render, InteractionState};
use crate::selection_manager::SelectionManager;
use crate::serialization::{Dimensions, GridConfig, StageDiagram};
use crate::viewport::Viewport;
use rangekit_core::{DiagramError, MeasurementSystem};
use rangekit_settings::EditorSettings;

/// Canvas state managing stage elements and editing operations.
#[derive(Debug, Clone)]
pub struct Canvas {
    store: ElementStore,
    selection: SelectionManager,
    viewport: Viewport,
    tool: Tool,
    input: InputState,
    pending: Option<PendingShape>,
    cursor: Option<Point>,
    hovered: Option<ElementId>,
    dimensions: Dimensions,
    /// Size given to a diagram started from nothing.
    default_dimensions: Dimensions,
    grid_size: f64,
    show_grid: bool,
    snap_to_grid: bool,
    show_ruler: bool,
    hit_tolerance: f64,
    handle_radius: f64,
    measurement_system: MeasurementSystem,
    units_per_measure: f64,
    history: History<CanvasSnapshot>,
    events: Vec<EditorEvent>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Creates an empty canvas with default settings.
    pub fn new() -> Self {
        Self::with_settings(&EditorSettings::default())
    }

    /// Creates an empty canvas seeded from editor settings.
    pub fn with_settings(settings: &EditorSettings) -> Self {
        let default_dimensions = Dimensions {
            width: settings.default_width,
            height: settings.default_height,
        };
        Self {
            store: ElementStore::new(),
            selection: SelectionManager::new(),
            viewport: Viewport::default(),
            tool: Tool::Select,
            input: InputState::Idle,
            pending: None,
            cursor: None,
            hovered: None,
            dimensions: default_dimensions,
            default_dimensions,
            grid_size: settings.grid_size,
            show_grid: settings.show_grid,
            snap_to_grid: settings.snap_to_grid,
            show_ruler: settings.show_ruler,
            hit_tolerance: settings.hit_tolerance,
            handle_radius: settings.handle_radius,
            measurement_system: settings.measurement_system,
            units_per_measure: settings.units_per_measure,
            history: History::new(settings.history_limit),
            events: Vec::new(),
        }
    }

    // --- Accessors ---

    /// Elements in z-order (bottom first).
    pub fn elements(&self) -> &[StageElement] {
        self.store.as_slice()
    }

    pub fn element_count(&self) -> usize {
        self.store.len()
    }

    pub fn element(&self, id: &ElementId) -> Option<&StageElement> {
        self.store.get(id)
    }

    pub fn selected_ids(&self) -> &[ElementId] {
        self.selection.selected_ids()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    pub fn pending_shape(&self) -> Option<&PendingShape> {
        self.pending.as_ref()
    }

    pub fn hovered(&self) -> Option<&ElementId> {
        self.hovered.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Sets the grid spacing; non-positive or non-finite sizes are ignored.
    pub fn set_grid_size(&mut self, size: f64) {
        if size.is_finite() && size > 0.0 {
            self.grid_size = size;
        } else {
            tracing::warn!(size, "Ignoring invalid grid size");
        }
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.snap_to_grid = snap;
    }

    pub fn set_show_ruler(&mut self, show: bool) {
        self.show_ruler = show;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Current transient editor state for toolbars and property panels.
    pub fn designer_state(&self) -> DesignerState {
        DesignerState {
            selected_tool: self.tool,
            selected_elements: self.selection.selected_ids().to_vec(),
            zoom: self.viewport.zoom(),
            pan: self.viewport.pan(),
            show_grid: self.show_grid,
            snap_to_grid: self.snap_to_grid,
            show_ruler: self.show_ruler,
        }
    }

    /// Drains queued editor events.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Core operations ---

    /// Places a new element with default properties at the (snapped)
    /// position, on top of the z-order, and selects it exclusively.
    pub fn add_element(&mut self, element_type: ElementType, position: Point) -> &StageElement {
        let position = self.snap_to_grid_if_enabled(position);
        let mut kind = ElementKind::with_defaults(element_type, position);
        if let ElementKind::IdpaTarget(target) = &mut kind {
            target.target_number = self.next_target_number();
        }
        self.commit_new_element(StageElement::new(kind, position))
    }

    fn next_target_number(&self) -> u32 {
        self.store
            .iter()
            .filter_map(|e| match &e.kind {
                ElementKind::IdpaTarget(t) => Some(t.target_number),
                _ => None,
            })
            .max()
            .map_or(1, |n| n.saturating_add(1))
    }

    fn commit_new_element(&mut self, element: StageElement) -> &StageElement {
        self.record_history();
        let index = self.store.insert_fresh(element);
        let id = self.store.as_slice()[index].id.clone();
        tracing::debug!(id = %id, element_type = self.store.as_slice()[index].type_name(), "Added element");
        self.events.push(EditorEvent::ElementAdded(id.clone()));
        if self.selection.select_ids(&mut self.store, std::slice::from_ref(&id)) {
            self.emit_selection_changed();
        }
        &self.store.as_slice()[index]
    }

    /// Selects an element. `additive == false` replaces the selection with
    /// `{id}`; `additive == true` toggles its membership.
    pub fn select_element(&mut self, id: &ElementId, additive: bool) -> bool {
        if !self.store.contains(id) {
            tracing::warn!(id = %id, "select_element: unknown element");
            return false;
        }
        if self.selection.select_id(&mut self.store, id, additive) {
            self.emit_selection_changed();
        }
        true
    }

    /// Structural update by id. Unknown ids and patches that would leave the
    /// element invalid are ignored and reported.
    ///
    /// A position patch on a line-like element moves its points with it.
    /// The lock flag does not apply here; this is how hosts unlock elements.
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) -> bool {
        let Some(current) = self.store.get(id) else {
            tracing::warn!(id = %id, "update_element: unknown element");
            return false;
        };
        if patch.is_empty() {
            return false;
        }

        let mut updated = current.clone();
        if let Some(kind) = patch.kind {
            updated.kind = kind;
        }
        if let Some(position) = patch.position {
            updated.translate(position - updated.position);
        }
        if let Some(rotation) = patch.rotation {
            if !updated.is_line_like() {
                updated.rotation = rotation.rem_euclid(360.0);
            }
        }
        if let Some(locked) = patch.locked {
            updated.locked = locked;
        }

        if let Err(reason) = updated.validate() {
            tracing::warn!(id = %id, %reason, "update_element: rejected patch");
            return false;
        }
        if Some(&updated) == self.store.get(id) {
            return false;
        }

        self.record_history();
        if let Some(slot) = self.store.get_mut(id) {
            *slot = updated;
        }
        tracing::debug!(id = %id, "Updated element");
        self.events.push(EditorEvent::ElementUpdated(id.clone()));
        true
    }

    /// Removes one element and its selection entry in the same step.
    pub fn delete_element(&mut self, id: &ElementId) -> bool {
        if !self.store.contains(id) {
            tracing::warn!(id = %id, "delete_element: unknown element");
            return false;
        }
        self.delete_ids(&[id.clone()]) > 0
    }

    /// Removes every selected element. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.selected_ids().to_vec();
        self.delete_ids(&ids)
    }

    fn delete_ids(&mut self, ids: &[ElementId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        self.record_history();
        let removed = self.store.remove_all(ids);
        let pruned = self.selection.retain_live(&mut self.store);
        if self
            .hovered
            .as_ref()
            .is_some_and(|h| !self.store.contains(h))
        {
            self.hovered = None;
        }
        for element in &removed {
            tracing::debug!(id = %element.id, "Deleted element");
            self.events.push(EditorEvent::ElementDeleted(element.id.clone()));
        }
        if pruned {
            self.emit_selection_changed();
        }
        removed.len()
    }

    /// Translates every selected, unlocked element by `delta`.
    pub fn move_selected(&mut self, delta: Point) -> bool {
        if !delta.is_finite() || delta == Point::ZERO {
            return false;
        }
        if !self.has_movable_selection() {
            return false;
        }
        self.record_history();
        let moved = self.translate_selected(delta);
        for id in &moved {
            self.events.push(EditorEvent::ElementUpdated(id.clone()));
        }
        true
    }

    fn has_movable_selection(&self) -> bool {
        self.store.iter().any(|e| e.selected && !e.locked)
    }

    /// Applies `delta` without recording history; returns the moved ids.
    fn translate_selected(&mut self, delta: Point) -> Vec<ElementId> {
        let mut moved = Vec::new();
        for element in self.store.iter_mut().filter(|e| e.selected && !e.locked) {
            element.translate(delta);
            moved.push(element.id.clone());
        }
        moved
    }

    /// Rounds each axis to the nearest grid multiple when snapping is on.
    pub fn snap_to_grid_if_enabled(&self, point: Point) -> Point {
        if !self.snap_to_grid || self.grid_size <= 0.0 {
            return point;
        }
        let g = self.grid_size;
        Point::new((point.x / g).round() * g, (point.y / g).round() * g)
    }

    /// Switches tools. Any in-progress multi-point shape, rubber band or
    /// measurement is discarded.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.pending.take().is_some() {
            tracing::debug!("Discarded in-progress shape on tool change");
        }
        if matches!(
            self.input,
            InputState::RubberBand { .. } | InputState::Measuring { .. } | InputState::Panning { .. }
        ) {
            self.input = InputState::Idle;
        }
        if self.tool != tool {
            tracing::debug!(from = %self.tool, to = %tool, "Tool changed");
            self.tool = tool;
            self.events.push(EditorEvent::ToolChanged(tool));
        }
    }

    /// Current diagram as a persistable document. Selection flags are not
    /// part of the document.
    pub fn export_diagram(&self) -> StageDiagram {
        let elements = self
            .store
            .iter()
            .map(|e| StageElement {
                selected: false,
                ..e.clone()
            })
            .collect();
        tracing::info!(elements = self.store.len(), "Exported stage diagram");
        StageDiagram {
            elements,
            dimensions: self.dimensions,
            grid_config: Some(GridConfig {
                size: self.grid_size,
                visible: self.show_grid,
            }),
        }
    }

    /// Replaces the editor contents with `diagram`.
    ///
    /// The document is validated first; on error the current state is left
    /// untouched. Selection, history and any gesture in progress are reset.
    pub fn import_diagram(&mut self, diagram: StageDiagram) -> Result<(), DiagramError> {
        diagram.validate()?;

        let StageDiagram {
            elements,
            dimensions,
            grid_config,
        } = diagram;

        let elements = elements
            .into_iter()
            .map(|e| StageElement {
                selected: false,
                ..e
            })
            .collect::<Vec<_>>();
        let element_count = elements.len();

        self.store = ElementStore::from_elements(elements);
        self.dimensions = dimensions;
        if let Some(grid) = grid_config {
            self.grid_size = grid.size;
            self.show_grid = grid.visible;
        }
        let had_selection = !self.selection.is_empty();
        self.selection = SelectionManager::new();
        self.pending = None;
        self.cursor = None;
        self.hovered = None;
        self.input = InputState::Idle;
        self.history.clear();

        tracing::info!(elements = element_count, "Imported stage diagram");
        self.events.push(EditorEvent::DiagramLoaded { element_count });
        if had_selection {
            self.emit_selection_changed();
        }
        Ok(())
    }

    /// Parses, validates and imports a JSON document.
    pub fn import_json(&mut self, value: &serde_json::Value) -> Result<(), DiagramError> {
        let diagram = StageDiagram::from_json_value(value)?;
        self.import_diagram(diagram)
    }

    /// Loads a document supplied by the host; `None` starts an empty
    /// diagram with the configured default dimensions.
    pub fn load(&mut self, diagram: Option<StageDiagram>) -> Result<(), DiagramError> {
        match diagram {
            Some(diagram) => self.import_diagram(diagram),
            None => {
                let empty = StageDiagram {
                    elements: Vec::new(),
                    dimensions: self.default_dimensions,
                    grid_config: None,
                };
                self.import_diagram(empty)
            }
        }
    }

    /// Reverts the last committed mutation.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                tracing::debug!("Undo");
                true
            }
            None => false,
        }
    }

    /// Re-applies the last undone mutation.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                tracing::debug!("Redo");
                true
            }
            None => false,
        }
    }

    // --- Internal helpers ---

    pub(crate) fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            store: self.store.clone(),
        }
    }

    fn record_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    /// Restores a snapshot, keeping the live selection where possible.
    fn restore(&mut self, snapshot: CanvasSnapshot) {
        let before_ids = self.store.ids();
        self.store = snapshot.store;
        let after_ids = self.store.ids();

        for id in before_ids.iter().filter(|id| !after_ids.contains(id)) {
            self.events.push(EditorEvent::ElementDeleted(id.clone()));
        }
        for id in &after_ids {
            if before_ids.contains(id) {
                self.events.push(EditorEvent::ElementUpdated(id.clone()));
            } else {
                self.events.push(EditorEvent::ElementAdded(id.clone()));
            }
        }

        let selected = self.selection.selected_ids().to_vec();
        if self.selection.select_ids(&mut self.store, &selected) {
            self.emit_selection_changed();
        }
        if self
            .hovered
            .as_ref()
            .is_some_and(|h| !self.store.contains(h))
        {
            self.hovered = None;
        }
    }

    fn emit_selection_changed(&mut self) {
        self.events.push(EditorEvent::SelectionChanged(
            self.selection.selected_ids().to_vec(),
        ));
    }

    fn emit_viewport_changed(&mut self) {
        self.events.push(EditorEvent::ViewportChanged {
            zoom: self.viewport.zoom(),
            pan: self.viewport.pan(),
        });
    }

    /// Topmost element whose hit region contains `world`.
    pub fn hit_test(&self, world: Point) -> Option<&ElementId> {
        self.store
            .iter_topmost_first()
            .find(|e| {
                render(e, InteractionState::default())
                    .hit_region
                    .contains(world, self.hit_tolerance)
            })
            .map(|e| &e.id)
    }
}
