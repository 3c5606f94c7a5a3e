//! Editing operations beyond the core add/select/update/delete set:
//! rotation, control points, z-order, duplication and view control.

use super::{Canvas, EditorEvent};
use crate::geometry::{Bounds, Point};
use crate::model::ElementId;
use crate::renderer::element_bounds;

impl Canvas {
    /// Rotates every selected, unlocked element clockwise by `degrees`.
    pub fn rotate_selected(&mut self, degrees: f64) -> bool {
        if !degrees.is_finite() || degrees == 0.0 || !self.has_movable_selection() {
            return false;
        }
        self.record_history();
        let mut rotated = Vec::new();
        for element in self.store.iter_mut().filter(|e| e.selected && !e.locked) {
            element.rotate_by(degrees);
            rotated.push(element.id.clone());
        }
        tracing::debug!(degrees, count = rotated.len(), "Rotated selection");
        self.events
            .extend(rotated.into_iter().map(EditorEvent::ElementUpdated));
        true
    }

    /// Replaces one control point with the (snapped) `point`.
    pub fn move_control_point(&mut self, id: &ElementId, index: usize, point: Point) -> bool {
        let point = self.snap_to_grid_if_enabled(point);
        self.edit_control_points(id, "move_control_point", |element| {
            element.move_control_point(index, point)
        })
    }

    /// Inserts a vertex after `after_index` on a fault line or arrow.
    pub fn insert_control_point(&mut self, id: &ElementId, after_index: usize, point: Point) -> bool {
        let point = self.snap_to_grid_if_enabled(point);
        self.edit_control_points(id, "insert_control_point", |element| {
            element.insert_control_point(after_index, point)
        })
    }

    /// Removes a vertex. Refused when fewer than two points would remain.
    pub fn remove_control_point(&mut self, id: &ElementId, index: usize) -> bool {
        self.edit_control_points(id, "remove_control_point", |element| {
            element.remove_control_point(index)
        })
    }

    fn edit_control_points(
        &mut self,
        id: &ElementId,
        operation: &'static str,
        edit: impl FnOnce(&mut crate::model::StageElement) -> bool,
    ) -> bool {
        let Some(element) = self.store.get(id) else {
            tracing::warn!(id = %id, operation, "Unknown element");
            return false;
        };
        if element.locked {
            tracing::warn!(id = %id, operation, "Element is locked");
            return false;
        }

        let mut updated = element.clone();
        if !edit(&mut updated) || updated.validate().is_err() {
            tracing::warn!(id = %id, operation, "Control point edit refused");
            return false;
        }
        if Some(&updated) == self.store.get(id) {
            return false;
        }

        self.record_history();
        if let Some(slot) = self.store.get_mut(id) {
            *slot = updated;
        }
        self.events.push(EditorEvent::ElementUpdated(id.clone()));
        true
    }

    /// Moves an element to the top of the z-order.
    pub fn bring_to_front(&mut self, id: &ElementId) -> bool {
        match self.store.index_of(id) {
            None => {
                tracing::warn!(id = %id, "bring_to_front: unknown element");
                false
            }
            Some(index) if index + 1 == self.store.len() => false,
            Some(_) => {
                self.record_history();
                self.store.bring_to_front(id);
                self.events.push(EditorEvent::ElementUpdated(id.clone()));
                true
            }
        }
    }

    /// Moves an element to the bottom of the z-order.
    pub fn send_to_back(&mut self, id: &ElementId) -> bool {
        match self.store.index_of(id) {
            None => {
                tracing::warn!(id = %id, "send_to_back: unknown element");
                false
            }
            Some(0) => false,
            Some(_) => {
                self.record_history();
                self.store.send_to_back(id);
                self.events.push(EditorEvent::ElementUpdated(id.clone()));
                true
            }
        }
    }

    pub fn select_all(&mut self) -> bool {
        let changed = self.selection.select_all(&mut self.store);
        if changed {
            self.emit_selection_changed();
        }
        changed
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.deselect_all(&mut self.store);
        if changed {
            self.emit_selection_changed();
        }
        changed
    }

    /// Copies the selected elements, offset by `offset`, with fresh ids.
    /// The copies are appended on top and become the selection.
    ///
    /// Returns the ids of the copies.
    pub fn duplicate_selected(&mut self, offset: Point) -> Vec<ElementId> {
        let originals: Vec<_> = self
            .store
            .iter()
            .filter(|e| e.selected)
            .cloned()
            .collect();
        if originals.is_empty() || !offset.is_finite() {
            return Vec::new();
        }

        self.record_history();
        let mut copies = Vec::with_capacity(originals.len());
        for original in originals {
            let mut copy = original;
            copy.id = ElementId::generate();
            copy.selected = false;
            copy.locked = false;
            copy.translate(offset);
            let index = self.store.insert_fresh(copy);
            let id = self.store.as_slice()[index].id.clone();
            self.events.push(EditorEvent::ElementAdded(id.clone()));
            copies.push(id);
        }
        tracing::debug!(count = copies.len(), "Duplicated selection");
        if self.selection.select_ids(&mut self.store, &copies) {
            self.emit_selection_changed();
        }
        copies
    }

    // --- View control ---

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.emit_viewport_changed();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.emit_viewport_changed();
    }

    /// Zooms by `factor` keeping the diagram point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.viewport.zoom_at(screen, factor);
        self.emit_viewport_changed();
    }

    /// Pans by a delta in screen pixels.
    pub fn pan_by(&mut self, delta: Point) {
        self.viewport.pan_by(delta);
        self.emit_viewport_changed();
    }

    /// Fits the range (and any content spilling past it) into the surface.
    pub fn fit_diagram(&mut self) {
        let range = Bounds::new(
            Point::ZERO,
            Point::new(self.dimensions.width, self.dimensions.height),
        );
        let bounds = match self.content_bounds() {
            Some(content) => range.union(&content),
            None => range,
        };
        self.viewport.fit_to_view(bounds);
        self.emit_viewport_changed();
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.emit_viewport_changed();
    }

    /// Resizes the drawing surface (in screen pixels).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
    }

    /// Union of every element's hit-region bounds.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.store
            .iter()
            .filter_map(element_bounds)
            .reduce(|a, b| a.union(&b))
    }
}
