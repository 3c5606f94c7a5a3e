//! Pointer-gesture state machine.
//!
//! Hosts forward raw pointer events in screen pixels; the active [`Tool`]
//! and the current [`InputState`] decide what they mean. A whole drag is a
//! single undo step, recorded on pointer-up.

use super::{Canvas, EditorEvent, InputState, Modifiers, PendingShape, Tool};
use crate::geometry::{Bounds, Point};
use crate::model::{ElementId, ElementKind, ElementType, StageElement};
use crate::renderer::{render_with, InteractionState};

impl Canvas {
    /// Handles a pointer press at `screen`.
    pub fn pointer_down(&mut self, screen: Point, modifiers: Modifiers) {
        if !screen.is_finite() {
            return;
        }
        let world = self.viewport.pixel_to_world(screen);
        self.cursor = Some(world);

        match self.tool {
            Tool::Pan => {
                self.input = InputState::Panning {
                    last_screen: screen,
                };
            }
            Tool::Measure => {
                let origin = self.snap_to_grid_if_enabled(world);
                self.input = InputState::Measuring {
                    origin,
                    current: origin,
                };
            }
            Tool::Place(element_type) if element_type.is_multi_point() => {
                self.append_pending_point(element_type, world);
            }
            Tool::Place(element_type) => {
                let id = self.add_element(element_type, world).id.clone();
                tracing::debug!(id = %id, "Placed element, reverting to select tool");
                self.set_tool(Tool::Select);
            }
            Tool::Select => self.begin_select_gesture(world, modifiers),
        }
    }

    /// Handles pointer movement, with or without a button held.
    pub fn pointer_move(&mut self, screen: Point, _modifiers: Modifiers) {
        if !screen.is_finite() {
            return;
        }
        let world = self.viewport.pixel_to_world(screen);
        self.cursor = Some(world);

        let mut input = std::mem::take(&mut self.input);
        match &mut input {
            InputState::Idle => self.update_hover(world),
            InputState::Panning { last_screen } => {
                self.viewport.pan_by(screen - *last_screen);
                *last_screen = screen;
            }
            InputState::DraggingElements {
                start_world,
                applied,
                ..
            } => {
                let desired = self.snap_to_grid_if_enabled(world - *start_world);
                let step = desired - *applied;
                if step != Point::ZERO {
                    self.translate_selected(step);
                    *applied = desired;
                }
            }
            InputState::DraggingHandle {
                id, index, moved, ..
            } => {
                let point = self.snap_to_grid_if_enabled(world);
                if let Some(element) = self.store.get_mut(id) {
                    if !element.locked && element.move_control_point(*index, point) {
                        *moved = true;
                    }
                }
            }
            InputState::RubberBand { current, .. } => *current = world,
            InputState::Measuring { current, .. } => {
                *current = self.snap_to_grid_if_enabled(world);
            }
        }
        self.input = input;
    }

    /// Handles a pointer release, committing whatever gesture was running.
    pub fn pointer_up(&mut self, screen: Point, modifiers: Modifiers) {
        if screen.is_finite() {
            self.pointer_move(screen, modifiers);
        }

        match std::mem::take(&mut self.input) {
            InputState::Idle => {}
            InputState::Panning { .. } => self.emit_viewport_changed(),
            InputState::DraggingElements {
                applied, before, ..
            } => {
                if applied != Point::ZERO && before.store != self.store {
                    self.history.record(before);
                    let moved: Vec<ElementId> = self
                        .store
                        .iter()
                        .filter(|e| e.selected && !e.locked)
                        .map(|e| e.id.clone())
                        .collect();
                    tracing::debug!(dx = applied.x, dy = applied.y, count = moved.len(), "Drag committed");
                    self.events
                        .extend(moved.into_iter().map(EditorEvent::ElementUpdated));
                }
            }
            InputState::DraggingHandle {
                id,
                index,
                moved,
                before,
            } => {
                if moved && before.store != self.store {
                    self.history.record(before);
                    tracing::debug!(id = %id, index, "Control point drag committed");
                    self.events.push(EditorEvent::ElementUpdated(id));
                }
            }
            InputState::RubberBand {
                origin,
                current,
                additive,
            } => self.finish_rubber_band(Bounds::new(origin, current), additive),
            InputState::Measuring { origin, current } => {
                tracing::debug!(distance = origin.distance_to(&current), "Measurement finished");
            }
        }
    }

    /// A double click finishes an in-progress fault line or arrow.
    pub fn double_click(&mut self, screen: Point, _modifiers: Modifiers) {
        if !screen.is_finite() {
            return;
        }
        if self.tool.is_multi_point() && self.pending.is_some() {
            self.finish_multi_point();
        }
    }

    /// Escape: discards the shape being drawn and aborts any gesture,
    /// reverting a drag to where it started.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("Discarded in-progress shape");
        }
        match std::mem::take(&mut self.input) {
            InputState::DraggingElements { before, .. }
            | InputState::DraggingHandle { before, .. } => {
                if before.store != self.store {
                    self.restore(before);
                }
            }
            InputState::Panning { .. } => self.emit_viewport_changed(),
            InputState::Idle | InputState::RubberBand { .. } | InputState::Measuring { .. } => {}
        }
    }

    /// The pointer left the surface. A rubber band or measurement in progress
    /// is dropped and the selection stays as it was.
    pub fn pointer_leave(&mut self) {
        self.cursor = None;
        self.hovered = None;
        if matches!(
            self.input,
            InputState::RubberBand { .. } | InputState::Measuring { .. }
        ) {
            tracing::debug!("Pointer left surface, gesture cancelled");
            self.input = InputState::Idle;
        }
    }

    /// Commits the multi-point shape being drawn. The tool reverts to select.
    ///
    /// Shapes with fewer than two distinct points are discarded.
    pub fn finish_multi_point(&mut self) -> Option<ElementId> {
        let pending = self.pending.take()?;
        let anchor = pending.points.first().copied();
        let id = match (anchor, ElementKind::from_points(pending.element_type, pending.points)) {
            (Some(anchor), Some(kind)) => {
                Some(self.commit_new_element(StageElement::new(kind, anchor)).id.clone())
            }
            _ => {
                tracing::debug!(element_type = %pending.element_type, "Discarded shape with too few points");
                None
            }
        };
        self.set_tool(Tool::Select);
        id
    }

    fn append_pending_point(&mut self, element_type: ElementType, world: Point) {
        let point = self.snap_to_grid_if_enabled(world);
        let pending = self.pending.get_or_insert_with(|| PendingShape {
            element_type,
            points: Vec::new(),
        });
        if pending.points.last() != Some(&point) {
            pending.points.push(point);
            tracing::debug!(points = pending.points.len(), "Added point to shape");
        }
    }

    fn begin_select_gesture(&mut self, world: Point, modifiers: Modifiers) {
        let additive = modifiers.additive();

        if let Some((id, index)) = self.handle_at(world) {
            self.input = InputState::DraggingHandle {
                id,
                index,
                moved: false,
                before: self.snapshot(),
            };
            return;
        }

        match self.hit_test(world).cloned() {
            Some(id) => {
                if additive {
                    self.select_element(&id, true);
                } else if !self.selection.contains(&id) {
                    self.select_element(&id, false);
                }
                if self.selection.contains(&id) {
                    self.input = InputState::DraggingElements {
                        start_world: world,
                        applied: Point::ZERO,
                        before: self.snapshot(),
                    };
                }
            }
            None => {
                self.input = InputState::RubberBand {
                    origin: world,
                    current: world,
                    additive,
                };
            }
        }
    }

    /// Control handle of a selected, unlocked element under `world`.
    fn handle_at(&self, world: Point) -> Option<(ElementId, usize)> {
        let state = InteractionState {
            selected: true,
            ..InteractionState::default()
        };
        self.store
            .iter_topmost_first()
            .filter(|e| e.selected && !e.locked)
            .find_map(|e| {
                render_with(e, state, self.handle_radius)
                    .handles
                    .iter()
                    .find(|h| h.contains(world, self.hit_tolerance))
                    .map(|h| (e.id.clone(), h.index))
            })
    }

    fn update_hover(&mut self, world: Point) {
        let hovered = self.hit_test(world).cloned();
        if hovered != self.hovered {
            self.hovered = hovered;
        }
    }

    fn finish_rubber_band(&mut self, band: Bounds, additive: bool) {
        let is_click = band.width() <= self.hit_tolerance && band.height() <= self.hit_tolerance;
        if is_click {
            if !additive {
                self.clear_selection();
            }
            return;
        }

        let hits: Vec<ElementId> = self
            .store
            .iter()
            .filter(|e| {
                render_with(e, InteractionState::default(), self.handle_radius)
                    .hit_region
                    .intersects_rect(&band)
            })
            .map(|e| e.id.clone())
            .collect();
        tracing::debug!(count = hits.len(), "Rubber band selection");

        let changed = if additive {
            self.selection.extend_ids(&mut self.store, &hits)
        } else {
            self.selection.select_ids(&mut self.store, &hits)
        };
        if changed {
            self.emit_selection_changed();
        }
    }
}
