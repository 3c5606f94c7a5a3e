use crate::element_store::ElementStore;
use crate::model::ElementId;

/// Manages the selection set and keeps element `selected` flags in sync.
///
/// `SelectionManager` is responsible for:
/// - Single and additive (toggle) selection by id
/// - Replacing the selection wholesale, e.g. after a rubber-band gesture
/// - Pruning ids that no longer exist in the store
///
/// # Selection Model
///
/// The set is ordered by selection time; the most recently selected id is
/// the "primary" selection shown in property panels. Every id in the set
/// refers to a live element, and exactly those elements carry
/// `selected == true`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionManager {
    selected: Vec<ElementId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangekit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selected
    }

    /// Most recently selected id.
    pub fn primary(&self) -> Option<&ElementId> {
        self.selected.last()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selects one element.
    ///
    /// With `additive == false` the selection becomes exactly `{id}`; with
    /// `additive == true` membership of `id` is toggled and the rest is kept.
    /// Unknown ids leave the selection untouched.
    ///
    /// # Returns
    ///
    /// `true` if the selection changed.
    pub fn select_id(&mut self, store: &mut ElementStore, id: &ElementId, additive: bool) -> bool {
        if !store.contains(id) {
            return false;
        }
        let before = self.selected.clone();
        if additive {
            if let Some(index) = self.selected.iter().position(|s| s == id) {
                self.selected.remove(index);
            } else {
                self.selected.push(id.clone());
            }
        } else {
            self.selected = vec![id.clone()];
        }
        self.sync_flags(store);
        before != self.selected
    }

    /// Replaces the selection with the live ids from `ids`.
    pub fn select_ids(&mut self, store: &mut ElementStore, ids: &[ElementId]) -> bool {
        let before = std::mem::take(&mut self.selected);
        for id in ids {
            if store.contains(id) && !self.selected.contains(id) {
                self.selected.push(id.clone());
            }
        }
        self.sync_flags(store);
        before != self.selected
    }

    /// Adds the live ids from `ids` to the selection.
    pub fn extend_ids(&mut self, store: &mut ElementStore, ids: &[ElementId]) -> bool {
        let mut combined = self.selected.clone();
        combined.extend(ids.iter().cloned());
        self.select_ids(store, &combined)
    }

    /// Selects every element, in z-order.
    pub fn select_all(&mut self, store: &mut ElementStore) -> bool {
        let ids = store.ids();
        self.select_ids(store, &ids)
    }

    /// Deselects all elements.
    pub fn deselect_all(&mut self, store: &mut ElementStore) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        self.sync_flags(store);
        changed
    }

    /// Drops ids that no longer exist in `store`.
    ///
    /// # Returns
    ///
    /// `true` if anything was pruned.
    pub fn retain_live(&mut self, store: &mut ElementStore) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| store.contains(id));
        self.sync_flags(store);
        before != self.selected.len()
    }

    fn sync_flags(&self, store: &mut ElementStore) {
        for element in store.iter_mut() {
            element.selected = self.selected.contains(&element.id);
        }
    }
}
