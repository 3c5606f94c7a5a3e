//! Ordered element storage.
//!
//! Index order is z-order: the first element is painted first (bottom) and
//! the last is topmost. Ids are unique; [`ElementStore::insert_fresh`]
//! regenerates a colliding id.

use crate::model::{ElementId, StageElement};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStore {
    elements: Vec<StageElement>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an already validated, id-unique sequence.
    pub(crate) fn from_elements(elements: Vec<StageElement>) -> Self {
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends an element, regenerating its id until it is unique.
    ///
    /// Returns the index it landed at (always the top).
    pub fn insert_fresh(&mut self, mut element: StageElement) -> usize {
        while self.contains(&element.id) {
            element.id = ElementId::generate();
        }
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    pub fn get(&self, id: &ElementId) -> Option<&StageElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut StageElement> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    /// Removes every element whose id is in `ids`, keeping the order of the rest.
    pub fn remove_all(&mut self, ids: &[ElementId]) -> Vec<StageElement> {
        let (removed, kept) = std::mem::take(&mut self.elements)
            .into_iter()
            .partition(|e| ids.contains(&e.id));
        self.elements = kept;
        removed
    }

    /// Bottom-to-top (paint order).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &StageElement> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut StageElement> {
        self.elements.iter_mut()
    }

    /// Top-to-bottom (hit-test order).
    pub fn iter_topmost_first(&self) -> impl Iterator<Item = &StageElement> {
        self.elements.iter().rev()
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|e| e.id.clone()).collect()
    }

    pub fn as_slice(&self) -> &[StageElement] {
        &self.elements
    }

    /// Moves an element to the top of the z-order.
    pub fn bring_to_front(&mut self, id: &ElementId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let element = self.elements.remove(index);
                self.elements.push(element);
                true
            }
            None => false,
        }
    }

    /// Moves an element to the bottom of the z-order.
    pub fn send_to_back(&mut self, id: &ElementId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let element = self.elements.remove(index);
                self.elements.insert(0, element);
                true
            }
            None => false,
        }
    }
}
