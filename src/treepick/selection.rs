//! The selection state machine.
//!
//! Two sets, both owned by the engine and keyed by stable ids:
//!
//! - the **selection set**: selected root/leaf items, in selection order;
//! - the **checked set**: child options whose checkbox is on.
//!
//! Caller items are never mutated. A parent's indeterminate state is derived
//! from the checked set on demand, never stored.

use crate::model::{ItemId, ItemState};
use crate::normalize::ItemTable;
use std::collections::HashSet;
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Vec<ItemId>,
    checked: HashSet<ItemId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the state from caller-supplied initial selections and the
    /// `checked: true` flags captured during normalization.
    pub fn with_initial(
        selected: impl IntoIterator<Item = ItemId>,
        checked: impl IntoIterator<Item = ItemId>,
    ) -> Self {
        let mut state = Self::new();
        for id in selected {
            state.select(id);
        }
        state.checked = checked.into_iter().collect();
        state
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn is_checked(&self, id: &ItemId) -> bool {
        self.checked.contains(id)
    }

    /// Selected items in selection order.
    pub fn selected(&self) -> &[ItemId] {
        &self.selected
    }

    /// Selection set as a hash set, for the sort's membership tests.
    pub fn selected_set(&self) -> HashSet<ItemId> {
        self.selected.iter().cloned().collect()
    }

    pub fn checked(&self) -> &HashSet<ItemId> {
        &self.checked
    }

    /// Adds to the selection set; a no-op when already present.
    pub fn select(&mut self, id: ItemId) {
        if !self.is_selected(&id) {
            trace!(item = %id, "select");
            self.selected.push(id);
        }
    }

    pub fn deselect(&mut self, id: &ItemId) {
        if self.is_selected(id) {
            trace!(item = %id, "deselect");
            self.selected.retain(|s| s != id);
        }
    }

    /// Flips selection membership. Returns `true` when the item ends up
    /// selected. Unknown ids just take the select branch; there is no
    /// invalid-input failure mode.
    pub fn toggle_selected(&mut self, id: ItemId) -> bool {
        if self.is_selected(&id) {
            self.deselect(&id);
            false
        } else {
            self.select(id);
            true
        }
    }

    pub fn set_checked(&mut self, id: ItemId, on: bool) {
        if on {
            self.checked.insert(id);
        } else {
            self.checked.remove(&id);
        }
    }

    /// Flips checked membership. Returns `true` when the option ends up
    /// checked.
    pub fn toggle_checked(&mut self, id: ItemId) -> bool {
        if self.checked.remove(&id) {
            trace!(item = %id, "uncheck");
            false
        } else {
            trace!(item = %id, "check");
            self.checked.insert(id);
            true
        }
    }

    /// Empties both sets.
    pub fn clear(&mut self) {
        trace!(
            selected = self.selected.len(),
            checked = self.checked.len(),
            "clear selection"
        );
        self.selected.clear();
        self.checked.clear();
    }

    /// Tri-state status: selected when in the selection set; indeterminate
    /// when a parent has some but not all children checked; unselected
    /// otherwise.
    pub fn state_of(&self, table: &ItemTable, id: &ItemId) -> ItemState {
        if self.is_selected(id) {
            return ItemState::Selected;
        }
        let children = table.children_of(id);
        if !children.is_empty() {
            let on = children.iter().filter(|c| self.is_checked(&c.id)).count();
            if on > 0 && on < children.len() {
                return ItemState::Indeterminate;
            }
        }
        ItemState::Unselected
    }

    /// Number of effective selections: checked options count individually
    /// under a selected parent; anything else counts as one.
    pub fn selection_count(&self, table: &ItemTable) -> usize {
        self.selected
            .iter()
            .map(|id| {
                let children = table.children_of(id);
                if children.is_empty() {
                    1
                } else {
                    children.iter().filter(|c| self.is_checked(&c.id)).count()
                }
            })
            .sum()
    }
}
