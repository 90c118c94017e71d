//! # API Facade
//!
//! [`Picker`] is the single entry point the hosting UI talks to. It owns the
//! normalized item table and the selection state, dispatches toggles to the
//! right transition, and exposes the grouped/filtered/sorted view as plain
//! data.
//!
//! The facade holds no business rules of its own: grouping, filtering,
//! sorting, and state transitions live in their modules; this layer wires
//! them together and handles change notification.
//!
//! ## What the facade does NOT do
//!
//! - **Rendering**: [`Picker::view`] returns data, never markup.
//! - **Event handling**: the caller translates clicks/keys into calls here.
//! - **Expansion tracking**: open/closed sections belong to the caller and
//!   are passed in per call ([`Picker::sections_to_expand`] helps keep them
//!   in sync with the query).
//! - **Timing**: no debounce, no timers; every call runs synchronously to
//!   completion.

use crate::error::Result;
use crate::filter::{self, FilterOptions};
use crate::group;
use crate::model::{CategoryKey, Entry, ItemId, ItemState, RawItem};
use crate::normalize::{self, ItemTable, Normalized};
use crate::selection::SelectionState;
use crate::sort::{self, SortOptions};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Snapshot handed to the change callback after every mutating operation.
/// Fully computed before the callback runs, so observers never see a
/// half-applied transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub selected_items: Vec<ItemId>,
}

type ChangeCallback = Box<dyn FnMut(&SelectionChange)>;

/// A root item with its computed state and (when expanded) its visible
/// options, ready for the caller to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: ItemId,
    pub label: String,
    pub state: ItemState,
    pub expanded: bool,
    pub options: Vec<ItemView>,
}

/// One category section of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub category: CategoryKey,
    pub items: Vec<ItemView>,
}

/// The selection engine facade.
pub struct Picker {
    table: ItemTable,
    state: SelectionState,
    locale: String,
    category_order: Option<Box<dyn Fn(&CategoryKey, &CategoryKey) -> Ordering>>,
    compare_items: Option<Box<dyn Fn(&str, &str, &str) -> Ordering>>,
    on_change: Option<ChangeCallback>,
}

impl Picker {
    /// Builds a picker over a caller-supplied collection with nothing
    /// selected (beyond any `checked: true` flags on the items themselves).
    pub fn new(items: &[RawItem]) -> Result<Self> {
        Self::with_initial_selected(items, &[])
    }

    /// Builds a picker with a pre-selected set of items.
    pub fn with_initial_selected(items: &[RawItem], initial: &[ItemId]) -> Result<Self> {
        let Normalized { table, checked } = normalize::normalize(items)?;
        Ok(Self::assemble(table, initial.to_vec(), checked))
    }

    /// Builds a picker from a JSON array of items.
    pub fn from_json(json: &str) -> Result<Self> {
        let Normalized { table, checked } = normalize::normalize_json(json)?;
        Ok(Self::assemble(table, Vec::new(), checked))
    }

    fn assemble(table: ItemTable, initial: Vec<ItemId>, checked: Vec<ItemId>) -> Self {
        debug!(items = table.len(), initial = initial.len(), "picker ready");
        Self {
            state: SelectionState::with_initial(initial, checked),
            table,
            locale: "en".to_string(),
            category_order: None,
            compare_items: None,
            on_change: None,
        }
    }

    /// Locale tag forwarded to the base comparator.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// Pins an explicit category order for [`Picker::view`].
    pub fn set_category_order(
        &mut self,
        comparator: impl Fn(&CategoryKey, &CategoryKey) -> Ordering + 'static,
    ) {
        self.category_order = Some(Box::new(comparator));
    }

    /// Overrides the base string comparator used by the sort.
    pub fn set_compare_items(
        &mut self,
        comparator: impl Fn(&str, &str, &str) -> Ordering + 'static,
    ) {
        self.compare_items = Some(Box::new(comparator));
    }

    /// Registers the change callback, invoked with the selected-items
    /// snapshot after every mutating operation.
    pub fn on_change(&mut self, callback: impl FnMut(&SelectionChange) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn table(&self) -> &ItemTable {
        &self.table
    }

    /// Selected items in selection order.
    pub fn selected_items(&self) -> &[ItemId] {
        self.state.selected()
    }

    pub fn is_checked(&self, id: &ItemId) -> bool {
        self.state.is_checked(id)
    }

    pub fn state_of(&self, id: &ItemId) -> ItemState {
        self.state.state_of(&self.table, id)
    }

    /// Effective selection count for a badge: checked options count one by
    /// one, plain selected items count once.
    pub fn selection_count(&self) -> usize {
        self.state.selection_count(&self.table)
    }

    /// Toggles an item.
    ///
    /// - A child option delegates to [`Picker::toggle_option`].
    /// - A parent flips between fully selected (all options checked) and
    ///   fully unselected.
    /// - Anything else flips plain selection membership, including ids the
    ///   table has never seen — toggling is total.
    pub fn toggle(&mut self, id: &ItemId) {
        if self.table.get(id).is_some_and(|e| e.parent.is_some()) {
            self.toggle_option(id);
            return;
        }
        let children: Vec<ItemId> = self
            .table
            .children_of(id)
            .iter()
            .map(|c| c.id.clone())
            .collect();
        if children.is_empty() {
            self.state.toggle_selected(id.clone());
        } else if self.state.is_selected(id) {
            self.state.deselect(id);
            for child in children {
                self.state.set_checked(child, false);
            }
        } else {
            self.state.select(id.clone());
            for child in children {
                self.state.set_checked(child, true);
            }
        }
        self.notify();
    }

    /// Toggles a single option checkbox and recomputes its parent: all
    /// siblings checked selects the parent, none deselects it, anything in
    /// between leaves the parent out of the selection set (it reads as
    /// indeterminate through [`Picker::state_of`]).
    pub fn toggle_option(&mut self, id: &ItemId) {
        let Some(parent) = self.table.get(id).and_then(|e| e.parent.clone()) else {
            self.toggle(id);
            return;
        };
        self.state.toggle_checked(id.clone());

        let siblings = self.table.children_of(&parent);
        let checked = siblings
            .iter()
            .filter(|c| self.state.is_checked(&c.id))
            .count();
        if checked == siblings.len() {
            self.state.select(parent);
        } else {
            self.state.deselect(&parent);
        }
        self.notify();
    }

    /// Empties the selection and checked sets.
    pub fn clear_all(&mut self) {
        self.state.clear();
        self.notify();
    }

    /// Parents worth force-expanding so options matching `query` become
    /// visible. See [`filter::sections_to_expand`].
    pub fn sections_to_expand(&self, query: &str, expanded: &HashSet<ItemId>) -> Vec<ItemId> {
        filter::sections_to_expand(&self.table, query, expanded)
    }

    /// The full render pipeline as data: group roots by category, filter
    /// each group by the query, sort with selection priority, and attach
    /// per-item state. Options appear under their root only when the caller
    /// has expanded it; they are filtered and sorted the same way. Groups
    /// left empty by the filter are dropped.
    pub fn view(&self, query: &str, expanded: &HashSet<ItemId>) -> Vec<GroupView> {
        let roots = self.table.roots();
        let groups = group::group_by_category(&roots, self.category_order.as_deref());
        let selected = self.state.selected_set();
        let sort_options = SortOptions {
            selected: &selected,
            compare: self.compare_items.as_deref(),
            locale: &self.locale,
        };

        let mut view = Vec::new();
        for (category, members) in groups {
            let mut kept = filter::filter_entries(
                &self.table,
                &members,
                &FilterOptions {
                    query,
                    expanded: None,
                },
            );
            if kept.is_empty() {
                continue;
            }
            sort::sort_entries(&self.table, &mut kept, &sort_options);
            let items = kept
                .iter()
                .map(|root| self.root_view(root, query, expanded, &sort_options))
                .collect();
            view.push(GroupView { category, items });
        }
        view
    }

    fn root_view(
        &self,
        root: &Entry,
        query: &str,
        expanded: &HashSet<ItemId>,
        sort_options: &SortOptions,
    ) -> ItemView {
        let is_expanded = expanded.contains(&root.id);
        let options = if is_expanded {
            let children = self.table.children_of(&root.id);
            let mut kept = filter::filter_entries(
                &self.table,
                &children,
                &FilterOptions {
                    query,
                    expanded: None,
                },
            );
            sort::sort_entries(&self.table, &mut kept, sort_options);
            kept.iter()
                .map(|child| ItemView {
                    id: child.id.clone(),
                    label: child.label.clone(),
                    state: if self.state.is_checked(&child.id) {
                        ItemState::Selected
                    } else {
                        ItemState::Unselected
                    },
                    expanded: false,
                    options: Vec::new(),
                })
                .collect()
        } else {
            Vec::new()
        };

        ItemView {
            id: root.id.clone(),
            label: root.label.clone(),
            state: self.state.state_of(&self.table, &root.id),
            expanded: is_expanded,
            options,
        }
    }

    fn notify(&mut self) {
        let change = SelectionChange {
            selected_items: self.state.selected().to_vec(),
        };
        if let Some(callback) = self.on_change.as_mut() {
            callback(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawEntry;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn grocery_items() -> Vec<RawItem> {
        vec![
            RawEntry::new("produce", "Produce")
                .with_category("food")
                .with_options(vec![
                    RawItem::leaf("kale", "Kale"),
                    RawItem::leaf("plum", "Plum"),
                ])
                .into(),
            RawEntry::new("bread", "Bread").with_category("food").into(),
            RawItem::leaf("soap", "Soap"),
        ]
    }

    #[test]
    fn toggling_a_leaf_flips_membership() {
        let mut picker = Picker::new(&grocery_items()).unwrap();
        picker.toggle(&"bread".into());
        assert_eq!(picker.selected_items(), &[ItemId::from("bread")]);
        picker.toggle(&"bread".into());
        assert!(picker.selected_items().is_empty());
    }

    #[test]
    fn toggling_a_parent_cascades_to_children() {
        let mut picker = Picker::new(&grocery_items()).unwrap();
        picker.toggle(&"produce".into());
        assert_eq!(picker.state_of(&"produce".into()), ItemState::Selected);
        assert!(picker.is_checked(&"kale".into()));
        assert!(picker.is_checked(&"plum".into()));

        picker.toggle(&"produce".into());
        assert_eq!(picker.state_of(&"produce".into()), ItemState::Unselected);
        assert!(!picker.is_checked(&"kale".into()));
        assert!(!picker.is_checked(&"plum".into()));
    }

    #[test]
    fn toggling_a_partially_checked_parent_selects_everything() {
        let mut picker = Picker::new(&grocery_items()).unwrap();
        picker.toggle_option(&"kale".into());
        assert_eq!(picker.state_of(&"produce".into()), ItemState::Indeterminate);

        picker.toggle(&"produce".into());
        assert_eq!(picker.state_of(&"produce".into()), ItemState::Selected);
        assert!(picker.is_checked(&"plum".into()));
    }

    #[test]
    fn toggling_a_child_routes_through_toggle() {
        let mut picker = Picker::new(&grocery_items()).unwrap();
        // toggle() on a child behaves exactly like toggle_option().
        picker.toggle(&"kale".into());
        assert!(picker.is_checked(&"kale".into()));
        assert_eq!(picker.state_of(&"produce".into()), ItemState::Indeterminate);
    }

    #[test]
    fn checking_every_option_selects_the_parent() {
        let mut picker = Picker::new(&grocery_items()).unwrap();
        picker.toggle_option(&"kale".into());
        picker.toggle_option(&"plum".into());
        assert_eq!(picker.state_of(&"produce".into()), ItemState::Selected);

        picker.toggle_option(&"plum".into());
        assert_eq!(picker.state_of(&"produce".into()), ItemState::Indeterminate);

        picker.toggle_option(&"kale".into());
        assert_eq!(picker.state_of(&"produce".into()), ItemState::Unselected);
    }

    #[test]
    fn toggling_an_unknown_id_still_flips() {
        let mut picker = Picker::new(&grocery_items()).unwrap();
        picker.toggle(&"ghost".into());
        assert_eq!(picker.selected_items(), &[ItemId::from("ghost")]);
        picker.toggle(&"ghost".into());
        assert!(picker.selected_items().is_empty());
    }

    #[test]
    fn clear_all_resets_selection_and_checked_state() {
        let mut picker = Picker::new(&grocery_items()).unwrap();
        picker.toggle(&"produce".into());
        picker.toggle(&"soap".into());
        picker.clear_all();
        assert!(picker.selected_items().is_empty());
        assert!(!picker.is_checked(&"kale".into()));
        assert_eq!(picker.selection_count(), 0);
    }

    #[test]
    fn change_callback_sees_the_full_snapshot() {
        let seen: Rc<RefCell<Vec<Vec<ItemId>>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut picker = Picker::new(&grocery_items()).unwrap();
        picker.on_change(move |change| sink.borrow_mut().push(change.selected_items.clone()));

        picker.toggle(&"bread".into());
        picker.toggle(&"soap".into());
        picker.clear_all();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], vec![ItemId::from("bread")]);
        assert_eq!(
            seen[1],
            vec![ItemId::from("bread"), ItemId::from("soap")]
        );
        assert!(seen[2].is_empty());
    }

    #[test]
    fn selection_count_mixes_options_and_plain_items() {
        let mut picker = Picker::new(&grocery_items()).unwrap();
        picker.toggle(&"produce".into()); // two checked options
        picker.toggle(&"soap".into()); // one plain item
        assert_eq!(picker.selection_count(), 3);
    }

    #[test]
    fn initial_selection_and_checked_flags_are_seeded() {
        let items = vec![
            RawItem::from(RawEntry::new("p", "Parent").with_options(vec![
                RawEntry::new("c1", "Child 1").with_checked(true).into(),
                RawItem::leaf("c2", "Child 2"),
            ])),
            RawItem::leaf("solo", "Solo"),
        ];
        let picker =
            Picker::with_initial_selected(&items, &[ItemId::from("solo")]).unwrap();
        assert!(picker.is_checked(&"c1".into()));
        assert_eq!(picker.state_of(&"p".into()), ItemState::Indeterminate);
        assert_eq!(picker.selected_items(), &[ItemId::from("solo")]);
    }

    #[test]
    fn view_groups_filters_sorts_and_states() {
        let mut picker = Picker::new(&grocery_items()).unwrap();
        picker.toggle(&"bread".into());

        let expanded: HashSet<ItemId> = [ItemId::from("produce")].into_iter().collect();
        let view = picker.view("", &expanded);

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].category, CategoryKey::Named("food".into()));
        // Selected Bread sorts ahead of Produce.
        let food: Vec<_> = view[0].items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(food, vec!["Bread", "Produce"]);
        assert_eq!(view[0].items[0].state, ItemState::Selected);

        let produce = &view[0].items[1];
        assert!(produce.expanded);
        let options: Vec<_> = produce.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(options, vec!["Kale", "Plum"]);

        assert_eq!(view[1].category, CategoryKey::Uncategorized);
    }

    #[test]
    fn view_drops_groups_emptied_by_the_filter() {
        let picker = Picker::new(&grocery_items()).unwrap();
        let view = picker.view("soap", &HashSet::new());
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].category, CategoryKey::Uncategorized);
    }

    #[test]
    fn view_respects_a_pinned_category_order() {
        let mut picker = Picker::new(&grocery_items()).unwrap();
        picker.set_category_order(|a, b| match (a, b) {
            (CategoryKey::Uncategorized, _) => Ordering::Less,
            (_, CategoryKey::Uncategorized) => Ordering::Greater,
            (a, b) => a.name().cmp(&b.name()),
        });
        let view = picker.view("", &HashSet::new());
        assert_eq!(view[0].category, CategoryKey::Uncategorized);
    }

    #[test]
    fn from_json_builds_a_working_picker() {
        let json = r#"[
            {"id": "p", "label": "Parent",
             "options": [{"id": "c", "label": "Child", "checked": true}]}
        ]"#;
        let picker = Picker::from_json(json).unwrap();
        assert_eq!(picker.state_of(&"p".into()), ItemState::Indeterminate);

        assert!(Picker::from_json("not json").is_err());
    }
}
