//! Input normalization.
//!
//! Every accepted input shape — bare strings, flat records linked by
//! `parentId`, nested records carrying `options` — is flattened here, once,
//! into an [`ItemTable`]: entries in first-seen order plus an id index.
//! Validation (id uniqueness, parent existence, acyclicity) also happens
//! here, so the rest of the crate only ever operates on a well-formed tree.

use crate::error::{Result, TreepickError};
use crate::model::{Entry, ItemId, RawItem};
use std::collections::HashMap;
use tracing::debug;

/// The result of normalizing a caller-supplied collection: the flattened
/// table plus the ids of options that arrived with `checked: true`.
#[derive(Debug)]
pub struct Normalized {
    pub table: ItemTable,
    pub checked: Vec<ItemId>,
}

/// Flat table of normalized entries with an id index.
///
/// Entries keep their first-seen order (roots interleaved with their nested
/// options, parents before those options). The table is immutable once
/// built; a new collection means a new table.
#[derive(Debug, Clone)]
pub struct ItemTable {
    entries: Vec<Entry>,
    index: HashMap<ItemId, usize>,
}

impl ItemTable {
    fn from_entries(entries: Vec<Entry>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.id.clone(), i).is_some() {
                return Err(TreepickError::DuplicateId(entry.id.clone()));
            }
        }
        let table = Self { entries, index };
        table.validate_parents()?;
        Ok(table)
    }

    /// Parents must exist, and parent chains must terminate. The flat
    /// representation can express both dangling links and cycles; neither
    /// survives normalization.
    fn validate_parents(&self) -> Result<()> {
        for entry in &self.entries {
            if let Some(parent) = &entry.parent {
                if !self.index.contains_key(parent) {
                    return Err(TreepickError::UnknownParent {
                        child: entry.id.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        for entry in &self.entries {
            let mut steps = 0;
            let mut current = entry;
            while let Some(parent) = &current.parent {
                steps += 1;
                if steps > self.entries.len() {
                    return Err(TreepickError::ParentCycle(entry.id.clone()));
                }
                current = &self.entries[self.index[parent]];
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&Entry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Root entries in first-seen order.
    pub fn roots(&self) -> Vec<&Entry> {
        self.entries.iter().filter(|e| e.is_root()).collect()
    }

    /// Direct children of `id`, in first-seen order.
    pub fn children_of(&self, id: &ItemId) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| e.parent.as_ref() == Some(id))
            .collect()
    }

    pub fn has_children(&self, id: &ItemId) -> bool {
        self.entries.iter().any(|e| e.parent.as_ref() == Some(id))
    }

    pub fn parent_of(&self, id: &ItemId) -> Option<&Entry> {
        self.get(id)
            .and_then(|e| e.parent.as_ref())
            .and_then(|p| self.get(p))
    }

    /// The ancestor chain of `entry`, root first, `entry` last.
    pub fn hierarchy<'a>(&'a self, entry: &'a Entry) -> Vec<&'a Entry> {
        let mut chain = vec![entry];
        let mut current = entry;
        while let Some(parent) = current.parent.as_ref().and_then(|p| self.get(p)) {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }
}

/// Flattens and validates a caller-supplied collection.
pub fn normalize(items: &[RawItem]) -> Result<Normalized> {
    let mut entries = Vec::new();
    let mut checked = Vec::new();
    for item in items {
        flatten(item, None, &mut entries, &mut checked);
    }
    let table = ItemTable::from_entries(entries)?;
    debug!(
        items = table.len(),
        roots = table.roots().len(),
        checked = checked.len(),
        "normalized item collection"
    );
    Ok(Normalized { table, checked })
}

/// Flattens a JSON array of items. Accepts the same shapes as [`normalize`].
pub fn normalize_json(json: &str) -> Result<Normalized> {
    let items: Vec<RawItem> = serde_json::from_str(json)?;
    normalize(&items)
}

fn flatten(
    item: &RawItem,
    parent: Option<&ItemId>,
    entries: &mut Vec<Entry>,
    checked: &mut Vec<ItemId>,
) {
    match item {
        // A bare string is a leaf whose id doubles as its label.
        RawItem::Label(label) => entries.push(Entry {
            id: ItemId::new(label.clone()),
            parent: parent.cloned(),
            category: None,
            label: label.clone(),
        }),
        RawItem::Item(raw) => {
            let id = ItemId::new(raw.id.clone());
            // Nesting wins over a flat parentId link; an item can't have two
            // parents.
            let parent_id = parent
                .cloned()
                .or_else(|| raw.parent_id.as_deref().map(ItemId::from));
            if raw.checked && parent_id.is_some() {
                checked.push(id.clone());
            }
            entries.push(Entry {
                id: id.clone(),
                parent: parent_id,
                // Category applies to roots only; options inherit implicitly.
                category: if parent.is_none() && raw.parent_id.is_none() {
                    raw.category.clone()
                } else {
                    None
                },
                label: raw.label.clone(),
            });
            for option in &raw.options {
                flatten(option, Some(&id), entries, checked);
            }
        }
    }
}
