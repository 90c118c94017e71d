//! Category grouping.
//!
//! Partitions root entries by their `category` field. Order within a group
//! is first-seen order; the groups themselves are ordered by a comparator
//! (default: lexicographic on the category name, with the uncategorized
//! group last).

use crate::model::{CategoryKey, Entry};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Comparator over group keys. Callers supply one to pin an explicit
/// category order.
pub type CategoryComparator<'a> = dyn Fn(&CategoryKey, &CategoryKey) -> Ordering + 'a;

/// Default group order: named categories lexicographically, the
/// uncategorized group after all of them.
pub fn default_category_order(a: &CategoryKey, b: &CategoryKey) -> Ordering {
    match (a, b) {
        (CategoryKey::Named(a), CategoryKey::Named(b)) => a.cmp(b),
        (CategoryKey::Named(_), CategoryKey::Uncategorized) => Ordering::Less,
        (CategoryKey::Uncategorized, CategoryKey::Named(_)) => Ordering::Greater,
        (CategoryKey::Uncategorized, CategoryKey::Uncategorized) => Ordering::Equal,
    }
}

/// Partitions `entries` into ordered category groups.
///
/// Pure function of its inputs: entries are borrowed, never cloned or
/// reordered inside their group.
pub fn group_by_category<'a>(
    entries: &[&'a Entry],
    comparator: Option<&CategoryComparator>,
) -> Vec<(CategoryKey, Vec<&'a Entry>)> {
    let mut groups: Vec<(CategoryKey, Vec<&'a Entry>)> = Vec::new();
    let mut positions: HashMap<CategoryKey, usize> = HashMap::new();

    for entry in entries {
        let key = match &entry.category {
            Some(name) => CategoryKey::Named(name.clone()),
            None => CategoryKey::Uncategorized,
        };
        match positions.get(&key) {
            Some(&i) => groups[i].1.push(entry),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, vec![entry]));
            }
        }
    }

    match comparator {
        Some(cmp) => groups.sort_by(|(a, _), (b, _)| cmp(a, b)),
        None => groups.sort_by(|(a, _), (b, _)| default_category_order(a, b)),
    }
    groups
}
