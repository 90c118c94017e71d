//! Free-text filtering with parent/child propagation.
//!
//! Matching is case-insensitive substring containment, nothing fuzzier. A
//! candidate survives the filter when its own label matches, when any of its
//! children match (so the parent stays visible above them), or when any
//! ancestor matches (a matching parent keeps its whole subtree).

use crate::model::{Entry, ItemId};
use crate::normalize::ItemTable;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions<'a> {
    /// The free-text query. Empty means "keep everything".
    pub query: &'a str,
    /// Expansion state owned by the caller. When present, a child whose
    /// parent is not in this set is suppressed regardless of the query.
    pub expanded: Option<&'a HashSet<ItemId>>,
}

/// Narrows `candidates` by the query, keeping the input order. Returns a
/// subset of the input; never mutates anything.
pub fn filter_entries<'a>(
    table: &ItemTable,
    candidates: &[&'a Entry],
    options: &FilterOptions,
) -> Vec<&'a Entry> {
    let needle = options.query.to_lowercase();
    candidates
        .iter()
        .filter(|entry| {
            // Expansion gating comes first: an unexpanded parent hides its
            // children even when they match.
            if let (Some(parent), Some(expanded)) = (&entry.parent, options.expanded) {
                if !expanded.contains(parent) {
                    return false;
                }
            }

            if needle.is_empty() {
                return true;
            }

            if table
                .children_of(&entry.id)
                .iter()
                .any(|child| contains_fold(&child.label, &needle))
            {
                return true;
            }

            let hierarchy = table.hierarchy(entry);
            let ancestors = &hierarchy[..hierarchy.len() - 1];
            if ancestors.iter().any(|a| contains_fold(&a.label, &needle)) {
                return true;
            }

            contains_fold(&entry.label, &needle)
        })
        .copied()
        .collect()
}

/// Parents whose children match the query but which the caller has not yet
/// expanded. The caller adds these to its expansion set so matching options
/// become visible. Empty query means nothing needs expanding.
pub fn sections_to_expand(
    table: &ItemTable,
    query: &str,
    expanded: &HashSet<ItemId>,
) -> Vec<ItemId> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    table
        .entries()
        .iter()
        .filter(|entry| {
            !expanded.contains(&entry.id)
                && table
                    .children_of(&entry.id)
                    .iter()
                    .any(|child| contains_fold(&child.label, &needle))
        })
        .map(|entry| entry.id.clone())
        .collect()
}

fn contains_fold(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
