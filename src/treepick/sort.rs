//! Hierarchy-aware ordering.
//!
//! Two entries are compared by walking their ancestor chains level by level
//! from the root: an ancestor always precedes its own descendants, a selected
//! node beats an unselected one at every level (not just at the leaf), and
//! remaining ties fall to a numeric-aware natural comparison of the labels,
//! so `"Option 2"` sorts before `"Option 10"`.

use crate::model::{Entry, ItemId};
use crate::normalize::ItemTable;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Base string comparator: `(a, b, locale) -> Ordering`. The locale tag is
/// forwarded untouched for caller-supplied comparators that want it.
pub type ItemComparator<'a> = dyn Fn(&str, &str, &str) -> Ordering + 'a;

#[derive(Clone, Copy)]
pub struct SortOptions<'a> {
    /// Ids currently in the selection set; these sort first.
    pub selected: &'a HashSet<ItemId>,
    /// Base comparator override. `None` means [`compare_natural`].
    pub compare: Option<&'a ItemComparator<'a>>,
    pub locale: &'a str,
}

impl<'a> SortOptions<'a> {
    pub fn new(selected: &'a HashSet<ItemId>) -> Self {
        Self {
            selected,
            compare: None,
            locale: "en",
        }
    }
}

/// Numeric-aware natural comparison. Digit runs compare by value, text runs
/// case-insensitively; a full raw comparison breaks any remaining tie so the
/// order is total and deterministic.
pub fn compare_natural(a: &str, b: &str, _locale: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();
    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let run_a = take_digit_run(&mut ca);
                    let run_b = take_digit_run(&mut cb);
                    let ord = compare_digit_runs(&run_a, &run_b);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    let fx: Vec<char> = x.to_lowercase().collect();
                    let fy: Vec<char> = y.to_lowercase().collect();
                    let ord = fx.cmp(&fy);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                    ca.next();
                    cb.next();
                }
            }
        }
    }
}

fn take_digit_run(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut run = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

// Compare by value without parsing: strip leading zeros, then longer run is
// larger, then digit order decides.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Sorts `entries` in place. Stable: order-equivalent entries keep their
/// relative positions.
pub fn sort_entries<'a>(table: &'a ItemTable, entries: &mut [&'a Entry], options: &SortOptions) {
    entries.sort_by(|a, b| compare_in_hierarchy(table, *a, *b, options));
}

fn compare_in_hierarchy<'a>(
    table: &'a ItemTable,
    a: &'a Entry,
    b: &'a Entry,
    options: &SortOptions,
) -> Ordering {
    let chain_a = table.hierarchy(a);
    let chain_b = table.hierarchy(b);
    let depth = chain_a.len().max(chain_b.len());

    for level in 0..depth {
        match (chain_a.get(level), chain_b.get(level)) {
            // One chain ran out: the shorter one is the ancestor and goes
            // first.
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(node_a), Some(node_b)) => {
                if node_a.id == node_b.id {
                    continue;
                }
                let sel_a = options.selected.contains(&node_a.id);
                let sel_b = options.selected.contains(&node_b.id);
                match (sel_a, sel_b) {
                    (true, false) => return Ordering::Less,
                    (false, true) => return Ordering::Greater,
                    _ => {}
                }
                let ord = match options.compare {
                    Some(cmp) => cmp(&node_a.label, &node_b.label, options.locale),
                    None => compare_natural(&node_a.label, &node_b.label, options.locale),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (None, None) => unreachable!("level bounded by the longer chain"),
        }
    }
    Ordering::Equal
}
