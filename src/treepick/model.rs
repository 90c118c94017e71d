use serde::{Deserialize, Serialize};

/// Stable identifier for an item, unique across the whole flattened
/// collection (root items plus all nested options).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An item as supplied by the caller.
///
/// Collections may mix bare strings (the string doubles as id and label)
/// with structured records. Structured records may nest children under
/// `options` or point at a parent via `parentId`; the two shapes are
/// structurally equivalent and converge during normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawItem {
    Label(String),
    Item(RawEntry),
}

impl RawItem {
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        RawItem::Item(RawEntry::new(id, label))
    }
}

impl From<&str> for RawItem {
    fn from(label: &str) -> Self {
        RawItem::Label(label.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    pub id: String,

    pub label: String,

    /// Grouping key. Only meaningful on root items; nested options inherit
    /// their root's category implicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Parent link for the flat representation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Child items for the nested representation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<RawItem>,

    /// Persisted checked flag on an option. Captured into the engine's
    /// checked set at normalization; the engine never writes it back.
    #[serde(default)]
    pub checked: bool,
}

impl RawEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category: None,
            parent_id: None,
            options: Vec::new(),
            checked: false,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_options(mut self, options: Vec<RawItem>) -> Self {
        self.options = options;
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

impl From<RawEntry> for RawItem {
    fn from(entry: RawEntry) -> Self {
        RawItem::Item(entry)
    }
}

/// A normalized item record. Every accepted input shape flattens to this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: ItemId,
    pub parent: Option<ItemId>,
    pub category: Option<String>,
    pub label: String,
}

impl Entry {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Grouping key for a partition of root items.
///
/// `Uncategorized` is a real group key, distinguishable from any named
/// category (items without a `category` field render together under it).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Named(String),
    Uncategorized,
}

impl CategoryKey {
    /// The category name, or `None` for the uncategorized group.
    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryKey::Named(name) => Some(name),
            CategoryKey::Uncategorized => None,
        }
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryKey::Named(name) => write!(f, "{}", name),
            CategoryKey::Uncategorized => write!(f, "(uncategorized)"),
        }
    }
}

/// Tri-state selection status of an item.
///
/// `Indeterminate` applies to parents with some but not all child options
/// checked. It is always computed from the checked set, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Unselected,
    Selected,
    Indeterminate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_item_deserializes_bare_strings_and_objects() {
        let json = r#"["Apple", {"id": "b", "label": "Banana", "category": "fruit"}]"#;
        let items: Vec<RawItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0], RawItem::Label(s) if s == "Apple"));
        match &items[1] {
            RawItem::Item(entry) => {
                assert_eq!(entry.id, "b");
                assert_eq!(entry.category.as_deref(), Some("fruit"));
            }
            other => panic!("expected structured item, got {:?}", other),
        }
    }

    #[test]
    fn raw_entry_accepts_camel_case_parent_and_checked() {
        let json = r#"{"id": "c1", "label": "Child", "parentId": "p", "checked": true}"#;
        let entry: RawEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.parent_id.as_deref(), Some("p"));
        assert!(entry.checked);
    }

    #[test]
    fn nested_options_deserialize_recursively() {
        let json = r#"{"id": "p", "label": "Parent", "options": ["a", {"id": "b", "label": "B"}]}"#;
        let entry: RawEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.options.len(), 2);
    }

    #[test]
    fn category_key_name() {
        assert_eq!(CategoryKey::Named("fruit".into()).name(), Some("fruit"));
        assert_eq!(CategoryKey::Uncategorized.name(), None);
    }
}
