//! # Treepick Architecture
//!
//! Treepick is a **UI-agnostic selection engine**. It implements the data
//! transformations behind nested multi-select controls — grouping, filtering,
//! sorting, and tri-state selection — without rendering anything. The hosting
//! UI (a terminal widget, a web component, a desktop toolkit) owns events,
//! expansion state, and presentation; this crate owns the item model and the
//! rules.
//!
//! ## The pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Caller / UI layer                                          │
//! │  - supplies items (strings, flat parentId, nested options)  │
//! │  - owns expansion state, debounce timing, rendering         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API facade (api.rs)                                        │
//! │  - Picker: owns the item table and selection state          │
//! │  - toggle / toggle_option / clear_all, change notification  │
//! │  - view(): group → filter → sort → per-item state           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Logic layer (group.rs, filter.rs, sort.rs, selection.rs)   │
//! │  - Pure functions over normalized entries                   │
//! │  - No I/O, no timers, no assumptions about the caller       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Normalization layer (normalize.rs)                         │
//! │  - Flattens every accepted input shape into an ItemTable    │
//! │  - Validates ids, parent links, and acyclicity once         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key principle: one internal representation
//!
//! Callers may hand over bare strings, flat records linked by `parentId`, or
//! nested records carrying `options`. All of it converges on a single flat
//! [`normalize::ItemTable`] at the API boundary, so the grouping, filtering,
//! sorting, and selection algorithms only ever see one shape:
//! `{id, parent, category, label}`.
//!
//! ## Key principle: the engine owns derived state
//!
//! Selection and checked flags live inside the engine, keyed by stable ids.
//! Caller-supplied items are never mutated, and membership tests never rely
//! on structural equality — two engines can safely share one item collection.
//!
//! ## Module overview
//!
//! - [`api`]: the [`api::Picker`] facade — entry point for all operations
//! - [`normalize`]: input flattening and validation
//! - [`group`]: category partitioning
//! - [`filter`]: substring filtering with parent/child propagation
//! - [`sort`]: hierarchy-aware, selection-first, numeric-aware ordering
//! - [`selection`]: the selection state machine
//! - [`model`]: core data types (`ItemId`, `RawItem`, `Entry`, `ItemState`)
//! - [`error`]: error types

pub mod api;
pub mod error;
pub mod filter;
pub mod group;
pub mod model;
pub mod normalize;
pub mod selection;
pub mod sort;
