//! regview - Registration catalog viewer core
//!
//! This library projects a flat, indexed catalog of registration records
//! (classes, program ids, interfaces, categories, elevation policies) into
//! alternative hierarchical views, filters the active view by label
//! pattern, resolves class-bearing branches lazily through an external
//! interface query, and renders identifiers for export.
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern: pure projection and
//! query logic with no I/O, no presentation concerns and no global state.
//! The record store, the interface resolver and the category-name lookup
//! are collaborator traits supplied by the embedding shell.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use regview::{
//!     ClassRecord, Guid, InterfaceRecord, InterfaceResolver, MatchMode, MemoryStore,
//!     QueryFailure, RegisteredCategories, ServerKind, ViewMode, ViewSession,
//! };
//!
//! struct NoInterfaces;
//!
//! impl InterfaceResolver for NoInterfaces {
//!     fn supported_interfaces(
//!         &self,
//!         _class: &ClassRecord,
//!         _force_refresh: bool,
//!     ) -> Result<Vec<Arc<InterfaceRecord>>, QueryFailure> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let mut store = MemoryStore::new();
//! store.add_class(ClassRecord::new(
//!     Guid::from_u128(1),
//!     "Widget Factory",
//!     ServerKind::InProcServer32,
//!     r"c:\widgets\widget.dll",
//! ));
//!
//! let mut session = ViewSession::open(
//!     ViewMode::ClassesByName,
//!     &store,
//!     &RegisteredCategories,
//!     Arc::new(NoInterfaces),
//! );
//! let visible = session.set_filter("widget", MatchMode::Contains, false).unwrap();
//! assert_eq!(visible.len(), 1);
//! ```

pub mod core;

// Re-export the public surface at the crate root
pub use crate::core::{
    apply_filter, build_view, describe, describe_category, describe_class, describe_interface,
    describe_policy, describe_prog_id, format_guid, glob_to_regex, placeholder, resolve_node,
    snapshot, snapshot_forest, CategoryNames, ClassRecord, ExpandOutcome, Guid, GuidStyle,
    InterfaceRecord, InterfaceResolver, LabelFilter, MatchMode, MemoryStore, NodePayload, NodeRef,
    NodeSnapshot, PolicyRecord, ProgIdRecord, QueryFailure, RecordStore, RegisteredCategories,
    ResolveState, Result, ServerKind, TreeNode, View, ViewMode, ViewSession, ViewerError,
    PLACEHOLDER_LABEL,
};
