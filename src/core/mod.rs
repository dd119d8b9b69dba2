//! Core engine for the regview registration catalog viewer
//!
//! # Architecture
//!
//! - `records`: the closed record model and node payload variant
//! - `error`: error taxonomy using thiserror
//! - `store`: collaborator seams (`RecordStore`, `InterfaceResolver`,
//!   `CategoryNames`) and the in-memory reference store
//! - `tree`: shared tree nodes, resolution states, forest snapshots
//! - `views`: projection of the store into the ten view shapes
//! - `resolver`: lazy, cacheable branch resolution on expansion
//! - `filter`: pattern compilation and baseline-preserving application
//! - `format`: identifier rendering for export
//! - `describe`: per-record multi-line summaries
//! - `session`: the per-view facade the presentation shell drives

pub mod describe;
pub mod error;
pub mod filter;
pub mod format;
pub mod records;
pub mod resolver;
pub mod session;
pub mod store;
pub mod tree;
pub mod views;

// Re-export commonly used types
pub use describe::{
    describe, describe_category, describe_class, describe_interface, describe_policy,
    describe_prog_id,
};
pub use error::{Result, ViewerError};
pub use filter::{apply_filter, glob_to_regex, LabelFilter, MatchMode};
pub use format::{format_guid, GuidStyle};
pub use records::{
    ClassRecord, Guid, InterfaceRecord, NodePayload, PolicyRecord, ProgIdRecord, ServerKind,
};
pub use resolver::{resolve_node, ExpandOutcome};
pub use session::ViewSession;
pub use store::{
    CategoryNames, InterfaceResolver, MemoryStore, QueryFailure, RecordStore,
    RegisteredCategories,
};
pub use tree::{
    placeholder, snapshot, snapshot_forest, NodeRef, NodeSnapshot, ResolveState, TreeNode, View,
    PLACEHOLDER_LABEL,
};
pub use views::{build_view, ViewMode};
