//! Tree node and forest model
//!
//! View state is single-threaded by design: nodes are shared between the
//! baseline forest and whatever filtered forest is currently visible, and
//! branch resolution mutates a node's children in place. `Rc<RefCell<_>>`
//! states that contract at the type level.
//!
//! Class-bearing nodes carry an explicit resolution state machine. A fresh
//! node is `Unresolved` and exposes a single placeholder child until its
//! first expansion; `Resolving` guards against re-entrant expansion while
//! the external query is outstanding; `Failed` keeps the placeholder so a
//! later expansion can retry.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::records::{Guid, NodePayload};

/// Shared handle to a tree node
pub type NodeRef = Rc<RefCell<TreeNode>>;

/// Label of the placeholder child under an unexpanded class-bearing node
pub const PLACEHOLDER_LABEL: &str = "IUnknown";

/// Per-node resolution state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveState {
    /// Children not yet resolved; a placeholder child stands in
    #[default]
    Unresolved,
    /// An external query for this node is outstanding
    Resolving,
    /// Children reflect the last successful query
    Resolved,
    /// The last query failed; the placeholder is retained for retry
    Failed,
}

/// A node in a registration view
#[derive(Debug)]
pub struct TreeNode {
    /// Display text
    pub label: String,
    /// Multi-line description, computed at build time
    pub tooltip: String,
    /// Typed payload
    pub payload: NodePayload,
    /// Ordered children
    pub children: Vec<NodeRef>,
    /// Resolution state; meaningful only for class-bearing nodes
    pub state: ResolveState,
}

impl TreeNode {
    /// Create a leaf node
    pub fn new(label: impl Into<String>, tooltip: impl Into<String>, payload: NodePayload) -> Self {
        Self {
            label: label.into(),
            tooltip: tooltip.into(),
            payload,
            children: Vec::new(),
            state: ResolveState::Unresolved,
        }
    }

    /// Wrap into a shared handle
    pub fn into_ref(self) -> NodeRef {
        Rc::new(RefCell::new(self))
    }

    /// The identifier this node exports, if its payload carries one
    pub fn guid(&self) -> Option<Guid> {
        self.payload.guid()
    }

    /// Whether the node's children reflect a successful resolution
    pub fn is_resolved(&self) -> bool {
        self.state == ResolveState::Resolved
    }
}

/// Create the placeholder child marking an unexpanded class branch
pub fn placeholder() -> NodeRef {
    TreeNode::new(PLACEHOLDER_LABEL, "", NodePayload::None).into_ref()
}

/// A built view: a human-readable title and an ordered forest of roots
#[derive(Debug, Clone)]
pub struct View {
    /// Human-readable view title
    pub title: String,
    /// Ordered root nodes
    pub roots: Vec<NodeRef>,
}

/// Structural snapshot of a node: labels only, full depth.
/// Lets callers compare forests without touching shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    pub label: String,
    pub children: Vec<NodeSnapshot>,
}

/// Snapshot a single node
pub fn snapshot(node: &NodeRef) -> NodeSnapshot {
    let node = node.borrow();
    NodeSnapshot {
        label: node.label.clone(),
        children: node.children.iter().map(snapshot).collect(),
    }
}

/// Snapshot a forest in root order
pub fn snapshot_forest(roots: &[NodeRef]) -> Vec<NodeSnapshot> {
    roots.iter().map(snapshot).collect()
}
