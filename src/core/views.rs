//! View builder
//!
//! Projects the record store's indices into one of ten canonical tree
//! shapes. Building is pure: it reads the store, allocates nodes, computes
//! tooltips eagerly and never fails on well-formed data — a mode with zero
//! store entries yields an empty forest.
//!
//! Class-bearing nodes are created with a single placeholder child; their
//! real children arrive through the lazy resolver on first expansion.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::describe;
use crate::core::format::hyphenated_upper;
use crate::core::records::{ClassRecord, InterfaceRecord, NodePayload, ProgIdRecord};
use crate::core::store::{CategoryNames, RecordStore};
use crate::core::tree::{placeholder, NodeRef, TreeNode, View};

/// What a view displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    /// One root per class, store order
    Classes,
    /// One root per class, sorted by display name
    ClassesByName,
    /// One root per program id, store order
    ProgramIds,
    /// Classes grouped under their server path
    ClassesByServer,
    /// Classes grouped under their server path, local servers only
    ClassesByLocalServer,
    /// One root per interface, store order
    Interfaces,
    /// One root per interface, sorted by display name
    InterfacesByName,
    /// Classes grouped under the categories they implement
    ImplementedCategories,
    /// Pre-approved classes only
    PreApproved,
    /// Low-rights elevation policies and the classes they govern
    IeLowRights,
}

impl ViewMode {
    /// All modes, in presentation order
    pub const ALL: [ViewMode; 10] = [
        ViewMode::Classes,
        ViewMode::ClassesByName,
        ViewMode::ProgramIds,
        ViewMode::ClassesByServer,
        ViewMode::ClassesByLocalServer,
        ViewMode::Interfaces,
        ViewMode::InterfacesByName,
        ViewMode::ImplementedCategories,
        ViewMode::PreApproved,
        ViewMode::IeLowRights,
    ];

    /// Human-readable view title
    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::Classes => "CLSIDs",
            ViewMode::ClassesByName => "CLSIDs by Name",
            ViewMode::ProgramIds => "ProgIDs",
            ViewMode::ClassesByServer => "CLSIDs by Server",
            ViewMode::ClassesByLocalServer => "CLSIDs by Local Server",
            ViewMode::Interfaces => "Interfaces",
            ViewMode::InterfacesByName => "Interfaces by Name",
            ViewMode::ImplementedCategories => "Implemented Categories",
            ViewMode::PreApproved => "Explorer PreApproved",
            ViewMode::IeLowRights => "IE Low Rights Elevation Policy",
        }
    }

    /// Parse mode from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classes" | "clsids" => Some(ViewMode::Classes),
            "classes-by-name" | "clsids-by-name" => Some(ViewMode::ClassesByName),
            "prog-ids" | "progids" => Some(ViewMode::ProgramIds),
            "classes-by-server" | "clsids-by-server" => Some(ViewMode::ClassesByServer),
            "classes-by-local-server" | "clsids-by-local-server" => {
                Some(ViewMode::ClassesByLocalServer)
            }
            "interfaces" => Some(ViewMode::Interfaces),
            "interfaces-by-name" => Some(ViewMode::InterfacesByName),
            "implemented-categories" | "categories" => Some(ViewMode::ImplementedCategories),
            "pre-approved" | "preapproved" => Some(ViewMode::PreApproved),
            "ie-low-rights" | "low-rights" => Some(ViewMode::IeLowRights),
            _ => None,
        }
    }
}

/// Class node labelled `<identifier> - <name>`, with placeholder child
pub(crate) fn class_node(class: &Arc<ClassRecord>) -> NodeRef {
    let mut node = TreeNode::new(
        format!("{} - {}", hyphenated_upper(class.clsid), class.name),
        describe::describe_class(class),
        NodePayload::Class(Arc::clone(class)),
    );
    node.children.push(placeholder());
    node.into_ref()
}

/// Class node labelled by name only, with placeholder child
pub(crate) fn named_class_node(class: &Arc<ClassRecord>) -> NodeRef {
    let mut node = TreeNode::new(
        class.name.clone(),
        describe::describe_class(class),
        NodePayload::Class(Arc::clone(class)),
    );
    node.children.push(placeholder());
    node.into_ref()
}

/// Interface node labelled `<identifier> - <name>`
pub(crate) fn interface_node(interface: &Arc<InterfaceRecord>) -> NodeRef {
    TreeNode::new(
        format!("{} - {}", hyphenated_upper(interface.iid), interface.name),
        describe::describe_interface(interface),
        NodePayload::Interface(Arc::clone(interface)),
    )
    .into_ref()
}

/// Interface node labelled by name only
pub(crate) fn interface_name_node(interface: &Arc<InterfaceRecord>) -> NodeRef {
    TreeNode::new(
        interface.name.clone(),
        describe::describe_interface(interface),
        NodePayload::Interface(Arc::clone(interface)),
    )
    .into_ref()
}

/// Program-id node; the placeholder child is wired only when the owning
/// class is registered
fn prog_id_node(prog_id: &Arc<ProgIdRecord>) -> NodeRef {
    let mut node = TreeNode::new(
        prog_id.prog_id.clone(),
        describe::describe_prog_id(prog_id),
        NodePayload::ProgId(Arc::clone(prog_id)),
    );
    if prog_id.class.is_some() {
        node.children.push(placeholder());
    }
    node.into_ref()
}

fn build_classes(store: &dyn RecordStore) -> Vec<NodeRef> {
    store.all_classes().iter().map(class_node).collect()
}

fn build_classes_by_name(store: &dyn RecordStore) -> Vec<NodeRef> {
    store.classes_by_name().iter().map(named_class_node).collect()
}

fn build_program_ids(store: &dyn RecordStore) -> Vec<NodeRef> {
    store.all_program_ids().iter().map(prog_id_node).collect()
}

fn build_classes_by_server(store: &dyn RecordStore, local_only: bool) -> Vec<NodeRef> {
    let mut roots = Vec::new();
    for (server, mut classes) in store.classes_grouped_by_server(local_only) {
        classes.sort_by(|a, b| a.name.cmp(&b.name));
        let group = TreeNode::new(server.clone(), server, NodePayload::None).into_ref();
        group.borrow_mut().children = classes.iter().map(named_class_node).collect();
        roots.push(group);
    }
    roots
}

fn build_interfaces(store: &dyn RecordStore) -> Vec<NodeRef> {
    store.all_interfaces().iter().map(interface_node).collect()
}

fn build_interfaces_by_name(store: &dyn RecordStore) -> Vec<NodeRef> {
    store
        .interfaces_by_name()
        .iter()
        .map(interface_name_node)
        .collect()
}

fn build_categories(store: &dyn RecordStore, categories: &dyn CategoryNames) -> Vec<NodeRef> {
    let mut roots: Vec<(String, NodeRef)> = Vec::new();
    for (catid, mut classes) in store.implemented_categories() {
        let name = categories.name_of(catid);
        let group = TreeNode::new(
            name.clone(),
            describe::describe_category(catid),
            NodePayload::Category(catid),
        )
        .into_ref();
        classes.sort_by(|a, b| a.natural_cmp(b));
        group.borrow_mut().children = classes.iter().map(named_class_node).collect();
        roots.push((name, group));
    }
    roots.sort_by(|(a, _), (b, _)| a.cmp(b));
    roots.into_iter().map(|(_, node)| node).collect()
}

fn build_pre_approved(store: &dyn RecordStore) -> Vec<NodeRef> {
    store.pre_approved_classes().iter().map(class_node).collect()
}

fn build_low_rights(store: &dyn RecordStore) -> Vec<NodeRef> {
    let mut roots = Vec::new();
    for policy in store.low_rights_policies() {
        let root = TreeNode::new(
            policy.name.clone(),
            describe::describe_policy(&policy),
            NodePayload::Policy(Arc::clone(&policy)),
        )
        .into_ref();
        root.borrow_mut().children = policy.classes.iter().map(class_node).collect();
        roots.push(root);
    }
    roots
}

/// Build the forest for a view mode.
///
/// Deterministic: repeated calls against an unchanged store yield
/// structurally identical forests carrying the same record allocations.
pub fn build_view(
    mode: ViewMode,
    store: &dyn RecordStore,
    categories: &dyn CategoryNames,
) -> View {
    let roots = match mode {
        ViewMode::Classes => build_classes(store),
        ViewMode::ClassesByName => build_classes_by_name(store),
        ViewMode::ProgramIds => build_program_ids(store),
        ViewMode::ClassesByServer => build_classes_by_server(store, false),
        ViewMode::ClassesByLocalServer => build_classes_by_server(store, true),
        ViewMode::Interfaces => build_interfaces(store),
        ViewMode::InterfacesByName => build_interfaces_by_name(store),
        ViewMode::ImplementedCategories => build_categories(store, categories),
        ViewMode::PreApproved => build_pre_approved(store),
        ViewMode::IeLowRights => build_low_rights(store),
    };
    debug!(mode = ?mode, roots = roots.len(), "built view");
    View {
        title: mode.title().to_string(),
        roots,
    }
}
