//! Store and collaborator seams
//!
//! The engine never owns registration data. It reads records through the
//! `RecordStore` trait, queries live objects through `InterfaceResolver`,
//! and renders category names through `CategoryNames`. `MemoryStore` is the
//! reference store implementation: a flat record list with derived indices,
//! suitable for embedding and for tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use lazy_static::lazy_static;
use thiserror::Error;
use uuid::uuid;

use crate::core::format;
use crate::core::records::{ClassRecord, Guid, InterfaceRecord, PolicyRecord, ProgIdRecord};

/// Read-only access to the indexed registration catalog
pub trait RecordStore {
    /// All classes, store order
    fn all_classes(&self) -> Vec<Arc<ClassRecord>>;
    /// All classes, sorted by display name
    fn classes_by_name(&self) -> Vec<Arc<ClassRecord>>;
    /// All program ids, store order
    fn all_program_ids(&self) -> Vec<Arc<ProgIdRecord>>;
    /// Classes grouped by server path, groups ordered by path.
    /// With `local_only`, restricted to classes served by a local process.
    fn classes_grouped_by_server(&self, local_only: bool) -> Vec<(String, Vec<Arc<ClassRecord>>)>;
    /// All interfaces, store order
    fn all_interfaces(&self) -> Vec<Arc<InterfaceRecord>>;
    /// All interfaces, sorted by display name
    fn interfaces_by_name(&self) -> Vec<Arc<InterfaceRecord>>;
    /// Category identifier to implementing classes, store order
    fn implemented_categories(&self) -> Vec<(Guid, Vec<Arc<ClassRecord>>)>;
    /// Pre-approved classes, store order
    fn pre_approved_classes(&self) -> Vec<Arc<ClassRecord>>;
    /// Low-rights elevation policies, store order
    fn low_rights_policies(&self) -> Vec<Arc<PolicyRecord>>;
}

/// Failure reported by the external interface query
#[derive(Debug, Clone, Error)]
pub enum QueryFailure {
    /// The query itself failed (activation denied, server unavailable).
    /// Retry after the collaborator recovers is expected to succeed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Anything else; surfaced to the caller as fatal
    #[error("{0}")]
    Fatal(String),
}

/// Queries a class for the interfaces it supports.
///
/// This is the one external call the engine makes that can block or fail;
/// callers treat it as long-running (§5 of the design).
#[cfg_attr(test, mockall::automock)]
pub trait InterfaceResolver {
    /// The interfaces the class supports. `force_refresh` bypasses any
    /// cache the collaborator keeps.
    fn supported_interfaces(
        &self,
        class: &ClassRecord,
        force_refresh: bool,
    ) -> Result<Vec<Arc<InterfaceRecord>>, QueryFailure>;
}

/// Renders category identifiers as human-readable names
pub trait CategoryNames {
    /// The display name for a category, falling back to the braced
    /// identifier when unknown
    fn name_of(&self, catid: Guid) -> String;
}

lazy_static! {
    static ref KNOWN_CATEGORIES: HashMap<Guid, &'static str> = {
        let mut names = HashMap::new();
        names.insert(uuid!("40FC6ED3-2438-11CF-A3DB-080036F12502"), "Insertable Objects");
        names.insert(uuid!("40FC6ED4-2438-11CF-A3DB-080036F12502"), "Controls");
        names.insert(uuid!("40FC6ED5-2438-11CF-A3DB-080036F12502"), "Automation Objects");
        names.insert(uuid!("40FC6ED8-2438-11CF-A3DB-080036F12502"), "Document Objects");
        names.insert(uuid!("40FC6ED9-2438-11CF-A3DB-080036F12502"), "Printable Objects");
        names.insert(uuid!("7DD95801-9882-11CF-9FA9-00AA006C42C4"), "Safe for Scripting");
        names.insert(uuid!("7DD95802-9882-11CF-9FA9-00AA006C42C4"), "Safe for Initializing");
        names
    };
}

/// Category lookup backed by the table of well-known category identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisteredCategories;

impl CategoryNames for RegisteredCategories {
    fn name_of(&self, catid: Guid) -> String {
        match KNOWN_CATEGORIES.get(&catid) {
            Some(name) => (*name).to_string(),
            None => format::braced(catid),
        }
    }
}

/// In-memory record store with derived indices.
///
/// Store order is insertion order; the by-name, by-server and by-category
/// accessors derive their ordering on demand so the flat collections stay
/// the single source of truth.
#[derive(Debug, Default)]
pub struct MemoryStore {
    classes: Vec<Arc<ClassRecord>>,
    prog_ids: Vec<Arc<ProgIdRecord>>,
    interfaces: Vec<Arc<InterfaceRecord>>,
    categories: Vec<(Guid, Vec<Arc<ClassRecord>>)>,
    pre_approved: Vec<Arc<ClassRecord>>,
    policies: Vec<Arc<PolicyRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class; returns the shared record for wiring into program
    /// ids, categories and policies
    pub fn add_class(&mut self, class: ClassRecord) -> Arc<ClassRecord> {
        let class = Arc::new(class);
        self.classes.push(Arc::clone(&class));
        class
    }

    /// Register a program-id alias
    pub fn add_program_id(&mut self, prog_id: ProgIdRecord) -> Arc<ProgIdRecord> {
        let prog_id = Arc::new(prog_id);
        self.prog_ids.push(Arc::clone(&prog_id));
        prog_id
    }

    /// Register an interface
    pub fn add_interface(&mut self, interface: InterfaceRecord) -> Arc<InterfaceRecord> {
        let interface = Arc::new(interface);
        self.interfaces.push(Arc::clone(&interface));
        interface
    }

    /// Declare that `class` implements the category `catid`
    pub fn add_category_member(&mut self, catid: Guid, class: &Arc<ClassRecord>) {
        if let Some((_, members)) = self.categories.iter_mut().find(|(id, _)| *id == catid) {
            members.push(Arc::clone(class));
        } else {
            self.categories.push((catid, vec![Arc::clone(class)]));
        }
    }

    /// Mark a class as pre-approved
    pub fn add_pre_approved(&mut self, class: &Arc<ClassRecord>) {
        self.pre_approved.push(Arc::clone(class));
    }

    /// Register a low-rights elevation policy
    pub fn add_policy(&mut self, policy: PolicyRecord) -> Arc<PolicyRecord> {
        let policy = Arc::new(policy);
        self.policies.push(Arc::clone(&policy));
        policy
    }
}

impl RecordStore for MemoryStore {
    fn all_classes(&self) -> Vec<Arc<ClassRecord>> {
        self.classes.clone()
    }

    fn classes_by_name(&self) -> Vec<Arc<ClassRecord>> {
        let mut sorted = self.classes.clone();
        sorted.sort_by(|a, b| a.natural_cmp(b));
        sorted
    }

    fn all_program_ids(&self) -> Vec<Arc<ProgIdRecord>> {
        self.prog_ids.clone()
    }

    fn classes_grouped_by_server(&self, local_only: bool) -> Vec<(String, Vec<Arc<ClassRecord>>)> {
        let mut groups: BTreeMap<String, Vec<Arc<ClassRecord>>> = BTreeMap::new();
        for class in &self.classes {
            if class.server.is_empty() {
                continue;
            }
            if local_only && !class.kind.is_local() {
                continue;
            }
            groups
                .entry(class.server.clone())
                .or_default()
                .push(Arc::clone(class));
        }
        groups.into_iter().collect()
    }

    fn all_interfaces(&self) -> Vec<Arc<InterfaceRecord>> {
        self.interfaces.clone()
    }

    fn interfaces_by_name(&self) -> Vec<Arc<InterfaceRecord>> {
        let mut sorted = self.interfaces.clone();
        sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.iid.cmp(&b.iid)));
        sorted
    }

    fn implemented_categories(&self) -> Vec<(Guid, Vec<Arc<ClassRecord>>)> {
        self.categories.clone()
    }

    fn pre_approved_classes(&self) -> Vec<Arc<ClassRecord>> {
        self.pre_approved.clone()
    }

    fn low_rights_policies(&self) -> Vec<Arc<PolicyRecord>> {
        self.policies.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::records::ServerKind;

    fn guid(n: u128) -> Guid {
        Guid::from_u128(n)
    }

    fn store_with_classes() -> (MemoryStore, Vec<Arc<ClassRecord>>) {
        let mut store = MemoryStore::new();
        let zeta = store.add_class(ClassRecord::new(
            guid(1),
            "Zeta Widget",
            ServerKind::InProcServer32,
            r"c:\widgets\zeta.dll",
        ));
        let alpha = store.add_class(ClassRecord::new(
            guid(2),
            "Alpha Widget",
            ServerKind::LocalServer32,
            r"c:\widgets\host.exe",
        ));
        let mid = store.add_class(ClassRecord::new(
            guid(3),
            "Mid Widget",
            ServerKind::LocalServer32,
            r"c:\widgets\host.exe",
        ));
        (store, vec![zeta, alpha, mid])
    }

    #[test]
    fn test_store_order_is_insertion_order() {
        let (store, classes) = store_with_classes();
        let all = store.all_classes();
        assert_eq!(all.len(), 3);
        for (stored, original) in all.iter().zip(&classes) {
            assert!(Arc::ptr_eq(stored, original));
        }
    }

    #[test]
    fn test_classes_by_name_sorted() {
        let (store, _) = store_with_classes();
        let names: Vec<_> = store
            .classes_by_name()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, ["Alpha Widget", "Mid Widget", "Zeta Widget"]);
    }

    #[test]
    fn test_grouped_by_server_orders_groups_by_path() {
        let (store, _) = store_with_classes();
        let groups = store.classes_grouped_by_server(false);
        let paths: Vec<_> = groups.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(paths, [r"c:\widgets\host.exe", r"c:\widgets\zeta.dll"]);

        let local = store.classes_grouped_by_server(true);
        assert_eq!(local.len(), 1);
        assert_eq!(local[0].0, r"c:\widgets\host.exe");
        assert_eq!(local[0].1.len(), 2);
    }

    #[test]
    fn test_grouped_by_server_skips_serverless_classes() {
        let mut store = MemoryStore::new();
        store.add_class(ClassRecord::new(guid(7), "Ghost", ServerKind::Unknown, ""));
        assert!(store.classes_grouped_by_server(false).is_empty());
    }

    #[test]
    fn test_category_members_merge_by_catid() {
        let (mut store, classes) = store_with_classes();
        let catid = guid(100);
        store.add_category_member(catid, &classes[0]);
        store.add_category_member(catid, &classes[1]);
        let categories = store.implemented_categories();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].1.len(), 2);
    }

    #[test]
    fn test_known_category_name() {
        let lookup = RegisteredCategories;
        let controls = uuid!("40FC6ED4-2438-11CF-A3DB-080036F12502");
        assert_eq!(lookup.name_of(controls), "Controls");
    }

    #[test]
    fn test_unknown_category_falls_back_to_braced_guid() {
        let lookup = RegisteredCategories;
        let unknown = Guid::parse_str("12345678-9ABC-DEF0-1122-334455667788").unwrap();
        assert_eq!(
            lookup.name_of(unknown),
            "{12345678-9ABC-DEF0-1122-334455667788}"
        );
    }
}
