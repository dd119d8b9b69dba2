//! Shared fixtures for the integration suites
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use regview::{
    ClassRecord, Guid, InterfaceRecord, InterfaceResolver, MemoryStore, PolicyRecord,
    ProgIdRecord, QueryFailure, ServerKind,
};

pub const WIDGET_FACTORY: u128 = 0x1001;
pub const WIDGET_HOST: u128 = 0x1002;
pub const ARCHIVE_HANDLER: u128 = 0x1003;
pub const CONTROLS_CATID: &str = "40FC6ED4-2438-11CF-A3DB-080036F12502";

pub fn guid(n: u128) -> Guid {
    Guid::from_u128(n)
}

/// A small but representative catalog: three classes across two servers,
/// bound and unbound program ids, interfaces whose names exercise the
/// anchored-glob vectors, one known and one unknown category, a
/// pre-approved class and one elevation policy.
pub fn sample_catalog() -> MemoryStore {
    let mut store = MemoryStore::new();

    let events = store.add_interface(InterfaceRecord::new(guid(0x2001), "IWidgetEvents"));
    store.add_interface(InterfaceRecord::new(guid(0x2002), "IWidget"));
    store.add_interface(InterfaceRecord::new(guid(0x2003), "IESupportsPolicy"));
    store.add_interface(InterfaceRecord::new(guid(0x2004), "MyIESupportsPolicy"));

    let factory = store.add_class(
        ClassRecord::new(
            guid(WIDGET_FACTORY),
            "Widget Factory",
            ServerKind::InProcServer32,
            r"c:\widgets\widget.dll",
        )
        .with_prog_id("Widget.Factory")
        .with_app_id(guid(0x3001))
        .with_type_lib(guid(0x3002))
        .with_proxy(Arc::clone(&events)),
    );
    let host = store.add_class(
        ClassRecord::new(
            guid(WIDGET_HOST),
            "Widget Host",
            ServerKind::LocalServer32,
            r"c:\widgets\host.exe",
        )
        .with_cmd_line(r"c:\widgets\host.exe /automation")
        .with_prog_id("Widget.Host"),
    );
    let archive = store.add_class(ClassRecord::new(
        guid(ARCHIVE_HANDLER),
        "Archive Handler",
        ServerKind::InProcServer32,
        r"c:\handlers\archive.dll",
    ));

    store.add_program_id(ProgIdRecord::new(
        "Widget.Factory",
        factory.clsid,
        Some(Arc::clone(&factory)),
    ));
    store.add_program_id(ProgIdRecord::new(
        "Widget.Host",
        host.clsid,
        Some(Arc::clone(&host)),
    ));
    store.add_program_id(ProgIdRecord::new("Orphan.Alias", guid(0xDEAD), None));

    let controls = Guid::parse_str(CONTROLS_CATID).unwrap();
    store.add_category_member(controls, &factory);
    store.add_category_member(controls, &host);
    store.add_category_member(guid(0x4001), &archive);

    store.add_pre_approved(&factory);

    store.add_policy(PolicyRecord::new(
        "Widget Elevation",
        3,
        vec![Arc::clone(&host), Arc::clone(&factory)],
    ));

    store
}

/// Interface resolver with scripted, per-class results and failure
/// injection. Single-threaded interior mutability mirrors how the engine
/// is driven by a shell.
#[derive(Default)]
pub struct ScriptedResolver {
    interfaces: RefCell<HashMap<Guid, Vec<Arc<InterfaceRecord>>>>,
    pending_failures: RefCell<HashMap<Guid, usize>>,
    calls: RefCell<usize>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the interface set returned for a class
    pub fn script(&self, clsid: Guid, interfaces: Vec<Arc<InterfaceRecord>>) {
        self.interfaces.borrow_mut().insert(clsid, interfaces);
    }

    /// Make the next `times` queries for `clsid` fail recoverably
    pub fn fail_next(&self, clsid: Guid, times: usize) {
        self.pending_failures.borrow_mut().insert(clsid, times);
    }

    /// Total number of queries observed
    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl InterfaceResolver for ScriptedResolver {
    fn supported_interfaces(
        &self,
        class: &ClassRecord,
        _force_refresh: bool,
    ) -> Result<Vec<Arc<InterfaceRecord>>, QueryFailure> {
        *self.calls.borrow_mut() += 1;
        let mut failures = self.pending_failures.borrow_mut();
        if let Some(remaining) = failures.get_mut(&class.clsid) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(QueryFailure::QueryFailed("activation denied".to_string()));
            }
        }
        Ok(self
            .interfaces
            .borrow()
            .get(&class.clsid)
            .cloned()
            .unwrap_or_default())
    }
}

/// Convenience: interface records for scripting resolver results
pub fn interfaces(records: &[(u128, &str)]) -> Vec<Arc<InterfaceRecord>> {
    records
        .iter()
        .map(|(id, name)| Arc::new(InterfaceRecord::new(guid(*id), *name)))
        .collect()
}
