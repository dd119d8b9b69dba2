//! Record model for the registration catalog
//!
//! The catalog holds five kinds of registration records (classes, program
//! ids, interfaces, categories, elevation policies). Records are immutable
//! once registered and are shared between indices and tree nodes via `Arc`,
//! so a record reached through several views is the same allocation.
//!
//! `NodePayload` is the closed variant a tree node carries; every call site
//! that branches on payload kind does so with an exhaustive match.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// 128-bit registration identifier
pub type Guid = uuid::Uuid;

/// How a registered class is served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServerKind {
    /// Served in-process
    InProcServer32,
    /// Served by a separate local process
    LocalServer32,
    /// Registration did not state a recognized server kind
    #[default]
    Unknown,
}

impl ServerKind {
    /// True for classes served by a separate local process
    pub fn is_local(&self) -> bool {
        matches!(self, ServerKind::LocalServer32)
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ServerKind::InProcServer32 => "InProcServer32",
            ServerKind::LocalServer32 => "LocalServer32",
            ServerKind::Unknown => "Unknown",
        };
        write!(f, "{}", text)
    }
}

/// A registered class: identifier, activation metadata and aliases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Class identifier
    pub clsid: Guid,
    /// Display name
    pub name: String,
    /// Server kind
    pub kind: ServerKind,
    /// Server path
    pub server: String,
    /// Activation command line; often identical to the server path
    pub cmd_line: String,
    /// Program-id aliases registered for this class
    #[serde(default)]
    pub prog_ids: Vec<String>,
    /// Owning package identifier, when registered
    #[serde(default)]
    pub app_id: Option<Guid>,
    /// Type library identifier, when registered
    #[serde(default)]
    pub type_lib: Option<Guid>,
    /// Proxy interface records associated with this class
    #[serde(default)]
    pub proxies: Vec<Arc<InterfaceRecord>>,
}

impl ClassRecord {
    /// Create a class record; the command line defaults to the server path
    pub fn new(
        clsid: Guid,
        name: impl Into<String>,
        kind: ServerKind,
        server: impl Into<String>,
    ) -> Self {
        let server = server.into();
        Self {
            clsid,
            name: name.into(),
            kind,
            server: server.clone(),
            cmd_line: server,
            prog_ids: Vec::new(),
            app_id: None,
            type_lib: None,
            proxies: Vec::new(),
        }
    }

    /// Override the activation command line
    pub fn with_cmd_line(mut self, cmd_line: impl Into<String>) -> Self {
        self.cmd_line = cmd_line.into();
        self
    }

    /// Register a program-id alias
    pub fn with_prog_id(mut self, prog_id: impl Into<String>) -> Self {
        self.prog_ids.push(prog_id.into());
        self
    }

    /// Set the owning package identifier
    pub fn with_app_id(mut self, app_id: Guid) -> Self {
        self.app_id = Some(app_id);
        self
    }

    /// Set the type library identifier
    pub fn with_type_lib(mut self, type_lib: Guid) -> Self {
        self.type_lib = Some(type_lib);
        self
    }

    /// Associate a proxy interface record
    pub fn with_proxy(mut self, proxy: Arc<InterfaceRecord>) -> Self {
        self.proxies.push(proxy);
        self
    }

    /// Natural ordering: display name first, identifier as tiebreak.
    /// Category views sort their class children with this.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.clsid.cmp(&other.clsid))
    }
}

/// A textual program-id alias, optionally bound to a registered class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgIdRecord {
    /// The textual program id
    pub prog_id: String,
    /// Class identifier the alias points at
    pub clsid: Guid,
    /// The owning class record; absent when the class is unregistered
    #[serde(default)]
    pub class: Option<Arc<ClassRecord>>,
}

impl ProgIdRecord {
    pub fn new(prog_id: impl Into<String>, clsid: Guid, class: Option<Arc<ClassRecord>>) -> Self {
        Self {
            prog_id: prog_id.into(),
            clsid,
            class,
        }
    }
}

/// A named, identifier-keyed contract a class may support
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    /// Interface identifier
    pub iid: Guid,
    /// Display name
    pub name: String,
    /// Proxy class identifier, when registered
    #[serde(default)]
    pub proxy_clsid: Option<Guid>,
}

impl InterfaceRecord {
    pub fn new(iid: Guid, name: impl Into<String>) -> Self {
        Self {
            iid,
            name: name.into(),
            proxy_clsid: None,
        }
    }

    /// Set the proxy class identifier
    pub fn with_proxy_clsid(mut self, proxy_clsid: Guid) -> Self {
        self.proxy_clsid = Some(proxy_clsid);
        self
    }
}

/// A named elevation policy governing an ordered set of classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Policy name
    pub name: String,
    /// Numeric policy value
    pub policy: u32,
    /// Classes governed by this policy, in registration order
    #[serde(default)]
    pub classes: Vec<Arc<ClassRecord>>,
}

impl PolicyRecord {
    pub fn new(name: impl Into<String>, policy: u32, classes: Vec<Arc<ClassRecord>>) -> Self {
        Self {
            name: name.into(),
            policy,
            classes,
        }
    }
}

/// Typed payload carried by a tree node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum NodePayload {
    /// Grouping node with no payload
    #[default]
    None,
    /// A registered class
    Class(Arc<ClassRecord>),
    /// A program-id alias
    ProgId(Arc<ProgIdRecord>),
    /// An interface contract
    Interface(Arc<InterfaceRecord>),
    /// A category identifier
    Category(Guid),
    /// An elevation policy
    Policy(Arc<PolicyRecord>),
    /// A bare identifier
    Raw(Guid),
}

impl NodePayload {
    /// The class record reachable from this payload: a class directly, or
    /// a program id's owning class. Only these payloads are expandable.
    pub fn class_record(&self) -> Option<Arc<ClassRecord>> {
        match self {
            NodePayload::Class(class) => Some(Arc::clone(class)),
            NodePayload::ProgId(prog_id) => prog_id.class.clone(),
            NodePayload::None
            | NodePayload::Interface(_)
            | NodePayload::Category(_)
            | NodePayload::Policy(_)
            | NodePayload::Raw(_) => None,
        }
    }

    /// The identifier this payload exports: a class's identifier, an
    /// interface's identifier, a program id's owning class identifier (only
    /// when the class is registered), or the bare identifier itself.
    pub fn guid(&self) -> Option<Guid> {
        match self {
            NodePayload::Class(class) => Some(class.clsid),
            NodePayload::Interface(iface) => Some(iface.iid),
            NodePayload::ProgId(prog_id) => prog_id.class.as_ref().map(|class| class.clsid),
            NodePayload::Category(catid) => Some(*catid),
            NodePayload::Raw(guid) => Some(*guid),
            NodePayload::None | NodePayload::Policy(_) => None,
        }
    }

    /// True for the payloadless grouping variant
    pub fn is_none(&self) -> bool {
        matches!(self, NodePayload::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guid(text: &str) -> Guid {
        Guid::parse_str(text).unwrap()
    }

    #[test]
    fn test_cmd_line_defaults_to_server() {
        let class = ClassRecord::new(
            guid("00000000-0000-0000-0000-000000000001"),
            "Widget",
            ServerKind::InProcServer32,
            r"c:\widgets\widget.dll",
        );
        assert_eq!(class.cmd_line, class.server);
    }

    #[test]
    fn test_natural_cmp_orders_by_name_then_clsid() {
        let a = ClassRecord::new(
            guid("00000000-0000-0000-0000-000000000002"),
            "Alpha",
            ServerKind::Unknown,
            "",
        );
        let b = ClassRecord::new(
            guid("00000000-0000-0000-0000-000000000001"),
            "Alpha",
            ServerKind::Unknown,
            "",
        );
        let c = ClassRecord::new(
            guid("00000000-0000-0000-0000-000000000003"),
            "Beta",
            ServerKind::Unknown,
            "",
        );
        assert_eq!(a.natural_cmp(&c), Ordering::Less);
        assert_eq!(a.natural_cmp(&b), Ordering::Greater);
    }

    #[test]
    fn test_payload_class_record_via_prog_id() {
        let class = Arc::new(ClassRecord::new(
            guid("00000000-0000-0000-0000-000000000004"),
            "Widget",
            ServerKind::LocalServer32,
            r"c:\widgets\widget.exe",
        ));
        let bound = NodePayload::ProgId(Arc::new(ProgIdRecord::new(
            "Widget.Application",
            class.clsid,
            Some(Arc::clone(&class)),
        )));
        let unbound = NodePayload::ProgId(Arc::new(ProgIdRecord::new(
            "Gone.Application",
            guid("00000000-0000-0000-0000-00000000dead"),
            None,
        )));

        let reached = bound.class_record().unwrap();
        assert!(Arc::ptr_eq(&reached, &class));
        assert!(unbound.class_record().is_none());
    }

    #[test]
    fn test_payload_guid_extraction() {
        let class = Arc::new(ClassRecord::new(
            guid("00000000-0000-0000-0000-000000000005"),
            "Widget",
            ServerKind::Unknown,
            "",
        ));
        let iface = Arc::new(InterfaceRecord::new(
            guid("00000000-0000-0000-0000-000000000006"),
            "IWidget",
        ));
        let catid = guid("00000000-0000-0000-0000-000000000007");

        assert_eq!(
            NodePayload::Class(Arc::clone(&class)).guid(),
            Some(class.clsid)
        );
        assert_eq!(NodePayload::Interface(iface.clone()).guid(), Some(iface.iid));
        assert_eq!(NodePayload::Category(catid).guid(), Some(catid));
        assert_eq!(NodePayload::Raw(catid).guid(), Some(catid));
        assert_eq!(NodePayload::None.guid(), None);

        // A program id only exports an identifier through its owning class.
        let unbound = NodePayload::ProgId(Arc::new(ProgIdRecord::new(
            "Gone.Application",
            catid,
            None,
        )));
        assert_eq!(unbound.guid(), None);
    }

    #[test]
    fn test_server_kind_display() {
        assert_eq!(ServerKind::InProcServer32.to_string(), "InProcServer32");
        assert_eq!(ServerKind::LocalServer32.to_string(), "LocalServer32");
        assert_eq!(ServerKind::Unknown.to_string(), "Unknown");
        assert!(ServerKind::LocalServer32.is_local());
        assert!(!ServerKind::InProcServer32.is_local());
    }
}
