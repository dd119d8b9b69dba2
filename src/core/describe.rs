//! Description builder
//!
//! Renders the multi-line, human-readable summary a shell shows as a
//! tooltip. One template per record kind; a program id delegates to its
//! owning class when that class is registered.

use crate::core::format::{braced, hyphenated_upper};
use crate::core::records::{
    ClassRecord, Guid, InterfaceRecord, NodePayload, PolicyRecord, ProgIdRecord,
};

/// Describe a class record
pub fn describe_class(class: &ClassRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("CLSID: {}\n", braced(class.clsid)));
    out.push_str(&format!("Name: {}\n", class.name));
    out.push_str(&format!("{}: {}\n", class.kind, class.server));
    if class.cmd_line != class.server {
        out.push_str(&format!("Command Line: {}\n", class.cmd_line));
    }
    if !class.prog_ids.is_empty() {
        out.push_str("ProgIDs:\n");
        for prog_id in &class.prog_ids {
            out.push_str(&format!("{}\n", prog_id));
        }
    }
    if let Some(app_id) = class.app_id {
        out.push_str(&format!("AppID: {}\n", braced(app_id)));
    }
    if let Some(type_lib) = class.type_lib {
        out.push_str(&format!("TypeLib: {}\n", braced(type_lib)));
    }
    if !class.proxies.is_empty() {
        out.push_str("Interface Proxies:\n");
        for proxy in &class.proxies {
            out.push_str(&format!("{} - {}\n", hyphenated_upper(proxy.iid), proxy.name));
        }
    }
    out
}

/// Describe a program-id record: the owning class's summary when the class
/// is registered, otherwise just the class identifier the alias points at
pub fn describe_prog_id(prog_id: &ProgIdRecord) -> String {
    match &prog_id.class {
        Some(class) => describe_class(class),
        None => format!("CLSID: {}\n", braced(prog_id.clsid)),
    }
}

/// Describe an interface record
pub fn describe_interface(interface: &InterfaceRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("Name: {}\n", interface.name));
    out.push_str(&format!("IID: {}\n", braced(interface.iid)));
    if let Some(proxy_clsid) = interface.proxy_clsid {
        out.push_str(&format!("ProxyCLSID: {}\n", braced(proxy_clsid)));
    }
    out
}

/// Describe a category identifier
pub fn describe_category(catid: Guid) -> String {
    format!("CATID: {}", braced(catid))
}

/// Describe an elevation policy
pub fn describe_policy(policy: &PolicyRecord) -> String {
    format!("Elevation Policy: {}", policy.policy)
}

/// Describe any payload
pub fn describe(payload: &NodePayload) -> String {
    match payload {
        NodePayload::None => String::new(),
        NodePayload::Class(class) => describe_class(class),
        NodePayload::ProgId(prog_id) => describe_prog_id(prog_id),
        NodePayload::Interface(interface) => describe_interface(interface),
        NodePayload::Category(catid) => describe_category(*catid),
        NodePayload::Policy(policy) => describe_policy(policy),
        NodePayload::Raw(guid) => braced(*guid),
    }
}
