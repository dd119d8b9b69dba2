//! Lazy branch resolver
//!
//! Populates a class-bearing node's children from the external interface
//! query, on first expansion or on forced refresh. Drives the per-node
//! state machine: `Unresolved -> Resolving -> Resolved`, with `Failed`
//! capturing a recoverable query failure so the placeholder stays in place
//! and a later expansion retries.
//!
//! The external call is made while the node is unborrowed; a re-entrant
//! expansion attempt observes `Resolving` and backs off without mutating.

use tracing::warn;

use crate::core::error::{Result, ViewerError};
use crate::core::store::{InterfaceResolver, QueryFailure};
use crate::core::tree::{NodeRef, ResolveState};
use crate::core::views::interface_name_node;

/// What an expansion request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// Children now reflect the query result
    Resolved { interfaces: usize },
    /// Node was already resolved and no refresh was forced
    AlreadyResolved,
    /// A resolution for this node is already outstanding
    Busy,
    /// The node's payload carries no reachable class record
    NotExpandable,
}

/// Resolve a node's children in place.
///
/// Idempotent unless `force_refresh` is set: a second call on a resolved
/// node is a no-op. On success prior children are replaced wholesale; on a
/// recoverable query failure they are left untouched and the error is
/// returned carrying the class identity, so the caller can surface it and
/// retry later.
pub fn resolve_node(
    node: &NodeRef,
    resolver: &dyn InterfaceResolver,
    force_refresh: bool,
) -> Result<ExpandOutcome> {
    let class = {
        let borrowed = node.borrow();
        match borrowed.state {
            ResolveState::Resolving => return Ok(ExpandOutcome::Busy),
            ResolveState::Resolved if !force_refresh => {
                return Ok(ExpandOutcome::AlreadyResolved)
            }
            ResolveState::Unresolved | ResolveState::Resolved | ResolveState::Failed => {}
        }
        match borrowed.payload.class_record() {
            Some(class) => class,
            None => return Ok(ExpandOutcome::NotExpandable),
        }
    };

    node.borrow_mut().state = ResolveState::Resolving;

    match resolver.supported_interfaces(&class, force_refresh) {
        Ok(interfaces) => {
            let mut borrowed = node.borrow_mut();
            borrowed.children = interfaces.iter().map(interface_name_node).collect();
            borrowed.state = ResolveState::Resolved;
            Ok(ExpandOutcome::Resolved {
                interfaces: interfaces.len(),
            })
        }
        Err(QueryFailure::QueryFailed(message)) => {
            node.borrow_mut().state = ResolveState::Failed;
            warn!(clsid = %class.clsid, %message, "interface query failed");
            Err(ViewerError::QueryFailed {
                clsid: class.clsid,
                message,
            })
        }
        Err(QueryFailure::Fatal(message)) => {
            node.borrow_mut().state = ResolveState::Failed;
            Err(ViewerError::fatal(message))
        }
    }
}
