//! View session
//!
//! Owns one active view: the immutable baseline forest built at open time,
//! the visible forest derived from it by the current filter, and the
//! resolver handle used for expansion. This is the surface a presentation
//! shell talks to; the baseline is never handed out mutably and never
//! changes after open.

use std::sync::Arc;

use tracing::debug;

use crate::core::error::Result;
use crate::core::filter::{apply_filter, LabelFilter, MatchMode};
use crate::core::resolver::{resolve_node, ExpandOutcome};
use crate::core::store::{CategoryNames, InterfaceResolver, RecordStore};
use crate::core::tree::NodeRef;
use crate::core::views::{build_view, ViewMode};

/// An open view over the registration catalog
pub struct ViewSession {
    mode: ViewMode,
    title: String,
    baseline: Vec<NodeRef>,
    visible: Vec<NodeRef>,
    filter: Option<LabelFilter>,
    resolver: Arc<dyn InterfaceResolver>,
}

impl ViewSession {
    /// Build the baseline forest for `mode` and open a session over it
    pub fn open(
        mode: ViewMode,
        store: &dyn RecordStore,
        categories: &dyn CategoryNames,
        resolver: Arc<dyn InterfaceResolver>,
    ) -> Self {
        let view = build_view(mode, store, categories);
        debug!(mode = ?mode, roots = view.roots.len(), "opened view session");
        Self {
            mode,
            title: view.title,
            visible: view.roots.clone(),
            baseline: view.roots,
            filter: None,
            resolver,
        }
    }

    /// The mode this session was opened for
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Human-readable view title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The unfiltered baseline forest
    pub fn baseline(&self) -> &[NodeRef] {
        &self.baseline
    }

    /// The currently visible forest (baseline when no filter is active)
    pub fn visible(&self) -> &[NodeRef] {
        &self.visible
    }

    /// The active filter, if any
    pub fn active_filter(&self) -> Option<&LabelFilter> {
        self.filter.as_ref()
    }

    /// Compile and apply a filter, returning the new visible forest.
    ///
    /// An empty (or whitespace-only) pattern clears the filter. A pattern
    /// that fails to compile is reported as a configuration error and
    /// leaves both the baseline and the current visible forest untouched.
    pub fn set_filter(
        &mut self,
        pattern: &str,
        mode: MatchMode,
        case_sensitive: bool,
    ) -> Result<&[NodeRef]> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Ok(self.clear_filter());
        }
        let filter = LabelFilter::compile(pattern, mode, case_sensitive)?;
        self.visible = apply_filter(&self.baseline, &filter);
        self.filter = Some(filter);
        Ok(&self.visible)
    }

    /// As `set_filter`, with the match mode given as a shell index
    pub fn set_filter_indexed(
        &mut self,
        pattern: &str,
        mode_index: usize,
        case_sensitive: bool,
    ) -> Result<&[NodeRef]> {
        self.set_filter(pattern, MatchMode::from_index(mode_index)?, case_sensitive)
    }

    /// Drop the active filter and restore the baseline
    pub fn clear_filter(&mut self) -> &[NodeRef] {
        self.filter = None;
        self.visible = self.baseline.clone();
        &self.visible
    }

    /// Resolve a node's children through the session's resolver (§4.2).
    /// Serializing concurrent expansion of one node is the caller's duty;
    /// the node's `Resolving` state makes a re-entrant attempt a no-op.
    pub fn expand_node(&self, node: &NodeRef, force_refresh: bool) -> Result<ExpandOutcome> {
        resolve_node(node, self.resolver.as_ref(), force_refresh)
    }
}
