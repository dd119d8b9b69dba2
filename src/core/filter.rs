//! Filter engine
//!
//! Compiles a user-supplied pattern and match mode into a label predicate,
//! then applies it over a baseline forest. Application is non-destructive:
//! it selects a subsequence of the baseline roots (their subtrees attached,
//! unpruned) and never mutates the baseline itself.
//!
//! A root survives when the predicate matches its own label or the label of
//! at least one direct child. Lookahead is exactly one level deep: the
//! children of an unexpanded class node are placeholder sentinels, and
//! deeper descendants of a group are intentionally not consulted.

use std::borrow::Cow;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{Result, ViewerError};
use crate::core::tree::NodeRef;

/// Text-matching strategy, selected by index in the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Substring containment
    Contains,
    /// Prefix match
    StartsWith,
    /// Suffix match
    EndsWith,
    /// Whole-label equality
    Exact,
    /// Restricted glob grammar (`*`, `?`), whole-label match
    Glob,
    /// Full regular expression
    Regex,
}

impl MatchMode {
    /// All modes in index order
    pub const ALL: [MatchMode; 6] = [
        MatchMode::Contains,
        MatchMode::StartsWith,
        MatchMode::EndsWith,
        MatchMode::Exact,
        MatchMode::Glob,
        MatchMode::Regex,
    ];

    /// Resolve a shell-supplied mode index
    pub fn from_index(index: usize) -> Result<Self> {
        MatchMode::ALL
            .get(index)
            .copied()
            .ok_or(ViewerError::InvalidMatchMode { index })
    }

    /// The index this mode is selected by
    pub fn index(&self) -> usize {
        MatchMode::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Parse mode from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "contains" => Some(MatchMode::Contains),
            "starts-with" | "startswith" | "prefix" => Some(MatchMode::StartsWith),
            "ends-with" | "endswith" | "suffix" => Some(MatchMode::EndsWith),
            "exact" | "equals" => Some(MatchMode::Exact),
            "glob" => Some(MatchMode::Glob),
            "regex" => Some(MatchMode::Regex),
            _ => None,
        }
    }
}

/// Convert a restricted glob to an anchored regular expression pattern.
///
/// `*` becomes `.*`, `?` becomes `.`, every other character is escaped as a
/// literal. Anchoring at both ends gives whole-label semantics rather than
/// substring search.
pub fn glob_to_regex(glob: &str) -> String {
    let mut pattern = String::with_capacity(glob.len() + 2);
    pattern.push('^');
    for ch in glob.chars() {
        match ch {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            _ => pattern.push_str(&regex::escape(&ch.to_string())),
        }
    }
    pattern.push('$');
    pattern
}

#[derive(Debug, Clone)]
enum Matcher {
    Contains { needle: String },
    StartsWith { needle: String },
    EndsWith { needle: String },
    Exact { needle: String },
    Pattern(Regex),
}

/// A compiled label predicate
#[derive(Debug, Clone)]
pub struct LabelFilter {
    pattern: String,
    mode: MatchMode,
    case_sensitive: bool,
    matcher: Matcher,
}

impl LabelFilter {
    /// Compile a pattern for the given mode. Case-insensitive comparison is
    /// Unicode case folding, independent of locale. Fails only on an
    /// invalid regular expression (a configuration error).
    pub fn compile(pattern: &str, mode: MatchMode, case_sensitive: bool) -> Result<Self> {
        let needle = if case_sensitive {
            pattern.to_string()
        } else {
            pattern.to_lowercase()
        };
        let matcher = match mode {
            MatchMode::Contains => Matcher::Contains { needle },
            MatchMode::StartsWith => Matcher::StartsWith { needle },
            MatchMode::EndsWith => Matcher::EndsWith { needle },
            MatchMode::Exact => Matcher::Exact { needle },
            MatchMode::Glob => Matcher::Pattern(
                RegexBuilder::new(&glob_to_regex(pattern))
                    .case_insensitive(!case_sensitive)
                    .build()?,
            ),
            MatchMode::Regex => Matcher::Pattern(
                RegexBuilder::new(pattern)
                    .case_insensitive(!case_sensitive)
                    .build()?,
            ),
        };
        Ok(Self {
            pattern: pattern.to_string(),
            mode,
            case_sensitive,
            matcher,
        })
    }

    /// Compile with the mode given as a shell index
    pub fn compile_indexed(pattern: &str, mode_index: usize, case_sensitive: bool) -> Result<Self> {
        LabelFilter::compile(pattern, MatchMode::from_index(mode_index)?, case_sensitive)
    }

    /// The original pattern string
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The match mode this filter was compiled for
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether comparison is case-sensitive
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn fold<'a>(&self, label: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(label)
        } else {
            Cow::Owned(label.to_lowercase())
        }
    }

    /// Whether the label satisfies this filter
    pub fn matches(&self, label: &str) -> bool {
        match &self.matcher {
            Matcher::Contains { needle } => self.fold(label).contains(needle.as_str()),
            Matcher::StartsWith { needle } => self.fold(label).starts_with(needle.as_str()),
            Matcher::EndsWith { needle } => self.fold(label).ends_with(needle.as_str()),
            Matcher::Exact { needle } => self.fold(label).as_ref() == needle.as_str(),
            // The compiled pattern carries its own case-insensitivity flag.
            Matcher::Pattern(regex) => regex.is_match(label),
        }
    }
}

/// Whether a root or one of its direct children matches the filter
fn root_survives(root: &NodeRef, filter: &LabelFilter) -> bool {
    let root = root.borrow();
    if filter.matches(&root.label) {
        return true;
    }
    root.children
        .iter()
        .any(|child| filter.matches(&child.borrow().label))
}

/// Select the baseline roots that survive the filter.
///
/// The result is a subsequence of `baseline` sharing the original nodes;
/// kept roots retain their full subtrees unpruned.
pub fn apply_filter(baseline: &[NodeRef], filter: &LabelFilter) -> Vec<NodeRef> {
    let visible: Vec<NodeRef> = baseline
        .iter()
        .filter(|root| root_survives(root, filter))
        .cloned()
        .collect();
    debug!(
        pattern = filter.pattern(),
        mode = ?filter.mode(),
        kept = visible.len(),
        total = baseline.len(),
        "applied filter"
    );
    visible
}
