//! Validated route table and path resolution.
//!
//! # Resolution
//!
//! Entries are scanned in order and the first match wins:
//! - `*` matches every path
//! - namespace entries match on a segment-boundary prefix, even when marked
//!   exact, since their children decide the final match
//! - exact leaf entries match the normalized path only
//! - other entries match on a segment-boundary prefix
//!
//! A matching namespace entry delegates to its children with the same full
//! path. When none of its children match, scanning continues with the next
//! sibling, so unknown pages under a namespace still reach the catch-all.
//!
//! # Invariants
//!
//! [`RouteTable::new`] rejects tables that break the manifest invariants
//! (see [`TableError`]). A constructed table always ends with the catch-all
//! entry, which makes [`RouteTable::resolve`] infallible.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::component::ComponentRef;
use crate::entry::RouteEntry;
use crate::path::{has_prefix, has_trailing_slash, normalize_path, same_path};

/// Error returned when a route table violates a manifest invariant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// No top-level `*` entry.
    #[error("Route table has no catch-all ('*') entry")]
    MissingCatchAll,
    /// The catch-all entry is not the final top-level entry.
    #[error("Catch-all entry must be last, found at position {position} of {len}")]
    CatchAllNotLast {
        /// Zero-based position of the catch-all entry.
        position: usize,
        /// Number of top-level entries.
        len: usize,
    },
    /// Two siblings share a path.
    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),
    /// Path is empty or not rooted.
    #[error("Invalid route path: {0:?}")]
    InvalidPath(String),
    /// Component reference without an identifier.
    #[error("Route {0} has an empty component id")]
    EmptyComponent(String),
}

/// Path matching options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Compare paths case-sensitively.
    pub case_sensitive: bool,
    /// Exact entries only match when the trailing slash agrees.
    pub strict_trailing_slash: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            strict_trailing_slash: false,
        }
    }
}

/// Result of resolving a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    parents: Vec<&'a RouteEntry>,
    leaf: &'a RouteEntry,
}

impl<'a> RouteMatch<'a> {
    /// Component to render.
    #[must_use]
    pub fn component(&self) -> &'a ComponentRef {
        &self.leaf.component
    }

    /// The matched leaf entry.
    #[must_use]
    pub fn leaf(&self) -> &'a RouteEntry {
        self.leaf
    }

    /// Matched entries from the top level down to the leaf.
    ///
    /// Namespace entries wrap their children when rendered, so the chain is
    /// the render order of nested layouts.
    pub fn chain(&self) -> impl Iterator<Item = &'a RouteEntry> + '_ {
        self.parents.iter().copied().chain(std::iter::once(self.leaf))
    }

    /// Nesting depth of the leaf (0 for top-level entries).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    /// Sidebar in effect, inherited from the nearest ancestor that sets one.
    #[must_use]
    pub fn sidebar(&self) -> Option<&'a str> {
        self.leaf
            .sidebar
            .as_deref()
            .or_else(|| self.parents.iter().rev().find_map(|e| e.sidebar.as_deref()))
    }

    /// Whether resolution fell through to the catch-all.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.leaf.is_catch_all()
    }
}

/// Exact leaf route with its effective sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeafRoute<'a> {
    /// Route path.
    pub path: &'a str,
    /// Component rendered for the path.
    pub component: &'a ComponentRef,
    /// Sidebar in effect for the route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<&'a str>,
}

/// Depth-first iterator over every entry of a table.
///
/// Yields `(depth, entry)` pairs in manifest order.
pub struct Routes<'a> {
    stack: Vec<(usize, &'a RouteEntry)>,
}

impl<'a> Iterator for Routes<'a> {
    type Item = (usize, &'a RouteEntry);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, entry) = self.stack.pop()?;
        self.stack
            .extend(entry.routes.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, entry))
    }
}

/// Immutable, validated route table.
///
/// Safe to share between threads; every query is a pure lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    targets: Vec<Target>,
    options: MatchOptions,
}

impl RouteTable {
    /// Create a route table from top-level entries.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the entries violate a manifest invariant.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, TableError> {
        validate_top_level(&entries)?;
        validate_siblings(&entries)?;

        let table = Self {
            targets: Target::build(&entries),
            entries,
            options: MatchOptions::default(),
        };
        tracing::debug!(
            top_level = table.entries.len(),
            total = table.len(),
            "Route table validated"
        );
        Ok(table)
    }

    /// Replace the matching options.
    #[must_use]
    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Matching options in use.
    #[must_use]
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Top-level entries.
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// The catch-all entry.
    #[must_use]
    pub fn catch_all(&self) -> &RouteEntry {
        // Non-empty and catch-all terminated, checked in `new`.
        &self.entries[self.entries.len() - 1]
    }

    /// Resolve a request path.
    ///
    /// Never fails: paths without a declared route resolve to the catch-all.
    #[must_use]
    pub fn resolve(&self, path: &str) -> RouteMatch<'_> {
        let normalized = normalize_path(path);
        let request = Request {
            path: &normalized,
            trailing_slash: has_trailing_slash(path),
        };

        let mut chain = Vec::new();
        let leaf = if self.match_entries(&self.entries, &self.targets, &request, &mut chain) {
            chain.pop()
        } else {
            None
        };
        let leaf = leaf.unwrap_or_else(|| {
            chain.clear();
            self.catch_all()
        });

        tracing::trace!(path, component = %leaf.component, "Resolved route");
        RouteMatch {
            parents: chain,
            leaf,
        }
    }

    /// Resolve a request path to its component.
    #[must_use]
    pub fn resolve_component(&self, path: &str) -> &ComponentRef {
        self.resolve(path).component()
    }

    /// Iterate over every entry, depth first.
    #[must_use]
    pub fn routes(&self) -> Routes<'_> {
        Routes {
            stack: self.entries.iter().rev().map(|entry| (0, entry)).collect(),
        }
    }

    /// Collect exact leaf routes with their effective sidebars.
    #[must_use]
    pub fn leaves(&self) -> Vec<LeafRoute<'_>> {
        fn collect_leaves<'a>(
            entries: &'a [RouteEntry],
            inherited: Option<&'a str>,
            out: &mut Vec<LeafRoute<'a>>,
        ) {
            for entry in entries {
                let sidebar = entry.sidebar.as_deref().or(inherited);
                if entry.is_namespace() {
                    collect_leaves(&entry.routes, sidebar, out);
                } else if entry.exact {
                    out.push(LeafRoute {
                        path: &entry.path,
                        component: &entry.component,
                        sidebar,
                    });
                }
            }
        }

        let mut leaves = Vec::new();
        collect_leaves(&self.entries, None, &mut leaves);
        leaves
    }

    /// Total number of entries, nested ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes().count()
    }

    /// Always `false`: a valid table holds at least the catch-all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Depth-first match, recording the entries on the way down.
    fn match_entries<'a>(
        &'a self,
        entries: &'a [RouteEntry],
        targets: &[Target],
        request: &Request<'_>,
        chain: &mut Vec<&'a RouteEntry>,
    ) -> bool {
        for (entry, target) in entries.iter().zip(targets) {
            if !self.entry_matches(entry, target, request) {
                continue;
            }
            chain.push(entry);
            if !entry.is_namespace()
                || self.match_entries(&entry.routes, &target.children, request, chain)
            {
                return true;
            }
            chain.pop();
        }
        false
    }

    fn entry_matches(&self, entry: &RouteEntry, target: &Target, request: &Request<'_>) -> bool {
        if entry.is_catch_all() {
            return true;
        }

        let MatchOptions {
            case_sensitive,
            strict_trailing_slash,
        } = self.options;

        if entry.exact && !entry.is_namespace() {
            same_path(request.path, &target.path, case_sensitive)
                && (!strict_trailing_slash || target.trailing_slash == request.trailing_slash)
        } else {
            has_prefix(request.path, &target.path, case_sensitive)
        }
    }
}

/// Normalized entry path, mirroring the entry tree.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Target {
    path: String,
    trailing_slash: bool,
    children: Vec<Target>,
}

impl Target {
    fn build(entries: &[RouteEntry]) -> Vec<Self> {
        entries
            .iter()
            .map(|entry| Self {
                path: normalize_path(&entry.path).into_owned(),
                trailing_slash: has_trailing_slash(&entry.path),
                children: Self::build(&entry.routes),
            })
            .collect()
    }
}

/// Normalized request path.
struct Request<'a> {
    path: &'a str,
    trailing_slash: bool,
}

fn validate_top_level(entries: &[RouteEntry]) -> Result<(), TableError> {
    let len = entries.len();
    match entries.iter().position(RouteEntry::is_catch_all) {
        None => Err(TableError::MissingCatchAll),
        Some(position) if position + 1 != len => {
            Err(TableError::CatchAllNotLast { position, len })
        }
        Some(_) => Ok(()),
    }
}

fn validate_siblings(entries: &[RouteEntry]) -> Result<(), TableError> {
    let mut seen = HashSet::new();

    for entry in entries {
        if !entry.is_catch_all() && !entry.path.starts_with('/') {
            return Err(TableError::InvalidPath(entry.path.clone()));
        }
        if entry.component.id().is_empty() {
            return Err(TableError::EmptyComponent(entry.path.clone()));
        }
        if !seen.insert(normalize_path(&entry.path)) {
            return Err(TableError::DuplicatePath(entry.path.clone()));
        }
        validate_siblings(&entry.routes)?;
    }

    Ok(())
}
