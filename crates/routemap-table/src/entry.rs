//! Route entries.

use serde::{Deserialize, Serialize};

use crate::component::ComponentRef;

/// Path of the catch-all entry.
pub const CATCH_ALL_PATH: &str = "*";

/// One row of the route table.
///
/// Entries with child `routes` act as namespaces: they match by prefix and
/// delegate to their children. Child paths are absolute and repeat the
/// parent prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// URL path, or `*` for the catch-all.
    pub path: String,
    /// Component rendered for this route.
    pub component: ComponentRef,
    /// Require an exact path match instead of a prefix match. Ignored when
    /// the entry has child routes.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exact: bool,
    /// Navigation sidebar for this route and its descendants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<String>,
    /// Nested routes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteEntry>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !value
}

impl RouteEntry {
    /// Create an exact leaf entry.
    #[must_use]
    pub fn exact(path: impl Into<String>, component: ComponentRef) -> Self {
        Self {
            path: path.into(),
            component,
            exact: true,
            sidebar: None,
            routes: Vec::new(),
        }
    }

    /// Create a namespace entry that delegates to `routes`.
    #[must_use]
    pub fn namespace(
        path: impl Into<String>,
        component: ComponentRef,
        routes: Vec<RouteEntry>,
    ) -> Self {
        Self {
            path: path.into(),
            component,
            exact: false,
            sidebar: None,
            routes,
        }
    }

    /// Create the catch-all entry.
    #[must_use]
    pub fn catch_all(component: ComponentRef) -> Self {
        Self {
            path: CATCH_ALL_PATH.to_owned(),
            component,
            exact: false,
            sidebar: None,
            routes: Vec::new(),
        }
    }

    /// Set the sidebar.
    #[must_use]
    pub fn with_sidebar(mut self, sidebar: impl Into<String>) -> Self {
        self.sidebar = Some(sidebar.into());
        self
    }

    /// Whether this is the catch-all entry.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.path == CATCH_ALL_PATH
    }

    /// Whether this entry has nested routes.
    #[must_use]
    pub fn is_namespace(&self) -> bool {
        !self.routes.is_empty()
    }
}
