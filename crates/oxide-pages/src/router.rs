//! The page router: a route tree plus its registry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::PagesConfig;
use crate::discovery::{discover, PageFile};
use crate::error::{Result, RouteError};
use crate::matcher::RouteMatch;
use crate::pattern::Route;
use crate::registry::Registry;
use crate::tree::RouteTree;

/// File-system based router.
///
/// Built once, then read-only: a `PageRouter` can be shared between
/// threads (for example behind an `Arc`) and matched concurrently. To pick
/// up new pages, build a new router and swap it in.
#[derive(Debug, Default)]
pub struct PageRouter {
    tree: RouteTree,
    registry: Registry,
    sources: HashMap<String, PathBuf>,
}

impl PageRouter {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a router from parsed routes.
    ///
    /// # Errors
    ///
    /// Returns every duplicate and conflict found, as a single error or as
    /// [`RouteError::Multiple`].
    pub fn from_routes<I>(routes: I) -> Result<Self>
    where
        I: IntoIterator<Item = Route>,
    {
        let mut router = Self::new();
        let errors: Vec<RouteError> = routes
            .into_iter()
            .filter_map(|route| router.add(route).err())
            .collect();
        RouteError::collect(errors)?;
        info!(routes = router.len(), "Built page router");
        Ok(router)
    }

    /// Builds a router from discovered page files.
    ///
    /// Errors are tagged with the page file that caused them. When two files
    /// map to the same pattern, the error names both.
    ///
    /// # Errors
    ///
    /// Returns every malformed pattern, duplicate and conflict found.
    pub fn from_pages<I>(pages: I) -> Result<Self>
    where
        I: IntoIterator<Item = PageFile>,
    {
        let mut router = Self::new();
        let mut errors = Vec::new();

        for page in pages {
            if let Some(first) = router.sources.get(&page.pattern) {
                warn!(pattern = %page.pattern, "Rejected duplicate page");
                errors.push(RouteError::DuplicatePage {
                    first: first.clone(),
                    second: page.relative_path,
                    pattern: page.pattern,
                });
                continue;
            }
            let result = Route::parse(&page.pattern).and_then(|route| router.add(route));
            match result {
                Ok(()) => {
                    router.sources.insert(page.pattern, page.relative_path);
                }
                Err(e) => errors.push(e.in_page(page.relative_path)),
            }
        }

        RouteError::collect(errors)?;
        info!(routes = router.len(), "Built page router");
        Ok(router)
    }

    /// Discovers pages on disk and builds a router from them.
    ///
    /// # Errors
    ///
    /// Returns discovery errors, or every route error found while building.
    pub fn from_config(config: &PagesConfig) -> Result<Self> {
        let pages = discover(config)?;
        info!(
            dir = %config.pages_dir.display(),
            pages = pages.len(),
            "Discovered pages"
        );
        Self::from_pages(pages)
    }

    /// Adds a route to both the tree and the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DuplicateRoute`] or
    /// [`RouteError::ConstructionConflict`]; the router is unchanged then.
    pub fn add(&mut self, route: impl Into<Arc<Route>>) -> Result<()> {
        let route = route.into();
        self.tree.insert(Arc::clone(&route))?;
        self.registry.register(route)
    }

    /// Resolves a request path to its route and bindings.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        self.tree.find(path)
    }

    /// Looks up a route by its exact pattern.
    #[must_use]
    pub fn route(&self, pattern: &str) -> Option<&Route> {
        self.registry.lookup(pattern).map(AsRef::as_ref)
    }

    /// Returns the page file a pattern was discovered from, if any.
    #[must_use]
    pub fn source(&self, pattern: &str) -> Option<&Path> {
        self.sources.get(pattern).map(PathBuf::as_path)
    }

    /// Returns all routes, in no particular order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.registry.routes().map(AsRef::as_ref)
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns whether the router has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Returns the underlying route tree.
    #[must_use]
    pub const fn tree(&self) -> &RouteTree {
        &self.tree
    }

    /// Returns the underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }
}
