//! Pattern-keyed route registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, RouteError};
use crate::pattern::Route;

/// All known routes, keyed by pattern string.
///
/// Used for introspection and reverse lookups; request resolution goes
/// through the [`RouteTree`](crate::RouteTree).
#[derive(Debug, Default, Clone)]
pub struct Registry {
    routes: HashMap<String, Arc<Route>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route under its pattern.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DuplicateRoute`] if the pattern is already
    /// registered; the existing route is kept.
    pub fn register(&mut self, route: impl Into<Arc<Route>>) -> Result<()> {
        let route = route.into();
        if self.routes.contains_key(route.pattern()) {
            return Err(RouteError::DuplicateRoute {
                pattern: route.pattern().to_string(),
            });
        }
        self.routes.insert(route.pattern().to_string(), route);
        Ok(())
    }

    /// Looks up a route by its exact pattern.
    #[must_use]
    pub fn lookup(&self, pattern: &str) -> Option<&Arc<Route>> {
        self.routes.get(pattern)
    }

    /// Returns whether a pattern is registered.
    #[must_use]
    pub fn contains(&self, pattern: &str) -> bool {
        self.routes.contains_key(pattern)
    }

    /// Returns all routes, in no particular order.
    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.values()
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
