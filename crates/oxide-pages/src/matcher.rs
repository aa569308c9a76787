//! Request path matching.
//!
//! The search is depth-first over an explicit stack with one frame per
//! consumed segment. At every frame the alternatives are tried in the
//! order static, dynamic, catch-all; when a child runs out of
//! alternatives it is popped and its parent moves on to the next one.

use std::sync::Arc;

use serde::Serialize;

use crate::pattern::{split_segments, Route};
use crate::tree::{NodeId, RouteTree};

/// Parameter bindings extracted from a request path, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params {
    bindings: Vec<(String, String)>,
}

impl Params {
    /// Creates empty bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.push((name.into(), value.into()));
    }

    /// Gets a parameter value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parses a parameter as a specific type.
    #[must_use]
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| v.parse().ok())
    }

    /// Returns an iterator over `(name, value)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns whether there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Consumes the bindings into a vector of pairs.
    #[must_use]
    pub fn into_vec(self) -> Vec<(String, String)> {
        self.bindings
    }
}

/// A successful match: the route and its bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// The matched route.
    pub route: Arc<Route>,
    /// Parameters bound along the matched path.
    pub params: Params,
}

impl RouteMatch {
    /// Returns the pattern of the matched route.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.route.pattern()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Static,
    Dynamic,
    CatchAll,
    Exhausted,
}

#[derive(Debug)]
struct Frame {
    node: NodeId,
    /// Number of segments consumed on arrival at `node`.
    depth: usize,
    next: Next,
    /// Whether `node` was entered through a dynamic child.
    dynamic: bool,
}

impl Frame {
    const fn enter(node: NodeId, depth: usize, dynamic: bool) -> Self {
        Self {
            node,
            depth,
            next: Next::Static,
            dynamic,
        }
    }
}

impl RouteTree {
    /// Finds the most specific route for a request path.
    ///
    /// The path must be normalized the same way as patterns: a leading `/`,
    /// no trailing `/` except the root and no empty segments. Other paths
    /// never match.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_pages::{Route, RouteTree};
    ///
    /// let tree = RouteTree::build([
    ///     Route::parse("/blog/archive").unwrap(),
    ///     Route::parse("/blog/[slug]").unwrap(),
    /// ])
    /// .unwrap();
    ///
    /// let m = tree.find("/blog/hello-world").unwrap();
    /// assert_eq!(m.pattern(), "/blog/[slug]");
    /// assert_eq!(m.params.get("slug"), Some("hello-world"));
    ///
    /// let m = tree.find("/blog/archive").unwrap();
    /// assert!(m.params.is_empty());
    /// ```
    #[must_use]
    pub fn find(&self, path: &str) -> Option<RouteMatch> {
        if !path.starts_with('/') {
            return None;
        }
        let segments: Vec<&str> = split_segments(path).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        let mut stack = Vec::with_capacity(segments.len() + 1);
        stack.push(Frame::enter(NodeId::ROOT, 0, false));

        while let Some(frame) = stack.last_mut() {
            let node = self.node(frame.node);
            let depth = frame.depth;

            if depth == segments.len() {
                if let Some(route) = &node.route {
                    return Some(self.complete(route, &stack, &segments, None));
                }
                stack.pop();
                continue;
            }

            let segment = segments[depth];
            match frame.next {
                Next::Static => {
                    frame.next = Next::Dynamic;
                    if let Some(&child) = node.static_children.get(segment) {
                        stack.push(Frame::enter(child, depth + 1, false));
                    }
                }
                Next::Dynamic => {
                    frame.next = Next::CatchAll;
                    if let Some(child) = node.dynamic_child {
                        stack.push(Frame::enter(child, depth + 1, true));
                    }
                }
                Next::CatchAll => {
                    frame.next = Next::Exhausted;
                    let catch_all = node.catch_all_child.map(|id| self.node(id));
                    if let Some(child) = catch_all {
                        if let Some(route) = &child.route {
                            let rest = child
                                .parameter
                                .as_deref()
                                .map(|name| (name, segments[depth..].join("/")));
                            return Some(self.complete(route, &stack, &segments, rest));
                        }
                    }
                }
                Next::Exhausted => {
                    stack.pop();
                }
            }
        }
        None
    }

    /// Collects bindings from the frames on the winning path.
    fn complete(
        &self,
        route: &Arc<Route>,
        stack: &[Frame],
        segments: &[&str],
        catch_all: Option<(&str, String)>,
    ) -> RouteMatch {
        let mut params = Params::new();
        for frame in stack.iter().filter(|f| f.dynamic) {
            if let Some(name) = &self.node(frame.node).parameter {
                params.push(name.as_str(), segments[frame.depth - 1]);
            }
        }
        if let Some((name, value)) = catch_all {
            params.push(name, value);
        }
        RouteMatch {
            route: Arc::clone(route),
            params,
        }
    }
}
