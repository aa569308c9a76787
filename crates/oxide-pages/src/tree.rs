//! Arena-indexed route tree.
//!
//! Every node is one segment position in the URL space. A node can have
//! static children, one dynamic child and one catch-all child at the same
//! time; which one wins for a given request path is decided by the matcher.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Result, RouteError};
use crate::pattern::{Route, Segment};

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) const ROOT: Self = Self(0);
}

#[derive(Debug, Default)]
pub(crate) struct Node {
    pub(crate) static_children: HashMap<String, NodeId>,
    pub(crate) dynamic_child: Option<NodeId>,
    pub(crate) catch_all_child: Option<NodeId>,
    /// Bound name on dynamic and catch-all nodes.
    pub(crate) parameter: Option<String>,
    pub(crate) route: Option<Arc<Route>>,
}

/// Where insertion has to create nodes, found by a read-only walk.
enum Graft<'r> {
    /// The whole pattern already exists as a path of nodes.
    Existing(NodeId),
    /// Nodes must be created from `segments[index..]` below `parent`.
    From {
        parent: NodeId,
        index: usize,
        segments: Vec<Segment<'r>>,
    },
}

/// A prefix tree of route patterns keyed by path segment.
#[derive(Debug)]
pub struct RouteTree {
    nodes: Vec<Node>,
}

impl Default for RouteTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTree {
    /// Creates a tree holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Builds a tree from a set of routes.
    ///
    /// Every route is attempted; failures do not stop the build.
    ///
    /// # Errors
    ///
    /// Returns every conflict and duplicate found, as a single error or as
    /// [`RouteError::Multiple`].
    pub fn build<I, R>(routes: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Arc<Route>>,
    {
        let mut tree = Self::new();
        let errors: Vec<RouteError> = routes
            .into_iter()
            .filter_map(|route| tree.insert(route).err())
            .collect();
        RouteError::collect(errors)?;
        Ok(tree)
    }

    /// Inserts a route.
    ///
    /// The tree is only modified when insertion succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::ConstructionConflict`] when a dynamic or
    /// catch-all position is already bound to a different parameter name,
    /// and [`RouteError::DuplicateRoute`] when a route already ends at the
    /// same node.
    pub fn insert(&mut self, route: impl Into<Arc<Route>>) -> Result<()> {
        let route = route.into();
        let terminal = match self.plan(&route)? {
            Graft::Existing(node) => node,
            Graft::From {
                parent,
                index,
                segments,
            } => self.graft(parent, &segments[index..]),
        };

        debug!(pattern = %route.pattern(), "Inserted route");
        self.nodes[terminal.0].route = Some(route);
        Ok(())
    }

    /// Walks the existing nodes for `route`, checking parameter names and
    /// duplicates without creating anything.
    fn plan<'r>(&self, route: &'r Route) -> Result<Graft<'r>> {
        let segments: Vec<Segment<'r>> = route.segments().collect();
        let mut current = NodeId::ROOT;
        let mut position = String::new();
        let mut graft_at = None;

        for (index, segment) in segments.iter().enumerate() {
            // Nothing can hang below a catch-all node.
            if matches!(segment, Segment::CatchAll(_)) && index + 1 != segments.len() {
                warn!(pattern = %route.pattern(), "Rejected malformed route");
                return Err(RouteError::malformed(
                    route.pattern(),
                    "catch-all segment must be last",
                ));
            }
            let node = &self.nodes[current.0];
            let next = match *segment {
                Segment::Static(text) => {
                    position.push('/');
                    position.push_str(text);
                    node.static_children.get(text).copied()
                }
                Segment::Dynamic(name) => {
                    position.push_str(&format!("/[{name}]"));
                    node.dynamic_child
                }
                Segment::CatchAll(name) => {
                    position.push_str(&format!("/[...{name}]"));
                    node.catch_all_child
                }
            };

            let Some(next) = next else {
                graft_at = Some(index);
                break;
            };

            if let (Some(requested), Some(existing)) =
                (segment.parameter(), self.nodes[next.0].parameter.as_deref())
            {
                if requested != existing {
                    warn!(pattern = %route.pattern(), %position, "Rejected conflicting route");
                    return Err(RouteError::ConstructionConflict {
                        pattern: route.pattern().to_string(),
                        position,
                        existing: existing.to_string(),
                        requested: requested.to_string(),
                    });
                }
            }
            current = next;
        }

        if let Some(index) = graft_at {
            return Ok(Graft::From {
                parent: current,
                index,
                segments,
            });
        }
        if self.nodes[current.0].route.is_some() {
            warn!(pattern = %route.pattern(), "Rejected duplicate route");
            return Err(RouteError::DuplicateRoute {
                pattern: route.pattern().to_string(),
            });
        }
        Ok(Graft::Existing(current))
    }

    /// Creates nodes for `segments` below `parent`, returning the last one.
    fn graft(&mut self, parent: NodeId, segments: &[Segment<'_>]) -> NodeId {
        let mut current = parent;
        for segment in segments {
            let child = self.push_node(segment.parameter());
            let node = &mut self.nodes[current.0];
            match *segment {
                Segment::Static(text) => {
                    node.static_children.insert(text.to_string(), child);
                }
                Segment::Dynamic(_) => node.dynamic_child = Some(child),
                Segment::CatchAll(_) => {
                    node.catch_all_child = Some(child);
                    return child;
                }
            }
            current = child;
        }
        current
    }

    fn push_node(&mut self, parameter: Option<&str>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parameter: parameter.map(str::to_string),
            ..Node::default()
        });
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns the number of nodes, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of routes stored in the tree.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.route.is_some()).count()
    }
}
