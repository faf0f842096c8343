//! `RouteTree` — visibility, href and activation state for a menu
//!
//! The tree is an arena of [`RouteNode`]s built once from a
//! [`RouteDefinition`]; its shape never changes afterwards. State changes only
//! through [`refresh`](RouteTree::refresh) and the property setters.
//!
//! # Refresh
//!
//! For each node, children are refreshed first (activation aggregates
//! bottom-up), then the node's own link is resolved (top-down data from the
//! registry), then its own URL match is tested:
//!
//! 1. `visible` ← the node's condition (absent → `true`)
//! 2. refresh every child; `child_activated` ← OR of their results
//! 3. visible link with no href yet (or `force_resolve`): resolve through the
//!    registry. Unknown location → hidden, no href, not activated, stop here.
//!    Missing route parameter → hidden, href keeps the literal token.
//! 4. `activated` ← `child_activated` OR own-URL match
//! 5. `bubble`: OR `activated` into the parent and overwrite its href
//!
//! # Example
//!
//! ```
//! use wayfinder::{NullHost, RouteDefinition, RouteTree};
//!
//! let menu = RouteDefinition::new("Root")
//!     .child(RouteDefinition::new("Settings").with_id("settings"));
//! let tree = RouteTree::new(menu, NullHost::new());
//!
//! let settings = tree.find("settings").unwrap();
//! assert!(settings.is_visible());
//! assert!(settings.href().is_none());
//! ```

use std::sync::Arc;

use crate::link::{self, Resolution};
use crate::{ConditionTrace, Host, NodeId, RouteDefinition, RouteNode};

/// A route tree bound to a host.
#[derive(Debug)]
pub struct RouteTree<H> {
    nodes: Vec<RouteNode>,
    host: H,
}

impl<H: Host> RouteTree<H> {
    /// Mirror `definition` into a node arena and run one `refresh(true)`.
    pub fn new(definition: impl Into<Arc<RouteDefinition>>, host: H) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            host,
        };
        tree.build(definition.into(), None);
        tree.refresh(true);
        tree
    }

    fn build(&mut self, definition: Arc<RouteDefinition>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let children = definition.children.clone();
        self.nodes.push(RouteNode::new(id, definition, parent));
        for child in children {
            let child_id = self.build(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    /// Recompute visibility, hrefs and activation for the whole tree.
    ///
    /// With `force_resolve == false`, nodes that already have an href keep it.
    /// Returns the root's activation.
    pub fn refresh(&mut self, force_resolve: bool) -> bool {
        self.refresh_node(self.root(), force_resolve)
    }

    fn refresh_node(&mut self, id: NodeId, force_resolve: bool) -> bool {
        let definition = Arc::clone(&self.nodes[id.0].definition);
        let mut visible = definition
            .visible
            .as_ref()
            .map_or(true, |condition| condition.evaluate(&self.host));

        let mut child_activated = false;
        for i in 0..self.nodes[id.0].children.len() {
            let child = self.nodes[id.0].children[i];
            // No short-circuit: every child must be refreshed.
            child_activated |= self.refresh_node(child, force_resolve);
        }

        let link = definition.action.as_ref().filter(|action| action.is_link());
        if let Some(action) = link {
            if visible && (force_resolve || self.nodes[id.0].href.is_none()) {
                match link::resolve(&self.host, action, &definition.caption) {
                    Resolution::Unknown => {
                        let node = &mut self.nodes[id.0];
                        node.base_href = None;
                        node.activation.clear();
                        node.href = None;
                        node.visible = false;
                        node.activated = false;
                        return false;
                    }
                    Resolution::Resolved {
                        base_href,
                        href,
                        complete,
                    } => {
                        let node = &mut self.nodes[id.0];
                        if node.base_href.as_deref() != Some(base_href.as_str()) {
                            node.activation =
                                link::compile_activation(&base_href, &definition.matches);
                        }
                        node.base_href = Some(base_href);
                        node.href = Some(href);
                        visible &= complete;
                    }
                }
            }
        }

        let node = &self.nodes[id.0];
        let activated = child_activated
            || link::own_match(
                self.host.current_url(),
                node.href.as_deref(),
                node.base_href.as_deref(),
                &node.activation,
            );
        let parent = node.parent;

        let node = &mut self.nodes[id.0];
        node.visible = visible;
        node.activated = activated;

        if definition.bubble {
            if let Some(parent) = parent {
                let href = self.nodes[id.0].href.clone();
                let parent = &mut self.nodes[parent.0];
                parent.activated |= activated;
                parent.href = href;
            }
        }

        activated
    }

    /// The root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &RouteNode {
        &self.nodes[id.0]
    }

    /// Mutable node access, for property updates.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    pub fn node_mut(&mut self, id: NodeId) -> &mut RouteNode {
        &mut self.nodes[id.0]
    }

    /// Node by id, `None` if out of range.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&RouteNode> {
        self.nodes.get(id.0)
    }

    /// First node (pre-order) whose definition id is `route_id`.
    #[must_use]
    pub fn find(&self, route_id: &str) -> Option<&RouteNode> {
        self.nodes.iter().find(|n| n.route_id() == Some(route_id))
    }

    /// Id of the first node (pre-order) whose definition id is `route_id`.
    #[must_use]
    pub fn find_id(&self, route_id: &str) -> Option<NodeId> {
        self.find(route_id).map(RouteNode::id)
    }

    /// Parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<&RouteNode> {
        self.node(id).parent.map(|p| self.node(p))
    }

    /// Children of `id`, in definition order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &RouteNode> + '_ {
        self.node(id).children.iter().map(|c| self.node(*c))
    }

    /// Visible children of `id`, in definition order.
    pub fn visible_children(&self, id: NodeId) -> impl Iterator<Item = &RouteNode> + '_ {
        self.children(id).filter(|n| n.is_visible())
    }

    /// All nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteNode> + '_ {
        self.nodes.iter()
    }

    /// Number of nodes (at least 1).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Chain of activated nodes from the root down, following the first
    /// activated child at each level. Empty when the root is not activated.
    #[must_use]
    pub fn activated_path(&self) -> Vec<&RouteNode> {
        let mut path = Vec::new();
        let mut current = Some(self.node(self.root())).filter(|n| n.is_activated());
        while let Some(node) = current {
            path.push(node);
            current = self.children(node.id()).find(|c| c.is_activated());
        }
        path
    }

    /// Trace of the visibility condition of `id`, if it has one.
    #[must_use]
    pub fn visibility_trace(&self, id: NodeId) -> Option<ConditionTrace> {
        self.node(id)
            .definition
            .visible
            .as_ref()
            .map(|condition| condition.evaluate_with_trace(&self.host))
    }

    /// Forward `id` to the host's dispatch.
    pub fn dispatch(&self, id: NodeId) {
        self.host.dispatch(self.node(id));
    }

    /// The bound host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host (current URL, parameters, registry).
    ///
    /// Call [`refresh`](Self::refresh) afterwards to recompute state.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Unbind the host.
    pub fn into_host(self) -> H {
        self.host
    }
}
