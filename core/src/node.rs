//! `RouteNode` — runtime state for one route definition
//!
//! Nodes live in the [`RouteTree`](crate::RouteTree) arena and refer to each
//! other by [`NodeId`]. The parent link is an index and never owns anything.
//!
//! # Property overlay
//!
//! Each node carries a mutable overlay seeded from `definition.properties`:
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `set_property(name, Some(v))` | overlay `name = v` |
//! | `set_property(name, None)` | same as `delete_property(name)` |
//! | `delete_property(name)` | restore the definition value, or drop the entry |
//! | `property_or(name, default)` | overlay value, else `default` |

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::RouteDefinition;

/// Index of a node inside its [`RouteTree`](crate::RouteTree).
///
/// Only meaningful for the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position in pre-order (the root is 0).
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Runtime state of one route.
#[derive(Debug, Clone)]
pub struct RouteNode {
    pub(crate) id: NodeId,
    pub(crate) definition: Arc<RouteDefinition>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) visible: bool,
    pub(crate) activated: bool,
    pub(crate) href: Option<String>,
    pub(crate) base_href: Option<String>,
    /// Activation patterns compiled against `base_href`.
    pub(crate) activation: Vec<Regex>,
    properties: BTreeMap<String, Value>,
}

impl RouteNode {
    pub(crate) fn new(id: NodeId, definition: Arc<RouteDefinition>, parent: Option<NodeId>) -> Self {
        let properties = definition.properties.clone();
        Self {
            id,
            definition,
            parent,
            children: Vec::new(),
            visible: false,
            activated: false,
            href: None,
            base_href: None,
            activation: Vec::new(),
            properties,
        }
    }

    /// This node's id.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The immutable definition this node mirrors.
    #[must_use]
    pub fn definition(&self) -> &RouteDefinition {
        &self.definition
    }

    /// The definition id, if any.
    #[must_use]
    pub fn route_id(&self) -> Option<&str> {
        self.definition.id.as_deref()
    }

    /// Display caption.
    #[must_use]
    pub fn caption(&self) -> &str {
        &self.definition.caption
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in definition order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the node should be shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the node (or a descendant) matches the current URL.
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Fully-qualified link target.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Base URI of the resolved location.
    #[must_use]
    pub fn base_href(&self) -> Option<&str> {
        self.base_href.as_deref()
    }

    /// All current property values.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    /// Overlay value for `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Overlay value for `name`, else `default`.
    ///
    /// The definition value is *not* consulted here; only
    /// [`delete_property`](Self::delete_property) restores it.
    #[must_use]
    pub fn property_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.properties.get(name).unwrap_or(default)
    }

    /// Overwrite `name`; `None` deletes it.
    pub fn set_property(&mut self, name: impl Into<String>, value: Option<Value>) {
        let name = name.into();
        match value {
            Some(value) => {
                self.properties.insert(name, value);
            }
            None => self.delete_property(&name),
        }
    }

    /// Restore the definition value for `name`, or remove the entry when the
    /// definition has none.
    pub fn delete_property(&mut self, name: &str) {
        match self.definition.properties.get(name) {
            Some(original) => {
                self.properties.insert(name.to_owned(), original.clone());
            }
            None => {
                self.properties.remove(name);
            }
        }
    }
}
