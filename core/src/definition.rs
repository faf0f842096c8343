//! Route definitions — the immutable input to a [`RouteTree`](crate::RouteTree)
//!
//! Definitions deserialize from JSON/YAML or are assembled with the builder
//! methods below. Children are shared behind `Arc` so every runtime node can
//! keep its own definition without copying subtrees.
//!
//! ```yaml
//! caption: Billing
//! action: { type: link, location: billing, path: /accounts/:accountId }
//! visible: { entitlements: billing.read }
//! matches: ["/accounts/[^/]+/invoices"]
//! children: []
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Condition, Error};

/// What a node's action does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Navigate to `location` + `path`; resolved into an href.
    Link,
    /// Fire a named trigger through the host's dispatch.
    Trigger,
    /// Any other action type; never resolved.
    #[serde(other)]
    Other,
}

/// A node's action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Action type.
    #[serde(rename = "type")]
    pub kind: ActionKind,

    /// Logical location id (links).
    #[serde(default)]
    pub location: Option<String>,

    /// Path appended to the location's base URI; may contain `:name` tokens.
    #[serde(default)]
    pub path: Option<String>,

    /// Trigger name (triggers).
    #[serde(default)]
    pub trigger: Option<String>,
}

impl Action {
    /// A link to `path` under `location`.
    pub fn link(location: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Link,
            location: Some(location.into()),
            path: Some(path.into()),
            trigger: None,
        }
    }

    /// A named trigger.
    pub fn trigger(name: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Trigger,
            location: None,
            path: None,
            trigger: Some(name.into()),
        }
    }

    /// Whether this action resolves to an href.
    #[must_use]
    pub fn is_link(&self) -> bool {
        self.kind == ActionKind::Link
    }
}

/// One node of the route definition tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Stable id for lookups.
    #[serde(default)]
    pub id: Option<String>,

    /// Display caption.
    pub caption: String,

    /// What happens when the node is chosen.
    #[serde(default)]
    pub action: Option<Action>,

    /// Visibility condition; absent means always visible.
    #[serde(default)]
    pub visible: Option<Condition>,

    /// Extra patterns (relative to the base href) that activate the node.
    #[serde(default)]
    pub matches: Vec<String>,

    /// Ordered child definitions.
    #[serde(default)]
    pub children: Vec<Arc<RouteDefinition>>,

    /// Propagate activation and href to the parent.
    #[serde(default)]
    pub bubble: bool,

    /// Default property values.
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl RouteDefinition {
    /// A definition with only a caption.
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            ..Self::default()
        }
    }

    /// Set the id (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the action (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Link to `path` under `location` (builder pattern).
    #[must_use]
    pub fn link(self, location: impl Into<String>, path: impl Into<String>) -> Self {
        self.with_action(Action::link(location, path))
    }

    /// Gate visibility on `condition` (builder pattern).
    #[must_use]
    pub fn visible_when(mut self, condition: Condition) -> Self {
        self.visible = Some(condition);
        self
    }

    /// Add an activation pattern (builder pattern).
    #[must_use]
    pub fn matching(mut self, pattern: impl Into<String>) -> Self {
        self.matches.push(pattern.into());
        self
    }

    /// Append a child (builder pattern).
    #[must_use]
    pub fn child(mut self, child: RouteDefinition) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    /// Enable bubbling (builder pattern).
    #[must_use]
    pub fn bubble(mut self) -> Self {
        self.bubble = true;
        self
    }

    /// Add a default property (builder pattern).
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Parse a definition tree from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `json` does not describe a definition.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Error::config)
    }

    /// Number of definitions in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }
}
