//! `Host` — the embedding application's side of the contract
//!
//! A [`RouteTree`](crate::RouteTree) is generic over one `Host`. The host owns
//! the current URL, route parameters, entitlement state and the
//! [`LocationRegistry`]; the tree only reads them during `refresh`.

use crate::{Entitlement, LocationRegistry, RouteNode};

/// Capabilities the route tree consumes from the embedding application.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Host`",
    label = "this type cannot back a RouteTree",
    note = "implement current_url, route_parameter, registry and evaluate, or use `NullHost` in tests"
)]
pub trait Host {
    /// The current full URL, kept fresh by the caller.
    fn current_url(&self) -> &str;

    /// Value substituted for the `:name` token in link paths.
    fn route_parameter(&self, name: &str) -> Option<&str>;

    /// The registry used to resolve link locations.
    fn registry(&self) -> &LocationRegistry;

    /// Truth of a leaf condition against host-owned entitlement state.
    fn evaluate(&self, condition: &Entitlement) -> bool;

    /// A node's action fired. Only invoked through
    /// [`RouteTree::dispatch`](crate::RouteTree::dispatch).
    fn dispatch(&self, node: &RouteNode) {
        let _ = node;
    }
}

/// Host with no state: empty URL, no parameters, empty registry, no-op
/// dispatch, and every entitlement denied.
#[derive(Debug, Clone, Default)]
pub struct NullHost {
    registry: LocationRegistry,
}

impl NullHost {
    /// A null host with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for NullHost {
    fn current_url(&self) -> &str {
        ""
    }

    fn route_parameter(&self, _name: &str) -> Option<&str> {
        None
    }

    fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    fn evaluate(&self, _condition: &Entitlement) -> bool {
        false
    }
}
