//! wayfinder - location registry and route tree for multi-application consoles
//!
//! Two coupled pieces:
//!
//! - [`LocationRegistry`] — maps an acting URL to a deployment context
//!   (environment, residency) and resolves logical location ids to the
//!   [`Descriptor`] deployed for that context.
//! - [`RouteTree`] — mirrors a [`RouteDefinition`] menu and computes, per node,
//!   whether it is visible ([`Condition`] over host entitlements), where it
//!   links (registry + route parameters), and whether it is activated by the
//!   current URL (with bubbling to ancestors).
//!
//! The embedding application implements [`Host`]; everything it owns
//! (URL, parameters, entitlements, the registry) is read through that one seam.
//!
//! # Example
//!
//! ```
//! use wayfinder::prelude::*;
//!
//! let mut registry = LocationRegistry::new();
//! registry.set_locations(vec![
//!     Descriptor::new("billing", Environment::Production, Some(Residency::Us), "https://billing.example.com").unwrap(),
//! ]);
//!
//! struct Console { url: String, registry: LocationRegistry }
//!
//! impl Host for Console {
//!     fn current_url(&self) -> &str { &self.url }
//!     fn route_parameter(&self, _name: &str) -> Option<&str> { None }
//!     fn registry(&self) -> &LocationRegistry { &self.registry }
//!     fn evaluate(&self, condition: &Entitlement) -> bool { condition.key() == "billing.read" }
//! }
//!
//! let menu = RouteDefinition::new("Console")
//!     .child(
//!         RouteDefinition::new("Invoices")
//!             .with_id("invoices")
//!             .link("billing", "/invoices")
//!             .visible_when(Condition::entitlement("billing.read")),
//!     );
//!
//! let host = Console { url: "https://billing.example.com/invoices".into(), registry };
//! let tree = RouteTree::new(menu, host);
//!
//! let invoices = tree.find("invoices").unwrap();
//! assert!(invoices.is_visible());
//! assert!(invoices.is_activated());
//! assert_eq!(invoices.href(), Some("https://billing.example.com/invoices"));
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod condition;
mod config;
mod context_rule;
mod definition;
mod host;
mod link;
mod location;
mod node;
mod pattern;
mod registry;
mod trace;
mod tree;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Location registry
pub use config::{DescriptorConfig, LocationSeed};
pub use context_rule::{ContextRule, DEFAULT_ACTING_URI};
pub use location::{Descriptor, Environment, LocationContext, Residency};
pub use pattern::{escape_location_pattern, WILDCARD, WILDCARD_CLASS};
pub use registry::{ActingUri, LocationRegistry};

// Route tree
pub use condition::{Condition, Entitlement, Rule};
pub use definition::{Action, ActionKind, RouteDefinition};
pub use host::{Host, NullHost};
pub use node::{NodeId, RouteNode};
pub use tree::RouteTree;

// Trace types
pub use trace::ConditionTrace;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use wayfinder::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Route tree
        Action,
        ActionKind,
        // Registry
        ActingUri,
        Condition,
        ConditionTrace,
        Descriptor,
        Entitlement,
        Environment,
        // Errors
        Error,
        Host,
        LocationContext,
        LocationRegistry,
        NodeId,
        NullHost,
        Residency,
        RouteDefinition,
        RouteNode,
        RouteTree,
        Rule,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from configuration loading.
///
/// Tree construction and refresh never fail: unknown locations and missing
/// route parameters degrade node visibility instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A match or context pattern is not a valid regular expression.
    #[error("invalid pattern \"{pattern}\": {source}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The regex compile error.
        #[source]
        source: regex::Error,
    },

    /// Configuration deserialization failed.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// The underlying error message.
        message: String,
    },
}

impl Error {
    /// Wrap a deserialization error.
    pub fn config(source: impl std::fmt::Display) -> Self {
        Self::InvalidConfig {
            message: source.to_string(),
        }
    }
}

/// Result alias for configuration loading.
pub type Result<T, E = Error> = std::result::Result<T, E>;
