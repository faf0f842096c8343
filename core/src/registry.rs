//! `LocationRegistry` — descriptor set plus inferred deployment context
//!
//! Lifecycle: `new → set_locations → set_acting_uri*`. The registry is an
//! explicit value owned by the caller (usually the [`Host`](crate::Host)); it is
//! never a global.
//!
//! # Example
//!
//! ```
//! use wayfinder::{ActingUri, Descriptor, Environment, LocationRegistry, Residency};
//!
//! let mut registry = LocationRegistry::new();
//! registry.set_locations(vec![
//!     Descriptor::new("iam", Environment::Production, Some(Residency::Us), "https://iam.example.com").unwrap(),
//!     Descriptor::new("iam", Environment::Production, Some(Residency::Emea), "https://iam.eu.example.com").unwrap(),
//! ]);
//!
//! assert_eq!(registry.get_node("iam").unwrap().uri(), "https://iam.example.com");
//!
//! registry.set_acting_uri(ActingUri::Url("https://console.eu.example.com/home"));
//! assert_eq!(registry.get_node("iam").unwrap().uri(), "https://iam.eu.example.com");
//! ```

use tracing::debug;

use crate::{
    context_rule::{self, ContextRule},
    Descriptor, DescriptorConfig, Error, LocationContext, LocationSeed, DEFAULT_ACTING_URI,
};

/// The acting URL handed to [`LocationRegistry::set_acting_uri`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActingUri<'a> {
    /// Classify this URL.
    Url(&'a str),
    /// Use the placeholder [`DEFAULT_ACTING_URI`] (context not known yet).
    Default,
}

impl<'a> From<&'a str> for ActingUri<'a> {
    fn from(url: &'a str) -> Self {
        Self::Url(url)
    }
}

impl ActingUri<'_> {
    fn as_str(&self) -> &str {
        match self {
            Self::Url(url) => *url,
            Self::Default => DEFAULT_ACTING_URI,
        }
    }
}

/// Owns location descriptors and the current [`LocationContext`].
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    descriptors: Vec<Descriptor>,
    context: LocationContext,
    rules: Vec<ContextRule>,
}

impl Default for LocationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationRegistry {
    /// An empty registry using the built-in context rules and the default
    /// production/US context.
    #[must_use]
    pub fn new() -> Self {
        Self::with_context_rules(ContextRule::builtin().to_vec())
    }

    /// An empty registry classifying acting URLs with custom `rules`.
    #[must_use]
    pub fn with_context_rules(rules: Vec<ContextRule>) -> Self {
        Self {
            descriptors: Vec::new(),
            context: LocationContext::default(),
            rules,
        }
    }

    /// Replace the descriptor set wholesale.
    pub fn set_locations(&mut self, descriptors: Vec<Descriptor>) {
        debug!(count = descriptors.len(), "replacing location descriptors");
        self.descriptors = descriptors;
    }

    /// Build descriptors from config and install them.
    ///
    /// Atomic: on error the current descriptor set is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for the first config whose match
    /// pattern does not compile.
    pub fn load(&mut self, configs: Vec<DescriptorConfig>) -> Result<(), Error> {
        let descriptors = configs
            .into_iter()
            .map(Descriptor::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        self.set_locations(descriptors);
        Ok(())
    }

    /// Expand seeds (one descriptor per environment × residency) and install them.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_seeds(&mut self, seeds: Vec<LocationSeed>) -> Result<(), Error> {
        let configs = seeds.into_iter().flat_map(LocationSeed::expand).collect();
        self.load(configs)
    }

    /// Classify an acting URL and update the context.
    ///
    /// The first matching context rule wins. When nothing matches, the context
    /// is left unchanged and `false` is returned.
    pub fn set_acting_uri(&mut self, uri: ActingUri<'_>) -> bool {
        let url = uri.as_str();
        match context_rule::classify(&self.rules, url) {
            Some(context) => {
                debug!(
                    url = %url,
                    environment = %context.environment,
                    residency = %context.residency,
                    "classified acting uri"
                );
                self.context = context;
                true
            }
            None => {
                debug!(url = %url, "acting uri matches no context rule; context unchanged");
                false
            }
        }
    }

    /// The current context.
    #[must_use]
    pub fn context(&self) -> &LocationContext {
        &self.context
    }

    /// All descriptors, in registration order.
    #[must_use]
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// The descriptor for `loc_type_id` serving the current context.
    ///
    /// Returns `None` when the location has no deployment for this context;
    /// there is no fallback to another environment or residency.
    #[must_use]
    pub fn get_node(&self, loc_type_id: &str) -> Option<&Descriptor> {
        self.find_one(|d| d.loc_type_id() == loc_type_id && d.serves(&self.context))
    }

    /// The descriptor whose match pattern recognises `url`, regardless of the
    /// current context.
    #[must_use]
    pub fn get_node_by_uri(&self, url: &str) -> Option<&Descriptor> {
        self.find_one(|d| d.matches_uri(url))
    }

    /// All descriptors satisfying `predicate`, in registration order.
    pub fn search<P>(&self, mut predicate: P) -> Vec<&Descriptor>
    where
        P: FnMut(&Descriptor) -> bool,
    {
        self.descriptors.iter().filter(|d| predicate(*d)).collect()
    }

    /// The first descriptor satisfying `predicate`.
    pub fn find_one<P>(&self, mut predicate: P) -> Option<&Descriptor>
    where
        P: FnMut(&Descriptor) -> bool,
    {
        self.descriptors.iter().find(|d| predicate(*d))
    }
}
