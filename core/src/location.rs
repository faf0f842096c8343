//! Location descriptors — concrete deployments of a logical location
//!
//! A logical location (`"billing"`, `"iam"`) is deployed once per
//! (environment × residency) pair. Each deployment is a [`Descriptor`]: a base
//! URI plus a compiled pattern recognising URLs that belong to it.
//!
//! [`LocationContext`] is the registry's inferred view of *where* the console is
//! currently running, derived from the acting URL.

use std::fmt;

use regex::Regex;

use crate::{escape_location_pattern, Error};

// ═══════════════════════════════════════════════════════════════════════════════
// Environment & Residency
// ═══════════════════════════════════════════════════════════════════════════════

/// Deployment environment.
///
/// Serialised as a lowercase string. Unknown names are kept in
/// [`Environment::Other`] so seed data can introduce new stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Environment {
    /// Customer-facing production.
    #[default]
    Production,
    /// Pre-production integration stage.
    Integration,
    /// Local development.
    Development,
    /// Any other named environment, stored lowercase.
    Other(String),
}

impl Environment {
    /// The canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Production => "production",
            Self::Integration => "integration",
            Self::Development => "development",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "production" | "prod" => Self::Production,
            "integration" | "int" => Self::Integration,
            "development" | "dev" => Self::Development,
            _ => Self::Other(name),
        }
    }
}

impl From<String> for Environment {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Environment> for String {
    fn from(env: Environment) -> Self {
        env.as_str().to_owned()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data residency region.
///
/// Serialised as an uppercase string (`"US"`, `"EMEA"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Residency {
    /// United States.
    #[default]
    Us,
    /// Europe, Middle East and Africa.
    Emea,
    /// Any other region code, stored uppercase.
    Other(String),
}

impl Residency {
    /// The canonical uppercase region code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Us => "US",
            Self::Emea => "EMEA",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for Residency {
    fn from(code: &str) -> Self {
        let code = code.to_ascii_uppercase();
        match code.as_str() {
            "US" => Self::Us,
            "EMEA" | "EU" => Self::Emea,
            _ => Self::Other(code),
        }
    }
}

impl From<String> for Residency {
    fn from(code: String) -> Self {
        Self::from(code.as_str())
    }
}

impl From<Residency> for String {
    fn from(residency: Residency) -> Self {
        residency.as_str().to_owned()
    }
}

impl fmt::Display for Residency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Descriptor
// ═══════════════════════════════════════════════════════════════════════════════

/// One concrete deployment of a logical location.
///
/// Immutable once built. The match pattern is compiled at construction, so a
/// `Descriptor` in hand is always usable for URL classification.
///
/// # Example
///
/// ```
/// use wayfinder::{Descriptor, Environment, Residency};
///
/// let billing = Descriptor::new(
///     "billing",
///     Environment::Production,
///     Some(Residency::Us),
///     "https://billing.example.com",
/// )
/// .unwrap();
///
/// assert!(billing.matches_uri("https://billing.example.com/invoices?page=2"));
/// assert!(!billing.matches_uri("https://iam.example.com/"));
/// ```
#[derive(Debug, Clone)]
pub struct Descriptor {
    loc_type_id: String,
    environment: Environment,
    residency: Option<Residency>,
    uri: String,
    match_pattern: Regex,
}

impl Descriptor {
    /// Build a descriptor whose match pattern is derived from `uri` via
    /// [`escape_location_pattern`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the derived pattern fails to compile.
    pub fn new(
        loc_type_id: impl Into<String>,
        environment: Environment,
        residency: Option<Residency>,
        uri: impl Into<String>,
    ) -> Result<Self, Error> {
        let uri = uri.into();
        let pattern = escape_location_pattern(&uri);
        Self::with_pattern(loc_type_id, environment, residency, uri, &pattern)
    }

    /// Build a descriptor with an explicit match pattern (a regular expression).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if `pattern` is not a valid regex.
    pub fn with_pattern(
        loc_type_id: impl Into<String>,
        environment: Environment,
        residency: Option<Residency>,
        uri: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, Error> {
        let match_pattern = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self {
            loc_type_id: loc_type_id.into(),
            environment,
            residency,
            uri: uri.into(),
            match_pattern,
        })
    }

    /// The logical location this descriptor deploys.
    #[must_use]
    pub fn loc_type_id(&self) -> &str {
        &self.loc_type_id
    }

    /// The environment of this deployment.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The residency of this deployment, if it is region-specific.
    #[must_use]
    pub fn residency(&self) -> Option<&Residency> {
        self.residency.as_ref()
    }

    /// The base URI used to build hrefs.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The compiled pattern source.
    #[must_use]
    pub fn match_pattern(&self) -> &str {
        self.match_pattern.as_str()
    }

    /// Whether `uri` belongs to this deployment.
    #[must_use]
    pub fn matches_uri(&self, uri: &str) -> bool {
        self.match_pattern.is_match(uri)
    }

    /// Whether this descriptor serves the given context.
    ///
    /// A descriptor without a residency serves every residency of its environment.
    #[must_use]
    pub fn serves(&self, context: &LocationContext) -> bool {
        self.environment == context.environment
            && self
                .residency
                .as_ref()
                .map_or(true, |residency| *residency == context.residency)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LocationContext
// ═══════════════════════════════════════════════════════════════════════════════

/// The inferred deployment context of the running console.
///
/// Defaults to production/US with no acting URI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationContext {
    /// Inferred environment.
    pub environment: Environment,
    /// Inferred data residency.
    pub residency: Residency,
    /// The URL the context was last derived from.
    pub acting_uri: Option<String>,
}

impl LocationContext {
    /// A context for the given environment and residency, with no acting URI.
    #[must_use]
    pub fn new(environment: Environment, residency: Residency) -> Self {
        Self {
            environment,
            residency,
            acting_uri: None,
        }
    }
}
