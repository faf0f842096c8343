//! Context rules — classify an acting URL into (environment, residency)
//!
//! Rules are tried in order and the first match wins. The built-in list covers
//! production regional variants, integration and local development hosts.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Environment, Error, LocationContext, Residency};

/// Placeholder acting URL for "context not known yet".
///
/// Classifies as production/US under the built-in rules.
pub const DEFAULT_ACTING_URI: &str = "https://console.example.com/";

/// Built-in rule table: (pattern, environment, residency).
///
/// Host patterns end at a port, path, query, fragment, or end of input so
/// `console.example.com.evil.test` never classifies.
const BUILTIN_RULES: &[(&str, &str, &str)] = &[
    (
        r"^https://([a-zA-Z0-9-]+\.)*console\.eu\.example\.com(:\d+)?([/?#]|$)",
        "production",
        "EMEA",
    ),
    (
        r"^https://([a-zA-Z0-9-]+\.)*console\.example\.com(:\d+)?([/?#]|$)",
        "production",
        "US",
    ),
    (
        r"^https://([a-zA-Z0-9-]+\.)*console\.int\.eu\.example\.com(:\d+)?([/?#]|$)",
        "integration",
        "EMEA",
    ),
    (
        r"^https://([a-zA-Z0-9-]+\.)*console\.int\.example\.com(:\d+)?([/?#]|$)",
        "integration",
        "US",
    ),
    (
        r"^https?://(localhost|127\.0\.0\.1|[a-zA-Z0-9.-]+\.local)(:\d+)?([/?#]|$)",
        "development",
        "US",
    ),
];

#[allow(clippy::expect_used)] // patterns are compile-time constants covered by tests
static BUILTIN: LazyLock<Vec<ContextRule>> = LazyLock::new(|| {
    BUILTIN_RULES
        .iter()
        .map(|(pattern, env, residency)| {
            ContextRule::new(pattern, Environment::from(*env), Residency::from(*residency))
                .expect("built-in context pattern compiles")
        })
        .collect()
});

/// One acting-URL classification rule.
#[derive(Debug, Clone)]
pub struct ContextRule {
    pattern: Regex,
    environment: Environment,
    residency: Residency,
}

impl ContextRule {
    /// Compile a rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if `pattern` is not a valid regex.
    pub fn new(pattern: &str, environment: Environment, residency: Residency) -> Result<Self, Error> {
        let pattern = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self {
            pattern,
            environment,
            residency,
        })
    }

    /// The built-in rules, in evaluation order.
    #[must_use]
    pub fn builtin() -> &'static [ContextRule] {
        &BUILTIN
    }

    /// The environment this rule assigns.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The residency this rule assigns.
    #[must_use]
    pub fn residency(&self) -> &Residency {
        &self.residency
    }

    /// Whether `url` falls under this rule.
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }

    /// The context this rule derives for `url`.
    #[must_use]
    pub fn context_for(&self, url: &str) -> LocationContext {
        LocationContext {
            environment: self.environment.clone(),
            residency: self.residency.clone(),
            acting_uri: Some(url.to_owned()),
        }
    }
}

/// Classify `url` against `rules`; first match wins.
#[must_use]
pub fn classify(rules: &[ContextRule], url: &str) -> Option<LocationContext> {
    rules
        .iter()
        .find(|rule| rule.matches(url))
        .map(|rule| rule.context_for(url))
}
