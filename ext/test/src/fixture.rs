//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against wayfinder. A fixture names a
//! descriptor seed set, a route definition tree, and cases; each case builds a
//! fresh tree under its own URL, parameters and entitlements and checks the
//! resulting node states.
//!
//! ```yaml
//! name: link resolution
//! description: hrefs follow the acting context
//! locations:
//!   - id: app
//!     targets: { production: { US: https://app.example.com } }
//! routes:
//!   caption: Root
//!   children:
//!     - { id: home, caption: Home, action: { type: link, location: app, path: /home } }
//! cases:
//!   - name: resolved
//!     url: https://app.example.com/home
//!     expect:
//!       home: { visible: true, activated: true, href: https://app.example.com/home }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer};
use wayfinder::prelude::*;
use wayfinder::LocationSeed;

use crate::TestHost;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub locations: Vec<LocationSeed>,
    pub routes: RouteDefinition,
    pub cases: Vec<TestCase>,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    #[serde(default)]
    pub url: String,
    /// Acting URI for the registry; absent keeps the default context.
    #[serde(default)]
    pub acting_uri: Option<String>,
    #[serde(default)]
    pub params: HashMap<String, String>,
    #[serde(default)]
    pub entitlements: HashMap<String, bool>,
    /// Expected state keyed by route id.
    pub expect: BTreeMap<String, ExpectedState>,
}

/// Expected node state; absent fields are not checked.
#[derive(Debug, Default, Deserialize)]
pub struct ExpectedState {
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub activated: Option<bool>,
    /// `null` asserts that the node has no href.
    #[serde(default, deserialize_with = "present")]
    pub href: Option<Option<String>>,
}

/// Distinguish an explicit `null` from an absent field.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builder: Convert fixture to wayfinder types
// ═══════════════════════════════════════════════════════════════════════════════

impl Fixture {
    /// Build a registry from this fixture's seeds.
    ///
    /// # Errors
    ///
    /// Returns the first descriptor that fails to compile.
    pub fn build_registry(&self) -> Result<LocationRegistry, Error> {
        let mut registry = LocationRegistry::new();
        registry.load_seeds(self.locations.clone())?;
        Ok(registry)
    }
}

impl TestCase {
    /// Build a host for this case around `registry`.
    pub fn build_host(&self, mut registry: LocationRegistry) -> TestHost {
        if let Some(acting_uri) = &self.acting_uri {
            registry.set_acting_uri(ActingUri::Url(acting_uri));
        }
        let mut host = TestHost::new()
            .with_url(self.url.clone())
            .with_entitlements(self.entitlements.clone())
            .with_registry(registry);
        for (name, value) in &self.params {
            host.set_param(name.clone(), value.clone());
        }
        host
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub failures: Vec<String>,
}

impl CaseResult {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Fixture {
    /// Parse a fixture from YAML
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the YAML does not describe a fixture.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        serde_yaml::from_str(yaml).map_err(Error::config)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for the first malformed document.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, Error> {
        serde_yaml::Deserializer::from_str(yaml)
            .map(|doc| Self::deserialize(doc).map_err(Error::config))
            .collect()
    }

    /// Run all test cases and return results
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture's seeds do not load.
    pub fn run(&self) -> Result<Vec<CaseResult>, Error> {
        let registry = self.build_registry()?;
        Ok(self
            .cases
            .iter()
            .map(|case| {
                let host = case.build_host(registry.clone());
                let tree = RouteTree::new(self.routes.clone(), host);
                CaseResult {
                    case_name: case.name.clone(),
                    failures: check(&tree, &case.expect),
                }
            })
            .collect())
    }

    /// Run all test cases and panic on first failure
    ///
    /// # Panics
    ///
    /// Panics if the fixture does not load or any case fails.
    pub fn run_and_assert(&self) {
        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to load: {e}", self.name));
        for result in results {
            assert!(
                result.passed(),
                "Fixture '{}' case '{}' failed:\n  {}",
                self.name,
                result.case_name,
                result.failures.join("\n  ")
            );
        }
    }
}

fn check(tree: &RouteTree<TestHost>, expect: &BTreeMap<String, ExpectedState>) -> Vec<String> {
    let mut failures = Vec::new();
    for (route_id, expected) in expect {
        let Some(node) = tree.find(route_id) else {
            failures.push(format!("{route_id}: no node with this id"));
            continue;
        };
        if let Some(visible) = expected.visible {
            if node.is_visible() != visible {
                failures.push(format!(
                    "{route_id}: visible expected {visible}, got {}",
                    node.is_visible()
                ));
            }
        }
        if let Some(activated) = expected.activated {
            if node.is_activated() != activated {
                failures.push(format!(
                    "{route_id}: activated expected {activated}, got {}",
                    node.is_activated()
                ));
            }
        }
        if let Some(href) = &expected.href {
            if node.href() != href.as_deref() {
                failures.push(format!(
                    "{route_id}: href expected {href:?}, got {:?}",
                    node.href()
                ));
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r"
name: inline
locations:
  - id: app
    targets:
      production:
        US: https://app.example.com
routes:
  caption: Root
  id: root
  children:
    - id: home
      caption: Home
      action: { type: link, location: app, path: /home }
cases:
  - name: active
    url: https://app.example.com/home
    expect:
      home: { visible: true, activated: true, href: https://app.example.com/home }
      root: { activated: true, href: null }
";

    #[test]
    fn parses_and_runs() {
        let fixture = Fixture::from_yaml(YAML).unwrap();
        assert_eq!(fixture.cases.len(), 1);
        let expect = &fixture.cases[0].expect;
        assert_eq!(expect["root"].href, Some(None));
        assert_eq!(expect["root"].visible, None);
        fixture.run_and_assert();
    }

    #[test]
    fn reports_mismatches() {
        let mut fixture = Fixture::from_yaml(YAML).unwrap();
        fixture.cases[0].url = "https://app.example.com/elsewhere".into();
        let results = fixture.run().unwrap();
        assert!(!results[0].passed());
        assert!(results[0].failures.iter().any(|f| f.starts_with("home: activated")));
    }

    #[test]
    fn malformed_yaml_is_config_error() {
        let err = Fixture::from_yaml("name: [").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
