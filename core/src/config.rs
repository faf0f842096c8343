//! Config types for descriptor construction.
//!
//! Descriptor seed data lives outside the code (JSON/YAML). These types are the
//! serde-deserializable form, loaded into a [`LocationRegistry`](crate::LocationRegistry)
//! via [`load()`](crate::LocationRegistry::load) or
//! [`load_seeds()`](crate::LocationRegistry::load_seeds).
//!
//! | Config type | Runtime type | Loader method |
//! |-------------|-------------|---------------|
//! | [`DescriptorConfig`] | [`Descriptor`] | `LocationRegistry::load()` |
//! | [`LocationSeed`] | `Vec<Descriptor>` | `LocationRegistry::load_seeds()` |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{escape_location_pattern, Descriptor, Environment, Error, Residency};

/// Configuration for one [`Descriptor`].
///
/// ```json
/// { "loc_type_id": "iam", "environment": "production", "residency": "US",
///   "uri": "https://iam.example.com" }
/// ```
///
/// When `match_pattern` is absent it is derived from `uri` with
/// [`escape_location_pattern`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorConfig {
    /// Logical location id.
    pub loc_type_id: String,

    /// Deployment environment.
    pub environment: Environment,

    /// Deployment residency; absent for region-agnostic deployments.
    #[serde(default)]
    pub residency: Option<Residency>,

    /// Base URI for hrefs.
    pub uri: String,

    /// Explicit regex recognising URLs of this deployment.
    #[serde(default)]
    pub match_pattern: Option<String>,
}

impl TryFrom<DescriptorConfig> for Descriptor {
    type Error = Error;

    fn try_from(config: DescriptorConfig) -> Result<Self, Self::Error> {
        let pattern = config
            .match_pattern
            .unwrap_or_else(|| escape_location_pattern(&config.uri));
        Descriptor::with_pattern(
            config.loc_type_id,
            config.environment,
            config.residency,
            config.uri,
            &pattern,
        )
    }
}

/// Seed data for one logical location: a URI per environment × residency.
///
/// ```yaml
/// id: iam
/// targets:
///   production:
///     US: https://iam.example.com
///     EMEA: https://iam.eu.example.com
///   integration:
///     US: https://iam.int.example.com
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSeed {
    /// Logical location id.
    pub id: String,

    /// Environment → residency → base URI.
    pub targets: BTreeMap<Environment, BTreeMap<Residency, String>>,
}

impl LocationSeed {
    /// One [`DescriptorConfig`] per (environment, residency) target.
    #[must_use]
    pub fn expand(self) -> Vec<DescriptorConfig> {
        let id = self.id;
        self.targets
            .into_iter()
            .flat_map(|(environment, by_residency)| {
                let id = id.clone();
                by_residency
                    .into_iter()
                    .map(move |(residency, uri)| DescriptorConfig {
                        loc_type_id: id.clone(),
                        environment: environment.clone(),
                        residency: Some(residency),
                        uri,
                        match_pattern: None,
                    })
            })
            .collect()
    }
}
