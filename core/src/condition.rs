//! Condition — boolean visibility expressions over host entitlements
//!
//! A condition is either a leaf naming an entitlement (resolved by the
//! [`Host`]) or a group combining child conditions under a [`Rule`].
//!
//! ```json
//! { "entitlements": "billing.read" }
//! { "rule": "all", "conditions": [ { "entitlements": "a" }, { "entitlements": "b" } ] }
//! ```
//!
//! Groups evaluate **every** child and then count; there is no short-circuit,
//! so hosts observe one `evaluate` call per leaf.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ConditionTrace, Host};

/// How a group combines its children.
///
/// Unrecognised rule names are kept verbatim in [`Rule::Other`] and evaluate
/// with "none" semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rule {
    /// At least one child passes.
    Any,
    /// Every child passes (true for an empty group).
    All,
    /// No child passes.
    #[default]
    None,
    /// Unrecognised name; treated as [`Rule::None`].
    Other(String),
}

impl Rule {
    /// The rule name as written in config.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => "any",
            Self::All => "all",
            Self::None => "none",
            Self::Other(name) => name,
        }
    }

    /// Decide the group result from the pass count.
    #[must_use]
    pub fn decide(&self, passed: usize, total: usize) -> bool {
        match self {
            Self::Any => passed > 0,
            Self::All => passed == total,
            // Unrecognised names fall through to "none" semantics
            Self::None | Self::Other(_) => passed == 0,
        }
    }
}

impl From<String> for Rule {
    fn from(name: String) -> Self {
        match name.as_str() {
            "any" => Self::Any,
            "all" => Self::All,
            "none" => Self::None,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for Rule {
    fn from(name: &str) -> Self {
        Self::from(name.to_owned())
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.as_str().to_owned()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf condition: an entitlement key owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entitlement {
    /// The entitlement key, opaque to this crate.
    pub entitlements: String,
}

impl Entitlement {
    /// A leaf for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            entitlements: key.into(),
        }
    }

    /// The entitlement key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.entitlements
    }
}

/// A visibility condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    /// Combine child conditions under a rule.
    Group {
        /// How children combine.
        #[serde(default)]
        rule: Rule,
        /// Ordered child conditions.
        conditions: Vec<Condition>,
    },
    /// Delegate to the host.
    Entitlement(Entitlement),
}

impl Condition {
    /// Leaf condition on entitlement `key`.
    pub fn entitlement(key: impl Into<String>) -> Self {
        Self::Entitlement(Entitlement::new(key))
    }

    /// Group with an explicit rule.
    #[must_use]
    pub fn group(rule: impl Into<Rule>, conditions: Vec<Condition>) -> Self {
        Self::Group {
            rule: rule.into(),
            conditions,
        }
    }

    /// At least one of `conditions` holds.
    #[must_use]
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::group(Rule::Any, conditions)
    }

    /// Every one of `conditions` holds.
    #[must_use]
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::group(Rule::All, conditions)
    }

    /// None of `conditions` holds.
    #[must_use]
    pub fn none(conditions: Vec<Condition>) -> Self {
        Self::group(Rule::None, conditions)
    }

    /// Evaluate against the host's entitlement oracle.
    pub fn evaluate<H: Host + ?Sized>(&self, host: &H) -> bool {
        match self {
            Self::Entitlement(leaf) => host.evaluate(leaf),
            Self::Group { rule, conditions } => {
                let total = conditions.len();
                let passed = conditions.iter().filter(|c| c.evaluate(host)).count();
                rule.decide(passed, total)
            }
        }
    }

    /// Evaluate with a full trace for debugging.
    ///
    /// The result always equals [`evaluate()`](Self::evaluate).
    #[must_use]
    pub fn evaluate_with_trace<H: Host + ?Sized>(&self, host: &H) -> ConditionTrace {
        match self {
            Self::Entitlement(leaf) => ConditionTrace::Entitlement {
                key: leaf.entitlements.clone(),
                passed: host.evaluate(leaf),
            },
            Self::Group { rule, conditions } => {
                let children: Vec<ConditionTrace> = conditions
                    .iter()
                    .map(|c| c.evaluate_with_trace(host))
                    .collect();
                let passed = children.iter().filter(|c| c.passed()).count();
                ConditionTrace::Group {
                    rule: rule.clone(),
                    passed: rule.decide(passed, children.len()),
                    children,
                }
            }
        }
    }

    /// Depth of this condition tree (a leaf is 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Entitlement(_) => 1,
            Self::Group { conditions, .. } => {
                1 + conditions.iter().map(Condition::depth).max().unwrap_or(0)
            }
        }
    }
}
