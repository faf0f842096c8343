//! Evaluation trace types for debugging visibility conditions.
//!
//! [`ConditionTrace`] mirrors [`Condition`](crate::Condition) but records the
//! result of every sub-expression. Produce one with
//! [`Condition::evaluate_with_trace`](crate::Condition::evaluate_with_trace) or
//! [`RouteTree::visibility_trace`](crate::RouteTree::visibility_trace).

use std::fmt;

use crate::Rule;

/// Trace of a condition evaluation.
#[derive(Clone, PartialEq, Eq)]
pub enum ConditionTrace {
    /// A leaf resolved by the host.
    Entitlement {
        /// The entitlement key.
        key: String,
        /// What the host answered.
        passed: bool,
    },
    /// A group of child conditions.
    Group {
        /// The group's rule.
        rule: Rule,
        /// The group result.
        passed: bool,
        /// Trace of each child, in order.
        children: Vec<ConditionTrace>,
    },
}

impl ConditionTrace {
    /// The overall result of this sub-expression.
    #[must_use]
    pub fn passed(&self) -> bool {
        match self {
            Self::Entitlement { passed, .. } | Self::Group { passed, .. } => *passed,
        }
    }

    /// Entitlement keys that evaluated to `false`, depth-first.
    #[must_use]
    pub fn denied_keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_denied(&mut keys);
        keys
    }

    fn collect_denied<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Entitlement { key, passed } => {
                if !passed {
                    out.push(key);
                }
            }
            Self::Group { children, .. } => {
                for child in children {
                    child.collect_denied(out);
                }
            }
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let mark = if self.passed() { "✓" } else { "✗" };
        let pad = "  ".repeat(depth);
        match self {
            Self::Entitlement { key, .. } => writeln!(f, "{pad}{mark} entitlement {key}"),
            Self::Group { rule, children, .. } => {
                writeln!(f, "{pad}{mark} {rule} ({} conditions)", children.len())?;
                for child in children {
                    child.fmt_indented(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for ConditionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entitlement { key, passed } => f
                .debug_struct("Entitlement")
                .field("key", key)
                .field("passed", passed)
                .finish(),
            Self::Group {
                rule,
                passed,
                children,
            } => f
                .debug_struct("Group")
                .field("rule", rule)
                .field("passed", passed)
                .field("children", &children.len())
                .finish(),
        }
    }
}

impl fmt::Display for ConditionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
