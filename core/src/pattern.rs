//! URI template → anchored regular expression
//!
//! Location match patterns are written as URI templates where [`WILDCARD`]
//! stands for one host or path segment (`https://*.console.example.com`).
//! [`escape_location_pattern`] turns such a template into a regex source that
//! matches any URL starting with the template.

/// Segment wildcard marker in URI templates.
pub const WILDCARD: char = '*';

/// Character class a [`WILDCARD`] expands to.
pub const WILDCARD_CLASS: &str = "[a-zA-Z0-9_]+";

/// Build an anchored regex source from a URI template.
///
/// - literal text is escaped with [`regex::escape`]
/// - each [`WILDCARD`] becomes [`WILDCARD_CLASS`]
/// - the result is anchored at the start and accepts any suffix (`.*$`), so
///   path and query variation after the template still matches
///
/// Pure and deterministic.
///
/// # Example
///
/// ```
/// use wayfinder::escape_location_pattern;
///
/// assert_eq!(
///     escape_location_pattern("https://*.example.com"),
///     r"^https://[a-zA-Z0-9_]+\.example\.com.*$",
/// );
/// ```
#[must_use]
pub fn escape_location_pattern(template: &str) -> String {
    let body = template
        .split(WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(WILDCARD_CLASS);
    format!("^{body}.*$")
}
