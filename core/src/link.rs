//! Link resolution and own-URL matching for route nodes.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::{Action, Host};

#[allow(clippy::expect_used)] // constant pattern
static PATH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([A-Za-z0-9_]+)").expect("path token pattern compiles"));

/// Result of resolving a link action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// The location has no descriptor for the current context.
    Unknown,
    /// Resolved against a descriptor.
    Resolved {
        base_href: String,
        href: String,
        /// `false` if some `:name` token had no route parameter.
        complete: bool,
    },
}

/// Resolve `action` to an href through the host's registry.
pub(crate) fn resolve<H: Host + ?Sized>(host: &H, action: &Action, caption: &str) -> Resolution {
    let Some(descriptor) = action
        .location
        .as_deref()
        .and_then(|location| host.registry().get_node(location))
    else {
        warn!(
            caption = %caption,
            location = ?action.location,
            "link references an unknown location; hiding node"
        );
        return Resolution::Unknown;
    };

    let base_href = descriptor.uri().to_owned();
    let (path, complete) = substitute(action.path.as_deref().unwrap_or_default(), host);
    if !complete {
        debug!(caption = %caption, path = %path, "unresolved route parameter; hiding node");
    }
    let href = format!("{base_href}{path}");
    Resolution::Resolved {
        base_href,
        href,
        complete,
    }
}

/// Replace each `:name` token with the host's route parameter.
///
/// Tokens without a parameter stay in place; the flag reports whether every
/// token was substituted.
pub(crate) fn substitute<'p, H: Host + ?Sized>(path: &'p str, host: &H) -> (Cow<'p, str>, bool) {
    let mut complete = true;
    let out = PATH_TOKEN.replace_all(path, |caps: &Captures<'_>| {
        match host.route_parameter(&caps[1]) {
            Some(value) => value.to_owned(),
            None => {
                complete = false;
                caps[0].to_owned()
            }
        }
    });
    (out, complete)
}

/// `url` without its query string.
pub(crate) fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(head, _)| head)
}

/// Compile a node's activation patterns against its resolved base href.
///
/// Each entry becomes `^` + base + entry, with only the first `/` of the base
/// escaped and the rest used verbatim. Entries that do not compile are
/// dropped with a debug log.
pub(crate) fn compile_activation(base_href: &str, patterns: &[String]) -> Vec<Regex> {
    let base = base_href.replacen('/', "\\/", 1);
    patterns
        .iter()
        .filter_map(|pattern| {
            let source = format!("^{base}{pattern}");
            match Regex::new(&source) {
                Ok(re) => Some(re),
                Err(e) => {
                    debug!(pattern = %source, error = %e, "skipping invalid activation pattern");
                    None
                }
            }
        })
        .collect()
}

/// Whether `current_url` selects a node with the given href state.
pub(crate) fn own_match(
    current_url: &str,
    href: Option<&str>,
    base_href: Option<&str>,
    activation: &[Regex],
) -> bool {
    let (Some(href), Some(base_href)) = (href, base_href) else {
        return false;
    };
    if href.is_empty() || !current_url.starts_with(base_href) {
        return false;
    }

    let target = strip_query(href);
    let current = strip_query(current_url);
    if current.starts_with(target) && target.starts_with(current) {
        return true;
    }

    activation.iter().any(|re| re.is_match(current_url))
}
