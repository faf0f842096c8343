//! End-to-end behaviour of a console menu bound to a `TestHost`.

use serde_json::json;
use wayfinder::{escape_location_pattern, LocationSeed};
use wayfinder_test::prelude::*;

fn registry() -> LocationRegistry {
    let seeds: Vec<LocationSeed> = serde_yaml::from_str(
        r"
- id: console
  targets:
    production:
      US: https://console.example.com
      EMEA: https://console.eu.example.com
- id: billing
  targets:
    production:
      US: https://billing.example.com
      EMEA: https://billing.eu.example.com
    integration:
      US: https://billing.int.example.com
",
    )
    .unwrap();
    let mut registry = LocationRegistry::new();
    registry.load_seeds(seeds).unwrap();
    registry
}

fn menu() -> RouteDefinition {
    RouteDefinition::new("Console")
        .with_id("root")
        .child(
            RouteDefinition::new("Billing")
                .with_id("billing")
                .child(
                    RouteDefinition::new("Invoices")
                        .with_id("invoices")
                        .link("billing", "/accounts/:accountId/invoices")
                        .visible_when(Condition::entitlement("a")),
                )
                .child(
                    RouteDefinition::new("Payments")
                        .with_id("payments")
                        .link("billing", "/accounts/:accountId/payments")
                        .visible_when(Condition::none(vec![
                            Condition::entitlement("b"),
                            Condition::entitlement("d"),
                        ])),
                )
                .child(
                    RouteDefinition::new("Tax")
                        .with_id("tax")
                        .link("billing", "/tax")
                        .visible_when(Condition::all(vec![
                            Condition::entitlement("a"),
                            Condition::entitlement("c"),
                            Condition::entitlement("d"),
                        ])),
                ),
        )
        .child(
            RouteDefinition::new("Settings")
                .with_id("settings")
                .link("console", "/settings")
                .property("icon", "gear"),
        )
        .child(
            RouteDefinition::new("Audit")
                .with_id("audit")
                .link("audit-log", "/events"),
        )
}

fn host(url: &str) -> TestHost {
    TestHost::new()
        .with_url(url)
        .with_param("accountId", "acme")
        .with_entitlements([("a", true), ("b", false), ("c", true), ("d", false)])
        .with_registry(registry())
}

fn snapshot(tree: &RouteTree<TestHost>) -> Vec<(bool, bool, Option<String>)> {
    tree.iter()
        .map(|n| (n.is_visible(), n.is_activated(), n.href().map(str::to_owned)))
        .collect()
}

#[test]
fn entitlements_gate_visibility() {
    let tree = RouteTree::new(menu(), host("https://console.example.com/"));

    let invoices = tree.find("invoices").unwrap();
    assert!(invoices.is_visible());
    assert_eq!(
        invoices.href(),
        Some("https://billing.example.com/accounts/acme/invoices")
    );
    assert!(tree.find("payments").unwrap().is_visible());

    let tax = tree.find("tax").unwrap();
    assert!(!tax.is_visible());
    assert!(tax.href().is_none());

    let trace = tree.visibility_trace(tax.id()).unwrap();
    assert!(!trace.passed());
    assert_eq!(trace.denied_keys(), vec!["d"]);
}

#[test]
fn exact_href_activates_node_and_ancestors() {
    let tree = RouteTree::new(
        menu(),
        host("https://billing.example.com/accounts/acme/invoices"),
    );

    let invoices = tree.find_id("invoices").unwrap();
    assert!(tree.node(invoices).is_activated());
    assert!(tree.find("billing").unwrap().is_activated());
    assert!(tree.node(tree.root()).is_activated());

    assert!(!tree.find("payments").unwrap().is_activated());
    assert!(!tree.find("settings").unwrap().is_activated());

    let path: Vec<_> = tree
        .activated_path()
        .into_iter()
        .map(RouteNode::caption)
        .collect();
    assert_eq!(path, vec!["Console", "Billing", "Invoices"]);
}

#[test]
fn unknown_location_degrades_without_error() {
    let tree = RouteTree::new(menu(), host("https://console.example.com/"));
    let audit = tree.find("audit").unwrap();
    assert!(!audit.is_visible());
    assert!(!audit.is_activated());
    assert!(audit.href().is_none());
    assert!(audit.base_href().is_none());
}

#[test]
fn missing_parameter_keeps_token_and_hides() {
    let host = TestHost::new()
        .with_url("https://console.example.com/")
        .with_entitlement("a", true)
        .with_registry(registry());
    let tree = RouteTree::new(menu(), host);
    let invoices = tree.find("invoices").unwrap();
    assert!(!invoices.is_visible());
    assert_eq!(
        invoices.href(),
        Some("https://billing.example.com/accounts/:accountId/invoices")
    );
}

#[test]
fn forced_refresh_is_idempotent() {
    let mut tree = RouteTree::new(
        menu(),
        host("https://billing.example.com/accounts/acme/payments?range=30d"),
    );
    let first = snapshot(&tree);
    tree.refresh(true);
    assert_eq!(snapshot(&tree), first);
    tree.refresh(true);
    assert_eq!(snapshot(&tree), first);
}

#[test]
fn acting_uri_switches_deployment_on_forced_refresh() {
    let mut tree = RouteTree::new(menu(), host("https://console.eu.example.com/"));
    let settings = tree.find_id("settings").unwrap();
    assert_eq!(
        tree.node(settings).href(),
        Some("https://console.example.com/settings")
    );

    let changed = tree
        .host_mut()
        .registry_mut()
        .set_acting_uri(ActingUri::Url("https://console.eu.example.com/"));
    assert!(changed);

    // Existing hrefs survive an unforced refresh.
    tree.refresh(false);
    assert_eq!(
        tree.node(settings).href(),
        Some("https://console.example.com/settings")
    );

    tree.refresh(true);
    assert_eq!(
        tree.node(settings).href(),
        Some("https://console.eu.example.com/settings")
    );
    assert!(!tree.node(settings).is_activated());

    tree.host_mut().set_url("https://console.eu.example.com/settings");
    tree.refresh(false);
    assert!(tree.node(settings).is_activated());
}

#[test]
fn property_overlay_restores_definition_value() {
    let mut tree = RouteTree::new(menu(), host("https://console.example.com/"));
    let settings = tree.find_id("settings").unwrap();
    let fallback = json!("none");

    let node = tree.node_mut(settings);
    assert_eq!(node.property("icon"), Some(&json!("gear")));

    node.set_property("icon", Some(json!("cog")));
    node.set_property("badge", Some(json!(3)));
    assert_eq!(node.property_or("icon", &fallback), &json!("cog"));

    node.set_property("icon", None);
    node.set_property("badge", None);
    assert_eq!(node.property_or("icon", &fallback), &json!("gear"));
    assert_eq!(node.property_or("badge", &fallback), &fallback);
}

#[test]
fn registry_lookups_follow_patterns() {
    let registry = registry();

    let billing_eu = registry
        .get_node_by_uri("https://billing.eu.example.com/accounts/acme")
        .unwrap();
    assert_eq!(billing_eu.loc_type_id(), "billing");
    assert_eq!(*billing_eu.environment(), Environment::Production);
    assert_eq!(billing_eu.residency(), Some(&Residency::Emea));

    let billing_int = registry
        .get_node_by_uri("https://billing.int.example.com/")
        .unwrap();
    assert_eq!(*billing_int.environment(), Environment::Integration);

    assert!(registry.get_node_by_uri("https://unknown.example.com/").is_none());
    assert!(registry.get_node("audit-log").is_none());

    let production = registry.search(|d| *d.environment() == Environment::Production);
    assert_eq!(production.len(), 4);
}

#[test]
fn escaped_pattern_is_anchored_and_literal() {
    let pattern = escape_location_pattern("https://*.example.com/a+b");
    assert_eq!(
        pattern,
        r"^https://[a-zA-Z0-9_]+\.example\.com/a\+b.*$"
    );
    assert_eq!(pattern, escape_location_pattern("https://*.example.com/a+b"));
}

#[test]
fn dispatch_reaches_the_host() {
    let tree = RouteTree::new(menu(), host("https://console.example.com/"));
    let settings = tree.find_id("settings").unwrap();
    tree.dispatch(settings);
    assert_eq!(tree.host().dispatched(), vec!["Settings"]);
}
