//! Conformance tests that run YAML fixtures against wayfinder
//!
//! Run with: cargo test -p wayfinder-test --test conformance
//!
//! Set `RUST_LOG=wayfinder=debug` to see resolution and classification logs.

#![cfg(feature = "fixtures")]

use std::fs;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use wayfinder_test::fixture::Fixture;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Load and run all fixtures in a directory
fn run_fixtures_in_dir(dir: &Path) {
    init_tracing();
    assert!(dir.exists(), "Fixtures directory does not exist: {}", dir.display());

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|e| e == "yaml" || e == "yml"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "No fixtures in {}", dir.display());

    for path in paths {
        println!("Running fixture: {}", path.display());
        let yaml = fs::read_to_string(&path).expect("read yaml");

        // Parse potentially multiple fixtures (separated by ---)
        let fixtures = Fixture::from_yaml_multi(&yaml)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()));

        for fixture in fixtures {
            println!("  Running: {}", fixture.name);
            fixture.run_and_assert();
        }
    }
}

#[test]
fn test_visibility() {
    run_fixtures_in_dir(&fixtures_dir().join("01_visibility"));
}

#[test]
fn test_activation() {
    run_fixtures_in_dir(&fixtures_dir().join("02_activation"));
}

#[test]
fn test_context() {
    run_fixtures_in_dir(&fixtures_dir().join("03_context"));
}
