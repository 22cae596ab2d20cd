#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Route Contract Tests
//!
//! Ensures page routes don't change without explicit approval. Bookmarks and
//! the role menus point at these paths.
//! The golden file at tests/fixtures/routes.txt is the source of truth.
//!
//! If this test fails:
//! 1. Review the route changes carefully
//! 2. Update routes.txt if the change is intentional
//! 3. Check the role menus in src/auth/access.rs still match
//!
//! Run with: cargo test --test route_contract

use std::collections::BTreeSet;
use std::fs;

/// Extract routes from the golden file
fn load_golden_routes() -> BTreeSet<String> {
    let content =
        fs::read_to_string("tests/fixtures/routes.txt").expect("Failed to read routes.txt");

    content
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(|line| line.trim().to_string())
        .collect()
}

fn quoted(line: &str, attribute: &str) -> Option<String> {
    let start = line.find(attribute)? + attribute.len();
    let rest = &line[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

/// Extract routes from the `Route` enum, applying `#[nest]` prefixes
fn extract_routes_from_source() -> BTreeSet<String> {
    let content = fs::read_to_string("src/app/mod.rs").expect("Failed to read src/app/mod.rs");

    let mut routes = BTreeSet::new();
    let mut prefixes: Vec<String> = Vec::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip comments
        if line.starts_with("//") {
            continue;
        }

        if let Some(prefix) = quoted(line, "#[nest(\"") {
            prefixes.push(prefix);
        } else if line.starts_with("#[end_nest]") {
            prefixes.pop();
        } else if let Some(path) = quoted(line, "#[route(\"") {
            let full = format!("{}{}", prefixes.concat(), path);
            let full = match full.trim_end_matches('/') {
                "" => "/".to_string(),
                trimmed => trimmed.to_string(),
            };
            routes.insert(full);
        }
    }

    routes
}

#[test]
fn page_routes_match_contract() {
    let golden = load_golden_routes();
    let actual = extract_routes_from_source();

    let added: Vec<_> = actual.difference(&golden).collect();
    let removed: Vec<_> = golden.difference(&actual).collect();

    if !added.is_empty() || !removed.is_empty() {
        let mut msg = String::from("\n\nROUTE CONTRACT VIOLATION!\n\n");

        if !added.is_empty() {
            msg.push_str("Routes ADDED (not in contract):\n");
            for route in &added {
                msg.push_str(&format!("  + {}\n", route));
            }
            msg.push('\n');
        }

        if !removed.is_empty() {
            msg.push_str("Routes REMOVED (missing from implementation):\n");
            for route in &removed {
                msg.push_str(&format!("  - {}\n", route));
            }
            msg.push('\n');
        }

        msg.push_str("To fix:\n");
        msg.push_str("1. If intentional: update tests/fixtures/routes.txt\n");
        msg.push_str("2. Keep the role menus in src/auth/access.rs in step\n");

        panic!("{}", msg);
    }
}

#[test]
fn golden_file_is_sorted() {
    let content =
        fs::read_to_string("tests/fixtures/routes.txt").expect("Failed to read routes.txt");

    let routes: Vec<_> = content
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .collect();

    let mut sorted = routes.clone();
    sorted.sort();

    assert_eq!(
        routes, sorted,
        "routes.txt is not sorted! Please sort alphabetically."
    );
}

#[test]
fn every_menu_path_is_a_declared_route() {
    let routes = extract_routes_from_source();
    let access = fs::read_to_string("src/auth/access.rs").expect("Failed to read access.rs");

    for line in access.lines() {
        // entry("/dashboard/...", "Label")
        if let Some(path) = quoted(line, "entry(\"") {
            assert!(
                routes.contains(&path),
                "menu entry {} has no matching route",
                path
            );
        }
    }
}
