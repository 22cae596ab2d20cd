//! Architecture enforcement lint - ensures pages go through the session layer.
//!
//! `src/auth/` is the only place allowed to talk HTTP or touch browser
//! storage. Every backend call must pass through `ApiClient` so the bearer
//! token and active-role headers are attached and a 401 forces a logout.
//!
//! This test scans the source tree outside `src/auth/` and flags:
//! - direct `reqwest::` usage (bypasses the credentials headers)
//! - direct `web_sys::Storage` / `local_storage` access (bypasses the
//!   session store, so memory and storage can drift apart)

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Patterns that bypass the session layer
const DISALLOWED_PATTERNS: &[(&str, &str)] = &[
    ("reqwest::", "Use ApiClient (use_api()) instead"),
    ("web_sys::Storage", "Use SessionStore / CredentialStore instead"),
    ("local_storage", "Use SessionStore / CredentialStore instead"),
    (
        "TOKEN_KEY",
        "Read the token through CredentialStore, not the raw key",
    ),
];

/// Directory allowed to use the patterns above
const ALLOWED_DIR: &str = "auth";

fn is_allowed(path: &Path, src_dir: &Path) -> bool {
    path.strip_prefix(src_dir)
        .ok()
        .and_then(|rel| rel.components().next())
        .is_some_and(|first| first.as_os_str() == ALLOWED_DIR)
}

fn analyze_file(path: &Path) -> Vec<(String, String, String)> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return vec![],
    };

    let mut violations = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("//") {
            continue;
        }
        for (pattern, suggestion) in DISALLOWED_PATTERNS {
            if line.contains(pattern) {
                violations.push((
                    format!("{}:{}", path.display(), line_idx + 1),
                    (*pattern).to_string(),
                    (*suggestion).to_string(),
                ));
            }
        }
    }

    violations
}

#[test]
fn backend_and_storage_access_stays_in_auth() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");

    let mut all_violations = Vec::new();

    for entry in WalkDir::new(&src_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .filter(|e| !is_allowed(e.path(), &src_dir))
    {
        all_violations.extend(analyze_file(entry.path()));
    }

    if !all_violations.is_empty() {
        let mut error_msg = String::from(
            "\n\n\
            ╔══════════════════════════════════════════════════════════════════════════════╗\n\
            ║  ARCHITECTURE VIOLATION: backend and storage access must go through auth    ║\n\
            ╚══════════════════════════════════════════════════════════════════════════════╝\n\n\
            The API client attaches credentials and handles 401 for every call.\n\
            The session store keeps memory and persisted storage in step.\n\n\
            Violations found:\n\n",
        );

        for (location, pattern, suggestion) in &all_violations {
            error_msg.push_str(&format!("  {} \n", location));
            error_msg.push_str(&format!("    Found: {}\n", pattern));
            error_msg.push_str(&format!("    Fix: {}\n\n", suggestion));
        }

        panic!("{}", error_msg);
    }
}

#[test]
fn role_table_is_the_only_menu_source() {
    // The sidebar and the gate must both read the table in access.rs
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let sidebar = fs::read_to_string(src_dir.join("app/components/sidebar.rs"))
        .expect("Failed to read sidebar.rs");
    let layout = fs::read_to_string(src_dir.join("app/components/dashboard_layout.rs"))
        .expect("Failed to read dashboard_layout.rs");

    assert!(sidebar.contains("menu_for("), "sidebar must render menu_for()");
    assert!(layout.contains("gate("), "dashboard layout must consult gate()");
    assert!(
        !sidebar.contains("\"/dashboard/"),
        "sidebar must not hard-code dashboard paths"
    );
}

#[test]
fn dashboard_pages_link_through_role_link() {
    // A bare Link can point a role at a page its gate refuses
    let pages_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/app/pages");
    let public = ["public.rs", "not_found.rs", "mod.rs"];

    let mut offenders = Vec::new();
    for entry in WalkDir::new(&pages_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .filter(|e| {
            !public
                .iter()
                .any(|name| e.file_name().to_str() == Some(*name))
        })
    {
        let content = fs::read_to_string(entry.path()).unwrap_or_default();
        for (line_idx, line) in content.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("Link {") {
                offenders.push(format!("{}:{}", entry.path().display(), line_idx + 1));
            }
        }
    }

    assert!(
        offenders.is_empty(),
        "use RoleLink instead of Link in dashboard pages:\n  {}",
        offenders.join("\n  ")
    );
}
