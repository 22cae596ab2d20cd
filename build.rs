//! Build script to inject version, git SHA and the API address at compile time.
//!
//! Environment variables (set by CI or fall back to defaults):
//! - CMC_VERSION: Version string (defaults to CARGO_PKG_VERSION)
//! - CMC_GIT_SHA: Git commit SHA (defaults to "unknown" or git rev-parse)
//! - CMC_API_BASE_URL: Backend address baked into the browser bundle (optional)

use std::process::Command;

fn main() {
    // Version: prefer CMC_VERSION env var, fall back to CARGO_PKG_VERSION
    let version = std::env::var("CMC_VERSION").unwrap_or_else(|_| {
        std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".into())
    });
    println!("cargo:rustc-env=CMC_VERSION={}", version);

    // Git SHA: prefer CMC_GIT_SHA, then GITHUB_SHA, then try git command
    let git_sha = std::env::var("CMC_GIT_SHA")
        .or_else(|_| std::env::var("GITHUB_SHA").map(|s| s.chars().take(7).collect()))
        .unwrap_or_else(|_| get_git_sha());
    println!("cargo:rustc-env=CMC_GIT_SHA={}", git_sha);

    // Rebuild if these change
    println!("cargo:rerun-if-env-changed=CMC_VERSION");
    println!("cargo:rerun-if-env-changed=CMC_GIT_SHA");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");
    println!("cargo:rerun-if-env-changed=CMC_API_BASE_URL");
}

fn get_git_sha() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|o| {
            if o.status.success() {
                String::from_utf8(o.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".into())
}
