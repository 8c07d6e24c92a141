// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=QRSCANNER_VERSION");

    // Packagers (flatpak, distro builds) pin the version without a git checkout
    let version = std::env::var("QRSCANNER_VERSION").unwrap_or_else(|_| git_version());

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Version derived from the nearest `v*` tag.
///
/// - exact tag: "0.1.0-abcdef1"
/// - commits after a tag: "0.1.0-dirty-abcdef1"
/// - no tag or no git: crate version plus hash if available
fn git_version() -> String {
    let hash = git(&["rev-parse", "--short", "HEAD"]);

    let Some(described) = git(&["describe", "--tags", "--match", "v*"]) else {
        let pkg = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
        return match hash {
            Some(hash) => format!("{}-{}", pkg, hash),
            None => pkg,
        };
    };

    let described = described.strip_prefix('v').unwrap_or(&described);
    let hash = hash.unwrap_or_else(|| "unknown".to_string());

    // "0.1.0-5-gabcdef1" -> ["gabcdef1", "5", "0.1.0"]
    let parts: Vec<&str> = described.rsplitn(3, '-').collect();
    if parts.len() == 3 {
        format!("{}-dirty-{}", parts[2], hash)
    } else {
        format!("{}-{}", described, hash)
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
