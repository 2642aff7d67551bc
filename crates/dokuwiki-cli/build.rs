//! Embeds the git revision into the `--version` string.
//!
//! Release builds from a tag print the package version alone; anything else
//! appends the abbreviated commit, e.g. `0.1.0 (3f2a9c1-dirty)`.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");

    let package = env!("CARGO_PKG_VERSION");
    let version = match git(&["describe", "--tags", "--always", "--dirty", "--abbrev=7"]) {
        Some(described) if described.trim_start_matches('v') == package => package.to_string(),
        Some(described) => format!("{package} ({})", commit_suffix(&described)),
        None => package.to_string(),
    };

    println!("cargo:rustc-env=DOKUWIKI_CLI_VERSION={version}");
}

/// `v0.1.0-4-g3f2a9c1-dirty` becomes `3f2a9c1-dirty`; a bare hash is kept.
fn commit_suffix(described: &str) -> &str {
    match described.rfind("-g") {
        Some(at) => &described[at + 2..],
        None => described,
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output.status.success().then_some(())?;
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
