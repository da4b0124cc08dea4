use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let stamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown-profile".into());

    for (key, value) in [
        ("SUBTRACKER_BUILD_HASH", short_commit()),
        ("SUBTRACKER_BUILD_TIMESTAMP", stamp),
        ("SUBTRACKER_BUILD_PROFILE", profile),
    ] {
        println!("cargo:rustc-env={key}={value}");
    }
}

/// Abbreviated HEAD commit, or `unknown` outside a git checkout.
fn short_commit() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().to_owned())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".into())
}
