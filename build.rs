use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    // The stock catalog is embedded with include_str!
    println!("cargo:rerun-if-changed=static/catalog.toml");

    let version = match git(&["describe", "--exact-match", "--tags", "HEAD"]) {
        Some(_) => std::env::var("CARGO_PKG_VERSION").unwrap_or_default(),
        None => match git(&["rev-parse", "--short", "HEAD"]) {
            Some(hash) if !hash.is_empty() => format!("dev@{hash}"),
            _ => "dev@unknown".to_string(),
        },
    };

    println!("cargo:rustc-env=FOLIO_BUILD_VERSION={version}");
}
