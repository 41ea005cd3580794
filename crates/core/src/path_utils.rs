//! Path utilities for Sift
//!
//! Handles tilde expansion and app root resolution.

use std::path::PathBuf;

/// Expands a leading tilde (~/) to the user's home directory.
/// "~/.sift" -> "/home/alice/.sift", "/tmp/foo" -> "/tmp/foo"
pub fn expand_tilde(path: &str) -> String {
    if path == "~" {
        return home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => format!("{}/{}", home_dir(), rest),
        None => path.to_string(),
    }
}

/// Resolves the Sift app root from SIFT_ROOT (default `~/.sift`).
/// Handles absolute paths, tilde expansion, and names relative to $HOME.
pub fn get_app_root() -> PathBuf {
    let root_name = std::env::var("SIFT_ROOT").unwrap_or_else(|_| ".sift".to_string());
    resolve_root(&root_name)
}

pub fn log_file_path() -> PathBuf {
    get_app_root().join("sift.log")
}

fn resolve_root(root_name: &str) -> PathBuf {
    if root_name.starts_with('/') {
        PathBuf::from(root_name)
    } else if root_name.starts_with('~') {
        PathBuf::from(expand_tilde(root_name))
    } else {
        PathBuf::from(home_dir()).join(root_name)
    }
}

fn home_dir() -> String {
    std::env::var("HOME").unwrap_or_else(|_| ".".to_string())
}
