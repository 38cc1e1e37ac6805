use serde::Serialize;
use std::path::{Path, PathBuf};

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Absolute form of a user-supplied path, for display and writing.
pub fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

pub fn print_path_list(heading: &str, paths: &[PathBuf]) {
    if paths.is_empty() {
        return;
    }
    println!("{heading}");
    for path in paths {
        println!("- {}", path.display());
    }
}
