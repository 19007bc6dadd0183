// Local storage path utilities.
// Resolves where folio keeps its persisted slots and its configuration file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "folio")
}

/// Directory holding the key-value slots (~/.local/share/folio/store on Linux).
pub fn store_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("store"))
}

/// Default configuration file path (~/.config/folio/config.yaml on Linux).
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.yaml"))
}

/// Path of the file backing a single slot inside `dir`.
pub fn slot_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.slot", sanitize_name(key)))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => '_',
            _ => c,
        })
        .collect()
}
