use crate::app::models::RuntimeConfig;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Pure inclusion/exclusion decisions for candidate paths. Built once per
/// merge and read-only afterwards.
#[derive(Debug)]
pub struct PathFilter {
    extensions: HashSet<String>,
    ignored_files: HashSet<PathBuf>,
    ignored_folders: HashSet<String>,
    merge_files: HashSet<PathBuf>,
    merge_folders: HashSet<PathBuf>,
}

impl PathFilter {
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            extensions: config
                .extensions
                .iter()
                .map(|e| normalize_extension(e))
                .collect(),
            ignored_files: config.ignore_files.iter().map(PathBuf::from).collect(),
            ignored_folders: config.ignore_folders.iter().cloned().collect(),
            merge_files: config.merge_files.iter().map(PathBuf::from).collect(),
            merge_folders: config.merge_folders.iter().map(PathBuf::from).collect(),
        }
    }

    /// A folder is disallowed if any segment of its path is an ignored name.
    /// When an explicit merge-folder list is active, the folder (or an
    /// ancestor below `root`) must also appear in that list. Ignore rules
    /// win over the allow-list.
    pub fn is_folder_allowed(&self, folder: &Path, root: &Path) -> bool {
        let has_ignored_segment = folder.components().any(|c| match c {
            Component::Normal(name) => self
                .ignored_folders
                .contains(name.to_string_lossy().as_ref()),
            _ => false,
        });
        if has_ignored_segment {
            return false;
        }

        if self.merge_folders.is_empty() {
            return true;
        }

        let mut current = Some(folder);
        while let Some(path) = current {
            if path == root {
                break;
            }
            if self.merge_folders.contains(path) {
                return true;
            }
            current = path.parent();
        }
        false
    }

    /// Ignored files are excluded unconditionally. An explicit merge-file
    /// list, when present, bypasses extension filtering entirely; otherwise
    /// the lowercased extension must be in the allow-list.
    pub fn is_file_allowed(&self, file: &Path) -> bool {
        if self.ignored_files.contains(file) {
            log::debug!("File {} is in ignore list", file.display());
            return false;
        }

        if !self.merge_files.is_empty() {
            return self.merge_files.contains(file);
        }

        let allowed = file
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .is_some_and(|ext| self.extensions.contains(&ext));
        if !allowed {
            log::debug!("File {} does not have an allowed extension", file.display());
        }
        allowed
    }
}

/// Extensions compare lowercase with a leading dot; callers may supply
/// either `cpp` or `.cpp`.
fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}
