use crate::app::filter::PathFilter;
use crate::app::models::{MergeResult, SkippedFile};
use glob::{MatchOptions, Pattern};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Sink failures are the only fatal errors; everything per-file is soft and
/// recorded on the `MergeResult` instead.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("failed to create output file {path}: {source}")]
    SinkOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write to output file: {0}")]
    SinkWrite(#[from] io::Error),
}

/// Walks the requested roots depth-first and streams every allowed file into
/// the sink, one `--- <path> ---` delimited block per file.
pub struct Merger {
    filter: PathFilter,
}

impl Merger {
    pub fn new(filter: PathFilter) -> Self {
        Self { filter }
    }

    /// Opens (creates or truncates) `output` and merges into it. The sink is
    /// flushed on all exit paths, including a failure partway through.
    pub fn merge_to_file(&self, roots: &[String], output: &Path) -> Result<MergeResult, MergeError> {
        let file = File::create(output).map_err(|source| MergeError::SinkOpen {
            path: output.to_path_buf(),
            source,
        })?;
        let mut sink = BufWriter::new(file);
        let result = self.merge(roots, &mut sink);
        sink.flush()?;
        result
    }

    /// Processes each root in input order: literal files are classified
    /// directly, patterns are expanded one level against their parent
    /// directory, and directories are walked depth-first.
    pub fn merge<W: Write>(&self, roots: &[String], sink: &mut W) -> Result<MergeResult, MergeError> {
        let mut result = MergeResult::default();

        for raw in roots {
            log::debug!("Processing path: {}", raw);
            let path = Path::new(raw);

            if !raw.contains('*') && path.is_file() {
                result.resolved_roots += 1;
                if self.filter.is_file_allowed(path) {
                    self.process_file(path, sink, &mut result)?;
                }
            } else if raw.contains('*') {
                let matches = self.expand_pattern(path);
                log::debug!("Pattern {} matched {} entries", raw, matches.len());
                if !matches.is_empty() {
                    result.resolved_roots += 1;
                }
                for matched in matches {
                    if matched.is_file() {
                        if self.filter.is_file_allowed(&matched) {
                            self.process_file(&matched, sink, &mut result)?;
                        }
                    } else if matched.is_dir() {
                        self.walk_directory(&matched, &matched, sink, &mut result)?;
                    }
                }
            } else if path.is_dir() {
                result.resolved_roots += 1;
                self.walk_directory(path, path, sink, &mut result)?;
            } else {
                log::debug!("Path {} does not exist, skipping", raw);
            }
        }

        Ok(result)
    }

    /// Single-level expansion: the final path segment is matched as a
    /// pattern against its parent directory's immediate entries, never
    /// across directory boundaries. Matches are sorted so output order
    /// never depends on directory enumeration order.
    fn expand_pattern(&self, path: &Path) -> Vec<PathBuf> {
        let Some(name) = path.file_name() else {
            return Vec::new();
        };
        let pattern = match Pattern::new(&name.to_string_lossy()) {
            Ok(p) => p,
            Err(err) => {
                log::warn!("Invalid glob pattern {}: {}", path.display(), err);
                return Vec::new();
            }
        };
        // `*` should not match dotfiles, matching the usual shell-glob rule.
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let entries = match fs::read_dir(parent) {
            Ok(entries) => entries,
            Err(err) => {
                log::debug!("Cannot read {}: {}", parent.display(), err);
                return Vec::new();
            }
        };

        let mut matches: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| pattern.matches_with(&entry.file_name().to_string_lossy(), options))
            .map(|entry| match path.parent() {
                // Keep the matched path relative when the pattern had no
                // parent segment, so headers read `a.cpp`, not `./a.cpp`.
                Some(p) if !p.as_os_str().is_empty() => entry.path(),
                _ => PathBuf::from(entry.file_name()),
            })
            .collect();
        matches.sort();
        matches
    }

    /// Depth-first pre-order walk: files at each level first, sorted by
    /// name, then descent into each allowed subdirectory. Disallowed
    /// subdirectories are pruned before their contents are enumerated.
    fn walk_directory<W: Write>(
        &self,
        dir: &Path,
        root: &Path,
        sink: &mut W,
        result: &mut MergeResult,
    ) -> Result<(), MergeError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Cannot read directory {}: {}", dir.display(), err);
                return Ok(());
            }
        };

        let mut files = Vec::new();
        let mut subdirs = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(_) => continue,
            };
            if file_type.is_dir() {
                subdirs.push(entry.path());
            } else if file_type.is_file() {
                files.push(entry.path());
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
        subdirs.sort();

        for file in &files {
            if self.filter.is_file_allowed(file) {
                self.process_file(file, sink, result)?;
            }
        }
        for subdir in &subdirs {
            if self.filter.is_folder_allowed(subdir, root) {
                self.walk_directory(subdir, root, sink, result)?;
            } else {
                log::debug!("Pruning folder {}", subdir.display());
            }
        }
        Ok(())
    }

    /// Reads the file and appends its block to the sink. Read and decode
    /// failures skip the file and record a diagnostic; only sink write
    /// failures abort the merge.
    fn process_file<W: Write>(
        &self,
        path: &Path,
        sink: &mut W,
        result: &mut MergeResult,
    ) -> Result<(), MergeError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!("Error reading file {}: {}", path.display(), err);
                result.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                });
                return Ok(());
            }
        };
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(_) => {
                log::warn!("File {} is not valid UTF-8, skipping", path.display());
                result.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: "not valid UTF-8".to_string(),
                });
                return Ok(());
            }
        };

        write!(sink, "\n\n--- {} ---\n\n", path.display())?;
        sink.write_all(content.as_bytes())?;
        result.processed.push(path.to_path_buf());
        log::debug!("Successfully processed file: {}", path.display());
        Ok(())
    }
}
