use std::path::PathBuf;

/// Final configuration after merging CLI args, presets, and defaults.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub paths: Vec<String>,
    pub extensions: Vec<String>,
    pub ignore_files: Vec<String>,
    pub ignore_folders: Vec<String>,
    pub merge_files: Vec<String>,
    pub merge_folders: Vec<String>,
    pub output: PathBuf,
    pub verbose: bool,
}

/// A file that was enumerated but not written to the sink.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one merge pass, accumulated in traversal order.
#[derive(Debug, Default)]
pub struct MergeResult {
    /// Files written to the sink, in the order their blocks appear.
    pub processed: Vec<PathBuf>,
    /// Files that failed to read or decode; the merge continued past them.
    pub skipped: Vec<SkippedFile>,
    /// Number of input roots that resolved to at least one filesystem entry.
    pub resolved_roots: usize,
}
