use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Merge contents of selected files and folders into a single text file"
)]
pub struct Cli {
    /// Files, directories, or glob patterns to merge
    #[arg(required = true, num_args = 1..)]
    pub paths: Vec<String>,

    /// Destination file (truncated if it already exists)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Allowed extensions; a leading '.' is added if missing
    /// (default: .cpp .h .txt .json)
    #[arg(long, short = 'e', num_args = 1..)]
    pub extensions: Option<Vec<String>>,

    /// Exact paths of files to skip
    #[arg(long, short = 'i', num_args = 1..)]
    pub ignore_files: Option<Vec<String>>,

    /// Folder names to prune; replaces the default list
    /// (cmake-build-debug build mbed-os cmake_build) entirely
    #[arg(long, short = 'I', num_args = 1..)]
    pub ignore_folders: Option<Vec<String>>,

    /// Exact files to merge regardless of extension
    #[arg(long, num_args = 1..)]
    pub merge_files: Option<Vec<String>>,

    /// Restrict traversal to these folders and their descendants
    #[arg(long, num_args = 1..)]
    pub merge_folders: Option<Vec<String>>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Print debug diagnostics to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
