// Declare modules
pub mod cli;
pub mod config;
pub mod filter;
pub mod merger;
pub mod models;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::env;

use self::cli::Cli;
use self::config::resolve_config;
use self::filter::PathFilter;
use self::merger::Merger;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Logging: --verbose lowers the filter to debug; diagnostics go to
    // stderr and never touch the merge file.
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // 3. Resolve Configuration (CLI > preset named after this folder > defaults)
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let project_name = current_dir.file_name().and_then(|n| n.to_str());
    let config = resolve_config(args, project_name)?;

    log::debug!("Using extensions: {:?}", config.extensions);
    log::debug!("Ignoring files: {:?}", config.ignore_files);
    log::debug!("Ignoring folders: {:?}", config.ignore_folders);
    log::debug!("Output file: {}", config.output.display());
    log::debug!("Processing paths: {:?}", config.paths);

    // 4. Merge
    let merger = Merger::new(PathFilter::new(&config));
    let result = merger.merge_to_file(&config.paths, &config.output)?;

    if result.resolved_roots == 0 {
        bail!("no input paths resolved to any files or directories");
    }

    // 5. Summary to Stdout
    println!(
        "\nSuccessfully merged contents into {}",
        config.output.display()
    );
    println!("\nMerge Summary:");
    println!("Processed {} files:", result.processed.len());
    let mut listed = result.processed.clone();
    listed.sort();
    for path in &listed {
        println!("- {}", path.display());
    }
    if !result.skipped.is_empty() {
        log::warn!("Skipped {} unreadable files", result.skipped.len());
    }

    Ok(())
}
