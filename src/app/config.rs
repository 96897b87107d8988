use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const DEFAULT_EXTENSIONS: &[&str] = &[".cpp", ".h", ".txt", ".json"];
const DEFAULT_IGNORE_FOLDERS: &[&str] = &["cmake-build-debug", "build", "mbed-os", "cmake_build"];
const DEFAULT_OUTPUT: &str = "merged_contents.txt";

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    extensions: Option<Vec<String>>,
    ignore_files: Option<Vec<String>>,
    ignore_folders: Option<Vec<String>>,
    output: Option<PathBuf>,
}

fn load_presets_file() -> Result<HashMap<String, PresetConfig>> {
    let Some(home) = dirs::home_dir() else {
        return Ok(HashMap::new());
    };
    let config_path = home
        .join(".config")
        .join("filemerger")
        .join("presets.toml");

    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    let parsed: PresetsFile = toml::from_str(&content).context("Failed to parse presets.toml")?;

    Ok(parsed.presets)
}

/// Field-wise precedence: CLI flag > preset entry > built-in default.
/// Supplying `--ignore-folders` (or an `ignore_folders` preset key) replaces
/// the default list entirely rather than extending it.
pub fn resolve_config(cli: Cli, project_name: Option<&str>) -> Result<RuntimeConfig> {
    let presets = load_presets_file()?;

    // Preset to use: explicit flag, else one named after the current folder.
    let preset_key = cli.preset.as_deref().or(project_name);
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();

    let extensions = cli
        .extensions
        .or(preset.extensions)
        .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect());

    let ignore_folders = cli.ignore_folders.or(preset.ignore_folders).unwrap_or_else(|| {
        DEFAULT_IGNORE_FOLDERS
            .iter()
            .map(|s| s.to_string())
            .collect()
    });

    Ok(RuntimeConfig {
        paths: cli.paths,
        extensions,
        ignore_files: cli.ignore_files.or(preset.ignore_files).unwrap_or_default(),
        ignore_folders,
        merge_files: cli.merge_files.unwrap_or_default(),
        merge_folders: cli.merge_folders.unwrap_or_default(),
        output: cli
            .output
            .or(preset.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        verbose: cli.verbose,
    })
}
