//! Configuration for medialib.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (MEDIALIB_MANIFEST, MEDIALIB_LABEL_WIDTH)
//! 2. Config file (.medialib/config.yaml)
//! 3. Defaults (~/.medialib/library.yaml, label width 10)
//!
//! Config file discovery:
//! - Searches current directory and parents for .medialib/config.yaml
//! - The manifest path in the config file is relative to the project root
//!   (the directory containing .medialib/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::library::DEFAULT_LABEL_WIDTH;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    /// Manifest path (relative to the project root)
    pub manifest: Option<String>,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    /// Width of the label column in rendered records
    pub label_width: Option<usize>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Manifest the catalog is seeded from
    pub manifest: PathBuf,
    /// Label column width for rendered items
    pub label_width: usize,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    find_config_file_from(&std::env::current_dir().ok()?)
}

/// Find config file by searching `start` and its parents
fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".medialib").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Parse a label width override
fn parse_label_width(value: Option<String>) -> Result<Option<usize>> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid MEDIALIB_LABEL_WIDTH: {}", value)),
        None => Ok(None),
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let home = dirs::home_dir().context("Failed to determine home directory")?;
    resolve_config(find_config_file(), &home, |key| std::env::var(key).ok())
}

/// Merge env overrides, an optional config file and defaults
fn resolve_config(
    config_file: Option<PathBuf>,
    home: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let file = config_file
        .as_deref()
        .map(load_config_file)
        .transpose()?;

    let manifest = if let Some(env_manifest) = env("MEDIALIB_MANIFEST") {
        PathBuf::from(env_manifest)
    } else if let (Some(config_path), Some(manifest)) = (
        config_file.as_deref(),
        file.as_ref().and_then(|f| f.manifest.as_deref()),
    ) {
        // Project root is the parent of .medialib/
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));
        resolve_path(base_dir, manifest)
    } else {
        home.join(".medialib").join("library.yaml")
    };

    let label_width = parse_label_width(env("MEDIALIB_LABEL_WIDTH"))?
        .or_else(|| file.as_ref().and_then(|f| f.display.label_width))
        .unwrap_or(DEFAULT_LABEL_WIDTH);

    Ok(ResolvedConfig {
        manifest,
        label_width,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
