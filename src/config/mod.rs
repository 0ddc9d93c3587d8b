//! Configuration module for Scout-RS
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Load settings from `path` or use defaults, then apply environment overrides
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    Ok(settings)
}

/// First settings file found, `SCOUT_SETTINGS_PATH` taking precedence
pub fn find_settings_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SCOUT_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("scout-rs/settings.yml"));
    }

    paths.into_iter().find(|p| p.exists())
}
