//! CLI command implementations

pub mod cast;
pub mod play;

use anyhow::{Context, Result};
use frost_game::GameConfig;
use std::path::Path;

/// An explicit config file, or the usual global < project < env layering
pub(crate) fn load_config(path: Option<&str>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config {path}")),
        None => GameConfig::load().context("Failed to load config"),
    }
}
