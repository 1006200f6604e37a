//! Level loading from TOML files

use crate::format::LevelFile;
use crate::scene::Scene;
use frost_core::Result;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a level file and build its scene
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<(Scene, LevelFile)> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let loaded = load_level_str(&content)?;
    debug!(path = %path.display(), entities = loaded.0.len(), "level loaded");
    Ok(loaded)
}

/// Parse a level from a TOML string and build its scene
pub fn load_level_str(content: &str) -> Result<(Scene, LevelFile)> {
    let level: LevelFile = toml::from_str(content)?;
    let scene = level.build_scene()?;
    Ok((scene, level))
}
