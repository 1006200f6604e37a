//! Where level scenes come from

use frost_core::{FrostError, Result};
use frost_scene::{load_level, EntityDef, LevelFile, Scene, Sway};
use std::path::PathBuf;
use tracing::debug;

/// Builds a fresh scene for a level index. Called on start, on level
/// progression and on restart, so it must be repeatable.
pub trait LevelSource {
    fn count(&self) -> usize;

    fn build(&self, index: usize) -> Result<Scene>;
}

fn out_of_range(index: usize, count: usize) -> FrostError {
    FrostError::LevelError(format!("level {index} out of range ({count} levels)"))
}

/// Levels read from TOML files, one per level in play order
#[derive(Debug, Clone)]
pub struct FileLevels {
    paths: Vec<PathBuf>,
}

impl FileLevels {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl LevelSource for FileLevels {
    fn count(&self) -> usize {
        self.paths.len()
    }

    fn build(&self, index: usize) -> Result<Scene> {
        let path = self
            .paths
            .get(index)
            .ok_or_else(|| out_of_range(index, self.paths.len()))?;
        debug!(level = index, path = %path.display(), "loading level file");
        let (scene, _) = load_level(path)?;
        Ok(scene)
    }
}

/// Levels described in memory, mostly for tests and tools
impl LevelSource for Vec<LevelFile> {
    fn count(&self) -> usize {
        self.len()
    }

    fn build(&self, index: usize) -> Result<Scene> {
        self.get(index)
            .ok_or_else(|| out_of_range(index, self.len()))?
            .build_scene()
    }
}

/// Built-in procedural layout: a row of elves receding from the camera,
/// one more per level, swaying from the second level on.
#[derive(Debug, Clone)]
pub struct DemoLevels {
    count: usize,
    sprite: String,
}

impl DemoLevels {
    pub const ELF_SPRITE: &'static str = "elf@2x.png";

    pub fn new(count: usize) -> Self {
        Self {
            count,
            sprite: Self::ELF_SPRITE.to_string(),
        }
    }

    /// The in-memory description of one demo level
    pub fn layout(&self, index: usize) -> LevelFile {
        let elves = 3 + index;
        let mut level = LevelFile::new(format!("demo-{}", index + 1));
        level.scene.description = Some(format!("{elves} elves waiting for presents"));

        for i in 0..elves {
            let x = (i as f32 - (elves - 1) as f32 / 2.0) * 2.0;
            let z = -6.0 - 2.0 * i as f32;
            let mut elf = EntityDef::target([x, 1.5, z]).with_sprite(self.sprite.clone());
            if index > 0 {
                elf.sway = Some(Sway {
                    amplitude: 0.25 * index as f32,
                    frequency: 0.5,
                });
            }
            level.add_entity(format!("elf_{i:02}"), elf);
        }

        level.add_entity(
            "tree",
            EntityDef::prop([0.0, 2.0, -6.0 - 2.0 * elves as f32]).with_sprite("tree.png"),
        );
        level
    }
}

impl LevelSource for DemoLevels {
    fn count(&self) -> usize {
        self.count
    }

    fn build(&self, index: usize) -> Result<Scene> {
        if index >= self.count {
            return Err(out_of_range(index, self.count));
        }
        self.layout(index).build_scene()
    }
}
