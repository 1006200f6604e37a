//! Level file format definitions

use crate::camera::Camera;
use crate::entity::{SceneEntity, Sway};
use crate::rail::CameraRail;
use crate::scene::Scene;
use frost_core::{Result, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root structure of a level TOML file.
///
/// Entities are keyed by name; they spawn in name order so a level file
/// always produces the same scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelFile {
    pub scene: LevelMetadata,
    #[serde(default)]
    pub camera: CameraDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rail: Option<RailDef>,
    #[serde(default)]
    pub entities: BTreeMap<String, EntityDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelMetadata {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraDef {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default = "default_camera_target")]
    pub target: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 1.5, 0.0]
}

fn default_camera_target() -> [f32; 3] {
    [0.0, 1.5, -1.0]
}

fn default_fov() -> f32 {
    60.0
}

impl Default for CameraDef {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: default_camera_target(),
            fov: default_fov(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailDef {
    pub points: Vec<[f32; 3]>,
    #[serde(default = "default_rail_speed")]
    pub speed: f32,
}

fn default_rail_speed() -> f32 {
    1.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityRole {
    Target,
    #[default]
    Prop,
}

/// Definition of one entity in a level file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDef {
    #[serde(default)]
    pub kind: EntityRole,
    /// Target type, only meaningful for targets
    #[serde(default = "default_target_type")]
    pub target: String,
    pub position: [f32; 3],
    #[serde(default = "default_half_extents")]
    pub half_extents: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    #[serde(default = "default_true")]
    pub pickable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sway: Option<Sway>,
}

fn default_target_type() -> String {
    "elf".to_string()
}

fn default_half_extents() -> [f32; 3] {
    [0.5, 0.5, 0.5]
}

fn default_true() -> bool {
    true
}

impl EntityDef {
    pub fn target(position: [f32; 3]) -> Self {
        Self {
            kind: EntityRole::Target,
            target: default_target_type(),
            position,
            half_extents: default_half_extents(),
            sprite: None,
            pickable: true,
            sway: None,
        }
    }

    pub fn prop(position: [f32; 3]) -> Self {
        Self {
            kind: EntityRole::Prop,
            ..Self::target(position)
        }
    }

    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    pub fn to_entity(&self, name: &str) -> SceneEntity {
        let position = Vec3::from_array(self.position);
        let mut entity = match self.kind {
            EntityRole::Target => SceneEntity::target(name, self.target.clone(), position),
            EntityRole::Prop => SceneEntity::prop(name, position),
        }
        .with_half_extents(Vec3::from_array(self.half_extents))
        .with_pickable(self.pickable);
        entity.sprite = self.sprite.clone();
        entity.sway = self.sway;
        entity
    }
}

impl LevelFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: LevelMetadata {
                name: name.into(),
                version: default_version(),
                description: None,
            },
            camera: CameraDef::default(),
            rail: None,
            entities: BTreeMap::new(),
        }
    }

    pub fn add_entity(&mut self, name: impl Into<String>, entity: EntityDef) {
        self.entities.insert(name.into(), entity);
    }

    /// Build a fresh scene from this description
    pub fn build_scene(&self) -> Result<Scene> {
        let mut camera = Camera::looking_at(
            Vec3::from_array(self.camera.position),
            Vec3::from_array(self.camera.target),
        );
        camera.fov = self.camera.fov;

        let mut scene = Scene::new(self.scene.name.clone()).with_camera(camera);
        for (name, def) in &self.entities {
            scene.spawn(def.to_entity(name))?;
        }

        if let Some(rail) = &self.rail {
            let points = rail.points.iter().copied().map(Vec3::from_array).collect();
            scene.set_rail(CameraRail::new(points, rail.speed)?);
        }

        Ok(scene)
    }
}
