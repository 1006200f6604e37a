//! Scene - the entities, camera and rail of one level

use crate::camera::Camera;
use crate::entity::SceneEntity;
use crate::picking::{ray_intersect, Ray};
use crate::rail::CameraRail;
use frost_core::{EntityId, FrostError, Result, Vec3};
use std::collections::HashMap;
use tracing::debug;

/// One intersection produced by [`Scene::raycast`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: EntityId,
    pub point: Vec3,
    pub distance: f32,
}

/// The active set of entities for one level.
///
/// Entities keep their spawn order; raycasts iterate in that order so ties
/// in distance always resolve the same way. A successor level gets a fresh
/// `Scene` rather than mutating this one.
#[derive(Debug)]
pub struct Scene {
    name: String,
    entities: Vec<SceneEntity>,
    name_map: HashMap<String, EntityId>,
    camera: Camera,
    rail: Option<CameraRail>,
    elapsed: f64,
    disposed: bool,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
            name_map: HashMap::new(),
            camera: Camera::new(),
            rail: None,
            elapsed: 0.0,
            disposed: false,
        }
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an entity. Names are unique within a scene.
    pub fn spawn(&mut self, entity: SceneEntity) -> Result<EntityId> {
        if self.name_map.contains_key(&entity.name) {
            return Err(FrostError::DuplicateEntityName(entity.name));
        }
        let id = entity.id;
        self.name_map.insert(entity.name.clone(), id);
        self.entities.push(entity);
        Ok(id)
    }

    pub fn despawn(&mut self, id: EntityId) -> Result<SceneEntity> {
        let index = self
            .entities
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| FrostError::EntityNotFound(id.to_string()))?;
        let entity = self.entities.remove(index);
        self.name_map.remove(&entity.name);
        Ok(entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneEntity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn id_of(&self, name: &str) -> Option<EntityId> {
        self.name_map.get(name).copied()
    }

    /// Entities in spawn order
    pub fn entities(&self) -> &[SceneEntity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [SceneEntity] {
        &mut self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = &SceneEntity> {
        self.entities.iter().filter(|e| e.is_target())
    }

    /// True when the scene has at least one target and all of them are satisfied
    pub fn all_targets_satisfied(&self) -> bool {
        let mut targets = self.targets().peekable();
        targets.peek().is_some() && targets.all(|e| e.satisfied)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Attach a rail and move the camera to its start
    pub fn set_rail(&mut self, rail: CameraRail) {
        self.camera.look_along(rail.position(), rail.heading());
        self.rail = Some(rail);
    }

    pub fn rail(&self) -> Option<&CameraRail> {
        self.rail.as_ref()
    }

    /// Seconds this scene has been updated for
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance scene-owned motion (the camera rail) by `dt` seconds
    pub fn update(&mut self, dt: f64) {
        if self.disposed {
            return;
        }
        self.elapsed += dt;
        if let Some(rail) = &mut self.rail {
            rail.advance(dt as f32);
            self.camera.look_along(rail.position(), rail.heading());
        }
    }

    /// Tear the scene down. Later casts find nothing.
    pub fn dispose(&mut self) {
        if !self.disposed {
            debug!(scene = %self.name, entities = self.entities.len(), "scene disposed");
        }
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// All pickable entities hit by `ray`, nearest first.
    /// Equal distances keep spawn order.
    pub fn raycast(&self, ray: &Ray) -> Vec<RayHit> {
        if self.disposed {
            return Vec::new();
        }

        let mut hits: Vec<RayHit> = self
            .entities
            .iter()
            .filter(|e| e.pickable)
            .filter_map(|e| {
                ray_intersect(ray, &e.bounds()).map(|distance| RayHit {
                    entity: e.id,
                    point: ray.at(distance),
                    distance,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
