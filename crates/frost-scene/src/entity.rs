//! Scene entities

use crate::picking::Aabb;
use frost_core::{EntityId, Vec3};
use serde::{Deserialize, Serialize};

/// What an entity is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// Something the player aims at, e.g. an elf waiting for a present
    Target { kind: String },
    /// Scenery: can block a cast but never resolves
    Prop,
}

/// Side-to-side patrol motion applied by the elves system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sway {
    /// Peak offset along X in world units
    pub amplitude: f32,
    /// Oscillations per second
    pub frequency: f32,
}

/// One renderable, interactable object in a scene
#[derive(Debug, Clone)]
pub struct SceneEntity {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKind,
    pub position: Vec3,
    pub half_extents: Vec3,
    /// Asset name of the sprite currently shown
    pub sprite: Option<String>,
    pub pickable: bool,
    /// Set once a target has received its effect
    pub satisfied: bool,
    pub sway: Option<Sway>,
}

impl SceneEntity {
    fn new(name: impl Into<String>, kind: EntityKind, position: Vec3) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            kind,
            position,
            half_extents: Vec3::splat(0.5),
            sprite: None,
            pickable: true,
            satisfied: false,
            sway: None,
        }
    }

    pub fn target(name: impl Into<String>, kind: impl Into<String>, position: Vec3) -> Self {
        Self::new(name, EntityKind::Target { kind: kind.into() }, position)
    }

    pub fn prop(name: impl Into<String>, position: Vec3) -> Self {
        Self::new(name, EntityKind::Prop, position)
    }

    pub fn with_half_extents(mut self, half_extents: Vec3) -> Self {
        self.half_extents = half_extents;
        self
    }

    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    pub fn with_sway(mut self, sway: Sway) -> Self {
        self.sway = Some(sway);
        self
    }

    pub fn with_pickable(mut self, pickable: bool) -> Self {
        self.pickable = pickable;
        self
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half(self.position, self.half_extents)
    }

    pub fn is_target(&self) -> bool {
        matches!(self.kind, EntityKind::Target { .. })
    }

    pub fn target_kind(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::Target { kind } => Some(kind),
            EntityKind::Prop => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_fill_fields() {
        let elf = SceneEntity::target("elf_1", "elf", Vec3::new(0.0, 0.0, -5.0))
            .with_sprite("elf@2x.png")
            .with_half_extents(Vec3::new(0.5, 1.0, 0.5));
        assert!(elf.is_target());
        assert_eq!(elf.target_kind(), Some("elf"));
        assert_eq!(elf.sprite.as_deref(), Some("elf@2x.png"));
        assert_eq!(elf.bounds().max, Vec3::new(0.5, 1.0, -4.5));

        let tree = SceneEntity::prop("tree", Vec3::ZERO).with_pickable(false);
        assert!(!tree.is_target());
        assert!(!tree.pickable);
        assert_eq!(tree.target_kind(), None);
    }

    #[test]
    fn every_entity_gets_its_own_id() {
        let a = SceneEntity::prop("a", Vec3::ZERO);
        let b = SceneEntity::prop("b", Vec3::ZERO);
        assert_ne!(a.id, b.id);
    }
}
