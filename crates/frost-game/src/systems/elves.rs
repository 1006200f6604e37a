//! Side-to-side patrol for targets that carry a [`Sway`](frost_scene::Sway)

use frost_core::{EntityId, Result, Vec3};
use frost_runtime::System;
use frost_scene::Scene;
use std::collections::HashMap;
use std::f32::consts::TAU;

#[derive(Default)]
pub struct ElvesSystem {
    anchors: HashMap<EntityId, Vec3>,
    time: f64,
}

impl ElvesSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rest position the entity sways around, once seen
    pub fn anchor(&self, id: EntityId) -> Option<Vec3> {
        self.anchors.get(&id).copied()
    }
}

impl System for ElvesSystem {
    fn name(&self) -> &str {
        "elves"
    }

    fn initialize(&mut self, scene: &mut Scene) -> Result<()> {
        self.time = 0.0;
        self.anchors = scene
            .entities()
            .iter()
            .filter(|e| e.sway.is_some())
            .map(|e| (e.id, e.position))
            .collect();
        Ok(())
    }

    fn update(&mut self, scene: &mut Scene, dt: f64) -> Result<()> {
        self.time += dt;
        let time = self.time as f32;

        for entity in scene.entities_mut() {
            let Some(sway) = entity.sway else {
                continue;
            };
            let anchor = *self.anchors.entry(entity.id).or_insert(entity.position);
            entity.position.x = anchor.x + sway.amplitude * (TAU * sway.frequency * time).sin();
        }

        // Forget anything that has left the scene
        self.anchors.retain(|id, _| scene.get(*id).is_some());
        Ok(())
    }
}
