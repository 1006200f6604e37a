//! Short-lived landing bursts

use frost_core::{Result, Vec3};
use frost_runtime::System;
use frost_scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub position: Vec3,
    pub age: f64,
    pub lifetime: f64,
}

impl Effect {
    /// Normalized age in [0, 1]
    pub fn age_ratio(&self) -> f64 {
        if self.lifetime <= 0.0 {
            1.0
        } else {
            (self.age / self.lifetime).min(1.0)
        }
    }
}

pub struct EffectSystem {
    effects: Vec<Effect>,
    lifetime: f64,
}

impl EffectSystem {
    pub fn new(lifetime: f64) -> Self {
        Self {
            effects: Vec::new(),
            lifetime,
        }
    }

    pub fn spawn(&mut self, at: Vec3) {
        self.effects.push(Effect {
            position: at,
            age: 0.0,
            lifetime: self.lifetime,
        });
    }

    pub fn active(&self) -> &[Effect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl System for EffectSystem {
    fn name(&self) -> &str {
        "effects"
    }

    fn update(&mut self, _scene: &mut Scene, dt: f64) -> Result<()> {
        for effect in &mut self.effects {
            effect.age += dt;
        }
        self.effects.retain(|e| e.age < e.lifetime);
        Ok(())
    }
}
