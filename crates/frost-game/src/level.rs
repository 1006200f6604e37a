//! One playable level: its scene, its systems and the shots still in the air

use crate::config::GameConfig;
use crate::render::Renderer;
use crate::resolver::{InteractionResolver, Intersection};
use crate::systems::{EffectSystem, ElvesSystem, PresentSystem};
use crate::visuals::TargetVisuals;
use frost_core::{EntityId, Result};
use frost_runtime::{Landing, LandingStatus, SystemSchedule};
use frost_scene::Scene;
use tracing::{debug, info, warn};

/// What a pointer-down did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Nothing under the pointer
    Missed,
    /// A present is on its way to the nearest hit. `target` is set when that
    /// hit was a target that can be resolved.
    Shot {
        hit: Intersection,
        target: Option<EntityId>,
    },
}

/// A shot waiting to land
pub struct PendingResolution {
    landing: Landing,
    target: Option<EntityId>,
}

impl PendingResolution {
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }
}

/// What happened when a pending shot landed
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    /// First delivery to this target
    Resolved { entity: EntityId, name: String },
    /// Landed on a target that had already received its present
    AlreadySatisfied { entity: EntityId },
    /// The target left the scene while the present was in flight
    TargetMissing { entity: EntityId },
    /// Landed on scenery
    NoTarget,
    /// The present was dropped before landing
    Abandoned,
}

pub struct Level {
    index: usize,
    scene: Scene,
    schedule: SystemSchedule,
    resolver: InteractionResolver,
    pending: Vec<PendingResolution>,
}

impl Level {
    /// Wire a freshly built scene to its systems. Systems run in the order
    /// elves, presents, effects.
    pub fn new(index: usize, scene: Scene, config: &GameConfig) -> Result<Self> {
        let schedule = SystemSchedule::new()
            .with(ElvesSystem::new())
            .with(PresentSystem::new(
                config.present_speed,
                config.landing_tolerance,
            ))
            .with(EffectSystem::new(config.effect_lifetime));
        Self::with_schedule(index, scene, schedule, config)
    }

    /// Wire a scene to a caller-built schedule. Shots only fly when the
    /// schedule carries a [`PresentSystem`].
    pub fn with_schedule(
        index: usize,
        mut scene: Scene,
        mut schedule: SystemSchedule,
        config: &GameConfig,
    ) -> Result<Self> {
        scene
            .camera_mut()
            .set_viewport(config.viewport.width, config.viewport.height);
        schedule.initialize(&mut scene)?;

        info!(
            level = index,
            scene = scene.name(),
            targets = scene.targets().count(),
            "level built"
        );

        Ok(Self {
            index,
            scene,
            schedule,
            resolver: InteractionResolver::new(config.viewport),
            pending: Vec::new(),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn schedule(&self) -> &SystemSchedule {
        &self.schedule
    }

    pub fn schedule_mut(&mut self) -> &mut SystemSchedule {
        &mut self.schedule
    }

    pub fn resolver(&self) -> &InteractionResolver {
        &self.resolver
    }

    /// Shots fired but not yet landed
    pub fn pending(&self) -> &[PendingResolution] {
        &self.pending
    }

    /// Advance the scene and every system by `dt`. The first failing system
    /// aborts the rest.
    pub fn update(&mut self, dt: f64) -> Result<()> {
        self.schedule.run(&mut self.scene, dt)
    }

    pub fn cast(&self, client_x: f32, client_y: f32) -> Vec<Intersection> {
        self.resolver.cast(&self.scene, client_x, client_y)
    }

    /// Fire a present at the nearest entity under the pointer
    pub fn handle_click(&mut self, client_x: f32, client_y: f32) -> ClickOutcome {
        let Some(hit) = self.cast(client_x, client_y).first().copied() else {
            debug!(client_x, client_y, "click hit nothing");
            return ClickOutcome::Missed;
        };

        let origin = self.scene.camera().position;
        let Some(presents) = self.schedule.get_mut::<PresentSystem>() else {
            warn!(level = self.index, "no present system; click ignored");
            return ClickOutcome::Missed;
        };
        let landing = presents.shoot(origin, hit.point);

        let target = self
            .scene
            .get(hit.entity)
            .filter(|e| e.is_target())
            .map(|e| e.id);
        self.pending.push(PendingResolution { landing, target });

        ClickOutcome::Shot { hit, target }
    }

    /// Apply every shot that landed during the last update. Shots still in
    /// flight stay pending.
    pub fn poll_resolutions(&mut self, visuals: &dyn TargetVisuals) -> Vec<ResolutionOutcome> {
        let mut outcomes = Vec::new();
        let pending = std::mem::take(&mut self.pending);

        for mut shot in pending {
            match shot.landing.status() {
                LandingStatus::InFlight => self.pending.push(shot),
                LandingStatus::Abandoned => {
                    warn!(level = self.index, "present abandoned before landing");
                    outcomes.push(ResolutionOutcome::Abandoned);
                }
                LandingStatus::Landed(arrival) => {
                    if let Some(effects) = self.schedule.get_mut::<EffectSystem>() {
                        effects.spawn(arrival.point);
                    }
                    outcomes.push(self.resolve(shot.target, visuals));
                }
            }
        }
        outcomes
    }

    fn resolve(&mut self, target: Option<EntityId>, visuals: &dyn TargetVisuals) -> ResolutionOutcome {
        let Some(id) = target else {
            return ResolutionOutcome::NoTarget;
        };
        let Some(entity) = self.scene.get_mut(id) else {
            warn!(target_id = %id, "target left the scene before its present landed; skipping");
            return ResolutionOutcome::TargetMissing { entity: id };
        };

        if let Some(replacement) = entity.sprite.as_deref().and_then(|s| visuals.replacement_for(s)) {
            debug!(target_id = %id, sprite = %replacement, "swapping sprite");
            entity.sprite = Some(replacement);
        }

        if entity.satisfied {
            return ResolutionOutcome::AlreadySatisfied { entity: id };
        }
        entity.satisfied = true;
        ResolutionOutcome::Resolved {
            entity: id,
            name: entity.name.clone(),
        }
    }

    /// Every target has its present
    pub fn is_complete(&self) -> bool {
        self.scene.all_targets_satisfied()
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.render(&self.scene, self.scene.camera());
    }

    /// Tear down the scene. Later casts find nothing.
    pub fn dispose(&mut self) {
        self.pending.clear();
        self.scene.dispose();
    }
}
