//! Screen-space pointer to world-space hits

use frost_core::{EntityId, Vec3};
use frost_runtime::Viewport;
use frost_scene::{Ray, RayHit, Scene};

/// One entity under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub entity: EntityId,
    pub point: Vec3,
    /// Distance from the camera eye
    pub distance: f32,
}

impl From<RayHit> for Intersection {
    fn from(hit: RayHit) -> Self {
        Self {
            entity: hit.entity,
            point: hit.point,
            distance: hit.distance,
        }
    }
}

/// Turns viewport pixels into ordered scene intersections
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionResolver {
    viewport: Viewport,
}

impl InteractionResolver {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// World-space ray from the scene camera through the client point
    pub fn ray_through(&self, scene: &Scene, client_x: f32, client_y: f32) -> Ray {
        let (ndc_x, ndc_y) = self.viewport.to_ndc(client_x, client_y);
        Ray::from_ndc(scene.camera(), ndc_x, ndc_y)
    }

    /// Every pickable entity under the point, nearest first. Empty for a
    /// disposed scene or when nothing is hit.
    pub fn cast(&self, scene: &Scene, client_x: f32, client_y: f32) -> Vec<Intersection> {
        let ray = self.ray_through(scene, client_x, client_y);
        scene.raycast(&ray).into_iter().map(Intersection::from).collect()
    }
}
