//! Presentation seam
//!
//! The controller hands each frame's scene and camera to a [`Renderer`]. Real
//! hosts draw; the renderers here are for headless runs.

use frost_scene::{Camera, Scene};
use std::cell::Cell;
use std::rc::Rc;
use tracing::trace;

pub trait Renderer {
    fn render(&mut self, scene: &Scene, camera: &Camera);
}

/// Draws nothing, counts frames. Clones share the counter so a test can keep
/// one while the controller owns the other.
#[derive(Debug, Clone, Default)]
pub struct FrameCounter {
    frames: Rc<Cell<u64>>,
}

impl FrameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames.get()
    }
}

impl Renderer for FrameCounter {
    fn render(&mut self, _scene: &Scene, _camera: &Camera) {
        self.frames.set(self.frames.get() + 1);
    }
}

/// Logs a one-line frame summary at trace level
#[derive(Debug, Default)]
pub struct TraceRenderer {
    frame: u64,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for TraceRenderer {
    fn render(&mut self, scene: &Scene, camera: &Camera) {
        self.frame += 1;
        let satisfied = scene.targets().filter(|e| e.satisfied).count();
        trace!(
            frame = self.frame,
            scene = scene.name(),
            camera = ?camera.position,
            entities = scene.len(),
            satisfied,
            "render"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_counter_clones_share_count() {
        let counter = FrameCounter::new();
        let mut renderer: Box<dyn Renderer> = Box::new(counter.clone());
        let scene = Scene::new("empty");

        renderer.render(&scene, scene.camera());
        renderer.render(&scene, scene.camera());

        assert_eq!(counter.frames(), 2);
    }
}
