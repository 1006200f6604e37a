//! Runtime system trait

use frost_core::Result;
use frost_scene::Scene;
use std::any::Any;

/// Upcast to `Any` so a schedule can hand back concrete systems
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A unit of per-tick logic over the shared scene.
///
/// A system runs exactly once per tick and must not block: anything that
/// takes longer than a frame (a projectile in flight) is private state that
/// each `update` advances a little. Systems talk to each other only through
/// the scene or through calls made by the controller.
pub trait System: AsAny {
    /// Human-readable name, used in logs and errors
    fn name(&self) -> &str;

    /// Called once when the owning level is built
    fn initialize(&mut self, _scene: &mut Scene) -> Result<()> {
        Ok(())
    }

    /// Called once per running tick with the frame's delta in seconds
    fn update(&mut self, scene: &mut Scene, dt: f64) -> Result<()>;
}
