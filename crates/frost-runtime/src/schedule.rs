//! Ordered system schedule

use crate::system::System;
use frost_core::Result;
use frost_scene::Scene;
use std::any::Any;
use tracing::warn;

/// Systems in the order they run each tick.
///
/// The order is fixed when the schedule is built: later systems may read
/// what earlier ones wrote during the same tick.
#[derive(Default)]
pub struct SystemSchedule {
    systems: Vec<Box<dyn System>>,
}

impl SystemSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system to the end of the order
    pub fn with(mut self, system: impl System + 'static) -> Self {
        self.push(system);
        self
    }

    /// Append a system to an already built schedule. It runs after every
    /// system already in the order.
    pub fn push(&mut self, system: impl System + 'static) {
        self.systems.push(Box::new(system));
    }

    pub fn initialize(&mut self, scene: &mut Scene) -> Result<()> {
        for system in &mut self.systems {
            system.initialize(scene)?;
        }
        Ok(())
    }

    /// The update phase: the scene first, then every system in order with
    /// the same delta. The first failing system ends the phase for this tick.
    pub fn run(&mut self, scene: &mut Scene, dt: f64) -> Result<()> {
        scene.update(dt);
        let count = self.systems.len();
        for (position, system) in self.systems.iter_mut().enumerate() {
            if let Err(err) = system.update(scene, dt) {
                let skipped = count - position - 1;
                warn!(system = system.name(), skipped, %err, "system failed");
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Borrow the first system of type `T`
    pub fn get<T: System + Any>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|system| (**system).as_any().downcast_ref::<T>())
    }

    /// Mutably borrow the first system of type `T`
    pub fn get_mut<T: System + Any>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|system| (**system).as_any_mut().downcast_mut::<T>())
    }
}
