//! Presents in flight from the camera to whatever was clicked

use frost_core::{Result, Vec3};
use frost_runtime::{landing, Arrival, Landing, LandingSignal, System};
use frost_scene::Scene;
use tracing::debug;

struct Present {
    position: Vec3,
    destination: Vec3,
    flight_time: f64,
    signal: LandingSignal,
}

/// Moves each present toward its destination at a fixed speed and fires its
/// [`Landing`] on arrival.
pub struct PresentSystem {
    presents: Vec<Present>,
    speed: f32,
    tolerance: f32,
    landed: u64,
}

impl PresentSystem {
    pub fn new(speed: f32, tolerance: f32) -> Self {
        Self {
            presents: Vec::new(),
            speed,
            tolerance: tolerance.max(0.0),
            landed: 0,
        }
    }

    /// Launch a present. The returned handle resolves on the update in which
    /// it arrives.
    pub fn shoot(&mut self, from: Vec3, to: Vec3) -> Landing {
        let (signal, landing) = landing();
        debug!(from = ?from, to = ?to, distance = from.distance(to), "present launched");
        self.presents.push(Present {
            position: from,
            destination: to,
            flight_time: 0.0,
            signal,
        });
        landing
    }

    pub fn in_flight(&self) -> usize {
        self.presents.len()
    }

    /// Current positions of presents still in the air
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.presents.iter().map(|p| p.position)
    }

    /// Total presents that have come down
    pub fn landed(&self) -> u64 {
        self.landed
    }
}

impl System for PresentSystem {
    fn name(&self) -> &str {
        "presents"
    }

    fn update(&mut self, _scene: &mut Scene, dt: f64) -> Result<()> {
        let step = self.speed * dt as f32;
        let mut arrived = Vec::new();

        for (index, present) in self.presents.iter_mut().enumerate() {
            present.flight_time += dt;
            let remaining = present.position.distance(present.destination);
            if step >= remaining - self.tolerance {
                present.position = present.destination;
                arrived.push(index);
            } else {
                let heading = (present.destination - present.position) / remaining;
                present.position += heading * step;
            }
        }

        // Remove back to front so earlier indices stay valid
        for index in arrived.into_iter().rev() {
            let present = self.presents.swap_remove(index);
            self.landed += 1;
            let arrival = Arrival {
                point: present.destination,
                flight_time: present.flight_time,
            };
            if !present.signal.land(arrival) {
                debug!(point = ?arrival.point, "present landed with nobody waiting");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frost_runtime::LandingStatus;

    #[test]
    fn lands_after_enough_ticks() {
        let mut scene = Scene::new("sky");
        let mut presents = PresentSystem::new(2.0, 0.01);
        let mut landing = presents.shoot(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0));

        presents.update(&mut scene, 1.0).unwrap();
        assert_eq!(landing.status(), LandingStatus::InFlight);
        assert_eq!(presents.in_flight(), 1);

        presents.update(&mut scene, 1.0).unwrap();
        match landing.status() {
            LandingStatus::Landed(arrival) => {
                assert_eq!(arrival.point, Vec3::new(0.0, 0.0, -3.0));
                assert!((arrival.flight_time - 2.0).abs() < 1e-9);
            }
            other => panic!("expected a landing, got {other:?}"),
        }
        assert_eq!(presents.in_flight(), 0);
        assert_eq!(presents.landed(), 1);
    }

    #[test]
    fn moves_toward_destination() {
        let mut scene = Scene::new("sky");
        let mut presents = PresentSystem::new(1.0, 0.01);
        let _landing = presents.shoot(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));

        presents.update(&mut scene, 1.5).unwrap();
        let position = presents.positions().next().unwrap();
        assert!((position - Vec3::new(1.5, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn zero_distance_lands_immediately() {
        let mut scene = Scene::new("sky");
        let mut presents = PresentSystem::new(1.0, 0.01);
        let mut landing = presents.shoot(Vec3::ONE, Vec3::ONE);

        presents.update(&mut scene, 0.0).unwrap();
        assert!(matches!(landing.status(), LandingStatus::Landed(_)));
    }

    #[test]
    fn independent_presents_land_independently() {
        let mut scene = Scene::new("sky");
        let mut presents = PresentSystem::new(1.0, 0.0);
        let mut near = presents.shoot(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut far = presents.shoot(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0));

        presents.update(&mut scene, 1.0).unwrap();
        assert!(matches!(near.status(), LandingStatus::Landed(_)));
        assert_eq!(far.status(), LandingStatus::InFlight);
    }

    #[test]
    fn dropped_landing_does_not_stall_the_system() {
        let mut scene = Scene::new("sky");
        let mut presents = PresentSystem::new(10.0, 0.0);
        drop(presents.shoot(Vec3::ZERO, Vec3::X));

        presents.update(&mut scene, 1.0).unwrap();
        assert_eq!(presents.in_flight(), 0);
    }
}
