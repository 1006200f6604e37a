//! Camera rail: a polyline the camera rides along while the level runs

use frost_core::{FrostError, Result, Vec3};

/// How far ahead of the camera the look target sits, in world units
const LOOK_AHEAD: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct CameraRail {
    points: Vec<Vec3>,
    /// Travel speed in world units per second
    speed: f32,
    travelled: f32,
    length: f32,
}

impl CameraRail {
    pub fn new(points: Vec<Vec3>, speed: f32) -> Result<Self> {
        if points.len() < 2 {
            return Err(FrostError::SceneError(
                "camera rail needs at least two points".into(),
            ));
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(FrostError::SceneError(format!(
                "camera rail speed must be a non-negative number, got {speed}"
            )));
        }
        let length = points.windows(2).map(|w| w[0].distance(w[1])).sum();
        Ok(Self {
            points,
            speed,
            travelled: 0.0,
            length,
        })
    }

    pub fn advance(&mut self, dt: f32) {
        self.travelled = (self.travelled + self.speed * dt).min(self.length);
    }

    pub fn travelled(&self) -> f32 {
        self.travelled
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn is_finished(&self) -> bool {
        self.travelled >= self.length
    }

    pub fn position(&self) -> Vec3 {
        self.position_at(self.travelled)
    }

    /// Direction from the current position toward a point slightly ahead.
    /// At the end of the rail the last segment's direction is kept.
    pub fn heading(&self) -> Vec3 {
        let here = self.position();
        let ahead = self.position_at(self.travelled + LOOK_AHEAD);
        (ahead - here).try_normalize().unwrap_or_else(|| {
            let n = self.points.len();
            (self.points[n - 1] - self.points[n - 2])
                .try_normalize()
                .unwrap_or(Vec3::NEG_Z)
        })
    }

    /// Point at `distance` along the rail, clamped to its ends
    pub fn position_at(&self, distance: f32) -> Vec3 {
        let mut remaining = distance.max(0.0);
        for w in self.points.windows(2) {
            let segment = w[0].distance(w[1]);
            if remaining <= segment {
                if segment <= f32::EPSILON {
                    return w[1];
                }
                return w[0].lerp(w[1], remaining / segment);
            }
            remaining -= segment;
        }
        self.points[self.points.len() - 1]
    }
}
