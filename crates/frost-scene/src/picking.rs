//! Ray-AABB picking
//!
//! Pointer input is unprojected through the camera's inverse view-projection
//! matrix into a world-space ray, which is then tested against entity
//! bounding boxes with the slab method.

use crate::camera::Camera;
use frost_core::Vec3;

/// A ray in world space. `direction` is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
        }
    }

    /// Build the ray through a point in normalized device coordinates.
    /// The ray starts at the camera eye, so hit distances are measured
    /// from the camera.
    pub fn from_ndc(camera: &Camera, ndc_x: f32, ndc_y: f32) -> Self {
        let near = camera.unproject(ndc_x, ndc_y, -1.0);
        let far = camera.unproject(ndc_x, ndc_y, 1.0);
        let direction = (far - near).try_normalize().unwrap_or_else(|| camera.forward());
        Self {
            origin: camera.position,
            direction,
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half(center: Vec3, half: Vec3) -> Self {
        let half = half.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Ray-AABB intersection using the slab method (Kay/Kajiya).
/// Returns the distance to the nearest hit in front of the origin, or 0 when
/// the origin is inside the box.
pub fn ray_intersect(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

        if dir.abs() < 1e-8 {
            // Parallel to this slab
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let (t1, t2) = ((lo - origin) * inv, (hi - origin) * inv);
        tmin = tmin.max(t1.min(t2));
        tmax = tmax.min(t1.max(t2));

        if tmin > tmax {
            return None;
        }
    }

    if tmax < 0.0 {
        None
    } else {
        Some(tmin.max(0.0))
    }
}
