//! Perspective camera

use frost_core::Vec3;
use glam::{Mat4, Vec4};

/// A perspective camera looking from `position` toward `target`
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 0.0),
            target: Vec3::new(0.0, 1.5, -1.0),
            up: Vec3::Y,
            fov: 60.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera at `position` looking at `target`, other parameters default
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    /// Match the aspect ratio to a viewport (the resize listener's job)
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Place the camera at `position` facing `direction`
    pub fn look_along(&mut self, position: Vec3, direction: Vec3) {
        let direction = direction.try_normalize().unwrap_or_else(|| self.forward());
        self.position = position;
        self.target = position + direction;
    }

    /// Unit vector the camera faces
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Inverse of the view-projection matrix, for unprojecting
    pub fn inverse_view_projection_matrix(&self) -> Mat4 {
        self.view_projection_matrix().inverse()
    }

    /// Map a point in normalized device coordinates back into world space.
    /// `ndc_z` is -1 on the near plane and 1 on the far plane.
    pub fn unproject(&self, ndc_x: f32, ndc_y: f32, ndc_z: f32) -> Vec3 {
        let world = self.inverse_view_projection_matrix() * Vec4::new(ndc_x, ndc_y, ndc_z, 1.0);
        world.truncate() / world.w
    }
}
