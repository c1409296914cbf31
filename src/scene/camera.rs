use glam::{Mat4, Vec2, Vec3};

use crate::app::input::PointerEvent;
use crate::math::Ray;

/// Perspective camera looking at a target point.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,

    // === Projection ===
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    view_matrix: Mat4,
    projection_matrix: Mat4,
    view_projection_matrix: Mat4,
}

impl Camera {
    /// `fov` is the vertical field of view in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            position: Vec3::new(0.0, 10.0, 20.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam.update_view_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        // perspective_rh maps depth to 0..1
        self.projection_matrix =
            Mat4::perspective_rh(self.fov, self.aspect.max(1e-4), self.near, self.far);
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    fn update_view_matrix(&mut self) {
        let target = if (self.target - self.position).length_squared() < 1e-12 {
            self.position - Vec3::Z
        } else {
            self.target
        };
        self.view_matrix = Mat4::look_at_rh(self.position, target, self.up);
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_matrix();
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        self.update_view_matrix();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.view_projection_matrix
    }

    /// World-space ray through a point in normalized device coordinates.
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection_matrix.inverse();
        let far_point = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far_point - self.position)
    }

    #[must_use]
    pub fn ray_from_pointer(&self, event: &PointerEvent) -> Ray {
        self.ray_from_ndc(event.ndc())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new_perspective(45.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}
