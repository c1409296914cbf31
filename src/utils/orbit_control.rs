use glam::Vec3;

use crate::scene::Camera;

/// Spherical orbit around a center point, with optional auto-rotation.
///
/// `theta` is the azimuth (0 looks from +Z), `phi` the polar angle from +Y.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub min_distance: f32,

    /// Radians added to `theta` per 60 Hz frame while enabled.
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,

    pub center: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl OrbitControls {
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            min_distance: 1.0,

            auto_rotate: false,
            auto_rotate_speed: 0.002,

            center,
            radius,
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,
        }
    }

    /// Places the eye `horizontal_radius` away from the center axis and
    /// `height_offset` above the center.
    pub fn set_cylindrical(&mut self, horizontal_radius: f32, height_offset: f32) {
        self.radius = horizontal_radius.hypot(height_offset).max(self.min_distance);
        self.phi = horizontal_radius.atan2(height_offset);
    }

    /// Eye position for the current angles.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.center
            + Vec3::new(
                self.radius * sin_phi * sin_theta,
                self.radius * cos_phi,
                self.radius * sin_phi * cos_theta,
            )
    }

    /// Advances the orbit by `dt` seconds and aims `camera` at the center.
    pub fn update(&mut self, camera: &mut Camera, dt: f32) {
        if self.auto_rotate {
            self.theta += self.auto_rotate_speed * dt * 60.0;
        }

        const EPS: f32 = 0.0001;
        self.phi = self.phi.clamp(EPS, std::f32::consts::PI - EPS);

        camera.set_position(self.eye());
        camera.look_at(self.center);
    }
}
