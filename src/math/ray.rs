use glam::{Mat4, Vec2, Vec3};

use crate::app::input::Viewport;
use crate::scene::FLOOR_HEIGHT;

/// Placement grid resolution in world units.
pub const GRID_STEP: f32 = 0.5;

const PARALLEL_EPSILON: f32 = 1e-6;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Converts client coordinates into normalized device coordinates (-1..1, y up).
#[must_use]
pub fn pointer_to_ndc(client: Vec2, viewport: &Viewport) -> Vec2 {
    let width = viewport.width.max(1.0);
    let height = viewport.height.max(1.0);
    Vec2::new(
        ((client.x - viewport.left) / width) * 2.0 - 1.0,
        -((client.y - viewport.top) / height) * 2.0 + 1.0,
    )
}

/// Intersects a ray with the horizontal plane `y = height`.
///
/// Returns `None` when the ray runs parallel to the plane (looking past the
/// horizon) or when the plane lies behind the ray origin.
#[must_use]
pub fn intersect_horizontal_plane(ray: &Ray, height: f32) -> Option<Vec3> {
    let denom = ray.direction.y;
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (height - ray.origin.y) / denom;
    if t < 0.0 || !t.is_finite() {
        return None;
    }
    Some(ray.at(t))
}

/// Rounds to the nearest grid step, halves rounding towards +infinity.
#[inline]
#[must_use]
pub fn snap_to_grid(value: f32) -> f32 {
    (value / GRID_STEP + 0.5).floor() * GRID_STEP
}

/// Resolves a pointer ray into a placement coordinate on a floor.
///
/// X and Z are snapped to the half-meter grid and Y is pinned to the floor
/// height exactly. Every editor tool consumes this, never raw pointer data.
#[must_use]
pub fn floor_point(ray: &Ray, level: u32) -> Option<Vec3> {
    let height = level as f32 * FLOOR_HEIGHT;
    let hit = intersect_horizontal_plane(ray, height)?;
    Some(Vec3::new(snap_to_grid(hit.x), height, snap_to_grid(hit.z)))
}

/// Distance between two points ignoring height.
#[inline]
#[must_use]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Ray against an oriented box given by its world matrix and local size.
///
/// The box is centered on the matrix origin. Returns the hit distance along
/// the ray in world units.
#[must_use]
pub fn ray_hits_obb(ray: &Ray, world: &Mat4, size: Vec3) -> Option<f32> {
    if world.determinant().abs() < 1e-9 {
        return None;
    }
    let inv = world.inverse();
    let o_local = inv.transform_point3(ray.origin);
    let d_local = inv.transform_vector3(ray.direction);
    let he = size * 0.5;
    let t = ray_aabb_hit_t(o_local, d_local, -he, he)?;
    // `d_local` is not normalized, but the parameter is shared with world space.
    Some(t)
}

/// Ray against a sphere. Returns the nearest non-negative hit distance.
#[must_use]
pub fn ray_hits_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt = disc.sqrt();
    let near = -b - sqrt;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sqrt;
    (far >= 0.0).then_some(far)
}

// Slab-method ray–AABB intersection, returns Some(t) or None
#[must_use]
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let (mut tmin, mut tmax) = slab(ray_origin.x, inv.x, min.x, max.x);
    let (tymin, tymax) = slab(ray_origin.y, inv.y, min.y, max.y);

    if tmin > tymax || tymin > tmax {
        return None;
    }
    tmin = tmin.max(tymin);
    tmax = tmax.min(tymax);

    let (tzmin, tzmax) = slab(ray_origin.z, inv.z, min.z, max.z);
    if tmin > tzmax || tzmin > tmax {
        return None;
    }
    tmin = tmin.max(tzmin);
    tmax = tmax.min(tzmax);

    if tmax < 0.0 {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

fn slab(origin: f32, inv_dir: f32, min: f32, max: f32) -> (f32, f32) {
    let mut t0 = (min - origin) * inv_dir;
    let mut t1 = (max - origin) * inv_dir;
    // 0 * inf for a ray lying exactly on a slab face
    if t0.is_nan() {
        t0 = f32::NEG_INFINITY;
    }
    if t1.is_nan() {
        t1 = f32::INFINITY;
    }
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }
    (t0, t1)
}
