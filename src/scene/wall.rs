use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::point::Point3;

pub const DEFAULT_WALL_HEIGHT: f32 = 2.5;
pub const DEFAULT_WALL_THICKNESS: f32 = 0.2;

/// A straight wall segment between two floor-plane points.
///
/// `p1 == p2` is tolerated and yields a zero-length wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub p1: Point3,
    pub p2: Point3,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_thickness")]
    pub thickness: f32,
    #[serde(default)]
    pub windows: Vec<Window>,
}

fn default_height() -> f32 {
    DEFAULT_WALL_HEIGHT
}

fn default_thickness() -> f32 {
    DEFAULT_WALL_THICKNESS
}

impl Wall {
    #[must_use]
    pub fn new(p1: Point3, p2: Point3) -> Self {
        Self {
            id: Uuid::new_v4(),
            p1,
            p2,
            height: DEFAULT_WALL_HEIGHT,
            thickness: DEFAULT_WALL_THICKNESS,
            windows: Vec::new(),
        }
    }

    /// Planar length (ignores any Y difference between the end points).
    #[must_use]
    pub fn length(&self) -> f32 {
        self.p1.xz().distance(self.p2.xz())
    }

    /// Rotation about +Y that aligns local +X with `p1 → p2`.
    #[must_use]
    pub fn angle(&self) -> f32 {
        segment_angle(self.p1.to_vec3(), self.p2.to_vec3())
    }

    #[must_use]
    pub fn midpoint(&self) -> Vec3 {
        (self.p1.to_vec3() + self.p2.to_vec3()) * 0.5
    }
}

/// Rotation about +Y for a box whose length runs from `a` to `b`.
#[must_use]
pub fn segment_angle(a: Vec3, b: Vec3) -> f32 {
    let d = b - a;
    -d.z.atan2(d.x)
}

pub const DEFAULT_WINDOW_HEIGHT: f32 = 1.5;
pub const DEFAULT_WINDOW_BOTTOM: f32 = 0.8;

/// Opening in a wall, placed by its own end points along the wall line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub p1: Point3,
    pub p2: Point3,
    #[serde(default = "default_window_height")]
    pub height: f32,
    #[serde(default = "default_window_bottom")]
    pub bottom_height: f32,
}

fn default_window_height() -> f32 {
    DEFAULT_WINDOW_HEIGHT
}

fn default_window_bottom() -> f32 {
    DEFAULT_WINDOW_BOTTOM
}

impl Window {
    #[must_use]
    pub fn new(p1: Point3, p2: Point3) -> Self {
        Self {
            id: Uuid::new_v4(),
            p1,
            p2,
            height: DEFAULT_WINDOW_HEIGHT,
            bottom_height: DEFAULT_WINDOW_BOTTOM,
        }
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.p1.xz().distance(self.p2.xz())
    }
}
