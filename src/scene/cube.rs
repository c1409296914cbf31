use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::point::Point3;

/// A box volume, rotated about the vertical axis only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default = "default_name")]
    pub name: String,
    pub position: Point3,
    /// Radians about +Y.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_size")]
    pub size: Point3,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_name() -> String {
    "Cube".to_string()
}

fn default_size() -> Point3 {
    Point3::new(1.0, 1.0, 1.0)
}

fn default_color() -> String {
    "#ababab".to_string()
}

impl Cube {
    /// Unit cube centered at `position`.
    #[must_use]
    pub fn new(position: Point3, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: default_name(),
            position,
            rotation: 0.0,
            size: default_size(),
            color: color.into(),
        }
    }
}
