//! Dwelling scene model
//!
//! The persisted entity graph and the camera used to look at it:
//! - [`Home`]: root document, owns the floors
//! - [`Floor`]: one level, owns walls, lights, cubes and its slab outline
//! - [`Wall`], [`Window`], [`Light`], [`Cube`]: floor entities, addressed by id
//! - [`Camera`]: perspective camera producing picking rays

pub mod camera;
pub mod color;
pub mod cube;
pub mod home;
pub mod light;
pub mod point;
pub mod wall;

pub use camera::Camera;
pub use color::{color_or, parse_hex_color, to_hex};
pub use cube::Cube;
pub use home::{Entity, Floor, FootprintBounds, Home};
pub use light::{Light, LightState};
pub use point::Point3;
pub use wall::{Wall, Window};

/// Vertical distance between two consecutive floor levels.
pub const FLOOR_HEIGHT: f32 = 2.5;
