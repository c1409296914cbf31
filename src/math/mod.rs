//! Geometry and ray utilities.
//!
//! Turns pointer input into world coordinates: NDC conversion, camera rays,
//! horizontal plane intersection with half-meter snapping, and the slab test
//! used for picking drawables.

pub mod ray;

pub use ray::{
    GRID_STEP, Ray, floor_point, intersect_horizontal_plane, planar_distance, pointer_to_ndc,
    ray_aabb_hit_t, ray_hits_obb, ray_hits_sphere, snap_to_grid,
};
