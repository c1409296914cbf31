//! Utility Module
//!
//! - [`OrbitControls`]: camera orbit controller used by the showcase tour

pub mod orbit_control;

pub use orbit_control::OrbitControls;
