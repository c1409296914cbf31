//! Smart-wall occlusion
//!
//! Walls and cubes between the camera and its target are compressed toward
//! the floor. A latch with a dead band around the switch distance keeps an
//! object from flickering when it sits right at the boundary.

use rustc_hash::FxHashMap;
use uuid::Uuid;

/// Vertical scale of a lowered object.
pub const LOWERED_SCALE: f32 = 0.25;
/// Objects nearer than `distance_to_target - THRESHOLD_OFFSET` are lowered.
pub const THRESHOLD_OFFSET: f32 = 0.5;
/// Half width of the dead band around the threshold.
pub const HYSTERESIS_BUFFER: f32 = 0.25;
pub const EASE_FACTOR: f32 = 0.1;
pub const SNAP_EPSILON: f32 = 0.01;

/// Next latch value for an object whose center projects to `projection`
/// along the view direction.
#[must_use]
pub fn next_latch(lowered: bool, projection: f32, threshold_center: f32) -> bool {
    if lowered {
        projection <= threshold_center + HYSTERESIS_BUFFER
    } else {
        projection < threshold_center - HYSTERESIS_BUFFER
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OcclusionState {
    pub lowered: bool,
    pub scale: f32,
}

impl Default for OcclusionState {
    fn default() -> Self {
        Self {
            lowered: false,
            scale: 1.0,
        }
    }
}

impl OcclusionState {
    /// Updates the latch and eases the scale one frame toward its target.
    pub fn step(&mut self, projection: f32, threshold_center: f32) {
        self.lowered = next_latch(self.lowered, projection, threshold_center);
        let target = self.target_scale();
        self.scale += (target - self.scale) * EASE_FACTOR;
        if (target - self.scale).abs() < SNAP_EPSILON {
            self.scale = target;
        }
    }

    #[must_use]
    pub fn target_scale(&self) -> f32 {
        if self.lowered { LOWERED_SCALE } else { 1.0 }
    }

    /// Back to full height immediately.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Vertical center for an object of rest center `rest_y` and height `height`
/// scaled by `scale`, keeping its bottom in place.
#[inline]
#[must_use]
pub fn lowered_center_y(rest_y: f32, height: f32, scale: f32) -> f32 {
    let bottom = rest_y - height * 0.5;
    bottom + height * scale * 0.5
}

/// Occlusion state per wall or cube id.
#[derive(Debug, Clone, Default)]
pub struct OcclusionTable {
    states: FxHashMap<Uuid, OcclusionState>,
}

impl OcclusionTable {
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&OcclusionState> {
        self.states.get(&id)
    }

    pub fn entry(&mut self, id: Uuid) -> &mut OcclusionState {
        self.states.entry(id).or_default()
    }

    /// Drops state for entities that no longer exist.
    pub fn retain(&mut self, mut keep: impl FnMut(&Uuid) -> bool) {
        self.states.retain(|id, _| keep(id));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
