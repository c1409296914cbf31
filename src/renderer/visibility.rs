//! Floor reveal animation
//!
//! Each floor level carries a `{target, current}` scale pair. The editor snaps
//! `current` to `target`; the showcase eases it once per frame so floors grow
//! from and shrink into the ground.

use std::collections::BTreeMap;

/// Fraction of the remaining distance covered per frame.
pub const FLOOR_LERP: f32 = 0.08;
/// A shrinking floor below this scale is hidden outright.
pub const HIDE_BELOW: f32 = 0.01;
/// Distance at which `current` snaps exactly onto `target`.
pub const SNAP_EPSILON: f32 = 0.005;
/// Scale a growing floor must reach before its point lights come on.
pub const LIGHT_REVEAL: f32 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorTransition {
    pub target: f32,
    pub current: f32,
    pub visible: bool,
}

impl FloorTransition {
    #[must_use]
    pub fn settled(target: f32) -> Self {
        Self {
            target,
            current: target,
            visible: target > 0.0,
        }
    }

    /// One animation frame.
    pub fn step(&mut self) {
        let next = self.current + (self.target - self.current) * FLOOR_LERP;
        self.current = next;

        if self.target == 0.0 && next < HIDE_BELOW {
            self.visible = false;
            self.current = 0.0;
        } else if self.target > 0.0 && !self.visible {
            self.visible = true;
        }

        if (self.target - next).abs() < SNAP_EPSILON {
            self.current = self.target;
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Point lights stay dark while shrinking and until fully grown.
    #[must_use]
    pub fn lights_shown(&self) -> bool {
        self.target >= 1.0 && self.current >= LIGHT_REVEAL
    }
}

/// Per-level transition table.
#[derive(Debug, Clone, Default)]
pub struct FloorTransitions {
    states: BTreeMap<u32, FloorTransition>,
}

impl FloorTransitions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, level: u32) -> Option<&FloorTransition> {
        self.states.get(&level)
    }

    /// Targets every level `<= max_level` at full scale and the rest at zero.
    ///
    /// A level seen for the first time starts settled at its target.
    pub fn set_limit(&mut self, levels: impl IntoIterator<Item = u32>, max_level: u32, immediate: bool) {
        for level in levels {
            let target = if level <= max_level { 1.0 } else { 0.0 };
            match self.states.get_mut(&level) {
                Some(state) if immediate => *state = FloorTransition::settled(target),
                Some(state) => state.target = target,
                None => {
                    self.states.insert(level, FloorTransition::settled(target));
                }
            }
        }
    }

    /// Advances every level by one frame. Returns `true` while any moved.
    pub fn animate(&mut self) -> bool {
        let mut moving = false;
        for state in self.states.values_mut() {
            if !state.is_settled() {
                state.step();
                moving = true;
            }
        }
        moving
    }
}
