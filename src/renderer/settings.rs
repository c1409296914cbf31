//! Renderer Settings
//!
//! Tunables consumed by [`SceneRenderer`](super::SceneRenderer). All fields
//! default, so a partial `renderer` section in a config file is valid.
//!
//! ```rust,ignore
//! use storey::renderer::{RendererSettings, SceneRenderer};
//!
//! let settings = RendererSettings {
//!     shadow_caster_cap: 4,
//!     ..Default::default()
//! };
//! let renderer = SceneRenderer::new(settings);
//! ```

use serde::{Deserialize, Serialize};

/// Global configuration for scene rebuilds and shadow allocation.
///
/// | Field               | Description                                   | Default |
/// |---------------------|-----------------------------------------------|---------|
/// | `shadow_caster_cap` | Lights allowed to cast shadows at once        | `6`     |
/// | `shadow_map_size`   | Shadow map resolution for a new caster        | `512`   |
/// | `shadow_bias`       | Depth bias for a new caster                   | `0.005` |
/// | `shadow_normal_bias`| Normal offset bias for a new caster           | `0.02`  |
/// | `light_range`       | Point light falloff radius                    | `15.0`  |
/// | `intensity_scale`   | Stored intensity to emitter intensity factor  | `5.0`   |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    pub shadow_caster_cap: usize,
    pub shadow_map_size: u32,
    pub shadow_bias: f32,
    pub shadow_normal_bias: f32,
    pub light_range: f32,
    pub intensity_scale: f32,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            shadow_caster_cap: 6,
            shadow_map_size: 512,
            shadow_bias: 0.005,
            shadow_normal_bias: 0.02,
            light_range: 15.0,
            intensity_scale: 5.0,
        }
    }
}
