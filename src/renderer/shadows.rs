//! Shadow caster allocation
//!
//! Every point light is built, but only a capped subset may cast shadows.
//! The subset is recomputed from scratch on each rebalance.

use super::drawable::LightEmitter;
use super::settings::RendererSettings;

/// Lights at or below this intensity never cast shadows.
pub const MIN_CASTER_INTENSITY: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
    pub map_size: u32,
    pub bias: f32,
    pub normal_bias: f32,
    /// Far plane of the shadow cube, matched to the light's range.
    pub far: f32,
}

impl ShadowConfig {
    #[must_use]
    pub fn for_range(settings: &RendererSettings, range: f32) -> Self {
        Self {
            map_size: settings.shadow_map_size,
            bias: settings.shadow_bias,
            normal_bias: settings.shadow_normal_bias,
            far: range,
        }
    }
}

/// Picks up to `cap` candidates with the highest intensity.
///
/// The sort is stable, so equal intensities keep their input order and
/// repeated calls pick the same lights.
#[must_use]
pub fn select_casters<K: Copy>(candidates: &[(K, f32)], cap: usize) -> Vec<K> {
    let mut ranked: Vec<(K, f32)> = candidates
        .iter()
        .copied()
        .filter(|&(_, intensity)| intensity > MIN_CASTER_INTENSITY)
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(cap).map(|(key, _)| key).collect()
}

/// Flips the casting flag if needed. Returns `true` when it changed.
///
/// A light that starts casting gets fresh shadow parameters and a stale map.
pub fn apply_caster_flag(emitter: &mut LightEmitter, cast: bool, settings: &RendererSettings) -> bool {
    if emitter.cast_shadow == cast {
        return false;
    }
    emitter.cast_shadow = cast;
    if cast {
        emitter.shadow = Some(ShadowConfig::for_range(settings, emitter.range));
        emitter.shadow_needs_update = true;
    }
    true
}
