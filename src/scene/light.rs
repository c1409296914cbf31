use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::point::Point3;

/// Intensity substituted for non-finite or negative stored values.
pub const DEFAULT_INTENSITY: f32 = 1.0;

/// Switchable state of a light, as pushed by the synchronization feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightState {
    #[serde(default)]
    pub on: bool,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_intensity", deserialize_with = "lenient_intensity")]
    intensity: f32,
}

fn default_color() -> String {
    "#ffffff".to_string()
}

fn default_intensity() -> f32 {
    DEFAULT_INTENSITY
}

// Hand-edited files carry `null`, strings or garbage here. Anything that is
// not a number becomes NaN and is repaired on first read.
fn lenient_intensity<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().map_or(f32::NAN, |v| v as f32),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(f32::NAN),
        _ => f32::NAN,
    })
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            on: false,
            color: default_color(),
            intensity: DEFAULT_INTENSITY,
        }
    }
}

impl LightState {
    #[must_use]
    pub fn new(on: bool, color: impl Into<String>, intensity: f32) -> Self {
        Self {
            on,
            color: color.into(),
            intensity,
        }
    }

    /// Returns the intensity, repairing the stored value first.
    ///
    /// A non-finite or negative intensity is replaced by
    /// [`DEFAULT_INTENSITY`] and the replacement is kept.
    pub fn intensity(&mut self) -> f32 {
        self.normalize_intensity();
        self.intensity
    }

    /// The raw stored value, possibly invalid.
    #[must_use]
    pub fn stored_intensity(&self) -> f32 {
        self.intensity
    }

    /// Same coercion as [`intensity`](Self::intensity) without writing back.
    #[must_use]
    pub fn sanitized_intensity(&self) -> f32 {
        sanitize(self.intensity)
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    /// Repairs the stored intensity. Returns `true` if it was changed.
    pub fn normalize_intensity(&mut self) -> bool {
        let fixed = sanitize(self.intensity);
        // NaN != NaN, compare bit patterns
        if fixed.to_bits() == self.intensity.to_bits() {
            return false;
        }
        log::warn!(
            "Light intensity {} is invalid, resetting to {}",
            self.intensity,
            fixed
        );
        self.intensity = fixed;
        true
    }

    /// `true` when the light is on with a positive intensity.
    #[must_use]
    pub fn is_emitting(&self) -> bool {
        self.on && self.sanitized_intensity() > 0.0
    }
}

fn sanitize(intensity: f32) -> f32 {
    if intensity.is_finite() && intensity >= 0.0 {
        intensity
    } else {
        DEFAULT_INTENSITY
    }
}

/// A point light placed in a floor. Addressed by `id` so the live feed can
/// reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default = "default_light_name")]
    pub name: String,
    pub position: Point3,
    #[serde(default)]
    pub state: LightState,
}

fn default_light_name() -> String {
    "Light".to_string()
}

impl Light {
    /// A new light, switched on at full white.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Point3) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position,
            state: LightState::new(true, default_color(), DEFAULT_INTENSITY),
        }
    }
}
