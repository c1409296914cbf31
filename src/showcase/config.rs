use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Which floors the showcase reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloorSelection {
    /// Cycle through the floors, up and back down.
    #[default]
    Auto,
    /// Show floors up to this level and stay there.
    Level(u32),
}

/// Runtime options of the showcase, normally taken from the page URL.
///
/// | Key       | Values             | Default |
/// |-----------|--------------------|---------|
/// | `revolve` | `true` / `false`   | `true`  |
/// | `floor`   | `auto` / level     | `auto`  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowcaseConfig {
    pub revolve: bool,
    pub floor: FloorSelection,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            revolve: true,
            floor: FloorSelection::Auto,
        }
    }
}

impl ShowcaseConfig {
    /// Parses a query string such as `revolve=false&floor=2`.
    ///
    /// Only a case-insensitive `false` turns revolving off. A floor that is
    /// not a number, or is negative, falls back to level 0.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut config = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "revolve" => config.revolve = !value.eq_ignore_ascii_case("false"),
                "floor" => config.floor = parse_floor(&value),
                _ => {}
            }
        }
        config
    }

    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or_default())
    }
}

fn parse_floor(value: &str) -> FloorSelection {
    if value.eq_ignore_ascii_case("auto") {
        return FloorSelection::Auto;
    }
    match leading_integer(value) {
        Some(level) if level >= 0 => FloorSelection::Level(u32::try_from(level).unwrap_or(u32::MAX)),
        _ => FloorSelection::Level(0),
    }
}

/// Integer prefix of `value` (`"2nd"` is 2), ignoring leading whitespace.
fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Timing of the showcase, loaded from the `showcase` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseSettings {
    /// Radians of orbit per 60 Hz frame.
    pub orbit_speed: f32,
    /// Seconds each floor stays revealed in auto mode.
    pub floor_cycle_secs: f32,
    /// How often the live feed is drained.
    #[serde(with = "millis")]
    pub poll_interval: Duration,
}

impl Default for ShowcaseSettings {
    fn default() -> Self {
        Self {
            orbit_speed: 0.002,
            floor_cycle_secs: 5.0,
            poll_interval: Duration::from_secs(1),
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
