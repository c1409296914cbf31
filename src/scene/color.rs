use glam::Vec3;

use crate::errors::{Result, StoreyError};

/// Parses `#rrggbb` (leading `#` or `0x` optional) into RGB in `0..=1`.
pub fn parse_hex_color(text: &str) -> Result<Vec3> {
    let trimmed = text.trim();
    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .unwrap_or(trimmed);

    if hex.len() != 6 || !hex.is_ascii() {
        return Err(StoreyError::InvalidColor(text.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map(|v| f32::from(v) / 255.0)
            .map_err(|_| StoreyError::InvalidColor(text.to_string()))
    };

    Ok(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Parses a color, logging and substituting `fallback` when it is malformed.
#[must_use]
pub fn color_or(text: &str, fallback: Vec3) -> Vec3 {
    match parse_hex_color(text) {
        Ok(color) => color,
        Err(err) => {
            log::warn!("{err}, using fallback");
            fallback
        }
    }
}

/// Formats an RGB triple as `#rrggbb`.
#[must_use]
pub fn to_hex(color: Vec3) -> String {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    format!("#{:02x}{:02x}{:02x}", c.x as u8, c.y as u8, c.z as u8)
}

/// `0xRRGGBB` literal to RGB.
#[must_use]
pub fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}
