// Color conversion utilities

use palette::{FromColor, Hsl, Hsv, Srgb};
use razer_device::RgbColor;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color '{0}' (expected #rrggbb or a CSS color name)")]
    Invalid(String),
}

/// Parse `#rrggbb`, `rrggbb`, `#rgb` or a CSS color name
pub fn parse(s: &str) -> Result<RgbColor, ColorError> {
    let s = s.trim();
    if let Ok(rgb) = s.parse::<Srgb<u8>>() {
        return Ok(from_srgb(rgb));
    }
    palette::named::from_str(&s.to_ascii_lowercase())
        .map(from_srgb)
        .ok_or_else(|| ColorError::Invalid(s.to_string()))
}

/// Convert HSL to RGB
/// h: hue in degrees (any value, wraps)
/// s: saturation (0-1)
/// l: lightness (0-1)
pub fn hsl(h: f32, s: f32, l: f32) -> RgbColor {
    let hsl: Hsl = Hsl::new(h.rem_euclid(360.0), s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));
    let rgb: Srgb = Srgb::from_color(hsl);
    from_srgb(rgb.into_format())
}

/// Convert HSV to RGB
/// h: hue in degrees (any value, wraps)
/// s: saturation (0-1)
/// v: value/brightness (0-1)
pub fn hsv(h: f32, s: f32, v: f32) -> RgbColor {
    let hsv: Hsv = Hsv::new(h.rem_euclid(360.0), s.clamp(0.0, 1.0), v.clamp(0.0, 1.0));
    let rgb: Srgb = Srgb::from_color(hsv);
    from_srgb(rgb.into_format())
}

pub fn from_srgb(c: Srgb<u8>) -> RgbColor {
    RgbColor::new(c.red, c.green, c.blue)
}
