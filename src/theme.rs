//! Keyboard themes: a palette spread over the key regions.
//!
//! Generated themes (happy, warm, soft, random) space their hues evenly around
//! the color wheel. Named themes are fixed color schemes. Any CSS color name is
//! accepted as a single-color theme.

use std::time::{SystemTime, UNIX_EPOCH};

use razer_device::{KeyMatrix, Region, RgbColor};
use thiserror::Error;

use crate::color;

/// One color per key region
pub const PALETTE_SIZE: usize = 9;

/// Region order for palette assignment: region `i` gets `palette[i % len]`.
pub const REGION_ORDER: [Region; PALETTE_SIZE] = [
    Region::FnKeys,
    Region::Numerics,
    Region::Cursor,
    Region::Symbols,
    Region::Commandos,
    Region::Actions,
    Region::Letters,
    Region::Arrows,
    Region::Special,
];

/// Color of keys outside every region
pub const BACKGROUND: RgbColor = RgbColor::RED;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Could not find colors by that name: {0}")]
    Unknown(String),
}

/// A palette entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    pub name: String,
    pub color: RgbColor,
}

impl Swatch {
    fn new(name: impl Into<String>, color: RgbColor) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    fn unnamed(color: RgbColor) -> Self {
        Self::new(color.to_string(), color)
    }
}

/// A fixed color scheme
#[derive(Debug, PartialEq, Eq)]
pub struct NamedPalette {
    pub name: &'static str,
    pub colors: &'static [(&'static str, RgbColor)],
}

const fn hex(rgb: u32) -> RgbColor {
    RgbColor::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

pub static NAMED_PALETTES: &[NamedPalette] = &[
    NamedPalette {
        name: "monokai",
        colors: &[
            ("Pink", hex(0xf92672)),
            ("Orange", hex(0xfd971f)),
            ("Yellow", hex(0xe6db74)),
            ("Green", hex(0xa6e22e)),
            ("Blue", hex(0x66d9ef)),
            ("Purple", hex(0xae81ff)),
            ("Comment", hex(0x75715e)),
        ],
    },
    NamedPalette {
        name: "solarized",
        colors: &[
            ("Yellow", hex(0xb58900)),
            ("Orange", hex(0xcb4b16)),
            ("Red", hex(0xdc322f)),
            ("Magenta", hex(0xd33682)),
            ("Violet", hex(0x6c71c4)),
            ("Blue", hex(0x268bd2)),
            ("Cyan", hex(0x2aa198)),
            ("Green", hex(0x859900)),
        ],
    },
    NamedPalette {
        name: "dracula",
        colors: &[
            ("Cyan", hex(0x8be9fd)),
            ("Green", hex(0x50fa7b)),
            ("Orange", hex(0xffb86c)),
            ("Pink", hex(0xff79c6)),
            ("Purple", hex(0xbd93f9)),
            ("Red", hex(0xff5555)),
            ("Yellow", hex(0xf1fa8c)),
        ],
    },
    NamedPalette {
        name: "nord",
        colors: &[
            ("Frost 1", hex(0x8fbcbb)),
            ("Frost 2", hex(0x88c0d0)),
            ("Frost 3", hex(0x81a1c1)),
            ("Frost 4", hex(0x5e81ac)),
            ("Aurora Red", hex(0xbf616a)),
            ("Aurora Orange", hex(0xd08770)),
            ("Aurora Yellow", hex(0xebcb8b)),
            ("Aurora Green", hex(0xa3be8c)),
            ("Aurora Purple", hex(0xb48ead)),
        ],
    },
];

/// A theme selected by name
#[derive(Debug, Clone, PartialEq)]
pub enum Theme {
    /// Row-by-row color wipe
    Rainbow,
    Happy,
    Warm,
    Soft,
    /// Happy palette with a random hue offset
    Random,
    Named(&'static NamedPalette),
    /// Single CSS color
    Css(String, RgbColor),
}

impl Theme {
    /// Names accepted besides CSS colors
    pub fn builtin_names() -> Vec<&'static str> {
        let mut names = vec!["rainbow", "happy", "warm", "soft", "random"];
        names.extend(NAMED_PALETTES.iter().map(|p| p.name));
        names
    }

    /// Look up a theme (case-insensitive)
    pub fn from_name(name: &str) -> Result<Self, ThemeError> {
        let lower = name.trim().to_ascii_lowercase();
        let theme = match lower.as_str() {
            "rainbow" => Self::Rainbow,
            "happy" => Self::Happy,
            "warm" => Self::Warm,
            "soft" => Self::Soft,
            "random" => Self::Random,
            other => {
                if let Some(p) = NAMED_PALETTES.iter().find(|p| p.name == other) {
                    Self::Named(p)
                } else if let Some(c) = palette::named::from_str(other) {
                    Self::Css(lower.clone(), color::from_srgb(c))
                } else {
                    return Err(ThemeError::Unknown(name.to_string()));
                }
            }
        };
        Ok(theme)
    }

    /// Whether the palette has human-readable color names worth printing
    pub fn has_named_colors(&self) -> bool {
        matches!(self, Self::Named(_) | Self::Css(..))
    }

    /// Colors of this theme. Generated themes produce `count` colors; fixed
    /// schemes return their own colors.
    pub fn palette(&self, count: usize) -> Vec<Swatch> {
        match self {
            Self::Rainbow | Self::Happy => happy_palette(count, 0.0),
            Self::Warm => warm_palette(count),
            Self::Soft => soft_palette(count),
            Self::Random => happy_palette(count, clock_hue()),
            Self::Named(p) => p
                .colors
                .iter()
                .map(|&(name, color)| Swatch::new(name, color))
                .collect(),
            Self::Css(name, color) => vec![Swatch::new(name.clone(), *color)],
        }
    }
}

fn hue_step(count: usize) -> f32 {
    360.0 / count.max(1) as f32
}

/// Saturated, bright, evenly spaced hues
pub fn happy_palette(count: usize, offset: f32) -> Vec<Swatch> {
    let step = hue_step(count);
    (0..count)
        .map(|i| Swatch::unnamed(color::hsv(offset + i as f32 * step, 0.9, 0.75)))
        .collect()
}

/// Muted, darker, evenly spaced hues
pub fn warm_palette(count: usize) -> Vec<Swatch> {
    let step = hue_step(count);
    (0..count)
        .map(|i| Swatch::unnamed(color::hsv(i as f32 * step, 0.65, 0.45)))
        .collect()
}

/// Pastels
pub fn soft_palette(count: usize) -> Vec<Swatch> {
    let step = hue_step(count);
    (0..count)
        .map(|i| Swatch::unnamed(color::hsl(15.0 + i as f32 * step, 0.45, 0.72)))
        .collect()
}

fn clock_hue() -> f32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.subsec_nanos() % 360) as f32)
        .unwrap_or(0.0)
}

/// Paint the regions of `keys` from `palette`.
///
/// Keys outside every region end up [`BACKGROUND`]. An empty palette leaves
/// the matrix untouched.
pub fn apply_palette(keys: &mut KeyMatrix, palette: &[Swatch]) {
    if palette.is_empty() {
        return;
    }

    keys.set_all(BACKGROUND);
    for (i, region) in REGION_ORDER.iter().enumerate() {
        keys.paint_region(*region, palette[i % palette.len()].color);
    }
}
