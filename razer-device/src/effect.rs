//! Hardware lighting effects and their daemon method encoding

use crate::bus::{method, MethodArgs};
use crate::color::RgbColor;

/// Speed argument for reactive mode
const REACTIVE_SPEED: u8 = 1;

/// Speed argument for the starlight modes
const STARLIGHT_SPEED: u8 = 100;

/// Refresh rate argument for the ripple modes (daemon default)
const RIPPLE_REFRESH: f64 = 0.0;

/// Direction argument for wave mode
const WAVE_DIRECTION: i32 = 1;

/// Effects known by the keyboard hardware itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectType {
    None,
    Static,
    Reactive,
    Wave,
    Spectrum,
    Breath,
    BreathDual,
    BreathRandom,
    Starlight,
    StarlightDual,
    StarlightRandom,
    Ripple,
    RippleRandom,
}

impl EffectType {
    /// All effects in declaration order
    pub const ALL: [EffectType; 13] = [
        Self::None,
        Self::Static,
        Self::Reactive,
        Self::Wave,
        Self::Spectrum,
        Self::Breath,
        Self::BreathDual,
        Self::BreathRandom,
        Self::Starlight,
        Self::StarlightDual,
        Self::StarlightRandom,
        Self::Ripple,
        Self::RippleRandom,
    ];

    /// Look up an effect by its command-line name (case-insensitive).
    ///
    /// Unknown names map to [`EffectType::None`].
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "static" => Self::Static,
            "reactive" => Self::Reactive,
            "spectrum" => Self::Spectrum,
            "breath" => Self::Breath,
            "breathdual" => Self::BreathDual,
            "breathrandom" => Self::BreathRandom,
            "starlight" => Self::Starlight,
            "starlightdual" => Self::StarlightDual,
            "starlightrandom" => Self::StarlightRandom,
            "ripple" => Self::Ripple,
            "ripplerandom" => Self::RippleRandom,
            "wave" => Self::Wave,
            _ => Self::None,
        }
    }

    /// Command-line name of this effect
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Static => "static",
            Self::Reactive => "reactive",
            Self::Wave => "wave",
            Self::Spectrum => "spectrum",
            Self::Breath => "breath",
            Self::BreathDual => "breathdual",
            Self::BreathRandom => "breathrandom",
            Self::Starlight => "starlight",
            Self::StarlightDual => "starlightdual",
            Self::StarlightRandom => "starlightrandom",
            Self::Ripple => "ripple",
            Self::RippleRandom => "ripplerandom",
        }
    }

    /// Suffix of the daemon's `set<Suffix>` method
    pub fn method_suffix(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Static => "Static",
            Self::Reactive => "Reactive",
            Self::Wave => "Wave",
            Self::Spectrum => "Spectrum",
            Self::Breath => "BreathSingle",
            Self::BreathDual => "BreathDual",
            Self::BreathRandom => "BreathRandom",
            Self::Starlight => "StarlightSingle",
            Self::StarlightDual => "StarlightDual",
            Self::StarlightRandom => "StarlightRandom",
            Self::Ripple => "Ripple",
            Self::RippleRandom => "RippleRandomColour",
        }
    }

    /// Daemon interface that implements this effect
    pub fn interface(&self) -> &'static str {
        match self {
            Self::Ripple | Self::RippleRandom => method::CUSTOM,
            _ => method::CHROMA,
        }
    }

    /// Whether the effect uses the secondary color
    pub fn is_dual(&self) -> bool {
        matches!(self, Self::BreathDual | Self::StarlightDual)
    }
}

impl std::fmt::Display for EffectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An effect with the colors it should use
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub kind: EffectType,
    primary: RgbColor,
    secondary: RgbColor,
}

impl Effect {
    pub fn new(kind: EffectType, primary: RgbColor, secondary: RgbColor) -> Self {
        Self {
            kind,
            primary,
            secondary,
        }
    }

    /// Fully qualified daemon method, e.g. `razer.device.lighting.chroma.setStatic`
    pub fn method(&self) -> String {
        format!("{}.set{}", self.kind.interface(), self.kind.method_suffix())
    }

    /// Arguments for the daemon method
    pub fn arguments(&self) -> MethodArgs {
        let p = self.primary;
        let s = self.secondary;

        match self.kind {
            EffectType::Static | EffectType::Breath => MethodArgs::Rgb(p),
            EffectType::Reactive => MethodArgs::RgbSpeed(p, REACTIVE_SPEED),
            EffectType::BreathDual => MethodArgs::DualRgb(p, s),
            EffectType::Starlight => MethodArgs::SpeedRgb(STARLIGHT_SPEED, p),
            EffectType::StarlightDual => MethodArgs::SpeedDualRgb(STARLIGHT_SPEED, p, s),
            EffectType::StarlightRandom => MethodArgs::Speed(STARLIGHT_SPEED),
            EffectType::Ripple => MethodArgs::RgbRefresh(p, RIPPLE_REFRESH),
            EffectType::RippleRandom => MethodArgs::Double(RIPPLE_REFRESH),
            EffectType::Wave => MethodArgs::Direction(WAVE_DIRECTION),
            EffectType::None | EffectType::Spectrum | EffectType::BreathRandom => {
                MethodArgs::None
            }
        }
    }
}
